//! VUMOCK server - the HTTP surface of the VWS emulator.
//!
//! Two axum routers are built here, mirroring the two hosts of the real
//! service:
//!
//! - the **management API** (`/targets`, `/summary`, `/duplicates`),
//!   authenticated with a database's server key pair, and
//! - the **query API** (`/v1/query`), authenticated with the client pair.
//!
//! Both routers run every request through the matching validation pipeline
//! *before* any handler logic, so a malformed request produces exactly the
//! catalogued error response. Handlers only ever see requests the real
//! service would have accepted.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{start_server, vwq_router, vws_router};
pub use state::ServerState;
