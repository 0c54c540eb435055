//! VUMOCK — an offline emulator of the Vuforia Web Services APIs.
//!
//! The emulator reproduces the cloud recognition service's two HTTP APIs —
//! the management API (create/update/delete/list targets, summaries,
//! duplicate detection) and the query API (submit an image, get matching
//! targets back) — faithfully enough that client code can be tested against
//! it without network access: the same HMAC-SHA1 authentication scheme, the
//! same ordered validation behavior with byte-identical error bodies, the
//! same asynchronous processing delays, and the same deletion quirks.
//!
//! # In-process usage
//!
//! ```rust,no_run
//! use store::VuforiaDatabase;
//! use vumock::Vumock;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mock = Vumock::spawn(Default::default()).await?;
//!     let database = VuforiaDatabase::new();
//!     let server_access_key = database.server_access_key.clone();
//!     mock.add_database(database)?;
//!     // Point the client under test at mock.vws_url() / mock.vwq_url()
//!     // and sign requests with the database credentials.
//!     println!("management API at {}", mock.vws_url());
//!     println!("key: {server_access_key}");
//!     Ok(())
//! }
//! ```
//!
//! # Standalone usage
//!
//! The `vumock` binary serves both APIs on configured ports; see
//! [`server::ServerConfig`] for the knobs (processing time, deletion
//! recognition window, matcher and rater strategies, artificial latency).

mod emulator;

pub use emulator::Vumock;
pub use server::{ServerConfig, ServerState};

// The building blocks, for tests that want to drive them directly.
pub use auth;
pub use matchers;
pub use store;
pub use validators;
