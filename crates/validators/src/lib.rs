//! Ordered request validation for the VWS emulator.
//!
//! Two pipelines live here, one per endpoint family:
//!
//! - [`services::run_services_validators`] for the management API
//!   (`/targets*`, `/summary*`, `/duplicates/*`).
//! - [`query::run_query_validators`] for the query API (`/v1/query`).
//!
//! Each pipeline is an explicit, ordered slice of independent step
//! functions. A step either passes or short-circuits with a fully formed
//! [`ErrorResponse`] — status code, headers, and body reproduced verbatim
//! from the emulated service, down to its inconsistent JSON separators and
//! canned upstream-gateway HTML pages. The order is part of the contract:
//! many malformed inputs fail more than one check, and which error surfaces
//! first is observable.

pub mod b64;
pub mod multipart;
pub mod query;
mod request;
mod respond;
mod result_codes;
pub mod services;

pub use request::RequestContext;
pub use respond::{rfc1123_date, ErrorResponse};
pub use result_codes::ResultCode;
