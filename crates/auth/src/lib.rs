//! Request signing and database resolution for the VWS emulator.
//!
//! The real service authenticates every request with an HMAC-SHA1 signature
//! over a newline-joined canonical string. The emulator recomputes the
//! expected `Authorization` header for each known database and picks the
//! first one whose header matches — so a wrong key and a wrong signature are
//! indistinguishable to the caller, exactly as in production.

mod resolve;
mod signature;

pub use resolve::{
    get_database_matching_client_keys, get_database_matching_server_keys,
};
pub use signature::authorization_header;
