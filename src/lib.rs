//! Session client and navigation guard for Yggdrasil-style account services.
//!
//! The library keeps the locally persisted access token consistent with the
//! outcome of every remote call: successful logins persist the session, failed
//! logins clear it, and any unauthorized response forces a logout plus a
//! navigation to the login route. Route-level access control is a pure
//! function over a static route table, so it can be tested without any I/O.

pub mod cli;
pub mod config;
pub mod errors;
pub mod router;
pub mod session;
