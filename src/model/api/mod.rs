//! API-compatible types.
//!
//! The types in this module mirror the portal server's JSON bodies, e.g.:
//!
//! - Field names are camelCase.
//! - Datetimes are RFC 3339 strings, and unreadable ones become `None`.

pub mod audit;
pub mod election;
pub mod user;
pub mod vote;
