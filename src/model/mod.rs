//! Data models for the portal client.
//!
//! - [`api`]: records exchanged with the portal server.
//! - [`common`]: types and pure rules shared between views.
//! - [`view`]: per-page view models derived from the above.

pub mod api;
pub mod common;
pub mod view;
