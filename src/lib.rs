//! Client core of an e-voting portal: election phases, the eligibility gate,
//! admin log/ticket filtering, and the flows that tie them to the portal
//! server.

#[macro_use]
extern crate log;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod session;
