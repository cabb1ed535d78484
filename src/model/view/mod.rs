//! Derived, read-only view models. Each is rebuilt from a fresh server
//! snapshot and a single `now`, never patched in place.

mod dashboard;
mod election;
mod review;

pub use dashboard::Dashboard;
pub use election::{ElectionView, Standing};
pub use review::ReviewQueue;
