pub mod election;
pub mod eligibility;
pub mod filter;
pub mod lenient_time;
pub mod user;
