mod phase;

pub use phase::{resolve_phase, Phase};

/// Our election IDs are opaque server-assigned strings.
pub type ElectionId = String;
/// Our candidate IDs are opaque server-assigned strings.
pub type CandidateId = String;
/// Our user IDs are opaque server-assigned strings.
pub type UserId = String;
