mod candidate;
mod desc;

pub use candidate::Candidate;
pub use desc::{Election, ElectionDetail};
