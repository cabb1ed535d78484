use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::{
    election::{resolve_phase, ElectionId, Phase},
    lenient_time,
};

use super::Candidate;

/// An election as described by the portal server.
///
/// This is a read-only snapshot: admin actions such as ending or archiving an
/// election return a fresh snapshot rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Election {
    /// Election unique ID.
    pub id: ElectionId,
    /// Election title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Election start time, if bounded.
    #[serde(default, with = "lenient_time")]
    pub start_time: Option<DateTime<Utc>>,
    /// Election end time, if bounded.
    #[serde(default, with = "lenient_time")]
    pub end_time: Option<DateTime<Utc>>,
    /// Whether non-admins may see this election at all.
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

impl Election {
    /// The phase this election is in at `now`.
    pub fn phase(&self, now: DateTime<Utc>) -> Phase {
        resolve_phase(self.start_time, self.end_time, now)
    }
}

/// The election-fetch response: the election plus its candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionDetail {
    pub election: Election,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl ElectionDetail {
    /// Find a candidate of this election by ID.
    pub fn candidate(&self, candidate_id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == candidate_id)
    }
}
