use serde::{Deserialize, Serialize};

use crate::model::common::election::CandidateId;

/// A candidate standing in an election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate unique ID.
    pub id: CandidateId,
    /// Display name.
    pub name: String,
    /// Party affiliation; empty for independents.
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub description: String,
    /// Reference to an uploaded icon, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Vote tally. Only meaningful once results may be disclosed to the viewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes_count: Option<u64>,
}

impl Candidate {
    /// A copy of this candidate with the tally removed.
    pub fn redacted(&self) -> Self {
        Self {
            votes_count: None,
            ..self.clone()
        }
    }
}
