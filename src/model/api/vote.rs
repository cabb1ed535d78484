use serde::{Deserialize, Serialize};

use crate::model::common::election::CandidateId;

/// Whether the current user has voted in a particular election.
///
/// The server holds at most one cast vote per (user, election); the client
/// only ever observes this record, it never flips it locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatus {
    pub has_voted: bool,
    /// The user's own selection, for redisplay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<CandidateId>,
}

impl VoteStatus {
    pub fn not_voted() -> Self {
        Self::default()
    }

    pub fn voted_for(candidate_id: impl Into<CandidateId>) -> Self {
        Self {
            has_voted: true,
            candidate_id: Some(candidate_id.into()),
        }
    }
}

/// A ballot that the user wishes to cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub candidate_id: CandidateId,
}

/// Server acknowledgement of a successful vote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    #[serde(default)]
    pub message: Option<String>,
}
