use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::model::api::{user::User, vote::VoteStatus};

use super::election::Phase;

/// Why a viewer may or may not cast a ballot right now.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    AdminViewOnly,
    NotVerified,
    NotStarted,
    ElectionClosed,
    AlreadyVoted,
    Ok,
}

impl ReasonCode {
    /// Banner text for this reason.
    pub fn message(&self) -> &'static str {
        match self {
            Self::AdminViewOnly => "Administrators can observe elections but cannot vote.",
            Self::NotVerified => "Your account must be verified before you can vote.",
            Self::NotStarted => "Voting has not opened yet.",
            Self::ElectionClosed => "Voting has closed for this election.",
            Self::AlreadyVoted => "You have already voted in this election.",
            Self::Ok => "You are eligible to vote.",
        }
    }

    /// The wire code, e.g. `ALREADY_VOTED`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AdminViewOnly => "ADMIN_VIEW_ONLY",
            Self::NotVerified => "NOT_VERIFIED",
            Self::NotStarted => "NOT_STARTED",
            Self::ElectionClosed => "ELECTION_CLOSED",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::Ok => "OK",
        }
    }
}

impl Display for ReasonCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The outcome of the eligibility gate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub allowed: bool,
    #[serde(rename = "reasonCode")]
    pub reason: ReasonCode,
}

impl Decision {
    fn deny(reason: ReasonCode) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    fn allow() -> Self {
        Self {
            allowed: true,
            reason: ReasonCode::Ok,
        }
    }
}

/// Decide whether `user` may cast a ballot in an election currently in `phase`.
///
/// Checks run in a fixed order and the first failing one wins. Role and
/// verification come before `has_voted` so that someone who was never
/// eligible is not told they have already voted.
///
/// This is advisory only: the server re-validates every cast request.
pub fn can_vote(user: &User, vote_status: &VoteStatus, phase: Phase) -> Decision {
    let decision = if user.is_admin() {
        Decision::deny(ReasonCode::AdminViewOnly)
    } else if !user.is_verified() {
        Decision::deny(ReasonCode::NotVerified)
    } else if phase == Phase::Upcoming {
        Decision::deny(ReasonCode::NotStarted)
    } else if phase == Phase::Completed {
        Decision::deny(ReasonCode::ElectionClosed)
    } else if vote_status.has_voted {
        Decision::deny(ReasonCode::AlreadyVoted)
    } else {
        Decision::allow()
    };
    debug!(
        "Eligibility for user {} in {phase} election: {}",
        user.id, decision.reason
    );
    decision
}

/// May this viewer see vote counts? Everyone can once the election has
/// completed; admins can at any time. Independent of [`can_vote`].
pub fn can_see_votes(user: &User, phase: Phase) -> bool {
    phase == Phase::Completed || user.is_admin()
}
