use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Temporal phases in the Election lifecycle, derived from its boundaries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The start boundary has not been reached yet.
    Upcoming,
    /// Open for voting.
    Active,
    /// The end boundary has passed.
    Completed,
}

impl Phase {
    /// Short label for status badges.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Active => "Live",
            Self::Completed => "Ended",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Upcoming => "upcoming",
                Self::Active => "active",
                Self::Completed => "completed",
            }
        )
    }
}

/// Work out which phase an election is in at the instant `now`.
///
/// The end boundary takes precedence over the start boundary, so an election
/// whose end has passed is completed even if its start lies in the future.
/// A missing boundary never closes or opens anything: with no end the election
/// stays active forever once started, and with neither it is always active.
///
/// `now` should be captured once by the caller and reused for every derivation
/// in the same render, so that both comparisons see the same instant.
pub fn resolve_phase(
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Phase {
    match (start_time, end_time) {
        (_, Some(end)) if now > end => Phase::Completed,
        (Some(start), _) if now < start => Phase::Upcoming,
        _ => Phase::Active,
    }
}
