use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::model::{
    api::{
        election::{Candidate, Election, ElectionDetail},
        user::User,
        vote::VoteStatus,
    },
    common::{
        election::{CandidateId, Phase},
        eligibility::{can_see_votes, can_vote, Decision},
    },
};

/// Everything the election detail page needs, derived from one server snapshot
/// and one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionView {
    pub election: Election,
    pub phase: Phase,
    /// Whether the vote affordance is enabled, and why.
    pub decision: Decision,
    pub can_see_votes: bool,
    /// Candidates, with tallies removed unless the viewer may see them.
    pub candidates: Vec<Candidate>,
    /// The viewer's own past selection.
    pub own_choice: Option<CandidateId>,
}

/// A candidate's position in the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing<'a> {
    pub candidate: &'a Candidate,
    pub votes: u64,
    /// Percentage of all votes cast, 0 when nobody voted.
    pub share: f64,
    /// Top of the table in a completed election. Ties share the lead.
    pub leading: bool,
}

impl ElectionView {
    pub fn new(
        detail: ElectionDetail,
        user: &User,
        vote_status: &VoteStatus,
        now: DateTime<Utc>,
    ) -> Self {
        let phase = detail.election.phase(now);
        let decision = can_vote(user, vote_status, phase);
        let can_see_votes = can_see_votes(user, phase);
        let candidates = if can_see_votes {
            detail.candidates
        } else {
            detail.candidates.iter().map(Candidate::redacted).collect()
        };
        let own_choice = if vote_status.has_voted {
            vote_status.candidate_id.clone()
        } else {
            None
        };

        Self {
            election: detail.election,
            phase,
            decision,
            can_see_votes,
            candidates,
            own_choice,
        }
    }

    /// The candidate the viewer voted for, if still listed.
    pub fn own_choice_candidate(&self) -> Option<&Candidate> {
        let choice = self.own_choice.as_deref()?;
        self.candidates.iter().find(|c| c.id == choice)
    }

    /// Banner text explaining the state of the vote affordance.
    pub fn banner(&self) -> String {
        let mut banner = format!("{}: {}", self.phase.label(), self.decision.reason.message());
        if let Some(candidate) = self.own_choice_candidate() {
            banner.push_str(&format!(" You voted for {}.", candidate.name));
        }
        banner
    }

    /// Sum of all tallies, if visible.
    pub fn total_votes(&self) -> Option<u64> {
        self.can_see_votes
            .then(|| self.candidates.iter().filter_map(|c| c.votes_count).sum::<u64>())
    }

    /// The results table, most votes first and then by name.
    /// `None` while the tallies are hidden from this viewer.
    pub fn standings(&self) -> Option<Vec<Standing<'_>>> {
        let total = self.total_votes()?;
        let top = self
            .candidates
            .iter()
            .filter_map(|c| c.votes_count)
            .max()
            .unwrap_or(0);

        let mut standings = self
            .candidates
            .iter()
            .map(|candidate| {
                let votes = candidate.votes_count.unwrap_or(0);
                Standing {
                    candidate,
                    votes,
                    share: if total == 0 {
                        0.0
                    } else {
                        votes as f64 * 100.0 / total as f64
                    },
                    leading: self.phase == Phase::Completed && top > 0 && votes == top,
                }
            })
            .collect::<Vec<_>>();
        standings.sort_by(|a, b| match b.votes.cmp(&a.votes) {
            Ordering::Equal => a.candidate.name.cmp(&b.candidate.name),
            other => other,
        });
        Some(standings)
    }
}
