use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::model::{
    api::vote::VoteReceipt,
    view::{Dashboard, ElectionView},
};

use super::PortalApi;

/// What happened to a ballot the gate let through.
///
/// `view` is rebuilt from state fetched after the cast request. It is `None`
/// if that refetch failed, which never changes what the server said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The server recorded the vote.
    Cast {
        receipt: VoteReceipt,
        view: Option<Box<ElectionView>>,
    },
    /// The server refused, e.g. because another tab voted first. `message`
    /// is the server's wording.
    Rejected {
        message: String,
        view: Option<Box<ElectionView>>,
    },
}

impl VoteOutcome {
    /// The refreshed election page, if it could be fetched.
    pub fn view(&self) -> Option<&ElectionView> {
        match self {
            Self::Cast { view, .. } | Self::Rejected { view, .. } => view.as_deref(),
        }
    }
}

/// Fetch everything the election page needs and derive its view at `now`.
pub fn election_view(
    api: &impl PortalApi,
    election_id: &str,
    now: DateTime<Utc>,
) -> Result<ElectionView> {
    let user = api.current_user()?;
    let detail = api.election(election_id)?;
    let vote_status = api.vote_status(election_id)?;
    Ok(ElectionView::new(detail, &user, &vote_status, now))
}

/// Fetch the election list and group it for the dashboard.
pub fn dashboard(api: &impl PortalApi, now: DateTime<Utc>) -> Result<Dashboard> {
    let user = api.current_user()?;
    let elections = api.elections()?;
    Ok(Dashboard::new(elections, &user, now))
}

/// Cast a ballot for `candidate_id`.
///
/// The gate is evaluated on freshly fetched state first; a denial returns
/// [`Error::Ineligible`] without contacting the cast endpoint. Once the server
/// has answered, its answer is always returned; the accompanying view comes
/// from state fetched *after* the cast request, so the local `has_voted` is
/// never set optimistically.
pub fn cast_ballot(
    api: &impl PortalApi,
    election_id: &str,
    candidate_id: &str,
    now: DateTime<Utc>,
) -> Result<VoteOutcome> {
    let user = api.current_user()?;
    let detail = api.election(election_id)?;
    let vote_status = api.vote_status(election_id)?;
    let known_candidate = detail.candidate(candidate_id).is_some();

    let before = ElectionView::new(detail, &user, &vote_status, now);
    if !before.decision.allowed {
        info!(
            "Not casting in election {election_id}: {}",
            before.decision.reason
        );
        return Err(Error::Ineligible(before.decision.reason));
    }
    if !known_candidate {
        return Err(Error::not_found(format!(
            "Candidate '{candidate_id}' in election '{election_id}'"
        )));
    }

    match api.cast_vote(election_id, candidate_id) {
        Ok(receipt) => {
            info!("Vote cast in election {election_id}");
            let view = refreshed_view(api, election_id, now);
            Ok(VoteOutcome::Cast { receipt, view })
        }
        Err(Error::Rejected { status, message }) => {
            warn!("Vote in election {election_id} rejected by server ({status}): {message}");
            let view = refreshed_view(api, election_id, now);
            Ok(VoteOutcome::Rejected { message, view })
        }
        Err(e) => Err(e),
    }
}

/// Refetch after a cast. A failure here is logged, not returned, since the
/// server has already answered the cast itself.
fn refreshed_view(
    api: &impl PortalApi,
    election_id: &str,
    now: DateTime<Utc>,
) -> Option<Box<ElectionView>> {
    match election_view(api, election_id, now) {
        Ok(view) => Some(Box::new(view)),
        Err(e) => {
            warn!("Could not refresh election {election_id} after casting: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::api::fake::FakePortal;
    use crate::model::{
        api::{election::Election, user::User, vote::VoteStatus},
        common::{election::Phase, eligibility::ReasonCode},
    };

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn active_id() -> String {
        Election::active_example(now()).id
    }

    #[test]
    fn successful_vote_refetches() {
        let portal = FakePortal::new(User::voter_example(), now());
        let outcome = cast_ballot(&portal, &active_id(), "c-1", now()).unwrap();
        match outcome {
            VoteOutcome::Cast { receipt, view } => {
                let view = view.unwrap();
                assert_eq!(receipt.message.as_deref(), Some("Vote recorded"));
                assert!(!view.decision.allowed);
                assert_eq!(view.decision.reason, ReasonCode::AlreadyVoted);
                assert_eq!(view.own_choice.as_deref(), Some("c-1"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(portal.called("cast_vote"), 1);
        assert_eq!(portal.called("vote_status"), 2);
    }

    #[test]
    fn second_vote_is_stopped_locally() {
        let portal = FakePortal::new(User::voter_example(), now());
        cast_ballot(&portal, &active_id(), "c-1", now()).unwrap();
        let result = cast_ballot(&portal, &active_id(), "c-2", now());
        assert!(matches!(
            result,
            Err(Error::Ineligible(ReasonCode::AlreadyVoted))
        ));
        assert_eq!(portal.called("cast_vote"), 1);
    }

    #[test]
    fn ineligible_users_never_reach_the_server() {
        let cases = [
            (User::admin_example(), active_id(), ReasonCode::AdminViewOnly),
            (User::pending_example(), active_id(), ReasonCode::NotVerified),
            (
                User::voter_example(),
                Election::upcoming_example(now()).id,
                ReasonCode::NotStarted,
            ),
            (
                User::voter_example(),
                Election::completed_example(now()).id,
                ReasonCode::ElectionClosed,
            ),
        ];
        for (user, election_id, reason) in cases {
            let portal = FakePortal::new(user, now());
            let result = cast_ballot(&portal, &election_id, "c-1", now());
            match result {
                Err(Error::Ineligible(actual)) => assert_eq!(actual, reason),
                other => panic!("unexpected {other:?}"),
            }
            assert_eq!(portal.called("cast_vote"), 0);
        }
    }

    #[test]
    fn unknown_candidate() {
        let portal = FakePortal::new(User::voter_example(), now());
        let result = cast_ballot(&portal, &active_id(), "c-404", now());
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(portal.called("cast_vote"), 0);
    }

    #[test]
    fn race_with_another_tab() {
        let portal = FakePortal::new(User::voter_example(), now());
        *portal.racing_vote.borrow_mut() = Some("c-3".to_string());

        let outcome = cast_ballot(&portal, &active_id(), "c-1", now()).unwrap();
        match outcome {
            VoteOutcome::Rejected { message, view } => {
                let view = view.unwrap();
                assert_eq!(message, "You have already voted in this election");
                // The view reflects the server's record, not our attempted choice.
                assert_eq!(view.decision.reason, ReasonCode::AlreadyVoted);
                assert_eq!(view.own_choice.as_deref(), Some("c-3"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn recorded_vote_survives_failed_refresh() {
        let portal = FakePortal::new(User::voter_example(), now());
        portal.refresh_fails.set(true);

        let outcome = cast_ballot(&portal, &active_id(), "c-1", now()).unwrap();
        assert!(outcome.view().is_none());
        match outcome {
            VoteOutcome::Cast { receipt, .. } => {
                assert_eq!(receipt.message.as_deref(), Some("Vote recorded"));
            }
            other => panic!("unexpected {other:?}"),
        }
        // The server still holds the vote.
        assert_eq!(
            portal.statuses.borrow().get(&active_id()),
            Some(&VoteStatus::voted_for("c-1"))
        );
    }

    #[test]
    fn rejection_message_survives_failed_refresh() {
        let portal = FakePortal::new(User::voter_example(), now());
        *portal.racing_vote.borrow_mut() = Some("c-3".to_string());
        portal.refresh_fails.set(true);

        let outcome = cast_ballot(&portal, &active_id(), "c-1", now()).unwrap();
        match outcome {
            VoteOutcome::Rejected { message, view } => {
                assert_eq!(message, "You have already voted in this election");
                assert!(view.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_election() {
        let portal = FakePortal::new(User::voter_example(), now());
        let result = cast_ballot(&portal, "e-missing", "c-1", now());
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn dashboard_groups_fetched_elections() {
        let portal = FakePortal::new(User::voter_example(), now());
        let dashboard = dashboard(&portal, now()).unwrap();
        assert_eq!(dashboard.len(), 3);
        assert_eq!(dashboard.in_phase(Phase::Active).len(), 1);
    }

    #[test]
    fn view_for_admin_shows_live_tallies() {
        let portal = FakePortal::new(User::admin_example(), now());
        let view = election_view(&portal, &active_id(), now()).unwrap();
        assert!(view.can_see_votes);
        assert_eq!(view.total_votes(), Some(156));
    }
}
