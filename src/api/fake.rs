//! An in-memory portal server for exercising the client flows.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};
use crate::model::{
    api::{
        audit::{AuditLogEntry, SupportTicket},
        election::{Election, ElectionDetail},
        user::User,
        vote::{VoteReceipt, VoteStatus},
    },
    common::{election::ElectionId, user::VerificationStatus},
};

use super::PortalApi;

pub(crate) struct FakePortal {
    /// Server clock.
    pub now: DateTime<Utc>,
    pub user: RefCell<User>,
    pub elections: RefCell<Vec<ElectionDetail>>,
    pub statuses: RefCell<HashMap<ElectionId, VoteStatus>>,
    pub users: RefCell<Vec<User>>,
    pub audit: Vec<AuditLogEntry>,
    pub tickets: Vec<SupportTicket>,
    /// If set, another tab votes for this candidate just before our next cast lands.
    pub racing_vote: RefCell<Option<String>>,
    /// If set, vote-status requests fail once a cast has been attempted.
    pub refresh_fails: Cell<bool>,
    /// Names of the operations called, in order.
    pub calls: RefCell<Vec<&'static str>>,
}

impl FakePortal {
    pub fn new(user: User, now: DateTime<Utc>) -> Self {
        Self {
            now,
            user: RefCell::new(user),
            elections: RefCell::new(vec![
                ElectionDetail::example(Election::active_example(now)),
                ElectionDetail::example(Election::upcoming_example(now)),
                ElectionDetail::example(Election::completed_example(now)),
            ]),
            statuses: RefCell::new(HashMap::new()),
            users: RefCell::new(vec![
                User::voter_example(),
                User::pending_example(),
                User::rejected_example(),
                User::admin_example(),
            ]),
            audit: AuditLogEntry::examples(),
            tickets: SupportTicket::examples(),
            racing_vote: RefCell::new(None),
            refresh_fails: Cell::new(false),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn called(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }

    fn with_election<T>(
        &self,
        election_id: &str,
        f: impl FnOnce(&mut ElectionDetail) -> T,
    ) -> Result<T> {
        let mut elections = self.elections.borrow_mut();
        let detail = elections
            .iter_mut()
            .find(|d| d.election.id == election_id)
            .ok_or_else(|| Error::not_found(format!("Election with ID '{election_id}'")))?;
        Ok(f(detail))
    }

    fn record_vote(&self, election_id: &str, candidate_id: &str) -> Result<()> {
        self.with_election(election_id, |detail| {
            if let Some(candidate) = detail.candidates.iter_mut().find(|c| c.id == candidate_id) {
                candidate.votes_count = Some(candidate.votes_count.unwrap_or(0) + 1);
            }
        })?;
        self.statuses
            .borrow_mut()
            .insert(election_id.to_string(), VoteStatus::voted_for(candidate_id));
        Ok(())
    }
}

impl PortalApi for FakePortal {
    fn current_user(&self) -> Result<User> {
        self.record("current_user");
        Ok(self.user.borrow().clone())
    }

    fn elections(&self) -> Result<Vec<Election>> {
        self.record("elections");
        Ok(self
            .elections
            .borrow()
            .iter()
            .map(|d| d.election.clone())
            .collect())
    }

    fn election(&self, election_id: &str) -> Result<ElectionDetail> {
        self.record("election");
        self.with_election(election_id, |detail| detail.clone())
    }

    fn vote_status(&self, election_id: &str) -> Result<VoteStatus> {
        self.record("vote_status");
        if self.refresh_fails.get() && self.called("cast_vote") > 0 {
            return Err(Error::Rejected {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }
        Ok(self
            .statuses
            .borrow()
            .get(election_id)
            .cloned()
            .unwrap_or_default())
    }

    fn cast_vote(&self, election_id: &str, candidate_id: &str) -> Result<VoteReceipt> {
        self.record("cast_vote");
        if let Some(other) = self.racing_vote.borrow_mut().take() {
            self.record_vote(election_id, &other)?;
        }
        let already = self
            .statuses
            .borrow()
            .get(election_id)
            .map(|s| s.has_voted)
            .unwrap_or(false);
        if already {
            return Err(Error::Rejected {
                status: 409,
                message: "You have already voted in this election".to_string(),
            });
        }
        self.record_vote(election_id, candidate_id)?;
        Ok(VoteReceipt {
            message: Some("Vote recorded".to_string()),
        })
    }

    fn audit_logs(&self) -> Result<Vec<AuditLogEntry>> {
        self.record("audit_logs");
        Ok(self.audit.clone())
    }

    fn support_tickets(&self) -> Result<Vec<SupportTicket>> {
        self.record("support_tickets");
        Ok(self.tickets.clone())
    }

    fn users(&self) -> Result<Vec<User>> {
        self.record("users");
        Ok(self.users.borrow().clone())
    }

    fn set_verification(&self, user_id: &str, status: VerificationStatus) -> Result<User> {
        self.record("set_verification");
        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::not_found(format!("User with ID '{user_id}'")))?;
        user.verification_status = status;
        Ok(user.clone())
    }

    fn end_election(&self, election_id: &str) -> Result<Election> {
        self.record("end_election");
        let now = self.now;
        self.with_election(election_id, |detail| {
            detail.election.end_time = Some(now - Duration::seconds(1));
            detail.election.clone()
        })
    }

    fn archive_election(&self, election_id: &str) -> Result<Election> {
        self.record("archive_election");
        self.with_election(election_id, |detail| {
            detail.election.is_public = false;
            detail.election.clone()
        })
    }
}
