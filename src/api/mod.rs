//! The request/response boundary with the portal server.
//!
//! [`PortalApi`] is the contract; [`HttpPortal`] speaks it over HTTP. The
//! flows in [`voting`] and [`admin`] are written against the trait so that
//! they can be exercised without a server.

pub mod admin;
mod http;
pub mod voting;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpPortal;

use crate::error::Result;
use crate::model::{
    api::{
        audit::{AuditLogEntry, SupportTicket},
        election::{Election, ElectionDetail},
        user::User,
        vote::{VoteReceipt, VoteStatus},
    },
    common::user::VerificationStatus,
};

/// Everything the client asks of the portal server.
///
/// The server is authoritative for all of it; nothing returned here should
/// be patched locally, only re-fetched.
pub trait PortalApi {
    /// The signed-in user.
    fn current_user(&self) -> Result<User>;

    /// All elections visible to the signed-in user.
    fn elections(&self) -> Result<Vec<Election>>;

    /// One election with its candidates.
    fn election(&self, election_id: &str) -> Result<ElectionDetail>;

    /// Whether the signed-in user has voted in an election.
    fn vote_status(&self, election_id: &str) -> Result<VoteStatus>;

    /// Cast a ballot. The server may refuse even if the local gate allowed it.
    fn cast_vote(&self, election_id: &str, candidate_id: &str) -> Result<VoteReceipt>;

    /// Administrative audit log, newest first as the server orders it.
    fn audit_logs(&self) -> Result<Vec<AuditLogEntry>>;

    /// Support tickets.
    fn support_tickets(&self) -> Result<Vec<SupportTicket>>;

    /// All portal accounts (admin).
    fn users(&self) -> Result<Vec<User>>;

    /// Approve or reject an account (admin). Returns the updated account.
    fn set_verification(&self, user_id: &str, status: VerificationStatus) -> Result<User>;

    /// Close an election now (admin). Returns the new snapshot.
    fn end_election(&self, election_id: &str) -> Result<Election>;

    /// Archive an election (admin). Returns the new snapshot.
    fn archive_election(&self, election_id: &str) -> Result<Election>;
}
