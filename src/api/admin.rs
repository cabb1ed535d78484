use crate::error::{Error, Result};
use crate::model::{
    api::{
        audit::{AuditLogEntry, SupportTicket},
        election::Election,
    },
    common::{
        filter::{filter, FilterQuery},
        user::VerificationStatus,
    },
    view::ReviewQueue,
};

use super::PortalApi;

/// Accounts awaiting a KYC decision.
pub fn review_queue(api: &impl PortalApi) -> Result<ReviewQueue> {
    Ok(ReviewQueue::new(api.users()?))
}

/// Approve or reject a pending account, then re-fetch the queue.
pub fn decide(
    api: &impl PortalApi,
    user_id: &str,
    status: VerificationStatus,
) -> Result<ReviewQueue> {
    if status == VerificationStatus::Pending {
        return Err(Error::BadRequest(
            "A verification decision must approve or reject".to_string(),
        ));
    }
    let user = api.set_verification(user_id, status)?;
    info!("Verification for user {} set to {}", user.id, user.verification_status);
    review_queue(api)
}

/// Close an election immediately.
pub fn end_election(api: &impl PortalApi, election_id: &str) -> Result<Election> {
    let election = api.end_election(election_id)?;
    info!("Ended election {} ({})", election.id, election.title);
    Ok(election)
}

/// Hide an election from voters.
pub fn archive_election(api: &impl PortalApi, election_id: &str) -> Result<Election> {
    let election = api.archive_election(election_id)?;
    info!("Archived election {} ({})", election.id, election.title);
    Ok(election)
}

/// The audit log narrowed by `query`, in server order.
pub fn audit_log(api: &impl PortalApi, query: &FilterQuery) -> Result<Vec<AuditLogEntry>> {
    let entries = api.audit_logs()?;
    Ok(filter(&entries, query).into_iter().cloned().collect())
}

/// Support tickets narrowed by `query`, in server order.
pub fn tickets(api: &impl PortalApi, query: &FilterQuery) -> Result<Vec<SupportTicket>> {
    let tickets = api.support_tickets()?;
    Ok(filter(&tickets, query).into_iter().cloned().collect())
}
