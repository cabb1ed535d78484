use reqwest::{
    blocking::{Client, RequestBuilder},
    Url,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{log_request, log_response, RequestId};
use crate::model::{
    api::{
        audit::{AuditLogEntry, SupportTicket},
        election::{Election, ElectionDetail},
        user::{User, VerificationDecision},
        vote::{VoteReceipt, VoteRequest, VoteStatus},
    },
    common::user::VerificationStatus,
};
use crate::session::Session;

use super::PortalApi;

/// [`PortalApi`] over HTTP, authenticated with the session's bearer token.
pub struct HttpPortal {
    client: Client,
    base_url: Url,
    session: Session,
}

impl HttpPortal {
    pub fn new(config: &Config, session: Session) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .cookie_store(true)
            .build()?;
        let base_url = config.base_url();
        let base_url = Url::parse(&base_url)
            .map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!("{base_url}: not a base URL")));
        }
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Forget the credentials, as at logout.
    pub fn logout(&mut self) {
        self.session.clear();
    }

    /// The endpoint under the base URL. Each segment is percent-encoded, so
    /// IDs cannot escape their place in the path.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{}: not a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        self.execute("GET", self.client.get(url.clone()), &url)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> Result<T> {
        let url = self.url(segments)?;
        self.execute("POST", self.client.post(url.clone()).json(body), &url)
    }

    fn patch<B: Serialize, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> Result<T> {
        let url = self.url(segments)?;
        self.execute("PATCH", self.client.patch(url.clone()).json(body), &url)
    }

    fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let id = RequestId::next();
        log_request(id, method, url.as_str());
        let response = request.send()?;
        let status = response.status();
        log_response(id, status, url.as_str());

        let body = response.text()?;
        if status.is_success() {
            decode_body(&body)
        } else {
            Err(Error::from_response(status, &body))
        }
    }
}

/// Decode a success body. An empty body is treated as `{}`, since some
/// mutating endpoints reply with nothing at all.
fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    Ok(serde_json::from_str(body)?)
}

impl PortalApi for HttpPortal {
    fn current_user(&self) -> Result<User> {
        self.get(&["auth", "me"])
    }

    fn elections(&self) -> Result<Vec<Election>> {
        self.get(&["elections"])
    }

    fn election(&self, election_id: &str) -> Result<ElectionDetail> {
        self.get(&["elections", election_id])
    }

    fn vote_status(&self, election_id: &str) -> Result<VoteStatus> {
        self.get(&["elections", election_id, "vote-status"])
    }

    fn cast_vote(&self, election_id: &str, candidate_id: &str) -> Result<VoteReceipt> {
        let body = VoteRequest {
            candidate_id: candidate_id.to_string(),
        };
        self.post(&["elections", election_id, "vote"], &body)
    }

    fn audit_logs(&self) -> Result<Vec<AuditLogEntry>> {
        self.get(&["admin", "audit-logs"])
    }

    fn support_tickets(&self) -> Result<Vec<SupportTicket>> {
        self.get(&["admin", "tickets"])
    }

    fn users(&self) -> Result<Vec<User>> {
        self.get(&["admin", "users"])
    }

    fn set_verification(&self, user_id: &str, status: VerificationStatus) -> Result<User> {
        self.patch(
            &["admin", "users", user_id, "verification"],
            &VerificationDecision { status },
        )
    }

    fn end_election(&self, election_id: &str) -> Result<Election> {
        self.post(&["admin", "elections", election_id, "end"], &serde_json::json!({}))
    }

    fn archive_election(&self, election_id: &str) -> Result<Election> {
        self.post(
            &["admin", "elections", election_id, "archive"],
            &serde_json::json!({}),
        )
    }
}
