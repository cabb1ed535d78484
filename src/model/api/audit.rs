use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::common::{filter::Filterable, lenient_time};

/// The user associated with a log entry or ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// An entry in the administrative audit log. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    /// What happened, e.g. `VOTE_CAST`.
    pub action: String,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default, with = "lenient_time")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Filterable for AuditLogEntry {
    fn discriminant(&self) -> &str {
        &self.action
    }

    fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    fn user_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.email.as_deref())
    }
}

/// A support ticket raised by a portal user. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: String,
    /// Ticket category, e.g. `KYC`.
    pub category: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default, with = "lenient_time")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Filterable for SupportTicket {
    fn discriminant(&self) -> &str {
        &self.category
    }

    fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    fn user_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.email.as_deref())
    }
}
