use serde::{Deserialize, Serialize};

use crate::model::common::{
    election::UserId,
    user::{Role, VerificationStatus},
};

/// A portal account, as returned by the current-user and admin user endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User unique ID.
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// KYC approval state.
    pub verification_status: VerificationStatus,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Approved
    }
}

/// Admin request body for approving or rejecting an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDecision {
    pub status: VerificationStatus,
}
