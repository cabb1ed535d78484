//! Explicit per-session context: the auth token and display preferences.
//!
//! A [`Session`] is created at login, handed to whatever needs it, and
//! cleared at logout. Nothing here is global.

use std::collections::HashSet;

use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::common::{election::UserId, user::Role};

/// Display preferences carried alongside the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// BCP 47 language tag.
    pub language: String,
    /// `light`, `dark` or `system`.
    pub theme: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            theme: "system".to_string(),
        }
    }
}

/// Token claims as issued by the portal server.
///
/// These are read without checking the signature, purely so the client can
/// tell when to send the user back to the login page. The server remains the
/// only authority on whether the token is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "sub", default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(rename = "exp", with = "ts_seconds")]
    pub expire_at: DateTime<Utc>,
}

impl Claims {
    /// Decode the claims of a JWT without verifying its signature.
    pub fn peek(token: &str) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        // Expiry is checked against an explicit `now` in `Session::is_expired`.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);
        let data = jsonwebtoken::decode::<Self>(token, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(data.claims)
    }
}

/// An authenticated (or anonymous) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    claims: Option<Claims>,
    preferences: Preferences,
}

impl Session {
    /// A session with no credentials.
    pub fn anonymous(preferences: Preferences) -> Self {
        Self {
            token: None,
            claims: None,
            preferences,
        }
    }

    /// Begin a session with a token received at login.
    pub fn start(token: impl Into<String>, preferences: Preferences) -> Result<Self> {
        let token = token.into();
        let claims = Claims::peek(&token)?;
        info!(
            "Session started for {} (expires {})",
            claims.user_id.as_deref().unwrap_or("unknown user"),
            claims.expire_at
        );
        Ok(Self {
            token: Some(token),
            claims: Some(claims),
            preferences,
        })
    }

    /// Drop the credentials, as at logout. Preferences survive.
    pub fn clear(&mut self) {
        if self.token.take().is_some() {
            info!("Session cleared");
        }
        self.claims = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Has the token's expiry passed? Anonymous sessions never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.claims
            .as_ref()
            .map(|claims| now >= claims.expire_at)
            .unwrap_or(false)
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }
}
