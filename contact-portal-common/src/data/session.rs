use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seconds before expiry at which the access token is refreshed
pub const REFRESH_MARGIN_SECONDS: i64 = 60;

/// Authenticated identity as reported by the auth service
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier of the user. Submissions are tagged with this value.
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Token set issued by the auth service after a successful sign in or refresh
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    /// Absolute expiry of the access token. Older auth servers omit this, in which case
    /// [Session::stamp_expiry] fills it from `expires_in`.
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
    pub refresh_token: String,
    pub user: User,
}

/// Token type assumed when the auth service leaves it out
fn default_token_type() -> String {
    "bearer".to_owned()
}

impl Session {
    /// Returns a reference to the session owner's uid
    pub const fn user_id(&self) -> &Uuid {
        &self.user.id
    }

    /// Fill a missing `expires_at` using `issued_at + expires_in`
    #[must_use]
    pub fn stamp_expiry(mut self, issued_at: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = Some(issued_at + chrono::Duration::seconds(self.expires_in));
        }
        self
    }

    /// Time to wait from `now` before the access token should be refreshed. The refresh happens
    /// [REFRESH_MARGIN_SECONDS] before expiry and never in the past. Returns [None] if the expiry
    /// is unknown.
    pub fn refresh_delay(&self, now: DateTime<Utc>) -> Option<Duration> {
        let expires_at = self.expires_at?;
        let refresh_at = expires_at - chrono::Duration::seconds(REFRESH_MARGIN_SECONDS);
        Some((refresh_at - now).to_std().unwrap_or(Duration::ZERO))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Kind of session change reported by the auth service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChangeEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Message delivered to session listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChange {
    pub event: AuthChangeEvent,
    pub session: Option<Session>,
}
