use std::{cell::RefCell, future::Future, rc::Rc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{
    error::{CpError, CpResult},
    listener::{ChangeBroadcaster, Subscription},
};

use crate::data::{AuthChangeEvent, Credentials, Session, SessionChange, SubmissionRecord};

/// Table receiving contact form submissions
pub const CONTACT_TABLE: &str = "contact_submissions";

/// Callback registered through [AuthService::on_session_change]
pub type SessionListener = Box<dyn Fn(&SessionChange)>;

/// Result of a successful sign up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The account must be confirmed through the emailed link before signing in
    ConfirmationRequired,
    /// The project auto-confirms accounts and a session was issued immediately
    SignedIn(Session),
}

/// Identity operations offered by the hosted auth service
#[async_trait(?Send)]
pub trait AuthService {
    /// Current session, if any
    async fn get_session(&self) -> CpResult<Option<Session>>;
    /// Register a `listener` for sign in, sign out and token refresh notifications. The listener
    /// is removed when the returned [Subscription] is dropped.
    fn on_session_change(&self, listener: SessionListener) -> Subscription;
    /// Exchange an email and password for a session
    async fn sign_in_with_password(&self, credentials: &Credentials) -> CpResult<Session>;
    /// Create an account. Depending on the project settings the account is signed in right away
    /// or a confirmation email is sent.
    async fn sign_up(&self, credentials: &Credentials) -> CpResult<SignUpOutcome>;
    /// Revoke the current session. The local session is cleared even if the request fails.
    async fn sign_out(&self) -> CpResult<()>;
    /// Exchange the refresh token of the current session for a new session
    async fn refresh_session(&self) -> CpResult<Session>;
}

/// Write access to the hosted table store
#[async_trait(?Send)]
pub trait SubmissionStore {
    /// Insert a single `record` into `table`
    async fn insert_row(&self, table: &str, record: &SubmissionRecord) -> CpResult<()>;
}

/// Runs deferred work on the event loop
pub trait Scheduler {
    /// Run `task` once after `delay`
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// In-memory holder of the current session that notifies listeners on every change. Auth
/// service implementations keep one of these and call [SessionStore::set] whenever the backend
/// issues or revokes a session.
#[derive(Clone, Default)]
pub struct SessionStore {
    /// Session currently signed in, shared by every clone
    current: Rc<RefCell<Option<Session>>>,
    /// Listeners of [SessionChange] messages
    changes: ChangeBroadcaster<SessionChange>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        self.changes.subscribe(listener)
    }

    /// Replace the current session and notify every listener of the `event`
    pub fn set(&self, event: AuthChangeEvent, session: Option<Session>) {
        self.current.replace(session.clone());
        log::debug!("Session change {event:?}");
        self.changes.send(&SessionChange { event, session });
    }

    /// Drop the current session, notifying listeners only if one was present
    pub fn clear(&self) {
        if self.current.borrow().is_some() {
            self.set(AuthChangeEvent::SignedOut, None);
        }
    }

    /// True if `refresh_token` belongs to the current session
    pub fn holds_refresh_token(&self, refresh_token: &str) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|session| session.refresh_token == refresh_token)
    }

    /// Store a `session` just issued by the auth service, filling its expiry from the time of
    /// issue, and notify listeners of the `event`. Returns the stored session.
    pub fn accept(&self, event: AuthChangeEvent, session: Session) -> Session {
        let session = session.stamp_expiry(Utc::now());
        self.set(event, Some(session.clone()));
        session
    }

    /// Trade the current refresh token for a new session through `exchange`. The new session
    /// replaces the current one. A failed exchange leaves the page signed out.
    /// # Errors
    /// This function will return an error if there is no session to refresh or the exchange
    /// fails
    pub async fn refresh_with<F, Fut>(&self, exchange: F) -> CpResult<Session>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = CpResult<Session>>,
    {
        let Some(current) = self.current() else {
            return Err(CpError::Generic("No session to refresh".to_owned()));
        };
        match exchange(current.refresh_token).await {
            Ok(refreshed) => Ok(self.accept(AuthChangeEvent::TokenRefreshed, refreshed)),
            Err(error) => {
                self.clear();
                Err(error)
            }
        }
    }

    /// Revoke the current access token through `revoke`, then clear the session whatever the
    /// outcome of the request. Does nothing when signed out.
    /// # Errors
    /// This function will return the error of `revoke`, after the session was cleared
    pub async fn sign_out_with<F, Fut>(&self, revoke: F) -> CpResult<()>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = CpResult<()>>,
    {
        let Some(current) = self.current() else {
            return Ok(());
        };
        let result = revoke(current.access_token).await;
        self.clear();
        result
    }
}

/// Arms timers that refresh a session shortly before its access token expires
#[derive(Clone)]
pub struct RefreshTimer<S> {
    /// Store holding the session being kept fresh
    sessions: SessionStore,
    /// Runs the timers
    scheduler: S,
}

impl<S> RefreshTimer<S>
where
    S: Scheduler,
{
    pub const fn new(sessions: SessionStore, scheduler: S) -> Self {
        Self {
            sessions,
            scheduler,
        }
    }

    /// Schedule `refresh` for when `session` is due for a refresh, as seen from `now`. When the
    /// timer fires `refresh` only runs if `session` is still the current one. Returns false if
    /// the session has no known expiry and no timer was armed.
    pub fn arm<F>(&self, session: &Session, now: DateTime<Utc>, refresh: F) -> bool
    where
        F: FnOnce() + 'static,
    {
        let Some(delay) = session.refresh_delay(now) else {
            return false;
        };
        let sessions = self.sessions.clone();
        let refresh_token = session.refresh_token.clone();
        self.scheduler.schedule(
            delay,
            Box::new(move || {
                if sessions.holds_refresh_token(&refresh_token) {
                    refresh();
                } else {
                    log::debug!("Skipping refresh of a session that was replaced");
                }
            }),
        );
        true
    }
}
