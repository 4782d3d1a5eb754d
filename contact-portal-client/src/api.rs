use std::rc::Rc;

use async_trait::async_trait;
use chrono::Utc;
use common::{
    config::BackendConfig,
    error::{CpError, CpResult},
    listener::Subscription,
};
use contact_portal_common::{
    data::{AuthChangeEvent, Credentials, Session, SubmissionRecord},
    service::{
        AuthService, RefreshTimer, SessionListener, SessionStore, SignUpOutcome, SubmissionStore,
    },
    wire::{
        api_error, decode, RefreshRequest, SignUpResponse, PASSWORD_GRANT_PATH,
        REFRESH_GRANT_PATH, SIGN_OUT_PATH, SIGN_UP_PATH,
    },
};
use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::scheduler::TimeoutScheduler;

/// Browser client of the hosted auth service and table store. Cloning is cheap and every clone
/// shares the same session.
#[derive(Clone)]
pub struct SupabaseClient {
    config: Rc<BackendConfig>,
    sessions: SessionStore,
    refresh_timer: RefreshTimer<TimeoutScheduler>,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Self {
        let sessions = SessionStore::new();
        Self {
            config: Rc::new(config),
            refresh_timer: RefreshTimer::new(sessions.clone(), TimeoutScheduler),
            sessions,
        }
    }

    fn post(&self, url: &str) -> Request {
        Request::post(url).header("apikey", self.config.anon_key())
    }

    fn post_authorized(&self, url: &str, token: &str) -> Request {
        self.post(url)
            .header("Authorization", &format!("Bearer {token}"))
    }

    /// Store a newly issued session, notify listeners and arm the token refresh
    fn accept_session(&self, session: Session, event: AuthChangeEvent) -> Session {
        let session = self.sessions.accept(event, session);
        self.schedule_refresh(&session);
        session
    }

    /// Refresh the access token shortly before it expires
    fn schedule_refresh(&self, session: &Session) {
        let client = self.clone();
        self.refresh_timer.arm(session, Utc::now(), move || {
            leptos::spawn_local(async move {
                if let Err(error) = client.refresh_session().await {
                    log::warn!("Could not refresh the session. {error}");
                }
            });
        });
    }

    async fn exchange_refresh_token(&self, refresh_token: String) -> CpResult<Session> {
        let url = self.config.auth_url(REFRESH_GRANT_PATH);
        let body = RefreshRequest {
            refresh_token: &refresh_token,
        };
        let response = Self::send_json(self.post(&url), &body).await?;
        read_json(response).await
    }

    async fn revoke(&self, access_token: String) -> CpResult<()> {
        let url = self.config.auth_url(SIGN_OUT_PATH);
        let response = self
            .post_authorized(&url, &access_token)
            .send()
            .await
            .map_err(Error::from)?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn send_json<T>(request: Request, body: &T) -> Result<Response>
    where
        T: Serialize,
    {
        let response = request.json(body)?.send().await?;
        ensure_success(response).await
    }
}

#[async_trait(?Send)]
impl AuthService for SupabaseClient {
    async fn get_session(&self) -> CpResult<Option<Session>> {
        Ok(self.sessions.current())
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        self.sessions.subscribe(listener)
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> CpResult<Session> {
        let url = self.config.auth_url(PASSWORD_GRANT_PATH);
        let response = Self::send_json(self.post(&url), credentials).await?;
        let session: Session = read_json(response).await?;
        log::info!("Signed in as {}", session.user.id);
        Ok(self.accept_session(session, AuthChangeEvent::SignedIn))
    }

    async fn sign_up(&self, credentials: &Credentials) -> CpResult<SignUpOutcome> {
        let url = self.config.auth_url(SIGN_UP_PATH);
        let response = Self::send_json(self.post(&url), credentials).await?;
        let outcome = match read_json::<SignUpResponse>(response).await? {
            SignUpResponse::Session(session) => {
                SignUpOutcome::SignedIn(self.accept_session(session, AuthChangeEvent::SignedIn))
            }
            SignUpResponse::User(user) => {
                log::info!("Confirmation email sent for user {}", user.id);
                SignUpOutcome::ConfirmationRequired
            }
        };
        Ok(outcome)
    }

    async fn sign_out(&self) -> CpResult<()> {
        self.sessions
            .sign_out_with(|access_token| self.revoke(access_token))
            .await
    }

    async fn refresh_session(&self) -> CpResult<Session> {
        let refreshed = self
            .sessions
            .refresh_with(|refresh_token| self.exchange_refresh_token(refresh_token))
            .await?;
        self.schedule_refresh(&refreshed);
        Ok(refreshed)
    }
}

#[async_trait(?Send)]
impl SubmissionStore for SupabaseClient {
    async fn insert_row(&self, table: &str, record: &SubmissionRecord) -> CpResult<()> {
        let token = match self.sessions.current() {
            Some(session) => session.access_token,
            None => self.config.anon_key().to_owned(),
        };
        let url = self.config.rest_url(table);
        let request = self
            .post_authorized(&url, &token)
            .header("Prefer", "return=minimal");
        Self::send_json(request, &[record]).await?;
        Ok(())
    }
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] gloo_net::Error),
    #[error(transparent)]
    Api(#[from] CpError),
}

impl From<Error> for CpError {
    fn from(value: Error) -> Self {
        match value {
            Error::Fetch(error) => Self::Network(error.to_string()),
            Error::Api(error) => error,
        }
    }
}

/// Read the whole body of a successful response and decode it as `T`
async fn read_json<T>(response: Response) -> CpResult<T>
where
    T: DeserializeOwned,
{
    let body = response.text().await.map_err(Error::from)?;
    decode(&body)
}

/// Pass through 2xx responses, turn anything else into an api error carrying the backend's
/// message
async fn ensure_success(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let status_text = response.status_text();
    let body = match response.text().await {
        Ok(body) => body,
        Err(error) => {
            log::debug!("Could not read error body. {error}");
            String::new()
        }
    };
    Err(api_error(status, &status_text, &body).into())
}
