use std::{cell::RefCell, rc::Rc, time::Duration};

use common::listener::Subscription;

use super::state::{AppState, FormPhase, Notice};
use crate::{
    data::{CredentialField, Credentials, FormField, SessionChange},
    service::{AuthService, Scheduler, SignUpOutcome, SubmissionStore, CONTACT_TABLE},
    validation::validate_credentials,
};

/// Time the thank-you message stays up before the form is emptied
pub const RESET_DELAY: Duration = Duration::from_millis(3000);
/// Shown after a successful sign up
pub const SIGN_UP_CONFIRMATION: &str = "Check your email for the confirmation link";
/// Shown when a sign in fails without a message from the backend
pub const SIGN_IN_FALLBACK: &str = "Error signing in";
/// Shown when a sign up fails without a message from the backend
pub const SIGN_UP_FALLBACK: &str = "Error signing up";
/// Shown when a submission fails without a message from the backend
pub const SUBMIT_FALLBACK: &str = "An error occurred while submitting the form";

/// Shared, observable [AppState]. Every mutation is followed by a call to the observer with a
/// snapshot of the new state; the borrow is released before the observer runs.
#[derive(Clone)]
struct StateHandle {
    /// Page state shared with scheduled tasks and session listeners
    state: Rc<RefCell<AppState>>,
    /// Called with a snapshot after every mutation
    observer: Rc<dyn Fn(&AppState)>,
}

impl StateHandle {
    /// Mutate the state through `f`, then notify the observer
    fn update<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut AppState) -> R,
    {
        let (result, snapshot) = {
            let mut state = self.state.borrow_mut();
            let result = f(&mut state);
            (result, state.clone())
        };
        (self.observer)(&snapshot);
        result
    }

    /// Copy of the current state
    fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }
}

/// Auth request issued from the auth form
#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    /// Password grant against an existing account
    SignIn,
    /// Account creation
    SignUp,
}

/// Controller behind the contact page. Owns the page state, keeps the session in sync with the
/// auth service and runs the form handlers. All handlers take `&self` so the controller can be
/// shared (`Rc`) between event callbacks.
pub struct ContactApp<B, S> {
    /// Auth service and table store
    backend: B,
    /// Runs the delayed form reset
    scheduler: S,
    /// Page state and its observer
    state: StateHandle,
    /// Session listener registered by [ContactApp::init], [None] before init or after teardown
    subscription: RefCell<Option<Subscription>>,
}

impl<B, S> ContactApp<B, S>
where
    B: AuthService + SubmissionStore,
    S: Scheduler,
{
    /// Create a controller with an empty state. `observer` is called after every state change.
    pub fn new<F>(backend: B, scheduler: S, observer: F) -> Self
    where
        F: Fn(&AppState) + 'static,
    {
        Self {
            backend,
            scheduler,
            state: StateHandle {
                state: Rc::new(RefCell::new(AppState::default())),
                observer: Rc::new(observer),
            },
            subscription: RefCell::new(None),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AppState {
        self.state.snapshot()
    }

    /// Start tracking the session: listen for changes, then load the current session. A failed
    /// load leaves the page signed out.
    pub async fn init(&self) {
        let handle = self.state.clone();
        let subscription = self
            .backend
            .on_session_change(Box::new(move |change: &SessionChange| {
                let session = change.session.clone();
                handle.update(move |state| state.session = session);
            }));
        self.subscription.replace(Some(subscription));

        match self.backend.get_session().await {
            Ok(session) => {
                log::debug!("Initial session present: {}", session.is_some());
                self.state.update(move |state| state.session = session);
            }
            Err(error) => log::warn!("Could not load the current session. {error}"),
        }
    }

    /// Stop listening for session changes
    pub fn teardown(&self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn update_credential(&self, field: CredentialField, value: String) {
        self.state.update(|state| state.credentials.set(field, value));
    }

    pub fn update_field(&self, field: FormField, value: String) {
        self.state.update(|state| state.form.set(field, value));
    }

    /// Sign in with the credentials typed into the auth form. The view switches once the auth
    /// service reports the new session.
    pub async fn sign_in(&self) {
        self.authenticate(AuthMode::SignIn).await;
    }

    /// Create an account with the credentials typed into the auth form
    pub async fn sign_up(&self) {
        self.authenticate(AuthMode::SignUp).await;
    }

    pub async fn sign_out(&self) {
        if let Err(error) = self.backend.sign_out().await {
            log::warn!("Sign out request failed. {error}");
        }
    }

    /// Send the contact form. On success the thank-you message shows immediately and the form is
    /// emptied after [RESET_DELAY]. On failure the form is left as is for another attempt.
    pub async fn submit(&self) {
        let record = self.state.update(|state| {
            if state.phase != FormPhase::Editing {
                return None;
            }
            match state.prepare_submission() {
                Ok(record) => {
                    state.notice = None;
                    state.phase = FormPhase::Submitting;
                    Some(record)
                }
                Err(error) => {
                    state.notice = Some(Notice::Error(error.to_string()));
                    None
                }
            }
        });
        let Some(record) = record else {
            return;
        };

        match self.backend.insert_row(CONTACT_TABLE, &record).await {
            Ok(()) => {
                log::info!("Contact form submitted for {}", record.user_id);
                self.state.update(|state| state.phase = FormPhase::Submitted);
                let handle = self.state.clone();
                self.scheduler.schedule(
                    RESET_DELAY,
                    Box::new(move || handle.update(AppState::reset_contact_form)),
                );
            }
            Err(error) => {
                log::error!("Error submitting form: {error}");
                self.state.update(|state| {
                    state.phase = FormPhase::Editing;
                    state.notice = Some(Notice::Error(error.user_message(SUBMIT_FALLBACK)));
                });
            }
        }
    }

    /// Run a sign in or sign up request with the typed credentials and report the outcome in the
    /// notice
    async fn authenticate(&self, mode: AuthMode) {
        let Some(credentials) = self.begin_auth() else {
            return;
        };

        let result = match mode {
            AuthMode::SignIn => self
                .backend
                .sign_in_with_password(&credentials)
                .await
                .map(|_| None),
            AuthMode::SignUp => self.backend.sign_up(&credentials).await.map(|outcome| {
                if let SignUpOutcome::SignedIn(_) = outcome {
                    log::info!("Account for {} was confirmed on creation", credentials.email);
                }
                Some(Notice::Info(SIGN_UP_CONFIRMATION.to_owned()))
            }),
        };
        drop(credentials);

        let fallback = match mode {
            AuthMode::SignIn => SIGN_IN_FALLBACK,
            AuthMode::SignUp => SIGN_UP_FALLBACK,
        };
        self.state.update(|state| {
            state.auth_loading = false;
            state.credentials.password.clear();
            state.notice = match result {
                Ok(notice) => notice,
                Err(error) => {
                    log::debug!("Auth request failed. {error}");
                    Some(Notice::Error(error.user_message(fallback)))
                }
            };
        });
    }

    /// Flag the auth form as loading and take a copy of the credentials. Returns [None] when a
    /// request is already in flight or a credential is missing.
    fn begin_auth(&self) -> Option<Credentials> {
        self.state.update(|state| {
            if state.auth_loading {
                return None;
            }
            if let Err(error) = validate_credentials(&state.credentials) {
                state.notice = Some(Notice::Error(error.to_string()));
                return None;
            }
            state.auth_loading = true;
            state.notice = None;
            Some(state.credentials.clone())
        })
    }
}
