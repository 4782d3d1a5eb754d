/// Event handlers driving the page
mod controller;
/// Observable page state
mod state;

pub use controller::{
    ContactApp, RESET_DELAY, SIGN_IN_FALLBACK, SIGN_UP_CONFIRMATION, SIGN_UP_FALLBACK,
    SUBMIT_FALLBACK,
};
pub use state::{AppState, FormPhase, Notice, View};

#[cfg(test)]
pub(crate) mod test {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use async_trait::async_trait;
    use common::{
        error::{CpError, CpResult},
        listener::Subscription,
    };
    use rstest::fixture;
    use uuid::{uuid, Uuid};

    use crate::{
        data::{AuthChangeEvent, ContactFormData, Credentials, Session, SubmissionRecord, User},
        service::{
            AuthService, Scheduler, SessionListener, SessionStore, SignUpOutcome, SubmissionStore,
        },
    };

    pub(crate) const USER_ID: Uuid = uuid!("9363ab3f-0d62-4b40-b408-898bdea56282");

    /// Session owned by [USER_ID]
    pub(crate) fn session() -> Session {
        Session {
            access_token: "access".to_owned(),
            token_type: "bearer".to_owned(),
            expires_in: 3600,
            expires_at: None,
            refresh_token: "refresh".to_owned(),
            user: User {
                id: USER_ID,
                email: Some("student@example.com".to_owned()),
            },
        }
    }

    /// Contact form that passes validation
    #[fixture]
    pub(crate) fn filled_form() -> ContactFormData {
        ContactFormData {
            name: "John Doe".to_owned(),
            email: "john@example.com".to_owned(),
            phone: "(123) 456-7890".to_owned(),
            address: "123 Main St, City, Country".to_owned(),
            roll_number: "123456".to_owned(),
            message: "Your message here".to_owned(),
        }
    }

    /// Scripted behaviour and recorded calls of a [FakeBackend]
    #[derive(Default)]
    pub(crate) struct FakeState {
        pub(crate) calls: Vec<&'static str>,
        pub(crate) inserted: Vec<(String, SubmissionRecord)>,
        pub(crate) sent_credentials: Vec<Credentials>,
        pub(crate) auth_error: Option<String>,
        pub(crate) insert_error: Option<String>,
        pub(crate) session_fetch_fails: bool,
        pub(crate) sign_out_fails: bool,
        pub(crate) refresh_fails: bool,
        /// Sign in succeeds without notifying listeners, [FakeBackend::emit] does it later
        pub(crate) defer_sign_in_event: bool,
        pub(crate) auto_confirm: bool,
    }

    /// Backend kept entirely in memory
    #[derive(Clone, Default)]
    pub(crate) struct FakeBackend {
        pub(crate) sessions: SessionStore,
        pub(crate) state: Rc<RefCell<FakeState>>,
    }

    impl FakeBackend {
        pub(crate) fn with<F: FnOnce(&mut FakeState)>(self, f: F) -> Self {
            f(&mut self.state.borrow_mut());
            self
        }

        pub(crate) fn signed_in(self) -> Self {
            self.sessions.set(AuthChangeEvent::SignedIn, Some(session()));
            self
        }

        pub(crate) fn emit(&self, event: AuthChangeEvent, session: Option<Session>) {
            self.sessions.set(event, session);
        }

        pub(crate) fn calls(&self) -> Vec<&'static str> {
            self.state.borrow().calls.clone()
        }

        pub(crate) fn inserted(&self) -> Vec<(String, SubmissionRecord)> {
            self.state.borrow().inserted.clone()
        }

        fn record(&self, call: &'static str) {
            self.state.borrow_mut().calls.push(call);
        }

        fn auth_result(&self, credentials: &Credentials) -> CpResult<()> {
            let mut state = self.state.borrow_mut();
            state.sent_credentials.push(credentials.clone());
            match &state.auth_error {
                Some(message) => Err(CpError::Api {
                    status: 400,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl AuthService for FakeBackend {
        async fn get_session(&self) -> CpResult<Option<Session>> {
            self.record("get_session");
            if self.state.borrow().session_fetch_fails {
                return Err(CpError::Network("offline".to_owned()));
            }
            Ok(self.sessions.current())
        }

        fn on_session_change(&self, listener: SessionListener) -> Subscription {
            self.sessions.subscribe(listener)
        }

        async fn sign_in_with_password(&self, credentials: &Credentials) -> CpResult<Session> {
            self.record("sign_in_with_password");
            self.auth_result(credentials)?;
            if !self.state.borrow().defer_sign_in_event {
                self.sessions.set(AuthChangeEvent::SignedIn, Some(session()));
            }
            Ok(session())
        }

        async fn sign_up(&self, credentials: &Credentials) -> CpResult<SignUpOutcome> {
            self.record("sign_up");
            self.auth_result(credentials)?;
            if self.state.borrow().auto_confirm {
                self.sessions.set(AuthChangeEvent::SignedIn, Some(session()));
                return Ok(SignUpOutcome::SignedIn(session()));
            }
            Ok(SignUpOutcome::ConfirmationRequired)
        }

        async fn sign_out(&self) -> CpResult<()> {
            self.record("sign_out");
            let fails = self.state.borrow().sign_out_fails;
            self.sessions
                .sign_out_with(|_| async move {
                    if fails {
                        Err(CpError::Network("offline".to_owned()))
                    } else {
                        Ok(())
                    }
                })
                .await
        }

        async fn refresh_session(&self) -> CpResult<Session> {
            self.record("refresh_session");
            let fails = self.state.borrow().refresh_fails;
            self.sessions
                .refresh_with(|_| async move {
                    if fails {
                        Err(CpError::Api {
                            status: 400,
                            message: "Invalid Refresh Token".to_owned(),
                        })
                    } else {
                        Ok(session())
                    }
                })
                .await
        }
    }

    #[async_trait(?Send)]
    impl SubmissionStore for FakeBackend {
        async fn insert_row(&self, table: &str, record: &SubmissionRecord) -> CpResult<()> {
            self.record("insert_row");
            let mut state = self.state.borrow_mut();
            if let Some(message) = &state.insert_error {
                return Err(CpError::Api {
                    status: 403,
                    message: message.clone(),
                });
            }
            state.inserted.push((table.to_owned(), record.clone()));
            Ok(())
        }
    }

    /// Task queued on a [ManualScheduler]
    type Pending = (Duration, Box<dyn FnOnce()>);

    /// Scheduler that only runs tasks when told to
    #[derive(Clone, Default)]
    pub(crate) struct ManualScheduler {
        pending: Rc<RefCell<Vec<Pending>>>,
    }

    impl ManualScheduler {
        pub(crate) fn delays(&self) -> Vec<Duration> {
            self.pending.borrow().iter().map(|(delay, _)| *delay).collect()
        }

        /// Run every queued task as if its delay elapsed
        pub(crate) fn run_all(&self) {
            let pending: Vec<Pending> = self.pending.borrow_mut().drain(..).collect();
            for (_, task) in pending {
                task();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
            self.pending.borrow_mut().push((delay, task));
        }
    }
}
