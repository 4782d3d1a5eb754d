//! Request and response bodies exchanged with the hosted auth service and table store

use common::error::{CpError, CpResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::data::{Session, User};

/// Path (relative to the auth api) used to sign in with email and password
pub const PASSWORD_GRANT_PATH: &str = "token?grant_type=password";
/// Path (relative to the auth api) used to exchange a refresh token for a new session
pub const REFRESH_GRANT_PATH: &str = "token?grant_type=refresh_token";
/// Path (relative to the auth api) used to create an account
pub const SIGN_UP_PATH: &str = "signup";
/// Path (relative to the auth api) used to revoke the current session
pub const SIGN_OUT_PATH: &str = "logout";

/// Body of a refresh token grant
#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response of the sign up endpoint. Projects that auto-confirm new accounts answer with a full
/// session, otherwise only the pending user is returned and a confirmation email is sent.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(User),
}

/// Error body returned by the auth service and the table store. The two services use
/// different keys so every known key is optional.
#[derive(Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ApiErrorBody {
    /// Most descriptive message present in the body
    pub fn message(&self) -> Option<&str> {
        [
            &self.error_description,
            &self.msg,
            &self.message,
            &self.error,
        ]
        .into_iter()
        .flatten()
        .map(|m| m.trim())
        .find(|m| !m.is_empty())
    }
}

/// Decode a successful response `body` into `T`
/// # Errors
/// This function will return [CpError::Json] if the body does not match the expected shape
pub fn decode<T>(body: &str) -> CpResult<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_str(body)?)
}

/// Build a [CpError::Api] from a non-2xx response. The message is pulled from the JSON `body`
/// when possible, otherwise the `status_text` is used.
pub fn api_error(status: u16, status_text: &str, body: &str) -> CpError {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).unwrap_or_default();
    let message = match parsed.message() {
        Some(message) => message.to_owned(),
        None if !status_text.trim().is_empty() => status_text.trim().to_owned(),
        None => format!("Request failed with status {status}"),
    };
    if let Some(details) = parsed.details.as_deref() {
        log::debug!("Backend error details: {details}");
    }
    CpError::Api { status, message }
}

#[cfg(test)]
mod test {
    use common::error::CpError;
    use rstest::rstest;

    use super::{api_error, decode, SignUpResponse};
    use crate::data::Session;

    #[rstest]
    #[case::auth_grant(
        r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        "Invalid login credentials"
    )]
    #[case::auth_msg(r#"{"code":422,"msg":"User already registered"}"#, "User already registered")]
    #[case::store(
        r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"contact_submissions\""}"#,
        "new row violates row-level security policy for table \"contact_submissions\""
    )]
    #[case::bare_error(r#"{"error":"unauthorized"}"#, "unauthorized")]
    #[case::not_json("<html>Bad Gateway</html>", "Bad Gateway")]
    #[case::empty_message(r#"{"message":"  "}"#, "Bad Gateway")]
    fn api_error_should_pick_best_message(#[case] body: &str, #[case] expected: &str) {
        let error = api_error(502, "Bad Gateway", body);

        match error {
            CpError::Api { message, .. } => assert_eq!(message, expected),
            other => panic!("Expected an api error, got {other:?}"),
        }
    }

    #[test]
    fn api_error_should_fall_back_to_status_code() {
        let error = api_error(503, "", "");

        assert_eq!(error.to_string(), "Request failed with status 503");
    }

    #[test]
    fn decode_should_report_unexpected_body_as_json_error() {
        let result = decode::<Session>(r#"{"access_token":"a"}"#);

        assert!(matches!(result, Err(CpError::Json(_))), "{result:?}");
    }

    #[test]
    fn sign_up_response_should_detect_pending_user() -> Result<(), serde_json::Error> {
        let body = r#"{"id":"9363ab3f-0d62-4b40-b408-898bdea56282","email":"new@example.com","confirmation_sent_at":"2024-01-01T00:00:00Z"}"#;

        let response: SignUpResponse = serde_json::from_str(body)?;

        assert!(matches!(response, SignUpResponse::User(_)), "{response:?}");
        Ok(())
    }

    #[test]
    fn sign_up_response_should_detect_session() -> Result<(), serde_json::Error> {
        let body = r#"{"access_token":"a","token_type":"bearer","expires_in":3600,"refresh_token":"r","user":{"id":"9363ab3f-0d62-4b40-b408-898bdea56282"}}"#;

        let response: SignUpResponse = serde_json::from_str(body)?;

        assert!(matches!(response, SignUpResponse::Session(_)), "{response:?}");
        Ok(())
    }
}
