use serde::{Deserialize, Serialize};

/// Email and password typed into the auth form. Sent as the body of the sign in and sign up
/// requests.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn set(&mut self, field: CredentialField, value: String) {
        match field {
            CredentialField::Email => self.email = value,
            CredentialField::Password => self.password = value,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

/// Inputs of the auth form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Email,
    Password,
}
