pub mod contact;
pub mod credentials;
pub mod session;

pub use contact::{ContactFormData, FormField, SubmissionRecord};
pub use credentials::{CredentialField, Credentials};
pub use session::{AuthChangeEvent, Session, SessionChange, User};
