//! Client side checks performed before any request leaves the page. These mirror the `required`,
//! `pattern` and `type` attributes placed on the form inputs.

use common::error::CpError;
use lazy_regex::regex_is_match;
use thiserror::Error;

use crate::data::{ContactFormData, Credentials, FormField};

/// Reason a form cannot be sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Please enter a 6-digit roll number")]
    RollNumber,
    #[error("Please enter a valid email address")]
    Email,
}

impl From<ValidationError> for CpError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

/// Roll numbers are exactly six ASCII digits
pub fn is_valid_roll_number(value: &str) -> bool {
    regex_is_match!(r"^[0-9]{6}$", value)
}

/// Loose address shape check, `local@domain` without whitespace
pub fn is_valid_email(value: &str) -> bool {
    regex_is_match!(r"^[^\s@]+@[^\s@]+$", value)
}

/// Check every contact field in display order, returning the first problem found.
/// # Errors
/// This function will return an error if a field is empty, the roll number is not six digits or
/// the email does not look like an address. Like the `required` attribute, a value made only of
/// spaces counts as present.
pub fn validate_contact_form(form: &ContactFormData) -> Result<(), ValidationError> {
    for field in FormField::ALL {
        let value = form.get(field);
        if value.is_empty() {
            return Err(ValidationError::Required(field.label()));
        }
        match field {
            FormField::RollNumber if !is_valid_roll_number(value) => {
                return Err(ValidationError::RollNumber)
            }
            FormField::Email if !is_valid_email(value) => return Err(ValidationError::Email),
            _ => {}
        }
    }
    Ok(())
}

/// Both credentials must be present before an auth request is sent.
/// # Errors
/// This function will return an error if the email or password is blank
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    if credentials.email.trim().is_empty() {
        return Err(ValidationError::Required("Email"));
    }
    if credentials.password.is_empty() {
        return Err(ValidationError::Required("Password"));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{
        is_valid_roll_number, validate_contact_form, validate_credentials, ValidationError,
    };
    use crate::data::{ContactFormData, Credentials, FormField};

    fn valid_form() -> ContactFormData {
        ContactFormData {
            name: "John Doe".to_owned(),
            email: "john@example.com".to_owned(),
            phone: "(123) 456-7890".to_owned(),
            address: "123 Main St, City, Country".to_owned(),
            roll_number: "123456".to_owned(),
            message: "Your message here".to_owned(),
        }
    }

    #[rstest]
    #[case::six_digits("123456", true)]
    #[case::leading_zero("000123", true)]
    #[case::five_digits("12345", false)]
    #[case::seven_digits("1234567", false)]
    #[case::letters("12a456", false)]
    #[case::padded(" 123456", false)]
    #[case::non_ascii_digits("١٢٣٤٥٦", false)]
    #[case::empty("", false)]
    fn roll_number_should_be_exactly_six_digits(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_roll_number(value), expected);
    }

    #[test]
    fn valid_form_should_pass() {
        assert_eq!(validate_contact_form(&valid_form()), Ok(()));
    }

    #[rstest]
    #[case(FormField::Name)]
    #[case(FormField::RollNumber)]
    #[case(FormField::Email)]
    #[case(FormField::Phone)]
    #[case(FormField::Address)]
    #[case(FormField::Message)]
    fn empty_field_should_be_required(#[case] field: FormField) {
        let mut form = valid_form();
        form.set(field, String::new());

        assert_eq!(
            validate_contact_form(&form),
            Err(ValidationError::Required(field.label()))
        );
    }

    #[rstest]
    #[case(FormField::Name)]
    #[case(FormField::Phone)]
    #[case(FormField::Address)]
    #[case(FormField::Message)]
    fn spaces_only_should_count_as_present(#[case] field: FormField) {
        let mut form = valid_form();
        form.set(field, "   ".to_owned());

        assert_eq!(validate_contact_form(&form), Ok(()));
    }

    #[rstest]
    #[case::roll_number_spaces(FormField::RollNumber, "      ", ValidationError::RollNumber)]
    #[case::email_spaces_only(FormField::Email, "   ", ValidationError::Email)]
    #[case::roll_number(FormField::RollNumber, "12345", ValidationError::RollNumber)]
    #[case::email(FormField::Email, "john.example.com", ValidationError::Email)]
    #[case::email_spaces(FormField::Email, "john doe@example.com", ValidationError::Email)]
    fn malformed_field_should_fail(
        #[case] field: FormField,
        #[case] value: &str,
        #[case] expected: ValidationError,
    ) {
        let mut form = valid_form();
        form.set(field, value.to_owned());

        assert_eq!(validate_contact_form(&form), Err(expected));
    }

    #[rstest]
    #[case::missing_email("", "secret", Err(ValidationError::Required("Email")))]
    #[case::missing_password("a@b.c", "", Err(ValidationError::Required("Password")))]
    #[case::complete("a@b.c", "secret", Ok(()))]
    fn credentials_should_both_be_present(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: Result<(), ValidationError>,
    ) {
        let credentials = Credentials {
            email: email.to_owned(),
            password: password.to_owned(),
        };

        assert_eq!(validate_credentials(&credentials), expected);
    }
}
