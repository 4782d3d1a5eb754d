use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields of the contact form in the order they are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    RollNumber,
    Email,
    Phone,
    Address,
    Message,
}

impl FormField {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::RollNumber,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::Message,
    ];

    /// Value of the `name` attribute of the matching input element
    pub const fn input_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::RollNumber => "rollNumber",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Message => "message",
        }
    }

    /// Label shown next to the input and used in validation messages
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::RollNumber => "Roll Number",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::Message => "Message",
        }
    }
}

/// Current values of the contact form
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub roll_number: String,
    pub message: String,
}

impl ContactFormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::RollNumber => &self.roll_number,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Address => &self.address,
            FormField::Message => &self.message,
        }
    }

    /// Replace the value of a single `field`
    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::RollNumber => &mut self.roll_number,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Address => &mut self.address,
            FormField::Message => &mut self.message,
        };
        *slot = value;
    }

    /// Every field is an empty string
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Build the row written to the store, owned by `user_id`
    pub fn to_record(&self, user_id: Uuid) -> SubmissionRecord {
        SubmissionRecord {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            roll_number: self.roll_number.clone(),
            message: self.message.clone(),
            user_id,
        }
    }
}

/// Row inserted into the `contact_submissions` table
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub roll_number: String,
    pub message: String,
    pub user_id: Uuid,
}
