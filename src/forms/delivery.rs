use serde::Serialize;

use super::{is_valid_phone, require, FieldErrors, FormInput};
use crate::data::model::Status;

/// Minimum length of a national ID card number
const MIN_CIN_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeliveryField {
    Name,
    Phone,
    Cin,
    Picture,
    Active,
}

impl DeliveryField {
    pub const ALL: [DeliveryField; 5] = [
        DeliveryField::Name,
        DeliveryField::Phone,
        DeliveryField::Cin,
        DeliveryField::Picture,
        DeliveryField::Active,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeliveryField::Name => "Full Name *",
            DeliveryField::Phone => "Phone Number (WhatsApp) *",
            DeliveryField::Cin => "CIN (National ID) *",
            DeliveryField::Picture => "Profile Picture (path or URL)",
            DeliveryField::Active => "Set as active delivery person",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPersonSubmission {
    pub name: String,
    pub phone: String,
    pub cin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub status: Status,
}

#[derive(Debug, Clone)]
pub struct DeliveryPersonForm {
    pub focus: usize,
    pub name: String,
    pub phone: String,
    pub cin: String,
    pub picture: String,
    pub active: bool,
    pub errors: FieldErrors<DeliveryField>,
}

impl Default for DeliveryPersonForm {
    fn default() -> Self {
        Self {
            focus: 0,
            name: String::new(),
            phone: String::new(),
            cin: String::new(),
            picture: String::new(),
            active: true,
            errors: FieldErrors::new(),
        }
    }
}

impl DeliveryPersonForm {
    pub fn focused(&self) -> DeliveryField {
        DeliveryField::ALL[self.focus % DeliveryField::ALL.len()]
    }

    pub fn value(&self, field: DeliveryField) -> String {
        match field {
            DeliveryField::Name => self.name.clone(),
            DeliveryField::Phone => self.phone.clone(),
            DeliveryField::Cin => self.cin.clone(),
            DeliveryField::Picture => self.picture.clone(),
            DeliveryField::Active => if self.active { "[x]" } else { "[ ]" }.to_string(),
        }
    }

    fn text_mut(&mut self, field: DeliveryField) -> Option<&mut String> {
        match field {
            DeliveryField::Name => Some(&mut self.name),
            DeliveryField::Phone => Some(&mut self.phone),
            DeliveryField::Cin => Some(&mut self.cin),
            DeliveryField::Picture => Some(&mut self.picture),
            DeliveryField::Active => None,
        }
    }

    pub fn validate(&self) -> FieldErrors<DeliveryField> {
        let mut errors = FieldErrors::new();
        require(&mut errors, DeliveryField::Name, &self.name, "Full name is required");
        require(&mut errors, DeliveryField::Phone, &self.phone, "Phone number is required");
        require(&mut errors, DeliveryField::Cin, &self.cin, "CIN is required");

        if !self.phone.is_empty() && !is_valid_phone(&self.phone) {
            errors.insert(
                DeliveryField::Phone,
                "Please enter a valid Moroccan phone number (+212 6XXXXXXXX)".to_string(),
            );
        }
        if !self.cin.is_empty() && self.cin.chars().count() < MIN_CIN_LEN {
            errors.insert(DeliveryField::Cin, "CIN must be at least 6 characters".to_string());
        }
        errors
    }

    pub fn submit(&mut self) -> Option<DeliveryPersonSubmission> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            return None;
        }

        Some(DeliveryPersonSubmission {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            cin: self.cin.trim().to_string(),
            profile_picture: Some(self.picture.trim().to_string()).filter(|s| !s.is_empty()),
            status: Status::from_active(self.active),
        })
    }
}

impl FormInput for DeliveryPersonForm {
    fn insert_char(&mut self, c: char) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.push(c);
            self.errors.remove(&field);
        } else if c == ' ' {
            self.cycle(true);
        }
    }

    fn backspace(&mut self) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.pop();
            self.errors.remove(&field);
        }
    }

    fn next_field(&mut self) {
        self.focus = (self.focus + 1) % DeliveryField::ALL.len();
    }

    fn prev_field(&mut self) {
        self.focus = self.focus.checked_sub(1).unwrap_or(DeliveryField::ALL.len() - 1);
    }

    fn cycle(&mut self, _forward: bool) {
        if self.focused() == DeliveryField::Active {
            self.active = !self.active;
        }
    }
}
