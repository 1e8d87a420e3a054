use serde::Serialize;

use super::{is_valid_email, require, FieldErrors, FormInput};
use crate::data::model::{Status, VendorCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VendorTab {
    Info,
    Owner,
    Uploads,
}

impl VendorTab {
    pub const ALL: [VendorTab; 3] = [VendorTab::Info, VendorTab::Owner, VendorTab::Uploads];

    pub fn label(self) -> &'static str {
        match self {
            VendorTab::Info => "Vendor Info",
            VendorTab::Owner => "Owner Details",
            VendorTab::Uploads => "Logo & Status",
        }
    }

    pub fn fields(self) -> &'static [VendorField] {
        match self {
            VendorTab::Info => &[VendorField::Name, VendorField::Category, VendorField::Phone, VendorField::Address],
            VendorTab::Owner => &[VendorField::OwnerName, VendorField::OwnerEmail, VendorField::OwnerPhone],
            VendorTab::Uploads => &[VendorField::Logo, VendorField::Active],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VendorField {
    Name,
    Category,
    Phone,
    Address,
    OwnerName,
    OwnerEmail,
    OwnerPhone,
    Logo,
    Active,
}

impl VendorField {
    pub fn label(self) -> &'static str {
        match self {
            VendorField::Name => "Vendor Name *",
            VendorField::Category => "Category *",
            VendorField::Phone => "Phone Number *",
            VendorField::Address => "Address *",
            VendorField::OwnerName => "Owner Full Name *",
            VendorField::OwnerEmail => "Owner Email *",
            VendorField::OwnerPhone => "Owner Phone *",
            VendorField::Logo => "Vendor Logo (path or URL)",
            VendorField::Active => "Set vendor as active",
        }
    }

    pub fn tab(self) -> VendorTab {
        match self {
            VendorField::Name | VendorField::Category | VendorField::Phone | VendorField::Address => VendorTab::Info,
            VendorField::OwnerName | VendorField::OwnerEmail | VendorField::OwnerPhone => VendorTab::Owner,
            VendorField::Logo | VendorField::Active => VendorTab::Uploads,
        }
    }
}

/// What a successful onboarding hands back
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSubmission {
    pub name: String,
    pub category: VendorCategory,
    pub phone: String,
    pub address: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub status: Status,
}

/// Three-tab vendor onboarding wizard
#[derive(Debug, Clone)]
pub struct VendorForm {
    pub tab: VendorTab,
    pub focus: usize, // index into the current tab's fields

    pub name: String,
    pub category: VendorCategory,
    pub phone: String,
    pub address: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub logo: String,
    pub active: bool,

    pub errors: FieldErrors<VendorField>,
}

impl Default for VendorForm {
    fn default() -> Self {
        Self {
            tab: VendorTab::Info,
            focus: 0,
            name: String::new(),
            category: VendorCategory::Restaurant,
            phone: String::new(),
            address: String::new(),
            owner_name: String::new(),
            owner_email: String::new(),
            owner_phone: String::new(),
            logo: String::new(),
            active: true,
            errors: FieldErrors::new(),
        }
    }
}

impl VendorForm {
    pub fn focused(&self) -> VendorField {
        let fields = self.tab.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn is_last_tab(&self) -> bool {
        self.tab == VendorTab::Uploads
    }

    pub fn next_tab(&mut self) {
        if let Some(&next) = VendorTab::ALL.get(self.tab.index() + 1) {
            self.set_tab(next);
        }
    }

    pub fn prev_tab(&mut self) {
        if let Some(idx) = self.tab.index().checked_sub(1) {
            self.set_tab(VendorTab::ALL[idx]);
        }
    }

    /// Step buttons only reach tabs up to the current one
    pub fn jump_to_tab(&mut self, tab: VendorTab) -> bool {
        if tab <= self.tab {
            self.set_tab(tab);
            true
        } else {
            false
        }
    }

    fn set_tab(&mut self, tab: VendorTab) {
        self.tab = tab;
        self.focus = 0;
    }

    pub fn value(&self, field: VendorField) -> String {
        match field {
            VendorField::Name => self.name.clone(),
            VendorField::Category => self.category.to_string(),
            VendorField::Phone => self.phone.clone(),
            VendorField::Address => self.address.clone(),
            VendorField::OwnerName => self.owner_name.clone(),
            VendorField::OwnerEmail => self.owner_email.clone(),
            VendorField::OwnerPhone => self.owner_phone.clone(),
            VendorField::Logo => self.logo.clone(),
            VendorField::Active => if self.active { "[x]" } else { "[ ]" }.to_string(),
        }
    }

    fn text_mut(&mut self, field: VendorField) -> Option<&mut String> {
        match field {
            VendorField::Name => Some(&mut self.name),
            VendorField::Phone => Some(&mut self.phone),
            VendorField::Address => Some(&mut self.address),
            VendorField::OwnerName => Some(&mut self.owner_name),
            VendorField::OwnerEmail => Some(&mut self.owner_email),
            VendorField::OwnerPhone => Some(&mut self.owner_phone),
            VendorField::Logo => Some(&mut self.logo),
            VendorField::Category | VendorField::Active => None,
        }
    }

    pub fn validate(&self) -> FieldErrors<VendorField> {
        let mut errors = FieldErrors::new();
        require(&mut errors, VendorField::Name, &self.name, "Vendor name is required");
        require(&mut errors, VendorField::Phone, &self.phone, "Phone number is required");
        require(&mut errors, VendorField::Address, &self.address, "Address is required");
        require(&mut errors, VendorField::OwnerName, &self.owner_name, "Owner name is required");
        require(&mut errors, VendorField::OwnerEmail, &self.owner_email, "Owner email is required");
        require(&mut errors, VendorField::OwnerPhone, &self.owner_phone, "Owner phone is required");

        if !self.owner_email.is_empty() && !is_valid_email(&self.owner_email) {
            errors.insert(VendorField::OwnerEmail, "Please enter a valid email address".to_string());
        }
        errors
    }

    /// Validate and, on failure, move to the earliest tab holding an error
    pub fn submit(&mut self) -> Option<VendorSubmission> {
        self.errors = self.validate();

        if let Some(first) = self.errors.keys().map(|f| f.tab()).min() {
            self.set_tab(first);
            return None;
        }

        Some(VendorSubmission {
            name: self.name.trim().to_string(),
            category: self.category,
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            owner_name: self.owner_name.trim().to_string(),
            owner_email: self.owner_email.trim().to_string(),
            owner_phone: self.owner_phone.trim().to_string(),
            logo: Some(self.logo.trim().to_string()).filter(|s| !s.is_empty()),
            status: Status::from_active(self.active),
        })
    }
}

impl FormInput for VendorForm {
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
        self.focus = (self.focus + 1) % self.tab.fields().len();
    }

    fn prev_field(&mut self) {
        let len = self.tab.fields().len();
        self.focus = self.focus.checked_sub(1).unwrap_or(len - 1);
    }

    fn cycle(&mut self, forward: bool) {
        match self.focused() {
            VendorField::Category => {
                let all = VendorCategory::ALL;
                let idx = all.iter().position(|c| *c == self.category).unwrap_or(0);
                let next = if forward { (idx + 1) % all.len() } else { (idx + all.len() - 1) % all.len() };
                self.category = all[next];
            }
            VendorField::Active => self.active = !self.active,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut VendorForm, s: &str) {
        for c in s.chars() {
            form.insert_char(c);
        }
    }

    fn filled() -> VendorForm {
        VendorForm {
            name: "Tajine House".into(),
            phone: "+212 6 10 20 30 40".into(),
            address: "1 Place Jemaa el-Fna, Marrakech".into(),
            owner_name: "Salma Idrissi".into(),
            owner_email: "salma@tajine.ma".into(),
            owner_phone: "+212 6 10 20 30 41".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_form_reports_required_fields_and_stays_on_info() {
        let mut form = VendorForm::default();
        form.next_tab();
        form.next_tab();
        assert!(form.is_last_tab());

        assert!(form.submit().is_none());
        assert_eq!(form.tab, VendorTab::Info);
        assert_eq!(form.errors.len(), 6);
        assert_eq!(form.errors[&VendorField::Name], "Vendor name is required");
    }

    #[test]
    fn test_invalid_email_moves_to_owner_tab() {
        let mut form = filled();
        form.owner_email = "salma-at-tajine".into();
        form.tab = VendorTab::Uploads;

        assert!(form.submit().is_none());
        assert_eq!(form.tab, VendorTab::Owner);
        assert_eq!(form.errors[&VendorField::OwnerEmail], "Please enter a valid email address");
        assert_eq!(form.errors.len(), 1);
    }

    #[test]
    fn test_successful_submit() {
        let mut form = filled();
        form.tab = VendorTab::Uploads;
        form.focus = 1;
        form.cycle(true); // uncheck active

        let sub = form.submit().expect("valid form");
        assert_eq!(sub.status, Status::Inactive);
        assert_eq!(sub.logo, None);
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_typing_clears_field_error() {
        let mut form = VendorForm::default();
        form.submit();
        assert!(form.errors.contains_key(&VendorField::Name));

        type_str(&mut form, "Pizza");
        assert_eq!(form.name, "Pizza");
        assert!(!form.errors.contains_key(&VendorField::Name));
        assert!(form.errors.contains_key(&VendorField::Phone));
    }

    #[test]
    fn test_tab_navigation() {
        let mut form = VendorForm::default();
        assert!(!form.jump_to_tab(VendorTab::Owner));
        form.next_tab();
        form.next_tab();
        form.next_tab(); // stays on last
        assert_eq!(form.tab, VendorTab::Uploads);
        assert!(form.jump_to_tab(VendorTab::Info));
        form.prev_tab();
        assert_eq!(form.tab, VendorTab::Info);
    }

    #[test]
    fn test_category_cycles_both_ways() {
        let mut form = VendorForm::default();
        form.next_field();
        assert_eq!(form.focused(), VendorField::Category);

        form.cycle(false);
        assert_eq!(form.category, VendorCategory::Other);
        form.cycle(true);
        form.cycle(true);
        assert_eq!(form.category, VendorCategory::Grocery);

        // letters do not leak into choice fields
        form.insert_char('x');
        assert_eq!(form.category, VendorCategory::Grocery);
    }
}
