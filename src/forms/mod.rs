//! Add-record forms: vendor onboarding wizard, food item, delivery person.
//!
//! Forms only validate and hand back a submission; nothing is written to the
//! dataset.

pub mod delivery;
pub mod food_item;
pub mod vendor;

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub use delivery::DeliveryPersonForm;
pub use food_item::FoodItemForm;
pub use vendor::VendorForm;

/// Field -> message, at most one message per field
pub type FieldErrors<F> = BTreeMap<F, String>;

/// Key-driven editing shared by every form popup
pub trait FormInput {
    fn insert_char(&mut self, c: char);
    fn backspace(&mut self);
    fn next_field(&mut self);
    fn prev_field(&mut self);
    /// Step a choice or checkbox field; no-op on text fields
    fn cycle(&mut self, forward: bool);
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
        .is_match(s)
}

/// Moroccan mobile number, whitespace ignored: `+212 6XX XX XX XX`
pub fn is_valid_phone(s: &str) -> bool {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE
        .get_or_init(|| Regex::new(r"^\+212\s?[67]\d{8}$").expect("static regex"))
        .is_match(&compact)
}

fn require<F: Ord>(errors: &mut FieldErrors<F>, field: F, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
    }
}

/// Lenient number parse: anything unparsable counts as zero
fn parse_amount(s: &str) -> f64 {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Characters accepted by numeric inputs
fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("ahmed@pizzacorner.ma"));
        assert!(!is_valid_email("ahmed@pizzacorner"));
        assert!(!is_valid_email("ahmed pizza@corner.ma"));
        assert!(!is_valid_email("@corner.ma"));
    }

    #[test]
    fn test_phone_format() {
        assert!(is_valid_phone("+212 6 12 34 56 78"));
        assert!(is_valid_phone("+212712345678"));
        assert!(!is_valid_phone("+212 5 12 34 56 78"));
        assert!(!is_valid_phone("0612345678"));
        assert!(!is_valid_phone("+212 6 12 34 56"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5"), 12.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("1.2.3"), 0.0);
    }
}
