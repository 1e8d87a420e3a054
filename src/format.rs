//! Display helpers for prices, dates and order summaries.

use chrono::{NaiveDate, NaiveDateTime};

use crate::data::model::OrderItem;

/// `85.00 MAD`
pub fn price(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

/// `Jan 15, 2024`
pub fn date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

/// `Jan 20, 2024, 14:30`
pub fn date_time(dt: NaiveDateTime) -> String {
    dt.format("%b %-d, %Y, %H:%M").to_string()
}

/// `1 item` / `3 items`
pub fn item_count(n: usize) -> String {
    if n == 1 { "1 item".to_string() } else { format!("{} items", n) }
}

/// First item name, with the number of remaining items appended
pub fn items_summary(items: &[OrderItem]) -> String {
    match items {
        [] => String::new(),
        [first] => first.name.clone(),
        [first, rest @ ..] => format!("{}, +{} more", first.name, rest.len()),
    }
}

/// Percent-encode a string for use in a URL query value
pub fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> OrderItem {
        OrderItem { id: "x".into(), name: name.into(), price: 1.0, quantity: 1, add_ons: vec![] }
    }

    #[test]
    fn test_price() {
        assert_eq!(price(85.0, "MAD"), "85.00 MAD");
        assert_eq!(price(7.5, "EUR"), "7.50 EUR");
    }

    #[test]
    fn test_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(date(d), "Jan 5, 2024");
        assert_eq!(date_time(d.and_hms_opt(9, 5, 0).unwrap()), "Jan 5, 2024, 09:05");
    }

    #[test]
    fn test_items_summary() {
        assert_eq!(items_summary(&[]), "");
        assert_eq!(items_summary(&[item("Pizza")]), "Pizza");
        assert_eq!(items_summary(&[item("Pizza"), item("Cola"), item("Fries")]), "Pizza, +2 more");
        assert_eq!(item_count(1), "1 item");
        assert_eq!(item_count(0), "0 items");
    }

    #[test]
    fn test_url_encode() {
        assert_eq!(url_encode("Hello Karim, hi"), "Hello%20Karim%2C%20hi");
    }
}
