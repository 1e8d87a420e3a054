//! Platform records.
//!
//! These mirror the JSON shape of the admin dataset (camelCase keys), so a
//! fixture exported from the web dashboard loads without translation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendorCategory {
    Restaurant,
    Grocery,
    Bakery,
    #[serde(rename = "Café")]
    Cafe,
    Other,
}

impl VendorCategory {
    pub const ALL: [VendorCategory; 5] = [
        VendorCategory::Restaurant,
        VendorCategory::Grocery,
        VendorCategory::Bakery,
        VendorCategory::Cafe,
        VendorCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VendorCategory::Restaurant => "Restaurant",
            VendorCategory::Grocery => "Grocery",
            VendorCategory::Bakery => "Bakery",
            VendorCategory::Cafe => "Café",
            VendorCategory::Other => "Other",
        }
    }
}

impl fmt::Display for VendorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Account status shared by vendors and delivery staff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Active, Status::Inactive];

    pub fn label(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }

    pub fn from_active(active: bool) -> Self {
        if active { Status::Active } else { Status::Inactive }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub category: VendorCategory,
    pub phone: String,
    pub address: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub status: Status,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnOption {
    pub id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<AddOnOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub vendor_id: String,   // soft reference, not checked against vendors
    pub vendor_name: String, // denormalized copy of the vendor's name
    pub category: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub availability: bool,
    #[serde(default)]
    pub add_ons: Vec<AddOnGroup>,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPerson {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// National identity card number
    pub cin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub status: Status,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Next status in the admin's status picker, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddOn {
    pub group_name: String,
    pub option: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub add_ons: Vec<OrderAddOn>,
}

impl OrderItem {
    /// Unit price times quantity (add-ons excluded, as on the order sheet)
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub vendor_id: String,
    pub vendor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_person_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_person_name: Option<String>,
    pub items: Vec<OrderItem>,
    /// Stored total; never recomputed from `items`
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_vendors: usize,
    pub total_food_items: usize,
    pub active_deliveries: usize,
    pub orders_today: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_labels_match_wire_names() {
        assert_eq!(serde_json::to_string(&VendorCategory::Cafe).unwrap(), "\"Café\"");
        assert_eq!(serde_json::to_string(&OrderStatus::InProgress).unwrap(), "\"In Progress\"");

        let status: OrderStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(status.label(), "In Progress");
    }

    #[test]
    fn test_order_status_cycle_wraps() {
        assert_eq!(OrderStatus::Pending.next(), OrderStatus::InProgress);
        assert_eq!(OrderStatus::Cancelled.next(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_parses_without_delivery_person() {
        let json = r#"{
            "id": "o9",
            "customerName": "Test",
            "customerPhone": "+212 6 00 00 00 00",
            "vendorId": "v1",
            "vendorName": "Pizza Corner",
            "items": [{"id": "oi9", "name": "Pizza", "price": 40, "quantity": 3}],
            "totalPrice": 120,
            "status": "Pending",
            "createdAt": "2024-01-20T16:45:00"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.delivery_person_name.is_none());
        assert!(order.items[0].add_ons.is_empty());
        assert_eq!(order.items[0].line_total(), 120.0);
    }
}
