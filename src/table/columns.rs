//! Column sets for each screen's table.
//!
//! The same columns drive the on-screen table, search and CSV export, so
//! what the admin searches is exactly what they see.

use super::{Column, Tone};
use crate::data::model::{DeliveryPerson, FoodItem, Order, OrderStatus, Status, Vendor};
use crate::format;

fn status_tone(status: Status) -> Tone {
    match status {
        Status::Active => Tone::Good,
        Status::Inactive => Tone::Bad,
    }
}

pub fn order_status_tone(status: OrderStatus) -> Tone {
    match status {
        OrderStatus::Pending => Tone::Warn,
        OrderStatus::InProgress => Tone::Info,
        OrderStatus::Delivered => Tone::Good,
        OrderStatus::Cancelled => Tone::Bad,
    }
}

pub fn vendors<'a>() -> Vec<Column<'a, Vendor>> {
    vec![
        Column::new("ID", |v: &Vendor| v.id.clone()).toned(|_| Tone::Dim),
        Column::new("Vendor Name", |v: &Vendor| v.name.clone()),
        Column::new("Owner", |v: &Vendor| v.owner_name.clone()),
        Column::new("Category", |v: &Vendor| v.category.to_string()).toned(|_| Tone::Info),
        Column::new("Phone", |v: &Vendor| v.phone.clone()),
        Column::new("Address", |v: &Vendor| v.address.clone()).toned(|_| Tone::Dim),
        Column::new("Status", |v: &Vendor| v.status.to_string()).toned(|v| status_tone(v.status)),
    ]
}

pub fn food_items<'a>(currency: &'a str) -> Vec<Column<'a, FoodItem>> {
    vec![
        Column::new("ID", |f: &FoodItem| f.id.clone()).toned(|_| Tone::Dim),
        Column::new("Item Name", |f: &FoodItem| f.name.clone()),
        Column::new("Vendor", |f: &FoodItem| f.vendor_name.clone()),
        Column::new("Category", |f: &FoodItem| f.category.clone()).toned(|_| Tone::Info),
        Column::new("Price", move |f: &FoodItem| format::price(f.price, currency)),
        Column::new("Add-ons", |f: &FoodItem| {
            if f.add_ons.is_empty() {
                "None".to_string()
            } else {
                format!("{} group(s)", f.add_ons.len())
            }
        })
        .toned(|f| if f.add_ons.is_empty() { Tone::Dim } else { Tone::Plain }),
        Column::new("Status", |f: &FoodItem| {
            if f.availability { "Available" } else { "Unavailable" }.to_string()
        })
        .toned(|f| if f.availability { Tone::Good } else { Tone::Bad }),
    ]
}

pub fn delivery_persons<'a>() -> Vec<Column<'a, DeliveryPerson>> {
    vec![
        Column::new("ID", |p: &DeliveryPerson| p.id.clone()).toned(|_| Tone::Dim),
        Column::new("Full Name", |p: &DeliveryPerson| p.name.clone()),
        Column::new("CIN", |p: &DeliveryPerson| p.cin.clone()).toned(|_| Tone::Dim),
        Column::new("Phone (WhatsApp)", |p: &DeliveryPerson| p.phone.clone()),
        Column::new("Status", |p: &DeliveryPerson| p.status.to_string()).toned(|p| status_tone(p.status)),
        Column::new("Date Added", |p: &DeliveryPerson| format::date(p.created_at)),
    ]
}

pub fn orders<'a>(currency: &'a str) -> Vec<Column<'a, Order>> {
    vec![
        Column::new("Order ID", |o: &Order| o.id.clone()).toned(|_| Tone::Dim),
        Column::new("Customer", |o: &Order| format!("{} ({})", o.customer_name, o.customer_phone)),
        Column::new("Vendor", |o: &Order| o.vendor_name.clone()),
        Column::new("Delivery Person", |o: &Order| {
            o.delivery_person_name.clone().unwrap_or_else(|| "Not assigned".to_string())
        })
        .toned(|o| if o.delivery_person_name.is_some() { Tone::Plain } else { Tone::Dim }),
        Column::new("Items", |o: &Order| {
            format!("{}: {}", format::item_count(o.items.len()), format::items_summary(&o.items))
        }),
        Column::new("Total", move |o: &Order| format::price(o.total_price, currency)),
        Column::new("Status", |o: &Order| o.status.to_string()).toned(|o| order_status_tone(o.status)),
        Column::new("Order Time", |o: &Order| format::date_time(o.created_at)),
    ]
}

/// Dashboard's recent orders table
pub fn recent_orders<'a>(currency: &'a str) -> Vec<Column<'a, Order>> {
    vec![
        Column::new("Order ID", |o: &Order| o.id.clone()).toned(|_| Tone::Dim),
        Column::new("Customer", |o: &Order| o.customer_name.clone()),
        Column::new("Vendor", |o: &Order| o.vendor_name.clone()),
        Column::new("Total", move |o: &Order| format::price(o.total_price, currency)),
        Column::new("Status", |o: &Order| o.status.to_string()).toned(|o| order_status_tone(o.status)),
        Column::new("Time", |o: &Order| format::date_time(o.created_at)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::table::{search, to_csv};

    #[test]
    fn test_food_item_cells() {
        let data = Dataset::mock();
        let cols = food_items("MAD");
        let row = &data.food_items[0];

        let cells: Vec<String> = cols.iter().map(|c| c.render(row)).collect();
        assert_eq!(cells[4], "85.00 MAD");
        assert_eq!(cells[5], "2 group(s)");
        assert_eq!(cells[6], "Available");
        assert_eq!(cols[6].tone_of(&data.food_items[2]), Tone::Bad);
    }

    #[test]
    fn test_order_cells_without_courier() {
        let data = Dataset::mock();
        let cols = orders("MAD");
        let row = &data.orders[2];

        assert_eq!(cols[3].render(row), "Not assigned");
        assert_eq!(cols[4].render(row), "1 item: Margherita Pizza");
        assert_eq!(cols[6].tone_of(row), Tone::Warn);
    }

    #[test]
    fn test_order_customer_cell_carries_phone() {
        let data = Dataset::mock();
        let cols = orders("MAD");
        assert_eq!(cols[1].render(&data.orders[0]), "Sara Benali (+212 6 99 88 77 66)");

        let hits = search(data.orders.iter().collect(), &cols, "+212 6 44 55");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "o2");
    }

    #[test]
    fn test_search_hits_rendered_status() {
        let data = Dataset::mock();
        let cols = vendors();
        let hits = search(data.vendors.iter().collect(), &cols, "inactive");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "v3");
    }

    #[test]
    fn test_delivery_export_header() {
        let data = Dataset::mock();
        let rows: Vec<&DeliveryPerson> = data.delivery_persons.iter().collect();
        let csv = to_csv(&delivery_persons(), &rows);

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("ID,Full Name,CIN,Phone (WhatsApp),Status,Date Added"));
        assert_eq!(lines.next(), Some("d1,Mohammed Alami,AB123456,+212 6 55 44 33 22,Active,\"Jan 10, 2024\""));
    }
}
