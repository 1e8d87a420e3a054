//! Built-in sample records used when no dataset file is configured.

use chrono::{NaiveDate, NaiveDateTime};

use super::model::{
    AddOnGroup, AddOnOption, DeliveryPerson, FoodItem, Order, OrderAddOn, OrderItem, OrderStatus,
    Status, Vendor, VendorCategory,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap_or_default()
}

fn option(id: &str, name: &str, price: f64) -> AddOnOption {
    AddOnOption { id: id.into(), name: name.into(), price }
}

fn order_add_on(group: &str, option: &str, price: f64) -> OrderAddOn {
    OrderAddOn { group_name: group.into(), option: option.into(), price }
}

pub fn vendors() -> Vec<Vendor> {
    vec![
        Vendor {
            id: "v1".into(),
            name: "Pizza Corner".into(),
            category: VendorCategory::Restaurant,
            phone: "+212 6 12 34 56 78".into(),
            address: "123 Hassan II Boulevard, Casablanca".into(),
            owner_name: "Ahmed Bennani".into(),
            owner_email: "ahmed@pizzacorner.ma".into(),
            owner_phone: "+212 6 12 34 56 78".into(),
            logo: Some("https://images.pexels.com/photos/315755/pexels-photo-315755.jpeg".into()),
            status: Status::Active,
            created_at: date(2024, 1, 15),
        },
        Vendor {
            id: "v2".into(),
            name: "Fresh Market".into(),
            category: VendorCategory::Grocery,
            phone: "+212 6 98 76 54 32".into(),
            address: "456 Mohammed V Avenue, Rabat".into(),
            owner_name: "Fatima El Alami".into(),
            owner_email: "fatima@freshmarket.ma".into(),
            owner_phone: "+212 6 98 76 54 32".into(),
            logo: Some("https://images.pexels.com/photos/264636/pexels-photo-264636.jpeg".into()),
            status: Status::Active,
            created_at: date(2024, 1, 10),
        },
        Vendor {
            id: "v3".into(),
            name: "Sweet Treats Bakery".into(),
            category: VendorCategory::Bakery,
            phone: "+212 6 11 22 33 44".into(),
            address: "789 Zerktouni Street, Marrakech".into(),
            owner_name: "Youssef Tazi".into(),
            owner_email: "youssef@sweettreats.ma".into(),
            owner_phone: "+212 6 11 22 33 44".into(),
            logo: Some("https://images.pexels.com/photos/1070850/pexels-photo-1070850.jpeg".into()),
            status: Status::Inactive,
            created_at: date(2024, 1, 8),
        },
    ]
}

pub fn food_items() -> Vec<FoodItem> {
    vec![
        FoodItem {
            id: "f1".into(),
            name: "Margherita Pizza".into(),
            vendor_id: "v1".into(),
            vendor_name: "Pizza Corner".into(),
            category: "Pizza".into(),
            description: "Fresh tomato sauce, mozzarella, and basil".into(),
            price: 85.0,
            photo: Some("https://images.pexels.com/photos/315755/pexels-photo-315755.jpeg".into()),
            availability: true,
            add_ons: vec![
                AddOnGroup {
                    id: "ag1".into(),
                    name: "Sauces".into(),
                    options: vec![
                        option("ao1", "Harissa Sauce", 5.0),
                        option("ao2", "Garlic Mayo", 5.0),
                        option("ao3", "BBQ Sauce", 7.0),
                    ],
                },
                AddOnGroup {
                    id: "ag2".into(),
                    name: "Drinks".into(),
                    options: vec![
                        option("ao4", "Coca Cola", 12.0),
                        option("ao5", "Orange Juice", 15.0),
                        option("ao6", "Water", 8.0),
                    ],
                },
            ],
            created_at: date(2024, 1, 15),
        },
        FoodItem {
            id: "f2".into(),
            name: "Organic Bananas".into(),
            vendor_id: "v2".into(),
            vendor_name: "Fresh Market".into(),
            category: "Fruits".into(),
            description: "Fresh organic bananas, 1kg".into(),
            price: 25.0,
            photo: Some("https://images.pexels.com/photos/2872755/pexels-photo-2872755.jpeg".into()),
            availability: true,
            add_ons: Vec::new(),
            created_at: date(2024, 1, 12),
        },
        FoodItem {
            id: "f3".into(),
            name: "Chocolate Croissant".into(),
            vendor_id: "v3".into(),
            vendor_name: "Sweet Treats Bakery".into(),
            category: "Pastry".into(),
            description: "Buttery croissant filled with rich chocolate".into(),
            price: 18.0,
            photo: Some("https://images.pexels.com/photos/1070850/pexels-photo-1070850.jpeg".into()),
            availability: false,
            add_ons: vec![AddOnGroup {
                id: "ag3".into(),
                name: "Extra Toppings".into(),
                options: vec![
                    option("ao7", "Extra Chocolate", 8.0),
                    option("ao8", "Almonds", 12.0),
                ],
            }],
            created_at: date(2024, 1, 8),
        },
    ]
}

pub fn delivery_persons() -> Vec<DeliveryPerson> {
    vec![
        DeliveryPerson {
            id: "d1".into(),
            name: "Mohammed Alami".into(),
            phone: "+212 6 55 44 33 22".into(),
            cin: "AB123456".into(),
            profile_picture: Some("https://images.pexels.com/photos/1043471/pexels-photo-1043471.jpeg".into()),
            status: Status::Active,
            created_at: date(2024, 1, 10),
        },
        DeliveryPerson {
            id: "d2".into(),
            name: "Karim Benjelloun".into(),
            phone: "+212 6 77 88 99 00".into(),
            cin: "CD789012".into(),
            profile_picture: Some("https://images.pexels.com/photos/1484794/pexels-photo-1484794.jpeg".into()),
            status: Status::Active,
            created_at: date(2024, 1, 5),
        },
        DeliveryPerson {
            id: "d3".into(),
            name: "Rachid Tounsi".into(),
            phone: "+212 6 33 22 11 00".into(),
            cin: "EF345678".into(),
            profile_picture: None,
            status: Status::Inactive,
            created_at: date(2023, 12, 28),
        },
    ]
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: "o1".into(),
            customer_name: "Sara Benali".into(),
            customer_phone: "+212 6 99 88 77 66".into(),
            vendor_id: "v1".into(),
            vendor_name: "Pizza Corner".into(),
            delivery_person_id: Some("d1".into()),
            delivery_person_name: Some("Mohammed Alami".into()),
            items: vec![OrderItem {
                id: "oi1".into(),
                name: "Margherita Pizza".into(),
                price: 85.0,
                quantity: 1,
                add_ons: vec![
                    order_add_on("Sauces", "Harissa Sauce", 5.0),
                    order_add_on("Drinks", "Coca Cola", 12.0),
                ],
            }],
            total_price: 102.0,
            status: OrderStatus::InProgress,
            created_at: datetime(2024, 1, 20, 14, 30),
        },
        Order {
            id: "o2".into(),
            customer_name: "Hassan Amrani".into(),
            customer_phone: "+212 6 44 55 66 77".into(),
            vendor_id: "v2".into(),
            vendor_name: "Fresh Market".into(),
            delivery_person_id: Some("d2".into()),
            delivery_person_name: Some("Karim Benjelloun".into()),
            items: vec![OrderItem {
                id: "oi2".into(),
                name: "Organic Bananas".into(),
                price: 25.0,
                quantity: 2,
                add_ons: Vec::new(),
            }],
            total_price: 50.0,
            status: OrderStatus::Delivered,
            created_at: datetime(2024, 1, 20, 12, 15),
        },
        Order {
            id: "o3".into(),
            customer_name: "Aicha Mansouri".into(),
            customer_phone: "+212 6 88 99 00 11".into(),
            vendor_id: "v1".into(),
            vendor_name: "Pizza Corner".into(),
            delivery_person_id: None,
            delivery_person_name: None,
            items: vec![OrderItem {
                id: "oi3".into(),
                name: "Margherita Pizza".into(),
                price: 85.0,
                quantity: 1,
                add_ons: Vec::new(),
            }],
            total_price: 85.0,
            status: OrderStatus::Pending,
            created_at: datetime(2024, 1, 20, 16, 45),
        },
    ]
}
