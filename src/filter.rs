//! Screen filters.
//!
//! Each list screen keeps a draft filter bound to its controls and an applied
//! filter that the table actually uses; nothing changes in the table until
//! the admin applies the draft.

use crate::data::model::{DeliveryPerson, FoodItem, Order, OrderStatus, Status, Vendor, VendorCategory};

pub trait RowFilter<T> {
    fn matches(&self, row: &T) -> bool;

    fn apply<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Step a filter control: All -> first option -> ... -> last option -> All
pub fn cycle_option<T: Clone + PartialEq>(current: &Option<T>, options: &[T]) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => match options.iter().position(|o| o == value) {
            Some(idx) => options.get(idx + 1).cloned(),
            None => options.first().cloned(),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    pub const ALL: [Availability; 2] = [Availability::Available, Availability::Unavailable];

    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Unavailable => "Unavailable",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorFilter {
    pub category: Option<VendorCategory>,
    pub status: Option<Status>,
}

impl RowFilter<Vendor> for VendorFilter {
    fn matches(&self, v: &Vendor) -> bool {
        self.category.map_or(true, |c| v.category == c) && self.status.map_or(true, |s| v.status == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodItemFilter {
    pub vendor_id: Option<String>,
    pub category: Option<String>,
    pub availability: Option<Availability>,
}

impl RowFilter<FoodItem> for FoodItemFilter {
    fn matches(&self, item: &FoodItem) -> bool {
        if let Some(vendor_id) = &self.vendor_id {
            if &item.vendor_id != vendor_id {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &item.category != category {
                return false;
            }
        }
        match self.availability {
            Some(Availability::Available) => item.availability,
            Some(Availability::Unavailable) => !item.availability,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryFilter {
    pub status: Option<Status>,
}

impl RowFilter<DeliveryPerson> for DeliveryFilter {
    fn matches(&self, p: &DeliveryPerson) -> bool {
        self.status.map_or(true, |s| p.status == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

impl RowFilter<Order> for OrderFilter {
    fn matches(&self, o: &Order) -> bool {
        self.status.map_or(true, |s| o.status == s)
    }
}

/// Draft/applied pair behind a screen's filter bar
#[derive(Debug, Clone, Default)]
pub struct FilterState<F> {
    pub draft: F,
    pub applied: F,
}

impl<F: Clone + Default + PartialEq> FilterState<F> {
    pub fn apply(&mut self) {
        self.applied = self.draft.clone();
    }

    pub fn clear(&mut self) {
        self.draft = F::default();
        self.applied = F::default();
    }

    /// Whether the controls show something the table is not using yet
    pub fn is_dirty(&self) -> bool {
        self.draft != self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    #[test]
    fn test_cycle_option_wraps_through_all() {
        let opts = ["a", "b"];
        let mut cur = None;
        cur = cycle_option(&cur, &opts);
        assert_eq!(cur, Some("a"));
        cur = cycle_option(&cur, &opts);
        assert_eq!(cur, Some("b"));
        cur = cycle_option(&cur, &opts);
        assert_eq!(cur, None);

        // unknown value restarts at the first option
        assert_eq!(cycle_option(&Some("z"), &opts), Some("a"));
        assert_eq!(cycle_option::<&str>(&None, &[]), None);
    }

    #[test]
    fn test_vendor_filter() {
        let data = Dataset::mock();
        assert_eq!(VendorFilter::default().apply(&data.vendors).len(), 3);

        let f = VendorFilter { category: None, status: Some(Status::Active) };
        let names: Vec<_> = f.apply(&data.vendors).iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza Corner", "Fresh Market"]);

        let f = VendorFilter { category: Some(VendorCategory::Bakery), status: Some(Status::Active) };
        assert!(f.apply(&data.vendors).is_empty());
    }

    #[test]
    fn test_food_item_filter() {
        let data = Dataset::mock();

        let f = FoodItemFilter { availability: Some(Availability::Unavailable), ..Default::default() };
        let hits = f.apply(&data.food_items);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "f3");

        let f = FoodItemFilter { vendor_id: Some("v1".into()), category: Some("Pizza".into()), ..Default::default() };
        assert_eq!(f.apply(&data.food_items).len(), 1);

        let f = FoodItemFilter { vendor_id: Some("v2".into()), category: Some("Pizza".into()), ..Default::default() };
        assert!(f.apply(&data.food_items).is_empty());
    }

    #[test]
    fn test_delivery_and_order_filters() {
        let data = Dataset::mock();
        let f = DeliveryFilter { status: Some(Status::Inactive) };
        assert_eq!(f.apply(&data.delivery_persons)[0].name, "Rachid Tounsi");

        let f = OrderFilter { status: Some(OrderStatus::Delivered) };
        assert_eq!(f.apply(&data.orders)[0].id, "o2");
        let f = OrderFilter { status: Some(OrderStatus::Cancelled) };
        assert!(f.apply(&data.orders).is_empty());
    }

    #[test]
    fn test_filter_state_apply_and_clear() {
        let mut state: FilterState<OrderFilter> = FilterState::default();
        state.draft.status = Some(OrderStatus::Pending);
        assert!(state.is_dirty());
        assert_eq!(state.applied.status, None);

        state.apply();
        assert!(!state.is_dirty());
        assert_eq!(state.applied.status, Some(OrderStatus::Pending));

        state.clear();
        assert_eq!(state.draft, OrderFilter::default());
        assert_eq!(state.applied, OrderFilter::default());
    }
}
