mod mock;
pub mod model;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use model::{DashboardStats, DeliveryPerson, FoodItem, Order, OrderStatus, Status, Vendor};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The full set of records the dashboard reads from.
///
/// Loaded once at startup and never written back; every add/edit/delete in
/// the UI is a placeholder that leaves this untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub food_items: Vec<FoodItem>,
    #[serde(default)]
    pub delivery_persons: Vec<DeliveryPerson>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Count and share of orders in one status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusShare {
    pub status: OrderStatus,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaffCounts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl Dataset {
    pub fn mock() -> Self {
        Self {
            vendors: mock::vendors(),
            food_items: mock::food_items(),
            delivery_persons: mock::delivery_persons(),
            orders: mock::orders(),
        }
    }

    /// Load a dataset from a JSON file with the same shape as the mock data
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DataError::Read { path: path.to_path_buf(), source })?;

        let dataset: Dataset = serde_json::from_str(&content)
            .map_err(|source| DataError::Parse { path: path.to_path_buf(), source })?;

        tracing::info!(
            vendors = dataset.vendors.len(),
            food_items = dataset.food_items.len(),
            delivery_persons = dataset.delivery_persons.len(),
            orders = dataset.orders.len(),
            "Loaded dataset from {}",
            path.display()
        );
        Ok(dataset)
    }

    pub fn stats(&self, today: NaiveDate) -> DashboardStats {
        DashboardStats {
            total_vendors: self.vendors.len(),
            total_food_items: self.food_items.len(),
            active_deliveries: self
                .delivery_persons
                .iter()
                .filter(|d| d.status == Status::Active)
                .count(),
            orders_today: self
                .orders
                .iter()
                .filter(|o| o.created_at.date() == today)
                .count(),
        }
    }

    /// First `limit` orders, in dataset order
    pub fn recent_orders(&self, limit: usize) -> &[Order] {
        &self.orders[..limit.min(self.orders.len())]
    }

    pub fn vendor(&self, id: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == id)
    }

    /// Distinct food categories, in the order they first appear
    pub fn food_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for item in &self.food_items {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    pub fn order_status_breakdown(&self) -> Vec<StatusShare> {
        let total = self.orders.len();
        OrderStatus::ALL
            .iter()
            .map(|&status| {
                let count = self.orders.iter().filter(|o| o.status == status).count();
                let percentage = if total == 0 {
                    0.0
                } else {
                    // one decimal place
                    ((count as f64 / total as f64) * 1000.0).round() / 10.0
                };
                StatusShare { status, count, percentage }
            })
            .collect()
    }

    pub fn staff_counts(&self) -> StaffCounts {
        let active = self
            .delivery_persons
            .iter()
            .filter(|p| p.status == Status::Active)
            .count();
        StaffCounts {
            total: self.delivery_persons.len(),
            active,
            inactive: self.delivery_persons.len() - active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mock_stats() {
        let data = Dataset::mock();

        let stats = data.stats(day(2024, 1, 20));
        assert_eq!(stats.total_vendors, 3);
        assert_eq!(stats.total_food_items, 3);
        assert_eq!(stats.active_deliveries, 2);
        assert_eq!(stats.orders_today, 3);

        let stats = data.stats(day(2024, 1, 21));
        assert_eq!(stats.orders_today, 0);
    }

    #[test]
    fn test_recent_orders_clamps_to_available() {
        let data = Dataset::mock();
        assert_eq!(data.recent_orders(5).len(), 3);
        assert_eq!(data.recent_orders(2)[1].id, "o2");
        assert!(Dataset::default().recent_orders(5).is_empty());
    }

    #[test]
    fn test_food_categories_first_seen_order() {
        let mut data = Dataset::mock();
        let mut extra = data.food_items[0].clone();
        extra.id = "f4".into();
        data.food_items.push(extra);

        assert_eq!(data.food_categories(), vec!["Pizza", "Fruits", "Pastry"]);
    }

    #[test]
    fn test_order_status_breakdown() {
        let data = Dataset::mock();
        let breakdown = data.order_status_breakdown();

        assert_eq!(breakdown.len(), 4);
        assert_eq!(breakdown[0].status, OrderStatus::Pending);
        assert_eq!(breakdown[0].count, 1);
        assert_eq!(breakdown[0].percentage, 33.3);
        assert_eq!(breakdown[3].count, 0);
        assert_eq!(breakdown[3].percentage, 0.0);

        let empty = Dataset::default().order_status_breakdown();
        assert!(empty.iter().all(|s| s.count == 0 && s.percentage == 0.0));
    }

    #[test]
    fn test_staff_counts() {
        let counts = Dataset::mock().staff_counts();
        assert_eq!(counts, StaffCounts { total: 3, active: 2, inactive: 1 });
    }

    #[test]
    fn test_vendor_lookup() {
        let data = Dataset::mock();
        assert_eq!(data.vendor("v2").map(|v| v.name.as_str()), Some("Fresh Market"));
        assert!(data.vendor("v9").is_none());
    }

    #[tokio::test]
    async fn test_load_round_trips_mock() {
        let path = std::env::temp_dir().join(format!("omeal-dataset-{}.json", std::process::id()));
        let json = serde_json::to_string_pretty(&Dataset::mock()).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let loaded = Dataset::load(&path).await.unwrap();
        assert_eq!(loaded.vendors, Dataset::mock().vendors);
        assert_eq!(loaded.orders.len(), 3);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_load_reports_bad_files() {
        let missing = std::env::temp_dir().join("omeal-dataset-does-not-exist.json");
        assert!(matches!(Dataset::load(&missing).await, Err(DataError::Read { .. })));

        let path = std::env::temp_dir().join(format!("omeal-dataset-bad-{}.json", std::process::id()));
        tokio::fs::write(&path, "{ not json").await.unwrap();
        assert!(matches!(Dataset::load(&path).await, Err(DataError::Parse { .. })));
        let _ = tokio::fs::remove_file(&path).await;
    }
}
