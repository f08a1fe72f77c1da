//! Dashboard metrics derived from the full item list
//!
//! Nothing is cached: every call scans the inventory table from scratch.

use serde::Serialize;

use crate::core::repository::Repository;
use crate::core::store::{Store, StoreError};
use crate::entities::item::Item;

/// Items with fewer units than this are reported as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// An item running low
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockItem {
    pub name: String,
    pub quantity: i64,
}

impl std::fmt::Display for LowStockItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Qty: {})", self.name, self.quantity)
    }
}

/// Summary of the whole inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub total_unique_items: usize,
    pub total_stock_quantity: i64,
    pub total_inventory_value: f64,
    /// Low-stock items in table order
    pub low_stock_items: Vec<LowStockItem>,
}

impl DashboardMetrics {
    /// Single pass over `items`
    pub fn compute(items: &[Item]) -> Self {
        let mut metrics = DashboardMetrics {
            total_unique_items: 0,
            total_stock_quantity: 0,
            total_inventory_value: 0.0,
            low_stock_items: Vec::new(),
        };

        for item in items {
            metrics.total_unique_items += 1;
            // Rows written outside stockroom may exceed the validated range
            metrics.total_stock_quantity = metrics.total_stock_quantity.saturating_add(item.quantity);
            metrics.total_inventory_value += item.value();

            if item.quantity < LOW_STOCK_THRESHOLD {
                metrics.low_stock_items.push(LowStockItem {
                    name: item.name.clone(),
                    quantity: item.quantity,
                });
            }
        }

        metrics
    }

    /// Scan the inventory table and compute
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        let items = Repository::<Item>::new(store).list_all()?;
        Ok(Self::compute(&items))
    }

    pub fn total_value_display(&self) -> String {
        format_usd(self.total_inventory_value)
    }
}

/// Format an amount as US dollars: `$1,234.50`, `-$5.00`
///
/// Amounts too large for an `f64` (infinity) and `NaN` render as `n/a`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (dollars, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}
