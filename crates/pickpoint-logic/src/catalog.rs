//! Parcel catalog: the fixed set of orders sitting on the warehouse shelves.

use serde::{Deserialize, Serialize};

pub type OrderId = u32;

/// A parcel waiting for pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Pickup code the customer reads out.
    pub code: String,
    /// Shelf cell, e.g. `"A-15"`.
    pub cell: String,
    /// Recipient printed on the label.
    pub customer_name: String,
    /// Session time (seconds) the parcel was shelved.
    pub arrived_at: f64,
}

/// What happens to a parcel once it has been handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelPolicy {
    /// Parcels stay on the shelf and can be requested again.
    #[default]
    Reusable,
    /// A handed-over parcel leaves the catalog for good.
    SingleUse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    orders: Vec<Order>,
}

impl Catalog {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// The four stock parcels every session starts with.
    pub fn stock(arrived_at: f64) -> Self {
        let entry = |id, code: &str, cell: &str, name: &str| Order {
            id,
            code: code.to_string(),
            cell: cell.to_string(),
            customer_name: name.to_string(),
            arrived_at,
        };
        Self::new(vec![
            entry(1, "1234", "A-15", "Ivanov I.I."),
            entry(2, "5678", "B-23", "Petrova A.S."),
            entry(3, "9012", "C-08", "Sidorov P.P."),
            entry(4, "3456", "A-42", "Kozlova M.V."),
        ])
    }

    /// Exact-match lookup of a scanned code.
    pub fn find_by_code(&self, code: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.code == code)
    }

    pub fn find_by_id(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Remove a parcel, returning it if it was present.
    pub fn remove(&mut self, id: OrderId) -> Option<Order> {
        let index = self.orders.iter().position(|o| o.id == id)?;
        Some(self.orders.remove(index))
    }

    /// Pickup codes in shelf order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.orders.iter().map(|o| o.code.as_str())
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::stock(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 4);
        let order = catalog.find_by_code("1234").unwrap();
        assert_eq!(order.cell, "A-15");
        assert_eq!(catalog.find_by_code("3456").unwrap().cell, "A-42");
    }

    #[test]
    fn test_code_match_is_exact() {
        let catalog = Catalog::default();
        assert!(catalog.find_by_code("0000").is_none());
        assert!(catalog.find_by_code(" 1234").is_none());
        assert!(catalog.find_by_code("123").is_none());
        assert!(catalog.find_by_code("").is_none());
    }

    #[test]
    fn test_remove() {
        let mut catalog = Catalog::default();
        let removed = catalog.remove(2).unwrap();
        assert_eq!(removed.code, "5678");
        assert_eq!(catalog.len(), 3);
        assert!(catalog.find_by_id(2).is_none());
        assert!(catalog.remove(2).is_none());
        assert_eq!(catalog.codes().collect::<Vec<_>>(), ["1234", "9012", "3456"]);
    }

    #[test]
    fn test_policy_serializes_snake_case() {
        let json = serde_json::to_string(&ParcelPolicy::SingleUse).unwrap();
        assert_eq!(json, "\"single_use\"");
    }
}
