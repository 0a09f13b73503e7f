//! Data models for kardex
//!
//! Defines the core data structures: the inventory `Item` and the
//! `ItemPatch` used for partial updates.

use serde::{Deserialize, Serialize};

/// One inventory line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique identifier within the store
    pub id: u64,
    /// Item name (non-empty)
    pub name: String,
    /// Units on hand, never negative
    pub quantity: i64,
    /// Unit price, never negative
    pub price: f64,
}

impl Item {
    /// Create a new item with the given id and fields
    pub fn new(id: u64, name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Total value of the stock on hand for this item
    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// A partial set of fields to overwrite on an existing item
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

impl ItemPatch {
    /// Patch that changes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if no field is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.price.is_none()
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the quantity
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the price
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}
