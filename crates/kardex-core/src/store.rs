//! Owning store for the inventory collection
//!
//! The `Store` holds the full collection in memory and is the only
//! component that touches the inventory file. It is loaded once at
//! open and rewritten after every successful mutation; read-only
//! operations never write.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open(&config);
//!
//! let item = store.add("Widget", 5, 2.50, None)?;
//! let total = store.total_value();
//! ```
//!
//! If a save fails, the in-memory change is kept and the store is
//! marked stale; the next save attempt flushes everything, so no data
//! already entered is lost.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::models::{Item, ItemPatch};
use crate::storage::{self, DELIMITER};

/// The owning component for the in-memory + persisted inventory
pub struct Store {
    items: Vec<Item>,
    path: PathBuf,
    /// Set when a mutation succeeded but the save did not
    stale: bool,
}

impl Store {
    /// Open the store at the path named by the configuration
    ///
    /// A missing inventory file is created empty. Malformed lines are
    /// skipped with a warning.
    pub fn open(config: &Config) -> Self {
        Self::open_at(config.inventory_path())
    }

    /// Open the store against a specific inventory file
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = storage::load_items(&path);
        Self {
            items,
            path,
            stale: false,
        }
    }

    /// Path of the backing inventory file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of items in the store
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the store holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// True if the on-disk copy is behind the in-memory collection
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    // ==================== CRUD Operations ====================

    /// Add a new item
    ///
    /// With an explicit id, fails with `DuplicateId` if it is taken.
    /// Otherwise the next free id is generated. Fields are validated
    /// before anything is touched. Persists on success and returns the
    /// new item.
    pub fn add(
        &mut self,
        name: &str,
        quantity: i64,
        price: f64,
        explicit_id: Option<u64>,
    ) -> StoreResult<Item> {
        let name = validate_name(name)?;
        validate_quantity(quantity)?;
        validate_price(price)?;

        let id = match explicit_id {
            Some(id) => {
                if self.find_by_id(id).is_some() {
                    return Err(StoreError::DuplicateId(id));
                }
                id
            }
            None => self.next_free_id(),
        };

        let item = Item::new(id, name, quantity, price);
        self.items.push(item.clone());
        self.persist()?;
        Ok(item)
    }

    /// Look up an item by exact id
    pub fn find_by_id(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Case-insensitive substring search against item names
    ///
    /// Returns all matches in insertion order.
    pub fn find_by_name_substring(&self, term: &str) -> Vec<&Item> {
        let term = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Combined id-then-name lookup
    ///
    /// An integer term is tried as an id first, then falls back to a
    /// name search. Exactly one name match resolves; several fail with
    /// `AmbiguousMatch` carrying the candidates; none fails with
    /// `NotFound`.
    pub fn resolve(&self, term: &str) -> StoreResult<&Item> {
        let term = term.trim();
        if let Ok(id) = term.parse::<u64>() {
            if let Some(item) = self.find_by_id(id) {
                return Ok(item);
            }
        }

        let matches = self.find_by_name_substring(term);
        match matches.len() {
            0 => Err(StoreError::NotFound(term.to_string())),
            1 => Ok(matches[0]),
            _ => Err(StoreError::AmbiguousMatch {
                term: term.to_string(),
                candidates: matches.into_iter().cloned().collect(),
            }),
        }
    }

    /// Overwrite the fields set in `patch`, leaving the rest unchanged
    ///
    /// Changed fields are re-validated exactly as in `add`. Fails with
    /// `NotFound` if the id is absent. Persists on success.
    pub fn update(&mut self, id: u64, patch: ItemPatch) -> StoreResult<&Item> {
        let name = match &patch.name {
            Some(name) => Some(validate_name(name)?.to_string()),
            None => None,
        };
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }

        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let item = &mut self.items[index];
        if let Some(name) = name {
            item.name = name;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(price) = patch.price {
            item.price = price;
        }

        self.persist()?;
        Ok(&self.items[index])
    }

    /// Remove the item with the given id
    ///
    /// Fails with `NotFound` if absent. Persists on success and
    /// returns the removed item.
    pub fn delete(&mut self, id: u64) -> StoreResult<Item> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let removed = self.items.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Adjust stock by a (possibly negative) delta
    ///
    /// Fails with `NegativeStock` and leaves the item unchanged when
    /// the result would drop below zero. Persists on success and
    /// returns the new quantity.
    pub fn adjust_quantity(&mut self, id: u64, delta: i64) -> StoreResult<i64> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let current = self.items[index].quantity;
        let new_quantity = current.checked_add(delta).ok_or_else(|| {
            StoreError::validation(
                "delta",
                format!("adjustment overflows quantity (got {})", delta),
            )
        })?;
        if new_quantity < 0 {
            return Err(StoreError::NegativeStock { id, current, delta });
        }

        self.items[index].quantity = new_quantity;
        self.persist()?;
        Ok(new_quantity)
    }

    // ==================== Reporting ====================

    /// Items with quantity strictly below the threshold, in order
    pub fn low_stock(&self, threshold: i64) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.quantity < threshold)
            .collect()
    }

    /// Total inventory value: sum of quantity x price over all items
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(Item::stock_value).sum()
    }

    // ==================== Persistence ====================

    /// Next id not present in the store: max + 1, probing upward
    fn next_free_id(&self) -> u64 {
        let mut id = self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        while self.find_by_id(id).is_some() {
            id += 1;
        }
        id
    }

    /// Rewrite the inventory file from the in-memory collection
    ///
    /// On failure the in-memory state is kept and the store is marked
    /// stale; a later save flushes everything at once.
    fn persist(&mut self) -> StoreResult<()> {
        if self.stale {
            warn!(
                "Retrying save of {:?}: includes previously unsaved changes",
                self.path
            );
        }
        match storage::save_items(&self.path, &self.items) {
            Ok(()) => {
                self.stale = false;
                Ok(())
            }
            Err(e) => {
                self.stale = true;
                Err(e)
            }
        }
    }
}

/// Validate a name: non-empty after trimming, no delimiter, one line
fn validate_name(name: &str) -> StoreResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::validation("name", "must not be empty"));
    }
    if name.contains(DELIMITER) {
        return Err(StoreError::validation(
            "name",
            format!("must not contain '{}'", DELIMITER),
        ));
    }
    if name.contains('\n') || name.contains('\r') {
        return Err(StoreError::validation("name", "must be a single line"));
    }
    Ok(name)
}

fn validate_quantity(quantity: i64) -> StoreResult<()> {
    if quantity < 0 {
        return Err(StoreError::validation(
            "quantity",
            format!("must not be negative (got {})", quantity),
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> StoreResult<()> {
    if price < 0.0 || !price.is_finite() {
        return Err(StoreError::validation(
            "price",
            format!("must be a non-negative number (got {})", price),
        ));
    }
    Ok(())
}
