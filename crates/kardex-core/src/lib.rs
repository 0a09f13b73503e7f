//! kardex Core Library
//!
//! This crate provides the core functionality for kardex, a small
//! flat-file inventory manager.
//!
//! # Architecture
//!
//! The [`Store`] owns the full in-memory collection of items and is
//! the only component that touches the inventory file. The file is
//! read once at open and rewritten atomically after every successful
//! mutation.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = Store::open(&config);
//!
//! // Add an item
//! let item = store.add("Widget", 5, 2.50, None)?;
//!
//! // Query items
//! let low = store.low_stock(config.low_stock_threshold);
//! ```
//!
//! # Modules
//!
//! - `store`: owning collection with CRUD, query, and report operations
//! - `models`: the `Item` record and `ItemPatch` partial update
//! - `storage`: flat-file line codec and atomic writes
//! - `error`: typed store errors
//! - `access`: capability levels and credential providers
//! - `config`: application configuration

pub mod access;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use access::{AccessProvider, Capability, Role, StaticAccess, UserEntry};
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use models::{Item, ItemPatch};
pub use store::Store;
