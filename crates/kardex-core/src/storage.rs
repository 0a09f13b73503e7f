//! Inventory file persistence
//!
//! Handles reading and writing the flat inventory file. One record per
//! line, pipe-delimited, fixed field order:
//!
//! ```text
//! id|name|quantity|price
//! ```
//!
//! Writes go through an atomic replace (write to a temp file in the
//! same directory, sync, rename) so the file is never left in a
//! partially-written state. Prices are written with `{}` formatting,
//! which round-trips `f64` values exactly.
//!
//! Malformed lines are skipped with a warning on load; a missing file
//! is created empty and is never an error.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::models::Item;

/// Field delimiter for the inventory file
pub const DELIMITER: char = '|';

/// Serialize one item as a single line (without trailing newline)
pub fn format_line(item: &Item) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}",
        item.id,
        item.name,
        item.quantity,
        item.price,
        d = DELIMITER
    )
}

/// Parse one line into an item
///
/// Returns `None` for lines that do not have exactly four fields or
/// whose numeric fields do not parse. Negative quantities and prices
/// are treated as malformed since they can never have been written by
/// a valid store.
pub fn parse_line(line: &str) -> Option<Item> {
    let parts: Vec<&str> = line.split(DELIMITER).collect();
    if parts.len() != 4 {
        return None;
    }

    let id: u64 = parts[0].trim().parse().ok()?;
    let name = parts[1].trim();
    let quantity: i64 = parts[2].trim().parse().ok()?;
    let price: f64 = parts[3].trim().parse().ok()?;

    if name.is_empty() || quantity < 0 || price < 0.0 || !price.is_finite() {
        return None;
    }

    Some(Item::new(id, name, quantity, price))
}

/// Load all items from the inventory file
///
/// A missing file is created empty and yields an empty collection.
/// Malformed lines are skipped with a warning. Any other read failure
/// is also recovered as an empty collection (with a warning); the file
/// is rewritten on the next successful save.
pub fn load_items(path: &Path) -> Vec<Item> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Err(e) = touch(path) {
                warn!("Could not create inventory file {:?}: {}", path, e);
            }
            return Vec::new();
        }
        Err(e) => {
            warn!(
                "Could not read inventory file {:?}: {}. Starting with an empty inventory.",
                path, e
            );
            return Vec::new();
        }
    };

    let mut items = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(item) => items.push(item),
            None => warn!(
                "Skipping malformed line {} in {:?}: {:?}",
                lineno + 1,
                path,
                line
            ),
        }
    }
    items
}

/// Save all items to the inventory file, replacing prior content
pub fn save_items(path: &Path, items: &[Item]) -> StoreResult<()> {
    let mut content = String::new();
    for item in items {
        content.push_str(&format_line(item));
        content.push('\n');
    }

    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::persistence(path, e))
}

/// Create an empty file (and its parent directory) if it doesn't exist
fn touch(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        File::create(path)?;
    }
    Ok(())
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)
}
