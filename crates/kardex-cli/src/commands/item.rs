//! Item command handlers

use anyhow::{bail, Context, Result};

use kardex_core::{Item, ItemPatch, Store, StoreError};

use crate::output::Output;
use crate::prompt::{confirm, pick_index};

/// Add a new item
pub fn add(
    store: &mut Store,
    name: String,
    quantity: i64,
    price: f64,
    id: Option<u64>,
    output: &Output,
) -> Result<()> {
    let item = store
        .add(&name, quantity, price, id)
        .context("Failed to add item")?;

    output.success(&format!("Added '{}' (ID: {})", item.name, item.id));
    output.print_item(&item);
    Ok(())
}

/// List all items
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let items: Vec<_> = store.items().iter().collect();
    output.print_items(&items);
    Ok(())
}

/// Search items by id or name substring
pub fn search(store: &Store, term: String, output: &Output) -> Result<()> {
    // An id hit is shown alone; otherwise all name matches are listed
    if let Ok(id) = term.trim().parse::<u64>() {
        if let Some(item) = store.find_by_id(id) {
            output.print_items(&[item]);
            return Ok(());
        }
    }

    let matches = store.find_by_name_substring(&term);
    output.print_items(&matches);
    Ok(())
}

/// Show one item, resolving the term to a single record
pub fn show(store: &Store, term: String, output: &Output) -> Result<()> {
    let Some(item) = resolve_target(store, &term, output)? else {
        return Ok(());
    };
    output.print_item(&item);
    Ok(())
}

/// Update fields on an item
pub fn update(
    store: &mut Store,
    term: String,
    name: Option<String>,
    quantity: Option<i64>,
    price: Option<f64>,
    output: &Output,
) -> Result<()> {
    let patch = ItemPatch {
        name,
        quantity,
        price,
    };
    if patch.is_empty() {
        bail!("Nothing to update. Pass at least one of --name, --quantity, --price.");
    }

    let Some(target) = resolve_target(store, &term, output)? else {
        return Ok(());
    };

    let item = store
        .update(target.id, patch)
        .context("Failed to update item")?;
    let summary = format!("Updated '{}' (ID: {})", item.name, item.id);
    let item = item.clone();

    output.success(&summary);
    output.print_item(&item);
    Ok(())
}

/// Delete an item, with confirmation in human mode
pub fn delete(store: &mut Store, term: String, yes: bool, output: &Output) -> Result<()> {
    let Some(target) = resolve_target(store, &term, output)? else {
        return Ok(());
    };

    if !yes && output.should_prompt() {
        if !confirm(&format!("Delete '{}' (ID: {})?", target.name, target.id))? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = store.delete(target.id).context("Failed to delete item")?;
    output.success(&format!("Deleted '{}' (ID: {})", removed.name, removed.id));
    Ok(())
}

/// Adjust stock by a positive or negative delta
pub fn adjust(store: &mut Store, term: String, delta: i64, output: &Output) -> Result<()> {
    let Some(target) = resolve_target(store, &term, output)? else {
        return Ok(());
    };

    let new_quantity = store
        .adjust_quantity(target.id, delta)
        .context("Failed to adjust stock")?;

    output.success(&format!(
        "Stock for '{}' adjusted by {}. New quantity: {}",
        target.name, delta, new_quantity
    ));
    Ok(())
}

/// Resolve a user-supplied term to a single item
///
/// On an ambiguous name match in human mode, the candidates are listed
/// and the user picks one by index; `None` means they cancelled. In
/// JSON/quiet mode ambiguity is an error listing the candidate ids.
fn resolve_target(store: &Store, term: &str, output: &Output) -> Result<Option<Item>> {
    match store.resolve(term) {
        Ok(item) => Ok(Some(item.clone())),
        Err(StoreError::AmbiguousMatch { term, candidates }) => {
            if !output.should_prompt() {
                bail!(
                    "'{}' is ambiguous; matching ids: {}",
                    term,
                    candidates
                        .iter()
                        .map(|c| c.id.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }

            println!("'{}' matches several items:", term);
            for (i, candidate) in candidates.iter().enumerate() {
                println!(
                    "  {}. {} (ID: {}, qty {})",
                    i + 1,
                    candidate.name,
                    candidate.id,
                    candidate.quantity
                );
            }
            match pick_index("Select an item", candidates.len())? {
                Some(index) => Ok(Some(candidates[index].clone())),
                None => {
                    println!("Cancelled.");
                    Ok(None)
                }
            }
        }
        Err(e) => Err(e.into()),
    }
}
