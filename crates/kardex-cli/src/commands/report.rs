//! Report command handlers

use anyhow::Result;

use kardex_core::Store;

use crate::output::{Output, OutputFormat};

/// List items with quantity strictly below the threshold
pub fn low_stock(store: &Store, threshold: i64, output: &Output) -> Result<()> {
    let items = store.low_stock(threshold);

    match output.format {
        OutputFormat::Human => {
            if items.is_empty() {
                println!("No items below {} units.", threshold);
            } else {
                println!("Items below {} units:", threshold);
                println!();
                output.print_items(&items);
            }
        }
        _ => output.print_items(&items),
    }
    Ok(())
}

/// Print the total inventory value
pub fn value(store: &Store, output: &Output) -> Result<()> {
    output.print_total_value(store.total_value(), store.len());
    Ok(())
}
