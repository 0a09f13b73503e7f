//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use kardex_core::Item;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single item with full details
    pub fn print_item(&self, item: &Item) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", item.id);
                println!("Name:     {}", item.name);
                println!("Quantity: {}", item.quantity);
                println!("Price:    ${:.2}", item.price);
                println!("Value:    ${:.2}", item.stock_value());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(item).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", item.id);
            }
        }
    }

    /// Print a list of items as a table
    pub fn print_items(&self, items: &[&Item]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("No items found.");
                    return;
                }
                println!("{:<6} {:<24} {:>6} {:>10}", "ID", "Name", "Qty", "Price");
                println!("{}", "-".repeat(48));
                for item in items {
                    println!(
                        "{:<6} {:<24} {:>6} {:>10}",
                        item.id,
                        truncate(&item.name, 24),
                        item.quantity,
                        format!("${:.2}", item.price)
                    );
                }
                println!("\n{} item(s)", items.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(items).unwrap());
            }
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print the total inventory value
    pub fn print_total_value(&self, total: f64, item_count: usize) {
        match self.format {
            OutputFormat::Human => {
                println!("Total inventory value: ${:.2} ({} item(s))", total, item_count);
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"total_value": total, "items": item_count})
                );
            }
            OutputFormat::Quiet => {
                println!("{:.2}", total);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation or disambiguation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_should_prompt_only_in_human_mode() {
        assert!(Output::new(OutputFormat::Human).should_prompt());
        assert!(!Output::new(OutputFormat::Json).should_prompt());
        assert!(!Output::new(OutputFormat::Quiet).should_prompt());
    }
}
