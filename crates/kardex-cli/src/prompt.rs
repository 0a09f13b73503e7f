//! Interactive prompts
//!
//! Stdin-based confirmation, disambiguation, and credential prompts
//! used in human output mode.

use std::io::{self, Write};

use anyhow::Result;

/// Ask a yes/no question, defaulting to no
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} (y/N): ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Ask the user to pick one entry by number (1-based)
///
/// Returns `None` if the input is empty, `0`, or out of range.
pub fn pick_index(prompt: &str, len: usize) -> Result<Option<usize>> {
    print!("{} (1-{}, or 0 to cancel): ", prompt, len);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let choice: usize = match input.trim().parse() {
        Ok(n) => n,
        Err(_) => return Ok(None),
    };
    if choice == 0 || choice > len {
        return Ok(None);
    }
    Ok(Some(choice - 1))
}

/// Prompt for a password on stdin
pub fn read_password(username: &str) -> Result<String> {
    print!("Password for {}: ", username);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\n', '\r']).to_string())
}
