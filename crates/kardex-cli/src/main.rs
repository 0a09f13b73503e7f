//! kardex CLI
//!
//! Command-line interface for kardex - flat-file inventory management.

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kardex_core::{AccessProvider, Capability, Config, StaticAccess, Store};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "kardex")]
#[command(about = "kardex - flat-file inventory management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Username, for stores with a configured user table
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new item
    Add {
        /// Item name
        name: String,
        /// Units on hand
        #[arg(long)]
        quantity: i64,
        /// Unit price
        #[arg(long)]
        price: f64,
        /// Assign this id instead of auto-generating one
        #[arg(long)]
        id: Option<u64>,
    },
    /// List all items
    #[command(alias = "ls")]
    List,
    /// Search items by id or name
    Search {
        /// Id or name fragment
        term: String,
    },
    /// Show one item
    Show {
        /// Id or name fragment
        term: String,
    },
    /// Update fields on an item
    Update {
        /// Id or name fragment
        term: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New quantity
        #[arg(long)]
        quantity: Option<i64>,
        /// New price
        #[arg(long)]
        price: Option<f64>,
    },
    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Id or name fragment
        term: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Adjust stock up or down
    Adjust {
        /// Id or name fragment
        term: String,
        /// Signed quantity change (use `-- -3` for negative values)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Inventory reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Items with stock below the threshold
    LowStock {
        /// Override the configured threshold
        #[arg(long)]
        threshold: Option<i64>,
    },
    /// Total inventory value
    Value,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, low_stock_threshold)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let config = Config::load()?;

    // Credential gate: capability must cover the requested command
    // before the store is touched.
    let access = StaticAccess::new(config.users.clone());
    let capability = authorize(&access, cli.user.as_deref(), &output)?;
    let required = required_capability(&cli.command);
    if capability < required {
        bail!(
            "This command requires {} access; your account grants {}.",
            capability_label(required),
            capability_label(capability)
        );
    }

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let mut store = Store::open(&config);
    tracing::debug!("Opened store at {:?} with {} item(s)", store.path(), store.len());

    match cli.command {
        Commands::Add {
            name,
            quantity,
            price,
            id,
        } => commands::item::add(&mut store, name, quantity, price, id, &output),
        Commands::List => commands::item::list(&store, &output),
        Commands::Search { term } => commands::item::search(&store, term, &output),
        Commands::Show { term } => commands::item::show(&store, term, &output),
        Commands::Update {
            term,
            name,
            quantity,
            price,
        } => commands::item::update(&mut store, term, name, quantity, price, &output),
        Commands::Delete { term, yes } => commands::item::delete(&mut store, term, yes, &output),
        Commands::Adjust { term, delta } => {
            commands::item::adjust(&mut store, term, delta, &output)
        }
        Commands::Report { command } => match command {
            ReportCommands::LowStock { threshold } => commands::report::low_stock(
                &store,
                threshold.unwrap_or(config.low_stock_threshold),
                &output,
            ),
            ReportCommands::Value => commands::report::value(&store, &output),
        },
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

/// Determine the caller's capability
///
/// An open store (no users configured) grants full access without
/// credentials. Otherwise `--user` is required; the password comes
/// from KARDEX_PASSWORD or an interactive prompt.
fn authorize(access: &StaticAccess, user: Option<&str>, output: &Output) -> Result<Capability> {
    if let Some(capability) = access.anonymous() {
        return Ok(capability);
    }

    let Some(username) = user else {
        bail!("This store requires credentials. Pass --user <name>.");
    };

    let password = match std::env::var("KARDEX_PASSWORD") {
        Ok(password) => password,
        Err(_) => {
            if output.should_prompt() {
                prompt::read_password(username)?
            } else {
                bail!("Set KARDEX_PASSWORD when not running interactively.");
            }
        }
    };

    access
        .authenticate(username, &password)
        .ok_or_else(|| anyhow!("Invalid credentials."))
}

/// Minimum capability each command needs
fn required_capability(command: &Commands) -> Capability {
    match command {
        Commands::List
        | Commands::Search { .. }
        | Commands::Show { .. }
        | Commands::Report { .. } => Capability::ReadOnly,
        Commands::Adjust { .. } => Capability::Operate,
        Commands::Add { .. } | Commands::Update { .. } | Commands::Delete { .. } => {
            Capability::Full
        }
        Commands::Config { command } => match command {
            Some(ConfigCommands::Set { .. }) => Capability::Full,
            _ => Capability::ReadOnly,
        },
    }
}

fn capability_label(capability: Capability) -> &'static str {
    match capability {
        Capability::ReadOnly => "read-only",
        Capability::Operate => "operate",
        Capability::Full => "full",
    }
}

/// Initialize stderr logging, filtered by RUST_LOG
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&[
            "kardex", "add", "Widget", "--quantity", "5", "--price", "2.50",
        ]);
        match cli.command {
            Commands::Add {
                name,
                quantity,
                price,
                id,
            } => {
                assert_eq!(name, "Widget");
                assert_eq!(quantity, 5);
                assert_eq!(price, 2.50);
                assert!(id.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_adjust_negative_delta() {
        let cli = parse(&["kardex", "adjust", "widget", "--", "-3"]);
        match cli.command {
            Commands::Adjust { term, delta } => {
                assert_eq!(term, "widget");
                assert_eq!(delta, -3);
            }
            _ => panic!("expected adjust"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = parse(&["kardex", "--json", "list"]);
        assert!(cli.json);
        assert!(!cli.quiet);

        let cli = parse(&["kardex", "list", "-q"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_required_capabilities() {
        let list = parse(&["kardex", "list"]).command;
        assert_eq!(required_capability(&list), Capability::ReadOnly);

        let adjust = parse(&["kardex", "adjust", "1", "5"]).command;
        assert_eq!(required_capability(&adjust), Capability::Operate);

        let delete = parse(&["kardex", "delete", "1"]).command;
        assert_eq!(required_capability(&delete), Capability::Full);

        let config_set = parse(&["kardex", "config", "set", "low_stock_threshold", "5"]).command;
        assert_eq!(required_capability(&config_set), Capability::Full);
    }
}
