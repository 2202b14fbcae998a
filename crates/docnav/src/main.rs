//! docnav CLI - Sidebar navigation tree builder.
//!
//! Provides commands for:
//! - `tree`: Print the navigation tree for a record file
//! - `toggle`: Expand or collapse a node and save the state
//! - `state`: Show or reset saved collapse state

mod commands;
mod error;
mod output;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{StateArgs, ToggleArgs, TreeArgs};
use output::Output;

/// docnav - Sidebar navigation tree builder.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the navigation tree.
    Tree(TreeArgs),
    /// Expand or collapse a node.
    Toggle(ToggleArgs),
    /// Show or reset saved collapse state.
    State(StateArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Tree(args) => args.common.verbose,
            Self::Toggle(args) => args.common.verbose,
            Self::State(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Tree(args) => args.execute(),
        Commands::Toggle(args) => args.execute(),
        Commands::State(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_toggle_parses_node_and_exclusive() {
        let cli = Cli::parse_from(["docnav", "toggle", "/orm/client", "--exclusive", "-v"]);

        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Toggle(_)));
    }
}
