//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Ladder - versioned SQL migrations for DuckDB
#[derive(Parser, Debug)]
#[command(name = "ladder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path (`:memory:` for a throwaway database)
    #[arg(short, long, global = true, env = "LADDER_DATABASE")]
    pub database: Option<String>,

    /// Override migrations directory
    #[arg(short, long, global = true)]
    pub migrations_dir: Option<String>,

    /// Revert migrations above a lower target version
    #[arg(long, global = true)]
    pub allow_downgrade: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate the database to a version (default: the latest)
    Migrate(MigrateArgs),

    /// List applied migrations
    Status(StatusArgs),

    /// List migrations a migrate would apply
    Pending(PendingArgs),

    /// Check applied scripts against their stored checksums
    Verify,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Target version (MAJOR.MINOR.PATCH[-PRERELEASE])
    #[arg(short, long)]
    pub to: Option<String>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the pending command
#[derive(Args, Debug)]
pub struct PendingArgs {
    /// Target version (default: the latest)
    #[arg(short, long)]
    pub to: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
