//! Command-line parser for the `klg` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use kit_core::enums::{AssetCategory, AssetStatus, UserRole};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Global flags resolved against config defaults.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: u32,
}

/// Top-level CLI parser for the `klg` binary.
#[derive(Debug, Parser)]
#[command(name = "klg", version, about = "Kitlog - physical asset tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file path (overrides config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags, falling back to config defaults.
    #[must_use]
    pub fn global_flags(&self, config: &kit_config::KitConfig) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit.unwrap_or(config.general.default_limit),
        }
    }
}

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// User directory.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Asset registration, edits, transitions, deletion.
    Asset {
        #[command(subcommand)]
        action: AssetCommands,
    },
    /// Transition history, optionally scoped to one asset.
    History(HistoryArgs),
    /// Dashboard counts.
    Stats,
}

#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Add a user.
    Add {
        email: String,
        name: String,
        /// Role: admin or user
        #[arg(long, default_value = "user")]
        role: UserRole,
    },
    /// List users.
    List,
}

#[derive(Clone, Debug, Subcommand)]
pub enum AssetCommands {
    /// Register a new asset (writes no history).
    Add(AssetAddArgs),
    /// List assets with their owners.
    List,
    /// Show one asset with its owner.
    Show { id: String },
    /// Edit descriptive fields (writes no history, even for status/owner).
    Edit(AssetEditArgs),
    /// Execute an audited status/ownership transition.
    Transition(AssetTransitionArgs),
    /// Delete an asset and its whole history.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct AssetAddArgs {
    pub name: String,
    pub serial_number: String,
    #[arg(long)]
    pub category: AssetCategory,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    /// Purchase date, YYYY-MM-DD
    #[arg(long)]
    pub purchase_date: Option<String>,
    /// Purchase price, e.g. 1299.99
    #[arg(long)]
    pub price: Option<Decimal>,
    /// Initial status (defaults to unallocated)
    #[arg(long)]
    pub status: Option<AssetStatus>,
    /// Initial owner user ID
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AssetEditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<AssetCategory>,
    #[arg(long)]
    pub serial_number: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long, conflicts_with = "model")]
    pub clear_model: bool,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long, conflicts_with = "brand")]
    pub clear_brand: bool,
    /// Purchase date, YYYY-MM-DD
    #[arg(long)]
    pub purchase_date: Option<String>,
    #[arg(long, conflicts_with = "purchase_date")]
    pub clear_purchase_date: bool,
    #[arg(long)]
    pub price: Option<Decimal>,
    #[arg(long, conflicts_with = "price")]
    pub clear_price: bool,
    /// Unaudited status change — prefer `asset transition`
    #[arg(long)]
    pub status: Option<AssetStatus>,
    /// Unaudited owner change — prefer `asset transition`
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long, conflicts_with = "owner")]
    pub clear_owner: bool,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, conflicts_with = "notes")]
    pub clear_notes: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AssetTransitionArgs {
    pub id: String,
    pub status: AssetStatus,
    /// New owner user ID (omit to clear ownership)
    #[arg(long)]
    pub owner: Option<String>,
    /// User performing the change
    #[arg(long)]
    pub acting_user: String,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Scope to one asset
    #[arg(long)]
    pub asset: Option<String>,
}
