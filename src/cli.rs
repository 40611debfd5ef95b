use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "entitlements-clients", version, about = "AMS and BOP client console")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true, env = "ENTITLEMENTS_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the seat quota cost of an organization
    QuotaCost {
        organization_id: String,
    },

    /// Subscription operations
    Subscription {
        #[command(subcommand)]
        action: SubscriptionCommands,
    },

    /// Reserve one seat for an account
    Authorize {
        account_username: String,
        quota_version: String,
    },

    /// Resolve a username to its organization
    User {
        user_name: String,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubscriptionCommands {
    /// Fetch a subscription by id
    Get { subscription_id: String },

    /// List seat subscriptions
    List {
        #[arg(long, default_value = "100")]
        size: u32,

        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Delete a subscription by id
    Delete { subscription_id: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Load and validate the configuration, then print it with secrets redacted
    Validate,
}
