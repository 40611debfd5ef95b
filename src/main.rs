use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

mod cli;

use cli::{Cli, Commands, ConfigCommands, SubscriptionCommands};
use entitlements_clients::ams::{self, AccountQuotaClient};
use entitlements_clients::bop::{self, UserIdentityClient};
use entitlements_clients::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let cfg = config::load_config(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;

    init_tracing(&cfg.logging)?;

    match args.command {
        Commands::QuotaCost { organization_id } => {
            let client = ams::get_client(&cfg.ams).await?;
            print_json(&client.get_quota_cost(&organization_id).await?)?;
        }
        Commands::Subscription { action } => {
            let client = ams::get_client(&cfg.ams).await?;
            match action {
                SubscriptionCommands::Get { subscription_id } => {
                    print_json(&client.get_subscription(&subscription_id).await?)?;
                }
                SubscriptionCommands::List { size, page } => {
                    print_json(&client.get_subscriptions(size, page).await?)?;
                }
                SubscriptionCommands::Delete { subscription_id } => {
                    client.delete_subscription(&subscription_id).await?;
                    println!("Deleted subscription {}", subscription_id);
                }
            }
        }
        Commands::Authorize {
            account_username,
            quota_version,
        } => {
            let client = ams::get_client(&cfg.ams).await?;
            print_json(
                &client
                    .quota_authorization(&account_username, &quota_version)
                    .await?,
            )?;
        }
        Commands::User { user_name } => {
            let client = bop::get_client_with(&cfg.bop)?;
            tracing::debug!(variant = client.variant().as_str(), "Resolving user");
            print_json(&client.get_user(&user_name).await?)?;
        }
        Commands::Config { action } => match action {
            ConfigCommands::Validate => {
                println!("Configuration is valid");
                println!("{:#?}", cfg);
            }
        },
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
