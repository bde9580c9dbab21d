// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use bb8_redis::redis;
use clap::{Args, Subcommand};

use shop_config::AppConfig;
use shop_config::channel::normalize_endpoint;
use shop_config::file::{load_config, load_config_for_update, render_config, save_config};
use shop_config::opts::parse_duration;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// List current configuration values
    #[command(alias = "ls")]
    List,
    /// Set a configuration value
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(subcommand)]
    pub command: SetCommand,
}

#[derive(Subcommand, Debug)]
pub enum SetCommand {
    /// Set the request timeout (e.g. 15s, 1m)
    Timeout { value: String },
    /// Set the Redis URL used to mirror sessions (empty to unset)
    SessionStore { value: String },
    /// Set how long mirrored sessions live (e.g. 30m, 1h)
    SessionTtl { value: String },
    /// Set the user service address (host:port)
    UserServer { value: String },
    /// Set the product service address (host:port)
    ProductServer { value: String },
    /// Set the order service address (host:port)
    OrderServer { value: String },
    /// Set the cart service address (host:port)
    CartServer { value: String },
    /// Set the notification service address (host:port)
    NotificationServer { value: String },
}

pub async fn run(args: &ConfigArgs, config_file: Option<&str>) -> Result<()> {
    match &args.command {
        ConfigCommand::List => run_list(config_file),
        ConfigCommand::Set(set_args) => run_set(&set_args.command, config_file),
    }
}

fn run_list(config_file: Option<&str>) -> Result<()> {
    let config = load_config(config_file)?;
    print!("{}", render_config(&config)?);
    Ok(())
}

fn run_set(cmd: &SetCommand, config_file: Option<&str>) -> Result<()> {
    let mut config = load_config_for_update(config_file)?;
    apply(&mut config, cmd)?;
    let path = save_config(&config, config_file)?;
    println!("Saved config to {}", path.display());
    Ok(())
}

fn server(value: &str) -> Result<Option<String>> {
    normalize_endpoint(value)?;
    Ok(Some(value.trim().to_string()))
}

/// Validate `cmd` and write it into `config`.
fn apply(config: &mut AppConfig, cmd: &SetCommand) -> Result<()> {
    match cmd {
        SetCommand::Timeout { value } => {
            parse_duration(value)?;
            config.common_opts.timeout = Some(value.clone());
        }
        SetCommand::SessionStore { value } => {
            if value.is_empty() {
                config.common_opts.session_store = None;
            } else {
                redis::Client::open(value.as_str())
                    .with_context(|| format!("invalid session store url '{value}'"))?;
                config.common_opts.session_store = Some(value.clone());
            }
        }
        SetCommand::SessionTtl { value } => {
            parse_duration(value)?;
            config.common_opts.session_ttl = Some(value.clone());
        }
        SetCommand::UserServer { value } => config.services.user = server(value)?,
        SetCommand::ProductServer { value } => config.services.product = server(value)?,
        SetCommand::OrderServer { value } => config.services.order = server(value)?,
        SetCommand::CartServer { value } => config.services.cart = server(value)?,
        SetCommand::NotificationServer { value } => {
            config.services.notification = server(value)?
        }
    }
    Ok(())
}
