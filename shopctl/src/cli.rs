// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use shop_config::Overrides;
use shop_config::file::load_config;
use shop_tracing::TracingConfiguration;

use crate::commands::{
    cart::{self, CartArgs},
    config_cmd::{self, ConfigArgs},
    notification::{self, NotifyArgs},
    order::{self, OrderArgs},
    product::{self, ProductArgs},
    user::{self, UserArgs},
    version,
};

/// Storefront service CLI
#[derive(Parser, Debug)]
#[command(name = "shopctl", about = "Interactive clients for the storefront services")]
pub struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Global options applied to all commands (may appear before or after the subcommand)
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to shopctl configuration file
    #[arg(long, env = "SHOPCTL_CONFIG", global = true)]
    config: Option<String>,

    /// gRPC request timeout (e.g. 15s, 1m)
    #[arg(long, env = "SHOPCTL_TIMEOUT", global = true)]
    timeout: Option<String>,

    /// Log level written to stderr (trace, debug, info, warn, error)
    #[arg(long, env = "SHOPCTL_LOG_LEVEL", global = true, default_value = "warn")]
    log_level: String,

    /// Log filter directives (e.g. shopctl=debug,tonic=info), overrides --log-level
    #[arg(long, env = "SHOPCTL_LOG_FILTER", global = true)]
    log_filter: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// User service client (register, login, profile)
    #[command(alias = "u")]
    User(UserArgs),

    /// Product service client (catalogue management)
    #[command(alias = "p")]
    Product(ProductArgs),

    /// Order service client
    #[command(alias = "o")]
    Order(OrderArgs),

    /// Cart service client
    #[command(alias = "c")]
    Cart(CartArgs),

    /// Send a single notification
    #[command(alias = "notification")]
    Notify(NotifyArgs),

    /// Manage shopctl configuration
    Config(ConfigArgs),

    /// Print version information
    Version,
}

impl GlobalOpts {
    fn tracing(&self) -> TracingConfiguration {
        TracingConfiguration::default()
            .with_log_level(self.log_level.clone())
            .with_filter(self.log_filter.clone())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            timeout: self.timeout.clone(),
            ..Default::default()
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    cli.global.tracing().setup_tracing_subscriber();
    debug!(command = ?cli.command, "starting shopctl");

    // Load config file, then overlay with CLI/env opts
    let file_config = load_config(cli.global.config.as_deref())?;
    let overrides = cli.global.overrides();

    match &cli.command {
        Commands::User(args) => user::run(args, &file_config, overrides).await?,
        Commands::Product(args) => product::run(args, &file_config, overrides).await?,
        Commands::Order(args) => order::run(args, &file_config, overrides).await?,
        Commands::Cart(args) => cart::run(args, &file_config, overrides).await?,
        Commands::Notify(args) => notification::run(args, &file_config, overrides).await?,
        Commands::Config(args) => config_cmd::run(args, cli.global.config.as_deref()).await?,
        Commands::Version => version::run(),
    }

    Ok(())
}
