// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

pub mod cart;
pub mod config_cmd;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;
pub mod version;

use anyhow::{Context, Result};
use tonic::transport::Channel;

use shop_config::channel::lazy_channel;
use shop_config::{AppConfig, Overrides, ResolvedOpts, Service};

pub(crate) fn resolve(
    service: Service,
    file_config: &AppConfig,
    overrides: &Overrides,
) -> Result<ResolvedOpts> {
    ResolvedOpts::resolve(service, file_config, overrides)
        .with_context(|| format!("invalid options for the {service} client"))
}

/// Resolve the options for `service` and open a lazy channel to it.
pub(crate) fn connect(
    service: Service,
    file_config: &AppConfig,
    overrides: &Overrides,
) -> Result<Channel> {
    let opts = resolve(service, file_config, overrides)?;
    lazy_channel(&opts).with_context(|| format!("invalid {service} service address"))
}
