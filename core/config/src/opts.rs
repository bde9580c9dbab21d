// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::time::Duration;

use crate::defaults::{
    DEFAULT_CART_SERVER, DEFAULT_NOTIFICATION_SERVER, DEFAULT_ORDER_SERVER,
    DEFAULT_PRODUCT_SERVER, DEFAULT_SESSION_TTL, DEFAULT_TIMEOUT, DEFAULT_USER_SERVER,
};
use crate::errors::ConfigError;
use crate::file::AppConfig;

/// The storefront services a client can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    User,
    Product,
    Order,
    Cart,
    Notification,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Service::User,
        Service::Product,
        Service::Order,
        Service::Cart,
        Service::Notification,
    ];

    pub fn default_endpoint(self) -> &'static str {
        match self {
            Service::User => DEFAULT_USER_SERVER,
            Service::Product => DEFAULT_PRODUCT_SERVER,
            Service::Order => DEFAULT_ORDER_SERVER,
            Service::Cart => DEFAULT_CART_SERVER,
            Service::Notification => DEFAULT_NOTIFICATION_SERVER,
        }
    }

    fn from_file(self, config: &AppConfig) -> Option<&str> {
        let services = &config.services;
        match self {
            Service::User => services.user.as_deref(),
            Service::Product => services.product.as_deref(),
            Service::Order => services.order.as_deref(),
            Service::Cart => services.cart.as_deref(),
            Service::Notification => services.notification.as_deref(),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::User => "user",
            Service::Product => "product",
            Service::Order => "order",
            Service::Cart => "cart",
            Service::Notification => "notification",
        };
        f.write_str(name)
    }
}

/// Values coming from the command line or the environment. They win over the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub timeout: Option<String>,
    pub server: Option<String>,
    pub session_store: Option<String>,
    pub session_ttl: Option<String>,
}

/// Effective options for one client invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOpts {
    pub service: Service,
    pub server: String,
    pub timeout: Duration,
    pub session_store: Option<String>,
    pub session_ttl: Duration,
}

impl ResolvedOpts {
    /// Merge defaults, the configuration file and the overrides, in this
    /// order, for `service`.
    pub fn resolve(
        service: Service,
        file: &AppConfig,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let server = overrides
            .server
            .as_deref()
            .or_else(|| service.from_file(file))
            .unwrap_or_else(|| service.default_endpoint())
            .to_string();
        if server.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        let timeout = overrides
            .timeout
            .as_deref()
            .or(file.common_opts.timeout.as_deref())
            .unwrap_or(DEFAULT_TIMEOUT);

        let session_ttl = overrides
            .session_ttl
            .as_deref()
            .or(file.common_opts.session_ttl.as_deref())
            .unwrap_or(DEFAULT_SESSION_TTL);

        let session_store = overrides
            .session_store
            .clone()
            .or_else(|| file.common_opts.session_store.clone())
            .filter(|url| !url.is_empty());

        Ok(Self {
            service,
            server,
            timeout: parse_duration(timeout)?,
            session_store,
            session_ttl: parse_duration(session_ttl)?,
        })
    }
}

/// Parse a human duration such as `15s` or `1m`.
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    duration_str::parse(value).map_err(|e| ConfigError::InvalidDuration {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
