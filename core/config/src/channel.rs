// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use crate::errors::ConfigError;
use crate::opts::ResolvedOpts;

/// Turn a `host:port` address into an `http://` URI.
///
/// Addresses that already carry `http://` are kept as they are. TLS is not
/// supported, so `https://` and any other scheme are rejected.
pub fn normalize_endpoint(server: &str) -> Result<String, ConfigError> {
    let server = server.trim();
    if server.is_empty() {
        return Err(ConfigError::MissingEndpoint);
    }

    if server.starts_with("http://") {
        return Ok(server.to_string());
    }

    if server.contains("://") {
        return Err(ConfigError::UnsupportedScheme(server.to_string()));
    }

    Ok(format!("http://{server}"))
}

/// Build the endpoint for the resolved options, with connect and request
/// timeouts applied.
pub fn endpoint(opts: &ResolvedOpts) -> Result<Endpoint, ConfigError> {
    let uri = normalize_endpoint(&opts.server)?;
    let endpoint = Channel::from_shared(uri)?
        .connect_timeout(opts.timeout)
        .timeout(opts.timeout);
    Ok(endpoint)
}

/// Create a channel that connects on first use.
///
/// An unreachable service then surfaces as an error on the call that needs
/// it instead of failing before the menu is shown.
pub fn lazy_channel(opts: &ResolvedOpts) -> Result<Channel, ConfigError> {
    let endpoint = endpoint(opts)?;
    debug!(service = %opts.service, uri = %endpoint.uri(), "created lazy grpc channel");
    Ok(endpoint.connect_lazy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::Service;
    use std::time::Duration;

    fn opts(server: &str) -> ResolvedOpts {
        ResolvedOpts {
            service: Service::Cart,
            server: server.to_string(),
            timeout: Duration::from_secs(2),
            session_store: None,
            session_ttl: Duration::from_secs(60),
        }
    }

    #[test]
    fn bare_address_gets_http_scheme() {
        assert_eq!(
            normalize_endpoint("localhost:50053").unwrap(),
            "http://localhost:50053"
        );
    }

    #[test]
    fn http_address_is_kept() {
        assert_eq!(
            normalize_endpoint(" http://10.0.0.1:50053 ").unwrap(),
            "http://10.0.0.1:50053"
        );
    }

    #[test]
    fn https_is_rejected() {
        let err = normalize_endpoint("https://carts:443").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(_)));
    }

    #[test]
    fn empty_address_is_rejected() {
        assert!(matches!(
            normalize_endpoint("").unwrap_err(),
            ConfigError::MissingEndpoint
        ));
    }

    #[test]
    fn endpoint_carries_uri() {
        let endpoint = endpoint(&opts("localhost:50053")).unwrap();
        assert!(
            endpoint
                .uri()
                .to_string()
                .starts_with("http://localhost:50053")
        );
    }

    #[test]
    fn invalid_uri_is_reported() {
        let err = endpoint(&opts("bad host:1")).unwrap_err();
        assert!(matches!(err, ConfigError::UriParse(_)));
    }

    #[tokio::test]
    async fn lazy_channel_does_not_connect() {
        // nothing listens on port 9; creation must still succeed
        assert!(lazy_channel(&opts("127.0.0.1:9")).is_ok());
    }
}
