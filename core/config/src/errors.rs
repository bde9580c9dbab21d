// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use thiserror::Error;

/// Errors for Config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("failed to serialize config to YAML: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("cannot determine HOME for shopctl config path")]
    MissingHome,
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },
    #[error("missing grpc endpoint")]
    MissingEndpoint,
    #[error("unsupported scheme in endpoint '{0}', only plain http:// is supported")]
    UnsupportedScheme(String),
    #[error("URI parse error: {0}")]
    UriParse(#[from] tonic::codegen::http::uri::InvalidUri),
}
