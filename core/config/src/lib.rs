// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

pub mod channel;
pub mod defaults;
pub mod errors;
pub mod file;
pub mod opts;

pub use errors::ConfigError;
pub use file::AppConfig;
pub use opts::{Overrides, ResolvedOpts, Service};
