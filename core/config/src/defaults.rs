// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

pub const DEFAULT_TIMEOUT: &str = "15s";
pub const DEFAULT_SESSION_TTL: &str = "1h";

pub const DEFAULT_USER_SERVER: &str = "localhost:50051";
pub const DEFAULT_ORDER_SERVER: &str = "localhost:50052";
pub const DEFAULT_CART_SERVER: &str = "localhost:50053";
pub const DEFAULT_PRODUCT_SERVER: &str = "localhost:50054";
pub const DEFAULT_NOTIFICATION_SERVER: &str = "localhost:50055";
