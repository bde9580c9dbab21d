// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

//! Generated clients and servers for the storefront services.
//!
//! Each module matches one proto package. Servers are generated as well so
//! tests can stand up in-process doubles of the services.

pub mod user_service {
    tonic::include_proto!("user_service");
}

pub mod product {
    tonic::include_proto!("product");
}

pub mod order_service {
    tonic::include_proto!("order_service");
}

pub mod cart {
    tonic::include_proto!("cart");
}

pub mod notification {
    tonic::include_proto!("notification");
}
