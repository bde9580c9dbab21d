// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

const PROTOS: &[&str] = &[
    "user_service.proto",
    "product_service.proto",
    "order_service.proto",
    "cart_service.proto",
    "notification_service.proto",
];

// Messages printed as JSON by the clients.
const SERIALIZABLE: &[&str] = &[
    ".product.Product",
    ".order_service.Order",
    ".order_service.OrderItem",
    ".cart.CartItem",
];

fn main() {
    let protoc_path = protoc_bin_vendored::protoc_bin_path().unwrap();
    unsafe {
        #[allow(clippy::disallowed_methods)]
        std::env::set_var("PROTOC", protoc_path);
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let proto_dir = Path::new(&manifest_dir).join("proto");

    let protos: Vec<_> = PROTOS.iter().map(|p| proto_dir.join(p)).collect();
    for proto in &protos {
        println!("cargo:rerun-if-changed={}", proto.display());
    }

    let mut builder = tonic_build::configure()
        .build_client(true)
        .build_server(true);
    for message in SERIALIZABLE {
        builder = builder.type_attribute(message, "#[derive(serde::Serialize)]");
    }

    builder.compile_protos(&protos, &[proto_dir]).unwrap();
}
