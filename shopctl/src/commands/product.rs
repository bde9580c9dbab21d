// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use tonic::transport::Channel;
use tracing::debug;

use shop_config::{AppConfig, Overrides, Service};
use shop_proto::product::product_service_client::ProductServiceClient;
use shop_proto::product::{
    CreateProductRequest, ListProductsRequest, ProductRequest, ProductResponse,
    UpdateProductRequest,
};

use crate::commands::connect;
use crate::menu::{Menu, MenuError, Outcome, run_menu};
use crate::output::to_pretty_json;
use crate::prompt::{self, Prompter};

const DEFAULT_PAGE: i32 = 1;
const DEFAULT_LIMIT: i32 = 10;

#[derive(Args, Debug)]
pub struct ProductArgs {
    /// Product service address (host:port)
    #[arg(short = 's', long, env = "SHOPCTL_PRODUCT_SERVER")]
    pub server: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    Create,
    Get,
    List,
    Update,
    Delete,
    Exit,
}

impl fmt::Display for ProductAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProductAction::Create => "Create Product",
            ProductAction::Get => "Get Product",
            ProductAction::List => "List Products",
            ProductAction::Update => "Update Product",
            ProductAction::Delete => "Delete Product",
            ProductAction::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// Parse `key:value,key:value` into an attribute map.
///
/// Each pair is split on its first `:`; a pair without one maps the key to
/// an empty value. Blank segments are skipped.
pub fn parse_attributes(input: &str) -> HashMap<String, String> {
    input
        .split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| match pair.split_once(':') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (pair.trim().to_string(), String::new()),
        })
        .collect()
}

pub struct ProductMenu {
    client: ProductServiceClient<Channel>,
}

impl ProductMenu {
    pub fn new(client: ProductServiceClient<Channel>) -> Self {
        Self { client }
    }

    async fn list<R: BufRead, W: Write>(
        &mut self,
        p: &mut Prompter<R, W>,
    ) -> Result<(), MenuError> {
        let category = p.ask("Enter category (optional): ")?;
        let brand = p.ask("Enter brand (optional): ")?;
        let min_price = p.ask_optional("Enter minimum price (optional): ", "minimum price")?;
        let max_price = p.ask_optional("Enter maximum price (optional): ", "maximum price")?;
        let page = p.ask_optional("Enter page number (default 1): ", "page number")?;
        let limit = p.ask_optional("Enter items per page (default 10): ", "items per page")?;

        let request = ListProductsRequest {
            category,
            brand,
            min_price: min_price.unwrap_or_default(),
            max_price: max_price.unwrap_or_default(),
            page: page.unwrap_or(DEFAULT_PAGE),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        };

        debug!(
            rpc = "ListProducts",
            page = request.page,
            limit = request.limit,
            "calling product service"
        );
        let mut stream = self.client.list_products(request).await?.into_inner();

        p.say("\nProducts List:")?;
        let mut count = 0;
        while let Some(item) = stream.message().await? {
            count += 1;
            p.say(format!("\n--- Product {count} ---"))?;
            match item.product {
                Some(product) => p.say(to_pretty_json(&product))?,
                None => p.say(item.message)?,
            }
        }
        debug!(count, "product stream finished");
        p.say("Product listing completed.")?;
        Ok(())
    }
}

fn say_response<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    response: ProductResponse,
) -> Result<(), MenuError> {
    p.say(format!("\nResponse: {}", response.message))?;
    if let Some(product) = response.product {
        p.say(to_pretty_json(&product))?;
    }
    Ok(())
}

impl Menu for ProductMenu {
    type Action = ProductAction;

    fn actions(&self) -> &'static [ProductAction] {
        &[
            ProductAction::Create,
            ProductAction::Get,
            ProductAction::List,
            ProductAction::Update,
            ProductAction::Delete,
            ProductAction::Exit,
        ]
    }

    async fn handle<R: BufRead, W: Write>(
        &mut self,
        action: ProductAction,
        p: &mut Prompter<R, W>,
    ) -> Result<Outcome, MenuError> {
        match action {
            ProductAction::Create => {
                let name = p.ask("Enter product name: ")?;
                let description = p.ask("Enter product description: ")?;
                let price = p.ask_parsed("Enter price: ", "price")?;
                let category = p.ask("Enter category: ")?;
                let brand = p.ask("Enter brand: ")?;
                let stock = p.ask_parsed("Enter stock quantity: ", "stock quantity")?;
                let attributes =
                    parse_attributes(&p.ask("Enter attributes (key:value,key:value): ")?);

                debug!(rpc = "CreateProduct", "calling product service");
                let response = self
                    .client
                    .create_product(CreateProductRequest {
                        name,
                        description,
                        price,
                        category,
                        brand,
                        stock,
                        attributes,
                    })
                    .await?
                    .into_inner();
                say_response(p, response)?;
            }
            ProductAction::Get => {
                let product_id = p.ask("Enter product ID: ")?;

                debug!(rpc = "GetProduct", "calling product service");
                let response = self
                    .client
                    .get_product(ProductRequest { product_id })
                    .await?
                    .into_inner();

                p.say("\nProduct Details:")?;
                match response.product {
                    Some(product) if response.success => p.say(to_pretty_json(&product))?,
                    _ => p.say(format!("Error: {}", response.message))?,
                }
            }
            ProductAction::List => self.list(p).await?,
            ProductAction::Update => {
                let product_id = p.ask("Enter product ID to update: ")?;
                let name = p.ask_skippable("Enter new name (or press enter to skip): ")?;
                let description =
                    p.ask_skippable("Enter new description (or press enter to skip): ")?;
                let price = p.ask_optional("Enter new price (or press enter to skip): ", "price")?;
                let category = p.ask_skippable("Enter new category (or press enter to skip): ")?;
                let brand = p.ask_skippable("Enter new brand (or press enter to skip): ")?;
                let stock = p.ask_optional(
                    "Enter new stock quantity (or press enter to skip): ",
                    "stock quantity",
                )?;

                debug!(rpc = "UpdateProduct", %product_id, "calling product service");
                let response = self
                    .client
                    .update_product(UpdateProductRequest {
                        product_id,
                        name,
                        description,
                        price,
                        category,
                        brand,
                        stock,
                        attributes: HashMap::new(),
                    })
                    .await?
                    .into_inner();
                say_response(p, response)?;
            }
            ProductAction::Delete => {
                let product_id = p.ask("Enter product ID to delete: ")?;

                debug!(rpc = "DeleteProduct", %product_id, "calling product service");
                let response = self
                    .client
                    .delete_product(ProductRequest { product_id })
                    .await?
                    .into_inner();
                p.say(format!("\nResponse: {}", response.message))?;
            }
            ProductAction::Exit => return Ok(Outcome::Exit),
        }

        Ok(Outcome::Continue)
    }
}

pub async fn run(args: &ProductArgs, file_config: &AppConfig, overrides: Overrides) -> Result<()> {
    let overrides = Overrides {
        server: args.server.clone(),
        ..overrides
    };
    let channel = connect(Service::Product, file_config, &overrides)?;
    let mut menu = ProductMenu::new(ProductServiceClient::new(channel));
    run_menu(&mut menu, &mut prompt::stdio()).await?;
    Ok(())
}
