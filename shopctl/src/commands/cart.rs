// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use tonic::transport::Channel;
use tracing::debug;

use shop_config::{AppConfig, Overrides, Service};
use shop_proto::cart::cart_service_client::CartServiceClient;
use shop_proto::cart::{
    AddToCartRequest, CartRequest, RemoveFromCartRequest, UpdateCartItemRequest,
};

use crate::commands::connect;
use crate::menu::{Menu, MenuError, Outcome, run_menu};
use crate::output::render_table;
use crate::prompt::{self, Prompter};

#[derive(Args, Debug)]
pub struct CartArgs {
    /// Cart service address (host:port)
    #[arg(short = 's', long, env = "SHOPCTL_CART_SERVER")]
    pub server: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add,
    Remove,
    Update,
    Items,
    Clear,
    Total,
    Exit,
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CartAction::Add => "Add to Cart",
            CartAction::Remove => "Remove from Cart",
            CartAction::Update => "Update Cart Item",
            CartAction::Items => "Get Cart Items",
            CartAction::Clear => "Clear Cart",
            CartAction::Total => "Calculate Total Price",
            CartAction::Exit => "Exit",
        };
        f.write_str(label)
    }
}

pub struct CartMenu {
    client: CartServiceClient<Channel>,
}

impl CartMenu {
    pub fn new(client: CartServiceClient<Channel>) -> Self {
        Self { client }
    }
}

impl Menu for CartMenu {
    type Action = CartAction;

    fn actions(&self) -> &'static [CartAction] {
        &[
            CartAction::Add,
            CartAction::Remove,
            CartAction::Update,
            CartAction::Items,
            CartAction::Clear,
            CartAction::Total,
            CartAction::Exit,
        ]
    }

    async fn handle<R: BufRead, W: Write>(
        &mut self,
        action: CartAction,
        p: &mut Prompter<R, W>,
    ) -> Result<Outcome, MenuError> {
        match action {
            CartAction::Add => {
                let user_id = p.ask("Enter User ID: ")?;
                let product_id = p.ask("Enter Product ID: ")?;
                let quantity = p.ask_parsed("Enter Quantity: ", "quantity")?;

                debug!(rpc = "AddToCart", "calling cart service");
                let response = self
                    .client
                    .add_to_cart(AddToCartRequest {
                        user_id,
                        product_id,
                        quantity,
                    })
                    .await?
                    .into_inner();
                p.say(response.message)?;
            }
            CartAction::Remove => {
                let user_id = p.ask("Enter User ID: ")?;
                let product_id = p.ask("Enter Product ID: ")?;

                debug!(rpc = "RemoveFromCart", "calling cart service");
                let response = self
                    .client
                    .remove_from_cart(RemoveFromCartRequest {
                        user_id,
                        product_id,
                    })
                    .await?
                    .into_inner();
                p.say(response.message)?;
            }
            CartAction::Update => {
                let user_id = p.ask("Enter User ID: ")?;
                let product_id = p.ask("Enter Product ID: ")?;
                let quantity = p.ask_parsed("Enter New Quantity: ", "quantity")?;

                debug!(rpc = "UpdateCartItem", "calling cart service");
                let response = self
                    .client
                    .update_cart_item(UpdateCartItemRequest {
                        user_id,
                        product_id,
                        quantity,
                    })
                    .await?
                    .into_inner();
                p.say(response.message)?;
            }
            CartAction::Items => {
                let user_id = p.ask("Enter User ID: ")?;

                debug!(rpc = "GetCartItems", "calling cart service");
                let response = self
                    .client
                    .get_cart_items(CartRequest { user_id })
                    .await?
                    .into_inner();

                let rows: Vec<Vec<String>> = response
                    .items
                    .into_iter()
                    .map(|item| vec![item.product_id, item.quantity.to_string()])
                    .collect();
                p.say("\nCart Items:")?;
                p.say(render_table(&["product_id", "quantity"], &rows).trim_end())?;
            }
            CartAction::Clear => {
                let user_id = p.ask("Enter User ID: ")?;

                debug!(rpc = "ClearCart", "calling cart service");
                let response = self
                    .client
                    .clear_cart(CartRequest { user_id })
                    .await?
                    .into_inner();
                p.say(response.message)?;
            }
            CartAction::Total => {
                let user_id = p.ask("Enter User ID: ")?;

                debug!(rpc = "CalculateTotalPrice", "calling cart service");
                let response = self
                    .client
                    .calculate_total_price(CartRequest { user_id })
                    .await?
                    .into_inner();
                p.say(format!("Total Price: ₹{:.2}", response.total_price))?;
            }
            CartAction::Exit => return Ok(Outcome::Exit),
        }

        Ok(Outcome::Continue)
    }
}

pub async fn run(args: &CartArgs, file_config: &AppConfig, overrides: Overrides) -> Result<()> {
    let overrides = Overrides {
        server: args.server.clone(),
        ..overrides
    };
    let channel = connect(Service::Cart, file_config, &overrides)?;
    let mut menu = CartMenu::new(CartServiceClient::new(channel));
    run_menu(&mut menu, &mut prompt::stdio()).await?;
    Ok(())
}
