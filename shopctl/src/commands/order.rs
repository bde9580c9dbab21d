// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use tonic::transport::Channel;
use tracing::debug;

use shop_config::{AppConfig, Overrides, Service};
use shop_proto::order_service::order_service_client::OrderServiceClient;
use shop_proto::order_service::{
    CreateOrderRequest, OrderRequest, UpdateStatusRequest, UserOrdersRequest,
};

use crate::commands::connect;
use crate::menu::{Menu, MenuError, Outcome, run_menu};
use crate::output::to_pretty_json;
use crate::prompt::{self, Prompter};

#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Order service address (host:port)
    #[arg(short = 's', long, env = "SHOPCTL_ORDER_SERVER")]
    pub server: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Create,
    Get,
    ByUser,
    Cancel,
    UpdateStatus,
    Delete,
    Exit,
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderAction::Create => "Create Order",
            OrderAction::Get => "Get Order by ID",
            OrderAction::ByUser => "Get Orders by User",
            OrderAction::Cancel => "Cancel Order",
            OrderAction::UpdateStatus => "Update Status",
            OrderAction::Delete => "Delete Order",
            OrderAction::Exit => "Exit",
        };
        f.write_str(label)
    }
}

pub struct OrderMenu {
    client: OrderServiceClient<Channel>,
}

impl OrderMenu {
    pub fn new(client: OrderServiceClient<Channel>) -> Self {
        Self { client }
    }
}

impl Menu for OrderMenu {
    type Action = OrderAction;

    fn actions(&self) -> &'static [OrderAction] {
        &[
            OrderAction::Create,
            OrderAction::Get,
            OrderAction::ByUser,
            OrderAction::Cancel,
            OrderAction::UpdateStatus,
            OrderAction::Delete,
            OrderAction::Exit,
        ]
    }

    async fn handle<R: BufRead, W: Write>(
        &mut self,
        action: OrderAction,
        p: &mut Prompter<R, W>,
    ) -> Result<Outcome, MenuError> {
        match action {
            OrderAction::Create => {
                let user_id = p.ask("Enter User ID: ")?;

                debug!(rpc = "CreateOrder", "calling order service");
                let response = self
                    .client
                    .create_order(CreateOrderRequest { user_id })
                    .await?
                    .into_inner();
                p.say(format!("{} Order ID: {}", response.message, response.order_id))?;
            }
            OrderAction::Get => {
                let order_id = p.ask("Enter Order ID: ")?;

                debug!(rpc = "GetOrderById", "calling order service");
                let order = self
                    .client
                    .get_order_by_id(OrderRequest { order_id })
                    .await?
                    .into_inner();
                p.say("Order:")?;
                p.say(to_pretty_json(&order))?;
            }
            OrderAction::ByUser => {
                let user_id = p.ask("Enter User ID: ")?;

                debug!(rpc = "GetOrdersByUserId", "calling order service");
                let list = self
                    .client
                    .get_orders_by_user_id(UserOrdersRequest { user_id })
                    .await?
                    .into_inner();
                p.say("Orders:")?;
                p.say(to_pretty_json(&list.orders))?;
            }
            OrderAction::Cancel => {
                let order_id = p.ask("Enter Order ID: ")?;

                debug!(rpc = "CancelOrder", "calling order service");
                let response = self
                    .client
                    .cancel_order(OrderRequest { order_id })
                    .await?
                    .into_inner();
                p.say(response.message)?;
            }
            OrderAction::UpdateStatus => {
                let order_id = p.ask("Enter Order ID: ")?;
                let status = p.ask("Enter New Status: ")?;

                debug!(rpc = "UpdateOrderStatus", %status, "calling order service");
                let response = self
                    .client
                    .update_order_status(UpdateStatusRequest { order_id, status })
                    .await?
                    .into_inner();
                p.say(response.message)?;
            }
            OrderAction::Delete => {
                let order_id = p.ask("Enter Order ID: ")?;

                debug!(rpc = "DeleteOrder", "calling order service");
                let response = self
                    .client
                    .delete_order(OrderRequest { order_id })
                    .await?
                    .into_inner();
                p.say(response.message)?;
            }
            OrderAction::Exit => return Ok(Outcome::Exit),
        }

        Ok(Outcome::Continue)
    }
}

pub async fn run(args: &OrderArgs, file_config: &AppConfig, overrides: Overrides) -> Result<()> {
    let overrides = Overrides {
        server: args.server.clone(),
        ..overrides
    };
    let channel = connect(Service::Order, file_config, &overrides)?;
    let mut menu = OrderMenu::new(OrderServiceClient::new(channel));
    run_menu(&mut menu, &mut prompt::stdio()).await?;
    Ok(())
}
