// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use tonic::transport::Channel;
use tracing::debug;

use shop_config::{AppConfig, Overrides, Service};
use shop_proto::notification::NotificationRequest;
use shop_proto::notification::notification_service_client::NotificationServiceClient;

use crate::commands::connect;
use crate::output::describe_status;
use crate::prompt::{self, PromptError, Prompter};

#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Notification service address (host:port)
    #[arg(short = 's', long, env = "SHOPCTL_NOTIFICATION_SERVER")]
    pub server: Option<String>,

    /// Recipient; skips the user id prompt
    #[arg(short = 'u', long)]
    pub user_id: Option<String>,

    /// Message text; skips the message prompt
    #[arg(short = 'm', long)]
    pub message: Option<String>,
}

/// Collect the recipient and the message, then send one notification.
///
/// A remote failure is printed and is not an error of the command.
pub async fn send<R: BufRead, W: Write>(
    client: &mut NotificationServiceClient<Channel>,
    args: &NotifyArgs,
    p: &mut Prompter<R, W>,
) -> Result<(), PromptError> {
    let user_id = match &args.user_id {
        Some(user_id) => user_id.clone(),
        None => p.ask("Enter User ID: ")?,
    };
    let message = match &args.message {
        Some(message) => message.clone(),
        None => p.ask("Enter Message to send: ")?,
    };

    let request = NotificationRequest {
        user_id: user_id.trim().to_string(),
        message: message.trim().to_string(),
    };

    debug!(rpc = "SendNotification", user_id = %request.user_id, "calling notification service");
    match client.send_notification(request).await {
        Ok(response) => p.say(format!("Response: {}", response.into_inner().status)),
        Err(status) => {
            debug!(code = ?status.code(), "notification failed");
            p.say(format!("Error: {}", describe_status(&status)))
        }
    }
}

pub async fn run(args: &NotifyArgs, file_config: &AppConfig, overrides: Overrides) -> Result<()> {
    let overrides = Overrides {
        server: args.server.clone(),
        ..overrides
    };
    let channel = connect(Service::Notification, file_config, &overrides)?;
    let mut client = NotificationServiceClient::new(channel);
    send(&mut client, args, &mut prompt::stdio()).await?;
    Ok(())
}
