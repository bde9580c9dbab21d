// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use tonic::transport::Channel;
use tonic::{Code, Status};
use tracing::{debug, info, warn};

use shop_config::channel::lazy_channel;
use shop_config::{AppConfig, Overrides, Service};
use shop_proto::user_service::user_service_client::UserServiceClient;
use shop_proto::user_service::{
    LoginRequest, LogoutRequest, RegisterRequest, UpdateProfileRequest, UserProfileRequest,
    UserProfileResponse,
};

use crate::commands::resolve;
use crate::menu::{Menu, MenuError, Outcome, run_menu};
use crate::prompt::{self, Prompter};
use crate::session::{Session, SessionMirror, SessionState, mirror_for};

const NOT_LOGGED_IN: &str = "You are not logged in.";
const SESSION_EXPIRED: &str = "Session expired or invalid. Please log in again.";

#[derive(Args, Debug)]
pub struct UserArgs {
    /// User service address (host:port)
    #[arg(short = 's', long, env = "SHOPCTL_USER_SERVER")]
    pub server: Option<String>,

    /// Keep a login session and use it for profile operations
    #[arg(long)]
    pub session: bool,

    /// Redis URL where sessions are mirrored (only with --session)
    #[arg(long, env = "SHOPCTL_SESSION_STORE")]
    pub session_store: Option<String>,

    /// Expiry of mirrored sessions, e.g. 30m (only with --session)
    #[arg(long, env = "SHOPCTL_SESSION_TTL")]
    pub session_ttl: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Register,
    Login,
    GetProfile,
    UpdateProfile,
    Exit,
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserAction::Register => "Register User",
            UserAction::Login => "Login User",
            UserAction::GetProfile => "Get User Profile",
            UserAction::UpdateProfile => "Update User Profile",
            UserAction::Exit => "Exit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Register,
    Login,
    GetProfile,
    UpdateProfile,
    Logout,
    Exit,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionAction::Register => "Register User",
            SessionAction::Login => "Login User",
            SessionAction::GetProfile => "Get My Profile",
            SessionAction::UpdateProfile => "Update My Profile",
            SessionAction::Logout => "Logout",
            SessionAction::Exit => "Exit",
        };
        f.write_str(label)
    }
}

async fn register<R: BufRead, W: Write>(
    client: &mut UserServiceClient<Channel>,
    p: &mut Prompter<R, W>,
) -> Result<(), MenuError> {
    let full_name = p.ask("Enter full name: ")?;
    let email = p.ask("Enter email: ")?;
    let password = p.ask("Enter password: ")?;
    let address = p.ask("Enter address: ")?;
    let phone_number = p.ask("Enter phone number: ")?;

    debug!(rpc = "RegisterUser", "calling user service");
    let response = client
        .register_user(RegisterRequest {
            full_name,
            email,
            password,
            address,
            phone_number,
        })
        .await?
        .into_inner();
    p.say(format!("{}, User ID: {}", response.message, response.user_id))?;
    Ok(())
}

fn say_profile<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    profile: &UserProfileResponse,
) -> Result<(), MenuError> {
    p.say("\nUser Profile:")?;
    p.say(format!("  Name: {}", profile.full_name))?;
    p.say(format!("  Email: {}", profile.email))?;
    p.say(format!("  Address: {}", profile.address))?;
    p.say(format!("  Phone: {}", profile.phone_number))?;
    Ok(())
}

/// User client without session handling.
pub struct UserMenu {
    client: UserServiceClient<Channel>,
}

impl UserMenu {
    pub fn new(client: UserServiceClient<Channel>) -> Self {
        Self { client }
    }
}

impl Menu for UserMenu {
    type Action = UserAction;

    fn actions(&self) -> &'static [UserAction] {
        &[
            UserAction::Register,
            UserAction::Login,
            UserAction::GetProfile,
            UserAction::UpdateProfile,
            UserAction::Exit,
        ]
    }

    async fn handle<R: BufRead, W: Write>(
        &mut self,
        action: UserAction,
        p: &mut Prompter<R, W>,
    ) -> Result<Outcome, MenuError> {
        match action {
            UserAction::Register => register(&mut self.client, p).await?,
            UserAction::Login => {
                let email = p.ask("Enter email: ")?;
                let password = p.ask("Enter password: ")?;

                debug!(rpc = "LoginUser", "calling user service");
                let response = self
                    .client
                    .login_user(LoginRequest { email, password })
                    .await?
                    .into_inner();
                p.say(format!("{}, User ID: {}", response.message, response.user_id))?;
            }
            UserAction::GetProfile => {
                let user_id = p.ask("Enter User ID: ")?;

                debug!(rpc = "GetUserProfile", "calling user service");
                let profile = self
                    .client
                    .get_user_profile(UserProfileRequest {
                        user_id,
                        session_token: String::new(),
                    })
                    .await?
                    .into_inner();
                say_profile(p, &profile)?;
            }
            UserAction::UpdateProfile => {
                let email = p.ask("Enter your registered email: ")?;
                let full_name = p.ask("Enter new full name: ")?;
                let address = p.ask("Enter new address: ")?;
                let phone_number = p.ask("Enter new phone number: ")?;

                debug!(rpc = "UpdateUserProfile", "calling user service");
                let response = self
                    .client
                    .update_user_profile(UpdateProfileRequest {
                        email,
                        full_name,
                        address,
                        phone_number,
                        session_token: String::new(),
                    })
                    .await?
                    .into_inner();
                p.say(response.message)?;
            }
            UserAction::Exit => return Ok(Outcome::Exit),
        }

        Ok(Outcome::Continue)
    }
}

/// User client that logs in once and uses the session for profile
/// operations.
pub struct SessionUserMenu {
    client: UserServiceClient<Channel>,
    session: SessionState,
    mirror: Box<dyn SessionMirror>,
}

impl SessionUserMenu {
    pub fn new(client: UserServiceClient<Channel>, mirror: Box<dyn SessionMirror>) -> Self {
        Self {
            client,
            session: SessionState::new(),
            mirror,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    async fn login<R: BufRead, W: Write>(
        &mut self,
        p: &mut Prompter<R, W>,
    ) -> Result<(), MenuError> {
        let email = p.ask("Enter email: ")?;
        let password = p.ask("Enter password: ")?;

        debug!(rpc = "LoginUser", "calling user service");
        let response = self
            .client
            .login_user(LoginRequest {
                email: email.clone(),
                password,
            })
            .await?
            .into_inner();

        if response.session_token.is_empty() {
            p.say(format!("Login failed: {}", response.message))?;
            return Ok(());
        }

        let session = Session::new(response.session_token, &response.user_id, email);
        if let Err(e) = self.mirror.store(&session).await {
            warn!(error = %e, "failed to mirror session");
        }
        if self.session.begin(session).is_some() {
            debug!("replaced previous session");
        }
        info!(user_id = %response.user_id, "logged in");
        p.say(format!("{}, User ID: {}", response.message, response.user_id))?;
        Ok(())
    }

    async fn profile<R: BufRead, W: Write>(
        &mut self,
        p: &mut Prompter<R, W>,
    ) -> Result<(), MenuError> {
        let Some(session) = self.session.current() else {
            p.say(NOT_LOGGED_IN)?;
            return Ok(());
        };
        let request = UserProfileRequest {
            user_id: session.user_id().to_string(),
            session_token: session.token().to_string(),
        };

        debug!(rpc = "GetUserProfile", "calling user service");
        let profile = match self.client.get_user_profile(request).await {
            Ok(response) => response.into_inner(),
            Err(status) => return expired_or(p, status),
        };

        if profile.full_name.is_empty() || profile.email.is_empty() {
            debug!("profile response is missing fields");
            p.say(SESSION_EXPIRED)?;
            return Ok(());
        }
        say_profile(p, &profile)
    }

    async fn update<R: BufRead, W: Write>(
        &mut self,
        p: &mut Prompter<R, W>,
    ) -> Result<(), MenuError> {
        let Some(session) = self.session.current() else {
            p.say(NOT_LOGGED_IN)?;
            return Ok(());
        };
        let email = session.email().to_string();
        let session_token = session.token().to_string();

        let full_name = p.ask("Enter new full name: ")?;
        let address = p.ask("Enter new address: ")?;
        let phone_number = p.ask("Enter new phone number: ")?;

        debug!(rpc = "UpdateUserProfile", "calling user service");
        let request = UpdateProfileRequest {
            email,
            full_name,
            address,
            phone_number,
            session_token,
        };
        match self.client.update_user_profile(request).await {
            Ok(response) => p.say(response.into_inner().message)?,
            Err(status) => return expired_or(p, status),
        }
        Ok(())
    }

    async fn logout<R: BufRead, W: Write>(
        &mut self,
        p: &mut Prompter<R, W>,
    ) -> Result<(), MenuError> {
        // the handle is cleared even when the service rejects the call
        let Some(session) = self.session.end() else {
            p.say(NOT_LOGGED_IN)?;
            return Ok(());
        };

        debug!(rpc = "LogoutUser", "calling user service");
        let result = self
            .client
            .logout_user(LogoutRequest {
                session_token: session.token().to_string(),
            })
            .await;

        if let Err(e) = self.mirror.remove(session.token()).await {
            warn!(error = %e, "failed to remove mirrored session");
        }
        info!(user_id = %session.user_id(), "logged out");

        p.say(result?.into_inner().message)?;
        Ok(())
    }
}

fn expired_or<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    status: Status,
) -> Result<(), MenuError> {
    if status.code() == Code::Unauthenticated {
        p.say(SESSION_EXPIRED)?;
        return Ok(());
    }
    Err(status.into())
}

impl Menu for SessionUserMenu {
    type Action = SessionAction;

    fn actions(&self) -> &'static [SessionAction] {
        &[
            SessionAction::Register,
            SessionAction::Login,
            SessionAction::GetProfile,
            SessionAction::UpdateProfile,
            SessionAction::Logout,
            SessionAction::Exit,
        ]
    }

    async fn handle<R: BufRead, W: Write>(
        &mut self,
        action: SessionAction,
        p: &mut Prompter<R, W>,
    ) -> Result<Outcome, MenuError> {
        match action {
            SessionAction::Register => register(&mut self.client, p).await?,
            SessionAction::Login => self.login(p).await?,
            SessionAction::GetProfile => self.profile(p).await?,
            SessionAction::UpdateProfile => self.update(p).await?,
            SessionAction::Logout => self.logout(p).await?,
            SessionAction::Exit => return Ok(Outcome::Exit),
        }
        Ok(Outcome::Continue)
    }
}

fn user_overrides(args: &UserArgs, overrides: Overrides) -> Overrides {
    if !args.session && (args.session_store.is_some() || args.session_ttl.is_some()) {
        warn!("session store options are ignored without --session");
    }
    Overrides {
        server: args.server.clone(),
        session_store: args.session_store.clone().or(overrides.session_store),
        session_ttl: args.session_ttl.clone().or(overrides.session_ttl),
        ..overrides
    }
}

pub async fn run(args: &UserArgs, file_config: &AppConfig, overrides: Overrides) -> Result<()> {
    let overrides = user_overrides(args, overrides);
    let opts = resolve(Service::User, file_config, &overrides)?;
    let client = UserServiceClient::new(lazy_channel(&opts)?);
    let mut prompter = prompt::stdio();

    if args.session {
        let mirror = mirror_for(opts.session_store.as_deref(), opts.session_ttl)
            .context("invalid session store")?;
        let mut menu = SessionUserMenu::new(client, mirror);
        run_menu(&mut menu, &mut prompter).await?;
    } else {
        run_menu(&mut UserMenu::new(client), &mut prompter).await?;
    }
    Ok(())
}
