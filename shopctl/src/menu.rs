// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::io::{BufRead, Write};

use thiserror::Error;
use tonic::Status;
use tracing::debug;

use crate::output::describe_status;
use crate::prompt::{PromptError, Prompter};

/// What the loop does after an action completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Failure of a single menu action.
#[derive(Error, Debug)]
pub enum MenuError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("{}", describe_status(.0))]
    Remote(#[from] Status),
}

/// A numbered menu of actions against one service.
#[allow(async_fn_in_trait)]
pub trait Menu {
    type Action: Copy + Display + 'static;

    /// Actions in display order; entry `n` is selected by typing `n + 1`.
    fn actions(&self) -> &'static [Self::Action];

    async fn handle<R: BufRead, W: Write>(
        &mut self,
        action: Self::Action,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Outcome, MenuError>;
}

/// Map a typed choice to an action.
pub fn select<A: Copy>(actions: &[A], choice: &str) -> Option<A> {
    let index: usize = choice.trim().parse().ok()?;
    actions.get(index.checked_sub(1)?).copied()
}

/// Drive `menu` until the user exits or the input ends.
///
/// Remote failures and invalid numbers are reported and the menu is shown
/// again. Only terminal I/O errors abort the loop.
pub async fn run_menu<M, R, W>(
    menu: &mut M,
    prompter: &mut Prompter<R, W>,
) -> Result<(), PromptError>
where
    M: Menu,
    R: BufRead,
    W: Write,
{
    loop {
        prompter.say("")?;
        for (i, action) in menu.actions().iter().enumerate() {
            prompter.say(format!("{}. {action}", i + 1))?;
        }

        let choice = match prompter.ask("Enter your choice: ") {
            Ok(choice) => choice,
            Err(PromptError::Closed) => return Ok(()),
            Err(e) => return Err(e),
        };

        let Some(action) = select(menu.actions(), &choice) else {
            prompter.say("Invalid choice, try again.")?;
            continue;
        };

        match menu.handle(action, prompter).await {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Exit) => {
                prompter.say("Exiting...")?;
                return Ok(());
            }
            Err(MenuError::Remote(status)) => {
                debug!(code = ?status.code(), %action, "remote call failed");
                prompter.say(format!("Error: {}", describe_status(&status)))?;
            }
            Err(MenuError::Prompt(PromptError::Closed)) => return Ok(()),
            Err(MenuError::Prompt(e @ PromptError::InvalidNumber { .. })) => {
                prompter.say(format!("Error: {e}"))?;
            }
            Err(MenuError::Prompt(e @ PromptError::Io(_))) => return Err(e),
        }
    }
}
