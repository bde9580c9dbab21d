// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

//! Interactive clients for the storefront services.
//!
//! Every client runs the same loop: show a numbered menu, collect the
//! request fields through prompts, issue one remote call, print the answer
//! and show the menu again.

pub mod cli;
pub mod commands;
pub mod menu;
pub mod output;
pub mod prompt;
pub mod session;
