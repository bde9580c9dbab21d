// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::process::Command;

fn set_env(name: &str, cmd: &mut Command) {
    let value = match cmd.output() {
        Ok(output) if output.status.success() => {
            String::from_utf8(output.stdout).unwrap_or_default()
        }
        Ok(_) => String::new(),
        Err(err) => {
            println!("cargo:warning={err}");
            String::new()
        }
    };
    let value = value.trim();
    let value = if value.is_empty() { "unknown" } else { value };
    println!("cargo:rustc-env={name}={value}");
}

fn main() {
    set_env(
        "SHOPCTL_GIT_SHA",
        Command::new("git").args(["rev-parse", "--short", "HEAD"]),
    );
    set_env(
        "SHOPCTL_BUILD_DATE",
        Command::new("date").args(["-u", "+%Y-%m-%dT%H:%M:%SZ"]),
    );

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=SHOPCTL_PROFILE={profile}");
}
