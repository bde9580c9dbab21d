// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    date: env!("SHOPCTL_BUILD_DATE"),
    git_sha: env!("SHOPCTL_GIT_SHA"),
    profile: env!("SHOPCTL_PROFILE"),
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub date: &'static str,
    pub git_sha: &'static str,
    pub profile: &'static str,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Version:\t{}\nBuild Date:\t{}\nGit SHA:\t{}\nProfile:\t{}\nPlatform:\t{}/{}",
            self.version,
            self.date,
            self.git_sha,
            self.profile,
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    }
}

pub fn run() {
    println!("{BUILD_INFO}");
}
