// This file is part of Edgehog.
//
// Copyright 2025 SECO Mind Srl
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! Command Line options and configurations

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use edgehog_docker_client::EngineConfig;
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    long_about = env!("CARGO_PKG_DESCRIPTION"),
    version,
)]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that the engine is reachable.
    Ping,
    /// Print the API version used in the requests.
    Version,
    /// List the containers.
    Containers {
        /// Include the stopped containers.
        #[arg(short, long)]
        all: bool,
    },
    /// List the images.
    Images,
}

#[derive(Debug, Clone, Args)]
pub struct EngineArgs {
    /// Configuration file, the other options override its values.
    #[arg(short, long, env = "EDGEHOG_DOCKER_CONFIG")]
    pub config: Option<PathBuf>,
    /// Base URI of the engine.
    #[arg(long, env = "EDGEHOG_DOCKER_URL")]
    pub url: Option<Url>,
    /// API version to use, instead of the default one.
    #[arg(long, env = "EDGEHOG_DOCKER_API_VERSION")]
    pub api_version: Option<String>,
    /// Timeout of each request in seconds.
    #[arg(long, env = "EDGEHOG_DOCKER_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl EngineArgs {
    /// Merge the configuration file with the command line options.
    pub async fn config(&self) -> color_eyre::Result<EngineConfig> {
        let mut config = match (&self.config, &self.url) {
            (Some(path), _) => EngineConfig::read(path)
                .await
                .wrap_err_with(|| format!("couldn't read {}", path.display()))?,
            (None, Some(url)) => EngineConfig::new(url.clone()),
            (None, None) => return Err(eyre!("either --config or --url must be given")),
        };

        if let Some(url) = &self.url {
            config.url = url.clone();
        }

        if let Some(version) = &self.api_version {
            config.version = Some(version.clone());
        }

        if let Some(timeout) = self.timeout {
            config.timeout_secs = Some(timeout);
        }

        Ok(config)
    }
}
