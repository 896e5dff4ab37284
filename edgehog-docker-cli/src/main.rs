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

use std::env::VarError;

use clap::Parser;
use color_eyre::eyre::{bail, WrapErr};
use edgehog_docker_client::RemoteDocker;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use self::cli::{Cli, Command};

mod cli;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let cli = Cli::parse();

    color_eyre::install()?;

    let filter = if std::env::var("RUST_LOG").is_err_and(|err| err == VarError::NotPresent) {
        "warn,edgehog_docker_client=debug".parse()?
    } else {
        EnvFilter::builder()
            .with_default_directive("warn".parse()?)
            .from_env_lossy()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;

    let config = cli.engine.config().await?;

    let docker = RemoteDocker::connect(&config).wrap_err("invalid engine configuration")?;

    info!(url = %docker.base_uri(), version = docker.version(), "connecting to the engine");

    match cli.command {
        Command::Ping => {
            if !docker.ping().await? {
                bail!("the engine at {} is not healthy", docker.base_uri());
            }

            println!("OK");
        }
        Command::Version => {
            println!("{}", docker.version());
        }
        Command::Containers { all } => {
            for container in docker.containers().list(all).await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    container.id,
                    container.names.join(","),
                    container.image,
                    container.status
                );
            }
        }
        Command::Images => {
            for image in docker.images().list().await? {
                let tags = image.repo_tags.unwrap_or_default();

                println!("{}\t{}\t{}", image.id, tags.join(","), image.size);
            }
        }
    }

    Ok(())
}
