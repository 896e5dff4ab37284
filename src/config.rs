// This file is part of Edgehog.
//
// Copyright 2025 SECO Mind Srl
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration of the connection to a remote engine.

use std::{path::Path, time::Duration};

use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::{error::ConfigError, transport::ReqwestTransport};

/// Configuration for a [`RemoteDocker`](crate::RemoteDocker).
///
/// ```toml
/// url = "http://localhost:2375"
/// version = "v1.43"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Base URI of the engine
    pub url: Url,
    /// Override of the API version
    #[serde(default)]
    pub version: Option<String>,
    /// Timeout of a single request, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl EngineConfig {
    /// Create a configuration with only the base URI.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            version: None,
            timeout_secs: None,
        }
    }

    /// Read the configuration from a TOML file.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        info!("reading configuration file {}", path.display());

        let content = tokio::fs::read_to_string(path).await?;

        content.parse()
    }

    /// Timeout of a single request.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build the [`ReqwestTransport`] for this configuration.
    pub fn transport(&self) -> Result<ReqwestTransport, ConfigError> {
        match self.timeout() {
            Some(timeout) => ReqwestTransport::with_timeout(timeout),
            None => Ok(ReqwestTransport::new()),
        }
    }
}

impl std::str::FromStr for EngineConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(ConfigError::from)
    }
}
