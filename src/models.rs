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

//! Payloads exchanged with the engine.
//!
//! Only the fields used by the client are modeled, the engine may send more.

use serde::{Deserialize, Serialize};

/// Container returned by the list operation.
///
/// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ContainerList)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerSummary {
    /// Id of the container.
    pub id: String,
    /// Names of the container, with the leading slash.
    #[serde(default)]
    pub names: Vec<String>,
    /// Image the container was created from.
    #[serde(default)]
    pub image: String,
    /// State, like `running` or `exited`.
    #[serde(default)]
    pub state: String,
    /// Human readable status.
    #[serde(default)]
    pub status: String,
}

/// Image returned by the list operation.
///
/// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ImageList)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageSummary {
    /// Id of the image.
    pub id: String,
    /// Tags of the image, null for dangling images.
    #[serde(default)]
    pub repo_tags: Option<Vec<String>>,
    /// Size in bytes.
    #[serde(default)]
    pub size: i64,
}

/// Progress line streamed while pulling an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageProgress {
    /// Progress status.
    #[serde(default)]
    pub status: Option<String>,
    /// Error that interrupted the pull.
    #[serde(default)]
    pub error: Option<String>,
}

/// Swarm the engine is part of.
///
/// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/SwarmInspect)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SwarmInfo {
    /// Id of the swarm.
    #[serde(rename = "ID")]
    pub id: String,
    /// Creation date.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Tokens to join the swarm.
    #[serde(default)]
    pub join_tokens: Option<JoinTokens>,
}

/// Tokens to join a swarm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JoinTokens {
    /// Token to join as a worker.
    pub worker: String,
    /// Token to join as a manager.
    pub manager: String,
}

/// Body to initialize a new swarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SwarmInitRequest<'a> {
    /// Address to listen on for the inter-manager communication.
    pub listen_addr: &'a str,
    /// Address advertised to other nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertise_addr: Option<&'a str>,
}
