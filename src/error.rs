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

//! Errors returned while building the client or talking to the engine.

use http::StatusCode;

use crate::transport::TransportError;

/// Error while building a [`RemoteDocker`](crate::RemoteDocker) or its configuration.
///
/// These are programming or configuration mistakes, they are returned at construction and never
/// at the first request.
#[non_exhaustive]
#[derive(Debug, thiserror::Error, displaydoc::Display)]
pub enum ConfigError {
    /// the base URI is empty
    EmptyUri,
    /// couldn't parse the base URI
    Uri(#[from] url::ParseError),
    /// unsupported scheme {0}, expected http or https
    Scheme(String),
    /// the base URI {0} has no host
    MissingHost(String),
    /// the base URI {0} must not have a path, query or fragment
    UnexpectedComponent(String),
    /// invalid API version {0}
    Version(String),
    /// couldn't read the configuration file
    Read(#[from] std::io::Error),
    /// couldn't parse the configuration file
    Toml(#[from] toml::de::Error),
    /// couldn't build the HTTP transport
    Transport(#[source] reqwest::Error),
}

/// Error returned by an operation against the engine.
#[non_exhaustive]
#[derive(Debug, thiserror::Error, displaydoc::Display)]
pub enum DockerError {
    /// couldn't complete the request to the engine
    Transport(#[from] TransportError),
    /// the engine responded with status {status}: {message}
    Status {
        /// Status code of the response.
        status: StatusCode,
        /// Message reported by the engine.
        message: String,
    },
    /// couldn't decode the engine response
    Json(#[from] serde_json::Error),
    /// couldn't encode the request body
    Encode(#[source] serde_json::Error),
    /// the image pull failed: {0}
    Pull(String),
    /// invalid resource name '{0}'
    InvalidName(String),
}

impl DockerError {
    /// Returns the status code if the engine responded with an unexpected status.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DockerError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
