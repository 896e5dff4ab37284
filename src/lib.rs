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

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    clippy::dbg_macro,
    clippy::todo
)]

//! # Edgehog Docker Client
//!
//! Client for a remote Docker Engine reachable over HTTP.
//!
//! The [`RemoteDocker`] owns a [`Transport`](transport::Transport) and the base URI of the
//! engine. Every request it issues, directly or through the [`Containers`], [`Images`] and
//! [`Swarm`] handles, is sent to `{base_uri}/{api_version}/{resource}`. The API version is
//! resolved once at construction and defaults to [`DEFAULT_API_VERSION`].

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resource;
pub mod transport;
pub mod version;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

/// Re-export third parties dependencies
pub use http;
pub use url;

/// Re-export internal structs
pub use self::client::RemoteDocker;
pub use self::config::EngineConfig;
pub use self::error::{ConfigError, DockerError};
pub use self::resource::{Containers, Images, Swarm};
pub use self::transport::{ReqwestTransport, Transport, TransportError};
pub use self::version::{ApiVersion, DEFAULT_API_VERSION};
