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

//! HTTP transport using [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tracing::{instrument, trace};

use super::{Request, Response, Transport, TransportError};
use crate::error::ConfigError;

/// Transport sending the requests with a [`reqwest::Client`].
///
/// Cloning it is cheap, the clones share the same connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default client configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with a total timeout for each request.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map(Self::from)
            .map_err(ConfigError::Transport)
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let Request { method, url, body } = request;

        let mut builder = self.client.request(method, url);

        if let Some(body) = body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        trace!("sending HTTP request");

        let res = builder.send().await?;

        let status = res.status();

        trace!(%status, "received response");

        let body = res
            .bytes()
            .await
            .map_err(|err| TransportError::Body(err.into()))?;

        Ok(Response { status, body })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // a connect timeout is both, report it as a timeout
        if err.is_timeout() {
            TransportError::Timeout(err.into())
        } else if err.is_connect() {
            TransportError::Connect(err.into())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.into())
        } else {
            TransportError::Request(err.into())
        }
    }
}
