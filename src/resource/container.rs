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

//! Handle the calls to manage the containers.

use http::{Method, StatusCode};
use tracing::{debug, info, instrument, trace, warn};

use super::{flag, path_segment, success, unexpected};
use crate::{
    client::RemoteDocker, error::DockerError, models::ContainerSummary, transport::Request,
    transport::Transport,
};

/// Containers of a remote engine.
#[derive(Debug)]
pub struct Containers<'a, T> {
    docker: &'a RemoteDocker<T>,
}

impl<'a, T> Containers<'a, T> {
    pub(crate) fn new(docker: &'a RemoteDocker<T>) -> Self {
        Self { docker }
    }

    /// Returns the client the handle was created from.
    pub fn docker(&self) -> &'a RemoteDocker<T> {
        self.docker
    }
}

impl<'a, T> Containers<'a, T>
where
    T: Transport,
{
    /// List the containers, only the running ones unless `all` is set.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ContainerList)
    #[instrument(skip(self))]
    pub async fn list(&self, all: bool) -> Result<Vec<ContainerSummary>, DockerError> {
        let mut url = self.docker.endpoint(["containers", "json"]);
        url.query_pairs_mut().append_pair("all", flag(all));

        let res = self
            .docker
            .execute(Request::new(Method::GET, url))
            .await
            .and_then(success)?;

        let containers: Vec<ContainerSummary> = res.json()?;

        debug!("listed {} containers", containers.len());

        Ok(containers)
    }

    /// Inspect a container by id or name.
    ///
    /// Returns [`None`] if the container doesn't exist.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ContainerInspect)
    #[instrument(skip(self))]
    pub async fn inspect(&self, id: &str) -> Result<Option<serde_json::Value>, DockerError> {
        let url = self
            .docker
            .endpoint(["containers", path_segment(id)?, "json"]);

        let res = self.docker.execute(Request::new(Method::GET, url)).await?;

        match res.status {
            status if status.is_success() => {
                let inspect: serde_json::Value = res.json()?;

                trace!("inspected container: {inspect:?}");

                Ok(Some(inspect))
            }
            StatusCode::NOT_FOUND => {
                trace!("container not found: {}", res.error_message());

                Ok(None)
            }
            _ => Err(unexpected(&res)),
        }
    }

    /// Start a container, it's not an error if it's already running.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ContainerStart)
    #[instrument(skip(self))]
    pub async fn start(&self, id: &str) -> Result<(), DockerError> {
        self.post_action(id, "start").await
    }

    /// Stop a container, it's not an error if it's already stopped.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ContainerStop)
    #[instrument(skip(self))]
    pub async fn stop(&self, id: &str) -> Result<(), DockerError> {
        self.post_action(id, "stop").await
    }

    async fn post_action(&self, id: &str, action: &str) -> Result<(), DockerError> {
        let url = self
            .docker
            .endpoint(["containers", path_segment(id)?, action]);

        let res = self.docker.execute(Request::new(Method::POST, url)).await?;

        match res.status {
            StatusCode::NOT_MODIFIED => {
                debug!("container {id} already in the requested state");

                Ok(())
            }
            status if status.is_success() => {
                info!("container {id} {action} done");

                Ok(())
            }
            _ => Err(unexpected(&res)),
        }
    }

    /// Remove a container.
    ///
    /// Returns `false` if the container doesn't exist.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ContainerDelete)
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str, force: bool) -> Result<bool, DockerError> {
        let mut url = self.docker.endpoint(["containers", path_segment(id)?]);
        url.query_pairs_mut().append_pair("force", flag(force));

        let res = self
            .docker
            .execute(Request::new(Method::DELETE, url))
            .await?;

        match res.status {
            status if status.is_success() => {
                info!("removed container {id}");

                Ok(true)
            }
            StatusCode::NOT_FOUND => {
                warn!("container not found: {}", res.error_message());

                Ok(false)
            }
            _ => Err(unexpected(&res)),
        }
    }
}
