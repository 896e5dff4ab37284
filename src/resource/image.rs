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

//! Handle the calls to manage the images.

use http::{Method, StatusCode};
use tracing::{debug, error, info, instrument, trace, warn};
use url::Url;

use super::{flag, path_segment, success, unexpected};
use crate::{
    client::RemoteDocker,
    error::DockerError,
    models::{CreateImageProgress, ImageSummary},
    transport::{Request, Transport},
};

/// Images of a remote engine.
#[derive(Debug)]
pub struct Images<'a, T> {
    docker: &'a RemoteDocker<T>,
}

impl<'a, T> Images<'a, T> {
    pub(crate) fn new(docker: &'a RemoteDocker<T>) -> Self {
        Self { docker }
    }

    /// Returns the client the handle was created from.
    pub fn docker(&self) -> &'a RemoteDocker<T> {
        self.docker
    }

    /// Image names contain slashes (`library/alpine`) that are part of the path.
    fn image_endpoint(&self, name: &str, action: Option<&str>) -> Result<Url, DockerError> {
        let parts = name
            .split('/')
            .map(path_segment)
            .collect::<Result<Vec<_>, _>>()?;

        let segments = ["images"].into_iter().chain(parts).chain(action);

        Ok(self.docker.endpoint(segments))
    }
}

impl<'a, T> Images<'a, T>
where
    T: Transport,
{
    /// List the images.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ImageList)
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ImageSummary>, DockerError> {
        let url = self.docker.endpoint(["images", "json"]);

        let res = self
            .docker
            .execute(Request::new(Method::GET, url))
            .await
            .and_then(success)?;

        let images: Vec<ImageSummary> = res.json()?;

        debug!("listed {} images", images.len());

        Ok(images)
    }

    /// Pull an image from the registry.
    ///
    /// The engine streams the progress of the pull, an error can be reported in the stream even
    /// if the response status is a success.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ImageCreate)
    #[instrument(skip(self))]
    pub async fn pull(&self, image: &str, tag: &str) -> Result<(), DockerError> {
        let mut url = self.docker.endpoint(["images", "create"]);
        url.query_pairs_mut()
            .append_pair("fromImage", image)
            .append_pair("tag", tag);

        let res = self
            .docker
            .execute(Request::new(Method::POST, url))
            .await
            .and_then(success)?;

        let lines = res
            .body
            .split(|b| *b == b'\n')
            .filter(|line| !line.iter().all(u8::is_ascii_whitespace));

        for line in lines {
            let progress: CreateImageProgress = serde_json::from_slice(line)?;

            trace!("pulling image: {progress:?}");

            if let Some(err) = progress.error {
                error!("pull of {image}:{tag} failed: {err}");

                return Err(DockerError::Pull(err));
            }
        }

        info!("pulled {image}:{tag}");

        Ok(())
    }

    /// Inspect an image by name or id.
    ///
    /// Returns [`None`] if the image doesn't exist.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ImageInspect)
    #[instrument(skip(self))]
    pub async fn inspect(&self, name: &str) -> Result<Option<serde_json::Value>, DockerError> {
        let url = self.image_endpoint(name, Some("json"))?;

        let res = self.docker.execute(Request::new(Method::GET, url)).await?;

        match res.status {
            status if status.is_success() => {
                let inspect: serde_json::Value = res.json()?;

                trace!("inspected image: {inspect:?}");

                Ok(Some(inspect))
            }
            StatusCode::NOT_FOUND => {
                trace!("image not found: {}", res.error_message());

                Ok(None)
            }
            _ => Err(unexpected(&res)),
        }
    }

    /// Remove an image.
    ///
    /// Returns `false` if the image doesn't exist. Removing an image used by a container fails
    /// with a conflict status unless `force` is set.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/ImageDelete)
    #[instrument(skip(self))]
    pub async fn remove(&self, name: &str, force: bool) -> Result<bool, DockerError> {
        let mut url = self.image_endpoint(name, None)?;
        url.query_pairs_mut().append_pair("force", flag(force));

        let res = self
            .docker
            .execute(Request::new(Method::DELETE, url))
            .await?;

        match res.status {
            status if status.is_success() => {
                info!("removed image {name}");

                Ok(true)
            }
            StatusCode::NOT_FOUND => {
                warn!("image not found: {}", res.error_message());

                Ok(false)
            }
            StatusCode::CONFLICT => {
                error!("cannot remove image in use: {}", res.error_message());

                Err(unexpected(&res))
            }
            _ => Err(unexpected(&res)),
        }
    }
}
