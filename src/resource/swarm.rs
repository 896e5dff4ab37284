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

//! Handle the calls to manage the swarm.

use http::{Method, StatusCode};
use tracing::{debug, info, instrument};

use super::{flag, success, unexpected};
use crate::{
    client::RemoteDocker,
    error::DockerError,
    models::{SwarmInfo, SwarmInitRequest},
    transport::{Request, Transport},
};

/// Swarm of a remote engine.
#[derive(Debug)]
pub struct Swarm<'a, T> {
    docker: &'a RemoteDocker<T>,
}

impl<'a, T> Swarm<'a, T> {
    pub(crate) fn new(docker: &'a RemoteDocker<T>) -> Self {
        Self { docker }
    }

    /// Returns the client the handle was created from.
    pub fn docker(&self) -> &'a RemoteDocker<T> {
        self.docker
    }
}

impl<'a, T> Swarm<'a, T>
where
    T: Transport,
{
    /// Inspect the swarm.
    ///
    /// Returns [`None`] if the engine is not part of a swarm.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/SwarmInspect)
    #[instrument(skip(self))]
    pub async fn inspect(&self) -> Result<Option<SwarmInfo>, DockerError> {
        let url = self.docker.endpoint(["swarm"]);

        let res = self.docker.execute(Request::new(Method::GET, url)).await?;

        match res.status {
            status if status.is_success() => res.json().map(Some).map_err(DockerError::from),
            StatusCode::NOT_FOUND | StatusCode::SERVICE_UNAVAILABLE => {
                debug!("not part of a swarm: {}", res.error_message());

                Ok(None)
            }
            _ => Err(unexpected(&res)),
        }
    }

    /// Initialize a new swarm with this engine as manager.
    ///
    /// Returns the id of the node.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/SwarmInit)
    #[instrument(skip(self))]
    pub async fn init(
        &self,
        listen_addr: &str,
        advertise_addr: Option<&str>,
    ) -> Result<String, DockerError> {
        let url = self.docker.endpoint(["swarm", "init"]);

        let body = serde_json::to_vec(&SwarmInitRequest {
            listen_addr,
            advertise_addr,
        })
        .map_err(DockerError::Encode)?;

        let res = self
            .docker
            .execute(Request::new(Method::POST, url).with_body(body))
            .await
            .and_then(success)?;

        let node_id: String = res.json()?;

        info!("swarm initialized, node {node_id}");

        Ok(node_id)
    }

    /// Leave the swarm.
    ///
    /// Returns `false` if the engine was not part of a swarm.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/SwarmLeave)
    #[instrument(skip(self))]
    pub async fn leave(&self, force: bool) -> Result<bool, DockerError> {
        let mut url = self.docker.endpoint(["swarm", "leave"]);
        url.query_pairs_mut().append_pair("force", flag(force));

        let res = self.docker.execute(Request::new(Method::POST, url)).await?;

        match res.status {
            status if status.is_success() => {
                info!("left the swarm");

                Ok(true)
            }
            StatusCode::SERVICE_UNAVAILABLE => {
                debug!("not part of a swarm: {}", res.error_message());

                Ok(false)
            }
            _ => Err(unexpected(&res)),
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::tests::{docker, get, post};
    use crate::mock::MockTransport;
    use crate::models::JoinTokens;
    use crate::transport::Response;

    #[tokio::test]
    async fn inspect_swarm() {
        let mut mock = MockTransport::new();

        mock.expect_execute()
            .with(predicate::eq(get("http://localhost/v1.35/swarm")))
            .once()
            .returning(|_| {
                Ok(Response::new(
                    StatusCode::OK,
                    r#"{"ID":"abajmipo7b4xz5ip2nrla6b11","CreatedAt":"2016-08-18T10:44:24.496525531Z","JoinTokens":{"Worker":"SWMTKN-1-w","Manager":"SWMTKN-1-m"}}"#,
                ))
            });

        let docker = docker(mock);

        let swarm = docker.swarm().inspect().await.unwrap().expect("no swarm");

        let exp = SwarmInfo {
            id: "abajmipo7b4xz5ip2nrla6b11".to_string(),
            created_at: Some("2016-08-18T10:44:24.496525531Z".to_string()),
            join_tokens: Some(JoinTokens {
                worker: "SWMTKN-1-w".to_string(),
                manager: "SWMTKN-1-m".to_string(),
            }),
        };

        assert_eq!(swarm, exp);
    }

    #[tokio::test]
    async fn inspect_not_in_swarm() {
        let mut mock = MockTransport::new();

        mock.expect_execute().once().returning(|_| {
            Ok(Response::new(
                StatusCode::SERVICE_UNAVAILABLE,
                r#"{"message":"This node is not a swarm manager."}"#,
            ))
        });

        let docker = docker(mock);

        assert_eq!(docker.swarm().inspect().await.unwrap(), None);
    }

    #[tokio::test]
    async fn init_swarm() {
        let mut mock = MockTransport::new();

        let exp = post("http://localhost/v1.35/swarm/init")
            .with_body(r#"{"ListenAddr":"0.0.0.0:2377","AdvertiseAddr":"192.168.1.1"}"#);

        mock.expect_execute()
            .with(predicate::eq(exp))
            .once()
            .returning(|_| {
                Ok(Response::new(
                    StatusCode::OK,
                    r#""7v2t30z9blmxuhnyo6s4cpenp""#,
                ))
            });

        let docker = docker(mock);

        let node = docker
            .swarm()
            .init("0.0.0.0:2377", Some("192.168.1.1"))
            .await
            .unwrap();

        assert_eq!(node, "7v2t30z9blmxuhnyo6s4cpenp");
    }

    #[tokio::test]
    async fn init_already_in_swarm() {
        let mut mock = MockTransport::new();

        mock.expect_execute().once().returning(|_| {
            Ok(Response::new(
                StatusCode::SERVICE_UNAVAILABLE,
                r#"{"message":"node is already part of a swarm"}"#,
            ))
        });

        let docker = docker(mock);

        let err = docker.swarm().init("0.0.0.0:2377", None).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn leave_swarm() {
        let mut mock = MockTransport::new();
        let mut seq = mockall::Sequence::new();

        mock.expect_execute()
            .with(predicate::eq(post(
                "http://localhost/v1.35/swarm/leave?force=true",
            )))
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Ok(Response::new(StatusCode::OK, "")));

        mock.expect_execute()
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Ok(Response::new(StatusCode::SERVICE_UNAVAILABLE, "")));

        let docker = docker(mock);

        assert!(docker.swarm().leave(true).await.unwrap());
        assert!(!docker.swarm().leave(true).await.unwrap());
    }
}
