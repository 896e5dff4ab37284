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

//! Client for a remote Docker engine.

use http::Method;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::{
    config::EngineConfig,
    error::{ConfigError, DockerError},
    resource::{Containers, Images, Swarm},
    transport::{ReqwestTransport, Request, Response, Transport},
    version::ApiVersion,
};

/// Docker engine reachable at a base URI.
///
/// The client is immutable: the base URI and the API version are resolved once when it's built.
#[derive(Debug, Clone)]
pub struct RemoteDocker<T = ReqwestTransport> {
    transport: T,
    base_uri: Url,
    version: ApiVersion,
}

impl<T> RemoteDocker<T> {
    /// Create a client using the [default API version](crate::DEFAULT_API_VERSION).
    pub fn new(transport: T, base_uri: &str) -> Result<Self, ConfigError> {
        let base_uri = parse_base_uri(base_uri)?;

        Ok(Self::from_parts(transport, base_uri, ApiVersion::default()))
    }

    /// Create a client with an explicit API version.
    ///
    /// The version is used verbatim in every request path.
    pub fn with_version(
        transport: T,
        base_uri: &str,
        version: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_uri = parse_base_uri(base_uri)?;
        let version = ApiVersion::new(version)?;

        Ok(Self::from_parts(transport, base_uri, version))
    }

    /// Create a client from the configuration, with the given transport.
    pub fn from_config(transport: T, config: &EngineConfig) -> Result<Self, ConfigError> {
        match &config.version {
            Some(version) => Self::with_version(transport, config.url.as_str(), version.clone()),
            None => Self::new(transport, config.url.as_str()),
        }
    }

    fn from_parts(transport: T, base_uri: Url, version: ApiVersion) -> Self {
        debug!(%base_uri, %version, "created remote docker client");

        Self {
            transport,
            base_uri,
            version,
        }
    }

    /// Returns the API version embedded in the request paths.
    ///
    /// This never contacts the engine.
    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Returns the base URI of the engine.
    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// Returns the transport used by the client.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the URL `{base_uri}/{version}/{segments}` for a request.
    ///
    /// Each segment is percent encoded.
    pub(crate) fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_uri.clone();

        // the base URI is always http(s) with a host, so it can be a base
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(self.version.as_str()).extend(segments);
        }

        url
    }
}

impl RemoteDocker<ReqwestTransport> {
    /// Create a client with a [`ReqwestTransport`] built from the configuration.
    pub fn connect(config: &EngineConfig) -> Result<Self, ConfigError> {
        let transport = config.transport()?;

        Self::from_config(transport, config)
    }
}

impl<T> RemoteDocker<T>
where
    T: Transport,
{
    /// Check that the engine is reachable.
    ///
    /// Returns `true` if the engine responds with a success status and `false` for any other
    /// status. An error is returned only if no response could be obtained.
    ///
    /// See the [Docker API reference](https://docs.docker.com/engine/api/v1.35/#operation/SystemPing)
    #[instrument(skip_all, fields(base_uri = %self.base_uri))]
    pub async fn ping(&self) -> Result<bool, DockerError> {
        let url = self.endpoint(["_ping"]);

        let res = self.execute(Request::new(Method::GET, url)).await?;

        if !res.is_success() {
            debug!(status = %res.status, "engine ping failed");
        }

        Ok(res.is_success())
    }

    /// Access the containers of the engine.
    pub fn containers(&self) -> Containers<'_, T> {
        Containers::new(self)
    }

    /// Access the images of the engine.
    pub fn images(&self) -> Images<'_, T> {
        Images::new(self)
    }

    /// Access the swarm the engine is part of.
    pub fn swarm(&self) -> Swarm<'_, T> {
        Swarm::new(self)
    }

    /// Send the request through the transport.
    pub(crate) async fn execute(&self, request: Request) -> Result<Response, DockerError> {
        trace!(method = %request.method, url = %request.url, "executing request");

        let res = self.transport.execute(request).await?;

        trace!(status = %res.status, "request executed");

        Ok(res)
    }
}

fn parse_base_uri(base_uri: &str) -> Result<Url, ConfigError> {
    if base_uri.trim().is_empty() {
        return Err(ConfigError::EmptyUri);
    }

    let url = Url::parse(base_uri)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Scheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::MissingHost(url.to_string()));
    }

    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::UnexpectedComponent(url.to_string()));
    }

    Ok(url)
}

#[cfg(test)]
pub(crate) mod tests {
    use http::StatusCode;
    use mockall::predicate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::MockTransport;
    use crate::transport::TransportError;

    /// Creates a client for `http://localhost` with the given mock.
    pub(crate) fn docker(mock: MockTransport) -> RemoteDocker<MockTransport> {
        RemoteDocker::new(mock, "http://localhost").unwrap()
    }

    pub(crate) fn get(url: &str) -> Request {
        Request::new(Method::GET, Url::parse(url).unwrap())
    }

    pub(crate) fn post(url: &str) -> Request {
        Request::new(Method::POST, Url::parse(url).unwrap())
    }

    pub(crate) fn refused() -> TransportError {
        TransportError::Connect(Box::new(std::io::Error::from(
            std::io::ErrorKind::ConnectionRefused,
        )))
    }

    #[test]
    fn returns_default_version() {
        let docker = RemoteDocker::new(MockTransport::new(), "http://localhost").unwrap();

        assert_eq!(docker.version(), "v1.35");
    }

    #[test]
    fn returns_explicit_version() {
        let docker =
            RemoteDocker::with_version(MockTransport::new(), "http://localhost", "v1.37").unwrap();

        assert_eq!(docker.version(), "v1.37");
    }

    #[test]
    fn invalid_base_uri() {
        let cases = [
            "",
            "   ",
            "localhost",
            "ftp://localhost",
            "unix:///var/run/docker.sock",
            "http://localhost/v1.35",
            "http://localhost/?a=b",
            "http://localhost/#frag",
        ];

        for uri in cases {
            let res = RemoteDocker::new(MockTransport::new(), uri);

            assert!(res.is_err(), "accepted invalid base uri {uri:?}");
        }
    }

    #[test]
    fn invalid_version() {
        let err = RemoteDocker::with_version(MockTransport::new(), "http://localhost", "v1/37")
            .unwrap_err();

        assert!(matches!(err, ConfigError::Version(v) if v == "v1/37"));
    }

    #[test]
    fn endpoint_composition() {
        let docker =
            RemoteDocker::with_version(MockTransport::new(), "http://localhost:2375/", "v1.43")
                .unwrap();

        assert_eq!(
            docker.endpoint(["containers", "json"]).as_str(),
            "http://localhost:2375/v1.43/containers/json"
        );
        assert_eq!(
            docker.endpoint(["containers", "my container", "json"]).as_str(),
            "http://localhost:2375/v1.43/containers/my%20container/json"
        );
        assert_eq!(
            docker.endpoint(Vec::<String>::new()).as_str(),
            "http://localhost:2375/v1.43"
        );
    }

    #[test]
    fn from_config() {
        let mut config = EngineConfig::new(Url::parse("http://remotedocker:2375").unwrap());

        let docker = RemoteDocker::from_config(MockTransport::new(), &config).unwrap();
        assert_eq!(docker.version(), "v1.35");
        assert_eq!(docker.base_uri().as_str(), "http://remotedocker:2375/");

        config.version = Some("v1.41".to_string());

        let docker = RemoteDocker::from_config(MockTransport::new(), &config).unwrap();
        assert_eq!(docker.version(), "v1.41");
    }

    #[tokio::test]
    async fn ping_true_if_response_is_ok() {
        let mut mock = MockTransport::new();

        mock.expect_execute()
            .with(predicate::eq(get("http://remotedocker/v1.35/_ping")))
            .once()
            .returning(|_| Ok(Response::new(StatusCode::OK, "OK")));

        let docker = RemoteDocker::new(mock, "http://remotedocker").unwrap();

        assert!(docker.ping().await.unwrap());
    }

    #[tokio::test]
    async fn ping_uses_explicit_version() {
        let mut mock = MockTransport::new();

        mock.expect_execute()
            .with(predicate::eq(get("http://remotedocker/v1.37/_ping")))
            .once()
            .returning(|_| Ok(Response::new(StatusCode::OK, "OK")));

        let docker = RemoteDocker::with_version(mock, "http://remotedocker", "v1.37").unwrap();

        assert!(docker.ping().await.unwrap());
    }

    #[tokio::test]
    async fn ping_false_if_response_is_not_ok() {
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let mut mock = MockTransport::new();

            mock.expect_execute()
                .once()
                .returning(move |_| Ok(Response::new(status, "")));

            let docker = RemoteDocker::new(mock, "http://remotedocker").unwrap();

            assert!(!docker.ping().await.unwrap(), "ping true for {status}");
        }
    }

    #[tokio::test]
    async fn ping_true_for_any_success_status() {
        for status in [StatusCode::NO_CONTENT, StatusCode::ACCEPTED] {
            let mut mock = MockTransport::new();

            mock.expect_execute()
                .once()
                .returning(move |_| Ok(Response::new(status, "")));

            let docker = RemoteDocker::new(mock, "http://remotedocker").unwrap();

            assert!(docker.ping().await.unwrap(), "ping false for {status}");
        }
    }

    #[tokio::test]
    async fn ping_false_for_redirect() {
        for status in [
            StatusCode::MOVED_PERMANENTLY,
            StatusCode::NOT_MODIFIED,
            StatusCode::TEMPORARY_REDIRECT,
        ] {
            let mut mock = MockTransport::new();

            mock.expect_execute()
                .once()
                .returning(move |_| Ok(Response::new(status, "")));

            let docker = RemoteDocker::new(mock, "http://remotedocker").unwrap();

            assert!(!docker.ping().await.unwrap(), "ping true for {status}");
        }
    }

    #[tokio::test]
    async fn ping_propagates_transport_error() {
        let mut mock = MockTransport::new();

        mock.expect_execute().once().returning(|_| Err(refused()));

        let docker = RemoteDocker::new(mock, "http://remotedocker").unwrap();

        let err = docker.ping().await.unwrap_err();

        assert!(
            matches!(err, DockerError::Transport(TransportError::Connect(_))),
            "{err:?}"
        );
    }

    #[test]
    fn returns_resource_handles() {
        // no request must be sent while creating the handles
        let docker = docker(MockTransport::new());

        let containers = docker.containers();
        let images = docker.images();
        let swarm = docker.swarm();

        assert_eq!(containers.docker().version(), "v1.35");
        assert_eq!(images.docker().version(), "v1.35");
        assert_eq!(swarm.docker().version(), "v1.35");

        // handles can be created again from the same client
        let _ = docker.containers();
        let _ = docker.images();
        let _ = docker.swarm();
    }
}
