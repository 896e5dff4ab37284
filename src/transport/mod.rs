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

//! Request execution capability used by the client.
//!
//! The [`Transport`] only moves bytes: it receives a fully composed [`Request`] and returns the
//! status and body of the [`Response`]. Headers, connection management, timeouts and retries are
//! its own business.

use std::{error::Error as StdError, sync::Arc};

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

mod reqw;

pub use self::reqw::ReqwestTransport;

/// Boxed source of a [`TransportError`].
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Error when the transport couldn't obtain a response at all.
///
/// A response with a non success status is not a transport error.
#[non_exhaustive]
#[derive(Debug, thiserror::Error, displaydoc::Display)]
pub enum TransportError {
    /// couldn't connect to the engine
    Connect(#[source] BoxError),
    /// the request to the engine timed out
    Timeout(#[source] BoxError),
    /// couldn't send the request
    Request(#[source] BoxError),
    /// couldn't read the response body
    Body(#[source] BoxError),
}

/// Request to execute against the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Complete URL, already containing the API version.
    pub url: Url,
    /// JSON encoded body.
    pub body: Option<Bytes>,
}

impl Request {
    /// Create a request without a body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
        }
    }

    /// Set the JSON body of the request.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());

        self
    }
}

/// Response returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code.
    pub status: StatusCode,
    /// Raw body.
    pub body: Bytes,
}

/// Error document returned by the engine on failures.
#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

impl Response {
    /// Create a response.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Deserialize the JSON body.
    pub fn json<T>(&self) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(&self.body)
    }

    /// Message of an error response.
    ///
    /// Falls back to the body as text if it's not the engine's error document.
    pub fn error_message(&self) -> String {
        match serde_json::from_slice::<ErrorMessage>(&self.body) {
            Ok(ErrorMessage { message }) => message,
            Err(_) => String::from_utf8_lossy(&self.body).trim().to_string(),
        }
    }
}

/// Capability to execute a request against the engine.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and wait for the full response.
    async fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        (**self).execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_from_json() {
        let res = Response::new(
            StatusCode::NOT_FOUND,
            r#"{"message":"No such container: foo"}"#,
        );

        assert_eq!(res.error_message(), "No such container: foo");
    }

    #[test]
    fn error_message_from_text() {
        let res = Response::new(StatusCode::INTERNAL_SERVER_ERROR, "page not found\n");

        assert_eq!(res.error_message(), "page not found");
    }

    #[test]
    fn success_is_2xx() {
        assert!(Response::new(StatusCode::OK, "").is_success());
        assert!(Response::new(StatusCode::NO_CONTENT, "").is_success());
        assert!(!Response::new(StatusCode::NOT_MODIFIED, "").is_success());
        assert!(!Response::new(StatusCode::NOT_FOUND, "").is_success());
    }

    #[tokio::test]
    async fn shared_transport() {
        let mut mock = crate::mock::MockTransport::new();

        mock.expect_execute()
            .times(2)
            .returning(|_| Ok(Response::new(StatusCode::OK, "OK")));

        let transport = Arc::new(mock);
        let url = Url::parse("http://localhost/v1.35/_ping").unwrap();

        for _ in 0..2 {
            let res = Arc::clone(&transport)
                .execute(Request::new(Method::GET, url.clone()))
                .await
                .unwrap();

            assert_eq!(res.body, "OK");
        }
    }
}
