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

//! Handles to the resources managed by the engine.
//!
//! A handle borrows the [`RemoteDocker`](crate::RemoteDocker) it was created from and sends
//! every request through its transport, with the same base URI and API version.

use crate::{error::DockerError, transport::Response};

mod container;
mod image;
mod swarm;

pub use self::container::Containers;
pub use self::image::Images;
pub use self::swarm::Swarm;

/// Error for a status the operation doesn't expect.
pub(crate) fn unexpected(res: &Response) -> DockerError {
    DockerError::Status {
        status: res.status,
        message: res.error_message(),
    }
}

/// Returns the response if it has a success status.
pub(crate) fn success(res: Response) -> Result<Response, DockerError> {
    if res.is_success() {
        Ok(res)
    } else {
        Err(unexpected(&res))
    }
}

/// Check a caller supplied id or name before it becomes a path segment.
///
/// Empty, `.` and `..` segments would be dropped or resolved by the URL, sending the request to
/// another endpoint.
pub(crate) fn path_segment(name: &str) -> Result<&str, DockerError> {
    match name {
        "" | "." | ".." => Err(DockerError::InvalidName(name.to_string())),
        name => Ok(name),
    }
}

/// Value of a boolean query parameter.
pub(crate) fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_segments() {
        for name in ["", ".", ".."] {
            let err = path_segment(name).unwrap_err();

            assert!(matches!(&err, DockerError::InvalidName(n) if n == name), "{err:?}");
        }

        assert_eq!(path_segment("..hidden").unwrap(), "..hidden");
        assert_eq!(path_segment("8dfafdbc3a40").unwrap(), "8dfafdbc3a40");
    }
}
