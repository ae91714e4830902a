// Greeter Client
// SPDX-FileCopyrightText: 2025 Yuta Takahashi
// SPDX-License-Identifier: MPL-2.0 OR GPL-3.0-or-later

use std::time::Duration;

use tonic::Status;

use crate::client::Phase;

/// Errors returned by a single greeting invocation.
#[derive(Debug, thiserror::Error)]
pub enum GreetError {
    /// The endpoint string is not a valid URI.
    #[error("did not connect: invalid endpoint {endpoint}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// The endpoint is unreachable or the HTTP/2 handshake failed.
    #[error("did not connect to {endpoint}")]
    Connection {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("did not connect to {endpoint}: timed out after {timeout:?}")]
    ConnectTimeout { endpoint: String, timeout: Duration },

    /// The call did not complete within its deadline.
    #[error("could not greet: deadline exceeded after {deadline:?}")]
    DeadlineExceeded { deadline: Duration },

    /// Any other status reported for the call, local or remote.
    #[error("could not greet: {:?}: {}", .0.code(), .0.message())]
    Call(Status),
}

impl GreetError {
    /// Returns the phase of the call flow in which the error occurred.
    pub fn phase(&self) -> Phase {
        if self.is_connection() {
            Phase::Connecting
        } else {
            Phase::Calling
        }
    }

    /// Connection errors mean no call was attempted.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            GreetError::InvalidEndpoint { .. }
                | GreetError::Connection { .. }
                | GreetError::ConnectTimeout { .. }
        )
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, GreetError::DeadlineExceeded { .. })
    }

    /// Returns the gRPC status of a failed call, if the failure carried one.
    pub fn status(&self) -> Option<&Status> {
        match self {
            GreetError::Call(status) => Some(status),
            _ => None,
        }
    }
}
