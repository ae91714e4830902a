// Greeter Client
// SPDX-FileCopyrightText: 2025 Yuta Takahashi
// SPDX-License-Identifier: MPL-2.0 OR GPL-3.0-or-later

//! Unary `Greeter/SayHello` invocation.
//!
//! The call flow is strictly linear:
//! `Disconnected -> Connecting -> Connected -> Calling -> {Succeeded | Failed} -> Closed`.
//! The channel is owned by [`greet`] and dropped before it returns, so the
//! connection is released on every exit path.

use std::fmt;
use std::time::{Duration, Instant};

use greeter_grpc::hello_world::HelloRequest;
use greeter_grpc::hello_world::greeter_client::GreeterClient;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request};
use tracing::{debug, instrument};

use crate::error::GreetError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:50051";
pub const DEFAULT_NAME: &str = "El Mehdi";
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(1);

/// States of a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    Connected,
    Calling,
    Succeeded,
    Failed,
    Closed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Disconnected => "disconnected",
            Phase::Connecting => "connecting",
            Phase::Connected => "connected",
            Phase::Calling => "calling",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
            Phase::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Parameters of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub name: String,
    pub deadline: Duration,
    /// `None` blocks until the connection succeeds or fails.
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            name: DEFAULT_NAME.to_string(),
            deadline: DEFAULT_DEADLINE,
            connect_timeout: None,
        }
    }
}

/// Accepts both `host:port` and full URIs; a bare address gets `http://`.
pub fn endpoint_uri(endpoint: &str) -> String {
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}

/// Opens a plaintext channel to the configured endpoint.
///
/// # Arguments
///
/// * `config` - Endpoint and optional connect timeout.
///
/// # Returns
///
/// Returns a ready [`GreeterClient`], or a connection-class [`GreetError`]. No retry is attempted.
pub async fn connect(config: &ClientConfig) -> Result<GreeterClient<Channel>, GreetError> {
    let uri = endpoint_uri(&config.endpoint);
    let endpoint =
        Endpoint::from_shared(uri.clone()).map_err(|source| GreetError::InvalidEndpoint {
            endpoint: uri.clone(),
            source,
        })?;

    let connecting = endpoint.connect();
    let channel = match config.connect_timeout {
        Some(timeout) => tokio::time::timeout(timeout, connecting)
            .await
            .map_err(|_| GreetError::ConnectTimeout {
                endpoint: uri.clone(),
                timeout,
            })?,
        None => connecting.await,
    }
    .map_err(|source| GreetError::Connection {
        endpoint: uri.clone(),
        source,
    })?;

    Ok(GreeterClient::new(channel))
}

/// Sends one `SayHello` request and waits at most `deadline` for the reply.
///
/// The deadline is enforced locally and also sent to the server as
/// `grpc-timeout`. When it fires the in-flight call is dropped.
pub async fn say_hello(
    client: &mut GreeterClient<Channel>,
    name: &str,
    deadline: Duration,
) -> Result<String, GreetError> {
    let mut request = Request::new(HelloRequest {
        name: name.to_string(),
    });
    request.set_timeout(deadline);

    let started = Instant::now();
    match tokio::time::timeout(deadline, client.say_hello(request)).await {
        Err(_) => Err(GreetError::DeadlineExceeded { deadline }),
        Ok(Ok(response)) => Ok(response.into_inner().message),
        Ok(Err(status)) => match status.code() {
            Code::DeadlineExceeded => Err(GreetError::DeadlineExceeded { deadline }),
            // tonic servers answer an expired grpc-timeout with CANCELLED
            Code::Cancelled if started.elapsed() >= deadline => {
                Err(GreetError::DeadlineExceeded { deadline })
            }
            _ => Err(GreetError::Call(status)),
        },
    }
}

/// Runs the whole flow: connect, call once, release the channel.
///
/// # Arguments
///
/// * `config` - The invocation parameters.
///
/// # Returns
///
/// Returns the reply's `message` field, or the first error encountered.
#[instrument(skip(config), fields(endpoint = %config.endpoint))]
pub async fn greet(config: &ClientConfig) -> Result<String, GreetError> {
    transition(Phase::Disconnected, Phase::Connecting);
    let mut client = match connect(config).await {
        Ok(client) => client,
        Err(e) => {
            transition(Phase::Connecting, Phase::Failed);
            transition(Phase::Failed, Phase::Closed);
            return Err(e);
        }
    };
    transition(Phase::Connecting, Phase::Connected);

    transition(Phase::Connected, Phase::Calling);
    let outcome = say_hello(&mut client, &config.name, config.deadline).await;
    let terminal = if outcome.is_ok() {
        Phase::Succeeded
    } else {
        Phase::Failed
    };
    transition(Phase::Calling, terminal);

    drop(client);
    transition(terminal, Phase::Closed);

    outcome
}

fn transition(from: Phase, to: Phase) {
    debug!(%from, %to, "greeter client phase");
}
