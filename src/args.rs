// Greeter Client
// SPDX-FileCopyrightText: 2025 Yuta Takahashi
// SPDX-License-Identifier: MPL-2.0 OR GPL-3.0-or-later

use std::fmt;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use crate::client::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_NAME};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Greeter server address, `host:port` or a full `http://` URI
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Name sent in the request
    #[arg(long, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Deadline for the call in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub deadline_ms: u64,

    /// Give up connecting after this many milliseconds (default: wait for the connect result)
    #[arg(long)]
    pub connect_timeout_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,
}

impl Args {
    /// Builds the invocation parameters, rejecting zero durations.
    pub fn client_config(&self) -> Result<ClientConfig> {
        if self.deadline_ms == 0 {
            bail!("--deadline-ms must be greater than zero");
        }
        if self.connect_timeout_ms == Some(0) {
            bail!("--connect-timeout-ms must be greater than zero");
        }

        Ok(ClientConfig {
            endpoint: self.endpoint.clone(),
            name: self.name.clone(),
            deadline: Duration::from_millis(self.deadline_ms),
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
        })
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(level)
    }
}
