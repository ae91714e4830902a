// Greeter Client
// SPDX-FileCopyrightText: 2025 Yuta Takahashi
// SPDX-License-Identifier: MPL-2.0 OR GPL-3.0-or-later

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

#[allow(unused)]
use log::{debug, error, info, warn};

use greeter_client::args::Args;
use greeter_client::{GreetError, greet, sysconfig};

/// Connects to the Greeter service, sends one request and prints the reply.
///
/// # Returns
///
/// Returns [`ExitCode::SUCCESS`] after printing `Greeting: <message>`, or
/// [`ExitCode::FAILURE`] after logging the failing step.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr, stdout only carries the greeting
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.loglevel.to_string())),
        )
        .with_writer(std::io::stderr)
        .with_thread_ids(true)
        .init();

    for line in sysconfig::sysconfig().app_info().lines() {
        debug!("{line}");
    }

    match run(&args).await {
        Ok(message) => {
            println!("Greeting: {message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<GreetError>() {
                Some(greet_error) => error!("{e:#} (phase: {})", greet_error.phase()),
                None => error!("{e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<String> {
    let config = args.client_config()?;
    info!("Greeting {} as {:?}", config.endpoint, config.name);
    Ok(greet(&config).await?)
}
