// Greeter Client
// SPDX-FileCopyrightText: 2025 Yuta Takahashi
// SPDX-License-Identifier: MPL-2.0 OR GPL-3.0-or-later

pub mod args;
pub mod client;
pub mod error;

/// System Configuration
pub mod sysconfig;

pub use client::{ClientConfig, Phase, greet};
pub use error::GreetError;
