// Greeter Client
// SPDX-FileCopyrightText: 2025 Yuta Takahashi
// SPDX-License-Identifier: MPL-2.0 OR GPL-3.0-or-later

/// Builds the static application metadata shown at startup.
///
/// # Returns
///
/// Returns a [`SysConfig`] populated from the Cargo manifest.
pub fn sysconfig() -> SysConfig {
    SysConfig {
        app_name: "Greeter Client",
        version: env!("CARGO_PKG_VERSION"),
        authors: env!("CARGO_PKG_AUTHORS"),
        copyright_year: 2025,
    }
}

#[derive(Debug, Clone)]
pub struct SysConfig {
    pub app_name: &'static str,
    pub version: &'static str,
    pub authors: &'static str,
    pub copyright_year: u16,
}

impl SysConfig {
    /// Formats human-readable application metadata for logs.
    ///
    /// # Returns
    ///
    /// Returns a multi-line string summarizing the application identity and licensing.
    pub fn app_info(&self) -> String {
        format!(
            "----------------------------------------\n\
            {} - Version: {}\n\
            Authors: {}\n\
            Copyright {} {}\n\
            \n\
            Licensed under MPL-2.0 OR GPL-3.0-or-later\n\
            ----------------------------------------",
            self.app_name, self.version, self.authors, self.copyright_year, self.authors
        )
    }
}
