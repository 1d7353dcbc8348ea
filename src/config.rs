/*
 * SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
//! TOML configuration.
//!
//! ```toml
//! [endpoint]
//! host = "10.0.0.100"
//! user = "admin"
//! password = "password"
//! auth = "session"          # or "basic"
//!
//! [locator]
//! force_manual = false
//! match_mode = "substring"  # or "segment"
//!
//! [[feature]]
//! name = "Iscsi"
//! odata_type = "#HpeiSCSISoftwareInitiator."
//! walk = { root = "Systems", first_member = true, hops = ["Bios", "Oem/Hpe/Links/iScsi"] }
//! ```
//!
//! Every section is optional. Command line flags are applied on top.

use std::{path::Path, time::Duration};

use serde::Deserialize;
use tracing::debug;

use crate::locator::{FeatureSpec, FeatureTable, LocateOptions, Locator, MatchMode};
use crate::network::{Endpoint, RedfishClientPool, RedfishClientPoolBuilder, Scheme};
use crate::session::{AuthMethod, RESET_GRACE_PERIOD};
use crate::RedfishError;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub locator: LocatorConfig,
    /// Extra features on top of the built-in table.
    #[serde(default)]
    pub feature: Vec<FeatureSpec>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub auth: AuthMethod,
    /// Talk plain HTTP. Mockup servers only.
    #[serde(default)]
    pub insecure_http: bool,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub reject_invalid_certs: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocatorConfig {
    #[serde(default)]
    pub force_manual: bool,
    #[serde(default)]
    pub match_mode: MatchMode,
    /// How long to wait after an iLO reset before logging in again.
    #[serde(default = "default_reset_grace_secs")]
    pub reset_grace_secs: u64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        LocatorConfig {
            force_manual: false,
            match_mode: MatchMode::default(),
            reset_grace_secs: default_reset_grace_secs(),
        }
    }
}

fn default_reset_grace_secs() -> u64 {
    RESET_GRACE_PERIOD.as_secs()
}

impl Config {
    pub fn from_toml_str(s: &str, path: &str) -> Result<Config, RedfishError> {
        toml::from_str(s).map_err(|e| RedfishError::Config {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Config, RedfishError> {
        let content = std::fs::read_to_string(path).map_err(|e| RedfishError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_toml_str(&content, &path.display().to_string())?;
        debug!(
            "Loaded {} with {} extra feature(s)",
            path.display(),
            config.feature.len()
        );
        Ok(config)
    }

    /// The endpoint to connect to. A host is required.
    pub fn endpoint(&self) -> Result<Endpoint, RedfishError> {
        let host = self
            .endpoint
            .host
            .clone()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| RedfishError::Config {
                path: "endpoint.host".to_string(),
                reason: "no host given".to_string(),
            })?;
        Ok(Endpoint {
            host,
            port: self.endpoint.port,
            user: self.endpoint.user.clone(),
            password: self.endpoint.password.clone(),
            scheme: if self.endpoint.insecure_http {
                Scheme::Http
            } else {
                Scheme::Https
            },
        })
    }

    pub fn pool_builder(&self) -> RedfishClientPoolBuilder {
        let mut builder = RedfishClientPool::builder();
        if let Some(secs) = self.endpoint.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if self.endpoint.reject_invalid_certs {
            builder = builder.reject_invalid_certs();
        }
        builder
    }

    /// Built-in features plus the `[[feature]]` entries, validated.
    pub fn locator(&self) -> Result<Locator, RedfishError> {
        let table = FeatureTable::with_extra(self.feature.clone())?;
        Ok(Locator::new(
            table,
            LocateOptions {
                force_manual: self.locator.force_manual,
                match_mode: self.locator.match_mode,
            },
        ))
    }

    pub fn reset_grace(&self) -> Duration {
        Duration::from_secs(self.locator.reset_grace_secs)
    }
}
