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
use reqwest::{header::HeaderMap, StatusCode};

pub mod actions;
pub mod config;
mod error;
pub mod jsonmap;
pub mod locator;
pub mod model;
mod network;
mod session;

pub use config::Config;
pub use error::RedfishError;
pub use locator::{
    Feature, FeatureSpec, FeatureTable, LocateOptions, Locator, MatchMode, ResourceRef, WalkSpec,
};
pub use network::{
    extended_info_ids, Endpoint, RedfishClientPool, RedfishClientPoolBuilder, RedfishHttpClient,
    RedfishResponse, Scheme, REDFISH_ENDPOINT,
};
pub use session::{AuthMethod, PendingReset, Session, RESET_GRACE_PERIOD};

/// Interface to an iLO Redfish service. Everything except `root` and `origin`
/// makes exactly one HTTP call.
#[async_trait::async_trait]
pub trait Redfish: Send + Sync {
    /// The service root document, fetched once at login.
    fn root(&self) -> &serde_json::Value;

    /// scheme://host[:port] of the controller. References handed out by the
    /// locator are paths below this origin.
    fn origin(&self) -> String;

    /// GET a resource. Fails with `NoContent` if the controller sends no body.
    async fn get(&self, uri: &str) -> Result<(StatusCode, serde_json::Value), RedfishError>;

    async fn patch(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> Result<RedfishResponse, RedfishError>;

    /// PATCH with additional request headers.
    async fn patch_with_headers(
        &self,
        uri: &str,
        body: serde_json::Value,
        headers: HeaderMap,
    ) -> Result<RedfishResponse, RedfishError>;

    async fn post(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> Result<RedfishResponse, RedfishError>;

    async fn delete(&self, uri: &str) -> Result<RedfishResponse, RedfishError>;
}
