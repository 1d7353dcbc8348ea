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
use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum RedfishError {
    #[error("Network error talking to BMC at {url}. {source}")]
    NetworkError { url: String, source: reqwest::Error },

    #[error("HTTP {status_code} at {url}. {}", extended_info_summary(.extended_info))]
    HTTPErrorCode {
        url: String,
        status_code: StatusCode,
        /// MessageIds from the iLO `error.@Message.ExtendedInfo` array, if any.
        extended_info: Vec<String>,
    },

    #[error("Session rejected at {url}. The token is stale or the controller was reset; log in again.")]
    SessionInvalid { url: String },

    #[error("Login as {user} rejected at {url}. Check the username and password.")]
    LoginRejected { url: String, user: String },

    #[error("Could not deserialize response from {url}. Body: {body}. {source}")]
    JsonDeserializeError {
        url: String,
        body: String,
        source: serde_json::Error,
    },

    #[error("Could not serialize request body for {url}. Obj: {object_debug}. {source}")]
    JsonSerializeError {
        url: String,
        object_debug: String,
        source: serde_json::Error,
    },

    #[error("Remote returned empty body")]
    NoContent,

    #[error("Missing key {key} in JSON at {url}")]
    MissingKey { key: String, url: String },

    #[error("Key {key} should be {expected_type} at {url}")]
    InvalidKeyType {
        key: String,
        expected_type: String,
        url: String,
    },

    #[error("No resource directory link in the service root")]
    DirectoryUnavailable,

    #[error("Resource directory at {url} could not be fetched: HTTP {status_code}")]
    DirectoryFetch {
        url: String,
        status_code: StatusCode,
    },

    #[error("Could not resolve {feature} at {url}: {detail}")]
    Resolution {
        feature: String,
        url: String,
        detail: String,
    },

    #[error("Invalid feature definition {name}: {reason}")]
    InvalidFeature { name: String, reason: String },

    #[error("Unknown feature {0}")]
    UnknownFeature(String),

    #[error("Configuration error in {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("Field {field} has invalid value at {url}: {err}")]
    InvalidValue {
        url: String,
        field: String,
        err: String,
    },

    #[error("Feature not supported by this controller: {0}")]
    NotSupported(String),

    #[error("I/O error on {path}. {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl RedfishError {
    /// Could not talk to the controller, or it refused us. The whole operation
    /// should be aborted.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RedfishError::NetworkError { .. }
                | RedfishError::HTTPErrorCode { .. }
                | RedfishError::SessionInvalid { .. }
                | RedfishError::LoginRejected { .. }
                | RedfishError::JsonDeserializeError { .. }
                | RedfishError::NoContent
        )
    }

    /// The controller answered with a JSON shape we did not expect. Usually a
    /// firmware or schema version mismatch.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            RedfishError::Resolution { .. }
                | RedfishError::MissingKey { .. }
                | RedfishError::InvalidKeyType { .. }
        )
    }

    pub(crate) fn resolution(feature: &str, url: &str, detail: impl Into<String>) -> Self {
        RedfishError::Resolution {
            feature: feature.to_string(),
            url: url.to_string(),
            detail: detail.into(),
        }
    }
}

fn extended_info_summary(ids: &[String]) -> String {
    if ids.is_empty() {
        "See debug logs for details.".to_string()
    } else {
        format!("iLO reported: {}", ids.join(", "))
    }
}
