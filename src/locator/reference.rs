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
use std::fmt;

use serde::Serialize;

use crate::RedfishError;

/// A resource path on the controller the session is connected to,
/// e.g. `/redfish/v1/systems/1/bios/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceRef(String);

impl ResourceRef {
    /// Turn an `@odata.id` into a reference under `origin`.
    ///
    /// Paths are taken as they are. Absolute URLs are accepted only when they
    /// name `origin` and are reduced to their path.
    pub fn resolve(origin: &str, link: &str, feature: &str) -> Result<ResourceRef, RedfishError> {
        if link.starts_with('/') {
            return Ok(ResourceRef(link.to_string()));
        }
        let Ok(url) = url::Url::parse(link) else {
            return Err(RedfishError::resolution(
                feature,
                link,
                "link is neither a path nor an absolute URL",
            ));
        };
        let ours = url::Url::parse(origin).map_err(|e| {
            RedfishError::resolution(feature, origin, format!("bad session origin: {e}"))
        })?;
        if url.origin() != ours.origin() {
            return Err(RedfishError::resolution(
                feature,
                link,
                format!("link points outside {origin}"),
            ));
        }
        let mut path = url.path().to_string();
        if let Some(q) = url.query() {
            path.push('?');
            path.push_str(q);
        }
        Ok(ResourceRef(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The `<path>/settings/` resource holding pending changes for this one.
    pub fn settings_path(&self) -> String {
        format!("{}/settings/", self.0.trim_end_matches('/'))
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
