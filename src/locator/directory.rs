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
use tracing::debug;

use crate::model::{ResourceDirectory, ServiceRoot};
use crate::{Redfish, RedfishError};

/// Fetch the HPE resource directory.
///
/// `DirectoryUnavailable` when the root document has no link to one, or the
/// directory lists nothing. `DirectoryFetch` when the link is there but the GET
/// does not return a document. Other transport failures propagate unchanged.
pub async fn fetch(session: &dyn Redfish) -> Result<ResourceDirectory, RedfishError> {
    let root: ServiceRoot = serde_json::from_value(session.root().clone()).map_err(|e| {
        RedfishError::resolution("ResourceDirectory", "/redfish/v1/", e.to_string())
    })?;
    let Some(uri) = root.resource_directory() else {
        debug!("No resource directory in the service root");
        return Err(RedfishError::DirectoryUnavailable);
    };

    let (status_code, body) = match session.get(uri).await {
        Ok(r) => r,
        Err(RedfishError::HTTPErrorCode {
            url, status_code, ..
        }) => return Err(RedfishError::DirectoryFetch { url, status_code }),
        Err(RedfishError::NoContent) => {
            return Err(RedfishError::DirectoryFetch {
                url: uri.to_string(),
                status_code: StatusCode::NO_CONTENT,
            })
        }
        Err(e) => return Err(e),
    };
    if status_code != StatusCode::OK {
        return Err(RedfishError::DirectoryFetch {
            url: uri.to_string(),
            status_code,
        });
    }

    let directory: ResourceDirectory = serde_json::from_value(body)
        .map_err(|e| RedfishError::resolution("ResourceDirectory", uri, e.to_string()))?;
    if directory.is_empty() {
        debug!("Resource directory at {uri} lists no instances");
        return Err(RedfishError::DirectoryUnavailable);
    }
    debug!(
        "Resource directory at {uri} has {} instances",
        directory.instances.len()
    );
    Ok(directory)
}
