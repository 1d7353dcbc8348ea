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
use tracing::debug;

use super::feature::WalkPlan;
use crate::jsonmap;
use crate::{Redfish, RedfishError};

/// Follow `plan` from the service root and return the `@odata.id` it ends at.
///
/// `Ok(None)` when the controller does not expose the top-level collection the
/// walk starts from, or that collection has no members. A link missing anywhere
/// further down is a `Resolution` error naming `feature`. The final link is
/// returned without being fetched.
pub async fn walk(
    session: &dyn Redfish,
    feature: &str,
    plan: &WalkPlan,
) -> Result<Option<String>, RedfishError> {
    let root_url = "/redfish/v1/";
    let root = jsonmap::as_object(session.root(), root_url)
        .map_err(|e| to_resolution(feature, e))?;
    if !root.contains_key(&plan.root) {
        debug!("{feature}: service root has no {}", plan.root);
        return Ok(None);
    }
    let mut link = jsonmap::odata_id(root, &plan.root, root_url)
        .map_err(|e| to_resolution(feature, e))?
        .to_string();

    if plan.first_member {
        let (_, collection) = session.get(&link).await?;
        let map = jsonmap::as_object(&collection, &link).map_err(|e| to_resolution(feature, e))?;
        let members = jsonmap::get_array(map, "Members", &link)
            .map_err(|e| to_resolution(feature, e))?;
        let Some(first) = members.first() else {
            debug!("{feature}: {link} has no members");
            return Ok(None);
        };
        let first = first
            .get("@odata.id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| RedfishError::resolution(feature, &link, "Members[0] has no @odata.id"))?;
        link = first.to_string();
    }

    for hop in &plan.hops {
        let (_, doc) = session.get(&link).await?;
        let next = jsonmap::link_at(&doc, hop, &link).map_err(|e| to_resolution(feature, e))?;
        debug!("{feature}: {link} -> {} -> {next}", hop.join("/"));
        link = next.to_string();
    }
    Ok(Some(link))
}

fn to_resolution(feature: &str, err: RedfishError) -> RedfishError {
    match err {
        RedfishError::MissingKey { key, url } => {
            RedfishError::resolution(feature, &url, format!("missing key {key}"))
        }
        RedfishError::InvalidKeyType {
            key,
            expected_type,
            url,
        } => RedfishError::resolution(feature, &url, format!("{key} is not a {expected_type}")),
        other => other,
    }
}
