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
//! Find where a resource type lives on an iLO.
//!
//! The HPE resource directory lists every instance with its type, so when it is
//! there one GET answers any query. Controllers without it (or callers that
//! ask for `force_manual`) get a walk down the standard collections instead,
//! driven by the [`FeatureTable`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

mod directory;
pub mod feature;
mod matcher;
mod reference;
mod walk;

pub use directory::fetch as fetch_directory;
pub use feature::{Feature, FeatureSpec, FeatureTable, Query, WalkPlan, WalkSpec};
pub use matcher::{MatchMode, TypeMatcher};
pub use reference::ResourceRef;

use crate::{Redfish, RedfishError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateOptions {
    /// Skip the resource directory and always walk.
    pub force_manual: bool,
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone)]
pub struct Locator {
    table: FeatureTable,
    options: LocateOptions,
}

impl Locator {
    pub fn new(table: FeatureTable, options: LocateOptions) -> Self {
        Locator { table, options }
    }

    /// Built-in features, default options.
    pub fn builtin() -> Result<Self, RedfishError> {
        Ok(Locator::new(FeatureTable::builtin()?, LocateOptions::default()))
    }

    pub fn table(&self) -> &FeatureTable {
        &self.table
    }

    pub fn options(&self) -> LocateOptions {
        self.options
    }

    /// All references to `target`, a feature name or an OData type fragment.
    /// An empty result means the controller does not have the feature.
    pub async fn locate(
        &self,
        session: &dyn Redfish,
        target: &str,
    ) -> Result<Vec<ResourceRef>, RedfishError> {
        self.locate_with(session, target, &self.options).await
    }

    /// The first reference to `target`, in directory order.
    pub async fn locate_first(
        &self,
        session: &dyn Redfish,
        target: &str,
    ) -> Result<Option<ResourceRef>, RedfishError> {
        Ok(self.locate(session, target).await?.into_iter().next())
    }

    pub async fn locate_with(
        &self,
        session: &dyn Redfish,
        target: &str,
        options: &LocateOptions,
    ) -> Result<Vec<ResourceRef>, RedfishError> {
        let query = self.table.query(target)?;
        let origin = session.origin();

        if !options.force_manual {
            match directory::fetch(session).await {
                Ok(dir) => {
                    let matcher = TypeMatcher::new(
                        &query.odata_type,
                        query.id_contains.as_deref(),
                        options.match_mode,
                    );
                    let found = matcher
                        .select(&dir.instances)
                        .into_iter()
                        .map(|e| ResourceRef::resolve(&origin, &e.odata_id, &query.name))
                        .collect::<Result<Vec<_>, _>>()?;
                    debug!(
                        "{}: {} match(es) in the resource directory",
                        query.name,
                        found.len()
                    );
                    return Ok(found);
                }
                Err(RedfishError::DirectoryUnavailable) => {
                    debug!("{}: no resource directory, walking", query.name);
                }
                Err(err @ RedfishError::DirectoryFetch { .. }) => {
                    warn!("{err}. Trying a manual walk for {}", query.name);
                    let found = self.manual(session, &query, &origin).await?;
                    if found.is_empty() {
                        return Err(err);
                    }
                    return Ok(found);
                }
                Err(err) => return Err(err),
            }
        }
        self.manual(session, &query, &origin).await
    }

    async fn manual(
        &self,
        session: &dyn Redfish,
        query: &Query<'_>,
        origin: &str,
    ) -> Result<Vec<ResourceRef>, RedfishError> {
        let Some(plan) = query.walk else {
            debug!("{}: no walk known for this type", query.name);
            return Ok(Vec::new());
        };
        match walk::walk(session, &query.name, plan).await? {
            Some(link) => Ok(vec![ResourceRef::resolve(origin, &link, &query.name)?]),
            None => Ok(Vec::new()),
        }
    }
}
