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
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::RedfishError;

/// Root document links a manual walk may start from.
pub const TOP_LEVEL_LINKS: &[&str] = &[
    "Systems",
    "Managers",
    "Chassis",
    "AccountService",
    "UpdateService",
    "Registries",
    "JsonSchemas",
    "SessionService",
    "EventService",
    "TaskService",
];

/// Collections that hold exactly one member on an iLO, so "take the first" is safe.
const SINGLE_MEMBER_COLLECTIONS: &[&str] = &["Systems", "Managers", "Chassis"];

/// A feature as written in configuration. Hops are '/' separated key paths,
/// e.g. `"Oem/Hpe/Links/DateTimeService"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureSpec {
    pub name: String,
    pub odata_type: String,
    #[serde(default)]
    pub id_contains: Option<String>,
    #[serde(default)]
    pub walk: Option<WalkSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalkSpec {
    pub root: String,
    #[serde(default)]
    pub first_member: bool,
    #[serde(default)]
    pub hops: Vec<String>,
}

/// A validated feature: how to recognise it in the resource directory and how
/// to reach it without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    /// OData type fragment, e.g. `#Bios.`
    pub odata_type: String,
    /// Only directory entries whose @odata.id contains this (case-insensitive).
    /// Tells apart types that appear under more than one parent.
    pub id_contains: Option<String>,
    pub walk: Option<WalkPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkPlan {
    pub root: String,
    pub first_member: bool,
    pub hops: Vec<Vec<String>>,
}

impl WalkPlan {
    /// Number of GETs the walk issues. The service root is already held by the session.
    pub fn request_count(&self) -> usize {
        usize::from(self.first_member) + self.hops.len()
    }
}

impl TryFrom<FeatureSpec> for Feature {
    type Error = RedfishError;

    fn try_from(spec: FeatureSpec) -> Result<Self, Self::Error> {
        let invalid = |reason: String| RedfishError::InvalidFeature {
            name: spec.name.clone(),
            reason,
        };
        if spec.name.trim().is_empty() {
            return Err(invalid("name is empty".to_string()));
        }
        if spec.name.contains('.') || spec.name.starts_with('#') {
            return Err(invalid(
                "name must not look like a type fragment".to_string(),
            ));
        }
        if !spec.odata_type.starts_with('#')
            || !spec.odata_type.ends_with('.')
            || spec.odata_type.len() < 3
        {
            return Err(invalid(format!(
                "odata_type {:?} must look like \"#Name.\"",
                spec.odata_type
            )));
        }
        if matches!(&spec.id_contains, Some(s) if s.is_empty()) {
            return Err(invalid("id_contains is empty".to_string()));
        }

        let walk = match &spec.walk {
            None => None,
            Some(w) => {
                if !TOP_LEVEL_LINKS.contains(&w.root.as_str()) {
                    return Err(invalid(format!(
                        "walk root {:?} is not one of {}",
                        w.root,
                        TOP_LEVEL_LINKS.join(", ")
                    )));
                }
                if w.first_member && !SINGLE_MEMBER_COLLECTIONS.contains(&w.root.as_str()) {
                    return Err(invalid(format!(
                        "first_member is only allowed on {}",
                        SINGLE_MEMBER_COLLECTIONS.join(", ")
                    )));
                }
                let mut hops = Vec::with_capacity(w.hops.len());
                for hop in &w.hops {
                    let segments: Vec<String> =
                        hop.split('/').map(|s| s.trim().to_string()).collect();
                    if segments.iter().any(|s| s.is_empty()) {
                        return Err(invalid(format!("hop {hop:?} has an empty segment")));
                    }
                    hops.push(segments);
                }
                Some(WalkPlan {
                    root: w.root.clone(),
                    first_member: w.first_member,
                    hops,
                })
            }
        };

        Ok(Feature {
            name: spec.name,
            odata_type: spec.odata_type,
            id_contains: spec.id_contains,
            walk,
        })
    }
}

// name, type fragment, id scope, walk root, first member, hops
type Builtin = (
    &'static str,
    &'static str,
    Option<&'static str>,
    &'static str,
    bool,
    &'static [&'static str],
);

const BUILTIN: &[Builtin] = &[
    ("ComputerSystem", "#ComputerSystem.", None, "Systems", true, &[]),
    ("Bios", "#Bios.", None, "Systems", true, &["Bios"]),
    ("SecureBoot", "#SecureBoot.", None, "Systems", true, &["SecureBoot"]),
    (
        "BootSettings",
        "#HpeServerBootSettings.",
        None,
        "Systems",
        true,
        &["Bios", "Oem/Hpe/Links/Boot"],
    ),
    (
        "SmartStorage",
        "#HpeSmartStorage.",
        None,
        "Systems",
        true,
        &["Oem/Hpe/Links/SmartStorage"],
    ),
    (
        "SystemEthernetInterfaces",
        "#EthernetInterfaceCollection.",
        Some("Systems"),
        "Systems",
        true,
        &["EthernetInterfaces"],
    ),
    ("Manager", "#Manager.", None, "Managers", true, &[]),
    (
        "ManagerEthernetInterfaces",
        "#EthernetInterfaceCollection.",
        Some("Managers"),
        "Managers",
        true,
        &["EthernetInterfaces"],
    ),
    (
        "DateTime",
        "#HpeiLODateTime.",
        None,
        "Managers",
        true,
        &["Oem/Hpe/Links/DateTimeService"],
    ),
    (
        "Snmp",
        "#HpeiLOSnmpService.",
        None,
        "Managers",
        true,
        &["Oem/Hpe/Links/Snmp"],
    ),
    (
        "SecurityService",
        "#HpeSecurityService.",
        None,
        "Managers",
        true,
        &["Oem/Hpe/Links/SecurityService"],
    ),
    (
        "HttpsCert",
        "#HpeHttpsCert.",
        None,
        "Managers",
        true,
        &["Oem/Hpe/Links/SecurityService", "Links/HttpsCert"],
    ),
    (
        "ActiveHealthSystem",
        "#HpeiLOActiveHealthSystem.",
        None,
        "Managers",
        true,
        &["Oem/Hpe/Links/ActiveHealthSystem"],
    ),
    (
        "LicenseService",
        "#HpeiLOLicenseCollection.",
        None,
        "Managers",
        true,
        &["Oem/Hpe/Links/LicenseService"],
    ),
    ("Chassis", "#Chassis.", None, "Chassis", true, &[]),
    ("Power", "#Power.", None, "Chassis", true, &["Power"]),
    ("Thermal", "#Thermal.", None, "Chassis", true, &["Thermal"]),
    (
        "AccountService",
        "#AccountService.",
        None,
        "AccountService",
        false,
        &[],
    ),
    (
        "Accounts",
        "#ManagerAccountCollection.",
        None,
        "AccountService",
        false,
        &["Accounts"],
    ),
    (
        "UpdateService",
        "#UpdateService.",
        None,
        "UpdateService",
        false,
        &[],
    ),
    (
        "FirmwareInventory",
        "#SoftwareInventoryCollection.",
        Some("FirmwareInventory"),
        "UpdateService",
        false,
        &["FirmwareInventory"],
    ),
    (
        "Registries",
        "#MessageRegistryFileCollection.",
        None,
        "Registries",
        false,
        &[],
    ),
    (
        "JsonSchemas",
        "#JsonSchemaFileCollection.",
        None,
        "JsonSchemas",
        false,
        &[],
    ),
];

/// The features a locator knows how to find, looked up by name or fragment.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    features: Vec<Feature>,
}

impl FeatureTable {
    /// The built-in iLO features.
    pub fn builtin() -> Result<Self, RedfishError> {
        Self::with_extra(Vec::new())
    }

    /// Built-in features plus `extra`, all validated. Extra entries may not reuse a name.
    pub fn with_extra(extra: Vec<FeatureSpec>) -> Result<Self, RedfishError> {
        let specs = builtin_specs().into_iter().chain(extra);
        let mut features = Vec::new();
        let mut seen = HashSet::new();
        for spec in specs {
            if !seen.insert(spec.name.to_lowercase()) {
                return Err(RedfishError::InvalidFeature {
                    name: spec.name,
                    reason: "defined more than once".to_string(),
                });
            }
            features.push(Feature::try_from(spec)?);
        }
        Ok(FeatureTable { features })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.features
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Resolve what the caller asked for: a feature name, a known fragment, or
    /// a raw fragment we can only look for in the resource directory.
    pub fn query(&self, target: &str) -> Result<Query<'_>, RedfishError> {
        if let Some(f) = self.get(target) {
            return Ok(Query::from_feature(f));
        }
        if let Some(f) = self
            .features
            .iter()
            .find(|f| f.id_contains.is_none() && f.odata_type.eq_ignore_ascii_case(target))
        {
            return Ok(Query::from_feature(f));
        }
        if target.contains('.') {
            return Ok(Query {
                name: target.to_string(),
                odata_type: target.to_string(),
                id_contains: None,
                walk: None,
            });
        }
        Err(RedfishError::UnknownFeature(target.to_string()))
    }
}

/// One lookup request, borrowed from the table where possible.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    pub name: String,
    pub odata_type: String,
    pub id_contains: Option<String>,
    pub walk: Option<&'a WalkPlan>,
}

impl<'a> Query<'a> {
    fn from_feature(f: &'a Feature) -> Self {
        Query {
            name: f.name.clone(),
            odata_type: f.odata_type.clone(),
            id_contains: f.id_contains.clone(),
            walk: f.walk.as_ref(),
        }
    }
}

fn builtin_specs() -> Vec<FeatureSpec> {
    BUILTIN
        .iter()
        .map(
            |(name, odata_type, id_contains, root, first_member, hops)| FeatureSpec {
                name: name.to_string(),
                odata_type: odata_type.to_string(),
                id_contains: id_contains.map(str::to_string),
                walk: Some(WalkSpec {
                    root: root.to_string(),
                    first_member: *first_member,
                    hops: hops.iter().map(|h| h.to_string()).collect(),
                }),
            },
        )
        .collect()
}
