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
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ODataId;

/// https://redfish.dmtf.org/schemas/v1/ServiceRoot.v1_5_0.json
/// Typed view of `/redfish/v1/`. The session also keeps the raw document for generic walks.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRoot {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
    pub product: Option<String>,
    pub redfish_version: Option<String>,
    pub vendor: Option<String>,
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    pub oem: Option<HashMap<String, serde_json::Value>>,
    pub account_service: Option<ODataId>,
    pub chassis: Option<ODataId>,
    pub json_schemas: Option<ODataId>,
    pub managers: Option<ODataId>,
    pub registries: Option<ODataId>,
    pub session_service: Option<ODataId>,
    pub systems: Option<ODataId>,
    pub update_service: Option<ODataId>,
}

impl ServiceRoot {
    /// Vendor provided by Redfish ServiceRoot
    pub fn vendor_string(&self) -> Option<String> {
        // Older iLO firmware has no "Vendor" key. The Oem section then has a
        // single key which is the vendor name ("Hp" or "Hpe").
        self.vendor.as_ref().cloned().or_else(|| match &self.oem {
            Some(oem) => oem.keys().next().cloned(),
            None => None,
        })
    }

    /// `Oem.Hpe.Links.ResourceDirectory` (or `Oem.Hp...` on older firmware).
    /// Absent on anything that is not an HPE iLO.
    pub fn resource_directory(&self) -> Option<&str> {
        let oem = self.oem.as_ref()?;
        ["Hpe", "Hp"].iter().find_map(|vendor| {
            oem.get(*vendor)?
                .pointer("/Links/ResourceDirectory/@odata.id")?
                .as_str()
        })
    }
}

#[cfg(test)]
mod test {
    use super::ServiceRoot;

    #[test]
    fn test_hpe_service_root() {
        let data = r##"{
            "@odata.id": "/redfish/v1/",
            "@odata.type": "#ServiceRoot.v1_5_1.ServiceRoot",
            "Product": "ProLiant DL360 Gen10",
            "RedfishVersion": "1.6.0",
            "Vendor": "HPE",
            "Oem": {
                "Hpe": {
                    "Links": {"ResourceDirectory": {"@odata.id": "/redfish/v1/resourcedirectory/"}},
                    "Manager": [{"ManagerType": "iLO 5"}]
                }
            },
            "Systems": {"@odata.id": "/redfish/v1/Systems/"},
            "Links": {"Sessions": {"@odata.id": "/redfish/v1/SessionService/Sessions/"}}
        }"##;
        let root: ServiceRoot = serde_json::from_str(data).unwrap();
        assert_eq!(root.vendor_string().as_deref(), Some("HPE"));
        assert_eq!(
            root.resource_directory(),
            Some("/redfish/v1/resourcedirectory/")
        );
        assert_eq!(root.systems.unwrap().odata_id, "/redfish/v1/Systems/");
    }

    #[test]
    fn test_non_vendor_service_root() {
        let data = r##"{
            "@odata.id": "/redfish/v1/",
            "RedfishVersion": "1.0.2",
            "Systems": {"@odata.id": "/redfish/v1/Systems"}
        }"##;
        let root: ServiceRoot = serde_json::from_str(data).unwrap();
        assert!(root.vendor_string().is_none());
        assert!(root.resource_directory().is_none());
    }

    #[test]
    fn test_old_hp_oem_key() {
        let data = r##"{
            "Oem": {"Hp": {"Links": {"ResourceDirectory": {"@odata.id": "/redfish/v1/ResourceDirectory/"}}}}
        }"##;
        let root: ServiceRoot = serde_json::from_str(data).unwrap();
        assert_eq!(root.vendor_string().as_deref(), Some("Hp"));
        assert_eq!(
            root.resource_directory(),
            Some("/redfish/v1/ResourceDirectory/")
        );
    }
}
