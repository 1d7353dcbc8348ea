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
use serde::{Deserialize, Serialize};

pub mod resource_directory;
pub mod service_root;

pub use resource_directory::{DirectoryEntry, ResourceDirectory};
pub use service_root::ServiceRoot;

/// A navigation link, `{"@odata.id": "/redfish/v1/Systems/"}`.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ODataId {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
}

/// The parts of a resource collection the locator cares about.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Collection {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "Members@odata.count")]
    pub count: Option<u64>,
    #[serde(default)]
    pub members: Vec<ODataId>,
}

/// The fields of an EthernetInterface resource that callers read.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EthernetInterface {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "MACAddress")]
    pub mac_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_members() {
        let data = r##"{
            "@odata.id": "/redfish/v1/Registries/",
            "@odata.type": "#MessageRegistryFileCollection.MessageRegistryFileCollection",
            "Members": [
                {"@odata.id": "/redfish/v1/Registries/Base/"},
                {"@odata.id": "/redfish/v1/Registries/iLO/"}
            ],
            "Members@odata.count": 2
        }"##;
        let c: Collection = serde_json::from_str(data).unwrap();
        assert_eq!(c.count, Some(2));
        assert_eq!(c.members[1].odata_id, "/redfish/v1/Registries/iLO/");
    }

    #[test]
    fn test_ethernet_interface_without_mac() {
        let data = r##"{
            "@odata.id": "/redfish/v1/Managers/1/EthernetInterfaces/2/",
            "Id": "2",
            "InterfaceEnabled": false
        }"##;
        let nic: EthernetInterface = serde_json::from_str(data).unwrap();
        assert_eq!(nic.id, "2");
        assert!(nic.mac_address.is_none());
    }
}
