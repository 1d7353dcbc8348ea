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
#![allow(dead_code)]
// Mock iLO 5 trees served by wiremock.

use std::sync::Once;

use ilo_redfish::{AuthMethod, Endpoint, RedfishClientPool, RedfishError, Scheme, Session};
use serde_json::{json, Value};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ROOT: &str = "/redfish/v1/";
pub const SESSIONS: &str = "/redfish/v1/SessionService/Sessions/";
pub const SESSION_1: &str = "/redfish/v1/SessionService/Sessions/admin0001/";
pub const DIRECTORY: &str = "/redfish/v1/resourcedirectory/";
pub const SYSTEM: &str = "/redfish/v1/systems/1/";
pub const BIOS: &str = "/redfish/v1/systems/1/bios/";
pub const BIOS_SETTINGS: &str = "/redfish/v1/systems/1/bios/settings/";
pub const MANAGER: &str = "/redfish/v1/managers/1/";
pub const DATETIME: &str = "/redfish/v1/managers/1/datetime/";
pub const MANAGER_RESET: &str = "/redfish/v1/managers/1/Actions/Manager.Reset/";
pub const UPDATE_SERVICE: &str = "/redfish/v1/updateservice/";
pub const PUSH_URI: &str = "/cgi-bin/uploadFile";
pub const BOOT: &str = "/redfish/v1/systems/1/bios/boot/";
pub const BOOT_SETTINGS: &str = "/redfish/v1/systems/1/bios/boot/settings/";
pub const ACCOUNTS: &str = "/redfish/v1/accountservice/accounts/";
pub const SNMP: &str = "/redfish/v1/managers/1/snmpservice/";
pub const HTTPS_CERT: &str = "/redfish/v1/managers/1/securityservice/httpscert/";
pub const GENERATE_CSR: &str =
    "/redfish/v1/managers/1/securityservice/httpscert/Actions/HpeHttpsCert.GenerateCSR/";
pub const IMPORT_CERT: &str =
    "/redfish/v1/managers/1/securityservice/httpscert/Actions/HpeHttpsCert.ImportCertificate/";
pub const POWER: &str = "/redfish/v1/chassis/1/power/";
pub const MANAGER_NICS: &str = "/redfish/v1/managers/1/ethernetinterfaces/";

static SETUP: Once = Once::new();

pub fn init_logging() {
    SETUP.call_once(|| {
        let env_filter = EnvFilter::from_default_env()
            .add_directive(LevelFilter::DEBUG.into())
            .add_directive("hyper=warn".parse().unwrap());
        tracing_subscriber::registry()
            .with(Layer::default().compact().with_test_writer())
            .with(env_filter)
            .init();
    });
}

pub fn endpoint(server: &MockServer) -> Endpoint {
    let url = url::Url::parse(&server.uri()).unwrap();
    Endpoint {
        host: url.host_str().unwrap().to_string(),
        port: url.port(),
        user: Some("admin".to_string()),
        password: Some("password".to_string()),
        scheme: Scheme::Http,
    }
}

pub async fn try_connect(server: &MockServer, auth: AuthMethod) -> Result<Session, RedfishError> {
    RedfishClientPool::builder()
        .build()?
        .connect(endpoint(server), auth)
        .await
}

pub async fn connect(server: &MockServer) -> Session {
    try_connect(server, AuthMethod::Session).await.unwrap()
}

pub async fn mount_json(server: &MockServer, uri: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(uri))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// One session POST per token, handed out in order, plus the session DELETE.
pub async fn mount_login(server: &MockServer, tokens: &[&str]) {
    for token in tokens {
        Mock::given(method("POST"))
            .and(path(SESSIONS))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("X-Auth-Token", *token)
                    .insert_header("Location", format!("{}{}", server.uri(), SESSION_1).as_str())
                    .set_body_json(json!({"@odata.id": SESSION_1})),
            )
            .up_to_n_times(1)
            .mount(server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path(SESSION_1))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
}

fn link(uri: &str) -> Value {
    json!({ "@odata.id": uri })
}

fn collection(odata_type: &str, members: &[&str]) -> Value {
    json!({
        "@odata.type": odata_type,
        "Members": members.iter().map(|m| link(m)).collect::<Vec<_>>(),
        "Members@odata.count": members.len(),
    })
}

pub fn hpe_root() -> Value {
    json!({
        "@odata.id": ROOT,
        "@odata.type": "#ServiceRoot.v1_5_1.ServiceRoot",
        "Product": "ProLiant DL360 Gen10",
        "RedfishVersion": "1.6.0",
        "Vendor": "HPE",
        "Oem": {"Hpe": {
            "Links": {"ResourceDirectory": link(DIRECTORY)},
            "Manager": [{"ManagerType": "iLO 5"}]
        }},
        "AccountService": link("/redfish/v1/accountservice/"),
        "Chassis": link("/redfish/v1/chassis/"),
        "JsonSchemas": link("/redfish/v1/jsonschemas/"),
        "Managers": link("/redfish/v1/managers/"),
        "Registries": link("/redfish/v1/registries/"),
        "SessionService": link("/redfish/v1/sessionservice/"),
        "Systems": link("/redfish/v1/systems/"),
        "UpdateService": link(UPDATE_SERVICE),
        "Links": {"Sessions": link(SESSIONS)}
    })
}

// (@odata.id, @odata.type) of every instance in the directory
pub const DIRECTORY_ENTRIES: &[(&str, &str)] = &[
    (SYSTEM, "#ComputerSystem.v1_10_0.ComputerSystem"),
    (BIOS, "#Bios.v1_0_0.Bios"),
    (BIOS_SETTINGS, "#Bios.v1_0_0.Bios"),
    ("/redfish/v1/systems/1/bios/boot/", "#HpeServerBootSettings.v2_0_0.HpeServerBootSettings"),
    ("/redfish/v1/systems/1/bios/boot/settings/", "#HpeServerBootSettings.v2_0_0.HpeServerBootSettings"),
    ("/redfish/v1/systems/1/secureboot/", "#SecureBoot.v1_0_0.SecureBoot"),
    ("/redfish/v1/systems/1/smartstorage/", "#HpeSmartStorage.v2_0_0.HpeSmartStorage"),
    ("/redfish/v1/systems/1/ethernetinterfaces/", "#EthernetInterfaceCollection.EthernetInterfaceCollection"),
    (MANAGER, "#Manager.v1_5_1.Manager"),
    ("/redfish/v1/managers/1/ethernetinterfaces/", "#EthernetInterfaceCollection.EthernetInterfaceCollection"),
    ("/redfish/v1/managers/1/ethernetinterfaces/1/", "#EthernetInterface.v1_4_1.EthernetInterface"),
    (DATETIME, "#HpeiLODateTime.v2_0_0.HpeiLODateTime"),
    ("/redfish/v1/managers/1/snmpservice/", "#HpeiLOSnmpService.v2_3_0.HpeiLOSnmpService"),
    ("/redfish/v1/managers/1/securityservice/", "#HpeSecurityService.v2_3_1.HpeSecurityService"),
    ("/redfish/v1/managers/1/securityservice/httpscert/", "#HpeHttpsCert.v2_0_0.HpeHttpsCert"),
    ("/redfish/v1/managers/1/activehealthsystem/", "#HpeiLOActiveHealthSystem.v2_5_0.HpeiLOActiveHealthSystem"),
    ("/redfish/v1/managers/1/licenseservice/", "#HpeiLOLicenseCollection.HpeiLOLicenseCollection"),
    ("/redfish/v1/chassis/1/", "#Chassis.v1_10_0.Chassis"),
    ("/redfish/v1/chassis/1/power/", "#Power.v1_3_0.Power"),
    ("/redfish/v1/chassis/1/thermal/", "#Thermal.v1_1_0.Thermal"),
    ("/redfish/v1/accountservice/", "#AccountService.v1_5_0.AccountService"),
    ("/redfish/v1/accountservice/accounts/", "#ManagerAccountCollection.ManagerAccountCollection"),
    (UPDATE_SERVICE, "#UpdateService.v1_1_1.UpdateService"),
    ("/redfish/v1/updateservice/firmwareinventory/", "#SoftwareInventoryCollection.SoftwareInventoryCollection"),
    ("/redfish/v1/updateservice/softwareinventory/", "#SoftwareInventoryCollection.SoftwareInventoryCollection"),
    ("/redfish/v1/registries/", "#MessageRegistryFileCollection.MessageRegistryFileCollection"),
    ("/redfish/v1/jsonschemas/", "#JsonSchemaFileCollection.JsonSchemaFileCollection"),
];

pub fn hpe_directory() -> Value {
    let mut instances: Vec<Value> = DIRECTORY_ENTRIES
        .iter()
        .map(|(id, t)| json!({"@odata.id": id, "@odata.type": t, "HttpMethods": ["GET"]}))
        .collect();
    // iLO lists a few instances without a type
    instances.push(json!({"@odata.id": "/redfish/v1/systems/1/bios/oem/hpe/kmsconfig/"}));
    json!({
        "@odata.id": DIRECTORY,
        "@odata.type": "#HpeiLOResourceDirectory.v2_0_0.HpeiLOResourceDirectory",
        "Instances": instances,
    })
}

pub async fn mount_hpe_directory(server: &MockServer) {
    mount_json(server, DIRECTORY, hpe_directory()).await;
}

/// Root document plus every resource a manual walk touches. No directory.
pub async fn mount_hpe_tree(server: &MockServer) {
    mount_json(server, ROOT, hpe_root()).await;

    mount_json(
        server,
        "/redfish/v1/systems/",
        collection("#ComputerSystemCollection.ComputerSystemCollection", &[SYSTEM]),
    )
    .await;
    mount_json(
        server,
        SYSTEM,
        json!({
            "@odata.id": SYSTEM,
            "@odata.type": "#ComputerSystem.v1_10_0.ComputerSystem",
            "IndicatorLED": "Off",
            "Bios": link(BIOS),
            "SecureBoot": link("/redfish/v1/systems/1/secureboot/"),
            "EthernetInterfaces": link("/redfish/v1/systems/1/ethernetinterfaces/"),
            "Oem": {"Hpe": {"Links": {
                "SmartStorage": link("/redfish/v1/systems/1/smartstorage/"),
                "PCIDevices": link("/redfish/v1/systems/1/pcidevices/")
            }}}
        }),
    )
    .await;
    mount_json(
        server,
        BIOS,
        json!({
            "@odata.id": BIOS,
            "@odata.type": "#Bios.v1_0_0.Bios",
            "@Redfish.Settings": {"SettingsObject": link(BIOS_SETTINGS)},
            "Attributes": {"AdminName": "", "BootMode": "Uefi"},
            "Oem": {"Hpe": {"Links": {"Boot": link("/redfish/v1/systems/1/bios/boot/")}}}
        }),
    )
    .await;

    mount_json(
        server,
        "/redfish/v1/managers/",
        collection("#ManagerCollection.ManagerCollection", &[MANAGER]),
    )
    .await;
    mount_json(
        server,
        MANAGER,
        json!({
            "@odata.id": MANAGER,
            "@odata.type": "#Manager.v1_5_1.Manager",
            "EthernetInterfaces": link("/redfish/v1/managers/1/ethernetinterfaces/"),
            "Actions": {"#Manager.Reset": {"target": MANAGER_RESET}},
            "Oem": {"Hpe": {"Links": {
                "DateTimeService": link(DATETIME),
                "Snmp": link("/redfish/v1/managers/1/snmpservice/"),
                "SecurityService": link("/redfish/v1/managers/1/securityservice/"),
                "ActiveHealthSystem": link("/redfish/v1/managers/1/activehealthsystem/"),
                "LicenseService": link("/redfish/v1/managers/1/licenseservice/")
            }}}
        }),
    )
    .await;
    mount_json(
        server,
        "/redfish/v1/managers/1/securityservice/",
        json!({
            "@odata.id": "/redfish/v1/managers/1/securityservice/",
            "Links": {"HttpsCert": link("/redfish/v1/managers/1/securityservice/httpscert/")}
        }),
    )
    .await;
    mount_json(
        server,
        DATETIME,
        json!({
            "@odata.id": DATETIME,
            "StaticNTPServers": ["", ""],
            "TimeZone": {"Index": 0, "Name": "Greenwich Mean Time"},
            "TimeZoneList": [{"Index": 0, "Name": "Greenwich Mean Time"}]
        }),
    )
    .await;

    mount_json(
        server,
        "/redfish/v1/chassis/",
        collection("#ChassisCollection.ChassisCollection", &["/redfish/v1/chassis/1/"]),
    )
    .await;
    mount_json(
        server,
        "/redfish/v1/chassis/1/",
        json!({
            "@odata.id": "/redfish/v1/chassis/1/",
            "Power": link("/redfish/v1/chassis/1/power/"),
            "Thermal": link("/redfish/v1/chassis/1/thermal/")
        }),
    )
    .await;

    mount_json(
        server,
        "/redfish/v1/accountservice/",
        json!({
            "@odata.id": "/redfish/v1/accountservice/",
            "Accounts": link("/redfish/v1/accountservice/accounts/")
        }),
    )
    .await;
    mount_json(
        server,
        UPDATE_SERVICE,
        json!({
            "@odata.id": UPDATE_SERVICE,
            "HttpPushUri": PUSH_URI,
            "FirmwareInventory": link("/redfish/v1/updateservice/firmwareinventory/"),
            "SoftwareInventory": link("/redfish/v1/updateservice/softwareinventory/")
        }),
    )
    .await;
    mount_json(
        server,
        "/redfish/v1/registries/",
        collection(
            "#MessageRegistryFileCollection.MessageRegistryFileCollection",
            &["/redfish/v1/registries/Base/", "/redfish/v1/registries/iLO/"],
        ),
    )
    .await;
}

/// Leaf resources the actions read: accounts, boot order, SNMP, certificate,
/// power, inventories and iLO NICs.
pub async fn mount_hpe_resources(server: &MockServer) {
    mount_json(
        server,
        ACCOUNTS,
        collection(
            "#ManagerAccountCollection.ManagerAccountCollection",
            &[
                "/redfish/v1/accountservice/accounts/1/",
                "/redfish/v1/accountservice/accounts/2/",
            ],
        ),
    )
    .await;
    mount_json(
        server,
        "/redfish/v1/accountservice/accounts/1/",
        json!({
            "@odata.id": "/redfish/v1/accountservice/accounts/1/",
            "UserName": "Administrator",
            "RoleId": "Administrator"
        }),
    )
    .await;
    mount_json(
        server,
        "/redfish/v1/accountservice/accounts/2/",
        json!({
            "@odata.id": "/redfish/v1/accountservice/accounts/2/",
            "UserName": "ops",
            "RoleId": "Operator",
            "Oem": {"Hpe": {"LoginName": "Operations"}}
        }),
    )
    .await;

    mount_json(
        server,
        BOOT,
        json!({
            "@odata.id": BOOT,
            "@Redfish.Settings": {"SettingsObject": link(BOOT_SETTINGS)},
            "DefaultBootOrder": ["Floppy", "Cd", "Usb", "EmbeddedStorage", "EmbeddedFlexLOM"]
        }),
    )
    .await;
    mount_json(
        server,
        SNMP,
        json!({"@odata.id": SNMP, "AlertsEnabled": false, "ReadCommunities": ["", "", ""]}),
    )
    .await;
    mount_json(
        server,
        HTTPS_CERT,
        json!({
            "@odata.id": HTTPS_CERT,
            "Actions": {
                "#HpeHttpsCert.GenerateCSR": {"target": GENERATE_CSR},
                "#HpeHttpsCert.ImportCertificate": {"target": IMPORT_CERT}
            },
            "CertificateSigningRequest": ""
        }),
    )
    .await;
    mount_json(
        server,
        POWER,
        json!({
            "@odata.id": POWER,
            "PowerControl": [{"PowerConsumedWatts": 152}],
            "Oem": {"Hpe": {"PowerMetrics": {
                "AverageConsumedWatts": 146,
                "MaxConsumedWatts": 169,
                "MinConsumedWatts": 144
            }}}
        }),
    )
    .await;

    mount_json(
        server,
        "/redfish/v1/updateservice/firmwareinventory/",
        collection(
            "#SoftwareInventoryCollection.SoftwareInventoryCollection",
            &[
                "/redfish/v1/updateservice/firmwareinventory/1/",
                "/redfish/v1/updateservice/firmwareinventory/2/",
            ],
        ),
    )
    .await;
    mount_json(
        server,
        "/redfish/v1/updateservice/firmwareinventory/1/",
        json!({"Name": "iLO 5", "Version": "2.78 Apr 28 2023", "Description": "SystemBMC"}),
    )
    .await;
    mount_json(
        server,
        "/redfish/v1/updateservice/firmwareinventory/2/",
        json!({"Name": "System ROM", "Version": "U32 v2.80", "Description": "SystemRomActive"}),
    )
    .await;
    mount_json(
        server,
        "/redfish/v1/updateservice/softwareinventory/",
        collection("#SoftwareInventoryCollection.SoftwareInventoryCollection", &[]),
    )
    .await;

    mount_json(
        server,
        MANAGER_NICS,
        collection(
            "#EthernetInterfaceCollection.EthernetInterfaceCollection",
            &[
                "/redfish/v1/managers/1/ethernetinterfaces/1/",
                "/redfish/v1/managers/1/ethernetinterfaces/2/",
            ],
        ),
    )
    .await;
    mount_json(
        server,
        "/redfish/v1/managers/1/ethernetinterfaces/1/",
        json!({
            "@odata.id": "/redfish/v1/managers/1/ethernetinterfaces/1/",
            "Id": "1",
            "MACAddress": "94:40:c9:3d:7a:10"
        }),
    )
    .await;
    // the shared network port, disabled
    mount_json(
        server,
        "/redfish/v1/managers/1/ethernetinterfaces/2/",
        json!({
            "@odata.id": "/redfish/v1/managers/1/ethernetinterfaces/2/",
            "Id": "2",
            "InterfaceEnabled": false
        }),
    )
    .await;
}

/// A complete iLO: login, tree, leaf resources and resource directory.
pub async fn hpe_server() -> MockServer {
    init_logging();
    let server = MockServer::start().await;
    mount_login(&server, &["tok-1"]).await;
    mount_hpe_tree(&server).await;
    mount_hpe_resources(&server).await;
    mount_hpe_directory(&server).await;
    server
}

/// A plain Redfish service: no Oem section, no resource directory, no Chassis.
pub async fn generic_server() -> MockServer {
    init_logging();
    let server = MockServer::start().await;
    mount_login(&server, &["tok-1"]).await;
    mount_json(
        &server,
        ROOT,
        json!({
            "@odata.id": "/redfish/v1",
            "RedfishVersion": "1.0.2",
            "Systems": link("/redfish/v1/Systems"),
            "Managers": link("/redfish/v1/Managers")
        }),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Systems",
        collection(
            "#ComputerSystemCollection.ComputerSystemCollection",
            &["/redfish/v1/Systems/System.Embedded.1"],
        ),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Systems/System.Embedded.1",
        json!({
            "@odata.id": "/redfish/v1/Systems/System.Embedded.1",
            "Bios": link("/redfish/v1/Systems/System.Embedded.1/Bios")
        }),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Managers",
        collection("#ManagerCollection.ManagerCollection", &["/redfish/v1/Managers/iDRAC.Embedded.1"]),
    )
    .await;
    mount_json(
        &server,
        "/redfish/v1/Managers/iDRAC.Embedded.1",
        json!({
            "@odata.id": "/redfish/v1/Managers/iDRAC.Embedded.1",
            "EthernetInterfaces": link("/redfish/v1/Managers/iDRAC.Embedded.1/EthernetInterfaces")
        }),
    )
    .await;
    server
}

/// GET requests the server saw for `uri`.
pub async fn gets_of(server: &MockServer, uri: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.url.path() == uri)
        .count()
}

/// All GET requests except the service root fetched at login.
pub async fn gets_after_login(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.url.path() != ROOT)
        .count()
}
