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
//! Operations built on the locator: find one resource, then make one change to it.
//!
//! When the controller does not have the resource the result is
//! [`ActionOutcome::NotSupported`], not an error.

use std::{collections::BTreeMap, fmt, path::Path, time::Duration};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::jsonmap;
use crate::locator::{fetch_directory, Locator, ResourceRef};
use crate::model::{Collection, EthernetInterface, ResourceDirectory};
use crate::network::RedfishResponse;
use crate::session::{PendingReset, Session};
use crate::{Redfish, RedfishError};

// Large images take minutes to be written to the iLO repository.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

// iLO checks the BIOS admin password on settings changes through this header.
const BIOS_PASSWORD_HEADER: &str = "x-hprestfulapi-authtoken";

#[derive(Debug)]
pub enum ActionOutcome {
    Done(RedfishResponse),
    NotSupported { feature: String },
    /// The feature exists but the item the caller named does not.
    NotFound { what: String },
}

impl ActionOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, ActionOutcome::Done(_))
    }
}

async fn find(
    session: &dyn Redfish,
    locator: &Locator,
    feature: &str,
) -> Result<Option<ResourceRef>, RedfishError> {
    let found = locator.locate_first(session, feature).await?;
    if found.is_none() {
        info!("{feature} is not available on {}", session.origin());
    }
    Ok(found)
}

fn not_supported(feature: &str) -> ActionOutcome {
    ActionOutcome::NotSupported {
        feature: feature.to_string(),
    }
}

fn invalid_value(url: &str, field: &str, err: impl Into<String>) -> RedfishError {
    RedfishError::InvalidValue {
        url: url.to_string(),
        field: field.to_string(),
        err: err.into(),
    }
}

// Member links of the collection at `uri`, resolved against the session origin.
async fn members(
    session: &dyn Redfish,
    uri: &ResourceRef,
    feature: &str,
) -> Result<Vec<ResourceRef>, RedfishError> {
    let (_, doc) = session.get(uri.as_str()).await?;
    let collection: Collection = serde_json::from_value(doc)
        .map_err(|e| RedfishError::resolution(feature, uri.as_str(), e.to_string()))?;
    let origin = session.origin();
    collection
        .members
        .iter()
        .map(|m| ResourceRef::resolve(&origin, &m.odata_id, feature))
        .collect()
}

// The pending-settings object of a resource that iLO applies on reboot.
fn settings_object(
    session: &dyn Redfish,
    doc: &serde_json::Value,
    uri: &ResourceRef,
    feature: &str,
) -> Result<ResourceRef, RedfishError> {
    let settings = jsonmap::link_at(
        doc,
        &["@Redfish.Settings".to_string(), "SettingsObject".to_string()],
        uri.as_str(),
    )?;
    ResourceRef::resolve(&session.origin(), settings, feature)
}

/// Headers for a BIOS settings PATCH. With a password set, iLO wants the
/// upper case hex SHA-256 of it.
pub fn bios_password_headers(password: Option<&str>) -> Result<HeaderMap, RedfishError> {
    let mut headers = HeaderMap::new();
    let Some(password) = password else {
        return Ok(headers);
    };
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let digest = hex::encode_upper(hasher.finalize());
    let value = HeaderValue::from_str(&digest)
        .map_err(|e| invalid_value(BIOS_PASSWORD_HEADER, "bios_password", e.to_string()))?;
    headers.insert(HeaderName::from_static(BIOS_PASSWORD_HEADER), value);
    Ok(headers)
}

/// Stage a BIOS attribute change. iLO applies it on the next reboot.
///
/// The PATCH goes to the settings object named by `@Redfish.Settings`, not to
/// the BIOS resource itself, which is read-only. `bios_password` is only
/// needed when a BIOS admin password is set.
pub async fn change_bios_setting(
    session: &dyn Redfish,
    locator: &Locator,
    attribute: &str,
    value: serde_json::Value,
    bios_password: Option<&str>,
) -> Result<ActionOutcome, RedfishError> {
    let Some(bios) = find(session, locator, "Bios").await? else {
        return Ok(not_supported("Bios"));
    };
    let (_, doc) = session.get(bios.as_str()).await?;
    let settings = settings_object(session, &doc, &bios, "Bios")?;
    debug!("BIOS settings object at {settings}");
    let mut attributes = serde_json::Map::new();
    attributes.insert(attribute.to_string(), value);
    let resp = session
        .patch_with_headers(
            settings.as_str(),
            json!({ "Attributes": attributes }),
            bios_password_headers(bios_password)?,
        )
        .await?;
    Ok(ActionOutcome::Done(resp))
}

/// Move the first UEFI boot device to the end of `DefaultBootOrder`. Takes
/// effect on the next reboot.
pub async fn change_boot_order(
    session: &dyn Redfish,
    locator: &Locator,
    bios_password: Option<&str>,
) -> Result<ActionOutcome, RedfishError> {
    let Some(boot) = find(session, locator, "BootSettings").await? else {
        return Ok(not_supported("BootSettings"));
    };
    let (_, doc) = session.get(boot.as_str()).await?;
    let settings = settings_object(session, &doc, &boot, "BootSettings")?;
    let map = jsonmap::as_object(&doc, boot.as_str())?;
    let mut order = jsonmap::get_array(map, "DefaultBootOrder", boot.as_str())?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| RedfishError::InvalidKeyType {
                    key: "DefaultBootOrder[]".to_string(),
                    expected_type: "string".to_string(),
                    url: boot.to_string(),
                })
        })
        .collect::<Result<Vec<String>, RedfishError>>()?;
    if order.is_empty() {
        return Err(invalid_value(
            boot.as_str(),
            "DefaultBootOrder",
            "no boot devices to rotate",
        ));
    }
    order.rotate_left(1);
    info!(
        "Moving {} to the end of the boot order",
        order.last().map(String::as_str).unwrap_or_default()
    );
    let resp = session
        .patch_with_headers(
            settings.as_str(),
            json!({ "DefaultBootOrder": order }),
            bios_password_headers(bios_password)?,
        )
        .await?;
    Ok(ActionOutcome::Done(resp))
}

/// Replace the static NTP servers. The iLO must be reset before they show up
/// in the DateTime resource.
pub async fn set_ntp_servers(
    session: &dyn Redfish,
    locator: &Locator,
    servers: &[String],
) -> Result<ActionOutcome, RedfishError> {
    let Some(uri) = find(session, locator, "DateTime").await? else {
        return Ok(not_supported("DateTime"));
    };
    let (_, doc) = session.get(uri.as_str()).await?;
    if doc.get("StaticNTPServers").is_none() {
        return Err(RedfishError::NotSupported(format!(
            "StaticNTPServers is not settable at {uri}"
        )));
    }
    let resp = session
        .patch(uri.as_str(), json!({ "StaticNTPServers": servers }))
        .await?;
    Ok(ActionOutcome::Done(resp))
}

/// Set the iLO time zone by name, e.g. "America/Chicago". Valid names are in
/// the DateTime resource's `TimeZoneList`.
pub async fn set_timezone(
    session: &dyn Redfish,
    locator: &Locator,
    timezone: &str,
) -> Result<ActionOutcome, RedfishError> {
    let Some(uri) = find(session, locator, "DateTime").await? else {
        return Ok(not_supported("DateTime"));
    };
    let (_, doc) = session.get(uri.as_str()).await?;
    if doc.get("TimeZone").is_none() {
        return Err(RedfishError::NotSupported(format!(
            "TimeZone is not settable at {uri}"
        )));
    }
    let resp = session
        .patch(uri.as_str(), json!({ "TimeZone": { "Name": timezone } }))
        .await?;
    Ok(ActionOutcome::Done(resp))
}

/// Flip the UID light: Off becomes Lit, anything else (Lit, Blinking) becomes Off.
pub async fn toggle_uid_light(
    session: &dyn Redfish,
    locator: &Locator,
) -> Result<ActionOutcome, RedfishError> {
    let Some(system) = find(session, locator, "ComputerSystem").await? else {
        return Ok(not_supported("ComputerSystem"));
    };
    let (_, doc) = session.get(system.as_str()).await?;
    let map = jsonmap::as_object(&doc, system.as_str())?;
    let current = jsonmap::get_str(map, "IndicatorLED", system.as_str())?;
    let next = if current.contains("Off") { "Lit" } else { "Off" };
    info!("Indicator LED is {current}, setting it to {next}");
    let resp = session
        .patch(system.as_str(), json!({ "IndicatorLED": next }))
        .await?;
    Ok(ActionOutcome::Done(resp))
}

/// Fields of an iLO user account. Unset fields are left out of the request.
///
/// `role_id` is the Redfish standard role (Administrator, Operator, ReadOnly).
/// `login_name` and `privileges` go under `Oem.Hpe`.
#[derive(Clone, Default)]
pub struct AccountChanges {
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub login_name: Option<String>,
    pub role_id: Option<String>,
    pub privileges: BTreeMap<String, bool>,
}

impl fmt::Debug for AccountChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountChanges")
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("login_name", &self.login_name)
            .field("role_id", &self.role_id)
            .field("privileges", &self.privileges)
            .finish()
    }
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none()
            && self.password.is_none()
            && self.login_name.is_none()
            && self.role_id.is_none()
            && self.privileges.is_empty()
    }

    /// The ManagerAccount request body.
    pub fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        if let Some(user_name) = &self.user_name {
            body.insert("UserName".to_string(), json!(user_name));
        }
        if let Some(password) = &self.password {
            body.insert("Password".to_string(), json!(password));
        }
        if let Some(role_id) = &self.role_id {
            body.insert("RoleId".to_string(), json!(role_id));
        }
        let mut hpe = serde_json::Map::new();
        if let Some(login_name) = &self.login_name {
            hpe.insert("LoginName".to_string(), json!(login_name));
        }
        if !self.privileges.is_empty() {
            hpe.insert("Privileges".to_string(), json!(self.privileges));
        }
        if !hpe.is_empty() {
            body.insert("Oem".to_string(), json!({ "Hpe": hpe }));
        }
        serde_json::Value::Object(body)
    }
}

/// Create an iLO user account. `user_name` and `password` are required.
pub async fn add_user_account(
    session: &dyn Redfish,
    locator: &Locator,
    account: &AccountChanges,
) -> Result<ActionOutcome, RedfishError> {
    if account.user_name.is_none() || account.password.is_none() {
        return Err(invalid_value(
            &session.origin(),
            "account",
            "a new account needs a user name and a password",
        ));
    }
    let Some(accounts) = find(session, locator, "Accounts").await? else {
        return Ok(not_supported("Accounts"));
    };
    let resp = session.post(accounts.as_str(), account.to_body()).await?;
    Ok(ActionOutcome::Done(resp))
}

/// Change the account whose `UserName` is `user_name`.
pub async fn modify_user_account(
    session: &dyn Redfish,
    locator: &Locator,
    user_name: &str,
    changes: &AccountChanges,
) -> Result<ActionOutcome, RedfishError> {
    if changes.is_empty() {
        return Err(invalid_value(
            &session.origin(),
            "account",
            "nothing to change",
        ));
    }
    let Some(accounts) = find(session, locator, "Accounts").await? else {
        return Ok(not_supported("Accounts"));
    };
    for account in members(session, &accounts, "Accounts").await? {
        let (_, doc) = session.get(account.as_str()).await?;
        if doc.get("UserName").and_then(|v| v.as_str()) != Some(user_name) {
            continue;
        }
        debug!("Account {user_name} is {account}");
        let resp = session.patch(account.as_str(), changes.to_body()).await?;
        return Ok(ActionOutcome::Done(resp));
    }
    Ok(ActionOutcome::NotFound {
        what: format!("account {user_name}"),
    })
}

/// Set the SNMP read communities and turn SNMP alerts on or off.
pub async fn configure_snmp(
    session: &dyn Redfish,
    locator: &Locator,
    read_communities: &[String],
    alerts_enabled: bool,
) -> Result<ActionOutcome, RedfishError> {
    let Some(snmp) = find(session, locator, "Snmp").await? else {
        return Ok(not_supported("Snmp"));
    };
    let resp = session
        .patch(
            snmp.as_str(),
            json!({ "AlertsEnabled": alerts_enabled, "ReadCommunities": read_communities }),
        )
        .await?;
    Ok(ActionOutcome::Done(resp))
}

/// Subject of a certificate signing request for the iLO web server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CsrSubject {
    pub city: String,
    pub common_name: String,
    pub country: String,
    pub org_name: String,
    pub org_unit: String,
    pub state: String,
}

/// Ask the iLO to generate a CSR. Generation takes several minutes; read the
/// result with [`certificate_signing_request`].
pub async fn generate_csr(
    session: &dyn Redfish,
    locator: &Locator,
    subject: &CsrSubject,
) -> Result<ActionOutcome, RedfishError> {
    let Some(cert) = find(session, locator, "HttpsCert").await? else {
        return Ok(not_supported("HttpsCert"));
    };
    let (_, doc) = session.get(cert.as_str()).await?;
    let target = jsonmap::action_target(&doc, "#HpeHttpsCert.GenerateCSR", cert.as_str())?;
    let mut body =
        serde_json::to_value(subject).map_err(|e| RedfishError::JsonSerializeError {
            url: target.to_string(),
            object_debug: format!("{subject:?}"),
            source: e,
        })?;
    if let Some(map) = body.as_object_mut() {
        map.insert("Action".to_string(), json!("HpeHttpsCert.GenerateCSR"));
    }
    let resp = session.post(target, body).await?;
    info!("iLO is generating a CSR for {}", subject.common_name);
    Ok(ActionOutcome::Done(resp))
}

/// The PEM CSR, once the iLO has finished generating it.
pub async fn certificate_signing_request(
    session: &dyn Redfish,
    locator: &Locator,
) -> Result<Option<String>, RedfishError> {
    let Some(cert) = find(session, locator, "HttpsCert").await? else {
        return Ok(None);
    };
    let (_, doc) = session.get(cert.as_str()).await?;
    Ok(doc
        .get("CertificateSigningRequest")
        .and_then(|v| v.as_str())
        .filter(|csr| !csr.is_empty())
        .map(str::to_string))
}

/// Install a signed PEM certificate for the iLO web server. The iLO resets
/// itself to load it.
pub async fn import_ssl_certificate(
    session: &dyn Redfish,
    locator: &Locator,
    certificate: &str,
) -> Result<ActionOutcome, RedfishError> {
    if certificate.trim().is_empty() {
        return Err(invalid_value(
            &session.origin(),
            "certificate",
            "empty certificate",
        ));
    }
    let Some(cert) = find(session, locator, "HttpsCert").await? else {
        return Ok(not_supported("HttpsCert"));
    };
    let (_, doc) = session.get(cert.as_str()).await?;
    let target = jsonmap::action_target(&doc, "#HpeHttpsCert.ImportCertificate", cert.as_str())?;
    let resp = session
        .post(
            target,
            json!({ "Action": "HpeHttpsCert.ImportCertificate", "Certificate": certificate }),
        )
        .await?;
    info!("Certificate imported, iLO will reset");
    Ok(ActionOutcome::Done(resp))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryKind {
    Firmware,
    Software,
}

impl InventoryKind {
    fn link(self) -> &'static str {
        match self {
            InventoryKind::Firmware => "FirmwareInventory",
            InventoryKind::Software => "SoftwareInventory",
        }
    }
}

/// Every item of the firmware or software inventory, as the iLO reports it.
pub async fn inventory(
    session: &dyn Redfish,
    locator: &Locator,
    kind: InventoryKind,
) -> Result<Vec<serde_json::Value>, RedfishError> {
    let Some(update_service) = find(session, locator, "UpdateService").await? else {
        return Ok(Vec::new());
    };
    let (_, doc) = session.get(update_service.as_str()).await?;
    let map = jsonmap::as_object(&doc, update_service.as_str())?;
    let link = jsonmap::odata_id(map, kind.link(), update_service.as_str())?;
    let collection = ResourceRef::resolve(&session.origin(), link, kind.link())?;
    let mut items = Vec::new();
    for item in members(session, &collection, kind.link()).await? {
        let (_, doc) = session.get(item.as_str()).await?;
        items.push(doc);
    }
    Ok(items)
}

/// The HPE power metrics (`Oem.Hpe` of the chassis Power resource).
pub async fn power_metrics(
    session: &dyn Redfish,
    locator: &Locator,
) -> Result<Option<serde_json::Value>, RedfishError> {
    let Some(power) = find(session, locator, "Power").await? else {
        return Ok(None);
    };
    let (_, doc) = session.get(power.as_str()).await?;
    // iLO 4 uses "Hp"
    ["Hpe", "Hp"]
        .iter()
        .find_map(|vendor| doc.get("Oem").and_then(|oem| oem.get(*vendor)))
        .cloned()
        .map(Some)
        .ok_or_else(|| RedfishError::MissingKey {
            key: "Oem.Hpe".to_string(),
            url: power.to_string(),
        })
}

/// Network interfaces of the iLO itself, with their MAC addresses.
pub async fn ilo_mac_addresses(
    session: &dyn Redfish,
    locator: &Locator,
) -> Result<Vec<EthernetInterface>, RedfishError> {
    let Some(nics) = find(session, locator, "ManagerEthernetInterfaces").await? else {
        return Ok(Vec::new());
    };
    let mut interfaces = Vec::new();
    for nic in members(session, &nics, "ManagerEthernetInterfaces").await? {
        let (_, doc) = session.get(nic.as_str()).await?;
        let iface: EthernetInterface =
            serde_json::from_value(doc.clone()).map_err(|e| RedfishError::JsonDeserializeError {
                url: nic.to_string(),
                body: doc.to_string(),
                source: e,
            })?;
        interfaces.push(iface);
    }
    Ok(interfaces)
}

/// The whole resource directory, or None on controllers without one.
pub async fn list_directory(
    session: &dyn Redfish,
) -> Result<Option<ResourceDirectory>, RedfishError> {
    match fetch_directory(session).await {
        Ok(dir) => Ok(Some(dir)),
        Err(RedfishError::DirectoryUnavailable) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Members of the message registry collection.
pub async fn list_registries(
    session: &dyn Redfish,
    locator: &Locator,
) -> Result<Vec<ResourceRef>, RedfishError> {
    let Some(uri) = find(session, locator, "Registries").await? else {
        return Ok(Vec::new());
    };
    members(session, &uri, "Registries").await
}

/// Upload a firmware image to the iLO repository and optionally flag it for
/// flashing. Needs session auth: iLO checks the session key inside the form.
pub async fn upload_firmware(
    session: &Session,
    locator: &Locator,
    image: &Path,
    update_repository: bool,
    update_target: bool,
) -> Result<ActionOutcome, RedfishError> {
    let Some(token) = session.token() else {
        return Err(RedfishError::NotSupported(
            "firmware upload needs session auth, not basic auth".to_string(),
        ));
    };
    let Some(update_service) = find(session, locator, "UpdateService").await? else {
        return Ok(not_supported("UpdateService"));
    };
    let (_, doc) = session.get(update_service.as_str()).await?;
    let map = jsonmap::as_object(&doc, update_service.as_str())?;
    let push_uri = jsonmap::get_str(map, "HttpPushUri", update_service.as_str())?;

    let data = tokio::fs::read(image).await.map_err(|e| RedfishError::Io {
        path: image.display().to_string(),
        source: e,
    })?;
    let filename = image
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "firmware.bin".to_string());
    let parameters = json!({
        "UpdateRepository": update_repository,
        "UpdateTarget": update_target,
        "ETag": "atag",
        "Section": 0,
    });
    info!(
        "Uploading {} ({} bytes) to {push_uri}",
        filename,
        data.len()
    );
    let mut part_headers = HeaderMap::new();
    part_headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    let part = Part::bytes(data).file_name(filename).headers(part_headers);
    let form = Form::new()
        .text("sessionKey", token.to_string())
        .text("parameters", parameters.to_string())
        .part("file", part);
    let resp = session
        .client()
        .post_multipart(push_uri, form, Some(UPLOAD_TIMEOUT))
        .await?;
    Ok(ActionOutcome::Done(resp))
}

/// Reset the iLO. The session is gone afterwards; the returned handle logs in
/// again once `grace` has passed. If the reset request fails the session is
/// logged out before the error is returned.
pub async fn reset_ilo(
    session: Session,
    locator: &Locator,
    grace: Duration,
) -> Result<PendingReset, RedfishError> {
    match request_reset(&session, locator).await {
        Ok(()) => {
            info!("iLO at {} is resetting", session.origin());
            Ok(session.into_pending_reset(grace))
        }
        Err(e) => {
            if let Err(logout_err) = session.logout().await {
                warn!("Logout after failed reset: {logout_err}");
            }
            Err(e)
        }
    }
}

async fn request_reset(session: &Session, locator: &Locator) -> Result<(), RedfishError> {
    let Some(manager) = find(session, locator, "Manager").await? else {
        return Err(RedfishError::NotSupported(
            "no Manager resource to reset".to_string(),
        ));
    };
    let (_, doc) = session.get(manager.as_str()).await?;
    let target = jsonmap::action_target(&doc, "#Manager.Reset", manager.as_str())?;
    session
        .post(target, json!({ "ResetType": "GracefulRestart" }))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bios_password_headers() {
        assert!(bios_password_headers(None).unwrap().is_empty());
        let headers = bios_password_headers(Some("password")).unwrap();
        assert_eq!(
            headers.get("X-HPRESTFULAPI-AuthToken").unwrap(),
            "5E884898DA28047151D0E56F8DC6292773603D0D6AABBDD62A11EF721D1542D8"
        );
    }

    #[test]
    fn test_account_body() {
        let changes = AccountChanges {
            user_name: Some("ops".to_string()),
            password: Some("s3cret".to_string()),
            login_name: Some("Operations".to_string()),
            privileges: BTreeMap::from([
                ("LoginPriv".to_string(), true),
                ("iLOConfigPriv".to_string(), false),
            ]),
            ..Default::default()
        };
        assert_eq!(
            changes.to_body(),
            json!({
                "UserName": "ops",
                "Password": "s3cret",
                "Oem": {"Hpe": {
                    "LoginName": "Operations",
                    "Privileges": {"LoginPriv": true, "iLOConfigPriv": false}
                }}
            })
        );
        assert!(!format!("{changes:?}").contains("s3cret"));

        let role_only = AccountChanges {
            role_id: Some("ReadOnly".to_string()),
            ..Default::default()
        };
        assert_eq!(role_only.to_body(), json!({"RoleId": "ReadOnly"}));
        assert!(AccountChanges::default().is_empty());
    }

    #[test]
    fn test_csr_subject_body() {
        let subject = CsrSubject {
            city: "Houston".to_string(),
            common_name: "ilo-01.example.com".to_string(),
            country: "US".to_string(),
            org_name: "Example".to_string(),
            org_unit: "Infra".to_string(),
            state: "Texas".to_string(),
        };
        let v = serde_json::to_value(&subject).unwrap();
        assert_eq!(v["CommonName"], "ilo-01.example.com");
        assert_eq!(v["OrgUnit"], "Infra");
    }
}
