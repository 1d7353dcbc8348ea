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
use std::{fmt, time::Duration};

use reqwest::{header::HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::ServiceRoot;
use crate::network::{Auth, RedfishHttpClient, RedfishResponse};
use crate::{Redfish, RedfishError};

const ROOT_PATH: &str = "/redfish/v1/";
const DEFAULT_SESSIONS_PATH: &str = "/redfish/v1/SessionService/Sessions/";

/// How long an iLO needs after a reset before it accepts logins again. The
/// controller exposes no readiness signal, so this is a fixed wait.
pub const RESET_GRACE_PERIOD: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// POST credentials once, then send `X-Auth-Token` on every request.
    #[default]
    Session,
    /// HTTP basic auth on every request. No server side session.
    Basic,
}

#[derive(Serialize)]
struct Credentials<'a> {
    #[serde(rename = "UserName")]
    user: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{UserName: {}, Password: <redacted>}}", self.user)
    }
}

/// An authenticated connection to one iLO.
///
/// `logout` and `reset_manager` style operations take the session by value:
/// a token that the controller has dropped cannot be used by mistake.
pub struct Session {
    client: RedfishHttpClient,
    method: AuthMethod,
    root: serde_json::Value,
    service_root: ServiceRoot,
    session_uri: Option<String>,
    token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("origin", &self.client.endpoint().origin())
            .field("method", &self.method)
            .field("session_uri", &self.session_uri)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Log in and fetch the service root. Issues two HTTP calls with session
    /// auth, one with basic auth.
    pub async fn login(
        mut client: RedfishHttpClient,
        method: AuthMethod,
    ) -> Result<Session, RedfishError> {
        let endpoint = client.endpoint().clone();
        let origin = endpoint.origin();
        let user = endpoint.user.clone().ok_or_else(|| RedfishError::Config {
            path: origin.clone(),
            reason: "login needs a username".to_string(),
        })?;

        let (token, session_uri) = match method {
            AuthMethod::Session => {
                let creds = Credentials {
                    user: &user,
                    password: endpoint.password.as_deref().unwrap_or_default(),
                };
                let resp = client
                    .post(DEFAULT_SESSIONS_PATH, creds)
                    .await
                    .map_err(|e| rejected_login(e, &user))?;
                let token = resp
                    .header("X-Auth-Token")
                    .ok_or_else(|| RedfishError::MissingKey {
                        key: "X-Auth-Token".to_string(),
                        url: client.url_for(DEFAULT_SESSIONS_PATH),
                    })?
                    .to_string();
                let session_uri = resp.header("Location").map(location_path);
                client.set_auth(Auth::Token(token.clone()));
                (Some(token), session_uri)
            }
            AuthMethod::Basic => {
                client.set_auth(Auth::Basic {
                    user: user.clone(),
                    password: endpoint.password.clone(),
                });
                (None, None)
            }
        };

        // with basic auth this GET is the first authenticated request
        let (_status_code, root) = client
            .get(ROOT_PATH)
            .await
            .map_err(|e| rejected_login(e, &user))?;
        let service_root: ServiceRoot =
            serde_json::from_value(root.clone()).map_err(|e| RedfishError::JsonDeserializeError {
                url: client.url_for(ROOT_PATH),
                body: root.to_string(),
                source: e,
            })?;
        info!(
            "Logged in to {} ({}, {:?} auth)",
            origin,
            service_root
                .vendor_string()
                .unwrap_or_else(|| "unknown vendor".to_string()),
            method
        );
        Ok(Session {
            client,
            method,
            root,
            service_root,
            session_uri,
            token,
        })
    }

    pub fn service_root(&self) -> &ServiceRoot {
        &self.service_root
    }

    pub fn client(&self) -> &RedfishHttpClient {
        &self.client
    }

    pub fn auth_method(&self) -> AuthMethod {
        self.method
    }

    /// The X-Auth-Token, only present with session auth.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn session_uri(&self) -> Option<&str> {
        self.session_uri.as_deref()
    }

    /// Delete the server side session.
    pub async fn logout(self) -> Result<(), RedfishError> {
        match (&self.session_uri, &self.token) {
            (Some(uri), _) => {
                self.client.delete(uri).await?;
                debug!("Session {uri} deleted");
            }
            (None, Some(_)) => {
                warn!("Login response had no Location header, session left to expire on the iLO");
            }
            (None, None) => {}
        }
        Ok(())
    }

    /// Give up the session because the controller is resetting. The token
    /// stops being valid as soon as the reset starts.
    pub fn into_pending_reset(self, grace: Duration) -> PendingReset {
        PendingReset {
            client: self.client,
            method: self.method,
            grace,
        }
    }
}

/// A controller reset is in progress. The only way forward is a new login.
pub struct PendingReset {
    client: RedfishHttpClient,
    method: AuthMethod,
    grace: Duration,
}

impl fmt::Debug for PendingReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingReset")
            .field("origin", &self.client.endpoint().origin())
            .field("method", &self.method)
            .field("grace", &self.grace)
            .finish_non_exhaustive()
    }
}

impl PendingReset {
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Wait out the grace period, then log in again.
    pub async fn reconnect(mut self) -> Result<Session, RedfishError> {
        info!(
            "Waiting {}s for the iLO to come back after reset",
            self.grace.as_secs()
        );
        tokio::time::sleep(self.grace).await;
        self.client.set_auth(Auth::None);
        Session::login(self.client, self.method).await
    }
}

#[async_trait::async_trait]
impl Redfish for Session {
    fn root(&self) -> &serde_json::Value {
        &self.root
    }

    fn origin(&self) -> String {
        self.client.endpoint().origin()
    }

    async fn get(&self, uri: &str) -> Result<(StatusCode, serde_json::Value), RedfishError> {
        self.client.get(uri).await
    }

    async fn patch(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> Result<RedfishResponse, RedfishError> {
        self.client.patch(uri, body).await
    }

    async fn patch_with_headers(
        &self,
        uri: &str,
        body: serde_json::Value,
        headers: HeaderMap,
    ) -> Result<RedfishResponse, RedfishError> {
        self.client.patch_with_headers(uri, body, headers).await
    }

    async fn post(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> Result<RedfishResponse, RedfishError> {
        self.client.post(uri, body).await
    }

    async fn delete(&self, uri: &str) -> Result<RedfishResponse, RedfishError> {
        self.client.delete(uri).await
    }
}

// A 401 before we hold a session means bad credentials, not a stale token.
fn rejected_login(err: RedfishError, user: &str) -> RedfishError {
    match err {
        RedfishError::SessionInvalid { url } => RedfishError::LoginRejected {
            url,
            user: user.to_string(),
        },
        other => other,
    }
}

// iLO answers with an absolute Location that may name the controller by a
// different host than the one we connected to. Keep only the path.
fn location_path(location: &str) -> String {
    match url::Url::parse(location) {
        Ok(u) => u.path().to_string(),
        Err(_) => location.to_string(),
    }
}
