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
use std::time::Duration;

use reqwest::{
    header::HeaderMap, header::HeaderValue, header::ACCEPT, header::CONTENT_TYPE, header::COOKIE,
    multipart::Form, Client as HttpClient, ClientBuilder as HttpClientBuilder, Method, StatusCode,
};
use serde::Serialize;
use tracing::debug;

use crate::session::{AuthMethod, Session};
pub use crate::RedfishError;

pub const REDFISH_ENDPOINT: &str = "redfish/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug)]
pub struct RedfishClientPoolBuilder {
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl RedfishClientPoolBuilder {
    /// Prevents the Redfish Client from accepting self signed certificates
    /// and other invalid certificates.
    ///
    /// By default self signed certificates will be accepted, since iLOs ship
    /// with one.
    pub fn reject_invalid_certs(mut self) -> RedfishClientPoolBuilder {
        self.accept_invalid_certs = false;
        self
    }

    /// Overwrites the timeout that will be applied to every request
    pub fn timeout(mut self, timeout: Duration) -> RedfishClientPoolBuilder {
        self.timeout = timeout;
        self
    }

    /// Builds a Redfish Client Network Configuration
    pub fn build(&self) -> Result<RedfishClientPool, RedfishError> {
        let http_client = HttpClientBuilder::new()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .timeout(self.timeout)
            .build()
            .map_err(|e| RedfishError::NetworkError {
                url: "<client builder>".to_string(),
                source: e,
            })?;
        Ok(RedfishClientPool { http_client })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Https,
    /// Plain HTTP. Only useful against mockups and test servers.
    Http,
}

/// The endpoint that the redfish client connects to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Endpoint {
    /// Hostname or IP address of the iLO
    pub host: String,
    /// iLO port. If absent the scheme default is used
    pub port: Option<u16>,
    /// iLO username
    pub user: Option<String>,
    /// iLO password
    pub password: Option<String>,
    pub scheme: Scheme,
}

impl Endpoint {
    /// scheme://host[:port], without a trailing slash.
    pub fn origin(&self) -> String {
        let scheme = match self.scheme {
            Scheme::Https => "https",
            Scheme::Http => "http",
        };
        match self.port {
            Some(p) => format!("{scheme}://{}:{p}", self.host),
            None => format!("{scheme}://{}", self.host),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedfishClientPool {
    http_client: HttpClient,
}

impl RedfishClientPool {
    /// Returns Builder for configuring a Redfish HTTP connection pool
    pub fn builder() -> RedfishClientPoolBuilder {
        RedfishClientPoolBuilder {
            timeout: DEFAULT_TIMEOUT,
            // iLOs have a self-signed cert out of the box, so usually this has to be true
            accept_invalid_certs: true,
        }
    }

    /// Creates an unauthenticated HTTP client for a certain endpoint
    pub fn create_client(&self, endpoint: Endpoint) -> RedfishHttpClient {
        RedfishHttpClient::new(self.http_client.clone(), endpoint)
    }

    /// Creates a client and logs in. Issues the login call and fetches the service root.
    pub async fn connect(
        &self,
        endpoint: Endpoint,
        method: AuthMethod,
    ) -> Result<Session, RedfishError> {
        Session::login(self.create_client(endpoint), method).await
    }
}

/// Credentials attached to every request.
#[derive(Clone, Default)]
pub(crate) enum Auth {
    #[default]
    None,
    Basic {
        user: String,
        password: Option<String>,
    },
    Token(String),
}

/// Status, parsed JSON body (if the response had one) and headers of one call.
#[derive(Debug, Clone)]
pub struct RedfishResponse {
    pub status: StatusCode,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl RedfishResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A HTTP client which targets a single iLO
pub struct RedfishHttpClient {
    endpoint: Endpoint,
    http_client: HttpClient,
    auth: Auth,
}

impl RedfishHttpClient {
    pub fn new(http_client: HttpClient, endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            http_client,
            auth: Auth::None,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub(crate) fn set_auth(&mut self, auth: Auth) {
        self.auth = auth;
    }

    /// Absolute URL for `api`. Accepts an @odata.id style path ("/redfish/v1/Systems/1/"),
    /// a path relative to the Redfish root ("Systems/1") or a full URL.
    pub fn url_for(&self, api: &str) -> String {
        if api.starts_with("http://") || api.starts_with("https://") {
            api.to_string()
        } else if api.starts_with('/') {
            format!("{}{}", self.endpoint.origin(), api)
        } else {
            format!("{}/{}/{}", self.endpoint.origin(), REDFISH_ENDPOINT, api)
        }
    }

    pub async fn get(&self, api: &str) -> Result<(StatusCode, serde_json::Value), RedfishError> {
        let resp = self.req::<()>(Method::GET, api, None, None).await?;
        match resp.body {
            Some(body) => Ok((resp.status, body)),
            None => Err(RedfishError::NoContent),
        }
    }

    pub async fn post<T>(&self, api: &str, data: T) -> Result<RedfishResponse, RedfishError>
    where
        T: Serialize + ::std::fmt::Debug,
    {
        self.req(Method::POST, api, Some(data), None).await
    }

    pub async fn patch<T>(&self, api: &str, data: T) -> Result<RedfishResponse, RedfishError>
    where
        T: Serialize + ::std::fmt::Debug,
    {
        self.req(Method::PATCH, api, Some(data), None).await
    }

    /// PATCH with extra request headers, e.g. the BIOS admin password digest.
    pub async fn patch_with_headers<T>(
        &self,
        api: &str,
        data: T,
        headers: HeaderMap,
    ) -> Result<RedfishResponse, RedfishError>
    where
        T: Serialize + ::std::fmt::Debug,
    {
        self.req_with_headers(Method::PATCH, api, Some(data), headers, None)
            .await
    }

    pub async fn delete(&self, api: &str) -> Result<RedfishResponse, RedfishError> {
        self.req::<()>(Method::DELETE, api, None, None).await
    }

    /// Multipart POST. iLO's firmware repository wants the session key both as a form
    /// field and as a cookie, so the cookie is set here from the session token.
    pub async fn post_multipart(
        &self,
        api: &str,
        form: Form,
        override_timeout: Option<Duration>,
    ) -> Result<RedfishResponse, RedfishError> {
        let url = self.url_for(api);
        debug!("TX POST {} <multipart>", url);
        let mut req_b = self
            .http_client
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .multipart(form);
        if let Auth::Token(token) = &self.auth {
            req_b = req_b.header(COOKIE, format!("sessionKey={token}"));
        }
        req_b = self.with_auth(req_b);
        if let Some(t) = override_timeout {
            req_b = req_b.timeout(t);
        }
        let response = req_b.send().await.map_err(|e| RedfishError::NetworkError {
            url: url.clone(),
            source: e,
        })?;
        Self::read_response(url, response).await
    }

    fn with_auth(&self, req_b: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::None => req_b,
            Auth::Basic { user, password } => req_b.basic_auth(user, password.as_ref()),
            Auth::Token(token) => req_b.header("X-Auth-Token", token),
        }
    }

    pub async fn req<B>(
        &self,
        method: Method,
        api: &str,
        body: Option<B>,
        override_timeout: Option<Duration>,
    ) -> Result<RedfishResponse, RedfishError>
    where
        B: Serialize + ::std::fmt::Debug,
    {
        self.req_with_headers(method, api, body, HeaderMap::new(), override_timeout)
            .await
    }

    // All the JSON HTTP requests happen from here.
    async fn req_with_headers<B>(
        &self,
        method: Method,
        api: &str,
        body: Option<B>,
        headers: HeaderMap,
        override_timeout: Option<Duration>,
    ) -> Result<RedfishResponse, RedfishError>
    where
        B: Serialize + ::std::fmt::Debug,
    {
        let url = self.url_for(api);
        // Log the Debug form so types holding secrets can redact themselves.
        let body_dbg = body.as_ref().map(|b| format!("{b:?}")).unwrap_or_default();
        let body_enc = match body {
            Some(b) => {
                let body_enc =
                    serde_json::to_string(&b).map_err(|e| RedfishError::JsonSerializeError {
                        url: url.clone(),
                        object_debug: format!("{b:?}"),
                        source: e,
                    })?;
                Some(body_enc)
            }
            None => None,
        };
        debug!("TX {} {} {}", method, url, body_dbg);

        let mut req_b = self
            .http_client
            .request(method, &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .headers(headers);
        req_b = self.with_auth(req_b);
        if let Some(t) = override_timeout {
            req_b = req_b.timeout(t);
        }
        if let Some(b) = body_enc {
            req_b = req_b.body(b);
        }
        let response = req_b.send().await.map_err(|e| RedfishError::NetworkError {
            url: url.clone(),
            source: e,
        })?;
        Self::read_response(url, response).await
    }

    async fn read_response(
        url: String,
        response: reqwest::Response,
    ) -> Result<RedfishResponse, RedfishError> {
        let status_code = response.status();
        let headers = response.headers().clone();
        // read the body even if not status 2XX, because iLO puts its error details in it
        let response_body = response
            .text()
            .await
            .map_err(|e| RedfishError::NetworkError {
                url: url.clone(),
                source: e,
            })?;
        if response_body.is_empty() {
            debug!("RX {status_code}");
        } else {
            debug!("RX {status_code} {response_body}");
        }

        if status_code == StatusCode::UNAUTHORIZED {
            return Err(RedfishError::SessionInvalid { url });
        }
        if !status_code.is_success() {
            let extended_info = serde_json::from_str::<serde_json::Value>(&response_body)
                .map(|v| extended_info_ids(&v))
                .unwrap_or_default();
            return Err(RedfishError::HTTPErrorCode {
                url,
                status_code,
                extended_info,
            });
        }

        let body = if response_body.trim().is_empty() {
            None
        } else {
            match serde_json::from_str(&response_body) {
                Ok(v) => Some(v),
                Err(e) => {
                    return Err(RedfishError::JsonDeserializeError {
                        url,
                        body: response_body,
                        source: e,
                    });
                }
            }
        };
        Ok(RedfishResponse {
            status: status_code,
            body,
            headers,
        })
    }
}

/// MessageIds out of `{"error": {"@Message.ExtendedInfo": [{"MessageId": ...}]}}`.
pub fn extended_info_ids(body: &serde_json::Value) -> Vec<String> {
    body.pointer("/error/@Message.ExtendedInfo")
        .and_then(|v| v.as_array())
        .map(|infos| {
            infos
                .iter()
                .filter_map(|i| i.get("MessageId").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
