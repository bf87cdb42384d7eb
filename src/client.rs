// Copyright 2026 yandex-pdd-dns authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fmt;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use crate::error::{Error, Result};
use crate::record::{RecordParams, RecordType, field};
use crate::utils::request::{DefaultDnsClient, DnsHttpClient};

/// Root of the PDD API, up to and including the version segment.
const API_BASE: &str = "https://pddimp.yandex.ru/api2";
/// Service segment following the access mode.
const SERVICE: &str = "dns";
/// Header carrying the PDD administrator token. Header names are case-insensitive.
const PDD_TOKEN: HeaderName = HeaderName::from_static("pddtoken");

/// Privilege tier addressed by the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// Domain owner access with a PDD token.
    Admin,
    /// Registrar access with an OAuth token.
    Registrar,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Admin => "admin",
            AccessMode::Registrar => "registrar",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for one domain. Immutable once a client is built.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub domain_name: String,
    #[serde(default)]
    pub pdd_token: String,
    #[serde(default)]
    pub oauth_token: String,
}

impl ClientConfig {
    pub fn new(
        domain_name: impl Into<String>,
        pdd_token: impl Into<String>,
        oauth_token: impl Into<String>,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            pdd_token: pdd_token.into(),
            oauth_token: oauth_token.into(),
        }
    }

    /// Registrar when an OAuth token is present, admin otherwise.
    pub fn access_mode(&self) -> AccessMode {
        if self.oauth_token.is_empty() {
            AccessMode::Admin
        } else {
            AccessMode::Registrar
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |token: &str| if token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ClientConfig")
            .field("domain_name", &self.domain_name)
            .field("pdd_token", &redact(&self.pdd_token))
            .field("oauth_token", &redact(&self.oauth_token))
            .finish()
    }
}

/// Endpoint under `dns/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Add,
    Edit,
    Del,
}

impl Action {
    fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Add => "add",
            Action::Edit => "edit",
            Action::Del => "del",
        }
    }

    fn method(&self) -> Method {
        match self {
            Action::List => Method::GET,
            _ => Method::POST,
        }
    }
}

/// Record operations exposed by the DNS API.
///
/// Every call returns the decoded JSON body untouched. The service reports its
/// own failures inside that body (`"success": "error"`), callers check it.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Lists all records of the configured domain.
    async fn records(&self) -> Result<Value>;

    /// Creates a record. `record_type` is matched case-insensitively against
    /// [`RecordType`]; unknown types fail before anything is sent.
    async fn add(&self, record_type: &str, params: RecordParams) -> Result<Value>;

    /// Changes the fields given in `params` on record `record_id`.
    async fn edit(&self, record_id: u64, params: RecordParams) -> Result<Value>;

    /// Deletes record `record_id`.
    async fn remove(&self, record_id: u64) -> Result<Value>;
}

/// Client for the `dns/*` endpoints of one domain.
#[derive(Debug)]
pub struct DnsClient<T: DnsHttpClient = DefaultDnsClient> {
    /// HTTP transport
    http_client: T,
    config: ClientConfig,
    /// Fixed at construction
    access_mode: AccessMode,
}

impl DnsClient<DefaultDnsClient> {
    /// Creates a client using the default reqwest transport. Pass `""` for an
    /// absent token.
    pub fn new(
        domain_name: impl Into<String>,
        pdd_token: impl Into<String>,
        oauth_token: impl Into<String>,
    ) -> Self {
        Self::with_transport(
            ClientConfig::new(domain_name, pdd_token, oauth_token),
            DefaultDnsClient::new(),
        )
    }
}

impl<T: DnsHttpClient> DnsClient<T> {
    pub fn with_transport(config: ClientConfig, http_client: T) -> Self {
        let access_mode = config.access_mode();
        Self {
            http_client,
            config,
            access_mode,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn domain_name(&self) -> &str {
        &self.config.domain_name
    }

    pub fn pdd_token(&self) -> &str {
        &self.config.pdd_token
    }

    pub fn oauth_token(&self) -> &str {
        &self.config.oauth_token
    }

    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    pub fn http_client(&self) -> &T {
        &self.http_client
    }

    fn service_url(&self, action: Action) -> Result<Url> {
        let url = format!("{}/{}/{}/{}", API_BASE, self.access_mode, SERVICE, action.as_str());
        Url::parse(&url).map_err(|e| Error::InvalidArgument(format!("bad service url {}: {}", url, e)))
    }

    /// Builds the URL and headers for `action`. `domain` is always added to
    /// `params` and wins over a caller-supplied value.
    fn prepare(&self, action: Action, mut params: RecordParams) -> Result<(Url, HeaderMap)> {
        params.insert(field::DOMAIN, self.config.domain_name.as_str());

        // The service reads parameters from the query string, POST included.
        let mut url = self.service_url(action)?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(key, value)| (key, value.to_string())));

        let mut headers = HeaderMap::new();
        let mut pdd_token = HeaderValue::from_str(&self.config.pdd_token)?;
        pdd_token.set_sensitive(true);
        headers.insert(PDD_TOKEN, pdd_token);
        if !self.config.oauth_token.is_empty() {
            let mut oauth_token = HeaderValue::from_str(&self.config.oauth_token)?;
            oauth_token.set_sensitive(true);
            headers.insert(AUTHORIZATION, oauth_token);
        }

        Ok((url, headers))
    }

    async fn send(&self, action: Action, params: RecordParams) -> Result<Value> {
        let (url, headers) = self.prepare(action, params)?;
        let method = action.method();
        debug!(
            %method,
            action = action.as_str(),
            access = %self.access_mode,
            domain = %self.config.domain_name,
            "sending dns request"
        );

        let response = self.http_client.request(method, url, headers).await?;
        debug!(
            action = action.as_str(),
            status = response.status.as_u16(),
            "decoding dns response"
        );

        Ok(serde_json::from_str(&response.body)?)
    }
}

#[async_trait]
impl<T: DnsHttpClient> RecordApi for DnsClient<T> {
    async fn records(&self) -> Result<Value> {
        self.send(Action::List, RecordParams::new()).await
    }

    async fn add(&self, record_type: &str, mut params: RecordParams) -> Result<Value> {
        let record_type = record_type.parse::<RecordType>().inspect_err(|_| {
            warn!(record_type = %record_type, "rejected unknown record type");
        })?;
        params.insert(field::TYPE, record_type);
        self.send(Action::Add, params).await
    }

    async fn edit(&self, record_id: u64, mut params: RecordParams) -> Result<Value> {
        params.insert(field::RECORD_ID, record_id);
        self.send(Action::Edit, params).await
    }

    async fn remove(&self, record_id: u64) -> Result<Value> {
        let params = RecordParams::new().with(field::RECORD_ID, record_id);
        self.send(Action::Del, params).await
    }
}

/// Builder for [`DnsClient`].
#[derive(Debug, Clone)]
pub struct DnsClientBuilder {
    domain_name: String,
    pdd_token: Option<String>,
    oauth_token: Option<String>,
}

impl DnsClientBuilder {
    pub fn new(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            pdd_token: None,
            oauth_token: None,
        }
    }

    /// Sets a configuration parameter by name.
    ///
    /// Supported keys:
    /// - "pdd_token"
    /// - "oauth_token"
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] for any other key.
    pub fn set_param(mut self, key: &str, value: &str) -> Result<Self> {
        match key {
            "pdd_token" => self.pdd_token = Some(value.into()),
            "oauth_token" => self.oauth_token = Some(value.into()),
            _ => return Err(Error::InvalidArgument(format!("Invalid parameter: {}", key))),
        }
        Ok(self)
    }

    pub fn pdd_token(mut self, token: impl Into<String>) -> Self {
        self.pdd_token = Some(token.into());
        self
    }

    pub fn oauth_token(mut self, token: impl Into<String>) -> Self {
        self.oauth_token = Some(token.into());
        self
    }

    /// The configuration the built client will use. Unset tokens are empty.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(
            self.domain_name.clone(),
            self.pdd_token.clone().unwrap_or_default(),
            self.oauth_token.clone().unwrap_or_default(),
        )
    }

    pub fn build(self) -> DnsClient<DefaultDnsClient> {
        self.build_with(DefaultDnsClient::new())
    }

    pub fn build_with<T: DnsHttpClient>(self, http_client: T) -> DnsClient<T> {
        DnsClient::with_transport(self.config(), http_client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::request::HttpResponse;

    /// Transport that must never be reached.
    struct Unreachable;

    impl DnsHttpClient for Unreachable {
        async fn request(&self, _: Method, url: Url, _: HeaderMap) -> Result<HttpResponse> {
            panic!("unexpected request to {}", url);
        }
    }

    fn client(oauth_token: &str) -> DnsClient<Unreachable> {
        DnsClient::with_transport(ClientConfig::new("example.com", "pdd-secret", oauth_token), Unreachable)
    }

    #[test]
    fn access_mode_follows_oauth_token() {
        assert_eq!(client("").access_mode(), AccessMode::Admin);
        assert_eq!(client("oauth").access_mode(), AccessMode::Registrar);
        assert_eq!(ClientConfig::new("a.test", "", " ").access_mode(), AccessMode::Registrar);
    }

    #[test]
    fn list_url_carries_only_the_domain() {
        let (url, _) = client("").prepare(Action::List, RecordParams::new()).unwrap();
        assert_eq!(url.as_str(), "https://pddimp.yandex.ru/api2/admin/dns/list?domain=example.com");
    }

    #[test]
    fn registrar_mode_changes_path_and_adds_authorization() {
        let (url, headers) = client("oauth-secret")
            .prepare(Action::Del, RecordParams::new().with(field::RECORD_ID, 42))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://pddimp.yandex.ru/api2/registrar/dns/del?domain=example.com&record_id=42"
        );
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "oauth-secret");
        assert_eq!(headers.get("PddToken").unwrap(), "pdd-secret");
    }

    #[test]
    fn admin_mode_sends_no_authorization_header() {
        let (_, headers) = client("").prepare(Action::List, RecordParams::new()).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(PDD_TOKEN).unwrap().is_sensitive());
    }

    #[test]
    fn empty_pdd_token_is_still_sent() {
        let client = DnsClient::with_transport(ClientConfig::new("example.com", "", ""), Unreachable);
        let (_, headers) = client.prepare(Action::List, RecordParams::new()).unwrap();
        assert_eq!(headers.get(PDD_TOKEN).unwrap(), "");
    }

    #[test]
    fn domain_cannot_be_overridden_by_params() {
        let params = RecordParams::new().with(field::DOMAIN, "evil.test");
        let (url, _) = client("").prepare(Action::Edit, params).unwrap();
        assert_eq!(url.query(), Some("domain=example.com"));
    }

    #[test]
    fn query_values_are_form_encoded() {
        let params = RecordParams::new()
            .with(field::CONTENT, "v=spf1 include:_spf.example.net ~all")
            .with(field::ADMIN_MAIL, "hostmaster@example.com");
        let (url, _) = client("").prepare(Action::Add, params).unwrap();
        assert_eq!(
            url.query(),
            Some(
                "admin_mail=hostmaster%40example.com\
                 &content=v%3Dspf1+include%3A_spf.example.net+%7Eall\
                 &domain=example.com"
            )
        );
    }

    #[test]
    fn token_with_newline_is_rejected_before_sending() {
        let client = DnsClient::with_transport(ClientConfig::new("example.com", "bad\ntoken", ""), Unreachable);
        let err = client.prepare(Action::List, RecordParams::new()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn builder_rejects_unknown_keys() {
        let err = DnsClientBuilder::new("example.com").set_param("secret", "x").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: Invalid parameter: secret");

        let config = DnsClientBuilder::new("example.com")
            .set_param("oauth_token", "oauth")
            .unwrap()
            .config();
        assert_eq!(config.pdd_token, "");
        assert_eq!(config.access_mode(), AccessMode::Registrar);
    }

    #[test]
    fn config_debug_hides_tokens() {
        let rendered = format!("{:?}", ClientConfig::new("example.com", "pdd-secret", ""));
        assert!(!rendered.contains("pdd-secret"));
        assert!(rendered.contains("example.com"));
    }

    #[test]
    fn config_deserializes_with_optional_tokens() {
        let config: ClientConfig = serde_json::from_str(r#"{"domain_name": "example.com"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("example.com", "", ""));
    }
}
