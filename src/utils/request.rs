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

use reqwest::{Client, Method, StatusCode, Url, header::HeaderMap};
use tracing::debug;
use crate::error::Result;

/// Raw response handed back by a transport. Decoding is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP transport used by [`DnsClient`](crate::client::DnsClient).
///
/// Implementations send exactly one request and return the full body as text.
/// Timeouts, retries, TLS and pooling belong to the implementation.
pub trait DnsHttpClient: Send + Sync {
    fn request(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<HttpResponse>> + Send;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct DefaultDnsClient {
    inner: Client,
}

impl DefaultDnsClient {
    pub fn new() -> Self {
        Self {
            inner: Client::new(),
        }
    }

    /// Uses a preconfigured client, e.g. one built with timeouts or a proxy.
    pub fn with_client(inner: Client) -> Self {
        Self { inner }
    }
}

impl Default for DefaultDnsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsHttpClient for DefaultDnsClient {
    async fn request(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
    ) -> Result<HttpResponse> {
        let response = self.inner.request(method, url).headers(headers).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}
