//! Client for the Yandex PDD (Mail for Domain) DNS management API
//!
//! Supported features:
//! - Listing, adding, editing and removing DNS records of one domain
//! - Admin access with a PDD token, registrar access with an OAuth token
//! - Pluggable HTTP transport, reqwest by default
//!
//! # Example
//! ```no_run
//! use yandex_pdd_dns::{DnsClient, RecordApi, record_params};
//!
//! # async fn run() -> yandex_pdd_dns::Result<()> {
//! let client = DnsClient::new("example.com", "your_pdd_token", "");
//! let created = client
//!     .add("A", record_params! { subdomain => "www", content => "192.0.2.10", ttl => 3600 })
//!     .await?;
//! println!("{}", created);
//! # Ok(())
//! # }
//! ```

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

extern crate self as yandex_pdd_dns;

pub mod client;
pub mod error;
pub mod record;
pub mod utils;

pub use client::{AccessMode, ClientConfig, DnsClient, DnsClientBuilder, RecordApi};
pub use error::{Error, Result};
pub use pdd_dns_macros::record_params;
pub use record::{ParamValue, RecordParams, RecordType};
pub use serde_json::Value;
