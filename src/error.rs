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

use thiserror::Error;

/// Errors returned by [`DnsClient`](crate::client::DnsClient) operations.
///
/// Service-level failures (`"success": "error"` in the payload) are not errors
/// here; they arrive inside the decoded response.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport could not complete the request.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body is not valid JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Error::InvalidArgument(format!("token is not a valid header value: {}", err))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
