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

//! Record types and request parameters for the DNS endpoints.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::Error;

/// Query parameter names understood by the `dns/*` endpoints.
///
/// The client only ever sets `domain`, `type` and `record_id` itself; the rest
/// are passed through untouched and validated by the service.
pub mod field {
    pub const CONTENT: &str = "content";
    pub const SUBDOMAIN: &str = "subdomain";
    pub const TTL: &str = "ttl";
    pub const PRIORITY: &str = "priority";
    pub const WEIGHT: &str = "weight";
    pub const PORT: &str = "port";
    pub const TARGET: &str = "target";
    pub const ADMIN_MAIL: &str = "admin_mail";
    pub const REFRESH: &str = "refresh";
    pub const RETRY: &str = "retry";
    pub const EXPIRE: &str = "expire";
    pub const NEG_CACHE: &str = "neg_cache";
    pub const RECORD_ID: &str = "record_id";
    pub const TYPE: &str = "type";
    pub const DOMAIN: &str = "domain";
}

/// DNS record types accepted by the `add` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Srv,
    Txt,
    Soa,
}

impl RecordType {
    pub const ALL: [RecordType; 8] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Cname,
        RecordType::Mx,
        RecordType::Ns,
        RecordType::Srv,
        RecordType::Txt,
        RecordType::Soa,
    ];

    /// Lowercase value sent in the `type` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "a",
            RecordType::Aaaa => "aaaa",
            RecordType::Cname => "cname",
            RecordType::Mx => "mx",
            RecordType::Ns => "ns",
            RecordType::Srv => "srv",
            RecordType::Txt => "txt",
            RecordType::Soa => "soa",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    /// Case-insensitive lookup, so `"TXT"`, `"txt"` and `"Txt"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .iter()
            .copied()
            .find(|record_type| record_type.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown record type: {}.", s)))
    }
}

/// A single parameter value. The service takes everything as query text,
/// numbers are kept apart only so callers don't have to format them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Number(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<RecordType> for ParamValue {
    fn from(value: RecordType) -> Self {
        ParamValue::Text(value.as_str().to_string())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Number(value as i64)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ParamValue {
    /// Values above `i64::MAX` are kept as text.
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(number) => ParamValue::Number(number),
            Err(_) => ParamValue::Text(value.to_string()),
        }
    }
}

/// Open set of record fields sent as query parameters.
///
/// Keys are kept sorted so the encoded query string is stable for the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordParams {
    inner: BTreeMap<String, ParamValue>,
}

impl RecordParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value. Returns the replaced value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.inner.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.inner.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.inner.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.inner.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for RecordParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RecordParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for RecordParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for RecordParams {
    type Item = (String, ParamValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parses_case_insensitively() {
        assert_eq!("TXT".parse::<RecordType>().unwrap(), RecordType::Txt);
        assert_eq!("txt".parse::<RecordType>().unwrap(), RecordType::Txt);
        assert_eq!("Aaaa".parse::<RecordType>().unwrap(), RecordType::Aaaa);
        assert_eq!(RecordType::Txt.to_string(), "txt");
    }

    #[test]
    fn every_record_type_round_trips_through_its_wire_value() {
        for record_type in RecordType::ALL {
            let upper = record_type.as_str().to_uppercase();
            assert_eq!(upper.parse::<RecordType>().unwrap(), record_type);
        }
    }

    #[test]
    fn unknown_record_type_is_invalid_argument() {
        let err = "bogus".parse::<RecordType>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Invalid argument: Unknown record type: bogus.");
        assert!(" txt".parse::<RecordType>().is_err());
        assert!("".parse::<RecordType>().is_err());
    }

    #[test]
    fn record_type_serde_uses_wire_value() {
        assert_eq!(serde_json::to_string(&RecordType::Cname).unwrap(), "\"cname\"");
        let parsed: RecordType = serde_json::from_str("\"srv\"").unwrap();
        assert_eq!(parsed, RecordType::Srv);
    }

    #[test]
    fn params_insert_overrides_and_keeps_keys_sorted() {
        let mut params = RecordParams::new()
            .with(field::TTL, 300)
            .with(field::CONTENT, "192.0.2.1")
            .with(field::SUBDOMAIN, "www");
        assert_eq!(params.insert(field::TTL, 600), Some(ParamValue::Number(300)));

        let keys: Vec<&str> = params.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["content", "subdomain", "ttl"]);
        assert_eq!(params.get(field::TTL).unwrap().to_string(), "600");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn large_unsigned_values_fall_back_to_text() {
        assert_eq!(ParamValue::from(42u64), ParamValue::Number(42));
        assert_eq!(ParamValue::from(u64::MAX), ParamValue::Text(u64::MAX.to_string()));
    }

    #[test]
    fn params_deserialize_from_json_object() {
        let params: RecordParams =
            serde_json::from_str(r#"{"content": "mail.example.com", "priority": 10}"#).unwrap();
        assert_eq!(params.get(field::CONTENT), Some(&ParamValue::Text("mail.example.com".into())));
        assert_eq!(params.get(field::PRIORITY), Some(&ParamValue::Number(10)));
    }
}
