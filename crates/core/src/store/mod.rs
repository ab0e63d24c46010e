use std::{collections::BTreeMap, fmt, io, str::FromStr};

use serde::Serialize;
use tracing::{debug, trace};

use crate::{flatten, structured::parse_decimal, ParamsError, Result};

/// Returned by [`ParameterMap::get_int`] and [`ParameterMap::get_int64`] when
/// a key is absent or unreadable.
pub const INT_SENTINEL: i32 = -1;
/// Returned by [`ParameterMap::get_float`] when a key is absent or unreadable.
pub const FLOAT_SENTINEL: f32 = -1.0;

/// Characters reserved by the flattened wire format.
pub const RESERVED_DELIMITERS: [char; 2] = [flatten::KEY_VALUE_SEPARATOR, flatten::ENTRY_SEPARATOR];

/// String-backed parameter store exchanged with the camera driver.
///
/// Keys are case sensitive and kept in byte-wise order so that
/// [`flatten`](Self::flatten) is deterministic. Values are plain strings; the
/// typed accessors in [`crate::camera`] interpret well-known keys.
///
/// The map is not synchronised. Owners that share it between threads must
/// serialise access themselves. `Clone` is a deep copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: BTreeMap<String, String>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from a flattened `key=value;key=value` string.
    pub fn from_flattened(text: &str) -> Self {
        flatten::unflatten(text)
    }

    /// Serialises every entry into the wire format.
    pub fn flatten(&self) -> String {
        flatten::flatten(self)
    }

    /// Replaces the whole content of the map with the entries in `text`.
    pub fn unflatten(&mut self, text: &str) {
        *self = flatten::unflatten(text);
    }

    /// Inserts or overwrites `key`. Fails without touching the map when the
    /// key is empty or either side contains `=` or `;`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        if value.contains(RESERVED_DELIMITERS) {
            return Err(ParamsError::invalid_value(key, value));
        }

        trace!(key, value, "set parameter");
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Stores `value` as a plain decimal integer.
    pub fn set_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.set(key, &value.to_string())
    }

    /// Stores `value` using the shortest decimal form that reads back as the
    /// same `f32`.
    pub fn set_float(&mut self, key: &str, value: f32) -> Result<()> {
        self.set(key, &value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Reads `key` as a decimal `i32`, or [`INT_SENTINEL`].
    pub fn get_int(&self, key: &str) -> i32 {
        self.parse_scalar(key, parse_decimal::<i32>)
            .unwrap_or(INT_SENTINEL)
    }

    /// Reads `key` as a decimal `i64`, or [`INT_SENTINEL`].
    pub fn get_int64(&self, key: &str) -> i64 {
        self.parse_scalar(key, parse_decimal::<i64>)
            .unwrap_or(i64::from(INT_SENTINEL))
    }

    /// Reads `key` as an `f32`, or [`FLOAT_SENTINEL`].
    ///
    /// A leading `+` is rejected as for integers. Exponents (`1e5`) and the
    /// `inf`/`NaN` spellings that `set_float` itself can write are accepted.
    pub fn get_float(&self, key: &str) -> f32 {
        self.parse_scalar(key, |value| {
            if value.starts_with('+') {
                return None;
            }
            value.parse::<f32>().ok()
        })
        .unwrap_or(FLOAT_SENTINEL)
    }

    /// Deletes `key`. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            trace!(key, "removed parameter");
        }
        removed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Logs every entry at debug level.
    pub fn dump(&self) {
        debug!(entries = self.len(), "dumping camera parameters");
        for (key, value) in self.iter() {
            debug!("{key}: {value}");
        }
    }

    /// Writes one `key: value` line per entry.
    pub fn dump_to<W: io::Write>(&self, mut writer: W) -> Result<()> {
        for (key, value) in self.iter() {
            writeln!(writer, "{key}: {value}")?;
        }
        Ok(())
    }

    /// Stores a value produced by one of the structured formatters. Those never
    /// emit reserved delimiters, so no validation is repeated here.
    pub(crate) fn put(&mut self, key: &str, value: String) {
        debug_assert!(!value.contains(RESERVED_DELIMITERS));
        trace!(key, value = value.as_str(), "set parameter");
        self.entries.insert(key.to_string(), value);
    }

    /// Inserts an entry read from the wire without delimiter checks. Only
    /// values can carry an extra `=` this way; keys are split on the first one.
    pub(crate) fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn parse_scalar<T>(&self, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        let raw = self.get(key)?;
        let parsed = parse(raw);
        if parsed.is_none() {
            debug!(key, value = raw, "parameter is not a number");
        }
        parsed
    }
}

impl FromStr for ParameterMap {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_flattened(s))
    }
}

impl fmt::Display for ParameterMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten())
    }
}

pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains(RESERVED_DELIMITERS) {
        return Err(ParamsError::InvalidKey(key.to_string()));
    }
    Ok(())
}
