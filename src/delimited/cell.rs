//! Single field values with typed accessors.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value within a row.
///
/// Wraps an optional string. Typed accessors attempt a conversion and
/// return `None` when the value is absent or does not parse; conversion
/// failure is never an error. Equality and hashing are by string value,
/// and an absent value is distinct from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    value: Option<String>,
}

impl Cell {
    /// Create a cell holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Cell {
            value: Some(value.into()),
        }
    }

    /// Create a cell with no value.
    pub const fn empty() -> Self {
        Cell { value: None }
    }

    /// The raw value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value as a string slice, empty when absent.
    pub fn as_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Replace the value in place.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Remove the value.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Whether the cell holds no value or an empty string.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    /// The value parsed as a 32-bit integer.
    pub fn as_i32(&self) -> Option<i32> {
        atoi_simd::parse::<_, false, false>(self.as_str().as_bytes()).ok()
    }

    /// The value parsed as a 64-bit integer.
    pub fn as_i64(&self) -> Option<i64> {
        atoi_simd::parse::<_, false, false>(self.as_str().as_bytes()).ok()
    }

    /// The value parsed as a 64-bit float.
    pub fn as_f64(&self) -> Option<f64> {
        fast_float2::parse(self.as_str()).ok()
    }

    /// The value parsed as a boolean word, case-insensitive
    /// (`true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`).
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_str().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    /// The value parsed as a calendar date (`YYYY-MM-DD`).
    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.as_str(), "%Y-%m-%d").ok()
    }

    /// The value parsed as a timestamp (`YYYY-MM-DD HH:MM:SS`, with a `T`
    /// separator also accepted).
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        let value = self.as_str();
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::new(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::new(value)
    }
}
