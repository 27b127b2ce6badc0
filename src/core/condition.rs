//! Condition record types.
//!
//! A [`Condition`] is one named health fact about a resource. The JSON shape
//! follows the Kubernetes `status.conditions` convention so the record can be
//! embedded directly in custom resource status sections.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConditionsError, Result};

/// Name of the aggregate condition maintained by [`sync_ready`](crate::core::sync_ready).
pub const READY: &str = "Ready";

/// Identifier of a condition, unique within a set (e.g. "Database", "Ready").
///
/// Ordering is byte-wise lexicographic on the underlying string. The special
/// placement of `Ready` is handled by the set comparator, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionType(String);

impl ConditionType {
    /// Create a condition type without validation.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The aggregate `Ready` type.
    pub fn ready() -> Self {
        Self(READY.to_string())
    }

    /// Parse an identifier from untrusted input.
    ///
    /// Rejects empty identifiers and identifiers containing whitespace.
    pub fn parse(value: &str) -> Result<Self> {
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(ConditionsError::invalid_type(value));
        }
        Ok(Self(value.to_string()))
    }

    /// Whether this is the aggregate `Ready` type.
    pub fn is_ready(&self) -> bool {
        self.0 == READY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConditionType {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ConditionType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&ConditionType> for ConditionType {
    fn from(value: &ConditionType) -> Self {
        value.clone()
    }
}

impl AsRef<str> for ConditionType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConditionType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConditionType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConditionType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Tri-state condition status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionStatus {
    type Err = ConditionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "True" => Ok(ConditionStatus::True),
            "False" => Ok(ConditionStatus::False),
            "Unknown" => Ok(ConditionStatus::Unknown),
            other => Err(ConditionsError::invalid_status(other)),
        }
    }
}

/// A single entry in a `status.conditions` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: ConditionType,
    pub status: ConditionStatus,
    /// Short machine-readable reason. Omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    /// Human-readable explanation. Omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Time of the last significant change, in UTC.
    #[serde(
        rename = "lastTransitionTime",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rfc3339"
    )]
    pub last_transition_time: Option<DateTime<Utc>>,
}

impl Condition {
    /// Create a condition stamped with the given transition time.
    pub fn new(
        type_: impl Into<ConditionType>,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            type_: type_.into(),
            status,
            reason: reason.into(),
            message: message.into(),
            last_transition_time: Some(now),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.type_.is_ready()
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }

    pub fn is_false(&self) -> bool {
        self.status == ConditionStatus::False
    }

    pub fn is_unknown(&self) -> bool {
        self.status == ConditionStatus::Unknown
    }
}

/// RFC 3339 timestamps with a `Z` suffix, as Kubernetes writes them.
///
/// Fractional seconds are printed with trailing zeros trimmed, and dropped
/// entirely for whole seconds.
mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        let full = ts.to_rfc3339_opts(SecondsFormat::Nanos, true);
        // Nanos always yields "<date>T<time>.<9 digits>Z".
        let Some((head, fraction)) = full.trim_end_matches('Z').split_once('.') else {
            return full;
        };
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            format!("{}Z", head)
        } else {
            format!("{}.{}Z", head, fraction)
        }
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&format(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(de::Error::custom),
        }
    }
}
