//! Status documents read by the CLI.
//!
//! A status document is a JSON object with an optional `conditions` array.
//! Every other field is carried through untouched so the CLI can edit the
//! status section of any resource.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::{Condition, ConditionType, ConditionsAccessor};
use crate::error::{ConditionsError, Result};

/// Maximum document size accepted from a file or stdin (4 MB).
pub const MAX_DOCUMENT_SIZE: u64 = 4 * 1024 * 1024;

/// A resource status section with a condition set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusDocument {
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub conditions: Vec<Condition>,
    /// Fields other than `conditions`, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatusDocument {
    /// Parse a document from JSON text. Blank input is an empty document.
    ///
    /// Empty, malformed or duplicate condition types are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let doc: Self = serde_json::from_str(text)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check that every condition type is a valid identifier and appears once.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.conditions.len());
        for condition in &self.conditions {
            let type_ = ConditionType::parse(condition.type_.as_str())?;
            if !seen.insert(type_) {
                return Err(ConditionsError::invalid_type(format!(
                    "{} (duplicate)",
                    condition.type_
                )));
            }
        }
        Ok(())
    }

    /// Read a document from `path`, or from stdin when `path` is `None`.
    pub fn read(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let metadata = fs::metadata(path).map_err(|e| ConditionsError::io(path, e))?;
                if metadata.len() > MAX_DOCUMENT_SIZE {
                    return Err(ConditionsError::serde(format!(
                        "{} is too large ({} bytes, max {} bytes)",
                        path.display(),
                        metadata.len(),
                        MAX_DOCUMENT_SIZE
                    )));
                }
                let text = fs::read_to_string(path).map_err(|e| ConditionsError::io(path, e))?;
                Self::parse(&text)
            }
            None => Self::from_reader(std::io::stdin().lock()),
        }
    }

    /// Read a document from any reader, enforcing the size limit.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader
            .take(MAX_DOCUMENT_SIZE + 1)
            .read_to_string(&mut text)
            .map_err(|e| ConditionsError::io("<stdin>", e))?;
        if text.len() as u64 > MAX_DOCUMENT_SIZE {
            return Err(ConditionsError::serde(format!(
                "input is too large (max {} bytes)",
                MAX_DOCUMENT_SIZE
            )));
        }
        Self::parse(&text)
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }
}

/// Go-serialized statuses write an unset slice as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Condition>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConditionsAccessor for StatusDocument {
    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.conditions = conditions;
    }
}
