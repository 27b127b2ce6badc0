//! Mark commands: set one condition to True, False or Unknown.

use super::document::StatusDocument;
use crate::config::Config;
use crate::core::{ConditionStatus, ConditionType, Marker};
use crate::error::Result;

/// Options for a mark command.
#[derive(Debug, Clone)]
pub struct MarkOptions {
    /// Condition type to mark.
    pub type_: String,
    /// Status to set.
    pub status: ConditionStatus,
    /// Machine-readable reason (ignored for True).
    pub reason: String,
    /// Human-readable message (ignored for True).
    pub message: String,
}

impl MarkOptions {
    pub fn new(type_: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            type_: type_.into(),
            status,
            reason: String::new(),
            message: String::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>, message: impl Into<String>) -> Self {
        self.reason = reason.into();
        self.message = message.into();
        self
    }
}

/// Summary of a mark, for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkOutcome {
    pub type_: String,
    pub status: ConditionStatus,
    /// Whether `lastTransitionTime` was refreshed.
    pub transitioned: bool,
}

/// The mark command implementation.
pub struct MarkCommand {
    marker: Marker,
}

impl MarkCommand {
    /// Create a mark command using the configured transition policy.
    pub fn new(config: &Config) -> Self {
        Self {
            marker: config.marker(),
        }
    }

    /// Apply the mark to `doc`.
    ///
    /// The type is validated before anything is touched. `True` always
    /// clears reason and message.
    pub fn run(&self, doc: &mut StatusDocument, options: &MarkOptions) -> Result<MarkOutcome> {
        let type_ = ConditionType::parse(&options.type_)?;
        let transitioned = match options.status {
            ConditionStatus::True => self.marker.mark(doc, type_, ConditionStatus::True, "", ""),
            status => self
                .marker
                .mark(doc, type_, status, &options.reason, &options.message),
        };

        tracing::info!(
            condition = %options.type_,
            status = %options.status,
            transitioned,
            "marked condition"
        );

        Ok(MarkOutcome {
            type_: options.type_.clone(),
            status: options.status,
            transitioned,
        })
    }
}
