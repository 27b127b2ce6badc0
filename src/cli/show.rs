//! Read-only commands: show the condition set and test a condition.

use chrono::SecondsFormat;

use super::document::StatusDocument;
use crate::core::{is_true, ConditionType};
use crate::error::Result;

/// Options for the show command.
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    /// Output as JSON.
    pub json: bool,
}

/// The show command implementation.
#[derive(Debug, Default)]
pub struct ShowCommand;

impl ShowCommand {
    pub fn new() -> Self {
        Self
    }

    /// Render the conditions of `doc`.
    pub fn run(&self, doc: &StatusDocument, options: &ShowOptions) -> Result<String> {
        if options.json {
            let mut text = serde_json::to_string_pretty(&doc.conditions)?;
            text.push('\n');
            return Ok(text);
        }
        Ok(Self::format_human_readable(doc))
    }

    fn format_human_readable(doc: &StatusDocument) -> String {
        if doc.conditions.is_empty() {
            return "No conditions.\n".to_string();
        }

        let type_width = doc
            .conditions
            .iter()
            .map(|c| c.type_.as_str().len())
            .max()
            .unwrap_or(0)
            .max("TYPE".len());
        let reason_width = doc
            .conditions
            .iter()
            .map(|c| c.reason.len())
            .max()
            .unwrap_or(0)
            .max("REASON".len());

        let mut out = format!(
            "{:<tw$}  {:<7}  {:<rw$}  {:<20}  MESSAGE\n",
            "TYPE",
            "STATUS",
            "REASON",
            "LAST TRANSITION",
            tw = type_width,
            rw = reason_width
        );
        for c in &doc.conditions {
            let when = c
                .last_transition_time
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "{:<tw$}  {:<7}  {:<rw$}  {:<20}  {}\n",
                c.type_.as_str(),
                c.status.as_str(),
                c.reason,
                when,
                c.message,
                tw = type_width,
                rw = reason_width
            ));
        }
        out
    }
}

/// The is-true command implementation.
#[derive(Debug, Default)]
pub struct IsTrueCommand;

impl IsTrueCommand {
    pub fn new() -> Self {
        Self
    }

    /// Whether `type_` is present and True in `doc`.
    pub fn run(&self, doc: &StatusDocument, type_: &str) -> Result<bool> {
        let type_ = ConditionType::parse(type_)?;
        Ok(is_true(doc, type_.as_str()))
    }
}
