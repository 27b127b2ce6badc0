//! Ordered condition sets.
//!
//! A condition set is a `Vec<Condition>` unique by type, with `Ready` first
//! and every other entry in ascending byte-wise type order. Every function
//! here that mutates a set leaves it sorted before returning.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::condition::{Condition, ConditionStatus, ConditionType};
use crate::error::{ConditionsError, Result};

/// Rule deciding when an update refreshes `last_transition_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Refresh when the reason string changes, whatever the status does.
    #[default]
    Reason,
    /// Refresh when the status changes.
    Status,
}

/// Valid values for the transition policy setting.
pub const VALID_POLICIES: &[&str] = &["reason", "status"];

impl TransitionPolicy {
    /// Whether replacing `existing` with the given status and reason counts
    /// as a transition.
    pub fn is_transition(
        &self,
        existing: &Condition,
        status: ConditionStatus,
        reason: &str,
    ) -> bool {
        match self {
            TransitionPolicy::Reason => existing.reason != reason,
            TransitionPolicy::Status => existing.status != status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPolicy::Reason => "reason",
            TransitionPolicy::Status => "status",
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionPolicy {
    type Err = ConditionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reason" => Ok(TransitionPolicy::Reason),
            "status" => Ok(TransitionPolicy::Status),
            other => Err(ConditionsError::config(format!(
                "unknown transition policy '{}', expected one of {:?}",
                other, VALID_POLICIES
            ))),
        }
    }
}

/// Total order on conditions: `Ready` first, then ascending by type.
pub fn ready_first_cmp(a: &Condition, b: &Condition) -> Ordering {
    match (a.type_.is_ready(), b.type_.is_ready()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.type_.cmp(&b.type_),
    }
}

/// Sort a set in place by [`ready_first_cmp`].
pub fn sort(conditions: &mut [Condition]) {
    conditions.sort_by(ready_first_cmp);
}

/// Whether a set satisfies the ordering and uniqueness invariants.
pub fn is_sorted(conditions: &[Condition]) -> bool {
    conditions
        .windows(2)
        .all(|pair| ready_first_cmp(&pair[0], &pair[1]) == Ordering::Less)
}

/// Find the entry of the given type.
pub fn lookup<'a>(conditions: &'a [Condition], type_: &str) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.type_ == type_)
}

pub fn lookup_mut<'a>(conditions: &'a mut [Condition], type_: &str) -> Option<&'a mut Condition> {
    conditions.iter_mut().find(|c| c.type_ == type_)
}

/// Create or update the entry of `type_`, then re-sort.
///
/// A new entry is stamped with `now`. An existing entry keeps its identity
/// and has its transition time refreshed only when `policy` says the update
/// is a transition. Returns whether the transition time was set.
pub fn upsert(
    conditions: &mut Vec<Condition>,
    type_: &ConditionType,
    status: ConditionStatus,
    reason: &str,
    message: &str,
    now: DateTime<Utc>,
    policy: TransitionPolicy,
) -> bool {
    let transitioned = match lookup_mut(conditions, type_.as_str()) {
        Some(existing) => {
            let transitioned = policy.is_transition(existing, status, reason);
            if transitioned {
                existing.last_transition_time = Some(now);
            }
            existing.status = status;
            existing.reason = reason.to_string();
            existing.message = message.to_string();
            transitioned
        }
        None => {
            conditions.push(Condition::new(type_, status, reason, message, now));
            true
        }
    };

    tracing::debug!(
        condition = %type_,
        status = %status,
        reason,
        transitioned,
        "upserted condition"
    );

    sort(conditions);
    transitioned
}
