//! Accessor contract between condition helpers and the owning resource.
//!
//! Any status type that carries a condition set implements
//! [`ConditionsAccessor`]. The helpers read the current set through it,
//! build a fresh copy with the change applied, and hand the copy back in
//! a single write.

use serde::{Deserialize, Serialize};

use super::condition::Condition;

/// Read and replace capability over a resource's condition set.
///
/// Typical implementation:
///
/// ```
/// use conditions::{Condition, ConditionsAccessor};
///
/// struct DatabaseStatus {
///     conditions: Vec<Condition>,
/// }
///
/// impl ConditionsAccessor for DatabaseStatus {
///     fn conditions(&self) -> &[Condition] {
///         &self.conditions
///     }
///
///     fn set_conditions(&mut self, conditions: Vec<Condition>) {
///         self.conditions = conditions;
///     }
/// }
/// ```
pub trait ConditionsAccessor {
    /// Current conditions, in set order.
    fn conditions(&self) -> &[Condition];

    /// Replace the condition set wholesale.
    fn set_conditions(&mut self, conditions: Vec<Condition>);
}

impl ConditionsAccessor for Vec<Condition> {
    fn conditions(&self) -> &[Condition] {
        self
    }

    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        *self = conditions;
    }
}

impl<T: ConditionsAccessor + ?Sized> ConditionsAccessor for &mut T {
    fn conditions(&self) -> &[Condition] {
        (**self).conditions()
    }

    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        (**self).set_conditions(conditions)
    }
}

impl<T: ConditionsAccessor + ?Sized> ConditionsAccessor for Box<T> {
    fn conditions(&self) -> &[Condition] {
        (**self).conditions()
    }

    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        (**self).set_conditions(conditions)
    }
}

/// A ready-made status section holding only a condition set.
///
/// Serializes as `{"conditions": [...]}` with the array omitted when empty,
/// and can be embedded with `#[serde(flatten)]` in larger status types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionedStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl ConditionedStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConditionsAccessor for ConditionedStatus {
    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.conditions = conditions;
    }
}
