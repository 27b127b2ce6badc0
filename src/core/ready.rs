//! Aggregate `Ready` condition.
//!
//! `Ready` is False when any other condition is False, inheriting the
//! reason and message of the first False entry in set order. Otherwise it
//! is True. Unknown entries neither block nor grant readiness.

use super::accessor::ConditionsAccessor;
use super::clock::Clock;
use super::condition::{Condition, ConditionStatus, ConditionType};
use super::mark::Marker;
use super::set::{self, TransitionPolicy};

/// First non-Ready False condition in set order.
///
/// The set must already be sorted; ties between several False conditions
/// are then broken by type order.
pub fn first_failing(conditions: &[Condition]) -> Option<&Condition> {
    conditions.iter().filter(|c| !c.is_ready()).find(|c| c.is_false())
}

impl<C: Clock> Marker<C> {
    /// Recompute the `Ready` condition from every other condition.
    ///
    /// Returns the resulting `Ready` status.
    pub fn sync_ready<A>(&self, obj: &mut A) -> ConditionStatus
    where
        A: ConditionsAccessor + ?Sized,
    {
        let mut conditions = obj.conditions().to_vec();
        // Sets read from external documents may arrive unsorted.
        set::sort(&mut conditions);

        let (status, reason, message) = match first_failing(&conditions) {
            Some(failing) => (
                ConditionStatus::False,
                failing.reason.clone(),
                failing.message.clone(),
            ),
            None => (ConditionStatus::True, String::new(), String::new()),
        };

        tracing::debug!(status = %status, reason = %reason, "synced Ready condition");

        set::upsert(
            &mut conditions,
            &ConditionType::ready(),
            status,
            &reason,
            &message,
            self.clock().now(),
            self.policy(),
        );
        obj.set_conditions(conditions);
        status
    }
}

/// Recompute the `Ready` condition and write it back as the first entry.
pub fn sync_ready<A>(obj: &mut A)
where
    A: ConditionsAccessor + ?Sized,
{
    Marker::new(TransitionPolicy::Reason).sync_ready(obj);
}
