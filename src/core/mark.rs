//! Mutation and query helpers over a [`ConditionsAccessor`].
//!
//! Each mark reads the current set once, applies one upsert to a private
//! copy, and writes the sorted copy back once. The accessor never observes
//! a half-updated set.

use super::accessor::ConditionsAccessor;
use super::clock::{Clock, SystemClock};
use super::condition::{Condition, ConditionStatus, ConditionType};
use super::set::{self, TransitionPolicy};

/// Applies condition updates with a fixed transition policy and clock.
///
/// The free functions ([`mark_true`] and friends) use the
/// [`TransitionPolicy::Reason`] rule and the system clock.
#[derive(Debug, Clone, Default)]
pub struct Marker<C = SystemClock> {
    policy: TransitionPolicy,
    clock: C,
}

impl Marker<SystemClock> {
    /// Create a marker using the system clock.
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            policy,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Marker<C> {
    /// Create a marker with an explicit time source.
    pub fn with_clock(policy: TransitionPolicy, clock: C) -> Self {
        Self { policy, clock }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Set `type_` to True with an empty reason and message.
    pub fn mark_true<A>(&self, obj: &mut A, type_: impl Into<ConditionType>)
    where
        A: ConditionsAccessor + ?Sized,
    {
        self.mark(obj, type_, ConditionStatus::True, "", "");
    }

    /// Set `type_` to False.
    pub fn mark_false<A>(
        &self,
        obj: &mut A,
        type_: impl Into<ConditionType>,
        reason: &str,
        message: &str,
    )
    where
        A: ConditionsAccessor + ?Sized,
    {
        self.mark(obj, type_, ConditionStatus::False, reason, message);
    }

    /// Set `type_` to Unknown.
    pub fn mark_unknown<A>(
        &self,
        obj: &mut A,
        type_: impl Into<ConditionType>,
        reason: &str,
        message: &str,
    )
    where
        A: ConditionsAccessor + ?Sized,
    {
        self.mark(obj, type_, ConditionStatus::Unknown, reason, message);
    }

    /// Set `type_` to an arbitrary status.
    ///
    /// Returns whether the transition time was refreshed.
    pub fn mark<A>(
        &self,
        obj: &mut A,
        type_: impl Into<ConditionType>,
        status: ConditionStatus,
        reason: &str,
        message: &str,
    ) -> bool
    where
        A: ConditionsAccessor + ?Sized,
    {
        let type_ = type_.into();
        debug_assert!(!type_.as_str().is_empty(), "condition type must not be empty");

        let mut conditions = obj.conditions().to_vec();
        let transitioned = set::upsert(
            &mut conditions,
            &type_,
            status,
            reason,
            message,
            self.clock.now(),
            self.policy,
        );
        obj.set_conditions(conditions);
        transitioned
    }
}

/// Set `type_` to True.
pub fn mark_true<A>(obj: &mut A, type_: impl Into<ConditionType>)
where
    A: ConditionsAccessor + ?Sized,
{
    Marker::new(TransitionPolicy::Reason).mark_true(obj, type_);
}

/// Set `type_` to False with the given reason and message.
pub fn mark_false<A>(obj: &mut A, type_: impl Into<ConditionType>, reason: &str, message: &str)
where
    A: ConditionsAccessor + ?Sized,
{
    Marker::new(TransitionPolicy::Reason).mark_false(obj, type_, reason, message);
}

/// Set `type_` to Unknown with the given reason and message.
pub fn mark_unknown<A>(obj: &mut A, type_: impl Into<ConditionType>, reason: &str, message: &str)
where
    A: ConditionsAccessor + ?Sized,
{
    Marker::new(TransitionPolicy::Reason).mark_unknown(obj, type_, reason, message);
}

/// Clone of the condition of `type_`, if present.
pub fn get<A>(obj: &A, type_: &str) -> Option<Condition>
where
    A: ConditionsAccessor + ?Sized,
{
    set::lookup(obj.conditions(), type_).cloned()
}

fn has_status<A>(obj: &A, type_: &str, status: ConditionStatus) -> bool
where
    A: ConditionsAccessor + ?Sized,
{
    set::lookup(obj.conditions(), type_).is_some_and(|c| c.status == status)
}

/// Whether `type_` is present and True. Absent means false.
pub fn is_true<A>(obj: &A, type_: &str) -> bool
where
    A: ConditionsAccessor + ?Sized,
{
    has_status(obj, type_, ConditionStatus::True)
}

/// Whether `type_` is present and False.
pub fn is_false<A>(obj: &A, type_: &str) -> bool
where
    A: ConditionsAccessor + ?Sized,
{
    has_status(obj, type_, ConditionStatus::False)
}

/// Whether `type_` is present and Unknown.
pub fn is_unknown<A>(obj: &A, type_: &str) -> bool
where
    A: ConditionsAccessor + ?Sized,
{
    has_status(obj, type_, ConditionStatus::Unknown)
}
