//! Core condition types and helpers.
//!
//! This module contains the condition record, the ordered condition set,
//! the accessor contract resources implement, and the mark/aggregate
//! helpers that operate through it.

pub mod accessor;
pub mod clock;
pub mod condition;
pub mod mark;
pub mod ready;
pub mod set;

pub use accessor::{ConditionedStatus, ConditionsAccessor};
pub use clock::{Clock, ManualClock, SystemClock};
pub use condition::{Condition, ConditionStatus, ConditionType, READY};
pub use mark::{
    get, is_false, is_true, is_unknown, mark_false, mark_true, mark_unknown, Marker,
};
pub use ready::{first_failing, sync_ready};
pub use set::{TransitionPolicy, VALID_POLICIES};
