//! Conditions - Kubernetes-style status conditions for Rust resources
//!
//! A resource reports the health of its sub-systems as a set of named,
//! timestamped conditions and rolls them up into one aggregate `Ready`
//! condition. Status types opt in by implementing [`ConditionsAccessor`].
//!
//! ```
//! use conditions::{is_true, mark_false, mark_true, sync_ready, Condition, READY};
//!
//! let mut status: Vec<Condition> = Vec::new();
//! mark_true(&mut status, "API");
//! mark_false(&mut status, "Database", "DBDown", "database unreachable");
//! sync_ready(&mut status);
//!
//! assert!(!is_true(&status, READY));
//! assert_eq!(status[0].reason, "DBDown");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use config::Config;
pub use crate::core::{
    first_failing, get, is_false, is_true, is_unknown, mark_false, mark_true, mark_unknown,
    sync_ready, Clock, Condition, ConditionStatus, ConditionType, ConditionedStatus,
    ConditionsAccessor, ManualClock, Marker, SystemClock, TransitionPolicy, READY,
};
pub use error::{ConditionsError, Result};

// CLI commands
pub use cli::{IsTrueCommand, MarkCommand, ShowCommand, StatusDocument, SyncReadyCommand};
