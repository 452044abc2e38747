//! metch - ordered, predicate-driven branch dispatch
//!
//! Given a value and an ordered list of (judge, action) branches, metch finds
//! the first judge that accepts the value and invokes the paired action. A
//! returning variant yields the action's result instead of discarding it.
//! Judges compose into boolean AND/OR queries of arbitrary nesting depth.
//!
//! # Architecture
//!
//! - [`Judge<T>`] - a closed matcher variant: predicate, literal, boolean
//!   constant, or nested [`Query`]
//! - [`Query<T>`] - boolean composition of judges (All, Any) with
//!   short-circuit evaluation
//! - [`Branch<T, U>`] - a judge paired with an opaque action callback
//! - [`dispatch`] / [`dispatch_returning`] - first-match-wins scan over an
//!   ordered branch list with an optional (or mandatory) fallback
//!
//! # Key Design Insights
//!
//! 1. **Closed judge variants**: a judge is exactly one of predicate, literal,
//!    boolean, or query. The match-rule precedence (callable before equality)
//!    is enforced structurally: a predicate judge is always resolved by
//!    invoking it, never by comparing it to the value.
//!
//! 2. **Deferred actions are just generic results**: an action producing a
//!    future makes `U` the future type. The dispatcher forwards it without
//!    awaiting; the caller decides when to drive it.
//!
//! 3. **Evaluation is infallible**: judges return `bool`, never `Result`.
//!    A panicking predicate unwinds through the dispatch call untouched, and
//!    no later branch or fallback runs. All [`MetchError`] cases are
//!    construction or config-load failures.
//!
//! # Example
//!
//! ```
//! use metch::{dispatch_returning, Branch, Judge};
//!
//! let branches = vec![
//!     Branch::new(Judge::literal("animal.txt"), |f: &&str| format!("exact: {f}")),
//!     Branch::new(
//!         Judge::predicate(|f: &&str| f.ends_with(".txt")),
//!         |f: &&str| format!("text file: {f}"),
//!     ),
//! ];
//!
//! let result = dispatch_returning(&"data.txt", &branches, &|f| format!("unknown: {f}"));
//! assert_eq!(result, "text file: data.txt");
//! ```
//!
//! # Queries
//!
//! ```
//! use metch::{Judge, Query};
//!
//! let query = Query::all(vec![
//!     Judge::predicate(|v: &&str| v.starts_with('J')),
//!     Judge::literal("Jackie Chan"),
//!     Judge::query(Query::any(vec![
//!         Judge::predicate(|v: &&str| v.ends_with('n')),
//!         Judge::Bool(false),
//!     ])),
//! ]);
//!
//! assert!(query.evaluate(&"Jackie Chan"));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod branch;
mod dispatch;
mod judge;
mod query;
mod trace;

#[cfg(feature = "config")]
mod config;
#[cfg(feature = "config")]
mod registry;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use branch::{ActionFn, Branch};
pub use dispatch::{dispatch, dispatch_returning, dispatch_with_trace, validate_branches};
pub use judge::{Judge, PredicateFn};
pub use query::{Query, QueryMode};

// Config (feature-gated)
#[cfg(feature = "config")]
pub use config::{JudgeConfig, QueryConfig, TypedPredicate};
#[cfg(feature = "config")]
pub use registry::{PredicateFactory, Registry, RegistryBuilder};

// Trace types
pub use trace::{DispatchStep, DispatchTrace, JudgeTrace};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use metch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        dispatch,
        dispatch_returning,
        dispatch_with_trace,
        // Core types
        Branch,
        DispatchStep,
        // Trace types
        DispatchTrace,
        Judge,
        JudgeTrace,
        // Errors
        MetchError,
        Query,
        QueryMode,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum allowed depth for nested queries accepted by `validate`.
///
/// Evaluation itself never caps depth: recursion is bounded only by available
/// call-stack space, which is a documented, accepted limitation. Call
/// [`Judge::validate`] or [`Query::validate`] at construction or config-load
/// time to reject trees that would get anywhere near that boundary.
pub const MAX_DEPTH: usize = 32;

/// Maximum number of child judges in a single [`Query`] accepted by `validate`.
///
/// Width-based counterpart of [`MAX_DEPTH`]: a query with millions of children
/// at depth 1 bypasses the depth limit but still consumes excessive resources
/// at load time.
pub const MAX_JUDGES_PER_QUERY: usize = 256;

/// Maximum number of branches in a single branch list accepted by
/// [`validate_branches`].
pub const MAX_BRANCHES: usize = 256;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from judge construction, validation, and config loading.
///
/// These surface at construction or config-load time, never during
/// evaluation. Fix the configuration and rebuild the judge tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetchError {
    /// Query nesting exceeds [`MAX_DEPTH`].
    #[error("query nesting depth is {depth}, but maximum allowed is {max}: flatten the query tree")]
    DepthExceeded {
        /// Actual depth of the judge tree.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },

    /// Too many child judges in a single [`Query`].
    #[error("query has {count} judges, but maximum allowed is {max}")]
    TooManyJudges {
        /// Actual count of child judges.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// Too many branches in a single branch list.
    #[error("branch list has {count} branches, but maximum allowed is {max}")]
    TooManyBranches {
        /// Actual count of branches.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A predicate name was not found in the registry.
    #[error("unknown predicate \"{name}\": registered predicates are [{}]", .available.join(", "))]
    UnknownPredicate {
        /// The unregistered predicate name.
        name: String,
        /// Names that ARE registered (for self-correcting error messages).
        available: Vec<String>,
    },

    /// Configuration deserialization or construction failed.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// The underlying error message.
        message: String,
    },
}

#[cfg(feature = "config")]
impl From<serde_json::Error> for MetchError {
    fn from(err: serde_json::Error) -> Self {
        MetchError::InvalidConfig {
            message: err.to_string(),
        }
    }
}
