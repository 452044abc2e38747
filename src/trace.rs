//! Evaluation trace types for debugging dispatch behavior.
//!
//! Trace types mirror the runtime types ([`Judge`](crate::Judge),
//! [`Query`](crate::Query), the dispatch scan) but capture verdicts instead
//! of inputs. Use `evaluate_with_trace()` /
//! [`dispatch_with_trace`](crate::dispatch_with_trace) for full visibility
//! into the engine's decision path.
//!
//! # Two Levels of Trace
//!
//! - [`JudgeTrace`] - per-judge: which sub-expressions matched?
//! - [`DispatchTrace`] - per-dispatch: which branches were scanned, what path
//!   was taken?

use crate::QueryMode;

/// Trace of a judge evaluation.
///
/// Mirrors [`Judge`](crate::Judge) structure but captures verdicts.
///
/// Inside a query, ALL children are evaluated (no short-circuit) for maximum
/// debugging value. The `matched` result is still identical to plain
/// evaluation for pure judges.
#[derive(Debug)]
pub enum JudgeTrace {
    /// A predicate invocation.
    Predicate {
        /// The predicate's verdict.
        matched: bool,
    },

    /// A literal equality check.
    Literal {
        /// Whether the value equaled the literal.
        matched: bool,
    },

    /// A boolean constant.
    Bool {
        /// The constant itself.
        matched: bool,
    },

    /// A nested query evaluation.
    Query {
        /// The aggregated verdict.
        matched: bool,
        /// The query's aggregation mode.
        mode: QueryMode,
        /// Trace of each child (all evaluated, no short-circuit).
        children: Vec<JudgeTrace>,
    },
}

impl JudgeTrace {
    /// Get the overall verdict of this judge.
    #[must_use]
    pub fn matched(&self) -> bool {
        match self {
            Self::Predicate { matched }
            | Self::Literal { matched }
            | Self::Bool { matched }
            | Self::Query { matched, .. } => *matched,
        }
    }
}

/// Trace of a full dispatch scan.
///
/// Contains the same result as [`dispatch`](crate::dispatch) plus the
/// evaluation path: which branches were scanned (in order, stopping after
/// the first match), each judge's verdict, and whether the fallback ran.
#[derive(Debug)]
pub struct DispatchTrace<U> {
    /// The final result, identical to what `dispatch()` returns for the same
    /// input when all judges are pure.
    pub result: Option<U>,

    /// One step per scanned branch, in scan order.
    /// Stops after the first match (preserves first-match-wins).
    pub steps: Vec<DispatchStep>,

    /// Whether the `on_no_match` fallback produced the result.
    pub used_fallback: bool,
}

/// One branch's evaluation in a dispatch trace.
#[derive(Debug)]
pub struct DispatchStep {
    /// Index in the branch list (0-based).
    pub index: usize,

    /// Did the judge accept the value?
    pub matched: bool,

    /// Full judge evaluation trace.
    pub judge_trace: JudgeTrace,
}
