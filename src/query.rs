//! `Query` - boolean composition of judges
//!
//! A query holds a mode (All / Any) and an ordered list of child judges,
//! which may themselves be query judges. Evaluation short-circuits in list
//! order and recurses through nested queries.

use crate::trace::JudgeTrace;
use crate::{Judge, MetchError, MAX_DEPTH, MAX_JUDGES_PER_QUERY};
use std::fmt::Debug;

/// How a [`Query`] aggregates its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum QueryMode {
    /// All children must match (logical AND).
    /// Short-circuits on the first `false`. Zero children evaluate to `true`.
    All,

    /// Any child must match (logical OR).
    /// Short-circuits on the first `true`. Zero children evaluate to `false`.
    Any,
}

/// A composite judge: boolean combination of an ordered judge list.
///
/// Queries are immutable once constructed and side-effect free, so a query
/// built once can be reused across many dispatch calls and shared between
/// threads.
///
/// Child order has no semantic effect for pure judges, but it fixes the
/// short-circuit evaluation order. Which judge runs last before a
/// short-circuit is therefore observable to impure predicates; that ordering
/// sensitivity is undefined behavior of the caller's predicates, not of the
/// engine.
///
/// # Recursion
///
/// A child may itself be a [`Judge::Query`], so evaluation recurses to the
/// nesting depth of the tree. Depth is bounded only by the call stack at
/// evaluation time; use [`validate`](Self::validate) at construction time to
/// reject pathological trees instead.
///
/// # Example
///
/// ```
/// use metch::{Judge, Query};
///
/// let query = Query::any(vec![
///     Judge::literal(1),
///     Judge::literal(2),
///     Judge::literal(3),
/// ]);
/// assert!(query.evaluate(&2));
/// assert!(!query.evaluate(&5));
/// ```
#[derive(Debug, Clone)]
pub struct Query<T> {
    mode: QueryMode,
    judges: Vec<Judge<T>>,
}

impl<T> Query<T> {
    /// Create a query with an explicit mode.
    pub fn new(mode: QueryMode, judges: Vec<Judge<T>>) -> Self {
        Self { mode, judges }
    }

    /// Create an AND query: all judges must match.
    ///
    /// With zero judges this evaluates to `true` (vacuous truth).
    pub fn all(judges: Vec<Judge<T>>) -> Self {
        Self::new(QueryMode::All, judges)
    }

    /// Create an OR query: any judge must match.
    ///
    /// With zero judges this evaluates to `false` (vacuous falsity).
    pub fn any(judges: Vec<Judge<T>>) -> Self {
        Self::new(QueryMode::Any, judges)
    }

    /// Returns this query's aggregation mode.
    #[must_use]
    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// Returns the child judges in evaluation order.
    #[must_use]
    pub fn judges(&self) -> &[Judge<T>] {
        &self.judges
    }

    /// Returns the number of child judges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.judges.len()
    }

    /// Returns `true` if there are no child judges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.judges.is_empty()
    }

    /// Calculate the depth of this query tree.
    ///
    /// A query of leaves has depth 2 (the query node plus its children).
    /// Used for depth limit validation at construction time.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.judges.iter().map(Judge::depth).max().unwrap_or(0)
    }

    /// Validate this query against safety constraints.
    ///
    /// Checks nesting depth ([`MAX_DEPTH`]) and per-query width
    /// ([`MAX_JUDGES_PER_QUERY`]). Evaluation never enforces these limits;
    /// call this at construction or config-load time to catch errors early.
    ///
    /// # Errors
    ///
    /// Returns [`MetchError::DepthExceeded`] if nesting is too deep, or
    /// [`MetchError::TooManyJudges`] if any query node is too wide.
    pub fn validate(&self) -> Result<(), MetchError> {
        let depth = self.depth();
        if depth > MAX_DEPTH {
            return Err(MetchError::DepthExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
        self.check_width()
    }

    pub(crate) fn check_width(&self) -> Result<(), MetchError> {
        if self.judges.len() > MAX_JUDGES_PER_QUERY {
            return Err(MetchError::TooManyJudges {
                count: self.judges.len(),
                max: MAX_JUDGES_PER_QUERY,
            });
        }
        for judge in &self.judges {
            if let Judge::Query(nested) = judge {
                nested.check_width()?;
            }
        }
        Ok(())
    }
}

impl<T: PartialEq> Query<T> {
    /// Evaluate this query against the given value.
    ///
    /// Children are delegated to [`Judge::evaluate`] in list order:
    ///
    /// - `All`: returns `false` at the first non-matching child, leaving the
    ///   rest unevaluated; `true` if every child matches.
    /// - `Any`: returns `true` at the first matching child; `false` if no
    ///   child matches.
    pub fn evaluate(&self, value: &T) -> bool {
        match self.mode {
            QueryMode::All => self.judges.iter().all(|judge| judge.evaluate(value)),
            QueryMode::Any => self.judges.iter().any(|judge| judge.evaluate(value)),
        }
    }

    /// Evaluate with a full trace for debugging.
    ///
    /// ALL children are evaluated (no short-circuit) so the trace shows every
    /// child's verdict. The `matched` result is still identical to
    /// [`evaluate`](Self::evaluate) for pure judges.
    #[must_use]
    pub fn evaluate_with_trace(&self, value: &T) -> JudgeTrace {
        let children: Vec<JudgeTrace> = self
            .judges
            .iter()
            .map(|judge| judge.evaluate_with_trace(value))
            .collect();
        let matched = match self.mode {
            QueryMode::All => children.iter().all(JudgeTrace::matched),
            QueryMode::Any => children.iter().any(JudgeTrace::matched),
        };
        JudgeTrace::Query {
            matched,
            mode: self.mode,
            children,
        }
    }
}
