//! `Judge` - the polymorphic matcher tested against a value
//!
//! A judge is exactly one of: a caller-supplied predicate, a literal matched
//! by equality, a boolean constant, or a nested [`Query`]. Evaluation
//! dispatches on the variant tag.

use crate::trace::JudgeTrace;
use crate::{MetchError, Query, MAX_DEPTH};
use std::fmt::Debug;
use std::sync::Arc;

/// A caller-supplied predicate over the value type.
///
/// `Arc`-shared so judges (and the queries holding them) can be cloned and
/// reused across many dispatch calls.
pub type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A matcher tested against a value.
///
/// The match rules of the four variants never overlap: a judge is exactly one
/// variant, so a predicate judge is always resolved by invoking it, never by
/// comparing it to the value. This encodes the source semantics where a
/// callable judge takes precedence over equality.
///
/// # Variants
///
/// - `Predicate` - invoked with the value; `true` means match. A predicate
///   that cannot decide returns `false` (non-match). A panicking predicate
///   unwinds through the dispatch call uncaught.
/// - `Literal` - matches when the value equals it (`T: PartialEq`,
///   structural equality).
/// - `Bool` - `true` always matches, `false` never matches.
/// - `Query` - matches when the nested query evaluates to `true`.
///
/// # Example
///
/// ```
/// use metch::Judge;
///
/// let judge = Judge::predicate(|v: &&str| v.ends_with(".txt"));
/// assert!(judge.evaluate(&"data.txt"));
/// assert!(!judge.evaluate(&"data.json"));
///
/// let judge = Judge::literal("animal.txt");
/// assert!(judge.evaluate(&"animal.txt"));
/// ```
pub enum Judge<T> {
    /// A caller-supplied predicate; `true` means match.
    Predicate(PredicateFn<T>),

    /// A value matched by equality.
    Literal(T),

    /// A boolean constant: `true` always matches, `false` never.
    Bool(bool),

    /// A nested boolean query.
    Query(Query<T>),
}

impl<T> Judge<T> {
    /// Create a predicate judge from a closure.
    pub fn predicate<F>(pred: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(pred))
    }

    /// Create a literal judge matched by equality.
    pub fn literal(value: T) -> Self {
        Self::Literal(value)
    }

    /// Create a query judge from a [`Query`].
    pub fn query(query: Query<T>) -> Self {
        Self::Query(query)
    }

    /// Returns `true` if this is a `Predicate` judge.
    #[must_use]
    pub fn is_predicate(&self) -> bool {
        matches!(self, Self::Predicate(_))
    }

    /// Returns `true` if this is a `Literal` judge.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Returns `true` if this is a `Query` judge.
    #[must_use]
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    /// Calculate the depth of this judge tree.
    ///
    /// Leaf judges have depth 1; a query judge has the query's depth.
    /// Used for depth limit validation at construction time.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Predicate(_) | Self::Literal(_) | Self::Bool(_) => 1,
            Self::Query(q) => q.depth(),
        }
    }

    /// Validate this judge against safety constraints.
    ///
    /// Checks nesting depth ([`MAX_DEPTH`]) and per-query width
    /// ([`MAX_JUDGES_PER_QUERY`](crate::MAX_JUDGES_PER_QUERY)). Call this at
    /// construction or config-load time; evaluation never enforces limits.
    ///
    /// # Errors
    ///
    /// Returns [`MetchError::DepthExceeded`] or [`MetchError::TooManyJudges`].
    pub fn validate(&self) -> Result<(), MetchError> {
        let depth = self.depth();
        if depth > MAX_DEPTH {
            return Err(MetchError::DepthExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
        match self {
            Self::Query(q) => q.check_width(),
            _ => Ok(()),
        }
    }
}

impl<T: PartialEq> Judge<T> {
    /// Evaluate this judge against the given value.
    ///
    /// Each variant has exactly one match rule:
    ///
    /// - `Predicate` - the predicate's verdict, even when the value would
    ///   also compare equal to something
    /// - `Literal` - `value == literal`
    /// - `Bool` - the constant itself
    /// - `Query` - the query's verdict (recursive; see [`Query::evaluate`])
    pub fn evaluate(&self, value: &T) -> bool {
        match self {
            Self::Predicate(pred) => pred(value),
            Self::Literal(expected) => value == expected,
            Self::Bool(constant) => *constant,
            Self::Query(query) => query.evaluate(value),
        }
    }

    /// Evaluate with a full trace for debugging.
    ///
    /// The trace's `matched()` result always equals [`evaluate`](Self::evaluate)
    /// for pure judges. Inside queries, ALL children are evaluated (no
    /// short-circuit) for maximum debugging value.
    #[must_use]
    pub fn evaluate_with_trace(&self, value: &T) -> JudgeTrace {
        match self {
            Self::Predicate(pred) => JudgeTrace::Predicate {
                matched: pred(value),
            },
            Self::Literal(expected) => JudgeTrace::Literal {
                matched: value == expected,
            },
            Self::Bool(constant) => JudgeTrace::Bool { matched: *constant },
            Self::Query(query) => query.evaluate_with_trace(value),
        }
    }
}

impl<T: Debug> Debug for Judge<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Predicate(_) => f.debug_tuple("Predicate").field(&"...").finish(),
            Self::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Query(q) => f.debug_tuple("Query").field(q).finish(),
        }
    }
}

impl<T: Clone> Clone for Judge<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Predicate(p) => Self::Predicate(Arc::clone(p)),
            Self::Literal(v) => Self::Literal(v.clone()),
            Self::Bool(b) => Self::Bool(*b),
            Self::Query(q) => Self::Query(q.clone()),
        }
    }
}

// Note: No unsafe impl needed. The compiler derives Send/Sync automatically
// because PredicateFn requires Send + Sync in the trait object bound.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryMode;

    #[test]
    fn predicate_true_matches() {
        let judge = Judge::predicate(|v: &i32| *v > 10);
        assert!(judge.evaluate(&11));
        assert!(!judge.evaluate(&10));
    }

    #[test]
    fn literal_matches_by_equality() {
        let judge = Judge::literal("animal.txt");
        assert!(judge.evaluate(&"animal.txt"));
        assert!(!judge.evaluate(&"data.txt"));
    }

    #[test]
    fn literal_matches_compound_values() {
        // Structural equality: compound literals compare field-by-field
        let judge = Judge::literal(vec![1, 2, 3]);
        assert!(judge.evaluate(&vec![1, 2, 3]));
        assert!(!judge.evaluate(&vec![1, 2]));
    }

    #[test]
    fn bool_true_always_matches() {
        let judge: Judge<i32> = Judge::Bool(true);
        assert!(judge.evaluate(&0));
        assert!(judge.evaluate(&i32::MAX));
    }

    #[test]
    fn bool_false_never_matches() {
        let judge: Judge<i32> = Judge::Bool(false);
        assert!(!judge.evaluate(&0));
    }

    #[test]
    fn predicate_verdict_wins_over_would_be_equality() {
        // A predicate judge is resolved by invocation even when the value
        // would satisfy an equality check against the same pattern.
        let judge = Judge::predicate(|v: &&str| {
            assert_eq!(*v, "animal.txt");
            false
        });
        // The predicate said false, so this is a non-match, full stop.
        assert!(!judge.evaluate(&"animal.txt"));
    }

    #[test]
    fn query_judge_delegates() {
        let judge = Judge::query(Query::any(vec![
            Judge::literal(1),
            Judge::literal(2),
            Judge::literal(3),
        ]));
        assert!(judge.evaluate(&2));
        assert!(!judge.evaluate(&5));
    }

    #[test]
    fn depth_of_leaves_is_one() {
        assert_eq!(Judge::literal(1).depth(), 1);
        assert_eq!(Judge::<i32>::Bool(true).depth(), 1);
        assert_eq!(Judge::predicate(|_: &i32| true).depth(), 1);
    }

    #[test]
    fn depth_follows_query_nesting() {
        let nested = Judge::query(Query::all(vec![Judge::query(Query::any(vec![
            Judge::literal(1),
        ]))]));
        assert_eq!(nested.depth(), 3);
    }

    #[test]
    fn validate_shallow_judge_ok() {
        let judge = Judge::query(Query::all(vec![Judge::literal(1)]));
        assert!(judge.validate().is_ok());
    }

    #[test]
    fn validate_deeply_nested_judge_fails() {
        let mut judge = Judge::literal(1);
        for _ in 0..MAX_DEPTH {
            judge = Judge::query(Query::all(vec![judge]));
        }
        let result = judge.validate();
        assert!(matches!(result, Err(MetchError::DepthExceeded { .. })));
    }

    #[test]
    fn clone_shares_predicate() {
        let judge = Judge::predicate(|v: &i32| *v == 7);
        let copy = judge.clone();
        assert!(judge.evaluate(&7));
        assert!(copy.evaluate(&7));
    }

    #[test]
    fn trace_matches_evaluate() {
        let judge = Judge::query(Query::any(vec![
            Judge::Bool(false),
            Judge::predicate(|v: &i32| *v > 0),
        ]));
        for value in [-1, 0, 1] {
            assert_eq!(
                judge.evaluate_with_trace(&value).matched(),
                judge.evaluate(&value)
            );
        }
    }

    #[test]
    fn trace_captures_query_children() {
        let judge = Judge::query(Query::all(vec![Judge::Bool(true), Judge::literal(5)]));
        let trace = judge.evaluate_with_trace(&5);
        match trace {
            JudgeTrace::Query {
                matched,
                mode,
                children,
            } => {
                assert!(matched);
                assert_eq!(mode, QueryMode::All);
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected query trace, got {other:?}"),
        }
    }

    #[test]
    fn judge_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Judge<String>>();
    }
}
