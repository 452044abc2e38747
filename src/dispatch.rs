//! First-match-wins dispatch over an ordered branch list
//!
//! Both dispatch contracts are single-pass, stateless scans: the only state
//! is the cursor over the branch list, advancing until a judge accepts the
//! value or the list is exhausted.

use crate::branch::{ActionFn, Branch};
use crate::trace::{DispatchStep, DispatchTrace};
use crate::{MetchError, MAX_BRANCHES};

/// Scan `branches` in order and invoke the action of the first branch whose
/// judge accepts `value`.
///
/// Exactly one action (matched or fallback) is invoked per call, or none.
/// Later branches with equally-matching judges are never evaluated or
/// invoked.
///
/// # Returns
///
/// - `Some(result)` of the matched branch's action
/// - `Some(result)` of `on_no_match` if no branch matched and a fallback was
///   supplied
/// - `None` if no branch matched and no fallback was supplied (not an error)
///
/// When the invoked action is deferred (`U` is a future type), the pending
/// result is returned as-is; the caller is responsible for awaiting it.
///
/// # Panics
///
/// A panicking judge or action aborts the scan and unwinds to the caller.
/// No later branch is tried and the fallback is not invoked for judge
/// failures.
///
/// # Example
///
/// ```
/// use metch::{dispatch, Branch, Judge};
///
/// let branches = vec![
///     Branch::new(Judge::literal("animal.txt"), |_: &&str| "B"),
///     Branch::new(Judge::predicate(|f: &&str| f.ends_with(".txt")), |_| "C"),
/// ];
///
/// assert_eq!(dispatch(&"animal.txt", &branches, None), Some("B"));
/// assert_eq!(dispatch(&"data.txt", &branches, None), Some("C"));
/// assert_eq!(dispatch(&"nope", &branches, None), None);
/// ```
pub fn dispatch<T, U>(
    value: &T,
    branches: &[Branch<T, U>],
    on_no_match: Option<&ActionFn<T, U>>,
) -> Option<U>
where
    T: PartialEq,
{
    for branch in branches {
        if branch.matches(value) {
            return Some(branch.invoke(value));
        }
    }
    on_no_match.map(|action| action(value))
}

/// Like [`dispatch`], but always produces a value: the fallback is mandatory
/// and is invoked with `value` when no branch matches.
///
/// The result is the matched (or fallback) action's invocation result, passed
/// through unmodified, including pending futures.
///
/// # Example
///
/// ```
/// use metch::{dispatch_returning, Branch, Judge, Query};
///
/// let branches = vec![Branch::new(
///     Judge::query(Query::any(vec![
///         Judge::literal(1),
///         Judge::literal(2),
///         Judge::literal(3),
///     ])),
///     |v: &i32| format!("small: {v}"),
/// )];
///
/// let result = dispatch_returning(&5, &branches, &|v| format!("other: {v}"));
/// assert_eq!(result, "other: 5");
/// ```
pub fn dispatch_returning<T, U>(
    value: &T,
    branches: &[Branch<T, U>],
    on_no_match: &ActionFn<T, U>,
) -> U
where
    T: PartialEq,
{
    for branch in branches {
        if branch.matches(value) {
            return branch.invoke(value);
        }
    }
    on_no_match(value)
}

/// Dispatch with a full trace for debugging.
///
/// The trace records each branch that was scanned (stopping after the first
/// match, preserving first-match-wins), the per-judge verdicts, and whether
/// the fallback ran. `trace.result` is identical to what [`dispatch`] returns
/// for the same input when all judges are pure.
pub fn dispatch_with_trace<T, U>(
    value: &T,
    branches: &[Branch<T, U>],
    on_no_match: Option<&ActionFn<T, U>>,
) -> DispatchTrace<U>
where
    T: PartialEq,
{
    let mut steps = Vec::new();
    for (index, branch) in branches.iter().enumerate() {
        let judge_trace = branch.judge.evaluate_with_trace(value);
        let matched = judge_trace.matched();
        steps.push(DispatchStep {
            index,
            matched,
            judge_trace,
        });
        if matched {
            return DispatchTrace {
                result: Some(branch.invoke(value)),
                steps,
                used_fallback: false,
            };
        }
    }

    match on_no_match {
        Some(action) => DispatchTrace {
            result: Some(action(value)),
            steps,
            used_fallback: true,
        },
        None => DispatchTrace {
            result: None,
            steps,
            used_fallback: false,
        },
    }
}

/// Validate a branch list against safety constraints.
///
/// Checks the branch count ([`MAX_BRANCHES`]) and every branch's judge (see
/// [`Judge::validate`](crate::Judge::validate)). Dispatch itself never
/// validates; call this once at construction or config-load time.
///
/// # Errors
///
/// Returns [`MetchError::TooManyBranches`], [`MetchError::DepthExceeded`], or
/// [`MetchError::TooManyJudges`].
pub fn validate_branches<T, U>(branches: &[Branch<T, U>]) -> Result<(), MetchError> {
    if branches.len() > MAX_BRANCHES {
        return Err(MetchError::TooManyBranches {
            count: branches.len(),
            max: MAX_BRANCHES,
        });
    }
    for branch in branches {
        branch.judge.validate()?;
    }
    Ok(())
}
