//! `Branch` - a judge paired with an action
//!
//! The dispatch functions scan an ordered list of branches and invoke the
//! action of the first branch whose judge accepts the value.

use crate::Judge;
use std::fmt::Debug;

/// An action callback: invoked with the value, produces a result of type `U`.
///
/// Actions are opaque to the engine. A deferred action simply makes `U` a
/// future type; the dispatcher returns it without awaiting.
pub type ActionFn<T, U> = dyn Fn(&T) -> U + Send + Sync;

/// A (judge, action) pair in an ordered branch list.
///
/// # Type Parameters
///
/// - `T`: the value type being matched
/// - `U`: the action's product (use `()` for pure side-effect actions, or a
///   future type for deferred ones)
///
/// # Example
///
/// ```
/// use metch::{Branch, Judge};
///
/// let branch = Branch::new(Judge::literal("animal.txt"), |f: &&str| f.len());
/// assert!(branch.matches(&"animal.txt"));
/// assert_eq!(branch.invoke(&"animal.txt"), 10);
/// ```
pub struct Branch<T, U> {
    /// The judge that gates this branch.
    pub judge: Judge<T>,

    action: Box<ActionFn<T, U>>,
}

impl<T, U> Branch<T, U> {
    /// Create a new branch.
    pub fn new<F>(judge: Judge<T>, action: F) -> Self
    where
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        Self {
            judge,
            action: Box::new(action),
        }
    }

    /// Evaluate the judge against the value.
    ///
    /// Returns `true` if the judge accepts the value.
    pub fn matches(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.judge.evaluate(value)
    }

    /// Invoke the action with the value, forwarding its result unmodified.
    pub fn invoke(&self, value: &T) -> U {
        (self.action)(value)
    }
}

impl<T: Debug, U> Debug for Branch<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Branch")
            .field("judge", &self.judge)
            .field("action", &"...")
            .finish()
    }
}

// Note: No unsafe impl needed. Judge<T> and Box<ActionFn<T, U>> are
// Send/Sync when their type parameters are.
