//! Predicate registry for config-driven judge construction.
//!
//! Predicates are opaque callables and cannot appear in serialized config
//! directly. The registry bridges the gap: code registers named predicate
//! factories, config refers to them by name, and
//! [`load_judge()`](Registry::load_judge) compiles the config tree into a
//! runtime [`Judge`].
//!
//! # Architecture
//!
//! Each factory is monomorphized at registration time and erased behind an
//! `Arc<dyn Fn>`. At load time the registry looks up the name, hands the
//! factory its config payload, and receives a ready [`PredicateFn`]. Early
//! type erasure at registration, late invocation at load.
//!
//! # Example
//!
//! ```
//! use metch::{Judge, RegistryBuilder};
//!
//! let registry = RegistryBuilder::new()
//!     .predicate("is_txt", |f: &String| f.ends_with(".txt"))
//!     .build();
//!
//! let config = serde_json::from_value(serde_json::json!({
//!     "type": "predicate", "name": "is_txt"
//! })).unwrap();
//!
//! let judge: Judge<String> = registry.load_judge(config).unwrap();
//! assert!(judge.evaluate(&"notes.txt".to_string()));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::{
    config::{JudgeConfig, QueryConfig, TypedPredicate},
    Judge, MetchError, PredicateFn, Query, MAX_JUDGES_PER_QUERY,
};

/// Type-erased predicate factory.
///
/// Takes the factory-specific config payload, produces a ready predicate.
pub type PredicateFactory<T> =
    Arc<dyn Fn(&serde_json::Value) -> Result<PredicateFn<T>, MetchError> + Send + Sync>;

// ═══════════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder for constructing a [`Registry`].
///
/// Register predicates by name, then call [`build()`](Self::build) to produce
/// an immutable `Registry`. No runtime registration is possible after build.
pub struct RegistryBuilder<T> {
    factories: HashMap<String, PredicateFactory<T>>,
}

impl<T: 'static> RegistryBuilder<T> {
    /// Create a new empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a config-free predicate under a name.
    ///
    /// The factory ignores its config payload. Use
    /// [`predicate_factory()`](Self::predicate_factory) when the predicate is
    /// parameterized by config.
    #[must_use]
    pub fn predicate<F>(self, name: &str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate: PredicateFn<T> = Arc::new(predicate);
        self.predicate_factory(name, move |_| Ok(Arc::clone(&predicate)))
    }

    /// Register a predicate factory under a name.
    ///
    /// The factory receives the `config` payload from the
    /// [`TypedPredicate`](crate::TypedPredicate) and constructs the predicate
    /// at load time.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use metch::{MetchError, PredicateFn, RegistryBuilder};
    ///
    /// #[derive(serde::Deserialize)]
    /// struct SuffixConfig {
    ///     suffix: String,
    /// }
    ///
    /// let registry = RegistryBuilder::new()
    ///     .predicate_factory("ends_with", |config: &serde_json::Value| {
    ///         let config: SuffixConfig = serde_json::from_value(config.clone())?;
    ///         let predicate: PredicateFn<String> =
    ///             Arc::new(move |f: &String| f.ends_with(&config.suffix));
    ///         Ok(predicate)
    ///     })
    ///     .build();
    /// ```
    #[must_use]
    pub fn predicate_factory<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Result<PredicateFn<T>, MetchError> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_owned(), Arc::new(factory));
        self
    }

    /// Freeze the registry. No further registration is possible.
    #[must_use]
    pub fn build(self) -> Registry<T> {
        Registry {
            factories: self.factories,
        }
    }
}

impl<T: 'static> Default for RegistryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════════

/// Immutable registry of named predicate factories.
///
/// Constructed via [`RegistryBuilder`]. Use [`load_judge()`](Self::load_judge)
/// or [`load_query()`](Self::load_query) to compile config into runtime judges.
pub struct Registry<T> {
    factories: HashMap<String, PredicateFactory<T>>,
}

impl<T> Registry<T>
where
    T: DeserializeOwned + 'static,
{
    /// Returns the number of registered predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no predicates are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Returns `true` if the given predicate name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the registered predicate names (sorted).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Load a [`Judge`] from configuration.
    ///
    /// Walks the config tree, resolves named predicates via registered
    /// factories, deserializes literals into `T`, and validates depth and
    /// width constraints on the result.
    ///
    /// # Errors
    ///
    /// - [`MetchError::UnknownPredicate`] if a predicate name is not registered
    /// - [`MetchError::InvalidConfig`] if a literal fails to deserialize as `T`
    ///   or a factory rejects its config
    /// - [`MetchError::TooManyJudges`] if a query node exceeds
    ///   [`MAX_JUDGES_PER_QUERY`]
    /// - [`MetchError::DepthExceeded`] if nesting exceeds
    ///   [`MAX_DEPTH`](crate::MAX_DEPTH)
    pub fn load_judge(&self, config: JudgeConfig) -> Result<Judge<T>, MetchError> {
        let judge = self.build_judge(config)?;
        judge.validate()?;
        Ok(judge)
    }

    /// Load a [`Query`] from configuration.
    ///
    /// # Errors
    ///
    /// Same as [`load_judge()`](Self::load_judge).
    pub fn load_query(&self, config: QueryConfig) -> Result<Query<T>, MetchError> {
        let query = self.build_query(config)?;
        query.validate()?;
        Ok(query)
    }

    fn build_judge(&self, config: JudgeConfig) -> Result<Judge<T>, MetchError> {
        match config {
            JudgeConfig::Predicate(typed) => {
                let predicate = self.resolve(&typed)?;
                Ok(Judge::Predicate(predicate))
            }
            JudgeConfig::Literal { value } => {
                let literal: T = serde_json::from_value(value)?;
                Ok(Judge::Literal(literal))
            }
            JudgeConfig::Bool { value } => Ok(Judge::Bool(value)),
            JudgeConfig::Query(query) => Ok(Judge::Query(self.build_query(query)?)),
        }
    }

    fn build_query(&self, config: QueryConfig) -> Result<Query<T>, MetchError> {
        if config.judges.len() > MAX_JUDGES_PER_QUERY {
            return Err(MetchError::TooManyJudges {
                count: config.judges.len(),
                max: MAX_JUDGES_PER_QUERY,
            });
        }
        let judges = config
            .judges
            .into_iter()
            .map(|j| self.build_judge(j))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Query::new(config.mode, judges))
    }

    fn resolve(&self, typed: &TypedPredicate) -> Result<PredicateFn<T>, MetchError> {
        let factory = self
            .factories
            .get(&typed.name)
            .ok_or_else(|| MetchError::UnknownPredicate {
                name: typed.name.clone(),
                available: self.names().iter().map(ToString::to_string).collect(),
            })?;
        factory(&typed.config)
    }
}
