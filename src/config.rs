//! Config types for data-driven judge construction.
//!
//! These types mirror the runtime judge types but are serde-deserializable,
//! enabling judge trees to be loaded from JSON or YAML via
//! [`Registry::load_judge()`](crate::Registry::load_judge).
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Loader method |
//! |-------------|-------------|---------------|
//! | [`JudgeConfig`] | [`Judge`](crate::Judge) | `Registry::load_judge()` |
//! | [`QueryConfig`] | [`Query`](crate::Query) | `Registry::load_query()` |
//! | [`TypedPredicate`] | [`PredicateFn`](crate::PredicateFn) | via registry factory |
//!
//! Actions have no config counterpart: they are opaque callbacks and stay on
//! the code side.

use crate::QueryMode;
use serde::Deserialize;

/// Configuration for a [`Judge`](crate::Judge).
///
/// Uses `#[serde(tag = "type")]` for discriminated union deserialization:
///
/// ```json
/// { "type": "predicate", "name": "ends_with", "config": { "suffix": ".txt" } }
/// { "type": "literal", "value": "animal.txt" }
/// { "type": "bool", "value": true }
/// { "type": "query", "mode": "any", "judges": [...] }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JudgeConfig {
    /// A named predicate, resolved at load time via the registry.
    Predicate(TypedPredicate),

    /// A literal value, deserialized into the value type and matched by
    /// equality.
    Literal {
        /// The literal payload.
        value: serde_json::Value,
    },

    /// A boolean constant.
    Bool {
        /// `true` always matches, `false` never.
        value: bool,
    },

    /// A nested query.
    Query(QueryConfig),
}

/// Configuration for a [`Query`](crate::Query).
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// How the children aggregate (`all` / `any`).
    pub mode: QueryMode,

    /// Child judges in evaluation order.
    pub judges: Vec<JudgeConfig>,
}

/// Reference to a registered predicate with its configuration.
///
/// `name` identifies the factory registered in the
/// [`Registry`](crate::Registry); `config` carries the factory-specific
/// payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TypedPredicate {
    /// The name of a registered predicate factory.
    pub name: String,

    /// Factory-specific configuration payload.
    #[serde(default = "default_config")]
    pub config: serde_json::Value,
}

fn default_config() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
