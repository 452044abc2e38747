//! Config loading end-to-end: JSON/YAML -> registry -> runtime dispatch.

use std::sync::Arc;

use metch::{
    dispatch, Branch, JudgeConfig, MetchError, PredicateFn, QueryConfig, Registry,
    RegistryBuilder,
};

fn file_registry() -> Registry<String> {
    RegistryBuilder::new()
        .predicate("is_txt", |f: &String| f.ends_with(".txt"))
        .predicate("is_hidden", |f: &String| f.starts_with('.'))
        .predicate_factory("ends_with", |config: &serde_json::Value| {
            #[derive(serde::Deserialize)]
            struct SuffixConfig {
                suffix: String,
            }
            let config: SuffixConfig = serde_json::from_value(config.clone())?;
            let predicate: PredicateFn<String> =
                Arc::new(move |f: &String| f.ends_with(&config.suffix));
            Ok(predicate)
        })
        .build()
}

#[test]
fn json_config_drives_dispatch() {
    let registry = file_registry();

    let exact: JudgeConfig = serde_json::from_value(serde_json::json!({
        "type": "literal", "value": "animal.txt"
    }))
    .unwrap();
    let text: JudgeConfig = serde_json::from_value(serde_json::json!({
        "type": "predicate", "name": "is_txt"
    }))
    .unwrap();

    let branches = vec![
        Branch::new(registry.load_judge(exact).unwrap(), |f: &String| {
            format!("registry: {f}")
        }),
        Branch::new(registry.load_judge(text).unwrap(), |f: &String| {
            format!("text: {f}")
        }),
    ];

    assert_eq!(
        dispatch(&"animal.txt".to_string(), &branches, None),
        Some("registry: animal.txt".to_string())
    );
    assert_eq!(
        dispatch(&"data.txt".to_string(), &branches, None),
        Some("text: data.txt".to_string())
    );
    assert_eq!(dispatch(&"image.png".to_string(), &branches, None), None);
}

#[test]
fn yaml_query_config_loads_and_evaluates() {
    let registry = file_registry();

    let yaml = r"
mode: all
judges:
  - type: predicate
    name: is_txt
  - type: query
    mode: any
    judges:
      - type: predicate
        name: is_hidden
      - type: literal
        value: notes.txt
";
    let config: QueryConfig = serde_yaml::from_str(yaml).unwrap();
    let query = registry.load_query(config).unwrap();

    assert!(query.evaluate(&".secrets.txt".to_string()));
    assert!(query.evaluate(&"notes.txt".to_string()));
    assert!(!query.evaluate(&"other.txt".to_string()));
    assert!(!query.evaluate(&".secrets.md".to_string()));
}

#[test]
fn factory_predicate_receives_its_payload() {
    let registry = file_registry();

    let config: JudgeConfig = serde_json::from_value(serde_json::json!({
        "type": "predicate",
        "name": "ends_with",
        "config": { "suffix": ".yaml" }
    }))
    .unwrap();

    let judge = registry.load_judge(config).unwrap();
    assert!(judge.evaluate(&"deploy.yaml".to_string()));
    assert!(!judge.evaluate(&"deploy.json".to_string()));
}

#[test]
fn unknown_predicate_name_is_reported_with_alternatives() {
    let registry = file_registry();

    let config: JudgeConfig = serde_json::from_value(serde_json::json!({
        "type": "predicate", "name": "is_text"
    }))
    .unwrap();

    let err = registry.load_judge(config).unwrap_err();
    match err {
        MetchError::UnknownPredicate { name, available } => {
            assert_eq!(name, "is_text");
            assert_eq!(available, vec!["ends_with", "is_hidden", "is_txt"]);
        }
        other => panic!("expected UnknownPredicate, got {other:?}"),
    }
}

#[test]
fn overly_deep_config_is_rejected_at_load() {
    let registry = file_registry();

    let mut json = serde_json::json!({ "type": "bool", "value": true });
    for _ in 0..metch::MAX_DEPTH {
        json = serde_json::json!({ "type": "query", "mode": "any", "judges": [json] });
    }

    let config: JudgeConfig = serde_json::from_value(json).unwrap();
    let err = registry.load_judge(config).unwrap_err();
    assert!(matches!(err, MetchError::DepthExceeded { .. }));
}

#[test]
fn malformed_literal_is_invalid_config() {
    let registry = file_registry();

    // Number where the value type is String.
    let config: JudgeConfig = serde_json::from_value(serde_json::json!({
        "type": "literal", "value": 7
    }))
    .unwrap();

    let err = registry.load_judge(config).unwrap_err();
    assert!(matches!(err, MetchError::InvalidConfig { .. }));
}
