//! Integration tests for scoped configuration lookup.
//!
//! Covers loading (empty and malformed input) and the scope
//! fallback order of `ConfigResolver::resolve`.

use ops_debug::config::{ConfigError, ConfigResolver, Resolution};
use serde_json::json;
use std::io::Cursor;

const ROOT: &[&str] = &[];

/// Helper to load a resolver from YAML text through the reader interface.
fn load(yaml: &str) -> ConfigResolver {
    ConfigResolver::load(Cursor::new(yaml.as_bytes().to_vec())).expect("Failed to load config")
}

#[test]
fn empty_stream_loads_as_empty_document() {
    let resolver = ConfigResolver::load(std::io::empty()).expect("empty input should load");
    assert!(resolver.is_empty());
    assert!(resolver.document().is_empty());
}

#[test]
fn malformed_stream_is_decode_error() {
    let result = ConfigResolver::load(Cursor::new(b"key: value\n  - broken: [".to_vec()));
    match result {
        Err(ConfigError::Decode(_)) => {}
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[test]
fn decode_error_message_carries_context() {
    let err = ConfigResolver::load_str("a: {b: [").unwrap_err();
    assert!(
        err.to_string().starts_with("failed to decode configuration:"),
        "unexpected message: {}",
        err
    );
}

#[test]
fn top_level_flag_resolves() {
    let resolver = load("flag: top\n");
    assert_eq!(
        resolver.resolve(ROOT, "flag"),
        Resolution::Found(Some(&json!("top")))
    );
}

#[test]
fn nested_flag_resolves_and_bare_lookup_is_found_without_value() {
    let resolver = load("cmd:\n  flag: nested\n");

    assert_eq!(
        resolver.resolve(&["cmd"], "flag"),
        Resolution::Found(Some(&json!("nested")))
    );

    // The single-segment lookup reports a match even though `flag` is not a
    // top-level key; callers see no usable value.
    let top = resolver.resolve(ROOT, "flag");
    assert!(top.is_found());
    assert_eq!(top, Resolution::Found(None));
    assert_eq!(top.value(), None);
}

#[test]
fn most_specific_path_is_tried_first() {
    let resolver = load(
        r#"
cmd:
  sub:
    flag: deep
sub:
  flag: middle
flag: shallow
"#,
    );

    assert_eq!(
        resolver.resolve(&["cmd", "sub"], "flag").value(),
        Some(&json!("deep"))
    );
    assert_eq!(
        ConfigResolver::scopes(&["cmd", "sub"], "flag")[0],
        vec!["cmd", "sub", "flag"]
    );
}

#[test]
fn partial_path_fallback() {
    let resolver = load("sub:\n  flag: fallback\n");
    assert_eq!(
        resolver.resolve(&["cmd", "sub"], "flag"),
        Resolution::Found(Some(&json!("fallback")))
    );
}

#[test]
fn repeated_queries_are_deterministic() {
    let resolver = load("sub:\n  flag: fallback\ncmd: 3\n");
    let queries: &[(&[&str], &str)] = &[
        (&["cmd", "sub"], "flag"),
        (&["cmd"], "anything"),
        (&[], "missing"),
        (&["other"], "flag"),
    ];

    for &(path, flag) in queries {
        let first = resolver.resolve(path, flag);
        for _ in 0..10 {
            assert_eq!(resolver.resolve(path, flag), first);
        }
    }
}

#[test]
fn intermediate_scalar_satisfies_deeper_query() {
    let resolver = load("cmd: scalar\n");
    assert_eq!(
        resolver.resolve(&["cmd"], "anything"),
        Resolution::Found(Some(&json!("scalar")))
    );
}

#[test]
fn sequences_and_numbers_are_returned_as_is() {
    let resolver = load("kv:\n  dump:\n    tags: [a, b]\n    limit: 10\n");
    assert_eq!(
        resolver.resolve(&["kv", "dump"], "tags").value(),
        Some(&json!(["a", "b"]))
    );
    assert_eq!(
        resolver.resolve(&["kv", "dump"], "limit").value(),
        Some(&json!(10))
    );
}

#[test]
fn command_mapping_shadows_wider_scopes() {
    let resolver = load("kv:\n  dump: {}\ndb: /tmp/store.db\n");
    // `kv.dump` exists, so the lookup ends there without reaching `db`.
    assert_eq!(resolver.resolve(&["kv", "dump"], "db"), Resolution::Found(None));
    // Unrelated commands still fall back to the top-level key.
    assert_eq!(
        resolver.resolve(&["kv", "keys"], "db").value(),
        Some(&json!("/tmp/store.db"))
    );
}
