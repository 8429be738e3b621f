//! Output formatting for text and JSON.

use crate::audit::AuditHistory;
use crate::config::{ConfigResolver, Resolution};
use crate::kv::display_key;
use clap::ValueEnum;
use serde_json::{Value, json};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Format an audit history, one line per entry in text mode.
pub fn format_history(history: &AuditHistory, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let entries: Vec<Value> = history
                .entries
                .iter()
                .map(|entry| {
                    json!({
                        "time": entry.time_rfc3339(),
                        "timestamp_ms": entry.timestamp_ms,
                        "actor": entry.actor,
                        "action": entry.action,
                        "fields": entry.fields,
                    })
                })
                .collect();
            pretty(&json!({ "entries": entries }))
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for entry in &history.entries {
                let time = entry
                    .time_rfc3339()
                    .unwrap_or_else(|| entry.timestamp_ms.to_string());
                out.push_str(&format!("{}  {}  {}", time, entry.actor, entry.action));
                for (key, value) in &entry.fields {
                    out.push_str(&format!("  {}={}", key, value));
                }
                out.push('\n');
            }
            if history.entries.is_empty() {
                out.push_str("(no entries)\n");
            }
            out
        }
    }
}

/// Format a list of names (buckets).
pub fn format_names(names: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => pretty(&json!(names)),
        OutputFormat::Text => names.iter().map(|n| format!("{}\n", n)).collect(),
    }
}

/// Format a list of raw keys.
pub fn format_keys(keys: &[Vec<u8>], format: OutputFormat) -> String {
    let rendered: Vec<String> = keys.iter().map(|k| display_key(k)).collect();
    format_names(&rendered, format)
}

/// Format a single string result, such as an encoded value.
pub fn format_scalar(label: &str, value: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => pretty(&json!({ label: value })),
        OutputFormat::Text => format!("{}\n", value),
    }
}

/// Format a JSON document stored as bytes. Invalid JSON is an error.
pub fn format_json_bytes(bytes: &[u8]) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(pretty(&value))
}

/// Format every scope tried for a config query and the final outcome.
pub fn format_config_query(
    resolver: &ConfigResolver,
    command_path: &[String],
    flag: &str,
    format: OutputFormat,
) -> String {
    let resolution = resolver.resolve(command_path, flag);
    let scopes = ConfigResolver::scopes(command_path, flag);

    match format {
        OutputFormat::Json => pretty(&json!({
            "command_path": command_path,
            "flag": flag,
            "scopes": scopes.iter().map(|s| s.join(".")).collect::<Vec<_>>(),
            "found": resolution.is_found(),
            "value": resolution.value(),
        })),
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str("scopes:\n");
            for scope in &scopes {
                out.push_str(&format!("  {}\n", scope.join(".")));
            }
            let outcome = match resolution {
                Resolution::Found(_) => match resolution.value() {
                    Some(value) => format!("value: {}\n", compact(value)),
                    None => "value: <empty>\n".to_string(),
                },
                Resolution::NotFound => "value: <not found>\n".to_string(),
            };
            out.push_str(&outcome);
            out
        }
    }
}

fn compact(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditEntry;
    use std::collections::BTreeMap;

    fn history() -> AuditHistory {
        AuditHistory {
            entries: vec![AuditEntry {
                timestamp_ms: 0,
                actor: "ops".to_string(),
                action: "rotate".to_string(),
                fields: BTreeMap::from([
                    ("z".to_string(), "last".to_string()),
                    ("a".to_string(), "first".to_string()),
                ]),
            }],
        }
    }

    #[test]
    fn test_history_text_sorted_fields() {
        assert_eq!(
            format_history(&history(), OutputFormat::Text),
            "1970-01-01T00:00:00.000Z  ops  rotate  a=first  z=last\n"
        );
    }

    #[test]
    fn test_history_json() {
        let out = format_history(&history(), OutputFormat::Json);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["entries"][0]["actor"], "ops");
        assert_eq!(value["entries"][0]["time"], "1970-01-01T00:00:00.000Z");
        assert_eq!(value["entries"][0]["fields"]["a"], "first");
    }

    #[test]
    fn test_empty_history_text() {
        let empty = AuditHistory { entries: vec![] };
        assert_eq!(format_history(&empty, OutputFormat::Text), "(no entries)\n");
    }

    #[test]
    fn test_keys_text_and_json() {
        let keys = vec![b"a".to_vec(), vec![0xff]];
        assert_eq!(format_keys(&keys, OutputFormat::Text), "a\n0xff\n");
        let value: Value = serde_json::from_str(&format_keys(&keys, OutputFormat::Json)).unwrap();
        assert_eq!(value, json!(["a", "0xff"]));
    }

    #[test]
    fn test_json_bytes() {
        assert_eq!(format_json_bytes(br#"{"a":1}"#).unwrap(), "{\n  \"a\": 1\n}\n");
        assert!(format_json_bytes(b"not json").is_err());
    }

    #[test]
    fn test_config_query_text() {
        let resolver = ConfigResolver::load_str("sub:\n  flag: 7\n").unwrap();
        let path = vec!["cmd".to_string(), "sub".to_string()];
        assert_eq!(
            format_config_query(&resolver, &path, "flag", OutputFormat::Text),
            "scopes:\n  cmd.sub.flag\n  sub.flag\n  flag\nvalue: 7\n"
        );

        let missing = format_config_query(&resolver, &path, "other", OutputFormat::Text);
        assert!(missing.ends_with("value: <empty>\n"));
    }

    #[test]
    fn test_config_query_json() {
        let resolver = ConfigResolver::load_str("cmd: scalar\n").unwrap();
        let path = vec!["cmd".to_string()];
        let out = format_config_query(&resolver, &path, "anything", OutputFormat::Json);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["found"], true);
        assert_eq!(value["value"], "scalar");
    }
}
