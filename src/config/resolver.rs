//! Scoped lookup of flag values in a configuration document.
//!
//! A flag is addressed by the command path it was declared under plus its
//! bare name. Lookups start at the most specific scope and widen toward the
//! document root:
//!
//! ```text
//! kv dump db  ->  [kv, dump, db]
//!                 [dump, db]
//!                 [db]
//! ```

use super::ConfigError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;

/// Parsed configuration document. Keys map to scalars, sequences or nested
/// documents.
pub type ConfigDocument = Map<String, Value>;

/// Outcome of a scoped lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// A scope matched. The value is `None` when the final key of a
    /// single-segment lookup is absent from its mapping.
    Found(Option<&'a Value>),
    /// No scope matched.
    NotFound,
}

impl<'a> Resolution<'a> {
    /// Whether any scope matched, including matches without a value.
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// The configured value, if one is usable.
    ///
    /// Absent and `null` values count as "no configured value".
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Resolution::Found(Some(value)) if !value.is_null() => Some(value),
            _ => None,
        }
    }
}

/// Read-only view over a loaded configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigResolver {
    document: ConfigDocument,
}

impl ConfigResolver {
    /// A resolver with an empty document. Every query misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already-decoded document.
    pub fn from_document(document: ConfigDocument) -> Self {
        Self { document }
    }

    /// Decode the first YAML document in `source`.
    ///
    /// Empty input yields an empty document. JSON is accepted since it is
    /// valid YAML.
    pub fn load<R: Read>(mut source: R) -> Result<Self, ConfigError> {
        let mut content = Vec::new();
        source.read_to_end(&mut content)?;
        Self::load_slice(&content)
    }

    /// Decode the first YAML document in `content`.
    pub fn load_slice(content: &[u8]) -> Result<Self, ConfigError> {
        match std::str::from_utf8(content) {
            Ok(text) => Self::load_str(text),
            // The YAML parser reports the bad encoding as a decode error.
            Err(_) => Self::decode_first(serde_yaml::Deserializer::from_slice(content)),
        }
    }

    /// Decode the first YAML document in `content`.
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        if !has_content(content) {
            return Ok(Self::empty());
        }
        Self::decode_first(serde_yaml::Deserializer::from_str(content))
    }

    /// A root that is not a mapping fails to decode. A bare `~` or `null`
    /// document is empty.
    fn decode_first(mut documents: serde_yaml::Deserializer<'_>) -> Result<Self, ConfigError> {
        let Some(first) = documents.next() else {
            return Ok(Self::empty());
        };
        let document = Option::<ConfigDocument>::deserialize(first)?;
        Ok(Self::from_document(document.unwrap_or_default()))
    }

    /// The loaded document.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Resolve `flag` declared under `command_path` (root first).
    ///
    /// The first matching scope wins; see [`ConfigResolver::scopes`] for the
    /// order in which scopes are tried.
    pub fn resolve<S: AsRef<str>>(&self, command_path: &[S], flag: &str) -> Resolution<'_> {
        for candidate in Self::scopes(command_path, flag) {
            let resolution = lookup(&self.document, &candidate);
            if resolution.is_found() {
                tracing::trace!(path = ?candidate, "config scope matched");
                return resolution;
            }
        }
        Resolution::NotFound
    }

    /// Candidate key paths for a flag, most specific first.
    ///
    /// Leading command segments are dropped one at a time until only the
    /// bare flag name remains.
    pub fn scopes<S: AsRef<str>>(command_path: &[S], flag: &str) -> Vec<Vec<String>> {
        (0..=command_path.len())
            .map(|start| {
                command_path[start..]
                    .iter()
                    .map(|segment| segment.as_ref().to_string())
                    .chain(std::iter::once(flag.to_string()))
                    .collect()
            })
            .collect()
    }
}

/// Walk `path` through nested mappings.
///
/// A single remaining segment always counts as a match, present or not. A
/// non-mapping value met before the path is exhausted also counts as a
/// match; the remaining segments are not examined.
fn lookup<'a>(document: &'a ConfigDocument, path: &[String]) -> Resolution<'a> {
    let Some((head, rest)) = path.split_first() else {
        return Resolution::NotFound;
    };

    let entry = document.get(head);
    if rest.is_empty() {
        return Resolution::Found(entry);
    }

    match entry {
        None => Resolution::NotFound,
        Some(Value::Object(nested)) => lookup(nested, rest),
        Some(value) => Resolution::Found(Some(value)),
    }
}

/// Whether `content` holds anything besides blank lines, comments and
/// document markers.
fn has_content(content: &str) -> bool {
    content.lines().map(str::trim).any(|line| {
        !line.is_empty() && !line.starts_with('#') && line != "---" && line != "..."
    })
}
