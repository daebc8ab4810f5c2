//! Format handlers for front matter metadata
//!
//! A handler encapsulates one metadata format: it detects the format's
//! boundary pattern, splits a document into metadata and content spans,
//! decodes the metadata span into a [`Mapping`], and serializes a mapping
//! back into delimited text.
//!
//! Handlers are stateless and hold only immutable configuration, so a single
//! instance can be shared (behind an `Arc`) across any number of concurrent
//! parse and render calls.

mod json;
mod toml;
mod yaml;

pub use self::json::JsonHandler;
pub use self::toml::TomlHandler;
pub use self::yaml::YamlHandler;

use serde_yaml::{Mapping, Value};

use crate::Post;
use crate::error::Result;

/// Options controlling how metadata is serialized by [`Handler::export`].
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Sort mapping keys alphabetically (recursively) before emission.
    /// When false, the mapping's insertion order is preserved.
    pub sort_keys: bool,

    /// Spaces of indentation for nested structures. JSON only.
    pub indent: usize,

    /// Escape non-ASCII characters instead of emitting raw UTF-8. JSON only.
    pub escape_unicode: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sort_keys: true,
            indent: 4,
            escape_unicode: false,
        }
    }
}

/// Options for [`Handler::format`]: export options plus optional delimiter
/// overrides used when assembling the final document.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Override the handler's start delimiter.
    pub start_delimiter: Option<String>,

    /// Override the handler's end delimiter.
    pub end_delimiter: Option<String>,

    /// Metadata serialization options.
    pub export: ExportOptions,
}

impl FormatOptions {
    /// Format options with both delimiters overridden.
    pub fn with_delimiters(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_delimiter: Some(start.into()),
            end_delimiter: Some(end.into()),
            export: ExportOptions::default(),
        }
    }
}

/// One metadata format: boundary detection, splitting, decoding and encoding.
///
/// Implement this trait to register a custom format alongside the built-in
/// YAML, JSON and TOML handlers.
pub trait Handler: Send + Sync {
    /// Format name used in error messages, e.g. `"YAML"`.
    fn name(&self) -> &'static str;

    /// Delimiter emitted before the metadata block on output.
    fn start_delimiter(&self) -> &str;

    /// Delimiter emitted after the metadata block on output.
    fn end_delimiter(&self) -> &str;

    /// Whether `text` opens with this handler's boundary pattern.
    ///
    /// Never fails on malformed input; anything that doesn't match is `false`.
    fn detect(&self, text: &str) -> bool;

    /// Split `text` into a metadata span and a content span.
    ///
    /// Returns `None` when fewer than two boundary lines are present, which
    /// the parse pipeline treats as "no front matter" rather than an error.
    fn split(&self, text: &str) -> Option<(String, String)>;

    /// Decode a metadata span into a value.
    ///
    /// Empty input yields `Value::Null` rather than an error; invalid syntax
    /// yields [`FrontmatterError::DecodeFailed`](crate::FrontmatterError).
    fn load(&self, fm: &str) -> Result<Value>;

    /// Serialize a mapping into this format's textual grammar, without
    /// delimiters. Deterministic for a given mapping and option set.
    fn export(&self, metadata: &Mapping, options: &ExportOptions) -> Result<String>;

    /// Serialize a whole post: exported metadata wrapped in delimiters,
    /// a blank line, then the content.
    fn format(&self, post: &Post, options: &FormatOptions) -> Result<String> {
        let metadata = self.export(&post.metadata, &options.export)?;
        let start = options
            .start_delimiter
            .as_deref()
            .unwrap_or(self.start_delimiter());
        let end = options
            .end_delimiter
            .as_deref()
            .unwrap_or(self.end_delimiter());

        let assembled = format!(
            "{start}\n{metadata}\n{end}\n\n{content}\n",
            content = post.content
        );
        Ok(assembled.trim().to_string())
    }
}

/// Whether `line` is a boundary: a run of three or more `marker` characters
/// and nothing else, trailing whitespace permitted.
pub(crate) fn is_marker_run(line: &str, marker: char) -> bool {
    let line = line.trim_end();
    line.len() >= 3 && line.chars().all(|c| c == marker)
}

/// Line-based split shared by the built-in handlers: the first line (after
/// leading whitespace, so `detect` and `split` agree on the same inputs) must
/// be a boundary, the metadata span runs to the next boundary line, the
/// content is everything after it.
pub(crate) fn split_lines<F>(text: &str, is_boundary: F) -> Option<(String, String)>
where
    F: Fn(&str) -> bool,
{
    let lines: Vec<&str> = text.trim_start().lines().collect();
    if lines.is_empty() || !is_boundary(lines[0]) {
        return None;
    }
    let end = lines[1..].iter().position(|line| is_boundary(line))? + 1;
    let fm = lines[1..end].join("\n");
    let content = lines[end + 1..].join("\n");
    Some((fm, content))
}

/// Recursively sort mapping keys alphabetically. Sequences are walked,
/// scalars returned as-is.
pub(crate) fn sorted(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut entries: Vec<(Value, Value)> =
                map.iter().map(|(k, v)| (k.clone(), sorted(v))).collect();
            entries.sort_by(|(a, _), (b, _)| key_string(a).cmp(&key_string(b)));
            Value::Mapping(entries.into_iter().collect())
        }
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// String form of a mapping key, used for sort comparisons. Non-string keys
/// (legal in YAML) compare by their serialized form.
fn key_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
