//! JSON front matter handler
//!
//! JSON metadata is self-delimiting: the boundary lines are a bare `{` and a
//! bare `}`, which are part of the JSON text itself rather than separate
//! markers. Splitting therefore re-wraps the span between the brace lines in
//! a synthetic pair of braces before decoding, and both output delimiters are
//! empty strings.

use std::io;

use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_yaml::{Mapping, Value};

use super::{ExportOptions, Handler, split_lines};
use crate::error::{Result, decode_failed, encode_failed};

/// Load and export JSON metadata between bare `{` / `}` lines.
///
/// An empty metadata mapping exports as a single `{}` line, which the
/// brace-line boundary does not recognize; a document rendered from an
/// empty-metadata post therefore parses back as plain content rather than
/// as a JSON front matter document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonHandler;

/// Brace lines are exact: no trailing whitespace, nothing else on the line.
fn is_brace_line(line: &str) -> bool {
    line == "{" || line == "}"
}

impl Handler for JsonHandler {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn start_delimiter(&self) -> &str {
        ""
    }

    fn end_delimiter(&self) -> &str {
        ""
    }

    fn detect(&self, text: &str) -> bool {
        text.trim_start().lines().next().is_some_and(is_brace_line)
    }

    fn split(&self, text: &str) -> Option<(String, String)> {
        let (fm, content) = split_lines(text, is_brace_line)?;
        Some((format!("{{{fm}}}"), content))
    }

    fn load(&self, fm: &str) -> Result<Value> {
        if fm.trim().is_empty() {
            return Ok(Value::Null);
        }
        let json: JsonValue =
            serde_json::from_str(fm).map_err(|e| decode_failed(self.name(), e.to_string()))?;
        serde_yaml::to_value(&json).map_err(|e| decode_failed(self.name(), e.to_string()))
    }

    fn export(&self, metadata: &Mapping, options: &ExportOptions) -> Result<String> {
        let json = serde_json::to_value(metadata)
            .map_err(|e| encode_failed(self.name(), e.to_string()))?;
        let json = if options.sort_keys {
            sorted_json(&json)
        } else {
            json
        };

        let indent = " ".repeat(options.indent);
        let mut out = Vec::new();
        if options.escape_unicode {
            let formatter = AsciiPrettyFormatter::new(indent.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
            json.serialize(&mut ser)
                .map_err(|e| encode_failed(self.name(), e.to_string()))?;
        } else {
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
            json.serialize(&mut ser)
                .map_err(|e| encode_failed(self.name(), e.to_string()))?;
        }
        String::from_utf8(out).map_err(|e| encode_failed(self.name(), e.to_string()))
    }
}

/// Recursively sort object keys alphabetically.
fn sorted_json(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut entries: Vec<(String, JsonValue)> = map
                .iter()
                .map(|(k, v)| (k.clone(), sorted_json(v)))
                .collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            JsonValue::Object(entries.into_iter().collect())
        }
        JsonValue::Array(seq) => JsonValue::Array(seq.iter().map(sorted_json).collect()),
        other => other.clone(),
    }
}

/// Pretty formatter that escapes non-ASCII characters as `\uXXXX` sequences
/// (surrogate pairs for characters outside the BMP). Structural formatting is
/// delegated to [`PrettyFormatter`].
struct AsciiPrettyFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    fn new(indent: &'a [u8]) -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(indent),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        // Fragments never contain characters that need JSON escaping, so the
        // only rewriting needed here is for non-ASCII.
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            if start < i {
                writer.write_all(fragment[start..i].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.pretty.end_object_value(writer)
    }
}
