//! YAML front matter handler
//!
//! The default format: metadata between `---` boundary lines. Decoding goes
//! through `serde_yaml`, which only ever builds plain scalars, sequences and
//! mappings (no arbitrary tag-driven construction).

use serde_yaml::{Mapping, Value};

use super::{ExportOptions, Handler, is_marker_run, sorted, split_lines};
use crate::error::{Result, decode_failed, encode_failed};

/// Load and export YAML metadata between `---` boundary lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlHandler;

impl Handler for YamlHandler {
    fn name(&self) -> &'static str {
        "YAML"
    }

    fn start_delimiter(&self) -> &str {
        "---"
    }

    fn end_delimiter(&self) -> &str {
        "---"
    }

    fn detect(&self, text: &str) -> bool {
        text.trim_start()
            .lines()
            .next()
            .is_some_and(|line| is_marker_run(line, '-'))
    }

    fn split(&self, text: &str) -> Option<(String, String)> {
        split_lines(text, |line| is_marker_run(line, '-'))
    }

    fn load(&self, fm: &str) -> Result<Value> {
        if fm.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_yaml::from_str(fm).map_err(|e| decode_failed(self.name(), e.to_string()))
    }

    fn export(&self, metadata: &Mapping, options: &ExportOptions) -> Result<String> {
        let value = if options.sort_keys {
            sorted(&Value::Mapping(metadata.clone()))
        } else {
            Value::Mapping(metadata.clone())
        };
        let text =
            serde_yaml::to_string(&value).map_err(|e| encode_failed(self.name(), e.to_string()))?;
        Ok(text.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_leading_boundary() {
        let handler = YamlHandler;
        assert!(handler.detect("---\ntitle: x\n---\nbody"));
        assert!(handler.detect("\n\n---\ntitle: x\n---\nbody"));
        assert!(handler.detect("-----\ntitle: x\n-----\nbody"));
    }

    #[test]
    fn rejects_non_boundary_openings() {
        let handler = YamlHandler;
        assert!(!handler.detect("title: x\n---\nbody"));
        assert!(!handler.detect("--\ntitle: x\n--\nbody"));
        assert!(!handler.detect("{\n\"a\": 1\n}"));
        assert!(!handler.detect(""));
    }

    #[test]
    fn loads_mapping() {
        let value = YamlHandler.load("title: Hello\ncount: 3").expect("valid yaml");
        let map = value.as_mapping().expect("should be mapping");
        assert_eq!(map.get("title").and_then(Value::as_str), Some("Hello"));
        assert_eq!(map.get("count").and_then(Value::as_i64), Some(3));
    }

    #[test]
    fn empty_span_loads_as_null() {
        assert!(YamlHandler.load("").expect("no error").is_null());
        assert!(YamlHandler.load("  \n ").expect("no error").is_null());
    }

    #[test]
    fn invalid_yaml_is_a_decode_error() {
        let err = YamlHandler.load("title: [unclosed").expect_err("should fail");
        assert!(err.to_string().contains("Failed to decode YAML"));
    }

    #[test]
    fn export_sorts_keys_by_default() {
        let mut map = Mapping::new();
        map.insert(Value::from("b"), Value::from(2));
        map.insert(Value::from("a"), Value::from(1));
        let text = YamlHandler
            .export(&map, &ExportOptions::default())
            .expect("exports");
        assert_eq!(text, "a: 1\nb: 2");
    }

    #[test]
    fn export_can_preserve_insertion_order() {
        let mut map = Mapping::new();
        map.insert(Value::from("b"), Value::from(2));
        map.insert(Value::from("a"), Value::from(1));
        let options = ExportOptions {
            sort_keys: false,
            ..ExportOptions::default()
        };
        let text = YamlHandler.export(&map, &options).expect("exports");
        assert_eq!(text, "b: 2\na: 1");
    }
}
