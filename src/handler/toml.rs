//! TOML front matter handler
//!
//! Metadata between `+++` boundary lines, the Hugo convention. Values are
//! converted explicitly between `toml::Value` and the crate-wide
//! `serde_yaml::Value`: TOML datetimes become strings on load, and nulls are
//! rejected on export since TOML cannot represent them.

use serde_yaml::{Mapping, Value};
use toml::Value as TomlValue;
use toml::map::Map as TomlMap;

use super::{ExportOptions, Handler, is_marker_run, sorted, split_lines};
use crate::error::{Result, decode_failed, encode_failed};

/// Load and export TOML metadata between `+++` boundary lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlHandler;

impl Handler for TomlHandler {
    fn name(&self) -> &'static str {
        "TOML"
    }

    fn start_delimiter(&self) -> &str {
        "+++"
    }

    fn end_delimiter(&self) -> &str {
        "+++"
    }

    fn detect(&self, text: &str) -> bool {
        text.trim_start()
            .lines()
            .next()
            .is_some_and(|line| is_marker_run(line, '+'))
    }

    fn split(&self, text: &str) -> Option<(String, String)> {
        split_lines(text, |line| is_marker_run(line, '+'))
    }

    fn load(&self, fm: &str) -> Result<Value> {
        if fm.trim().is_empty() {
            return Ok(Value::Null);
        }
        let table: TomlMap<String, TomlValue> =
            toml::from_str(fm).map_err(|e| decode_failed(self.name(), e.to_string()))?;
        Ok(toml_to_value(TomlValue::Table(table)))
    }

    fn export(&self, metadata: &Mapping, options: &ExportOptions) -> Result<String> {
        let value = if options.sort_keys {
            sorted(&Value::Mapping(metadata.clone()))
        } else {
            Value::Mapping(metadata.clone())
        };
        let table = match value_to_toml(&value)? {
            TomlValue::Table(table) => table,
            // value was built from a Mapping above
            _ => TomlMap::new(),
        };
        let text =
            toml::to_string(&table).map_err(|e| encode_failed(self.name(), e.to_string()))?;
        Ok(text.trim_end().to_string())
    }
}

/// Convert a decoded TOML value into the crate-wide metadata value type.
/// Datetimes have no YAML counterpart and become their string form.
fn toml_to_value(value: TomlValue) -> Value {
    match value {
        TomlValue::String(s) => Value::String(s),
        TomlValue::Integer(i) => Value::from(i),
        TomlValue::Float(f) => Value::from(f),
        TomlValue::Boolean(b) => Value::Bool(b),
        TomlValue::Datetime(dt) => Value::String(dt.to_string()),
        TomlValue::Array(items) => Value::Sequence(items.into_iter().map(toml_to_value).collect()),
        TomlValue::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Value::String(k), toml_to_value(v)))
                .collect(),
        ),
    }
}

/// Convert a metadata value into a TOML value. Nulls and non-string mapping
/// keys are not representable and produce an encode error.
fn value_to_toml(value: &Value) -> Result<TomlValue> {
    match value {
        Value::Null => Err(encode_failed(
            "TOML",
            "null values are not representable in TOML",
        )),
        Value::Bool(b) => Ok(TomlValue::Boolean(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(TomlValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(TomlValue::Float(f))
            } else {
                Err(encode_failed("TOML", format!("number out of range: {n}")))
            }
        }
        Value::String(s) => Ok(TomlValue::String(s.clone())),
        Value::Sequence(items) => Ok(TomlValue::Array(
            items.iter().map(value_to_toml).collect::<Result<_>>()?,
        )),
        Value::Mapping(map) => {
            let mut table = TomlMap::new();
            for (k, v) in map {
                let key = k.as_str().ok_or_else(|| {
                    encode_failed("TOML", "mapping keys must be strings in TOML")
                })?;
                table.insert(key.to_string(), value_to_toml(v)?);
            }
            Ok(TomlValue::Table(table))
        }
        Value::Tagged(tagged) => value_to_toml(&tagged.value),
    }
}
