//! Parse pipeline behavior: format detection, splitting, fallback rules
//!
//! Covered here:
//! - **No front matter**: parsing plain text returns empty metadata and the
//!   trimmed text verbatim, never an error
//! - **Malformed boundary**: an opening boundary without a closing one falls
//!   back to the no-front-matter outcome
//! - **Defaults merge**: loaded keys win over caller defaults on conflict
//! - **Detection order**: each builtin format is picked by its boundary,
//!   without interference from the others
//! - **Decode errors**: invalid syntax inside a detected block propagates

use pretty_assertions::assert_eq;
use serde_yaml::{Mapping, Value};

// =============================================================================
// No front matter: identity outcome
// =============================================================================

#[test]
fn test_plain_text_parses_to_empty_metadata() {
    let text = "This is just a document.\n\nNo metadata here.";
    let (metadata, content) = frontmatter::parse(text).expect("should not error");
    assert!(metadata.is_empty());
    assert_eq!(content, text);
}

#[test]
fn test_outer_whitespace_is_trimmed() {
    let (metadata, content) = frontmatter::parse("\n\n  hello world  \n\n").expect("no error");
    assert!(metadata.is_empty());
    assert_eq!(content, "hello world");
}

#[test]
fn test_empty_input() {
    let (metadata, content) = frontmatter::parse("").expect("should not error");
    assert!(metadata.is_empty());
    assert_eq!(content, "");
}

#[test]
fn test_dashes_mid_document_are_not_a_boundary() {
    let text = "Heading\n---\nThat was a setext underline, not front matter.";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert!(metadata.is_empty());
    assert_eq!(content, text);
}

// =============================================================================
// Malformed boundary: fall back, don't error
// =============================================================================

#[test]
fn test_unclosed_boundary_falls_back_to_content() {
    let text = "---\ntitle: x";
    let (metadata, content) = frontmatter::parse(text).expect("should not error");
    assert!(metadata.is_empty());
    assert_eq!(content, text);
}

#[test]
fn test_unclosed_json_brace_falls_back_to_content() {
    let text = "{\n\"title\": \"x\"";
    let (metadata, content) = frontmatter::parse(text).expect("should not error");
    assert!(metadata.is_empty());
    assert_eq!(content, text);
}

// =============================================================================
// Boundary edge cases
// =============================================================================

#[test]
fn test_leading_blank_lines_before_boundary() {
    let text = "\n\n\n---\ntitle: Hi\n---\n\nbody";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert_eq!(metadata.get("title").and_then(Value::as_str), Some("Hi"));
    assert_eq!(content, "body");
}

#[test]
fn test_boundary_with_trailing_whitespace() {
    let text = "---   \ntitle: Hi\n---\t\n\nbody";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert_eq!(metadata.get("title").and_then(Value::as_str), Some("Hi"));
    assert_eq!(content, "body");
}

#[test]
fn test_long_marker_runs_are_boundaries() {
    let text = "-------\ntitle: Hi\n-------\n\nbody";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert_eq!(metadata.get("title").and_then(Value::as_str), Some("Hi"));
    assert_eq!(content, "body");
}

#[test]
fn test_empty_front_matter_block() {
    let text = "---\n---\n\nbody";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert!(metadata.is_empty());
    assert_eq!(content, "body");
}

#[test]
fn test_non_mapping_front_matter_keeps_defaults() {
    // A sequence is valid YAML but not a metadata mapping; the block is
    // still consumed, the metadata stays as the defaults.
    let text = "---\n- one\n- two\n---\n\nbody";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert!(metadata.is_empty());
    assert_eq!(content, "body");
}

#[test]
fn test_content_containing_marker_lines_survives() {
    // Three dashes inside the body are content once the block is closed.
    let text = "---\ntitle: Hi\n---\n\nJust need three dashes\n---\n\nAnd this shouldn't break.";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert_eq!(metadata.len(), 1);
    assert_eq!(
        content,
        "Just need three dashes\n---\n\nAnd this shouldn't break."
    );
}

// =============================================================================
// Defaults merge
// =============================================================================

#[test]
fn test_loaded_keys_override_defaults() {
    let mut defaults = Mapping::new();
    defaults.insert(Value::from("a"), Value::from(1));
    defaults.insert(Value::from("layout"), Value::from("page"));

    let text = "---\na: 2\n---\n\nbody";
    let (metadata, _) = frontmatter::parse_with(text, None, defaults).expect("no error");
    assert_eq!(metadata.get("a").and_then(Value::as_i64), Some(2));
    assert_eq!(
        metadata.get("layout").and_then(Value::as_str),
        Some("page")
    );
}

#[test]
fn test_defaults_survive_when_no_front_matter() {
    let mut defaults = Mapping::new();
    defaults.insert(Value::from("a"), Value::from(1));

    let (metadata, content) =
        frontmatter::parse_with("plain text", None, defaults).expect("no error");
    assert_eq!(metadata.get("a").and_then(Value::as_i64), Some(1));
    assert_eq!(content, "plain text");
}

// =============================================================================
// Detection order and per-format parsing
// =============================================================================

#[test]
fn test_json_document_detected_among_builtins() {
    let text = "{\n\"title\": \"Hello\"\n}\n\nbody";
    let handler = frontmatter::detect_format(text, &frontmatter::Registry::builtin())
        .expect("should detect");
    assert_eq!(handler.name(), "JSON");
}

#[test]
fn test_json_brace_rewrap() {
    let text = "{\n\"a\": 1\n}\n\nbody";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert_eq!(metadata.get("a").and_then(Value::as_i64), Some(1));
    assert_eq!(content, "body");
}

#[test]
fn test_toml_front_matter() {
    let text = "+++\ntitle = \"TOML post\"\nweight = 5\n+++\n\nbody";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert_eq!(
        metadata.get("title").and_then(Value::as_str),
        Some("TOML post")
    );
    assert_eq!(metadata.get("weight").and_then(Value::as_i64), Some(5));
    assert_eq!(content, "body");
}

#[test]
fn test_nested_yaml_values() {
    let text = "---\ntitle: Hi\nauthor:\n  name: Bob\n  email: bob@example.com\ntags:\n  - a\n  - b\n---\n\nbody";
    let (metadata, _) = frontmatter::parse(text).expect("no error");
    let author = metadata
        .get("author")
        .and_then(Value::as_mapping)
        .expect("author mapping");
    assert_eq!(author.get("name").and_then(Value::as_str), Some("Bob"));
    let tags = metadata
        .get("tags")
        .and_then(Value::as_sequence)
        .expect("tags sequence");
    assert_eq!(tags.len(), 2);
}

#[test]
fn test_explicit_handler_skips_detection() {
    use std::sync::Arc;

    // The text opens like TOML, but the caller insists on YAML; the YAML
    // handler finds no `---` boundary, so this falls back to content.
    let text = "+++\ntitle = \"x\"\n+++\nbody";
    let (metadata, content) = frontmatter::parse_with(
        text,
        Some(Arc::new(frontmatter::YamlHandler)),
        Mapping::new(),
    )
    .expect("no error");
    assert!(metadata.is_empty());
    assert_eq!(content, text);
}

// =============================================================================
// Decode errors propagate
// =============================================================================

#[test]
fn test_invalid_yaml_in_detected_block_errors() {
    let text = "---\ntitle: [unclosed\n---\n\nbody";
    let err = frontmatter::parse(text).expect_err("should fail");
    assert!(matches!(
        err,
        frontmatter::FrontmatterError::DecodeFailed { format: "YAML", .. }
    ));
}

#[test]
fn test_invalid_json_in_detected_block_errors() {
    let text = "{\n\"title\": oops\n}\n\nbody";
    let err = frontmatter::parse(text).expect_err("should fail");
    assert!(matches!(
        err,
        frontmatter::FrontmatterError::DecodeFailed { format: "JSON", .. }
    ));
}

// =============================================================================
// Line ending normalization
// =============================================================================

#[test]
fn test_crlf_document() {
    let text = "---\r\ntitle: Hi\r\n---\r\n\r\nfirst line\r\nsecond line";
    let (metadata, content) = frontmatter::parse(text).expect("no error");
    assert_eq!(metadata.get("title").and_then(Value::as_str), Some("Hi"));
    assert_eq!(content, "first line\nsecond line");
}
