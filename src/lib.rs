//! Parse and manage text documents with YAML, JSON or TOML front matter
//!
//! Front matter is a metadata block at the start of a document, separated
//! from the body by format-specific boundary lines (`---` for YAML, `+++`
//! for TOML, bare `{`/`}` lines for JSON). This crate detects the format,
//! splits metadata from content, exposes the metadata as a mapping, and can
//! serialize the pair back into delimited text.
//!
//! ```
//! let text = "---\ntitle: Hello, world!\n---\n\nWell, hello there.";
//!
//! let post = frontmatter::loads(text)?;
//! assert_eq!(post.get("title").and_then(|v| v.as_str()), Some("Hello, world!"));
//! assert_eq!(post.content, "Well, hello there.");
//!
//! let out = frontmatter::dumps(&post)?;
//! assert_eq!(out, "---\ntitle: Hello, world!\n---\n\nWell, hello there.");
//! # Ok::<(), frontmatter::FrontmatterError>(())
//! ```
//!
//! Documents without front matter are not an error: parsing returns empty
//! metadata (or caller-supplied defaults) and the text untouched. Syntax
//! errors inside a detected metadata block do error, since silently dropping
//! a clearly intended block would hide authoring mistakes.

mod error;
mod handler;
mod post;
mod registry;

pub use error::{FrontmatterError, Result};
pub use handler::{
    ExportOptions, FormatOptions, Handler, JsonHandler, TomlHandler, YamlHandler,
};
pub use post::Post;
pub use registry::Registry;

// The crate-wide metadata value types.
pub use serde_yaml::{Mapping, Value};

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use error::{read_failed, write_failed};
use registry::default_registry;

/// Find the handler for `text` by trying each handler in `registry` in
/// order. Pure lookup; no handler state is touched.
pub fn detect_format(text: &str, registry: &Registry) -> Option<Arc<dyn Handler>> {
    registry.detect(text)
}

/// Normalize line endings and outer whitespace before any splitting.
fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

/// Parse text with front matter, returning metadata and content.
///
/// If no front matter is found, returns an empty metadata mapping and the
/// (whitespace-trimmed) text verbatim.
pub fn parse(text: &str) -> Result<(Mapping, String)> {
    parse_with(text, None, Mapping::new())
}

/// Parse text with an optional explicit handler and metadata defaults.
///
/// When `handler` is `None` the format is auto-detected against the default
/// registry; to detect against a custom registry, call
/// [`detect_format`] first and pass the result here. Keys decoded from the
/// front matter override `defaults` on conflict.
pub fn parse_with(
    text: &str,
    handler: Option<Arc<dyn Handler>>,
    defaults: Mapping,
) -> Result<(Mapping, String)> {
    let text = normalize(text);
    let mut metadata = defaults;

    let handler = handler.or_else(|| default_registry().detect(&text));
    let Some(handler) = handler else {
        return Ok((metadata, text));
    };

    // Fewer than two boundary lines means this is not a front matter
    // document after all; treat it exactly like absent front matter.
    let Some((fm, content)) = handler.split(&text) else {
        return Ok((metadata, text));
    };

    // Decode errors propagate. Non-mapping results (an empty block decodes
    // to null) leave the defaults untouched.
    if let Value::Mapping(map) = handler.load(&fm)? {
        for (key, value) in map {
            metadata.insert(key, value);
        }
    }

    Ok((metadata, content.trim().to_string()))
}

/// Parse text and return a [`Post`], remembering the handler that matched.
pub fn loads(text: &str) -> Result<Post> {
    loads_with(text, None, Mapping::new())
}

/// Parse text into a [`Post`] with an explicit handler and/or defaults.
///
/// The resolved handler (argument, or the detected one) is attached to the
/// post and becomes its default serialization format.
pub fn loads_with(
    text: &str,
    handler: Option<Arc<dyn Handler>>,
    defaults: Mapping,
) -> Result<Post> {
    let text = normalize(text);
    let handler = handler.or_else(|| default_registry().detect(&text));
    let (metadata, content) = parse_with(&text, handler.clone(), defaults)?;
    Ok(Post {
        content,
        metadata,
        handler,
    })
}

/// Read and parse a file, returning a [`Post`].
pub fn load(path: impl AsRef<Path>) -> Result<Post> {
    load_with(path, None, Mapping::new())
}

/// Read and parse a file with an explicit handler and/or defaults.
pub fn load_with(
    path: impl AsRef<Path>,
    handler: Option<Arc<dyn Handler>>,
    defaults: Mapping,
) -> Result<Post> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| read_failed(path.display().to_string(), e.to_string()))?;
    loads_with(&text, handler, defaults)
}

/// Serialize a post back into delimited text.
///
/// The format is the post's attached handler, or YAML when none is attached.
pub fn dumps(post: &Post) -> Result<String> {
    dumps_with(post, None, &FormatOptions::default())
}

/// Serialize a post with an explicit handler and/or options.
///
/// Handler resolution order: explicit argument, then the post's attached
/// handler, then the default YAML handler.
pub fn dumps_with(
    post: &Post,
    handler: Option<&dyn Handler>,
    options: &FormatOptions,
) -> Result<String> {
    match handler {
        Some(handler) => handler.format(post, options),
        None => match &post.handler {
            Some(handler) => handler.format(post, options),
            None => YamlHandler.format(post, options),
        },
    }
}

/// Serialize a post and write it to a file.
pub fn dump(post: &Post, path: impl AsRef<Path>) -> Result<()> {
    dump_with(post, path, None, &FormatOptions::default())
}

/// Serialize a post to a file with an explicit handler and/or options.
pub fn dump_with(
    post: &Post,
    path: impl AsRef<Path>,
    handler: Option<&dyn Handler>,
    options: &FormatOptions,
) -> Result<()> {
    let path = path.as_ref();
    let text = dumps_with(post, handler, options)?;
    fs::write(path, text).map_err(|e| write_failed(path.display().to_string(), e.to_string()))
}

/// Serialize a post and write it to an open sink.
pub fn dump_to(
    post: &Post,
    writer: &mut dyn io::Write,
    handler: Option<&dyn Handler>,
    options: &FormatOptions,
) -> Result<()> {
    let text = dumps_with(post, handler, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Whether `text` opens with a recognizable front matter boundary.
///
/// True for an empty-but-delimited block as well; this only detects, it
/// does not parse.
pub fn checks(text: &str) -> bool {
    default_registry().detect(&normalize(text)).is_some()
}

/// Whether the file at `path` starts with recognizable front matter.
pub fn check(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| read_failed(path.display().to_string(), e.to_string()))?;
    Ok(checks(&text))
}
