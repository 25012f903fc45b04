pub mod document;
mod lenient;
pub mod schema;

use crate::error::ParseError;
use document::ParsedDocument;

/// Parse a document from YAML. JSON input is accepted too, since YAML is a superset.
///
/// Empty input and a top-level `null` both yield an empty document.
pub fn from_yaml(input: &str) -> Result<ParsedDocument, ParseError> {
    if input.trim().is_empty() {
        return Ok(ParsedDocument::default());
    }
    let doc: Option<ParsedDocument> = serde_yaml_ng::from_str(input)?;
    Ok(doc.unwrap_or_default())
}

/// Parse a document from JSON.
pub fn from_json(input: &str) -> Result<ParsedDocument, ParseError> {
    let doc: Option<ParsedDocument> = serde_json::from_str(input)?;
    Ok(doc.unwrap_or_default())
}

/// Parse raw uploaded bytes: decode as UTF-8, then read as YAML.
pub fn from_slice(bytes: &[u8]) -> Result<ParsedDocument, ParseError> {
    let content = std::str::from_utf8(bytes)?;
    from_yaml(content)
}
