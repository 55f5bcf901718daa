//! Schema document loader.
//!
//! This module reads a JSON schema document into the typed [`Document`]
//! representation.

use crate::error::ParseError;
use crate::types::Document;
use serde_json::Value;
use std::path::Path;

/// Top-level keys every document must carry.
const REQUIRED_KEYS: [&str; 4] = ["module", "types", "constants", "exports"];

/// Parses a schema document from a JSON string.
///
/// # Arguments
/// * `json` - JSON document content
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed, a required top-level key
/// is missing, or an entity has the wrong shape.
pub fn parse_document(json: &str) -> Result<Document, ParseError> {
    let value: Value = serde_json::from_str(json)?;

    let Some(object) = value.as_object() else {
        return Err(ParseError::invalid_structure(
            "schema document must be a JSON object",
        ));
    };
    if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
        return Err(ParseError::missing_key(*missing));
    }

    let mut document: Document = serde_json::from_value(value)?;
    document.fill_names();
    Ok(document)
}

/// Parses a schema document from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsing fails.
pub fn parse_document_file(path: &Path) -> Result<Document, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_document(&json)
}
