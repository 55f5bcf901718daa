//! # hdrgen Codegen
//!
//! C++ header generation from hdrgen schema documents.
//!
//! This crate provides:
//! - Identifier legalization and literal encoding
//! - Type reference and namespace resolution
//! - A declaration IR with a pure renderer
//! - Include guard, import and banner composition
//! - Atomic header writing

pub mod config;
pub mod cxx;
pub mod error;
pub mod generator;
pub mod output;

pub use config::GeneratorConfig;
pub use cxx::{Banner, HeaderFile};
pub use error::CodegenError;
pub use generator::Generator;
pub use output::write_atomic;

/// Generates a C++ header from a schema document in JSON form.
///
/// The document is validated before generation. No banner is emitted.
///
/// # Arguments
/// * `json` - Schema document content
///
/// # Returns
/// Generated header text.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_json(json: &str) -> Result<String, CodegenError> {
    let doc = hdrgen_schema::parse_document(json)?;
    hdrgen_schema::validate_document(&doc)?;
    Generator::new(&doc).generate()
}

/// Generates a C++ header from a schema document file.
///
/// # Arguments
/// * `path` - Path to the JSON schema document
///
/// # Returns
/// Generated header text.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or generation
/// fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<String, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json)
}
