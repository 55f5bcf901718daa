//! Prelude module for convenient imports.
//!
//! ```ignore
//! use hdrgen::prelude::*;
//! ```

// Schema types
pub use hdrgen_schema::{
    Annotation, Constant, Document, Entity, Field, ParseError, SchemaError, TypeDescriptor,
    TypeKind, parse_document, parse_document_file, validate_document,
};

// Generation types
pub use hdrgen_codegen::{
    Banner, CodegenError, Generator, GeneratorConfig, HeaderFile, generate_from_file,
    generate_from_json, write_atomic,
};
