//! # hdrgen Schema
//!
//! Schema document model and loading.
//!
//! This crate provides:
//! - Typed representation of a parsed IDL schema document
//! - JSON loading with required-key checks
//! - Document validation (export closure, enum values, field order, bases)
//! - Uniform access to entity names, annotations and ignore flags

pub mod entity;
pub mod error;
pub mod parser;
pub mod types;
pub mod validation;

pub use entity::{CUSTOM_TAG, CXX_NAME, CXX_NAMESPACE, Entity, EntityKind, IGNORE};
pub use error::{ParseError, SchemaError};
pub use parser::{parse_document, parse_document_file};
pub use types::{
    AggregateDef, AliasDef, Annotation, AnnotationArgs, ArrayDef, Constant, Document, EnumDef,
    Exports, Field, Location, ModuleInfo, PointerDef, SpecializedDef, TypeDescriptor, TypeKind,
    UnionDef,
};
pub use validation::validate_document;
