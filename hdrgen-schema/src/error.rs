//! Error types for document loading and validation.

use thiserror::Error;

/// Error type for document loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON syntax or shape error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required top-level key.
    #[error("missing required key '{key}' in schema document")]
    MissingKey {
        /// Key name.
        key: String,
    },

    /// Invalid document structure.
    #[error("invalid document structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for document validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Export list names an entity that is not declared.
    #[error("exported {kind} '{name}' is not declared in the document")]
    DanglingExport {
        /// Entity kind ("type" or "constant").
        kind: &'static str,
        /// Exported name.
        name: String,
    },

    /// Enum lists a name without a value.
    #[error("enum '{enum_name}' has no value for '{value}'")]
    MissingEnumValue {
        /// Enum name.
        enum_name: String,
        /// Item name.
        value: String,
    },

    /// Member order references an undeclared field.
    #[error("type '{type_name}' orders unknown field '{field}'")]
    UnknownField {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// Base type is undeclared, ignored, or not an aggregate.
    #[error("type '{type_name}' has invalid base '{base}': {reason}")]
    InvalidBase {
        /// Type name.
        type_name: String,
        /// Base type name.
        base: String,
        /// Why the base was rejected.
        reason: &'static str,
    },

    /// Circular base chain.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },

    /// Annotation passes more arguments than its attribute type declares.
    #[error("annotation '{annotation}' expects at most {expected} arguments, found {found}")]
    AnnotationArity {
        /// Attribute type name.
        annotation: String,
        /// Declared field count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
    },

    /// Annotation passes a keyed argument its attribute type does not declare.
    #[error("annotation '{annotation}' has no argument named '{argument}'")]
    UnknownAnnotationArgument {
        /// Attribute type name.
        annotation: String,
        /// Argument key.
        argument: String,
    },

    /// Field or member missing from the type's member order.
    #[error("type '{type_name}' declares field '{field}' that is missing from its order")]
    UnorderedField {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
    },
}

impl ParseError {
    /// Creates a missing key error.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates an invalid base error.
    pub fn invalid_base(
        type_name: impl Into<String>,
        base: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidBase {
            type_name: type_name.into(),
            base: base.into(),
            reason,
        }
    }

    /// Creates an unknown field error.
    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}
