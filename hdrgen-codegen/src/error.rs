//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Document loading error.
    #[error("schema parse error: {0}")]
    Parse(#[from] hdrgen_schema::ParseError),

    /// Document validation error.
    #[error("schema error: {0}")]
    Schema(#[from] hdrgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Type reference not declared in the document.
    #[error("unresolved type '{type_name}' referenced by {context}")]
    UnresolvedReference {
        /// Type name.
        type_name: String,
        /// Referencing entity.
        context: String,
    },

    /// Literal value with an unsupported shape.
    #[error("cannot encode literal: {message}")]
    Encoding {
        /// Error message.
        message: String,
    },

    /// Type resolution revisited a type on the active path.
    #[error("cyclic type reference: {path}")]
    CyclicReference {
        /// Resolution path, ending with the revisited type.
        path: String,
    },

    /// Export order would reopen an already closed namespace block.
    #[error("namespace '{namespace}' reopened by '{entity}'; exports must group entities by namespace")]
    ScopeReopened {
        /// Namespace being reopened (empty for the global scope).
        namespace: String,
        /// Entity that triggered the reopen.
        entity: String,
    },
}

impl CodegenError {
    /// Creates an unresolved reference error.
    pub fn unresolved(type_name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            type_name: type_name.into(),
            context: context.into(),
        }
    }

    /// Creates an encoding error with the given message.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }
}
