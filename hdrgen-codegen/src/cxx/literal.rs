//! Literal encoding for defaults, constants and annotation arguments.
//!
//! Raw JSON values are first lowered into a [`Literal`] and then rendered
//! as C++ literal syntax.

use crate::cxx::ident::legalize;
use crate::error::CodegenError;
use serde_json::{Number, Value};
use std::fmt;

/// A classified literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Text literal. Rendered without escaping.
    String(String),
    /// Boolean literal.
    Bool(bool),
    /// Null pointer or empty value.
    Null,
    /// Numeric literal.
    Number(Number),
    /// Reference to an enumerator.
    EnumValue {
        /// Enum type name.
        type_name: String,
        /// Enumerator name.
        name: String,
    },
    /// Runtime type identity of a type.
    TypeId {
        /// Type name.
        type_name: String,
    },
    /// Brace-initialized list.
    List(Vec<Literal>),
}

impl Literal {
    /// Classifies a raw JSON value.
    ///
    /// # Errors
    /// Returns `CodegenError::Encoding` for objects that are not enum-value
    /// or type-identity references.
    pub fn from_json(value: &Value) -> Result<Self, CodegenError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => Ok(Self::Number(n.clone())),
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Object(map) => {
                let kind = map.get("kind").and_then(Value::as_str);
                let type_name = map.get("type").and_then(Value::as_str);
                match (kind, type_name) {
                    (Some("enum"), Some(type_name)) => {
                        let name = map.get("name").and_then(Value::as_str).ok_or_else(|| {
                            CodegenError::encoding(format!(
                                "enum reference to '{type_name}' has no item name"
                            ))
                        })?;
                        Ok(Self::EnumValue {
                            type_name: type_name.to_string(),
                            name: name.to_string(),
                        })
                    }
                    (Some("typename"), Some(type_name)) => Ok(Self::TypeId {
                        type_name: type_name.to_string(),
                    }),
                    _ => Err(CodegenError::encoding(format!(
                        "unsupported literal object {value}"
                    ))),
                }
            }
        }
    }

    /// Renders the literal as C++ source text.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str("nullptr"),
            Self::Number(n) => write!(f, "{n}"),
            Self::EnumValue { type_name, name } => {
                write!(f, "{}::{}", legalize(type_name), legalize(name))
            }
            Self::TypeId { type_name } => write!(f, "typeid({})", legalize(type_name)),
            Self::List(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Encodes a raw JSON value as C++ literal text.
///
/// # Errors
/// Returns `CodegenError::Encoding` if the value has an unsupported shape.
pub fn encode(value: &Value) -> Result<String, CodegenError> {
    Literal::from_json(value).map(|literal| literal.render())
}
