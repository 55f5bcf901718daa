//! Schema document definitions.
//!
//! This module contains the data structures representing a parsed schema
//! document: the module header, type descriptors, fields, constants and
//! annotations. Type references are type names keyed into
//! [`Document::types`]; literal values stay raw JSON until they are encoded.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Complete schema document for one module.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Module header.
    pub module: ModuleInfo,
    /// All types visible to the module, keyed by name.
    pub types: HashMap<String, TypeDescriptor>,
    /// All constants visible to the module, keyed by name.
    pub constants: HashMap<String, Constant>,
    /// Public surface of the module, in declaration order.
    pub exports: Exports,
}

impl Document {
    /// Looks up a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Looks up a constant by name.
    #[must_use]
    pub fn get_constant(&self, name: &str) -> Option<&Constant> {
        self.constants.get(name)
    }

    /// Copies map keys into entity names that the producer left blank.
    pub(crate) fn fill_names(&mut self) {
        for (key, ty) in &mut self.types {
            if ty.name.is_empty() {
                ty.name.clone_from(key);
            }
            let fields = match &mut ty.kind {
                TypeKind::Struct(agg) | TypeKind::Attribute(agg) => Some(&mut agg.fields),
                TypeKind::Union(union) => Some(&mut union.members),
                _ => None,
            };
            for (field_key, field) in fields.into_iter().flatten() {
                if field.name.is_empty() {
                    field.name.clone_from(field_key);
                }
            }
        }
        for (key, constant) in &mut self.constants {
            if constant.name.is_empty() {
                constant.name.clone_from(key);
            }
        }
    }
}

/// Module header.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleInfo {
    /// Module name.
    pub name: String,
    /// Imported module names, in declared order.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Module-level annotations.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Source location.
    #[serde(default)]
    pub location: Option<Location>,
}

/// Exported entity names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Exports {
    /// Exported type names, in emission order.
    #[serde(default)]
    pub types: Vec<String>,
    /// Exported constant names, in emission order.
    #[serde(default)]
    pub constants: Vec<String>,
}

/// Source location of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    /// Source file name.
    pub filename: String,
    /// Start line.
    #[serde(default)]
    pub line: Option<u32>,
    /// Start column.
    #[serde(default)]
    pub column: Option<u32>,
    /// End line, when it differs from the start.
    #[serde(default, rename = "lineEnd")]
    pub line_end: Option<u32>,
    /// End column, when it differs from the start.
    #[serde(default, rename = "columnEnd")]
    pub column_end: Option<u32>,
}

impl Location {
    /// Formats the location as `file(line,column)`, `file(line)` or `file`.
    #[must_use]
    pub fn provenance(&self) -> String {
        match (self.line, self.column) {
            (Some(line), Some(column)) => format!("{}({},{})", self.filename, line, column),
            (Some(line), None) => format!("{}({})", self.filename, line),
            _ => self.filename.clone(),
        }
    }
}

/// Metadata attached to an entity, typed by an attribute type.
#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    /// Name of the attribute type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Arguments, one per attribute field.
    #[serde(default)]
    pub args: AnnotationArgs,
    /// Source location.
    #[serde(default)]
    pub location: Option<Location>,
}

impl Annotation {
    /// Returns the argument at `index` (positional) or named `key` (keyed).
    ///
    /// A keyed annotation with a single argument answers any key, so callers
    /// can read the sole argument of well-known annotations without knowing
    /// the attribute's field name.
    #[must_use]
    pub fn arg(&self, index: usize, key: &str) -> Option<&Value> {
        match &self.args {
            AnnotationArgs::Positional(values) => values.get(index),
            AnnotationArgs::Keyed(map) => map.get(key).or_else(|| {
                if map.len() == 1 {
                    map.values().next()
                } else {
                    None
                }
            }),
        }
    }

    /// Returns the argument as a string, if present and a string.
    #[must_use]
    pub fn arg_str(&self, index: usize, key: &str) -> Option<&str> {
        self.arg(index, key).and_then(Value::as_str)
    }
}

/// Annotation arguments.
///
/// Earlier producers emit a positional array; later ones key each argument
/// by the attribute field it binds to.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnnotationArgs {
    /// Arguments in attribute field order.
    Positional(Vec<Value>),
    /// Arguments keyed by attribute field name.
    Keyed(serde_json::Map<String, Value>),
}

impl Default for AnnotationArgs {
    fn default() -> Self {
        Self::Positional(Vec::new())
    }
}

impl AnnotationArgs {
    /// Number of supplied arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Keyed(map) => map.len(),
        }
    }

    /// Returns true if no arguments were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A declared type.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDescriptor {
    /// Type name (filled from the map key when absent).
    #[serde(default)]
    pub name: String,
    /// Owning module.
    #[serde(default)]
    pub module: Option<String>,
    /// Dot-separated schema namespace path.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Attached annotations.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Source location.
    #[serde(default)]
    pub location: Option<Location>,
    /// Explicit ignore flag.
    #[serde(default)]
    pub ignore: bool,
    /// Kind-specific payload.
    #[serde(flatten)]
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Returns the fields of a struct or attribute type.
    #[must_use]
    pub fn aggregate(&self) -> Option<&AggregateDef> {
        match &self.kind {
            TypeKind::Struct(agg) | TypeKind::Attribute(agg) => Some(agg),
            _ => None,
        }
    }

    /// Returns the declared base type name, if any.
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Enum(e) => e.base.as_deref(),
            TypeKind::Struct(agg) | TypeKind::Attribute(agg) => agg.base.as_deref(),
            TypeKind::Union(u) => u.base.as_deref(),
            _ => None,
        }
    }

    /// Returns the kind tag as it appears in the document.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Type descriptor kinds.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeKind {
    /// Enumeration.
    Enum(EnumDef),
    /// Plain aggregate.
    Struct(AggregateDef),
    /// Attribute (annotation-definition) aggregate.
    Attribute(AggregateDef),
    /// Overlapping-member aggregate.
    Union(UnionDef),
    /// Renaming of another type.
    Alias(AliasDef),
    /// Owned sequence of another type.
    Array(ArrayDef),
    /// Exclusively owning pointer to another type.
    Pointer(PointerDef),
    /// Generic instantiation.
    Specialized(SpecializedDef),
    /// Primitive with a fixed target spelling.
    #[serde(alias = "primitive", alias = "simple")]
    Builtin,
    /// Runtime type identity.
    Typename,
    /// Type parameter of a generic aggregate.
    Generic,
}

impl TypeKind {
    /// Returns the kind tag as it appears in the document.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Enum(_) => "enum",
            Self::Struct(_) => "struct",
            Self::Attribute(_) => "attribute",
            Self::Union(_) => "union",
            Self::Alias(_) => "alias",
            Self::Array(_) => "array",
            Self::Pointer(_) => "pointer",
            Self::Specialized(_) => "specialized",
            Self::Builtin => "builtin",
            Self::Typename => "typename",
            Self::Generic => "generic",
        }
    }
}

/// Enumeration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumDef {
    /// Storage type.
    #[serde(default)]
    pub base: Option<String>,
    /// Item names in declaration order.
    #[serde(default)]
    pub names: Vec<String>,
    /// Item values.
    #[serde(default)]
    pub values: HashMap<String, i64>,
}

/// Struct or attribute payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregateDef {
    /// Base type.
    #[serde(default)]
    pub base: Option<String>,
    /// Generic parameter names.
    #[serde(default)]
    pub generics: Vec<String>,
    /// Field names in declaration order.
    #[serde(default)]
    pub order: Vec<String>,
    /// Fields keyed by name.
    #[serde(default)]
    pub fields: HashMap<String, Field>,
}

impl AggregateDef {
    /// Iterates fields in declaration order, skipping names without a field.
    pub fn ordered_fields(&self) -> impl Iterator<Item = &Field> {
        self.order.iter().filter_map(|name| self.fields.get(name))
    }
}

/// Union payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UnionDef {
    /// Base type.
    #[serde(default)]
    pub base: Option<String>,
    /// Generic parameter names.
    #[serde(default)]
    pub generics: Vec<String>,
    /// Member names in declaration order.
    #[serde(default)]
    pub order: Vec<String>,
    /// Members keyed by name.
    #[serde(default, alias = "fields")]
    pub members: HashMap<String, Field>,
}

/// Alias payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasDef {
    /// Aliased type; absent for forward-declaration placeholders.
    #[serde(default, rename = "ref")]
    pub target: Option<String>,
}

/// Array payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrayDef {
    /// Element type.
    pub of: String,
    /// Fixed element count.
    #[serde(default)]
    pub size: Option<u64>,
}

/// Pointer payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PointerDef {
    /// Pointee type.
    pub to: String,
}

/// Generic instantiation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecializedDef {
    /// Generic type being instantiated.
    #[serde(rename = "ref")]
    pub generic: String,
    /// Type arguments.
    #[serde(default, rename = "typeParams")]
    pub type_params: Vec<String>,
}

/// Struct field or union member.
#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    /// Field name (filled from the map key when absent).
    #[serde(default)]
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Default value; an explicit JSON `null` is kept as a null literal.
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,
    /// Attached annotations.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Source location.
    #[serde(default)]
    pub location: Option<Location>,
    /// Explicit ignore flag.
    #[serde(default)]
    pub ignore: bool,
}

/// Named constant.
#[derive(Debug, Clone, Deserialize)]
pub struct Constant {
    /// Constant name (filled from the map key when absent).
    #[serde(default)]
    pub name: String,
    /// Owning module.
    #[serde(default)]
    pub module: Option<String>,
    /// Dot-separated schema namespace path.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Constant type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Constant value.
    #[serde(default, alias = "default", deserialize_with = "present")]
    pub value: Option<Value>,
    /// Attached annotations.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Source location.
    #[serde(default)]
    pub location: Option<Location>,
    /// Explicit ignore flag.
    #[serde(default)]
    pub ignore: bool,
}

/// Deserializes a present value, keeping JSON `null` as `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_provenance() {
        let full = Location {
            filename: "a.sap".to_string(),
            line: Some(3),
            column: Some(7),
            line_end: None,
            column_end: None,
        };
        assert_eq!(full.provenance(), "a.sap(3,7)");

        let line_only = Location {
            column: None,
            ..full.clone()
        };
        assert_eq!(line_only.provenance(), "a.sap(3)");

        let file_only = Location {
            line: None,
            column: None,
            ..full
        };
        assert_eq!(file_only.provenance(), "a.sap");
    }

    #[test]
    fn test_type_kind_tags() {
        let ty: TypeDescriptor = serde_json::from_value(json!({
            "kind": "array",
            "of": "int"
        }))
        .unwrap();
        assert_eq!(ty.kind_name(), "array");

        let ty: TypeDescriptor = serde_json::from_value(json!({ "kind": "primitive" })).unwrap();
        assert!(matches!(ty.kind, TypeKind::Builtin));
    }

    #[test]
    fn test_field_null_default_is_kept() {
        let field: Field = serde_json::from_value(json!({
            "type": "Node",
            "default": null
        }))
        .unwrap();
        assert_eq!(field.default, Some(Value::Null));

        let field: Field = serde_json::from_value(json!({ "type": "Node" })).unwrap();
        assert_eq!(field.default, None);
    }

    #[test]
    fn test_annotation_arg_lookup() {
        let positional: Annotation = serde_json::from_value(json!({
            "type": "cxxname",
            "args": ["Renamed"]
        }))
        .unwrap();
        assert_eq!(positional.arg_str(0, "name"), Some("Renamed"));

        let keyed: Annotation = serde_json::from_value(json!({
            "type": "cxxname",
            "args": { "id": "Other" }
        }))
        .unwrap();
        assert_eq!(keyed.arg_str(0, "name"), Some("Other"));

        let empty: Annotation = serde_json::from_value(json!({ "type": "ignore" })).unwrap();
        assert!(empty.args.is_empty());
        assert!(empty.arg(0, "ignored").is_none());
    }

    #[test]
    fn test_union_accepts_fields_alias() {
        let ty: TypeDescriptor = serde_json::from_value(json!({
            "kind": "union",
            "order": ["a"],
            "fields": { "a": { "type": "int" } }
        }))
        .unwrap();
        match ty.kind {
            TypeKind::Union(u) => assert!(u.members.contains_key("a")),
            other => panic!("unexpected kind {}", other.name()),
        }
    }
}
