//! Document validation utilities.
//!
//! This module checks the structural invariants the emitter relies on:
//! export closure, enum value coverage, field ordering, base types and
//! annotation arguments. Type references inside fields are checked later,
//! during resolution.

use crate::entity::Entity;
use crate::error::SchemaError;
use crate::types::{Annotation, AnnotationArgs, Document, Field, TypeDescriptor, TypeKind};
use std::collections::HashMap;

/// Validates a parsed document for correctness.
///
/// # Arguments
/// * `doc` - The document to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_document(doc: &Document) -> Result<(), SchemaError> {
    validate_exports(doc)?;
    validate_types(doc)?;
    validate_annotations(doc, &doc.module.annotations)?;
    for constant in doc.constants.values() {
        validate_annotations(doc, &constant.annotations)?;
    }
    Ok(())
}

/// Validates that every exported name is declared.
fn validate_exports(doc: &Document) -> Result<(), SchemaError> {
    for name in &doc.exports.types {
        if !doc.has_type(name) {
            return Err(SchemaError::DanglingExport {
                kind: "type",
                name: name.clone(),
            });
        }
    }
    for name in &doc.exports.constants {
        if doc.get_constant(name).is_none() {
            return Err(SchemaError::DanglingExport {
                kind: "constant",
                name: name.clone(),
            });
        }
    }
    Ok(())
}

/// Validates all type definitions in the document.
fn validate_types(doc: &Document) -> Result<(), SchemaError> {
    for ty in doc.types.values() {
        match &ty.kind {
            TypeKind::Enum(enum_def) => {
                for name in &enum_def.names {
                    if !enum_def.values.contains_key(name) {
                        return Err(SchemaError::MissingEnumValue {
                            enum_name: ty.name.clone(),
                            value: name.clone(),
                        });
                    }
                }
            }
            TypeKind::Struct(agg) | TypeKind::Attribute(agg) => {
                validate_order(doc, ty, &agg.order, &agg.fields)?;
            }
            TypeKind::Union(union) => {
                validate_order(doc, ty, &union.order, &union.members)?;
            }
            _ => {}
        }

        validate_base(doc, ty)?;
        validate_annotations(doc, &ty.annotations)?;
    }
    Ok(())
}

/// Validates that member order only names declared members.
fn validate_order(
    doc: &Document,
    ty: &TypeDescriptor,
    order: &[String],
    fields: &HashMap<String, Field>,
) -> Result<(), SchemaError> {
    for name in order {
        let Some(field) = fields.get(name) else {
            return Err(SchemaError::unknown_field(&ty.name, name));
        };
        validate_annotations(doc, &field.annotations)?;
    }

    let unordered = fields
        .keys()
        .filter(|key| !order.contains(*key))
        .min();
    if let Some(field) = unordered {
        return Err(SchemaError::UnorderedField {
            type_name: ty.name.clone(),
            field: field.clone(),
        });
    }
    Ok(())
}

/// Validates the base chain of a type: declared, not ignored, acyclic.
fn validate_base(doc: &Document, ty: &TypeDescriptor) -> Result<(), SchemaError> {
    let mut path = vec![ty.name.as_str()];
    let mut current = ty;

    while let Some(base_name) = current.base() {
        if path.contains(&base_name) {
            path.push(base_name);
            return Err(SchemaError::CircularReference {
                path: path.join(" -> "),
            });
        }
        let Some(base) = doc.get_type(base_name) else {
            // Builtin storage types (enum bases) need no declaration.
            if matches!(current.kind, TypeKind::Enum(_)) {
                break;
            }
            return Err(SchemaError::invalid_base(
                &current.name,
                base_name,
                "base type is not declared",
            ));
        };
        if base.is_ignored() {
            return Err(SchemaError::invalid_base(
                &current.name,
                base_name,
                "base type is ignored",
            ));
        }
        path.push(base_name);
        current = base;
    }
    Ok(())
}

/// Validates annotation arguments against their attribute types.
///
/// Annotations whose attribute type is not declared, such as the well-known
/// `cxxname`, are not checked.
fn validate_annotations(doc: &Document, annotations: &[Annotation]) -> Result<(), SchemaError> {
    for anno in annotations {
        let Some(attr) = doc.get_type(&anno.type_name).and_then(|t| t.aggregate()) else {
            continue;
        };
        match &anno.args {
            AnnotationArgs::Positional(values) => {
                if values.len() > attr.order.len() {
                    return Err(SchemaError::AnnotationArity {
                        annotation: anno.type_name.clone(),
                        expected: attr.order.len(),
                        found: values.len(),
                    });
                }
            }
            AnnotationArgs::Keyed(map) => {
                if let Some(key) = map.keys().find(|key| !attr.fields.contains_key(*key)) {
                    return Err(SchemaError::UnknownAnnotationArgument {
                        annotation: anno.type_name.clone(),
                        argument: key.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
