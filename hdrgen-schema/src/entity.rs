//! Uniform access to named, annotated schema entities.
//!
//! Types, fields and constants all carry a name, annotations, an optional
//! location and an ignore flag. The [`Entity`] trait exposes these so name
//! and namespace resolution can treat them alike.

use crate::types::{Annotation, Constant, Field, Location, TypeDescriptor, TypeKind};
use serde_json::Value;

/// Annotation overriding the emitted identifier.
pub const CXX_NAME: &str = "cxxname";
/// Annotation overriding the emitted namespace.
pub const CXX_NAMESPACE: &str = "cxxnamespace";
/// Annotation excluding an entity from emission.
pub const IGNORE: &str = "ignore";
/// Reserved bookkeeping annotation, never surfaced through accessors.
pub const CUSTOM_TAG: &str = "$hdrgen.customtag";

/// Coarse entity classification used by namespace resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Ordinary declared type.
    Type,
    /// Type parameter of a generic aggregate.
    Generic,
    /// Attribute (annotation-definition) type.
    Attribute,
    /// Struct field or union member.
    Field,
    /// Named constant.
    Constant,
}

/// A named, annotated schema entity.
pub trait Entity {
    /// Schema name.
    fn name(&self) -> &str;

    /// Attached annotations.
    fn annotations(&self) -> &[Annotation];

    /// Entity classification.
    fn entity_kind(&self) -> EntityKind;

    /// Dot-separated schema namespace path.
    fn namespace_path(&self) -> Option<&str> {
        None
    }

    /// Source location.
    fn location(&self) -> Option<&Location> {
        None
    }

    /// Explicit ignore flag from the document.
    fn ignore_flag(&self) -> bool {
        false
    }

    /// Returns the first annotation of the given attribute type.
    fn annotation(&self, type_name: &str) -> Option<&Annotation> {
        self.annotations()
            .iter()
            .find(|anno| anno.type_name == type_name)
    }

    /// Explicit identifier from a `cxxname` annotation.
    fn name_override(&self) -> Option<&str> {
        self.annotation(CXX_NAME)
            .and_then(|anno| anno.arg_str(0, "name"))
    }

    /// Explicit namespace from a `cxxnamespace` annotation.
    fn namespace_override(&self) -> Option<&str> {
        self.annotation(CXX_NAMESPACE)
            .and_then(|anno| anno.arg_str(0, "ns"))
    }

    /// Returns true if the entity must not be emitted.
    ///
    /// An `ignore` annotation without arguments counts as `true`.
    fn is_ignored(&self) -> bool {
        if self.ignore_flag() {
            return true;
        }
        match self.annotation(IGNORE) {
            Some(anno) => !matches!(anno.arg(0, "ignored"), Some(Value::Bool(false))),
            None => false,
        }
    }
}

impl Entity for TypeDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn entity_kind(&self) -> EntityKind {
        match self.kind {
            TypeKind::Generic => EntityKind::Generic,
            TypeKind::Attribute(_) => EntityKind::Attribute,
            _ => EntityKind::Type,
        }
    }

    fn namespace_path(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    fn ignore_flag(&self) -> bool {
        self.ignore
    }
}

impl Entity for Field {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn entity_kind(&self) -> EntityKind {
        EntityKind::Field
    }

    fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    fn ignore_flag(&self) -> bool {
        self.ignore
    }
}

impl Entity for Constant {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn entity_kind(&self) -> EntityKind {
        EntityKind::Constant
    }

    fn namespace_path(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    fn ignore_flag(&self) -> bool {
        self.ignore
    }
}
