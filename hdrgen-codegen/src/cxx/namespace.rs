//! Namespace resolution for declared entities.

use crate::config::GeneratorConfig;
use crate::cxx::ident::{cxx_name, legalize};
use crate::cxx::types::builtin_spelling;
use hdrgen_schema::{Entity, EntityKind};

/// Separator between C++ scope segments.
pub const SCOPE_SEPARATOR: &str = "::";

/// Computes the namespace an entity is declared in.
#[derive(Debug, Clone, Copy)]
pub struct NamespaceResolver<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> NamespaceResolver<'a> {
    /// Creates a resolver using the scope tokens from `config`.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the namespace for `entity`, or `None` for the global scope.
    ///
    /// Rules are tried in order and the first match wins:
    /// 1. `cxxnamespace` annotation, verbatim
    /// 2. generic type parameter: global
    /// 3. builtin type name: global
    /// 4. `cxxname` annotation: global, the rename is already qualified
    /// 5. schema namespace path: root scope plus legalized segments
    /// 6. attribute type: attribute scope
    /// 7. type scope
    #[must_use]
    pub fn namespace_of(&self, entity: &impl Entity) -> Option<String> {
        if let Some(ns) = entity.namespace_override() {
            return Some(ns.to_string());
        }
        if entity.entity_kind() == EntityKind::Generic {
            return None;
        }
        if builtin_spelling(entity.name()).is_some() {
            return None;
        }
        if entity.name_override().is_some() {
            return None;
        }
        if let Some(path) = entity.namespace_path() {
            let segments = path.split('.').map(legalize);
            let scope = std::iter::once(self.config.root_scope.clone())
                .chain(segments)
                .collect::<Vec<_>>()
                .join(SCOPE_SEPARATOR);
            return Some(scope);
        }
        if entity.entity_kind() == EntityKind::Attribute {
            return Some(self.config.attribute_scope.clone());
        }
        Some(self.config.type_scope.clone())
    }

    /// Returns the fully qualified spelling of `entity`.
    #[must_use]
    pub fn qualified(&self, entity: &impl Entity) -> String {
        let name = cxx_name(entity);
        match self.namespace_of(entity) {
            Some(ns) if !ns.is_empty() => format!("{ns}{SCOPE_SEPARATOR}{name}"),
            _ => name,
        }
    }
}
