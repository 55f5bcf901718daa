//! Type reference resolution.
//!
//! Lowers a type name, possibly naming a composite descriptor, into a fully
//! qualified C++ type expression.

use crate::cxx::ident::legalize;
use crate::cxx::namespace::NamespaceResolver;
use crate::error::CodegenError;
use hdrgen_schema::{Document, TypeKind};

/// Builtin schema type names and their fixed C++ spellings.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("string", "std::string"),
    ("bool", "bool"),
    ("byte", "unsigned char"),
    ("char", "char"),
    ("int", "int"),
    ("float", "float"),
    ("double", "double"),
    ("i8", "std::int8_t"),
    ("i16", "std::int16_t"),
    ("i32", "std::int32_t"),
    ("i64", "std::int64_t"),
    ("u8", "std::uint8_t"),
    ("u16", "std::uint16_t"),
    ("u32", "std::uint32_t"),
    ("u64", "std::uint64_t"),
    ("int8", "std::int8_t"),
    ("int16", "std::int16_t"),
    ("int32", "std::int32_t"),
    ("int64", "std::int64_t"),
    ("uint8", "std::uint8_t"),
    ("uint16", "std::uint16_t"),
    ("uint32", "std::uint32_t"),
    ("uint64", "std::uint64_t"),
    ("f32", "float"),
    ("f64", "double"),
];

/// Spelling of the runtime type-identity storage type.
pub const TYPE_ID_STORAGE: &str = "std::type_index";

/// Returns the fixed C++ spelling of a builtin type name.
#[must_use]
pub fn builtin_spelling(name: &str) -> Option<&'static str> {
    BUILTIN_TYPES
        .iter()
        .find(|(schema, _)| *schema == name)
        .map(|(_, cxx)| *cxx)
}

/// Resolves type names against a document.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    doc: &'a Document,
    namespaces: NamespaceResolver<'a>,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver over `doc`.
    #[must_use]
    pub fn new(doc: &'a Document, namespaces: NamespaceResolver<'a>) -> Self {
        Self { doc, namespaces }
    }

    /// Resolves a type name to a C++ type expression.
    ///
    /// # Errors
    /// Returns `UnresolvedReference` for undeclared names and
    /// `CyclicReference` when a composite chain revisits a type.
    pub fn resolve(&self, name: &str) -> Result<String, CodegenError> {
        self.resolve_for(name, &[], name)
    }

    /// Resolves a type name referenced from `context`.
    ///
    /// Names listed in `generics` that are not declared in the document
    /// resolve to the legalized parameter name.
    ///
    /// # Errors
    /// Same as [`TypeResolver::resolve`].
    pub fn resolve_for(
        &self,
        name: &str,
        generics: &[String],
        context: &str,
    ) -> Result<String, CodegenError> {
        let mut path = Vec::new();
        self.resolve_in(name, generics, context, &mut path)
    }

    /// Resolves the target of the alias `alias`.
    ///
    /// The alias itself counts as visited, so a target that reaches back to
    /// the alias through composite kinds is reported as a cycle.
    ///
    /// # Errors
    /// Same as [`TypeResolver::resolve`].
    pub fn resolve_alias_target(&self, alias: &str, target: &str) -> Result<String, CodegenError> {
        let mut path = vec![alias];
        self.resolve_in(target, &[], alias, &mut path)
    }

    fn resolve_in<'n>(
        &self,
        name: &'n str,
        generics: &[String],
        context: &str,
        path: &mut Vec<&'n str>,
    ) -> Result<String, CodegenError>
    where
        'a: 'n,
    {
        if path.contains(&name) {
            return Err(cycle(path, name));
        }

        let Some(ty) = self.doc.get_type(name) else {
            if generics.iter().any(|g| g == name) {
                return Ok(legalize(name));
            }
            return builtin_spelling(name)
                .map(str::to_string)
                .ok_or_else(|| CodegenError::unresolved(name, context));
        };

        path.push(name);
        let resolved = match &ty.kind {
            TypeKind::Array(array) => {
                let element = self.resolve_in(&array.of, generics, context, path)?;
                match array.size {
                    Some(size) => format!("std::array<{element}, {size}>"),
                    None => format!("std::vector<{element}>"),
                }
            }
            TypeKind::Pointer(pointer) => {
                let pointee = self.resolve_in(&pointer.to, generics, context, path)?;
                format!("std::unique_ptr<{pointee}>")
            }
            TypeKind::Specialized(specialized) => {
                let generic = self.resolve_in(&specialized.generic, generics, context, path)?;
                let params = specialized
                    .type_params
                    .iter()
                    .map(|param| self.resolve_in(param, generics, context, path))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("{generic}<{}>", params.join(", "))
            }
            TypeKind::Typename => TYPE_ID_STORAGE.to_string(),
            _ => self.namespaces.qualified(ty),
        };
        path.pop();

        Ok(resolved)
    }

    /// Walks an alias chain starting at `name`, failing if it loops.
    ///
    /// # Errors
    /// Returns `CyclicReference` if the chain revisits an alias.
    pub fn check_alias_chain(&self, name: &str) -> Result<(), CodegenError> {
        let mut path: Vec<&str> = Vec::new();
        let mut current = name;

        while let Some(ty) = self.doc.get_type(current) {
            let TypeKind::Alias(alias) = &ty.kind else {
                break;
            };
            let Some(target) = alias.target.as_deref() else {
                break;
            };
            path.push(current);
            if path.contains(&target) {
                return Err(cycle(&path, target));
            }
            current = target;
        }
        Ok(())
    }
}

fn cycle(path: &[&str], revisited: &str) -> CodegenError {
    let mut names = path.to_vec();
    names.push(revisited);
    CodegenError::CyclicReference {
        path: names.join(" -> "),
    }
}
