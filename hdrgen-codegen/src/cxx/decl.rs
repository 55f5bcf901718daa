//! Declaration intermediate representation.
//!
//! The generator builds a [`HeaderFile`] of scope blocks holding ordered
//! declaration nodes; [`crate::cxx::render`] prints it. Every string stored
//! here is already resolved C++ text.

use crate::error::CodegenError;

/// A complete header, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFile {
    /// Module name.
    pub module_name: String,
    /// Rendered module annotation comments.
    pub module_annotations: Vec<String>,
    /// Imported module names, in declared order.
    pub imports: Vec<String>,
    /// Type declarations grouped by namespace.
    pub types: Vec<ScopeBlock>,
    /// Constant declarations grouped by namespace.
    pub constants: Vec<ScopeBlock>,
}

impl HeaderFile {
    /// Iterates all declarations in emission order.
    pub fn declarations(&self) -> impl Iterator<Item = &Decl> {
        self.types
            .iter()
            .chain(&self.constants)
            .flat_map(|block| &block.decls)
    }

    /// Finds a type or constant declaration by emitted name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Decl> {
        self.declarations().find(|decl| decl.name() == name)
    }
}

/// A contiguous run of declarations sharing one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeBlock {
    /// Namespace, or `None` for the global scope.
    pub namespace: Option<String>,
    /// Declarations in emission order.
    pub decls: Vec<Decl>,
}

/// A single declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `enum class`.
    Enum(EnumDecl),
    /// `struct`, possibly templated.
    Struct(StructDecl),
    /// `union`, possibly templated.
    Union(UnionDecl),
    /// `using` alias.
    Alias(AliasDecl),
    /// `static const` constant.
    Constant(ConstantDecl),
}

impl Decl {
    /// Emitted name of the declaration.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Enum(d) => &d.name,
            Self::Struct(d) => &d.name,
            Self::Union(d) => &d.name,
            Self::Alias(d) => &d.name,
            Self::Constant(d) => &d.name,
        }
    }

    /// Comment lines printed above the declaration.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        match self {
            Self::Enum(d) => &d.comments,
            Self::Struct(d) => &d.comments,
            Self::Union(d) => &d.comments,
            Self::Alias(d) => &d.comments,
            Self::Constant(d) => &d.comments,
        }
    }
}

/// Enumeration declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    /// Provenance and annotation comments.
    pub comments: Vec<String>,
    /// Emitted name.
    pub name: String,
    /// Storage type.
    pub base: Option<String>,
    /// Enumerators and their values.
    pub items: Vec<(String, i64)>,
}

/// Struct declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Provenance and annotation comments.
    pub comments: Vec<String>,
    /// Emitted name.
    pub name: String,
    /// Template parameter names.
    pub template_params: Vec<String>,
    /// Base type.
    pub base: Option<String>,
    /// Compile-time annotation accessor.
    pub accessor: Option<AnnotationAccessor>,
    /// Data members.
    pub members: Vec<MemberDecl>,
}

/// Union declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDecl {
    /// Provenance and annotation comments.
    pub comments: Vec<String>,
    /// Emitted name.
    pub name: String,
    /// Template parameter names.
    pub template_params: Vec<String>,
    /// Base type.
    pub base: Option<String>,
    /// Overlapping members.
    pub members: Vec<MemberDecl>,
}

/// Data member of a struct or union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    /// Annotation comments.
    pub comments: Vec<String>,
    /// Member type.
    pub type_expr: String,
    /// Emitted name.
    pub name: String,
    /// Default initializer.
    pub default: Option<String>,
}

/// `get_annotation<N>()` accessor on an annotated struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationAccessor {
    /// One branch per surfaced annotation.
    pub branches: Vec<AccessorBranch>,
}

/// One `if constexpr (N == index)` branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorBranch {
    /// Position in the entity's annotation list.
    pub index: usize,
    /// Qualified attribute type.
    pub attribute_type: String,
    /// Attribute field names and encoded values, in field order.
    pub args: Vec<(String, String)>,
}

/// Type alias declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDecl {
    /// Provenance and annotation comments.
    pub comments: Vec<String>,
    /// Emitted name.
    pub name: String,
    /// Aliased type.
    pub target: String,
}

/// Constant declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDecl {
    /// Provenance and annotation comments.
    pub comments: Vec<String>,
    /// Constant type.
    pub type_expr: String,
    /// Emitted name.
    pub name: String,
    /// Encoded value; `None` value-initializes.
    pub value: Option<String>,
}

/// Folds declarations into scope blocks, tracking the open namespace.
///
/// A namespace whose block was closed cannot be opened again.
#[derive(Debug, Default)]
pub struct ScopeAccumulator {
    blocks: Vec<ScopeBlock>,
}

impl ScopeAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `decl` to the block for `namespace`, opening one if needed.
    ///
    /// # Errors
    /// Returns `ScopeReopened` if `namespace` had a block that was closed.
    pub fn push(&mut self, namespace: Option<String>, decl: Decl) -> Result<(), CodegenError> {
        if let Some(open) = self.blocks.last_mut()
            && open.namespace == namespace
        {
            open.decls.push(decl);
            return Ok(());
        }

        if self.blocks.iter().any(|block| block.namespace == namespace) {
            return Err(CodegenError::ScopeReopened {
                namespace: namespace.unwrap_or_default(),
                entity: decl.name().to_string(),
            });
        }

        self.blocks.push(ScopeBlock {
            namespace,
            decls: vec![decl],
        });
        Ok(())
    }

    /// Closes the final block and returns all blocks.
    #[must_use]
    pub fn finish(self) -> Vec<ScopeBlock> {
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(name: &str) -> Decl {
        Decl::Alias(AliasDecl {
            comments: Vec::new(),
            name: name.to_string(),
            target: "int".to_string(),
        })
    }

    #[test]
    fn test_accumulator_groups_contiguous() {
        let mut acc = ScopeAccumulator::new();
        acc.push(Some("st".into()), alias("A")).unwrap();
        acc.push(Some("st".into()), alias("B")).unwrap();
        acc.push(Some("st_attr".into()), alias("C")).unwrap();

        let blocks = acc.finish();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].decls.len(), 2);
        assert_eq!(blocks[1].namespace.as_deref(), Some("st_attr"));
    }

    #[test]
    fn test_accumulator_rejects_reopen() {
        let mut acc = ScopeAccumulator::new();
        acc.push(Some("a".into()), alias("A")).unwrap();
        acc.push(Some("b".into()), alias("B")).unwrap();
        let err = acc.push(Some("a".into()), alias("C")).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::ScopeReopened { ref namespace, ref entity } if namespace == "a" && entity == "C"
        ));
    }

    #[test]
    fn test_accumulator_global_scope() {
        assert!(ScopeAccumulator::new().finish().is_empty());

        let mut acc = ScopeAccumulator::new();
        acc.push(None, alias("A")).unwrap();
        acc.push(Some("st".into()), alias("B")).unwrap();
        assert!(acc.push(None, alias("C")).is_err());

        let blocks = acc.finish();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].namespace, None);
        assert_eq!(blocks[0].decls[0].name(), "A");
    }

    #[test]
    fn test_header_find() {
        let header = HeaderFile {
            module_name: "m".to_string(),
            module_annotations: Vec::new(),
            imports: Vec::new(),
            types: vec![ScopeBlock {
                namespace: None,
                decls: vec![alias("A")],
            }],
            constants: Vec::new(),
        };
        assert!(matches!(header.find("A"), Some(Decl::Alias(_))));
        assert!(header.find("B").is_none());
        assert_eq!(header.declarations().count(), 1);
    }
}
