//! Header generator.
//!
//! Walks the export lists of a [`Document`], builds the declaration IR and
//! renders it into a complete header.

use crate::config::GeneratorConfig;
use crate::cxx::banner::Banner;
use crate::cxx::decl::{
    AccessorBranch, AliasDecl, AnnotationAccessor, ConstantDecl, Decl, EnumDecl, HeaderFile,
    MemberDecl, ScopeAccumulator, StructDecl, UnionDecl,
};
use crate::cxx::ident::{cxx_name, legalize, member_name};
use crate::cxx::literal::encode;
use crate::cxx::namespace::NamespaceResolver;
use crate::cxx::types::TypeResolver;
use crate::cxx::{guard, render};
use crate::error::CodegenError;
use hdrgen_schema::{
    AggregateDef, Annotation, AnnotationArgs, CUSTOM_TAG, Constant, Document, Entity, Field,
    SchemaError, TypeDescriptor, TypeKind,
};
use serde_json::Value;

/// Header generator for one document.
pub struct Generator<'a> {
    doc: &'a Document,
    config: GeneratorConfig,
    banner: Option<Banner>,
}

impl<'a> Generator<'a> {
    /// Creates a generator with the default configuration and no banner.
    #[must_use]
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            config: GeneratorConfig::default(),
            banner: None,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Prepends a provenance banner to the output.
    #[must_use]
    pub fn with_banner(mut self, banner: Banner) -> Self {
        self.banner = Some(banner);
        self
    }

    /// Generates the complete header text.
    ///
    /// # Errors
    /// Returns `CodegenError` if any reference, literal or scope fails to
    /// resolve. Nothing is produced on failure.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let header = self.build()?;

        let mut output = String::new();
        if let Some(banner) = &self.banner {
            output.push_str(&banner.render());
        }

        let body = render::render_body(&header, self.config.indent);
        output.push_str(&guard::wrap(
            &header.module_name,
            &render::render_module_section(&header),
            &header.imports,
            &body,
            &self.config.header_extension,
        ));

        tracing::info!(
            module = %header.module_name,
            types = header.types.iter().map(|b| b.decls.len()).sum::<usize>(),
            constants = header.constants.iter().map(|b| b.decls.len()).sum::<usize>(),
            "generated header"
        );
        Ok(output)
    }

    /// Builds the declaration IR without rendering it.
    ///
    /// # Errors
    /// Same as [`Generator::generate`].
    pub fn build(&self) -> Result<HeaderFile, CodegenError> {
        let namespaces = NamespaceResolver::new(&self.config);
        let resolver = TypeResolver::new(self.doc, namespaces);

        let mut types = ScopeAccumulator::new();
        for name in &self.doc.exports.types {
            let ty = self.doc.get_type(name).ok_or_else(|| SchemaError::DanglingExport {
                kind: "type",
                name: name.clone(),
            })?;
            if ty.is_ignored() {
                tracing::debug!(type_name = %name, "skipping ignored type");
                continue;
            }
            let Some(decl) = self.type_decl(ty, &resolver)? else {
                continue;
            };
            let namespace = namespaces.namespace_of(ty);
            tracing::debug!(type_name = %name, namespace = ?namespace, "emitting {}", ty.kind_name());
            types.push(namespace, decl)?;
        }

        let mut constants = ScopeAccumulator::new();
        for name in &self.doc.exports.constants {
            let constant =
                self.doc
                    .get_constant(name)
                    .ok_or_else(|| SchemaError::DanglingExport {
                        kind: "constant",
                        name: name.clone(),
                    })?;
            if constant.is_ignored() {
                tracing::debug!(constant = %name, "skipping ignored constant");
                continue;
            }
            let decl = self.constant_decl(constant, &resolver)?;
            let namespace = namespaces.namespace_of(constant);
            tracing::debug!(constant = %name, namespace = ?namespace, "emitting constant");
            constants.push(namespace, decl)?;
        }

        let module = &self.doc.module;
        let module_annotations = module
            .annotations
            .iter()
            .map(|anno| self.annotation_comment(anno))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(HeaderFile {
            module_name: module.name.clone(),
            module_annotations,
            imports: module.imports.clone(),
            types: types.finish(),
            constants: constants.finish(),
        })
    }

    /// Builds the declaration for one exported type, or `None` for kinds
    /// that are only ever referenced.
    fn type_decl(
        &self,
        ty: &TypeDescriptor,
        resolver: &TypeResolver<'_>,
    ) -> Result<Option<Decl>, CodegenError> {
        let decl = match &ty.kind {
            TypeKind::Enum(def) => {
                let base = def
                    .base
                    .as_deref()
                    .map(|base| resolver.resolve_for(base, &[], &ty.name))
                    .transpose()?;
                let items = def
                    .names
                    .iter()
                    .map(|item| {
                        def.values
                            .get(item)
                            .map(|value| (legalize(item), *value))
                            .ok_or_else(|| SchemaError::MissingEnumValue {
                                enum_name: ty.name.clone(),
                                value: item.clone(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Decl::Enum(EnumDecl {
                    comments: self.comments(ty)?,
                    name: cxx_name(ty),
                    base,
                    items,
                })
            }
            TypeKind::Struct(agg) | TypeKind::Attribute(agg) => {
                Decl::Struct(self.struct_decl(ty, agg, resolver)?)
            }
            TypeKind::Union(def) => {
                let base = self.resolve_base(ty, def.base.as_deref(), &def.generics, resolver)?;
                let fields = def.order.iter().filter_map(|name| def.members.get(name));
                Decl::Union(UnionDecl {
                    comments: self.comments(ty)?,
                    name: cxx_name(ty),
                    template_params: def.generics.iter().map(|g| legalize(g)).collect(),
                    base,
                    members: self.members(ty, fields, &def.generics, resolver)?,
                })
            }
            TypeKind::Alias(def) => {
                let Some(target) = def.target.as_deref() else {
                    tracing::debug!(type_name = %ty.name, "skipping alias placeholder");
                    return Ok(None);
                };
                resolver.check_alias_chain(&ty.name)?;
                Decl::Alias(AliasDecl {
                    comments: self.comments(ty)?,
                    name: cxx_name(ty),
                    target: resolver.resolve_alias_target(&ty.name, target)?,
                })
            }
            TypeKind::Array(_)
            | TypeKind::Pointer(_)
            | TypeKind::Specialized(_)
            | TypeKind::Builtin
            | TypeKind::Typename
            | TypeKind::Generic => {
                tracing::warn!(
                    type_name = %ty.name,
                    kind = ty.kind_name(),
                    "exported type has no declaration; skipping"
                );
                return Ok(None);
            }
        };
        Ok(Some(decl))
    }

    fn struct_decl(
        &self,
        ty: &TypeDescriptor,
        agg: &AggregateDef,
        resolver: &TypeResolver<'_>,
    ) -> Result<StructDecl, CodegenError> {
        Ok(StructDecl {
            comments: self.comments(ty)?,
            name: cxx_name(ty),
            template_params: agg.generics.iter().map(|g| legalize(g)).collect(),
            base: self.resolve_base(ty, agg.base.as_deref(), &agg.generics, resolver)?,
            accessor: self.accessor(&ty.annotations, resolver)?,
            members: self.members(ty, agg.ordered_fields(), &agg.generics, resolver)?,
        })
    }

    fn resolve_base(
        &self,
        ty: &TypeDescriptor,
        base: Option<&str>,
        generics: &[String],
        resolver: &TypeResolver<'_>,
    ) -> Result<Option<String>, CodegenError> {
        base.map(|base| resolver.resolve_for(base, generics, &ty.name))
            .transpose()
    }

    fn members<'f>(
        &self,
        owner: &TypeDescriptor,
        fields: impl Iterator<Item = &'f Field>,
        generics: &[String],
        resolver: &TypeResolver<'_>,
    ) -> Result<Vec<MemberDecl>, CodegenError> {
        let mut members = Vec::new();
        for field in fields {
            if field.is_ignored() {
                tracing::debug!(type_name = %owner.name, field = %field.name, "skipping ignored field");
                continue;
            }
            let context = format!("{}.{}", owner.name, field.name);
            members.push(MemberDecl {
                comments: self.annotation_comments(&field.annotations)?,
                type_expr: resolver.resolve_for(&field.type_name, generics, &context)?,
                name: member_name(field),
                default: field.default.as_ref().map(encode).transpose()?,
            });
        }
        Ok(members)
    }

    fn constant_decl(
        &self,
        constant: &Constant,
        resolver: &TypeResolver<'_>,
    ) -> Result<Decl, CodegenError> {
        Ok(Decl::Constant(ConstantDecl {
            comments: self.comments(constant)?,
            type_expr: resolver.resolve_for(&constant.type_name, &[], &constant.name)?,
            name: member_name(constant),
            value: constant.value.as_ref().map(encode).transpose()?,
        }))
    }

    /// Provenance comment followed by one comment per annotation.
    fn comments(&self, entity: &impl Entity) -> Result<Vec<String>, CodegenError> {
        let mut comments: Vec<String> = entity.location().map(|l| l.provenance()).into_iter().collect();
        comments.extend(self.annotation_comments(entity.annotations())?);
        Ok(comments)
    }

    fn annotation_comments(&self, annotations: &[Annotation]) -> Result<Vec<String>, CodegenError> {
        annotations
            .iter()
            .map(|anno| self.annotation_comment(anno))
            .collect()
    }

    /// Renders `annotation: Attr(field:value,...)`.
    ///
    /// Arguments are named after the attribute type's fields when the type
    /// is declared; otherwise keyed arguments keep their keys and positional
    /// ones are listed bare.
    fn annotation_comment(&self, anno: &Annotation) -> Result<String, CodegenError> {
        let args = match self.attribute(anno) {
            Some(attr) => supplied_args(anno, attr)
                .into_iter()
                .filter_map(|(field, value)| value.map(|v| (field, v)))
                .map(|(field, value)| Ok(format!("{field}:{}", encode(value)?)))
                .collect::<Result<Vec<_>, CodegenError>>()?,
            None => match &anno.args {
                AnnotationArgs::Positional(values) => {
                    values.iter().map(encode).collect::<Result<Vec<_>, _>>()?
                }
                AnnotationArgs::Keyed(map) => map
                    .iter()
                    .map(|(key, value)| Ok(format!("{key}:{}", encode(value)?)))
                    .collect::<Result<Vec<_>, CodegenError>>()?,
            },
        };
        Ok(format!("annotation: {}({})", anno.type_name, args.join(",")))
    }

    /// Builds the `get_annotation<N>()` accessor for declared attributes.
    fn accessor(
        &self,
        annotations: &[Annotation],
        resolver: &TypeResolver<'_>,
    ) -> Result<Option<AnnotationAccessor>, CodegenError> {
        let mut branches = Vec::new();
        for (index, anno) in annotations.iter().enumerate() {
            if anno.type_name == CUSTOM_TAG {
                continue;
            }
            let Some(attr) = self.attribute(anno) else {
                tracing::debug!(annotation = %anno.type_name, "annotation type not declared; no accessor branch");
                continue;
            };
            let attribute_type = resolver.resolve_for(&anno.type_name, &[], &anno.type_name)?;
            let args = supplied_args(anno, attr)
                .into_iter()
                .map(|(field, value)| {
                    let value = value.or_else(|| attr.fields.get(field)?.default.as_ref());
                    let encoded = match value {
                        Some(value) => encode(value)?,
                        None => "{}".to_string(),
                    };
                    Ok((field.to_string(), encoded))
                })
                .collect::<Result<Vec<_>, CodegenError>>()?;
            branches.push(AccessorBranch {
                index,
                attribute_type,
                args,
            });
        }
        Ok((!branches.is_empty()).then_some(AnnotationAccessor { branches }))
    }

    fn attribute(&self, anno: &Annotation) -> Option<&'a AggregateDef> {
        self.doc
            .get_type(&anno.type_name)
            .and_then(TypeDescriptor::aggregate)
    }
}

/// Pairs each emitted attribute field with the argument supplied for it.
fn supplied_args<'d>(anno: &'d Annotation, attr: &'d AggregateDef) -> Vec<(&'d str, Option<&'d Value>)> {
    attr.order
        .iter()
        .enumerate()
        .filter(|(_, name)| attr.fields.get(*name).is_some_and(|f| !f.is_ignored()))
        .map(|(index, name)| {
            let value = match &anno.args {
                AnnotationArgs::Positional(values) => values.get(index),
                AnnotationArgs::Keyed(map) => map.get(name),
            };
            (name.as_str(), value)
        })
        .collect()
}
