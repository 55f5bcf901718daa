//! Pretty-printer for the declaration IR.
//!
//! Rendering is a pure function of a [`HeaderFile`]; all resolution has
//! already happened.

use crate::cxx::banner::section;
use crate::cxx::decl::{
    AliasDecl, AnnotationAccessor, ConstantDecl, Decl, EnumDecl, HeaderFile, MemberDecl,
    ScopeBlock, StructDecl, UnionDecl,
};

/// Line writer with fixed-width indentation.
struct Writer {
    out: String,
    width: usize,
}

impl Writer {
    fn new(width: usize) -> Self {
        Self {
            out: String::new(),
            width,
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.out.push_str(&" ".repeat(depth * self.width));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn comments(&mut self, depth: usize, comments: &[String]) {
        for comment in comments {
            self.line(depth, &format!("// {comment}"));
        }
    }
}

/// Renders the type and constant sections of a header.
#[must_use]
pub fn render_body(header: &HeaderFile, indent: usize) -> String {
    let mut w = Writer::new(indent);

    w.out.push_str(&section("Types"));
    for block in &header.types {
        render_block(&mut w, block);
    }

    w.out.push_str(&section("Constants"));
    for block in &header.constants {
        render_block(&mut w, block);
    }

    w.out
}

/// Renders the module section: name banner plus annotation comments.
#[must_use]
pub fn render_module_section(header: &HeaderFile) -> String {
    let mut out = section(&format!("Module - {}", header.module_name));
    for annotation in &header.module_annotations {
        out.push_str(&format!("// {annotation}\n"));
    }
    if !header.module_annotations.is_empty() {
        out.push('\n');
    }
    out
}

fn render_block(w: &mut Writer, block: &ScopeBlock) {
    let depth = match &block.namespace {
        Some(ns) => {
            w.line(0, &format!("namespace {ns} {{"));
            1
        }
        None => 0,
    };

    for decl in &block.decls {
        render_decl(w, depth, decl);
    }

    if let Some(ns) = &block.namespace {
        w.line(0, &format!("}} // namespace {ns}"));
        w.blank();
    }
}

fn render_decl(w: &mut Writer, depth: usize, decl: &Decl) {
    w.comments(depth, decl.comments());
    match decl {
        Decl::Enum(d) => render_enum(w, depth, d),
        Decl::Struct(d) => render_struct(w, depth, d),
        Decl::Union(d) => render_union(w, depth, d),
        Decl::Alias(d) => render_alias(w, depth, d),
        Decl::Constant(d) => render_constant(w, depth, d),
    }
    w.blank();
}

fn base_clause(base: Option<&str>) -> String {
    base.map(|b| format!(" : {b}")).unwrap_or_default()
}

fn render_template_header(w: &mut Writer, depth: usize, params: &[String]) {
    if !params.is_empty() {
        w.line(depth, &format!("template <typename {}>", params.join(", typename ")));
    }
}

fn render_enum(w: &mut Writer, depth: usize, d: &EnumDecl) {
    w.line(
        depth,
        &format!("enum class {}{} {{", d.name, base_clause(d.base.as_deref())),
    );
    for (name, value) in &d.items {
        w.line(depth + 1, &format!("{name} = {value},"));
    }
    w.line(depth, "};");
}

fn render_struct(w: &mut Writer, depth: usize, d: &StructDecl) {
    render_template_header(w, depth, &d.template_params);
    w.line(
        depth,
        &format!("struct {}{} {{", d.name, base_clause(d.base.as_deref())),
    );
    if let Some(accessor) = &d.accessor {
        render_accessor(w, depth + 1, accessor);
    }
    for member in &d.members {
        render_member(w, depth + 1, member);
    }
    w.line(depth, "};");
}

fn render_union(w: &mut Writer, depth: usize, d: &UnionDecl) {
    render_template_header(w, depth, &d.template_params);
    w.line(
        depth,
        &format!("union {}{} {{", d.name, base_clause(d.base.as_deref())),
    );
    for member in &d.members {
        render_member(w, depth + 1, member);
    }
    w.line(depth, "};");
}

fn render_member(w: &mut Writer, depth: usize, m: &MemberDecl) {
    w.comments(depth, &m.comments);
    match &m.default {
        Some(value) => w.line(depth, &format!("{} {} = {};", m.type_expr, m.name, value)),
        None => w.line(depth, &format!("{} {};", m.type_expr, m.name)),
    }
}

fn render_accessor(w: &mut Writer, depth: usize, accessor: &AnnotationAccessor) {
    w.line(depth, "template <int N>");
    w.line(depth, "static decltype(auto) get_annotation() {");
    for branch in &accessor.branches {
        w.line(depth + 1, &format!("if constexpr (N == {}) {{", branch.index));
        w.line(
            depth + 2,
            &format!("static auto const anno = {}{{", branch.attribute_type),
        );
        for (field, value) in &branch.args {
            w.line(depth + 3, &format!("{value}, // {field}"));
        }
        w.line(depth + 2, "};");
        w.line(depth + 2, "return anno;");
        w.line(depth + 1, "}");
    }
    w.line(depth, "}");
}

fn render_alias(w: &mut Writer, depth: usize, d: &AliasDecl) {
    w.line(depth, &format!("using {} = {};", d.name, d.target));
}

fn render_constant(w: &mut Writer, depth: usize, d: &ConstantDecl) {
    match &d.value {
        Some(value) => w.line(
            depth,
            &format!("static const {} {} = {};", d.type_expr, d.name, value),
        ),
        None => w.line(depth, &format!("static const {} {}{{}};", d.type_expr, d.name)),
    }
}
