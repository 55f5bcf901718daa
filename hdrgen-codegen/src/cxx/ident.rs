//! Identifier legalization.
//!
//! Maps arbitrary schema names to identifiers the C++ compiler accepts.

use crate::cxx::types::builtin_spelling;
use hdrgen_schema::Entity;

/// C++ keywords and builtin type names that cannot be used as identifiers.
const CXX_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char",
    "char8_t", "char16_t", "char32_t", "class", "concept", "const", "consteval", "constexpr",
    "constinit", "const_cast", "continue", "decltype", "default", "delete", "do", "double",
    "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float", "for",
    "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept",
    "not", "nullptr", "operator", "or", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "throw", "true",
    "try", "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual", "void",
    "volatile", "wchar_t", "while", "xor",
];

/// Names reserved by the generator and its test harness.
const RESERVED_NAMES: &[&str] = &["test", "hdrgen"];

/// Returns true if `ident` is a C++ keyword or a generator-reserved name.
#[must_use]
pub fn is_reserved(ident: &str) -> bool {
    CXX_KEYWORDS.contains(&ident) || RESERVED_NAMES.contains(&ident)
}

/// Maps a schema name to a legal C++ identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`. An empty result or one
/// starting with a digit gets a trailing `_` unless it already ends with one,
/// and a reserved word gets a trailing `_`. The mapping is idempotent.
#[must_use]
pub fn legalize(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    let leading_digit = ident.starts_with(|c: char| c.is_ascii_digit());
    if ident.is_empty() || (leading_digit && !ident.ends_with('_')) {
        ident.push('_');
    }
    if is_reserved(&ident) {
        ident.push('_');
    }
    ident
}

/// Returns the emitted spelling of an entity's own name.
///
/// A `cxxname` annotation is used verbatim; names in the builtin table use
/// their fixed spelling; everything else is legalized.
#[must_use]
pub fn cxx_name(entity: &impl Entity) -> String {
    if let Some(name) = entity.name_override() {
        return name.to_string();
    }
    match builtin_spelling(entity.name()) {
        Some(spelling) => spelling.to_string(),
        None => legalize(entity.name()),
    }
}

/// Returns the emitted spelling of a field or member name.
///
/// Member names never take builtin spellings; a field named `int` is `int_`.
#[must_use]
pub fn member_name(entity: &impl Entity) -> String {
    entity
        .name_override()
        .map_or_else(|| legalize(entity.name()), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdrgen_schema::Field;

    #[test]
    fn test_legalize_plain() {
        assert_eq!(legalize("Point"), "Point");
        assert_eq!(legalize("snake_case_1"), "snake_case_1");
    }

    #[test]
    fn test_legalize_forbidden_chars() {
        assert_eq!(legalize("a.b-c d"), "a_b_c_d");
        assert_eq!(legalize("$tag"), "_tag");
        assert_eq!(legalize("naïve"), "na_ve");
    }

    #[test]
    fn test_legalize_empty_and_digits() {
        assert_eq!(legalize(""), "_");
        assert_eq!(legalize("1st"), "1st_");
        assert_eq!(legalize("42"), "42_");
    }

    #[test]
    fn test_legalize_reserved() {
        assert_eq!(legalize("int"), "int_");
        assert_eq!(legalize("namespace"), "namespace_");
        assert_eq!(legalize("default"), "default_");
        assert_eq!(legalize("test"), "test_");
        assert_eq!(legalize("hdrgen"), "hdrgen_");
    }

    #[test]
    fn test_legalize_idempotent() {
        let samples = [
            "", "0", "1st", "int", "int_", "a.b", "__", "x y z", "9lives_", "test", "void",
            "Ünïcode", "-", "class", "a1",
        ];
        for name in samples {
            let once = legalize(name);
            assert_eq!(legalize(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn test_member_name_ignores_builtin_spelling() {
        let field: Field = serde_json::from_value(serde_json::json!({
            "name": "string",
            "type": "string"
        }))
        .unwrap();
        assert_eq!(member_name(&field), "string");
        assert_eq!(cxx_name(&field), "std::string");
    }

    #[test]
    fn test_cxx_name_override() {
        let field: Field = serde_json::from_value(serde_json::json!({
            "name": "x",
            "type": "int",
            "annotations": [{ "type": "cxxname", "args": ["posX"] }]
        }))
        .unwrap();
        assert_eq!(member_name(&field), "posX");
    }
}
