//! Include guard and import composition.

use crate::cxx::banner::section;
use crate::cxx::ident::legalize;

/// Standard headers the emitted declarations may depend on.
pub const STANDARD_INCLUDES: &[&str] = &["array", "cstdint", "memory", "string", "typeindex", "vector"];

/// Returns the include guard token for a module.
#[must_use]
pub fn guard_token(module_name: &str) -> String {
    format!("INCLUDE_GUARD_{}", legalize(module_name).to_uppercase())
}

/// Wraps a rendered body in an include guard with the standard includes,
/// the module section and one include directive per import.
///
/// Imports are emitted in the given order, without deduplication.
#[must_use]
pub fn wrap(
    module_name: &str,
    module_section: &str,
    imports: &[String],
    body: &str,
    header_extension: &str,
) -> String {
    let token = guard_token(module_name);
    let mut out = String::with_capacity(body.len() + 512);

    out.push_str(&format!("#if !defined({token})\n"));
    out.push_str(&format!("#define {token} 1\n"));
    for header in STANDARD_INCLUDES {
        out.push_str(&format!("#include <{header}>\n"));
    }
    out.push('\n');

    out.push_str(module_section);
    out.push_str(&section("Imports"));
    for import in imports {
        out.push_str(&format!("#include \"{import}.{header_extension}\"\n"));
    }
    out.push('\n');

    out.push_str(body);
    out.push_str("#endif\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_token() {
        assert_eq!(guard_token("geometry"), "INCLUDE_GUARD_GEOMETRY");
        assert_eq!(guard_token("my.module-v2"), "INCLUDE_GUARD_MY_MODULE_V2");
        assert_eq!(guard_token("test"), "INCLUDE_GUARD_TEST_");
    }

    #[test]
    fn test_wrap_structure() {
        let imports = vec!["core".to_string(), "math".to_string(), "core".to_string()];
        let text = wrap("geometry", "", &imports, "// body\n", "h");

        assert!(text.starts_with("#if !defined(INCLUDE_GUARD_GEOMETRY)\n#define INCLUDE_GUARD_GEOMETRY 1\n"));
        assert!(text.contains("#include <memory>\n"));
        assert!(text.contains("#include <typeindex>\n"));
        assert!(text.ends_with("// body\n#endif\n"));

        let core = text.find("#include \"core.h\"").unwrap();
        let math = text.find("#include \"math.h\"").unwrap();
        assert!(core < math);
        assert_eq!(text.matches("#include \"core.h\"").count(), 2);
    }

    #[test]
    fn test_wrap_extension() {
        let text = wrap("m", "", &["dep".to_string()], "", "hpp");
        assert!(text.contains("#include \"dep.hpp\"\n"));
    }

    #[test]
    fn test_wrap_places_module_section_inside_guard() {
        let module = section("Module - m");
        let text = wrap("m", &module, &[], "", "h");

        let guard = text.find("#define INCLUDE_GUARD_M 1").unwrap();
        let includes = text.find("#include <vector>\n\n").unwrap();
        let module_at = text.find(&module).unwrap();
        let imports = text.find(&section("Imports")).unwrap();
        assert!(guard < includes);
        assert!(includes < module_at);
        assert!(module_at < imports);
    }
}
