use chrono::TimeZone;
use hdrgen_codegen::cxx::banner::section;
use hdrgen_codegen::cxx::Decl;
use hdrgen_codegen::{
    Banner, CodegenError, Generator, GeneratorConfig, generate_from_file, generate_from_json,
    write_atomic,
};
use hdrgen_schema::{SchemaError, parse_document};
use tempfile::TempDir;

const GEOMETRY: &str = r#"{
    "module": { "name": "geometry", "imports": ["core"] },
    "types": {
        "Point": {
            "kind": "struct",
            "order": ["x", "y"],
            "fields": {
                "x": { "type": "i32" },
                "y": { "type": "i32" }
            }
        }
    },
    "constants": {},
    "exports": { "types": ["Point"], "constants": [] }
}"#;

#[test]
fn test_scenario_point_struct() {
    let header = generate_from_json(GEOMETRY).unwrap();

    let expected = format!(
        "#if !defined(INCLUDE_GUARD_GEOMETRY)\n\
         #define INCLUDE_GUARD_GEOMETRY 1\n\
         #include <array>\n\
         #include <cstdint>\n\
         #include <memory>\n\
         #include <string>\n\
         #include <typeindex>\n\
         #include <vector>\n\
         \n\
         {module}{imports}#include \"core.h\"\n\
         \n\
         {types}namespace st {{\n  \
         struct Point {{\n    \
         std::int32_t x;\n    \
         std::int32_t y;\n  \
         }};\n\
         \n\
         }} // namespace st\n\
         \n\
         {constants}#endif\n",
        module = section("Module - geometry"),
        imports = section("Imports"),
        types = section("Types"),
        constants = section("Constants"),
    );
    assert_eq!(header, expected);
}

#[test]
fn test_scenario_array_field() {
    let json = r#"{
        "module": { "name": "geometry" },
        "types": {
            "Point": { "kind": "struct" },
            "Point[]": { "kind": "array", "of": "Point" },
            "Path": {
                "kind": "struct",
                "order": ["points"],
                "fields": { "points": { "type": "Point[]" } }
            }
        },
        "constants": {},
        "exports": { "types": ["Point", "Path"] }
    }"#;
    let header = generate_from_json(json).unwrap();
    assert!(header.contains("    std::vector<st::Point> points;\n"));
}

#[test]
fn test_scenario_enum() {
    let json = r#"{
        "module": { "name": "paint" },
        "types": {
            "Color": {
                "kind": "enum",
                "names": ["Red", "Green"],
                "values": { "Red": 0, "Green": 1 }
            }
        },
        "constants": {},
        "exports": { "types": ["Color"] }
    }"#;
    let header = generate_from_json(json).unwrap();
    assert!(header.contains("  enum class Color {\n    Red = 0,\n    Green = 1,\n  };\n"));
}

#[test]
fn test_scenario_annotation_comment() {
    let json = r#"{
        "module": { "name": "flags" },
        "types": {
            "Marker": {
                "kind": "attribute",
                "order": ["flag"],
                "fields": { "flag": { "type": "bool" } }
            },
            "Thing": {
                "kind": "struct",
                "annotations": [{ "type": "Marker", "args": [true] }]
            }
        },
        "constants": {},
        "exports": { "types": ["Thing"] }
    }"#;
    let header = generate_from_json(json).unwrap();
    assert!(header.contains("  // annotation: Marker(flag:true)\n  struct Thing {\n"));
    assert!(header.contains("static auto const anno = st_attr::Marker{\n          true, // flag\n"));
}

#[test]
fn test_scenario_dangling_export() {
    let json = r#"{
        "module": { "name": "broken" },
        "types": {},
        "constants": {},
        "exports": { "types": ["Ghost"] }
    }"#;
    let err = generate_from_json(json).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Schema(SchemaError::DanglingExport { ref name, .. }) if name == "Ghost"
    ));
}

#[test]
fn test_missing_required_key() {
    let err = generate_from_json(r#"{ "module": { "name": "m" }, "types": {}, "constants": {} }"#)
        .unwrap_err();
    assert!(matches!(err, CodegenError::Parse(_)));
}

#[test]
fn test_deterministic_with_fixed_banner() {
    let doc = parse_document(GEOMETRY).unwrap();
    let timestamp = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let banner = Banner::new("geometry.json", "hdrgen", "builder").with_timestamp(timestamp);

    let first = Generator::new(&doc)
        .with_banner(banner.clone())
        .generate()
        .unwrap();
    let second = Generator::new(&doc).with_banner(banner).generate().unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with("// --"));
    assert!(first.contains("// time: 2024-01-02 03:04:05.000000 UTC\n"));
    let banner_end = first.find("// node: builder").unwrap();
    let guard = first.find("#if !defined").unwrap();
    assert!(banner_end < guard);
}

#[test]
fn test_namespace_blocks_are_contiguous() {
    let json = r#"{
        "module": { "name": "zoo" },
        "types": {
            "A": { "kind": "struct", "namespace": "land" },
            "B": { "kind": "struct", "namespace": "land" },
            "C": { "kind": "struct", "namespace": "sea" },
            "D": { "kind": "struct" }
        },
        "constants": {},
        "exports": { "types": ["A", "B", "C", "D"] }
    }"#;
    let header = generate_from_json(json).unwrap();
    assert_eq!(header.matches("namespace st::land {").count(), 1);
    assert_eq!(header.matches("namespace st::sea {").count(), 1);
    assert_eq!(header.matches("namespace st {").count(), 1);

    let land = header.find("namespace st::land {").unwrap();
    let sea = header.find("namespace st::sea {").unwrap();
    let default = header.find("namespace st {").unwrap();
    assert!(land < sea && sea < default);
}

#[test]
fn test_unresolved_field_type() {
    let json = r#"{
        "module": { "name": "m" },
        "types": {
            "Holder": {
                "kind": "struct",
                "order": ["item"],
                "fields": { "item": { "type": "Missing" } }
            }
        },
        "constants": {},
        "exports": { "types": ["Holder"] }
    }"#;
    let err = generate_from_json(json).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::UnresolvedReference { ref type_name, ref context }
            if type_name == "Missing" && context == "Holder.item"
    ));
}

#[test]
fn test_struct_without_member_order_fails() {
    let json = r#"{
        "module": { "name": "m" },
        "types": {
            "Point": {
                "kind": "struct",
                "fields": { "x": { "type": "i32" }, "y": { "type": "i32" } }
            }
        },
        "constants": {},
        "exports": { "types": ["Point"] }
    }"#;
    assert!(matches!(
        generate_from_json(json).unwrap_err(),
        CodegenError::Schema(SchemaError::UnorderedField { ref type_name, ref field })
            if type_name == "Point" && field == "x"
    ));
}

#[test]
fn test_generic_struct_and_specialization() {
    let json = r#"{
        "module": { "name": "containers" },
        "types": {
            "K": { "kind": "generic" },
            "V": { "kind": "generic" },
            "Pair": {
                "kind": "struct",
                "generics": ["K", "V"],
                "order": ["key", "value"],
                "fields": {
                    "key": { "type": "K" },
                    "value": { "type": "V" }
                }
            },
            "Pair<string,u8>": { "kind": "specialized", "ref": "Pair", "typeParams": ["string", "u8"] },
            "Entry": {
                "kind": "struct",
                "order": ["pair"],
                "fields": { "pair": { "type": "Pair<string,u8>" } }
            }
        },
        "constants": {},
        "exports": { "types": ["Pair", "Entry"] }
    }"#;
    let header = generate_from_json(json).unwrap();
    assert!(header.contains("  template <typename K, typename V>\n  struct Pair {\n    K key;\n    V value;\n"));
    assert!(header.contains("    st::Pair<std::string, std::uint8_t> pair;\n"));
}

#[test]
fn test_pointers_fixed_arrays_and_typeids() {
    let json = r#"{
        "module": { "name": "tree" },
        "types": {
            "Node": {
                "kind": "struct",
                "order": ["next", "weights", "kind"],
                "fields": {
                    "next": { "type": "Node*", "default": null },
                    "weights": { "type": "f32[3]" },
                    "kind": { "type": "typeid" }
                }
            },
            "Node*": { "kind": "pointer", "to": "Node" },
            "f32[3]": { "kind": "array", "of": "f32", "size": 3 },
            "typeid": { "kind": "typename" }
        },
        "constants": {},
        "exports": { "types": ["Node"] }
    }"#;
    let header = generate_from_json(json).unwrap();
    assert!(header.contains("    std::unique_ptr<st::Node> next = nullptr;\n"));
    assert!(header.contains("    std::array<float, 3> weights;\n"));
    assert!(header.contains("    std::type_index kind;\n"));
}

#[test]
fn test_union_and_alias() {
    let json = r#"{
        "module": { "name": "variant" },
        "types": {
            "Number": {
                "kind": "union",
                "order": ["i", "f"],
                "members": {
                    "i": { "type": "i64", "annotations": [{ "type": "doc", "args": { "text": "integer" } }] },
                    "f": { "type": "f64" }
                }
            },
            "doc": { "kind": "attribute", "order": ["text"], "fields": { "text": { "type": "string" } } },
            "Id": { "kind": "alias", "ref": "u32" }
        },
        "constants": {},
        "exports": { "types": ["Number", "Id"] }
    }"#;
    let header = generate_from_json(json).unwrap();
    assert!(header.contains(
        "  union Number {\n    // annotation: doc(text:\"integer\")\n    std::int64_t i;\n    double f;\n  };\n"
    ));
    assert!(header.contains("  using Id = std::uint32_t;\n"));
}

#[test]
fn test_alias_cycle_is_rejected() {
    let json = r#"{
        "module": { "name": "loop" },
        "types": {
            "A": { "kind": "alias", "ref": "B" },
            "B": { "kind": "alias", "ref": "A" }
        },
        "constants": {},
        "exports": { "types": ["A"] }
    }"#;
    assert!(matches!(
        generate_from_json(json).unwrap_err(),
        CodegenError::CyclicReference { .. }
    ));
}

#[test]
fn test_alias_through_array_of_itself_is_rejected() {
    let json = r#"{
        "module": { "name": "loop" },
        "types": {
            "A": { "kind": "alias", "ref": "A[]" },
            "A[]": { "kind": "array", "of": "A" }
        },
        "constants": {},
        "exports": { "types": ["A"] }
    }"#;
    assert!(matches!(
        generate_from_json(json).unwrap_err(),
        CodegenError::CyclicReference { ref path } if path == "A -> A[] -> A"
    ));
}

#[test]
fn test_constants_follow_types() {
    let json = r#"{
        "module": { "name": "limits" },
        "types": {
            "Level": { "kind": "enum", "names": ["Low", "High"], "values": { "Low": 0, "High": 9 } }
        },
        "constants": {
            "MAX": { "type": "u16", "value": 512 },
            "DEFAULT_LEVEL": {
                "type": "Level",
                "value": { "kind": "enum", "type": "Level", "name": "High" },
                "location": { "filename": "limits.sap", "line": 4, "column": 2 }
            },
            "NAME": { "type": "string", "value": "limits" },
            "EMPTY": { "type": "string" }
        },
        "exports": { "types": ["Level"], "constants": ["MAX", "DEFAULT_LEVEL", "NAME", "EMPTY"] }
    }"#;
    let header = generate_from_json(json).unwrap();
    assert!(header.contains("  static const std::uint16_t MAX = 512;\n"));
    assert!(header.contains(
        "  // limits.sap(4,2)\n  static const st::Level DEFAULT_LEVEL = Level::High;\n"
    ));
    assert!(header.contains("  static const std::string NAME = \"limits\";\n"));
    assert!(header.contains("  static const std::string EMPTY{};\n"));

    let types = header.find("enum class Level").unwrap();
    let constants = header.find("static const").unwrap();
    assert!(types < constants);
    assert_eq!(header.matches("namespace st {").count(), 2);
}

#[test]
fn test_imports_keep_declared_order() {
    let json = r#"{
        "module": { "name": "app", "imports": ["zeta", "alpha", "zeta"] },
        "types": {},
        "constants": {},
        "exports": {}
    }"#;
    let header = generate_from_json(json).unwrap();
    let zeta = header.find("#include \"zeta.h\"").unwrap();
    let alpha = header.find("#include \"alpha.h\"").unwrap();
    assert!(zeta < alpha);
    assert_eq!(header.matches("#include \"zeta.h\"").count(), 2);
}

#[test]
fn test_custom_scopes_and_extension() {
    let doc = parse_document(GEOMETRY).unwrap();
    let config = GeneratorConfig::new()
        .type_scope("geo")
        .header_extension("hpp")
        .indent(4);
    let header = Generator::new(&doc).with_config(config).generate().unwrap();
    assert!(header.contains("#include \"core.hpp\"\n"));
    assert!(header.contains("namespace geo {\n    struct Point {\n        std::int32_t x;\n"));
}

#[test]
fn test_build_exposes_structure() {
    let doc = parse_document(GEOMETRY).unwrap();
    let header = Generator::new(&doc).build().unwrap();
    assert_eq!(header.module_name, "geometry");
    assert_eq!(header.imports, vec!["core".to_string()]);
    let Some(Decl::Struct(point)) = header.find("Point") else {
        panic!("Point missing");
    };
    let members: Vec<&str> = point.members.iter().map(|m| m.type_expr.as_str()).collect();
    assert_eq!(members, vec!["std::int32_t", "std::int32_t"]);
}

#[test]
fn test_generate_from_file_and_write() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("geometry.json");
    std::fs::write(&input, GEOMETRY).unwrap();

    let header = generate_from_file(&input).unwrap();
    let output = dir.path().join("out/geometry.h");
    write_atomic(&output, &header).unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), header);
}

#[test]
fn test_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("broken.h");
    let result = generate_from_json(r#"{ "module": { "name": "m" }, "types": {}, "constants": {}, "exports": { "types": ["X"] } }"#)
        .and_then(|header| write_atomic(&output, &header));
    assert!(result.is_err());
    assert!(!output.exists());
}
