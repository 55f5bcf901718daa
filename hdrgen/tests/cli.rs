use clap::Parser;
use hdrgen::cli::{Cli, render, run};
use std::fs;
use tempfile::TempDir;

const SCHEMA: &str = r#"{
    "$schema": "https://example.invalid/hdrgen.json",
    "module": {
        "name": "inventory",
        "imports": ["common"],
        "annotations": [{ "type": "version", "args": [3] }]
    },
    "types": {
        "version": {
            "kind": "attribute",
            "order": ["major"],
            "fields": { "major": { "type": "int" } }
        },
        "Item": {
            "kind": "struct",
            "namespace": "store",
            "order": ["sku", "count"],
            "fields": {
                "sku": { "type": "string" },
                "count": { "type": "u32", "default": 0 }
            },
            "location": { "filename": "inventory.sap", "line": 10 }
        }
    },
    "constants": {
        "LIMIT": { "type": "u32", "value": 100, "namespace": "store" }
    },
    "exports": { "types": ["Item"], "constants": ["LIMIT"] }
}"#;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["hdrgen"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_run_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("inventory.json");
    let output = dir.path().join("include/inventory.h");
    fs::write(&input, SCHEMA).unwrap();

    let cli = cli(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    run(&cli).unwrap();

    let header = fs::read_to_string(&output).unwrap();
    assert!(header.contains("//  Generated file ** DO NOT EDIT **\n"));
    assert!(header.contains("// from: inventory.json\n"));
    assert!(header.contains(concat!("// with: hdrgen ", env!("CARGO_PKG_VERSION"), "\n")));
    assert!(header.contains("//  Module - inventory\n"));
    assert!(header.contains("// annotation: version(major:3)\n"));
    assert!(header.contains("#if !defined(INCLUDE_GUARD_INVENTORY)\n"));
    assert!(header.contains("#include \"common.h\"\n"));
    assert!(header.contains(
        "namespace st::store {\n  // inventory.sap(10)\n  struct Item {\n    std::string sku;\n    std::uint32_t count = 0;\n  };\n"
    ));
    assert!(header.contains("  static const std::uint32_t LIMIT = 100;\n"));
    assert!(header.ends_with("#endif\n"));

    let guard = header.find("#if !defined(INCLUDE_GUARD_INVENTORY)").unwrap();
    let module = header.find("//  Module - inventory\n").unwrap();
    let imports = header.find("//  Imports\n").unwrap();
    assert!(guard < module && module < imports);
}

#[test]
fn test_render_respects_scope_flags() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("inventory.json");
    fs::write(&input, SCHEMA).unwrap();

    let cli = cli(&[
        "-i",
        input.to_str().unwrap(),
        "--root-scope",
        "inv",
        "--header-extension",
        "hpp",
    ]);
    let header = render(&cli).unwrap();
    assert!(header.contains("namespace inv::store {\n"));
    assert!(header.contains("#include \"common.hpp\"\n"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.json");
    let output = dir.path().join("absent.h");

    let cli = cli(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    let err = run(&cli).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read"));
    assert!(!output.exists());
}

#[test]
fn test_invalid_schema_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    let output = dir.path().join("broken.h");
    fs::write(
        &input,
        r#"{ "module": { "name": "broken" }, "types": {}, "constants": {}, "exports": { "types": ["Ghost"] } }"#,
    )
    .unwrap();

    let cli = cli(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    let err = run(&cli).unwrap_err();
    assert!(format!("{err:#}").contains("Ghost"));
    assert!(!output.exists());
}
