//! # hdrgen
//!
//! Generate C++ headers from JSON schema documents.
//!
//! A schema document describes one module: its imports, types, constants
//! and annotations. `hdrgen` resolves every exported entity into a C++
//! declaration inside its computed namespace and wraps the result in an
//! include guard.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hdrgen::prelude::*;
//!
//! let doc = parse_document(&json)?;
//! validate_document(&doc)?;
//! let header = Generator::new(&doc).generate()?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Document model, parsing and validation
//! - [`codegen`] - Resolution, declaration IR and rendering
//! - [`cli`] - The `hdrgen` command-line front end

pub mod cli;
pub mod prelude;

/// Schema document model, parsing and validation.
pub mod schema {
    pub use hdrgen_schema::*;
}

/// C++ header generation.
pub mod codegen {
    pub use hdrgen_codegen::*;
}
