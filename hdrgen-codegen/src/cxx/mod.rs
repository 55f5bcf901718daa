//! C++ header generation building blocks.

pub mod banner;
pub mod decl;
pub mod guard;
pub mod ident;
pub mod literal;
pub mod namespace;
pub mod render;
pub mod types;

pub use banner::Banner;
pub use decl::{Decl, HeaderFile, ScopeAccumulator, ScopeBlock};
pub use ident::legalize;
pub use literal::{Literal, encode};
pub use namespace::NamespaceResolver;
pub use types::TypeResolver;
