//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use glbind::prelude::*;
//! ```

// Registry types
pub use glbind_registry::{
    Command, Enumerant, Group, Parameter, ParseError, ParseOptions, Registry, TypeRef, Version,
};

// Generation types
pub use glbind_codegen::{
    Backend, Bindings, CodegenError, Generator, GeneratorConfig, Target, VersionSelector,
};
