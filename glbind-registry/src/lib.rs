//! # glbind Registry
//!
//! Khronos XML registry model and parser.
//!
//! This crate provides:
//! - The read-only registry model consumed by the binding generator
//!   (versions, enum groups, enumerants, commands and their typed parameters)
//! - A `gl.xml` parser with api, profile and extension filtering
//! - Cumulative version snapshots built from `<feature>` require/remove blocks

pub mod error;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use parser::{ParseOptions, parse_file, parse_registry, parse_registry_with};
pub use types::{Command, Enumerant, Group, Parameter, Registry, TypeRef, Version};
