//! # glbind Codegen
//!
//! Binding generation from parsed Khronos registries.
//!
//! This crate provides:
//! - Type mapping from registry C spellings to target types
//! - Enum and command loader generation for Rust and Beef
//! - Atomic writing of the generated artifacts
//! - Build script integration

pub mod backend;
pub mod beef;
pub mod config;
pub mod error;
pub mod generator;
pub mod literal;
pub mod mapper;
pub mod naming;
pub mod output;
pub mod rust;

pub use backend::Backend;
pub use config::{GeneratorConfig, Target, VersionSelector};
pub use error::CodegenError;
pub use generator::{Bindings, Generator};
pub use mapper::{MappedType, TypeMapper};

use glbind_registry::{ParseOptions, Registry};

/// Generates bindings for the configured version of a parsed registry.
///
/// # Errors
/// Returns `CodegenError::InvalidConfig` if the configuration is rejected, or
/// `CodegenError::VersionNotFound` if the selector matches no version.
pub fn generate(registry: &Registry, config: &GeneratorConfig) -> Result<Bindings, CodegenError> {
    config.validate()?;
    let version = config.version_selector().select(registry).ok_or_else(|| {
        CodegenError::version_not_found(match config.version_selector() {
            VersionSelector::Latest => "latest".to_string(),
            VersionSelector::Exact(key) => key.clone(),
        })
    })?;
    Ok(Generator::new(version, config).generate())
}

/// Generates bindings from a registry XML string.
///
/// # Arguments
/// * `xml` - Registry XML content
/// * `options` - API, profile and extension selection
/// * `config` - Generation settings
///
/// # Errors
/// Returns `CodegenError` if parsing fails or no version matches.
pub fn generate_from_xml(
    xml: &str,
    options: &ParseOptions,
    config: &GeneratorConfig,
) -> Result<Bindings, CodegenError> {
    let registry = glbind_registry::parse_registry_with(xml, options)?;
    generate(&registry, config)
}

/// Generates bindings from a registry XML file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or version selection fails.
pub fn generate_from_file(
    path: &std::path::Path,
    options: &ParseOptions,
    config: &GeneratorConfig,
) -> Result<Bindings, CodegenError> {
    let registry = glbind_registry::parse_file(path, options)?;
    generate(&registry, config)
}
