//! # glbind
//!
//! OpenGL binding generator driven by the Khronos XML registry.
//!
//! glbind reads a `gl.xml`-style registry, selects one API version and emits
//! two source artifacts: one enum type per enum group, and a loader type
//! holding a lazily resolved function pointer per command.
//!
//! ## Features
//!
//! - **Cumulative versions** - Each `<feature>` builds on the previous ones, honoring `<remove>`
//! - **Profile and extension selection** - Filter by API, profile and extension
//! - **Two targets** - Rust (owned loader struct) and Beef (static extension class)
//! - **Atomic output** - Artifacts are replaced only once fully written
//!
//! ## Quick Start
//!
//! ```ignore
//! use glbind::prelude::*;
//!
//! let config = GeneratorConfig::new().namespace("gl").native_class("Gl");
//! glbind::generate_bindings(
//!     "gl.xml".as_ref(),
//!     &ParseOptions::default(),
//!     &config,
//!     "src/generated".as_ref(),
//! )?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`registry`] - Registry model and XML parsing
//! - [`codegen`] - Type mapping and code generation

pub mod prelude;

/// Registry model and XML parsing.
pub mod registry {
    pub use glbind_registry::*;
}

/// Type mapping and code generation.
pub mod codegen {
    pub use glbind_codegen::*;
}

// Re-export commonly used items at the crate root
pub use glbind_codegen::{
    Bindings, CodegenError, Generator, GeneratorConfig, Target, VersionSelector, generate,
    generate_from_file, generate_from_xml,
};
pub use glbind_registry::{ParseError, ParseOptions, Registry};

use std::path::{Path, PathBuf};

/// Parses a registry file, generates bindings and writes both artifacts into
/// `out_dir`.
///
/// Returns the written paths, enums first.
///
/// # Errors
/// Returns `CodegenError` if parsing, version selection or writing fails.
pub fn generate_bindings(
    registry_path: &Path,
    options: &ParseOptions,
    config: &GeneratorConfig,
    out_dir: &Path,
) -> Result<(PathBuf, PathBuf), CodegenError> {
    tracing::info!(
        registry = %registry_path.display(),
        out_dir = %out_dir.display(),
        apis = ?options.apis,
        "generating bindings"
    );
    let bindings = generate_from_file(registry_path, options, config)?;
    let written = bindings.write_to_dir(out_dir, config)?;
    tracing::info!(
        enums = %written.0.display(),
        commands = %written.1.display(),
        "bindings written"
    );
    Ok(written)
}
