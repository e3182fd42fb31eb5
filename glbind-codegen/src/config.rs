//! Generator configuration.

use crate::backend::Backend;
use crate::beef::BeefBackend;
use crate::error::CodegenError;
use crate::naming::{ReservedWords, strip_api_prefix, to_snake_case};
use crate::rust::RustBackend;
use glbind_registry::{Registry, Version};

/// Output language of the generated bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// Rust: newtype enums and an owned loader struct.
    #[default]
    Rust,
    /// Beef: `[AllowDuplicates]` enums and a static extension class.
    Beef,
}

impl Target {
    /// Returns the backend rendering this target.
    #[must_use]
    pub fn backend(self) -> &'static dyn Backend {
        match self {
            Self::Rust => &RustBackend,
            Self::Beef => &BeefBackend,
        }
    }

    /// Parses a target from its name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rust" | "rs" => Some(Self::Rust),
            "beef" | "bf" => Some(Self::Beef),
            _ => None,
        }
    }
}

/// Narrow loader names already taken by the generated loader helpers.
const LOADER_HELPERS: &[&str] = &["function", "all_functions"];

/// Which registry version to generate bindings for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionSelector {
    /// The last version in the registry.
    #[default]
    Latest,
    /// A version matched by number (`4.6`) or feature name (`GL_VERSION_4_6`).
    Exact(String),
}

impl VersionSelector {
    /// Selects a version from the registry.
    #[must_use]
    pub fn select<'r>(&self, registry: &'r Registry) -> Option<&'r Version> {
        match self {
            Self::Latest => registry.latest(),
            Self::Exact(key) => registry.version(key),
        }
    }
}

/// Configuration consumed by the generator.
///
/// The namespace and native class identifiers are used verbatim; the
/// generator does not validate their shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    namespace: String,
    native_class: String,
    target: Target,
    version: VersionSelector,
    probe_command: String,
    reserved_words: Option<Vec<String>>,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespace: "gl".to_string(),
            native_class: "Gl".to_string(),
            target: Target::Rust,
            version: VersionSelector::Latest,
            probe_command: "glGetString".to_string(),
            reserved_words: None,
        }
    }

    /// Sets the namespace identifier enclosing the generated enums.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the identifier of the type holding the entry points.
    #[must_use]
    pub fn native_class(mut self, native_class: impl Into<String>) -> Self {
        self.native_class = native_class.into();
        self
    }

    /// Sets the output language.
    #[must_use]
    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Sets the version selector.
    #[must_use]
    pub fn version(mut self, version: VersionSelector) -> Self {
        self.version = version;
        self
    }

    /// Sets the command bound by the narrow loader.
    #[must_use]
    pub fn probe_command(mut self, name: impl Into<String>) -> Self {
        self.probe_command = name.into();
        self
    }

    /// Replaces the backend's default reserved-word list.
    #[must_use]
    pub fn reserved_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the namespace identifier.
    #[must_use]
    pub fn namespace_ident(&self) -> &str {
        &self.namespace
    }

    /// Returns the native class identifier.
    #[must_use]
    pub fn native_class_ident(&self) -> &str {
        &self.native_class
    }

    /// Returns the output language.
    #[must_use]
    pub fn target_language(&self) -> Target {
        self.target
    }

    /// Returns the version selector.
    #[must_use]
    pub fn version_selector(&self) -> &VersionSelector {
        &self.version
    }

    /// Returns the command bound by the narrow loader.
    #[must_use]
    pub fn probe(&self) -> &str {
        &self.probe_command
    }

    /// Returns the backend for the configured target.
    #[must_use]
    pub fn backend(&self) -> &'static dyn Backend {
        self.target.backend()
    }

    /// Builds the reserved-word set: the configured list, or the backend default.
    #[must_use]
    pub fn reserved(&self) -> ReservedWords {
        let backend = self.backend();
        match &self.reserved_words {
            Some(words) => ReservedWords::new(words.iter().cloned(), backend.escape_prefix()),
            None => ReservedWords::new(
                backend.reserved_words().iter().copied(),
                backend.escape_prefix(),
            ),
        }
    }

    /// Checks the settings before generation.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidConfig` if the narrow loader's name would
    /// collide with a generated loader helper.
    pub fn validate(&self) -> Result<(), CodegenError> {
        let loader = to_snake_case(strip_api_prefix(&self.probe_command));
        if LOADER_HELPERS.contains(&loader.as_str()) {
            return Err(CodegenError::invalid_config(format!(
                "probe command '{}' collides with the load_{} helper",
                self.probe_command, loader
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
