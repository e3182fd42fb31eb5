//! Registry model.
//!
//! This module contains the read-only data structures produced by the parser:
//! API versions, enum groups with their enumerants, and commands with typed
//! parameters. The binding generator never mutates them.

use std::collections::BTreeMap;

/// Registry token denoting the generic enumeration type.
pub const ENUM_TYPE: &str = "GLenum";

/// Parsed registry: every selected API version in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    /// Versions, oldest first.
    pub versions: Vec<Version>,
}

impl Registry {
    /// Creates a registry from a list of versions.
    #[must_use]
    pub fn new(versions: Vec<Version>) -> Self {
        Self { versions }
    }

    /// Returns the last (newest) version.
    #[must_use]
    pub fn latest(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// Looks up a version by its number (`"4.6"`) or feature name
    /// (`"GL_VERSION_4_6"`).
    #[must_use]
    pub fn version(&self, key: &str) -> Option<&Version> {
        self.versions
            .iter()
            .find(|v| v.number == key || v.name == key)
    }

    /// Returns true if the registry holds no version.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// One API version: the groups and commands it makes available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Version {
    /// API identifier (`gl`, `gles2`, ...).
    pub api: String,
    /// Feature name, e.g. `GL_VERSION_4_6`.
    pub name: String,
    /// Version number, e.g. `4.6`.
    pub number: String,
    /// Enum groups keyed by name.
    pub groups: BTreeMap<String, Group>,
    /// Commands in registry declaration order.
    pub commands: Vec<Command>,
}

impl Version {
    /// Creates an empty version.
    #[must_use]
    pub fn new(api: impl Into<String>, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            name: name.into(),
            number: number.into(),
            groups: BTreeMap::new(),
            commands: Vec::new(),
        }
    }

    /// Adds a group, replacing any group with the same name.
    pub fn add_group(&mut self, group: Group) {
        self.groups.insert(group.name.clone(), group);
    }

    /// Appends a command.
    pub fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Returns true if a group with the given name exists in this version.
    #[must_use]
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Looks up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Looks up a command by name.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }
}

/// Named set of enumerants, emitted as one enum type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// Group name, used verbatim as the emitted type identifier.
    pub name: String,
    /// Enumerants in registry order.
    pub enums: Vec<Enumerant>,
}

impl Group {
    /// Creates an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enums: Vec::new(),
        }
    }

    /// Appends an enumerant.
    pub fn add_enum(&mut self, enumerant: Enumerant) {
        self.enums.push(enumerant);
    }

    /// Builder-style variant of [`Group::add_enum`].
    #[must_use]
    pub fn with_enum(mut self, enumerant: Enumerant) -> Self {
        self.enums.push(enumerant);
        self
    }
}

/// Single enumeration constant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumerant {
    /// Full registry name, e.g. `GL_TEXTURE_2D`.
    pub name: String,
    /// Name without the API prefix, e.g. `TEXTURE_2D`.
    pub short_name: String,
    /// Literal value as written in the registry.
    pub value: String,
}

impl Enumerant {
    /// Creates an enumerant.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
            value: value.into(),
        }
    }
}

/// Type reference shared by return types and parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Source type token, e.g. `const GLubyte *`.
    pub ty: String,
    /// Enum group annotation, if any.
    pub group: Option<String>,
}

impl TypeRef {
    /// Creates a plain type reference.
    #[must_use]
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            group: None,
        }
    }

    /// Creates a type reference annotated with an enum group.
    #[must_use]
    pub fn with_group(ty: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            group: Some(group.into()),
        }
    }

    /// Returns true if this is the generic enumeration type.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.ty == ENUM_TYPE
    }
}

/// Named, typed command parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name as written in the registry.
    pub name: String,
    /// Parameter type.
    pub type_ref: TypeRef,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

/// API entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Command name, e.g. `glClear`.
    pub name: String,
    /// Return type.
    pub return_type: TypeRef,
    /// Parameters in signature order.
    pub parameters: Vec<Parameter>,
}

impl Command {
    /// Creates a command with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    /// Builder-style variant of [`Command::add_parameter`].
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_version(number: &str) -> Version {
        let name = format!("GL_VERSION_{}", number.replace('.', "_"));
        let mut version = Version::new("gl", name, number);
        version.add_group(
            Group::new("Boolean")
                .with_enum(Enumerant::new("GL_TRUE", "TRUE", "1"))
                .with_enum(Enumerant::new("GL_FALSE", "FALSE", "0")),
        );
        version.add_command(
            Command::new("glClear", TypeRef::new("void"))
                .with_parameter(Parameter::new("mask", TypeRef::new("GLbitfield"))),
        );
        version
    }

    #[test]
    fn test_registry_latest() {
        let registry = Registry::new(vec![sample_version("1.0"), sample_version("1.1")]);
        assert_eq!(registry.latest().unwrap().number, "1.1");
        assert!(Registry::default().latest().is_none());
    }

    #[test]
    fn test_registry_version_lookup() {
        let registry = Registry::new(vec![sample_version("1.0"), sample_version("1.1")]);
        assert_eq!(registry.version("1.0").unwrap().number, "1.0");
        assert_eq!(registry.version("GL_VERSION_1_1").unwrap().number, "1.1");
        assert!(registry.version("9.9").is_none());
    }

    #[test]
    fn test_version_group_lookup() {
        let version = sample_version("1.0");
        assert!(version.has_group("Boolean"));
        assert!(!version.has_group("TextureTarget"));
        assert_eq!(version.group("Boolean").unwrap().enums.len(), 2);
    }

    #[test]
    fn test_version_command_lookup() {
        let version = sample_version("1.0");
        let clear = version.command("glClear").unwrap();
        assert_eq!(clear.parameters[0].name, "mask");
        assert!(version.command("glFlush").is_none());
    }

    #[test]
    fn test_type_ref_is_enum() {
        assert!(TypeRef::with_group("GLenum", "TextureTarget").is_enum());
        assert!(TypeRef::new("GLenum").is_enum());
        assert!(!TypeRef::with_group("GLbitfield", "ClearBufferMask").is_enum());
    }

    #[test]
    fn test_add_group_replaces_same_name() {
        let mut version = Version::new("gl", "GL_VERSION_1_0", "1.0");
        version.add_group(Group::new("Boolean"));
        version.add_group(Group::new("Boolean").with_enum(Enumerant::new("GL_TRUE", "TRUE", "1")));
        assert_eq!(version.groups.len(), 1);
        assert_eq!(version.groups["Boolean"].enums.len(), 1);
    }
}
