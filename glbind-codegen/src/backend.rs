//! Output language abstraction.
//!
//! The [`Generator`](crate::Generator) walks the registry, filters enumerants,
//! maps types and escapes names. A [`Backend`] only decides how the resolved
//! pieces are spelled in one target language.

use crate::mapper::MappedType;

/// Identifiers shared by both artifacts.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Namespace identifier enclosing the enums.
    pub namespace: &'a str,
    /// Identifier of the type holding the entry points.
    pub native_class: &'a str,
}

/// Enum member ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember<'a> {
    /// Member identifier.
    pub ident: String,
    /// Literal value, verbatim from the registry.
    pub value: &'a str,
}

/// Parameter with its escaped name and mapped type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParam<'a> {
    /// Parameter name, escaped if it collided with a reserved word.
    pub name: String,
    /// Mapped parameter type.
    pub ty: MappedType<'a>,
}

/// Command with every type resolved for the selected version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand<'a> {
    /// Command name, used for the entry point and its slot.
    pub name: &'a str,
    /// Mapped return type.
    pub return_type: MappedType<'a>,
    /// Parameters in signature order.
    pub params: Vec<ResolvedParam<'a>>,
}

/// Narrow loader description.
#[derive(Debug, Clone, Copy)]
pub struct ProbeLoader<'a> {
    /// Command bound by the narrow loader.
    pub name: &'a str,
    /// Whether the command exists in the selected version.
    pub present: bool,
}

/// Renders resolved registry content in one target language.
pub trait Backend: Sync {
    /// Human-readable language name.
    fn name(&self) -> &'static str;

    /// File name of the enums artifact.
    fn enums_file_name(&self) -> String;

    /// File name of the commands artifact.
    fn commands_file_name(&self, native_class: &str) -> String;

    /// Default reserved words that parameter names must not use.
    fn reserved_words(&self) -> &'static [&'static str];

    /// Prefix applied to a parameter name colliding with a reserved word.
    fn escape_prefix(&self) -> &'static str;

    /// Spells a mapped type.
    fn type_name(&self, ty: &MappedType<'_>) -> String;

    /// Text preceding the first enum block.
    fn enums_prologue(&self, ctx: &EmitContext<'_>) -> String;

    /// One enum block, ending with a newline.
    fn enum_block(&self, name: &str, members: &[EnumMember<'_>]) -> String;

    /// Text following the last enum block.
    fn enums_epilogue(&self, ctx: &EmitContext<'_>) -> String;

    /// The whole commands artifact: per-command alias, slot and trampoline,
    /// followed by the loaders.
    fn commands(
        &self,
        ctx: &EmitContext<'_>,
        commands: &[ResolvedCommand<'_>],
        probe: ProbeLoader<'_>,
    ) -> String;
}
