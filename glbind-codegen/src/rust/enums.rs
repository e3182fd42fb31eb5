//! Enum group code generation.

use super::GENERATED_HEADER;
use crate::backend::{EmitContext, EnumMember};

/// Writer for the Rust enums artifact.
///
/// All groups live in one module named after the namespace. Each group is a
/// transparent `u32` newtype so members with equal values can coexist.
pub struct EnumWriter<'a> {
    ctx: &'a EmitContext<'a>,
}

impl<'a> EnumWriter<'a> {
    /// Creates a new enum writer.
    #[must_use]
    pub fn new(ctx: &'a EmitContext<'a>) -> Self {
        Self { ctx }
    }

    /// Header and opening of the namespace module.
    #[must_use]
    pub fn prologue(&self) -> String {
        let mut output = String::new();

        output.push_str(GENERATED_HEADER);
        output.push('\n');
        output.push_str(
            "#[allow(non_camel_case_types, non_snake_case, non_upper_case_globals, dead_code)]\n",
        );
        output.push_str(&format!("pub mod {} {{\n", self.ctx.namespace));

        output
    }

    /// Closing of the namespace module.
    #[must_use]
    pub fn epilogue(&self) -> String {
        "}\n".to_string()
    }

    /// Generates one group. An empty group still gets its type.
    #[must_use]
    pub fn block(name: &str, members: &[EnumMember<'_>]) -> String {
        let mut output = String::new();

        output.push_str("    #[repr(transparent)]\n");
        output.push_str("    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]\n");
        output.push_str(&format!("    pub struct {}(pub u32);\n", name));

        if members.is_empty() {
            output.push_str(&format!("    impl {} {{}}\n", name));
            return output;
        }

        output.push_str(&format!("    impl {} {{\n", name));
        for member in members {
            output.push_str(&format!(
                "        pub const {}: Self = Self({});\n",
                member.ident, member.value
            ));
        }
        output.push_str("    }\n");

        output
    }
}
