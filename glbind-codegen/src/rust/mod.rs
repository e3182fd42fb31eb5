//! Rust code generation.

pub mod commands;
pub mod enums;

use crate::backend::{Backend, EmitContext, EnumMember, ProbeLoader, ResolvedCommand};
use crate::mapper::{MappedType, Mutability, Scalar};
use crate::naming::to_snake_case;

pub use commands::CommandWriter;
pub use enums::EnumWriter;

/// Header placed at the top of both artifacts.
pub(crate) const GENERATED_HEADER: &str = "// This file is generated by glbind. Do not edit.\n";

/// Keywords a Rust parameter name must not collide with.
///
/// `self`, `Self`, `super` and `crate` cannot be raw identifiers and are left out.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Rust backend.
///
/// Enums become `#[repr(transparent)]` newtypes over `u32` with one associated
/// constant per member, so several members may share a value. Commands become
/// an owned loader struct named after the native class.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend;

impl Backend for RustBackend {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn enums_file_name(&self) -> String {
        "enums.rs".to_string()
    }

    fn commands_file_name(&self, native_class: &str) -> String {
        format!("{}.rs", to_snake_case(native_class))
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn escape_prefix(&self) -> &'static str {
        "r#"
    }

    fn type_name(&self, ty: &MappedType<'_>) -> String {
        match *ty {
            MappedType::Value(scalar) => scalar_name(scalar).to_string(),
            MappedType::Pointer {
                pointee,
                mutability,
                depth,
            } => {
                let pointee = match pointee {
                    Scalar::Void => "core::ffi::c_void",
                    other => scalar_name(other),
                };
                let mut name = match mutability {
                    Mutability::Const => format!("*const {}", pointee),
                    Mutability::Mut => format!("*mut {}", pointee),
                };
                for _ in 1..depth {
                    name = format!("*mut {}", name);
                }
                name
            }
            MappedType::Enum(group) => group.to_string(),
            MappedType::Verbatim(token) => token.to_string(),
        }
    }

    fn enums_prologue(&self, ctx: &EmitContext<'_>) -> String {
        EnumWriter::new(ctx).prologue()
    }

    fn enum_block(&self, name: &str, members: &[EnumMember<'_>]) -> String {
        EnumWriter::block(name, members)
    }

    fn enums_epilogue(&self, ctx: &EmitContext<'_>) -> String {
        EnumWriter::new(ctx).epilogue()
    }

    fn commands(
        &self,
        ctx: &EmitContext<'_>,
        commands: &[ResolvedCommand<'_>],
        probe: ProbeLoader<'_>,
    ) -> String {
        CommandWriter::new(self, ctx).generate(commands, probe)
    }
}

/// Rust spelling of a scalar.
fn scalar_name(scalar: Scalar) -> &'static str {
    match scalar {
        // GLboolean is an unsigned char and may hold values other than 0 and 1.
        Scalar::Bool => "u8",
        Scalar::Int8 => "i8",
        Scalar::UInt8 => "u8",
        Scalar::Int16 => "i16",
        Scalar::UInt16 => "u16",
        Scalar::Int32 => "i32",
        Scalar::UInt32 => "u32",
        Scalar::Int64 => "i64",
        Scalar::UInt64 => "u64",
        Scalar::IntPtr => "isize",
        Scalar::Float => "f32",
        Scalar::Double => "f64",
        Scalar::Char8 => "core::ffi::c_char",
        Scalar::Void => "()",
    }
}
