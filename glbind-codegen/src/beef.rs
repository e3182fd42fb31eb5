//! Beef code generation.
//!
//! Enums become `[AllowDuplicates]` enums over `uint32` and commands extend a
//! static class with typed function pointer fields.

use crate::backend::{Backend, EmitContext, EnumMember, ProbeLoader, ResolvedCommand};
use crate::mapper::{MappedType, Scalar};
use crate::naming::strip_api_prefix;

const RESERVED_WORDS: &[&str] = &["params", "string", "ref", "base", "box"];

/// Beef backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeefBackend;

impl BeefBackend {
    fn param_list(&self, cmd: &ResolvedCommand<'_>) -> String {
        cmd.params
            .iter()
            .map(|p| format!("{} {}", self.type_name(&p.ty), p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Backend for BeefBackend {
    fn name(&self) -> &'static str {
        "beef"
    }

    fn enums_file_name(&self) -> String {
        "Enums.bf".to_string()
    }

    fn commands_file_name(&self, native_class: &str) -> String {
        format!("{}.bf", native_class)
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED_WORDS
    }

    fn escape_prefix(&self) -> &'static str {
        "@"
    }

    fn type_name(&self, ty: &MappedType<'_>) -> String {
        match *ty {
            MappedType::Value(scalar) => scalar_name(scalar).to_string(),
            MappedType::Pointer { pointee, depth, .. } => {
                let mut name = scalar_name(pointee).to_string();
                for _ in 0..depth {
                    name.push('*');
                }
                name
            }
            MappedType::Enum(group) => group.to_string(),
            MappedType::Verbatim(token) => token.to_string(),
        }
    }

    fn enums_prologue(&self, ctx: &EmitContext<'_>) -> String {
        format!("using System;\n\nnamespace {};\n", ctx.namespace)
    }

    fn enum_block(&self, name: &str, members: &[EnumMember<'_>]) -> String {
        let mut output = String::new();

        output.push_str("[AllowDuplicates]\n");
        output.push_str(&format!("public enum {} : uint32\n", name));
        output.push_str("{\n");
        for member in members {
            output.push_str(&format!("\t{} = {},\n", member.ident, member.value));
        }
        output.push_str("}\n");

        output
    }

    fn enums_epilogue(&self, _ctx: &EmitContext<'_>) -> String {
        String::new()
    }

    fn commands(
        &self,
        ctx: &EmitContext<'_>,
        commands: &[ResolvedCommand<'_>],
        probe: ProbeLoader<'_>,
    ) -> String {
        let mut output = String::new();
        let class = ctx.native_class;

        output.push_str("using System;\n");
        output.push_str(&format!("namespace {};\n", ctx.namespace));
        output.push_str(&format!("extension {}\n", class));
        output.push_str("{\n");
        output.push_str("\tprivate static function void*(StringView) s_getProcAddress;\n\n");
        output.push_str("\tprivate const CallingConventionAttribute.Kind CallConv = .Stdcall;\n");

        for cmd in commands {
            let ret = self.type_name(&cmd.return_type);
            let params = self.param_list(cmd);
            let args = cmd
                .params
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            output.push('\n');
            output.push_str(&format!(
                "\tprivate typealias {}_t = function {}({});\n",
                cmd.name, ret, params
            ));
            output.push_str(&format!("\tprivate static {0}_t p_{0};\n", cmd.name));
            output.push_str(&format!("\t[CallingConvention({}.CallConv)]\n", class));
            output.push_str(&format!(
                "\tpublic static {} {}({}) => p_{}({});\n",
                ret, cmd.name, params, cmd.name, args
            ));
        }

        output.push_str(&format!(
            "\n\tpublic static void Load{}(function void*(StringView) getProcAddress)\n",
            strip_api_prefix(probe.name)
        ));
        output.push_str("\t{\n");
        output.push_str("\t\ts_getProcAddress = getProcAddress;\n");
        if probe.present {
            output.push_str(&format!(
                "\t\tLoadFunction(\"{0}\", out p_{0});\n",
                probe.name
            ));
        }
        output.push_str("\t}\n");

        output.push_str(
            "\n\tpublic static void LoadAllFunctions(function void*(StringView) getProcAddress)\n",
        );
        output.push_str("\t{\n");
        output.push_str("\t\ts_getProcAddress = getProcAddress;\n\n");
        for cmd in commands {
            output.push_str(&format!(
                "\t\tLoadFunction(\"{0}\", out p_{0});\n",
                cmd.name
            ));
        }
        output.push_str("\t}\n\n");

        output.push_str("\tprivate static void LoadFunction<T>(StringView name, out T field)\n");
        output.push_str("\t{\n");
        output.push_str("\t\tvoid* funcPtr = s_getProcAddress(name);\n");
        output.push_str("\t\tif (funcPtr != null)\n");
        output.push_str("\t\t{\n");
        output.push_str("\t\t\tfield = *(T*)(void*)&funcPtr;\n");
        output.push_str("\t\t}\n");
        output.push_str("\t\telse\n");
        output.push_str("\t\t{\n");
        output.push_str("\t\t\tfield = default(T);\n");
        output.push_str("\t\t}\n");
        output.push_str("\t}\n");
        output.push_str("}\n");

        output
    }
}

fn scalar_name(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Bool => "bool",
        Scalar::Int8 => "int8",
        Scalar::UInt8 => "uint8",
        Scalar::Int16 => "int16",
        Scalar::UInt16 => "uint16",
        Scalar::Int32 => "int32",
        Scalar::UInt32 => "uint32",
        Scalar::Int64 => "int64",
        Scalar::UInt64 => "uint64",
        Scalar::IntPtr => "int",
        Scalar::Float => "float",
        Scalar::Double => "double",
        Scalar::Char8 => "char8",
        Scalar::Void => "void",
    }
}
