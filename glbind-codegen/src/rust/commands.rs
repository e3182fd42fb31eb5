//! Command loader code generation.

use super::{GENERATED_HEADER, RustBackend};
use crate::backend::{Backend, EmitContext, ProbeLoader, ResolvedCommand};
use crate::naming::{strip_api_prefix, to_snake_case};

/// Resolver signature stored by the generated table.
const RESOLVER: &str = "FnMut(&str) -> *const core::ffi::c_void";

/// Writer for the Rust commands artifact.
///
/// Emits one `extern "system"` function pointer alias per command, a struct
/// named after the native class holding one optional slot per command plus the
/// stored resolver, and an impl with a trampoline per command and the loaders.
///
/// Trampolines use the `system-unwind` ABI so the panic raised for an unloaded
/// slot can cross them.
pub struct CommandWriter<'a> {
    backend: &'a RustBackend,
    ctx: &'a EmitContext<'a>,
}

impl<'a> CommandWriter<'a> {
    /// Creates a new command writer.
    #[must_use]
    pub fn new(backend: &'a RustBackend, ctx: &'a EmitContext<'a>) -> Self {
        Self { backend, ctx }
    }

    /// Generates the whole artifact.
    #[must_use]
    pub fn generate(&self, commands: &[ResolvedCommand<'_>], probe: ProbeLoader<'_>) -> String {
        let mut output = String::new();

        output.push_str(GENERATED_HEADER);
        output.push_str(&format!(
            "// Must be included in the same module as the enums artifact declaring `{}`.\n",
            self.ctx.namespace
        ));
        output.push('\n');
        output.push_str("#[allow(unused_imports)]\n");
        output.push_str(&format!("use self::{}::*;\n\n", self.ctx.namespace));

        for cmd in commands {
            output.push_str(&self.generate_alias(cmd));
        }
        if !commands.is_empty() {
            output.push('\n');
        }

        output.push_str(&self.generate_struct(commands));
        output.push_str(&self.generate_impl(commands, probe));
        output.push_str(&Self::generate_missing_fn());

        output
    }

    /// Generates the function pointer alias of a command.
    fn generate_alias(&self, cmd: &ResolvedCommand<'_>) -> String {
        let mut output = String::new();
        let params: Vec<String> = cmd
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, self.backend.type_name(&p.ty)))
            .collect();

        output.push_str("#[allow(non_camel_case_types, non_snake_case)]\n");
        output.push_str(&format!(
            "pub type PFN_{} = unsafe extern \"system\" fn({}){};\n",
            cmd.name,
            params.join(", "),
            self.return_suffix(cmd)
        ));

        output
    }

    /// Generates the table struct.
    fn generate_struct(&self, commands: &[ResolvedCommand<'_>]) -> String {
        let mut output = String::new();
        let class = self.ctx.native_class;

        output.push_str(&format!("/// Entry point table for `{}`.\n", class));
        output.push_str("///\n");
        output.push_str("/// Every entry point starts unloaded. Loading is not synchronized:\n");
        output.push_str("/// callers sharing one table must not run its loaders concurrently.\n");
        output.push_str("#[allow(non_snake_case)]\n");
        output.push_str("#[derive(Default)]\n");
        output.push_str(&format!("pub struct {} {{\n", class));
        output.push_str(&format!(
            "    get_proc_address: Option<Box<dyn {}>>,\n",
            RESOLVER
        ));
        for cmd in commands {
            output.push_str(&format!("    p_{0}: Option<PFN_{0}>,\n", cmd.name));
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates the impl block: constructor, trampolines and loaders.
    fn generate_impl(&self, commands: &[ResolvedCommand<'_>], probe: ProbeLoader<'_>) -> String {
        let mut output = String::new();

        output.push_str("#[allow(\n");
        output.push_str("    non_snake_case,\n");
        output.push_str("    dead_code,\n");
        output.push_str("    unused_unsafe,\n");
        output.push_str("    improper_ctypes_definitions,\n");
        output.push_str("    clippy::too_many_arguments,\n");
        output.push_str("    clippy::missing_safety_doc\n");
        output.push_str(")]\n");
        output.push_str(&format!("impl {} {{\n", self.ctx.native_class));

        output.push_str("    /// Creates a table with every entry point unloaded.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn new() -> Self {\n");
        output.push_str("        Self::default()\n");
        output.push_str("    }\n");

        for cmd in commands {
            output.push('\n');
            output.push_str(&self.generate_trampoline(cmd));
        }

        output.push('\n');
        output.push_str(&Self::generate_probe_loader(probe));
        output.push('\n');
        output.push_str(&Self::generate_load_all(commands));
        output.push('\n');
        output.push_str(&Self::generate_load_one(commands));
        output.push('\n');
        output.push_str(&Self::generate_is_loaded(commands));
        output.push('\n');
        output.push_str(&Self::generate_load_function());

        output.push_str("}\n\n");

        output
    }

    /// Generates the trampoline forwarding to a command's slot.
    fn generate_trampoline(&self, cmd: &ResolvedCommand<'_>) -> String {
        let mut output = String::new();
        let params: Vec<String> = std::iter::once("&self".to_string())
            .chain(
                cmd.params
                    .iter()
                    .map(|p| format!("{}: {}", p.name, self.backend.type_name(&p.ty))),
            )
            .collect();
        let args: Vec<&str> = cmd.params.iter().map(|p| p.name.as_str()).collect();

        output.push_str("    #[inline]\n");
        output.push_str(&format!(
            "    pub unsafe extern \"system-unwind\" fn {}({}){} {{\n",
            cmd.name,
            params.join(", "),
            self.return_suffix(cmd)
        ));
        output.push_str(&format!(
            "        unsafe {{ (self.p_{0}.unwrap_or_else(|| missing_fn(\"{0}\")))({1}) }}\n",
            cmd.name,
            args.join(", ")
        ));
        output.push_str("    }\n");

        output
    }

    /// Generates the narrow loader binding only the configured command.
    fn generate_probe_loader(probe: ProbeLoader<'_>) -> String {
        let mut output = String::new();
        let method = format!("load_{}", to_snake_case(strip_api_prefix(probe.name)));

        if probe.present {
            output.push_str(&format!(
                "    /// Stores the resolver and binds only `{}`.\n",
                probe.name
            ));
        } else {
            output.push_str("    /// Stores the resolver without binding anything.\n");
        }
        output.push_str(&format!(
            "    pub fn {}<F>(&mut self, get_proc_address: F)\n",
            method
        ));
        output.push_str("    where\n");
        output.push_str(&format!("        F: {} + 'static,\n", RESOLVER));
        output.push_str("    {\n");
        output.push_str("        self.get_proc_address = Some(Box::new(get_proc_address));\n");
        if probe.present {
            output.push_str(&format!(
                "        self.p_{0} = self.load_function(\"{0}\");\n",
                probe.name
            ));
        }
        output.push_str("    }\n");

        output
    }

    fn generate_load_all(commands: &[ResolvedCommand<'_>]) -> String {
        let mut output = String::new();

        output.push_str("    /// Stores the resolver and binds every entry point it resolves.\n");
        output.push_str("    ///\n");
        output.push_str("    /// Unresolved entry points stay unloaded.\n");
        output.push_str("    pub fn load_all_functions<F>(&mut self, get_proc_address: F)\n");
        output.push_str("    where\n");
        output.push_str(&format!("        F: {} + 'static,\n", RESOLVER));
        output.push_str("    {\n");
        output.push_str("        self.get_proc_address = Some(Box::new(get_proc_address));\n");
        for cmd in commands {
            output.push_str(&format!(
                "        self.p_{0} = self.load_function(\"{0}\");\n",
                cmd.name
            ));
        }
        output.push_str("    }\n");

        output
    }

    fn generate_load_one(commands: &[ResolvedCommand<'_>]) -> String {
        let mut output = String::new();

        output.push_str("    /// Re-resolves one entry point with the stored resolver.\n");
        output.push_str("    ///\n");
        output.push_str("    /// Returns whether the entry point is bound afterwards.\n");
        output.push_str("    pub fn load(&mut self, name: &str) -> bool {\n");
        output.push_str("        match name {\n");
        for cmd in commands {
            output.push_str(&format!("            \"{}\" => {{\n", cmd.name));
            output.push_str(&format!(
                "                self.p_{0} = self.load_function(\"{0}\");\n",
                cmd.name
            ));
            output.push_str(&format!("                self.p_{}.is_some()\n", cmd.name));
            output.push_str("            }\n");
        }
        output.push_str("            _ => false,\n");
        output.push_str("        }\n");
        output.push_str("    }\n");

        output
    }

    fn generate_is_loaded(commands: &[ResolvedCommand<'_>]) -> String {
        let mut output = String::new();

        output.push_str("    /// Returns whether the named entry point is bound.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn is_loaded(&self, name: &str) -> bool {\n");
        output.push_str("        match name {\n");
        for cmd in commands {
            output.push_str(&format!(
                "            \"{0}\" => self.p_{0}.is_some(),\n",
                cmd.name
            ));
        }
        output.push_str("            _ => false,\n");
        output.push_str("        }\n");
        output.push_str("    }\n");

        output
    }

    fn generate_load_function() -> String {
        let mut output = String::new();

        output.push_str("    fn load_function<T: Copy>(&mut self, name: &str) -> Option<T> {\n");
        output.push_str("        let get_proc_address = self.get_proc_address.as_deref_mut()?;\n");
        output.push_str("        let ptr = get_proc_address(name);\n");
        output.push_str("        if ptr.is_null() {\n");
        output.push_str("            return None;\n");
        output.push_str("        }\n");
        output.push_str(
            "        Some(unsafe { core::mem::transmute_copy::<*const core::ffi::c_void, T>(&ptr) })\n",
        );
        output.push_str("    }\n");

        output
    }

    fn generate_missing_fn() -> String {
        let mut output = String::new();

        output.push_str("#[cold]\n");
        output.push_str("#[inline(never)]\n");
        output.push_str("fn missing_fn(name: &str) -> ! {\n");
        output.push_str("    panic!(\"{} is not loaded\", name)\n");
        output.push_str("}\n");

        output
    }

    /// ` -> T`, or nothing for a void return.
    fn return_suffix(&self, cmd: &ResolvedCommand<'_>) -> String {
        if cmd.return_type.is_void() {
            String::new()
        } else {
            format!(" -> {}", self.backend.type_name(&cmd.return_type))
        }
    }
}
