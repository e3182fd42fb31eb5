//! Binding generation for one registry version.

use crate::backend::{EmitContext, EnumMember, ProbeLoader, ResolvedCommand, ResolvedParam};
use crate::config::GeneratorConfig;
use crate::literal::fits_u32;
use crate::mapper::TypeMapper;
use crate::naming::{ReservedWords, member_ident};
use glbind_registry::{Command, Group, Version};

/// Generated artifacts, one string per output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    /// Enums artifact.
    pub enums: String,
    /// Commands artifact.
    pub commands: String,
}

/// Generates both artifacts for a selected version.
///
/// Output is a pure function of the version and the configuration: groups are
/// emitted in name order and commands in registry order.
pub struct Generator<'a> {
    version: &'a Version,
    config: &'a GeneratorConfig,
    reserved: ReservedWords,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(version: &'a Version, config: &'a GeneratorConfig) -> Self {
        Self {
            version,
            config,
            reserved: config.reserved(),
        }
    }

    /// Generates both artifacts.
    #[must_use]
    pub fn generate(&self) -> Bindings {
        tracing::info!(
            version = %self.version.name,
            target = self.config.backend().name(),
            groups = self.version.groups.len(),
            commands = self.version.commands.len(),
            "generating bindings"
        );
        Bindings {
            enums: self.generate_enums(),
            commands: self.generate_commands(),
        }
    }

    /// Generates the enums artifact.
    ///
    /// Every group is emitted, including empty ones, separated by exactly one
    /// blank line. Enumerants whose value does not fit an unsigned 32-bit
    /// integer are skipped.
    #[must_use]
    pub fn generate_enums(&self) -> String {
        let backend = self.config.backend();
        let ctx = self.context();
        let mut output = backend.enums_prologue(&ctx);

        for (i, group) in self.version.groups.values().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            let members = self.members(group);
            output.push_str(&backend.enum_block(&group.name, &members));
        }

        output.push_str(&backend.enums_epilogue(&ctx));
        output
    }

    /// Generates the commands artifact.
    #[must_use]
    pub fn generate_commands(&self) -> String {
        let backend = self.config.backend();
        let ctx = self.context();
        let mapper = TypeMapper::new(self.version);

        let commands: Vec<ResolvedCommand<'_>> = self
            .version
            .commands
            .iter()
            .map(|cmd| self.resolve(&mapper, cmd))
            .collect();

        let probe_name = self.config.probe();
        let present = self.version.command(probe_name).is_some();
        if !present {
            tracing::warn!(
                probe = probe_name,
                version = %self.version.name,
                "probe command not in version; narrow loader binds nothing"
            );
        }

        backend.commands(
            &ctx,
            &commands,
            ProbeLoader {
                name: probe_name,
                present,
            },
        )
    }

    fn context(&self) -> EmitContext<'a> {
        EmitContext {
            namespace: self.config.namespace_ident(),
            native_class: self.config.native_class_ident(),
        }
    }

    fn members<'g>(&self, group: &'g Group) -> Vec<EnumMember<'g>> {
        group
            .enums
            .iter()
            .filter(|e| {
                let keep = fits_u32(&e.value);
                if !keep {
                    tracing::debug!(
                        group = %group.name,
                        enumerant = %e.name,
                        value = %e.value,
                        "skipping enumerant outside u32 range"
                    );
                }
                keep
            })
            .map(|e| EnumMember {
                ident: member_ident(&e.short_name).into_owned(),
                value: &e.value,
            })
            .collect()
    }

    fn resolve<'c>(&self, mapper: &TypeMapper<'c>, cmd: &'c Command) -> ResolvedCommand<'c> {
        ResolvedCommand {
            name: &cmd.name,
            return_type: mapper.map(&cmd.return_type),
            params: cmd
                .parameters
                .iter()
                .map(|p| ResolvedParam {
                    name: self.reserved.escape(&p.name).into_owned(),
                    ty: mapper.map(&p.type_ref),
                })
                .collect(),
        }
    }
}
