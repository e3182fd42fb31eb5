//! Example generator run over a registry file.
//!
//! Run with: `cargo run --example generate -- <gl.xml> <out-dir> [rust|beef] [version]`
//!
//! Set `RUST_LOG=debug` to see skipped enumerants and unmapped types.

use anyhow::{Context, bail};
use glbind::prelude::*;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(registry), Some(out_dir)) = (args.next(), args.next()) else {
        bail!("usage: generate <gl.xml> <out-dir> [rust|beef] [version]");
    };
    let target = match args.next() {
        Some(name) => Target::parse(&name).with_context(|| format!("unknown target '{name}'"))?,
        None => Target::Rust,
    };
    let version = args
        .next()
        .map_or(VersionSelector::Latest, VersionSelector::Exact);

    let config = match target {
        Target::Rust => GeneratorConfig::new(),
        Target::Beef => GeneratorConfig::new()
            .namespace("OpenGL")
            .native_class("GL"),
    }
    .target(target)
    .version(version);

    let registry = PathBuf::from(registry);
    let out_dir = PathBuf::from(out_dir);
    let (enums, commands) =
        glbind::generate_bindings(&registry, &ParseOptions::default(), &config, &out_dir)
            .with_context(|| format!("generating bindings from {}", registry.display()))?;

    println!("[Generate] {}", enums.display());
    println!("[Generate] {}", commands.display());

    Ok(())
}
