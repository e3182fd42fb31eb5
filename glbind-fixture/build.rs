//! Generates Rust bindings for `fixtures/mini.xml` into `OUT_DIR`.

use glbind_codegen::{GeneratorConfig, generate_from_file};
use glbind_registry::ParseOptions;
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let registry = manifest_dir.join("fixtures").join("mini.xml");
    println!("cargo:rerun-if-changed={}", registry.display());

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let config = GeneratorConfig::new();
    let bindings = generate_from_file(&registry, &ParseOptions::default(), &config)?;
    bindings.write_to_dir(&out_dir, &config)?;

    Ok(())
}
