//! Writing generated artifacts to disk.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::generator::Bindings;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

impl Bindings {
    /// Writes both artifacts to explicit paths.
    ///
    /// Each artifact is written to a temporary file next to its destination and
    /// renamed into place once complete, so a failure never leaves a partial
    /// file behind. Destination directories must already exist.
    ///
    /// # Errors
    /// Returns `CodegenError` if either file cannot be written.
    pub fn write_to(&self, enums_path: &Path, commands_path: &Path) -> Result<(), CodegenError> {
        write_atomic(enums_path, &self.enums)?;
        write_atomic(commands_path, &self.commands)?;
        Ok(())
    }

    /// Writes both artifacts into `dir` under the backend's file names.
    ///
    /// Returns the paths written, enums first. The Rust commands artifact
    /// imports the enum groups with `use self::<namespace>::*;`, so both files
    /// must be `include!`d into the same module.
    ///
    /// # Errors
    /// Returns `CodegenError` if either file cannot be written.
    pub fn write_to_dir(
        &self,
        dir: &Path,
        config: &GeneratorConfig,
    ) -> Result<(PathBuf, PathBuf), CodegenError> {
        let backend = config.backend();
        let enums_path = dir.join(backend.enums_file_name());
        let commands_path = dir.join(backend.commands_file_name(config.native_class_ident()));
        self.write_to(&enums_path, &commands_path)?;
        Ok((enums_path, commands_path))
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), CodegenError> {
    if path.file_name().is_none() {
        return Err(CodegenError::invalid_path(format!(
            "{} has no file name",
            path.display()
        )));
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.persist(path)?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}
