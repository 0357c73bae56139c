//! Isolated Python environment creation.
//!
//! Each build gets a fresh virtualenv inside the ephemeral working area so
//! dependency installation uses a known interpreter and pip, independent of
//! whatever Python state the ambient process happens to have. Nothing is
//! ever installed into the venv itself; pip only runs out of it.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::process::Cmd;

/// Directory name of the virtualenv inside the working area.
pub const VENV_DIRNAME: &str = "venv";

/// A freshly created virtualenv.
#[derive(Debug, Clone)]
pub struct VirtualEnv {
    root: PathBuf,
    /// File name of the interpreter the venv was created with ("python3" or
    /// "python"); venv mirrors it under bin/.
    interpreter: OsString,
}

impl VirtualEnv {
    /// Create a fresh virtualenv at `<workdir>/venv`.
    ///
    /// Fails if no Python interpreter can be found or `python -m venv` exits
    /// non-zero (commonly a missing ensurepip on Debian-family hosts).
    pub fn create(workdir: &Path) -> Result<Self> {
        let python = find_python()?;
        let root = workdir.join(VENV_DIRNAME);

        Cmd::new(&python)
            .arg("-m")
            .arg("venv")
            .arg_path(&root)
            .error_msg("Failed to create virtualenv")
            .run()?;

        let interpreter = python
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| OsString::from("python3"));

        Ok(Self { root, interpreter })
    }

    /// Root directory of the venv.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The venv's executable directory.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// The venv's interpreter, named after the interpreter that created it.
    pub fn python(&self) -> PathBuf {
        self.bin_dir().join(&self.interpreter)
    }
}

/// Locate the host Python interpreter.
///
/// `PYTHON` overrides discovery (a path or a name resolvable on PATH);
/// otherwise the first of `python3`, `python` found on PATH wins.
pub fn find_python() -> Result<PathBuf> {
    if let Some(override_value) = std::env::var_os("PYTHON") {
        let candidate = PathBuf::from(&override_value);
        if candidate.is_file() {
            return Ok(candidate);
        }
        return which::which(&override_value).with_context(|| {
            format!(
                "PYTHON is set to '{}' but it was not found",
                override_value.to_string_lossy()
            )
        });
    }

    for name in ["python3", "python"] {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }

    anyhow::bail!(
        "No Python interpreter found. Install 'python3' (with the venv module) \
         or set PYTHON to an interpreter path."
    )
}
