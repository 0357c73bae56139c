//! Dependency installation via the virtualenv's pip.
//!
//! pip is pointed directly at the assembly directory (`pip install -t`), so
//! resolved packages land next to the project sources rather than inside the
//! venv. The venv only supplies the interpreter and pip binaries. `VIRTUAL_ENV`
//! and a venv-first `PATH` are passed on the pip invocation itself; the
//! ambient process environment is never modified.

use anyhow::{Context, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::iter;
use std::path::Path;

use crate::process::Cmd;
use crate::venv::VirtualEnv;

/// Install the manifest's dependencies into the assembly directory.
///
/// `workdir` is the parent of the assembly directory; pip runs with it as
/// the working directory and receives the assembly directory as a relative
/// target, mirroring how the venv sits beside the assembly tree. A `None`
/// manifest skips the step entirely. A non-zero pip exit fails the build
/// with pip's stderr attached.
pub fn install_requirements(
    venv: &VirtualEnv,
    workdir: &Path,
    assembly_dirname: &str,
    requirements_file: Option<&Path>,
) -> Result<()> {
    let requirements_file = match requirements_file {
        Some(path) => path,
        None => {
            println!("  No requirements file (skipping dependency install)");
            return Ok(());
        }
    };

    println!("  Requirements: {}", requirements_file.display());

    let bin_dir = venv.bin_dir();
    let path_value = prepend_path(&bin_dir, env::var_os("PATH").as_deref())
        .context("Failed to compose PATH for pip")?;

    Cmd::new(venv.python())
        .args(pip_install_args(requirements_file, assembly_dirname))
        .dir(workdir)
        .env("VIRTUAL_ENV", venv.root())
        .env("PATH", path_value)
        .error_msg("pip install failed")
        .run()?;

    Ok(())
}

/// Argument list for the pip invocation. `-qqq` keeps routine progress out
/// of the build log; errors still reach stderr.
fn pip_install_args(requirements_file: &Path, assembly_dirname: &str) -> Vec<OsString> {
    vec![
        OsString::from("-m"),
        OsString::from("pip"),
        OsString::from("install"),
        OsString::from("-t"),
        OsString::from(assembly_dirname),
        OsString::from("-qqq"),
        OsString::from("-r"),
        requirements_file.as_os_str().to_os_string(),
    ]
}

/// Prepend `bin_dir` to an existing PATH value, keeping the rest intact.
fn prepend_path(bin_dir: &Path, existing: Option<&OsStr>) -> Result<OsString> {
    let tail = existing.map(env::split_paths).into_iter().flatten();
    let joined = env::join_paths(iter::once(bin_dir.to_path_buf()).chain(tail))?;
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_pip_install_args_shape() {
        let args = pip_install_args(Path::new("/src/requirements.txt"), "project");
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(
            args,
            [
                "-m",
                "pip",
                "install",
                "-t",
                "project",
                "-qqq",
                "-r",
                "/src/requirements.txt"
            ]
        );
    }

    #[test]
    fn test_prepend_path_keeps_existing_entries() {
        let joined = prepend_path(
            Path::new("/work/venv/bin"),
            Some(OsStr::new("/usr/bin:/bin")),
        )
        .unwrap();

        let parts: Vec<PathBuf> = env::split_paths(&joined).collect();
        assert_eq!(
            parts,
            [
                PathBuf::from("/work/venv/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
    }

    #[test]
    fn test_prepend_path_without_existing() {
        let joined = prepend_path(Path::new("/work/venv/bin"), None).unwrap();

        let parts: Vec<PathBuf> = env::split_paths(&joined).collect();
        assert_eq!(parts, [PathBuf::from("/work/venv/bin")]);
    }
}
