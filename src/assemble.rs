//! Source assembly: merge library and project trees into the assembly dir.
//!
//! Copy order is the contract here. Dependencies are already in place when
//! assembly runs, the shared library tree goes in next, and the project tree
//! goes in last, so a project file at the same relative path always wins
//! over a library file.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copy the library (if any) and project trees into the assembly directory.
pub fn assemble_sources(
    assembly_dir: &Path,
    lib_path: Option<&Path>,
    project_path: &Path,
) -> Result<()> {
    if let Some(lib_path) = lib_path {
        let copied = copy_tree(lib_path, assembly_dir)
            .with_context(|| format!("Failed to copy library files from {}", lib_path.display()))?;
        println!("  Library files: {} from {}", copied, lib_path.display());
    }

    let copied = copy_tree(project_path, assembly_dir)
        .with_context(|| format!("Failed to copy project files from {}", project_path.display()))?;
    println!("  Project files: {} from {}", copied, project_path.display());

    Ok(())
}

/// Recursively merge-copy `src` into `dst`. Returns the number of files copied.
///
/// Existing files at colliding relative paths are overwritten; directories
/// merge rather than replace. Symlinks are followed (their content is
/// copied) and Unix permissions carry over with the file.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        bail!("Source is not a directory: {}", src.display());
    }
    fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create destination: {}", dst.display()))?;

    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let rel = entry.path().strip_prefix(src).with_context(|| {
            format!(
                "Failed to make {} relative to {}",
                entry.path().display(),
                src.display()
            )
        })?;
        if rel.as_os_str().is_empty() {
            continue;
        }

        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}
