//! The build pipeline.
//!
//! One build = one ephemeral working area containing the virtualenv and the
//! assembly directory. Steps run in fixed order (venv, install, assemble,
//! archive), each gated on the previous one's success. The working area is
//! removed on every exit path: `TempDir` cleans up on drop, so an early
//! `?` return cannot strand intermediate state on disk.

use anyhow::{Context, Result};
use std::fs;
use std::time::Instant;
use tempfile::TempDir;

use crate::archive::{self, BuildArtifact};
use crate::assemble;
use crate::config::Config;
use crate::install;
use crate::venv::VirtualEnv;

/// Name of the assembly directory inside the working area. Dependencies,
/// library files, and project files all land here; its final contents are
/// what gets archived.
pub const ASSEMBLY_DIRNAME: &str = "project";

/// Run the full packaging pipeline for one configuration.
///
/// Produces exactly one archive at the configured output path, or fails with
/// the first step error. No intermediate state survives either way.
pub fn run_build(config: &Config) -> Result<BuildArtifact> {
    let start = Instant::now();

    let workdir = TempDir::new().context("Failed to create working area")?;
    let assembly_dir = workdir.path().join(ASSEMBLY_DIRNAME);
    fs::create_dir(&assembly_dir).with_context(|| {
        format!(
            "Failed to create assembly directory: {}",
            assembly_dir.display()
        )
    })?;

    println!("Creating isolated Python environment...");
    let venv = VirtualEnv::create(workdir.path())?;

    println!("Installing dependencies...");
    install::install_requirements(
        &venv,
        workdir.path(),
        ASSEMBLY_DIRNAME,
        config.requirements_file.as_deref(),
    )?;

    println!("Assembling sources...");
    assemble::assemble_sources(
        &assembly_dir,
        config.lib_path.as_deref(),
        &config.project_path,
    )?;

    println!("Writing archive...");
    let artifact = archive::write_archive(&assembly_dir, &config.output_filepath)?;

    // On error paths Drop removes the working area silently; on success a
    // cleanup failure is worth surfacing.
    workdir.close().context("Failed to remove working area")?;

    println!("\nBuild complete in {:.1}s", start.elapsed().as_secs_f64());
    Ok(artifact)
}
