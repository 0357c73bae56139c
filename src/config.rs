//! Build configuration for lampack.
//!
//! All configuration comes from the process environment (Terraform sets the
//! variables when it invokes the tool). Environment variables are read once,
//! at startup; the resulting `Config` is immutable for the whole build.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Skip markers accepted for the optional variables.
///
/// Terraform renders an unset `string` variable as `"null"`, while older
/// module versions passed `"none"`. Either spelling skips the step.
const SKIP_MARKERS: [&str; 2] = ["none", "null"];

/// Resolved build configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of project source files (required).
    pub project_path: PathBuf,
    /// Destination path for the produced archive (required).
    pub output_filepath: PathBuf,
    /// Dependency manifest (requirements.txt); `None` skips the install step.
    pub requirements_file: Option<PathBuf>,
    /// Shared library directory merged in ahead of project files; `None` skips.
    pub lib_path: Option<PathBuf>,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Fails if a required variable is missing. No filesystem access happens
    /// here; a nonexistent project directory surfaces later, in the copy step.
    pub fn from_env() -> Result<Self> {
        let project_path = required_path_var("PROJECT_PATH")?;
        let output_filepath = required_path_var("OUTPUT_FILEPATH")?;
        let requirements_file = optional_path_var("REQUIREMENTS_FILE");
        let lib_path = optional_path_var("LIB_PATH");

        Ok(Self {
            project_path,
            output_filepath,
            requirements_file,
            lib_path,
        })
    }

    /// Print the resolved configuration.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  PROJECT_PATH: {}", self.project_path.display());
        println!("  OUTPUT_FILEPATH: {}", self.output_filepath.display());
        match &self.requirements_file {
            Some(path) => println!("  REQUIREMENTS_FILE: {}", path.display()),
            None => println!("  REQUIREMENTS_FILE: (none - install skipped)"),
        }
        match &self.lib_path {
            Some(path) => println!("  LIB_PATH: {}", path.display()),
            None => println!("  LIB_PATH: (none - no shared libs)"),
        }
    }
}

fn required_path_var(name: &str) -> Result<PathBuf> {
    let value = env::var_os(name)
        .with_context(|| format!("Required environment variable {} is not set", name))?;
    Ok(PathBuf::from(value))
}

/// Read an optional path variable. Absent or set to a skip marker means
/// "step disabled"; the sentinel strings never travel past this point.
/// Matching is against the raw OS string, so a non-Unicode value is a
/// path, not a marker.
fn optional_path_var(name: &str) -> Option<PathBuf> {
    match env::var_os(name) {
        Some(value) if SKIP_MARKERS.iter().any(|marker| value == *marker) => None,
        Some(value) => Some(PathBuf::from(value)),
        None => None,
    }
}
