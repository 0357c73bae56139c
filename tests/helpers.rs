//! Shared test utilities for lampack tests.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use lampack::config::Config;

/// Test environment with temporary source and output directories.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Project source directory
    pub project: PathBuf,
    /// Shared library directory
    pub lib: PathBuf,
    /// Directory output archives are written into
    pub output_dir: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with empty project/lib/output dirs.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let project = base.join("project-src");
        let lib = base.join("lib-src");
        let output_dir = base.join("out");

        fs::create_dir_all(&project).expect("Failed to create project dir");
        fs::create_dir_all(&lib).expect("Failed to create lib dir");
        fs::create_dir_all(&output_dir).expect("Failed to create output dir");

        Self {
            _temp_dir: temp_dir,
            project,
            lib,
            output_dir,
        }
    }

    /// Output path for an archive with the given file name.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    /// Configuration for a plain build: project only, no lib, no requirements.
    pub fn config(&self, output_name: &str) -> Config {
        Config {
            project_path: self.project.clone(),
            output_filepath: self.output_path(output_name),
            requirements_file: None,
            lib_path: None,
        }
    }

    /// Configuration with the shared library directory enabled.
    pub fn config_with_lib(&self, output_name: &str) -> Config {
        Config {
            lib_path: Some(self.lib.clone()),
            ..self.config(output_name)
        }
    }
}

/// Write a file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Whether this host can run venv-backed builds. Pipeline tests skip
/// (with a notice) on hosts without a usable Python.
pub fn host_can_build() -> bool {
    lampack::preflight::run_preflight().all_passed()
}

/// Entry names of a zip archive, sorted.
pub fn zip_names(path: &Path) -> Vec<String> {
    let file = File::open(path).expect("Failed to open archive");
    let archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

/// Content of one zip entry as a string.
pub fn read_zip_entry(path: &Path, name: &str) -> String {
    let file = File::open(path).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    let mut entry = archive.by_name(name).expect("Entry not found in archive");
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .expect("Failed to read entry");
    content
}

/// Write a minimal pure-Python wheel that pip can install offline.
///
/// Returns the wheel path; list it in a requirements file to exercise a
/// real `pip install -t` without touching the network.
pub fn write_test_wheel(dir: &Path) -> PathBuf {
    let wheel_path = dir.join("mypkg-0.1.0-py3-none-any.whl");
    let file = File::create(&wheel_path).expect("Failed to create wheel file");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let entries = [
        ("mypkg/__init__.py", "VERSION = \"0.1.0\"\n"),
        (
            "mypkg-0.1.0.dist-info/METADATA",
            "Metadata-Version: 2.1\nName: mypkg\nVersion: 0.1.0\n",
        ),
        (
            "mypkg-0.1.0.dist-info/WHEEL",
            "Wheel-Version: 1.0\nGenerator: lampack-tests\nRoot-Is-Purelib: true\nTag: py3-none-any\n",
        ),
        (
            "mypkg-0.1.0.dist-info/RECORD",
            "mypkg/__init__.py,,\nmypkg-0.1.0.dist-info/METADATA,,\nmypkg-0.1.0.dist-info/WHEEL,,\nmypkg-0.1.0.dist-info/RECORD,,\n",
        ),
    ];
    for (name, content) in entries {
        writer
            .start_file(name, options)
            .expect("Failed to start wheel entry");
        writer
            .write_all(content.as_bytes())
            .expect("Failed to write wheel entry");
    }
    writer.finish().expect("Failed to finish wheel");

    wheel_path
}
