//! Zip archival of the assembled tree.
//!
//! The archive is written at exactly the configured output path; the path's
//! extension never selects a format (the container is always zip, which is
//! what the Lambda runtime accepts). Entries are walked in sorted order and
//! stamped with a fixed DOS-epoch timestamp, so archiving the same tree twice
//! yields byte-identical files and the reported checksum is stable across
//! rebuilds of unchanged sources.

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Summary of a produced deployment package.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    /// Where the archive was written.
    pub path: PathBuf,
    /// Logical archive name: the output file name with its extension stripped.
    pub name: String,
    /// Archive size in bytes.
    pub size: u64,
    /// SHA-256 of the archive, lowercase hex.
    pub sha256: String,
}

impl BuildArtifact {
    /// Print the artifact summary.
    pub fn print(&self) {
        let size_mb = self.size as f64 / 1024.0 / 1024.0;
        println!("  Archive: {} ({:.2} MB)", self.path.display(), size_mb);
        println!("  Name: {}", self.name);
        println!("  SHA-256: {}", self.sha256);
    }
}

/// Logical archive name: output file name minus its final extension
/// (`out.zip` -> `out`, `pkg.tar.gz` -> `pkg.tar`).
pub fn archive_stem(output_path: &Path) -> String {
    output_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string())
}

/// Compress the assembly directory into a zip at `output_path`.
///
/// Fails when the assembly directory is missing or holds nothing at all; an
/// empty deployment package is always a configuration mistake.
pub fn write_archive(assembly_dir: &Path, output_path: &Path) -> Result<BuildArtifact> {
    if !assembly_dir.is_dir() {
        bail!("Assembly directory missing: {}", assembly_dir.display());
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(assembly_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", assembly_dir.display()))?;
        if entry.path() != assembly_dir {
            entries.push(entry);
        }
    }
    if entries.is_empty() {
        bail!(
            "Assembly directory is empty, nothing to archive: {}",
            assembly_dir.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create archive: {}", output_path.display()))?;
    let mut writer = ZipWriter::new(file);

    // Fixed timestamp (DOS epoch, 1980-01-01) keeps the archive reproducible.
    let base_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for entry in &entries {
        let rel = entry.path().strip_prefix(assembly_dir).with_context(|| {
            format!(
                "Failed to make {} relative to {}",
                entry.path().display(),
                assembly_dir.display()
            )
        })?;
        let name = rel
            .to_str()
            .with_context(|| format!("Non-UTF-8 path in assembly tree: {}", rel.display()))?;

        if entry.file_type().is_dir() {
            writer
                .add_directory(name, base_options)
                .with_context(|| format!("Failed to add directory entry: {}", name))?;
        } else {
            let mode = entry
                .metadata()
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?
                .permissions()
                .mode();
            writer
                .start_file(name, base_options.unix_permissions(mode & 0o777))
                .with_context(|| format!("Failed to add archive entry: {}", name))?;
            let mut source = File::open(entry.path())
                .with_context(|| format!("Failed to open {}", entry.path().display()))?;
            io::copy(&mut source, &mut writer)
                .with_context(|| format!("Failed to compress {}", name))?;
        }
    }

    writer
        .finish()
        .with_context(|| format!("Failed to finalize archive: {}", output_path.display()))?;

    let size = fs::metadata(output_path)
        .with_context(|| format!("Failed to stat archive: {}", output_path.display()))?
        .len();
    let sha256 = sha256_file(output_path)?;

    Ok(BuildArtifact {
        path: output_path.to_path_buf(),
        name: archive_stem(output_path),
        size,
        sha256,
    })
}

/// Streaming SHA-256 of a file, as lowercase hex.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {} for checksum", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("Failed to read {} for checksum", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hash = hasher.finalize();
    Ok(format!("{:x}", hash))
}
