//! Build command - runs the packaging pipeline.

use anyhow::Result;

use crate::config::Config;
use crate::pipeline;

/// Execute the build command.
pub fn cmd_build(config: &Config) -> Result<()> {
    println!("=== Building deployment package ===\n");
    config.print();
    println!();

    let artifact = pipeline::run_build(config)?;
    artifact.print();

    Ok(())
}
