//! Preflight command - runs preflight checks.

use anyhow::Result;

use crate::preflight;

/// Execute the preflight command.
pub fn cmd_preflight(strict: bool) -> Result<()> {
    if strict {
        preflight::run_preflight_or_fail()?;
    } else {
        let report = preflight::run_preflight();
        report.print();
        if !report.all_passed() {
            println!("Some checks failed. Use --strict to fail the build.");
        }
    }
    Ok(())
}
