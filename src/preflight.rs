//! Preflight checks for the packaging host.
//!
//! Validates that the host can build a deployment package before Terraform
//! kicks off a real run. Run with `lampack preflight`.

use anyhow::{bail, Result};

use crate::process::Cmd;
use crate::venv;

/// Result of a single preflight check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed.
    Pass,
    /// Check failed - builds will fail.
    Fail,
    /// Check passed but with a warning.
    Warn,
}

impl CheckResult {
    fn pass_with(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            details: Some(details.to_string()),
        }
    }

    fn fail(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            details: Some(details.to_string()),
        }
    }

    fn warn(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warn,
            details: Some(details.to_string()),
        }
    }
}

/// Results of all preflight checks.
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// Returns true if all checks passed (no failures).
    pub fn all_passed(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    /// Count of failed checks.
    pub fn fail_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .count()
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        println!("=== Preflight Check Results ===\n");

        for check in &self.checks {
            let (icon, status_str) = match check.status {
                CheckStatus::Pass => ("✓", "PASS"),
                CheckStatus::Fail => ("✗", "FAIL"),
                CheckStatus::Warn => ("⚠", "WARN"),
            };

            print!("  {} [{}] {}", icon, status_str, check.name);
            match &check.details {
                Some(details) => println!(": {}", details),
                None => println!(),
            }
        }

        let passed = self
            .checks
            .iter()
            .filter(|c| c.status == CheckStatus::Pass)
            .count();
        println!("\nSummary: {}/{} passed", passed, self.checks.len());
        if self.fail_count() > 0 {
            println!("         {} FAILED - builds will not succeed", self.fail_count());
        }
    }
}

/// Run all preflight checks.
pub fn run_preflight() -> PreflightReport {
    let mut checks = Vec::new();

    let python = match venv::find_python() {
        Ok(path) => {
            checks.push(CheckResult::pass_with("python", &path.display().to_string()));
            Some(path)
        }
        Err(e) => {
            checks.push(CheckResult::fail("python", &e.to_string()));
            None
        }
    };

    if let Some(python) = python {
        match Cmd::new(&python).arg("--version").allow_fail().run() {
            Ok(result) if result.success() => {
                // Some interpreters print the version on stderr.
                let version = if result.stdout_trimmed().is_empty() {
                    result.stderr_trimmed().to_string()
                } else {
                    result.stdout_trimmed().to_string()
                };
                checks.push(CheckResult::pass_with("python version", &version));
            }
            _ => checks.push(CheckResult::warn(
                "python version",
                "Interpreter did not report a version",
            )),
        }

        match Cmd::new(&python)
            .args(["-c", "import venv, ensurepip"])
            .allow_fail()
            .run()
        {
            Ok(result) if result.success() => {
                checks.push(CheckResult::pass_with("venv module", "importable"));
            }
            _ => checks.push(CheckResult::fail(
                "venv module",
                "Not available. Install the 'python3-venv' package.",
            )),
        }
    }

    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail() -> Result<()> {
    let report = run_preflight();
    report.print();

    if !report.all_passed() {
        bail!(
            "Preflight failed: {} check(s) failed. Fix the issues above before building.",
            report.fail_count()
        );
    }

    println!("All preflight checks passed!");
    Ok(())
}
