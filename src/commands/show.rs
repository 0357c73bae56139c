//! Show command - displays information.

use anyhow::Result;

use crate::config::Config;
use crate::venv;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show resolved configuration
    Config,
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => {
            config.print();
            match venv::find_python() {
                Ok(path) => println!("  Python: {}", path.display()),
                Err(_) => println!("  Python: NOT FOUND (run 'lampack preflight' for details)"),
            }
        }
    }
    Ok(())
}
