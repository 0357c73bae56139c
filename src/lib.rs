//! Lampack library exports.
//!
//! The binary is a thin CLI over these modules; they are public so the
//! integration tests can drive the pipeline directly.

pub mod archive;
pub mod assemble;
pub mod commands;
pub mod config;
pub mod install;
pub mod pipeline;
pub mod preflight;
pub mod process;
pub mod venv;
