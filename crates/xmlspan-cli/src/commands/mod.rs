//! Command implementations for the xmlspan CLI.

pub mod locate;
pub mod spans;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read `path` as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
