//! Command handlers for CLI subcommands

pub mod completions;
pub mod render;
pub mod transform;

pub use completions::handle_completions;
pub use render::handle_render;
pub use transform::handle_transform;

use crate::error::{Error, Result};
use reflectdoc_core::{load_reflection, ReflectionNode};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a generation command did, printed for `--output json|yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub command: String,
    pub infile: PathBuf,
    /// Entries in the test report, when one was loaded
    pub report_entries: Option<usize>,
    /// Report keys that matched nothing in the tree
    pub unmatched: Vec<String>,
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub duration_ms: u128,
}

impl RunSummary {
    pub fn new(command: &str, infile: &Path) -> Self {
        Self {
            command: command.to_string(),
            infile: infile.to_path_buf(),
            ..Self::default()
        }
    }
}

/// Load the primary input; a missing file is reported as such rather than
/// as a read error
pub(crate) fn load_tree(infile: &Path) -> Result<ReflectionNode> {
    if !infile.exists() {
        tracing::error!(path = %infile.display(), "Reflection input not found");
        return Err(Error::FileNotFound {
            path: infile.to_path_buf(),
        });
    }
    Ok(load_reflection(infile)?)
}
