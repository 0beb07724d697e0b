//! Writing generated documents to disk
//!
//! Every output file is written once and independently of the others. A
//! failed markdown page is logged and counted; the remaining pages are still
//! written.

use crate::error::{Error, Result};
use crate::markdown::{DocumentSet, MarkdownOptions, Template};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the navigation page
pub const NAVIGATION_PAGE: &str = "docs.html";

/// File name used when the API page target is a directory
pub const API_PAGE: &str = "api.html";

/// Outcome of writing the markdown site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl WriteSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write `<key>.md` for every document plus the navigation page into `dir`,
/// creating it when absent
pub fn write_markdown_site(
    dir: &Path,
    documents: &DocumentSet,
    options: &MarkdownOptions,
) -> Result<WriteSummary> {
    fs::create_dir_all(dir).map_err(|source| Error::Output {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut summary = WriteSummary::default();
    for (key, body) in documents.iter() {
        let path = dir.join(format!("{}.md", key));
        let content = format!("{}{}", Template::page_header(key), body);
        record(&mut summary, path, &content);
    }

    let navigation = Template::navigation_page(documents.keys(), &options.link_prefix);
    record(&mut summary, dir.join(NAVIGATION_PAGE), &navigation);

    tracing::info!(
        dir = %dir.display(),
        written = summary.written.len(),
        failed = summary.failed.len(),
        "Wrote markdown documentation"
    );
    Ok(summary)
}

fn record(summary: &mut WriteSummary, path: PathBuf, content: &str) {
    match fs::write(&path, content) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote page");
            summary.written.push(path);
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to write page");
            summary.failed.push(path);
        }
    }
}

/// Write the API page to `path`, or to `path/api.html` when `path` is an
/// existing directory. Returns the file actually written.
pub fn write_api_page(path: &Path, html: &str) -> Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(API_PAGE)
    } else {
        path.to_path_buf()
    };

    fs::write(&target, html).map_err(|source| Error::Output {
        path: target.clone(),
        source,
    })?;
    tracing::info!(path = %target.display(), bytes = html.len(), "Wrote API page");
    Ok(target)
}
