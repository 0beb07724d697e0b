//! Render command handler: one markdown page per type plus docs.html

use super::{load_tree, RunSummary};
use crate::cli::RenderArgs;
use crate::config::{Config, DEFAULT_TESTFILE};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use reflectdoc_core::{load_report, write_markdown_site, MarkdownRenderer};
use std::path::PathBuf;
use tracing::instrument;

/// Handle the render command
#[instrument(skip_all)]
pub fn handle_render(args: RenderArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let infile = args.infile.unwrap_or_else(|| config.infile.clone());
    let timer = Timer::with_details("render_command", &infile.display().to_string());
    let testfile = args
        .testfile
        .or_else(|| config.testfile.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TESTFILE));
    let out_dir = args.out_dir.unwrap_or_else(|| config.docs_dir.clone());
    if out_dir.is_file() {
        return Err(Error::invalid_args(format!(
            "--out-dir {} is a file",
            out_dir.display()
        )));
    }

    output.info(&format!("Reading {}", infile.display()))?;
    let tree = load_tree(&infile)?;
    let mut summary = RunSummary::new("render", &infile);

    let report = load_report(&testfile);
    match &report {
        Some(report) => summary.report_entries = Some(report.len()),
        None => output.warning(&format!(
            "Could not read {}, badges will show no test data",
            testfile.display()
        ))?,
    }

    let options = config.markdown_options(args.namespace.as_deref(), args.link_prefix.as_deref());
    let renderer = match &report {
        Some(report) => MarkdownRenderer::new(options.clone()).with_report(report),
        None => MarkdownRenderer::new(options.clone()),
    };
    let documents = renderer.render(&tree);
    let written = write_markdown_site(&out_dir, &documents, &options)?;

    let total = written.written.len() + written.failed.len();
    summary.written = written.written;
    summary.failed = written.failed;
    summary.duration_ms = timer.elapsed().as_millis();

    if summary.failed.is_empty() {
        output.success(&format!("✓ Wrote {} files to {}", total, out_dir.display()))?;
    } else {
        for path in &summary.failed {
            output.warning(&format!("Could not write {}", path.display()))?;
        }
    }
    output.data(&summary)?;

    match summary.failed.len() {
        0 => Ok(()),
        failed => Err(Error::PartialOutput { failed, total }),
    }
}
