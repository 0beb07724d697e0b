//! Transform command handler: the single-page HTML API reference

use super::{load_tree, RunSummary};
use crate::cli::TransformArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use reflectdoc_core::{generate_api_page, load_report, merge_report, write_api_page, ApiPageOptions};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Handle the transform command
#[instrument(skip_all)]
pub fn handle_transform(args: TransformArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let infile = args.infile.unwrap_or_else(|| config.infile.clone());
    let timer = Timer::with_details("transform_command", &infile.display().to_string());
    let testfile = args.testfile.or_else(|| config.testfile.clone());
    let outfile = args.outfile.unwrap_or_else(|| PathBuf::from("."));

    output.info(&format!("Reading {}", infile.display()))?;
    let mut tree = load_tree(&infile)?;
    let mut summary = RunSummary::new("transform", &infile);

    if let Some(testfile) = &testfile {
        match load_report(testfile) {
            Some(report) => {
                let merged = merge_report(&mut tree, &report);
                info!(attached = merged.attached, unmatched = merged.unmatched.len(), "Merged test report");
                if !merged.unmatched.is_empty() {
                    output.warning(&format!(
                        "{} test report entries matched nothing: {}",
                        merged.unmatched.len(),
                        merged.unmatched.join(", ")
                    ))?;
                }
                summary.report_entries = Some(report.len());
                summary.unmatched = merged.unmatched;
            }
            None => output.warning(&format!(
                "Could not read {}, generating without test results",
                testfile.display()
            ))?,
        }
    }

    let html = generate_api_page(&tree, &ApiPageOptions::default())?;
    let written = write_api_page(&outfile, &html)?;
    output.success(&format!("✓ Wrote {}", written.display()))?;

    summary.written.push(written);
    summary.duration_ms = timer.elapsed().as_millis();
    output.data(&summary)
}
