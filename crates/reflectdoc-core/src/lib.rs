//! Reflectdoc Core - API documentation generation from a type-reflection tree
//!
//! This crate reads the JSON reflection tree emitted by a TypeScript
//! documentation tool, optionally annotates it with a per-member test report,
//! and renders reference documentation in two formats.
//!
//! # Main Components
//!
//! - **Reflection Model**: Typed view of the reflection JSON ([`reflection`])
//! - **Test Reports**: Loading, merging and colour banding of results ([`report`])
//! - **Structural Queries**: Selector/predicate matching over the tree ([`query`])
//! - **Transform Engine**: Rule-based generation of a single HTML API page ([`transform`])
//! - **Markdown Renderer**: One markdown page per class and interface ([`markdown`])
//! - **Site Output**: Fail-soft writing of the generated files ([`site`])
//! - **Message Bus**: The window pub/sub contract documented by the API ([`bus`])
//!
//! # Example
//!
//! ```no_run
//! use reflectdoc_core::{generate_api_page, load_reflection, load_report, merge_report, ApiPageOptions, Result};
//! use std::path::Path;
//!
//! fn example() -> Result<()> {
//!     let mut tree = load_reflection(Path::new("type-info.json"))?;
//!     if let Some(report) = load_report(Path::new("test-report.json")) {
//!         merge_report(&mut tree, &report);
//!     }
//!     let page = generate_api_page(&tree, &ApiPageOptions::default())?;
//!     println!("{}", page);
//!     Ok(())
//! }
//! ```

pub mod bus;
pub mod error;
pub mod markdown;
pub mod query;
pub mod reflection;
pub mod report;
pub mod site;
pub mod transform;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use markdown::{DocumentSet, MarkdownOptions, MarkdownRenderer};
pub use reflection::{load_reflection, parse_reflection, Kind, ReflectionNode, Type};
pub use report::{
    load_report, merge_report, BadgeColor, Environment, EnvironmentResults, MergeSummary,
    TestReport, TestResult, TestResults,
};
pub use site::{write_api_page, write_markdown_site, WriteSummary};
pub use transform::{documented_types, generate_api_page, ApiPageOptions, DocumentedType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_types() {
        let err = Error::transform("no rule matched", Some("entry"));
        assert!(err.to_string().contains("no rule matched"));
    }
}
