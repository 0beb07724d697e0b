//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Reflectdoc - API documentation from a reflection tree
///
/// Reads the JSON reflection tree of a TypeScript API, optionally annotated
/// with a per-member test report, and writes either one markdown page per
/// type or a single HTML API reference page.
#[derive(Parser, Debug)]
#[command(
    name = "reflectdoc",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "REFLECTDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for the run summary
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the single-page HTML API reference
    Transform(TransformArgs),

    /// Generate one markdown page per class and interface plus docs.html
    Render(RenderArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Reflection JSON produced by the documentation tool [default: type-info.json]
    #[arg(short, long, value_name = "FILE")]
    pub infile: Option<PathBuf>,

    /// Test report to merge; omit to generate without test results
    #[arg(short, long, value_name = "FILE")]
    pub testfile: Option<PathBuf>,

    /// Output file, or a directory to write api.html into [default: .]
    #[arg(long, value_name = "PATH")]
    pub outfile: Option<PathBuf>,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Reflection JSON produced by the documentation tool [default: type-info.json]
    #[arg(long, value_name = "FILE")]
    pub infile: Option<PathBuf>,

    /// Test report used for badges [default: test-report.json]
    #[arg(long, value_name = "FILE")]
    pub testfile: Option<PathBuf>,

    /// Directory the markdown pages are written to [default: docs]
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Namespace prefixed to report keys
    #[arg(long)]
    pub namespace: Option<String>,

    /// Prefix of the links on the navigation page
    #[arg(long)]
    pub link_prefix: Option<String>,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
