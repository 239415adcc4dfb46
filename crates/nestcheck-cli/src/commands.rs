//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Nestcheck: BDD checks for the pre-retirement savings calculator
#[derive(Parser, Debug)]
#[command(name = "nestcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run feature files against the calculator in Chromium
    Run(RunArgs),

    /// List the step vocabulary
    Steps(StepsArgs),

    /// List scenario keys in the test data stores
    Fixtures(FixturesArgs),

    /// Check feature files against the step vocabulary and test data
    Lint(LintArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Feature files to run
    #[arg(required = true)]
    pub features: Vec<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "NESTCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Calculator page address
    #[arg(long, env = "NESTCHECK_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory with positive.json and negative.json
    #[arg(long, env = "NESTCHECK_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Screenshot output directory
    #[arg(long, value_name = "DIR", env = "NESTCHECK_SCREENSHOTS")]
    pub screenshots: Option<PathBuf>,

    /// Do not capture screenshots
    #[arg(long, conflicts_with = "screenshots")]
    pub no_screenshots: bool,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Disable the Chromium sandbox (containers)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Chromium executable
    #[arg(long, env = "NESTCHECK_CHROMIUM")]
    pub chromium: Option<PathBuf>,

    /// Implicit wait per element action, in milliseconds
    #[arg(long, value_name = "MS", env = "NESTCHECK_TIMEOUT_MS")]
    pub timeout: Option<u64>,

    /// Stop after the first failed scenario
    #[arg(long)]
    pub fail_fast: bool,

    /// Only run scenarios with this tag (repeatable)
    #[arg(short, long)]
    pub tag: Vec<String>,

    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Write a JSON report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Arguments for the steps command
#[derive(Parser, Debug)]
pub struct StepsArgs {
    /// Also print the regular expression behind each step
    #[arg(long)]
    pub patterns: bool,
}

/// Arguments for the fixtures command
#[derive(Parser, Debug)]
pub struct FixturesArgs {
    /// Directory with positive.json and negative.json (bundled data if omitted)
    #[arg(long, env = "NESTCHECK_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Store to list
    #[arg(long, default_value = "all")]
    pub store: StoreArg,
}

/// Arguments for the lint command
#[derive(Parser, Debug)]
pub struct LintArgs {
    /// Feature files to check
    #[arg(required = true)]
    pub features: Vec<PathBuf>,

    /// Directory with positive.json and negative.json (bundled data if omitted)
    #[arg(long, env = "NESTCHECK_FIXTURES")]
    pub fixtures: Option<PathBuf>,
}

/// Test-data store selector
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreArg {
    /// Form inputs
    Positive,
    /// Expected validation outcomes
    Negative,
    /// Both stores
    #[default]
    All,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
