//! Nestcheck CLI
//!
//! ## Usage
//!
//! ```bash
//! nestcheck run features/pre_retirement_calculator.feature   # Run in Chromium
//! nestcheck run calc.feature --tag smoke --headed             # Watch one scenario
//! nestcheck lint features/*.feature                           # Check steps and data
//! nestcheck steps                                             # Step vocabulary
//! nestcheck fixtures --store negative                         # Scenario keys
//! ```

use clap::Parser;
use nestcheck_cli::{
    handlers, init_tracing, Cli, CliConfig, CliResult, ColorChoice, Commands, Reporter, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(&config);

    let use_color = config.color.should_color();
    console::set_colors_enabled(use_color);
    let out = Reporter::new(use_color, config.verbosity.is_quiet());

    match cli.command {
        Commands::Run(args) => handlers::run::execute(&args, &out),
        Commands::Steps(args) => handlers::steps::execute(&args, &out),
        Commands::Fixtures(args) => handlers::fixtures::execute(&args, &out),
        Commands::Lint(args) => handlers::lint::execute(&args, &out),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(color)
        .with_log_json(cli.log_json)
}
