//! `nestcheck steps`

use crate::commands::StepsArgs;
use crate::error::CliResult;
use crate::output::Reporter;
use nestcheck::StepRegistry;

/// Print the step vocabulary
pub fn execute(args: &StepsArgs, out: &Reporter) -> CliResult<()> {
    let registry = StepRegistry::calculator()?;
    out.heading(&format!("{} step bindings", registry.len()));
    for (pattern, kind) in registry.patterns() {
        out.info(&format!("  {}", kind.template()));
        if args.patterns {
            out.info(&format!("      {pattern}"));
        }
    }
    Ok(())
}
