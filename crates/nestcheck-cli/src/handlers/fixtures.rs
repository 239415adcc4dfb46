//! `nestcheck fixtures`

use super::load_test_data;
use crate::commands::{FixturesArgs, StoreArg};
use crate::error::CliResult;
use crate::output::Reporter;
use nestcheck::ScenarioStore;

/// List scenario keys with their field names
pub fn execute(args: &FixturesArgs, out: &Reporter) -> CliResult<()> {
    let data = load_test_data(args.fixtures.as_deref())?;
    if matches!(args.store, StoreArg::Positive | StoreArg::All) {
        print_store(data.positive(), out);
    }
    if matches!(args.store, StoreArg::Negative | StoreArg::All) {
        print_store(data.negative(), out);
    }
    Ok(())
}

fn print_store(store: &ScenarioStore, out: &Reporter) {
    out.heading(&format!("{} ({} scenarios)", store.name(), store.len()));
    for key in store.keys() {
        let fields = store
            .get(key)
            .map(|record| record.field_names().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        out.info(&format!("  {key}: {fields}"));
    }
}
