//! Subcommand implementations

pub mod fixtures;
pub mod lint;
pub mod run;
pub mod steps;

use crate::error::CliResult;
use nestcheck::TestData;
use std::path::Path;

/// Test data from a fixtures directory, or the bundled fixtures
pub fn load_test_data(dir: Option<&Path>) -> CliResult<TestData> {
    Ok(match dir {
        Some(dir) => TestData::load_dir(dir)?,
        None => TestData::bundled()?,
    })
}
