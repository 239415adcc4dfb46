//! Named screenshot artifacts captured at fixed checkpoints.

use crate::result::CheckResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes screenshots into a directory, or discards them when disabled
#[derive(Debug, Clone, Default)]
pub struct ScreenshotSink {
    dir: Option<PathBuf>,
    sequence: u32,
}

impl ScreenshotSink {
    /// Sink writing into `dir` (created on first write)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            sequence: 0,
        }
    }

    /// Sink that discards every capture
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether captures are written anywhere
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// Target directory
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Number of files written so far
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.sequence
    }

    /// Store PNG bytes under `name`, returning the written path
    pub fn store(&mut self, name: &str, png: &[u8]) -> CheckResult<Option<PathBuf>> {
        let Some(dir) = &self.dir else {
            return Ok(None);
        };
        fs::create_dir_all(dir)?;
        self.sequence += 1;
        let stamp = chrono::Local::now().format("%Y%m%dT%H%M%S%3f");
        let path = dir.join(format!(
            "{:03}_{}_{stamp}.png",
            self.sequence,
            sanitize(name)
        ));
        fs::write(&path, png)?;
        Ok(Some(path))
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
