//! File discovery for markup linting
//!
//! Walks the given paths and keeps the files matched by the configured
//! include globs and not matched by any exclude glob. Paths named
//! explicitly on the command line are always kept.

use crate::config::PadlintConfiguration;
use crate::{PadlintError, Result};
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Glob-based file discovery
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileDiscovery {
    /// Compile the include/exclude globs of `config`
    pub fn new(config: &PadlintConfiguration) -> Result<Self> {
        Ok(Self {
            include: compile(&config.include_patterns())?,
            exclude: compile(&config.exclude_patterns())?,
        })
    }

    /// Expand `paths` into the sorted, de-duplicated list of files to lint
    pub fn discover(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();

        for path in paths {
            if path.is_file() {
                files.insert(path.clone());
                continue;
            }
            if !path.is_dir() {
                return Err(PadlintError::discovery_error(format!(
                    "Path does not exist: {}",
                    path.display()
                )));
            }

            for entry in WalkDir::new(path).follow_links(false) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Skipping unreadable entry: {}", e);
                        continue;
                    }
                };
                if entry.file_type().is_file() && self.should_include(entry.path(), path) {
                    files.insert(entry.into_path());
                }
            }
        }

        debug!("Discovered {} file(s)", files.len());
        Ok(files.into_iter().collect())
    }

    /// Whether `path`, taken relative to `root`, passes the include and exclude globs
    fn should_include(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let matches = |patterns: &[Pattern]| {
            patterns
                .iter()
                .any(|p| p.matches_path_with(relative, MATCH_OPTIONS))
        };
        matches(&self.include) && !matches(&self.exclude)
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| {
                PadlintError::discovery_error(format!("Invalid glob pattern '{pattern}': {e}"))
            })
        })
        .collect()
}
