//! Configuration file discovery and loading

use super::PadlintConfiguration;
use crate::{PadlintError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names searched in each directory, in priority order
pub const CONFIG_FILE_NAMES: [&str; 3] = [".padlintrc.json", ".padlintrc.jsonc", "padlint.json"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by walking upward from `start_path`
    ///
    /// Stops at the first directory holding one of [`CONFIG_FILE_NAMES`] or
    /// at the filesystem root.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let start = start_path
            .canonicalize()
            .map_err(|e| PadlintError::config_error(format!("Invalid path: {e}")))?;
        let start = if start.is_file() {
            start.parent().map(Path::to_path_buf).unwrap_or(start)
        } else {
            start
        };

        for dir in start.ancestors() {
            for filename in CONFIG_FILE_NAMES {
                let candidate = dir.join(filename);
                if candidate.is_file() {
                    tracing::debug!("Found config: {}", candidate.display());
                    return Ok(Some(candidate));
                }
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<PadlintConfiguration> {
        let text = fs::read_to_string(path).map_err(|e| PadlintError::io_error(path, e))?;
        PadlintConfiguration::parse(&text).map_err(|e| {
            PadlintError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load config from an explicit path or auto-discover one
    ///
    /// Returns the configuration together with the file it came from.
    /// Without an explicit path and with nothing discovered, defaults apply.
    pub fn load(
        custom_path: Option<&Path>,
        start_dir: Option<&Path>,
    ) -> Result<(PadlintConfiguration, Option<PathBuf>)> {
        if let Some(path) = custom_path {
            if !path.is_file() {
                return Err(PadlintError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok((Self::load_from_file(path)?, Some(path.to_path_buf())));
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Ok((Self::load_from_file(&path)?, Some(path))),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok((PadlintConfiguration::default(), None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).expect("write config");
        path
    }

    #[test]
    fn test_load_from_file_jsonc() {
        let temp_dir = TempDir::new().expect("tempdir");
        let path = write_config(
            temp_dir.path(),
            ".padlintrc.jsonc",
            r#"{
                // trailing commas allowed
                "linter": { "enabled": false, },
            }"#,
        );

        let config = ConfigLoader::load_from_file(&path).expect("load");
        assert!(!config.is_linter_enabled());
    }

    #[test]
    fn test_auto_discover_walks_up() {
        let temp_dir = TempDir::new().expect("tempdir");
        let nested = temp_dir.path().join("src/components");
        fs::create_dir_all(&nested).expect("mkdir");
        write_config(temp_dir.path(), "padlint.json", "{}");

        let found = ConfigLoader::auto_discover(&nested).expect("discover");
        assert_eq!(
            found.and_then(|p| p.file_name().map(|n| n.to_owned())),
            Some("padlint.json".into())
        );
    }

    #[test]
    fn test_dotfile_wins_over_plain_name() {
        let temp_dir = TempDir::new().expect("tempdir");
        write_config(temp_dir.path(), "padlint.json", "{}");
        write_config(temp_dir.path(), ".padlintrc.json", "{}");

        let found = ConfigLoader::auto_discover(temp_dir.path())
            .expect("discover")
            .expect("found");
        assert!(found.ends_with(".padlintrc.json"));
    }

    #[test]
    fn test_load_without_config_uses_defaults() {
        let temp_dir = TempDir::new().expect("tempdir");
        let (config, path) = ConfigLoader::load(None, Some(temp_dir.path())).expect("load");
        // A config above the temp dir would be picked up; only check it parsed.
        if path.is_none() {
            assert_eq!(config, PadlintConfiguration::default());
        }
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = ConfigLoader::load(Some(Path::new("missing/.padlintrc.json")), None).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp_dir = TempDir::new().expect("tempdir");
        let path = write_config(temp_dir.path(), "padlint.json", "{ linter: [ }");
        let err = ConfigLoader::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("padlint.json"));
    }
}
