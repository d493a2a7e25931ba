use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// File name looked up in the current directory when no path is given
pub const CONFIG_FILE_NAME: &str = "organ.toml";

/// Error type for loading organ.toml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Load configuration from `explicit`, or from organ.toml in `dir`.
///
/// A missing organ.toml gives the defaults. A missing explicit path is an
/// error.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = dir.join(CONFIG_FILE_NAME);
            if !path.exists() {
                log::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
                return Ok(Config::default());
            }
            path
        }
    };

    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    parse_config(&text)
}

pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r#"[keywords]
default = ["TODO", "NEXT", "|", "DONE", "CANCELLED"]

[output]
json = true

[table]
min_column_width = 3
"#
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(sample_config()).unwrap();
        assert!(config.output.json);
        assert_eq!(config.table.min_column_width, 3);
        let set = config.keywords.default_set();
        assert_eq!(set.keywords, vec!["TODO", "NEXT", "DONE", "CANCELLED"]);
        assert_eq!(set.completed_keywords, vec!["DONE", "CANCELLED"]);
        assert!(set.default);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("[output]\njson = true\n").unwrap();
        assert_eq!(config.table.min_column_width, 1);
        assert_eq!(config.keywords.default_set().keywords, vec!["TODO", "DONE"]);
    }

    #[test]
    fn test_load_from_directory() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert!(!config.output.json);

        fs::write(tmp.path().join(CONFIG_FILE_NAME), sample_config()).unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert!(config.output.json);
    }

    #[test]
    fn test_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(matches!(
            load_config(Some(&missing), tmp.path()),
            Err(ConfigError::ReadError { .. })
        ));
        assert!(matches!(
            parse_config("[table]\nmin_column_width = \"wide\"\n"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
