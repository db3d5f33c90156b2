use crate::constants::{DEFAULT_DIRECTORY_FILE, DEFAULT_OUTPUT_FILE};
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "EXHIBIT_SCRAPER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub output: OutputConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Several of the sites serve incomplete certificate chains
    pub accept_invalid_certs: bool,
    /// Pause between detail-page requests to the same site
    pub request_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 20,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36".to_string(),
            accept_invalid_certs: true,
            request_delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// Settings for the Places-based museum directory
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub path: PathBuf,
    pub language_code: String,
    /// Results per search page (the API allows at most 20)
    pub page_size: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DIRECTORY_FILE),
            language_code: "zh-TW".to_string(),
            page_size: 20,
        }
    }
}

impl Config {
    /// Load from an explicit path, `$EXHIBIT_SCRAPER_CONFIG`, or `config.toml`.
    /// A missing file means defaults; an unreadable or malformed one is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(ScraperError::Config(format!(
                    "Config file '{}' does not exist",
                    path.display()
                )));
            }
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&config_content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.http.timeout_seconds == 0 {
            return Err(ScraperError::Config("http.timeout_seconds must be positive".into()));
        }
        if !(1..=20).contains(&config.directory.page_size) {
            return Err(ScraperError::Config("directory.page_size must be between 1 and 20".into()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.http.timeout_seconds, 20);
        assert!(config.http.accept_invalid_certs);
        assert_eq!(config.output.path, PathBuf::from(DEFAULT_OUTPUT_FILE));
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [http]
            request_delay_ms = 250

            [output]
            path = "out/report.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.http.request_delay_ms, 250);
        assert_eq!(config.http.timeout_seconds, 20);
        assert_eq!(config.output.path, PathBuf::from("out/report.json"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_toml("[http]\ntimeout_seconds = 0").unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }

    #[test]
    fn test_directory_section() {
        let config = Config::from_toml("[directory]\nlanguage_code = \"en\"").unwrap();
        assert_eq!(config.directory.language_code, "en");
        assert_eq!(config.directory.page_size, 20);
        assert_eq!(config.directory.path, PathBuf::from(DEFAULT_DIRECTORY_FILE));

        let err = Config::from_toml("[directory]\npage_size = 50").unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let err = Config::from_toml("[http\n").unwrap_err();
        assert!(matches!(err, ScraperError::Toml(_)));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\ntimeout_seconds = 5").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.http.timeout_seconds, 5);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(ScraperError::Config(_))));
    }
}
