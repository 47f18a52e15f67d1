//! Configuration file support for passport-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/passport-qa/config.toml` (lowest priority)
//! - Project-local: `.passport-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Country spec store settings.
    pub store: StoreConfig,
    /// Remote content assessor settings.
    pub assessor: AssessorConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// HTTP server configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. `127.0.0.1` or `0.0.0.0`.
    pub bind: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: Option<usize>,
}

/// Spec store configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON seed file; the bundled seed is used when unset.
    pub seed: Option<PathBuf>,
}

/// Remote content assessor configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AssessorConfig {
    /// Enable/disable remote assessment.
    pub enabled: Option<bool>,
    /// Gemini API root.
    pub base_url: Option<String>,
    /// Gemini model name.
    pub model: Option<String>,
    /// Per-photo timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/passport-qa/config.toml`
    /// 2. Project-local: `.passport-qa.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if self.server.port == Some(0) {
            return Err("server.port must be between 1 and 65535".to_string());
        }
        if self.server.max_upload_bytes == Some(0) {
            return Err("server.max_upload_bytes must be positive".to_string());
        }
        if self.assessor.timeout_secs == Some(0) {
            return Err("assessor.timeout_secs must be positive".to_string());
        }

        if let Some(ref url) = self.assessor.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!(
                    "assessor.base_url must start with http:// or https://, got '{url}'"
                ));
            }
        }
        if let Some(ref var) = self.assessor.api_key_env {
            if var.trim().is_empty() {
                return Err("assessor.api_key_env must not be empty".to_string());
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Server
        self.server.bind = other.server.bind.or_else(|| self.server.bind.take());
        self.server.port = other.server.port.or(self.server.port);
        self.server.max_upload_bytes = other
            .server
            .max_upload_bytes
            .or(self.server.max_upload_bytes);

        // Store
        self.store.seed = other.store.seed.or_else(|| self.store.seed.take());

        // Assessor
        self.assessor.enabled = other.assessor.enabled.or(self.assessor.enabled);
        self.assessor.base_url = other
            .assessor
            .base_url
            .or_else(|| self.assessor.base_url.take());
        self.assessor.model = other.assessor.model.or_else(|| self.assessor.model.take());
        self.assessor.timeout_secs = other.assessor.timeout_secs.or(self.assessor.timeout_secs);
        self.assessor.api_key_env = other
            .assessor
            .api_key_env
            .or_else(|| self.assessor.api_key_env.take());

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("passport-qa").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.passport-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".passport-qa.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.server.port.is_none());
        assert!(config.store.seed.is_none());
        assert!(config.assessor.enabled.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[server]
bind = '0.0.0.0'
port = 8080
max_upload_bytes = 5242880

[store]
seed = '/etc/passport-qa/countries.json'

[assessor]
enabled = true
base_url = 'http://localhost:9000/v1beta'
model = 'gemini-1.5-pro'
timeout_secs = 15
api_key_env = 'MY_GEMINI_KEY'

[output]
format = 'json'
pretty = true
progress = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.server.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.server.port, Some(8080));
        assert_eq!(config.server.max_upload_bytes, Some(5_242_880));
        assert_eq!(
            config.store.seed,
            Some(PathBuf::from("/etc/passport-qa/countries.json"))
        );
        assert_eq!(config.assessor.enabled, Some(true));
        assert_eq!(config.assessor.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(config.assessor.timeout_secs, Some(15));
        assert_eq!(config.assessor.api_key_env.as_deref(), Some("MY_GEMINI_KEY"));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.pretty, Some(true));
        assert!(config.validate().is_ok());
    }

    // === Config Merge Priority Tests ===

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[server]
port = 4000
bind = '127.0.0.1'

[assessor]
timeout_secs = 30
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[server]
port = 5000

[output]
format = 'json'
",
        )
        .expect("parse override");

        base.merge(override_config);

        // Port overridden
        assert_eq!(base.server.port, Some(5000));
        // Bind and assessor preserved from base
        assert_eq!(base.server.bind.as_deref(), Some("127.0.0.1"));
        assert_eq!(base.assessor.timeout_secs, Some(30));
        // Output added from override
        assert_eq!(base.output.format, Some("json".to_string()));
    }

    #[test]
    fn test_merge_all_sections() {
        let mut base: AppConfig = toml::from_str(
            r"
[server]
max_upload_bytes = 1024

[store]
seed = 'a.json'

[assessor]
enabled = true

[output]
format = 'json'
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[server]
max_upload_bytes = 2048

[store]
seed = 'b.json'

[assessor]
enabled = false

[output]
format = 'jsonl'
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.server.max_upload_bytes, Some(2048));
        assert_eq!(base.store.seed, Some(PathBuf::from("b.json")));
        assert_eq!(base.assessor.enabled, Some(false));
        assert_eq!(base.output.format, Some("jsonl".to_string()));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[assessor]
model = 'gemini-2.0-flash'
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.assessor.model.as_deref(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn test_merge_empty_base_accepts_override() {
        let mut base = AppConfig::default();

        let override_config: AppConfig = toml::from_str(
            r"
[store]
seed = 'countries.json'
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.store.seed, Some(PathBuf::from("countries.json")));
    }

    // === Invalid TOML Graceful Fallback ===

    #[test]
    fn test_invalid_toml_syntax_handled() {
        let toml = r"
[server
port = 4000
";
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "invalid TOML should return error");
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let toml = r#"
[server]
port = "four thousand"
"#;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "type mismatch should return error");
    }

    #[test]
    fn test_unknown_field_in_known_section() {
        let toml = r"
[server]
port = 4000
workers = 8
";
        let config: AppConfig = toml::from_str(toml).expect("unknown fields are ignored");
        assert_eq!(config.server.port, Some(4000));
    }

    #[test]
    fn test_find_config_in_parents() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".passport-qa.toml"), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, root.path().join(".passport-qa.toml"));
    }

    // === Validation Tests ===

    #[test]
    fn test_validate_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = Some(0);
        assert!(config.validate().unwrap_err().contains("server.port"));
    }

    #[test]
    fn test_validate_zero_upload_limit() {
        let mut config = AppConfig::default();
        config.server.max_upload_bytes = Some(0);
        assert!(config
            .validate()
            .unwrap_err()
            .contains("server.max_upload_bytes"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = AppConfig::default();
        config.assessor.timeout_secs = Some(0);
        assert!(config
            .validate()
            .unwrap_err()
            .contains("assessor.timeout_secs"));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = AppConfig::default();
        config.assessor.base_url = Some("generativelanguage.googleapis.com".to_string());
        assert!(config.validate().unwrap_err().contains("assessor.base_url"));
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());
        assert!(config.validate().unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
