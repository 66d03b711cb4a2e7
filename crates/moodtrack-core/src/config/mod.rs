use crate::error::{MoodError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Path of the monthly recommendation endpoint, relative to `base_url`.
    #[serde(default = "default_recommendation_path")]
    pub recommendation_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            recommendation_path: default_recommendation_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Custom path for the session file. Defaults to `~/.config/moodtrack/session.json`.
    #[serde(default)]
    pub path: Option<String>,
}

impl SessionConfig {
    pub fn resolve_path(&self) -> Option<PathBuf> {
        match self.path {
            Some(ref p) if !p.trim().is_empty() => Some(PathBuf::from(p)),
            _ => default_session_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Clear the stored session when the server answers 401.
    #[serde(default = "default_true")]
    pub logout_on_unauthorized: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            logout_on_unauthorized: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_splash_ms")]
    pub splash_ms: u64,
    /// How long error toasts stay up, in 50ms ticks.
    #[serde(default = "default_toast_ticks")]
    pub toast_ticks: u8,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            splash_ms: default_splash_ms(),
            toast_ticks: default_toast_ticks(),
        }
    }
}

// -- Defaults --

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_recommendation_path() -> String {
    "/report/recommendation".to_string()
}
fn default_true() -> bool {
    true
}
fn default_splash_ms() -> u64 {
    800
}
fn default_toast_ticks() -> u8 {
    100
}

impl MoodConfig {
    /// Load configuration with layered merge:
    /// 1. ~/.config/moodtrack/config.toml (global)
    /// 2. .moodtrack/config.toml (project)
    /// 3. .moodtrack/config.local.toml (local, gitignored)
    /// 4. MOODTRACK__SECTION__KEY environment variables
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(".moodtrack").join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join(".moodtrack").join("config.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("MOODTRACK")
                .prefix_separator("__")
                .separator("__"),
        );

        let config = builder
            .build()
            .map_err(|e| MoodError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| MoodError::Config(e.to_string()))?;

        cfg.validate();
        Ok(cfg)
    }

    /// Defaults only (no files, no environment).
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            auth: AuthConfig::default(),
            tui: TuiConfig::default(),
        }
    }

    /// Fix out-of-range values in place and log what was changed.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.api.timeout_secs == 0 {
            warnings.push("api.timeout_secs = 0, setting to 1".to_string());
            self.api.timeout_secs = 1;
        }

        let trimmed = self.api.base_url.trim().trim_end_matches('/').to_string();
        if trimmed != self.api.base_url {
            warnings.push(format!(
                "api.base_url '{}' normalized to '{trimmed}'",
                self.api.base_url
            ));
            self.api.base_url = trimmed;
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            warnings.push(format!(
                "api.base_url '{}' has no http(s) scheme; requests will fail",
                self.api.base_url
            ));
        }

        if !self.api.recommendation_path.starts_with('/') {
            let fixed = format!("/{}", self.api.recommendation_path);
            warnings.push(format!(
                "api.recommendation_path '{}' normalized to '{fixed}'",
                self.api.recommendation_path
            ));
            self.api.recommendation_path = fixed;
        }

        if self.tui.toast_ticks == 0 {
            warnings.push("tui.toast_ticks = 0, setting to 1".to_string());
            self.tui.toast_ticks = 1;
        }

        for w in &warnings {
            tracing::warn!("config: {}", w);
        }

        warnings
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("moodtrack").join("config.toml"))
}

fn default_session_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("moodtrack").join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MoodConfig::default_config();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.recommendation_path, "/report/recommendation");
        assert!(config.auth.logout_on_unauthorized);
        assert!(config.session.path.is_none());
        assert_eq!(config.tui.toast_ticks, 100);
    }

    #[test]
    fn test_load_config_no_files() {
        let config = MoodConfig::load(Some(Path::new("/nonexistent/path"))).unwrap();
        assert!(config.api.timeout_secs >= 1);
        assert!(!config.api.base_url.ends_with('/'));
    }

    #[test]
    fn test_load_project_config() {
        let dir = std::env::temp_dir().join(format!("moodtrack-config-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(dir.join(".moodtrack")).unwrap();
        std::fs::write(
            dir.join(".moodtrack").join("config.toml"),
            "[api]\nbase_url = \"http://10.0.2.2:8080/api/\"\ntimeout_secs = 3\n",
        )
        .unwrap();
        std::fs::write(
            dir.join(".moodtrack").join("config.local.toml"),
            "[api]\ntimeout_secs = 7\n",
        )
        .unwrap();

        let config = MoodConfig::load(Some(&dir)).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.2.2:8080/api");
        assert_eq!(config.api.timeout_secs, 7);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = MoodConfig::default_config();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: MoodConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.api.timeout_secs, config.api.timeout_secs);
    }

    #[test]
    fn test_partial_config_backward_compat() {
        let toml_str = r#"
[api]
base_url = "https://mood.example.com/api"
"#;
        let config: MoodConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.auth.logout_on_unauthorized);
        assert_eq!(config.tui.splash_ms, 800);
    }

    #[test]
    fn test_validate_fixes_values() {
        let mut config = MoodConfig::default_config();
        config.api.timeout_secs = 0;
        config.api.base_url = "http://host/api/".into();
        config.api.recommendation_path = "recommendation".into();
        config.tui.toast_ticks = 0;

        let warnings = config.validate();
        assert_eq!(warnings.len(), 4);
        assert_eq!(config.api.timeout_secs, 1);
        assert_eq!(config.api.base_url, "http://host/api");
        assert_eq!(config.api.recommendation_path, "/recommendation");
        assert_eq!(config.tui.toast_ticks, 1);
    }

    #[test]
    fn test_validate_warns_on_missing_scheme() {
        let mut config = MoodConfig::default_config();
        config.api.base_url = "localhost:8080/api".into();
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("scheme"));
    }

    #[test]
    fn test_session_path_resolution() {
        let config = SessionConfig {
            path: Some("/tmp/mt/session.json".into()),
        };
        assert_eq!(
            config.resolve_path(),
            Some(PathBuf::from("/tmp/mt/session.json"))
        );

        let config = SessionConfig {
            path: Some("  ".into()),
        };
        assert_eq!(config.resolve_path(), default_session_path());
    }
}
