// src/config.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "ai-master.yml";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_THINKING_BUDGET: u32 = 1024;

/// Runtime configuration.
///
/// Loaded from an optional YAML file, then overridden by environment
/// variables. The API key is only ever taken from the environment and is
/// never written back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Thinking budget for the code analysis call.
    pub thinking_budget: u32,
    /// `None` means requests never time out.
    pub request_timeout_secs: Option<u64>,
    pub download_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            thinking_budget: DEFAULT_THINKING_BUDGET,
            request_timeout_secs: None,
            download_dir: PathBuf::from("./downloads"),
            log_dir: PathBuf::from("./logs"),
        }
    }
}

impl Config {
    /// Reads `AI_MASTER_CONFIG` (or `ai-master.yml` in the working directory)
    /// when present and applies the process environment on top.
    pub fn load() -> Result<Self> {
        let path = std::env::var("AI_MASTER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_empty("AI_MASTER_MODEL") {
            self.model = model;
        }
        if let Some(dir) = non_empty("AI_MASTER_DOWNLOAD_DIR") {
            self.download_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty("AI_MASTER_LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.thinking_budget, 1024);
        assert!(config.request_timeout_secs.is_none());
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
model: "gemini-2.5-pro"
thinking_budget: 2048
download_dir: "/tmp/notes"
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.thinking_budget, 2048);
        assert_eq!(config.download_dir, PathBuf::from("/tmp/notes"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_api_key_is_never_read_from_yaml() {
        let yaml = "api_key: \"leaked\"\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("GEMINI_API_KEY", "secret"),
            ("AI_MASTER_MODEL", "gemini-test"),
            ("AI_MASTER_LOG_DIR", "/var/log/ai-master"),
        ]);

        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).cloned());

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/ai-master"));
    }

    #[test]
    fn test_api_key_takes_precedence_and_blank_is_ignored() {
        let vars = env(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "fallback")]);
        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).cloned());
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let blank = env(&[("API_KEY", "   ")]);
        let mut config = Config::default();
        config.apply_env(|key| blank.get(key).cloned());
        assert!(config.api_key.is_none());
    }
}
