use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_connector_id() -> String {
    "tg_main".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_connector_id")]
    pub connector_id: String,
    /// Bot token; supports `${ENV_VAR}` placeholders.
    pub token: String,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; supports `${ENV_VAR}` placeholders.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoireeConfig {
    pub telegram: TelegramConfig,
    pub provider: ProviderConfig,
}

pub fn load_config(path: &Path) -> Result<SoireeConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config: SoireeConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    config.telegram.token = resolve_env_var(&config.telegram.token);
    config.provider.api_key = resolve_env_var(&config.provider.api_key);
    Ok(config)
}

/// Expand `${VAR}` placeholders from the environment; unknown variables
/// expand to the empty string.
pub fn resolve_env_var(raw: &str) -> String {
    let mut output = String::new();
    let mut rest = raw;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);

        let candidate = &rest[start + 2..];
        let Some(end) = candidate.find('}') else {
            output.push_str(&rest[start..]);
            return output;
        };

        let key = &candidate[..end];
        output.push_str(&std::env::var(key).unwrap_or_default());
        rest = &candidate[end + 1..];
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_var_replaces_placeholder() {
        let expected = std::env::var("PATH").unwrap();
        assert_eq!(resolve_env_var("${PATH}"), expected);
    }

    #[test]
    fn resolve_env_var_returns_raw_when_not_placeholder() {
        assert_eq!(resolve_env_var("plain-token"), "plain-token");
    }

    #[test]
    fn resolve_env_var_unknown_expands_empty() {
        assert_eq!(resolve_env_var("${SOIREE_DOES_NOT_EXIST_42}"), "");
    }

    #[test]
    fn resolve_env_var_unterminated_is_kept() {
        assert_eq!(resolve_env_var("${UNCLOSED"), "${UNCLOSED");
    }

    #[test]
    fn load_config_applies_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "telegram:\n  token: tok\nprovider:\n  api_key: sk-test\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.telegram.connector_id, "tg_main");
        assert_eq!(config.telegram.token, "tok");
        assert_eq!(config.provider.api_key, "sk-test");
        assert_eq!(config.provider.api_base, "https://api.openai.com/v1");
        assert_eq!(config.provider.model, "gpt-4");
    }

    #[test]
    fn load_config_missing_file_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_config(&dir.path().join("absent.yaml")).err().unwrap();
        assert!(err.to_string().contains("failed to read config"));
    }
}
