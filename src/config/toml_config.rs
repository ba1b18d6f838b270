use crate::config::ApiConfig;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LookupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COUNTRY_API_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LookupError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.api.validate()?;
        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(LookupError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:9000/v3.1"
timeout_seconds = 5
full_text_match = true

[logging]
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:9000/v3.1");
        assert_eq!(config.api.timeout_seconds, Some(5));
        assert!(config.api.full_text_match);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.log_level(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COUNTRY_LOOKUP_TEST_HOST", "countries.internal");
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "https://${COUNTRY_LOOKUP_TEST_HOST}/v3.1"
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://countries.internal/v3.1");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "${COUNTRY_LOOKUP_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "${COUNTRY_LOOKUP_SURELY_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();

        assert!(matches!(
            config.validate(),
            Err(LookupError::InvalidConfigValueError { ref field, .. }) if field == "logging.level"
        ));
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[api\nbase_url = ").unwrap_err();

        assert!(matches!(err, LookupError::ConfigValidationError { .. }));
    }
}
