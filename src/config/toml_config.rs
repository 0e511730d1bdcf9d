use crate::core::ConfigProvider;
use crate::utils::error::{Result, ServiceInfoError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceInfoError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServiceInfoError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PIWEB_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServiceInfoError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置；`service.url` 只在連線時由 client 檢查
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_output_dir("output.path", &self.output.path)?;
        validation::validate_timeout("service.timeout_seconds", self.timeout_seconds())?;

        for name in self.service.headers.keys() {
            validation::validate_header_name("service.headers", name)?;
        }

        Ok(())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.service.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn server_url(&self) -> &str {
        &self.service.url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds()
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.service.headers
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[service]
url = "http://piweb-server:8080"
timeout_seconds = 10

[service.headers]
Authorization = "Basic dXNlcjpwYXNz"

[output]
path = "./snapshots"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server_url(), "http://piweb-server:8080");
        assert_eq!(ConfigProvider::timeout_seconds(&config), 10);
        assert_eq!(config.headers()["Authorization"], "Basic dXNlcjpwYXNz");
        assert_eq!(config.output_path(), "./snapshots");
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let config = TomlConfig::from_toml_str("[service]\nurl = \"https://host\"\n").unwrap();

        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.output_path(), ".");
        assert!(config.headers().is_empty());
        assert!(!config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DATASERVICE_INFO_TEST_URL", "https://test.piweb.local");

        let toml_content = r#"
[service]
url = "${DATASERVICE_INFO_TEST_URL}"

[service.headers]
X-Token = "${DATASERVICE_INFO_UNSET_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.service.url, "https://test.piweb.local");
        assert_eq!(config.headers()["X-Token"], "${DATASERVICE_INFO_UNSET_TOKEN}");

        std::env::remove_var("DATASERVICE_INFO_TEST_URL");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            "[service]\nurl = \"http://host\"\n\n[service.headers]\n\"bad header\" = \"x\"\n",
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            "[service]\nurl = \"http://host\"\ntimeout_seconds = 0\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_url_checked_only_when_connecting() {
        let config = TomlConfig::from_toml_str("[service]\nurl = \"invalid-url\"\n").unwrap();

        assert!(config.validate().is_ok());
        assert!(matches!(
            crate::DataServiceClient::new(&config),
            Err(ServiceInfoError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_missing_service_section() {
        let result = TomlConfig::from_toml_str("[output]\npath = \"x\"\n");
        assert!(matches!(
            result,
            Err(ServiceInfoError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[service]\nurl = \"https://api.example.com\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server_url(), "https://api.example.com");
    }
}
