use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "dataservice-info")]
#[command(about = "Shows version, edition and content statistics of a data service")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:8080")]
    pub server_url: String,

    #[arg(long, help = "TOML configuration file; replaces the connection flags")]
    pub config: Option<String>,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, help = "Read this snapshot file instead of contacting the server")]
    pub snapshot: Option<String>,

    #[arg(long, help = "Store the retrieved information under this file name")]
    pub save: Option<String>,

    #[arg(long, help = "Report which domains changed since this snapshot file")]
    pub compare: Option<String>,

    #[arg(long, help = "Print the information as JSON")]
    pub json: bool,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long = "header", value_name = "NAME=VALUE", help = "Extra request header, repeatable")]
    pub raw_headers: Vec<String>,

    #[arg(skip)]
    #[serde(default)]
    pub headers: HashMap<String, String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Parses the raw `--header` arguments into [`CliConfig::headers`].
    pub fn resolve_headers(mut self) -> Result<Self> {
        for raw in &self.raw_headers {
            let (name, value) = validation::parse_header("header", raw)?;
            self.headers.insert(name, value);
        }
        Ok(self)
    }
}

impl ConfigProvider for CliConfig {
    fn server_url(&self) -> &str {
        &self.server_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_output_dir("output_path", &self.output_path)?;
        validation::validate_timeout("timeout_seconds", self.timeout_seconds)?;
        for name in self.headers.keys() {
            validation::validate_header_name("header", name)?;
        }

        let files = [
            ("snapshot", &self.snapshot),
            ("save", &self.save),
            ("compare", &self.compare),
        ];
        for (field, name) in files {
            if let Some(name) = name {
                validation::validate_snapshot_name(field, name)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("dataservice-info").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.headers.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_headers_are_resolved() {
        let config = parse(&["--header", "Authorization=Basic dXNlcg==", "--header", "X-Trace=1"])
            .resolve_headers()
            .unwrap();
        assert_eq!(config.headers().len(), 2);
        assert_eq!(config.headers()["Authorization"], "Basic dXNlcg==");
    }

    #[test]
    fn test_bad_header_is_rejected() {
        assert!(parse(&["--header", "nonsense"]).resolve_headers().is_err());
    }

    #[test]
    fn test_server_url_checked_only_when_connecting() {
        let config = parse(&["--server-url", "not-a-url", "--snapshot", "latest.json"]);
        assert!(config.validate().is_ok());
        assert!(crate::DataServiceClient::new(&config).is_err());
    }

    #[test]
    fn test_snapshot_names_stay_in_output_dir() {
        assert!(parse(&["--save", "nightly/latest.json"]).validate().is_ok());
        assert!(parse(&["--save", "../latest.json"]).validate().is_err());
        assert!(parse(&["--compare", "/tmp/old.json"]).validate().is_err());
    }

    #[test]
    fn test_timeout_out_of_range() {
        assert!(parse(&["--timeout-seconds", "0"]).validate().is_err());
    }
}
