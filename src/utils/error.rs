use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceInfoError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Data service returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid version '{value}': {reason}")]
    InvalidVersionError { value: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ServiceInfoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::SerializationError(_) | Self::InvalidVersionError { .. } => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidVersionError { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::HttpStatusError { .. } => ErrorSeverity::Medium,
            Self::SerializationError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(_) => {
                "Check that the data service is running and reachable from this host".to_string()
            }
            Self::HttpStatusError { status, .. } if *status == 401 || *status == 403 => {
                "The server requires authentication; pass credentials with --header".to_string()
            }
            Self::HttpStatusError { .. } => {
                "Verify the server URL points at the data service root".to_string()
            }
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
            Self::SerializationError(_) => {
                "The response or snapshot is not valid service information JSON".to_string()
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the command line arguments and the TOML configuration file".to_string()
            }
            Self::InvalidVersionError { .. } => {
                "The server reported a non-numeric interface version".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not retrieve service information: {}", self),
            ErrorCategory::Data => format!("Service information could not be read: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceInfoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_is_network_medium() {
        let err = ServiceInfoError::HttpStatusError {
            status: 404,
            url: "http://localhost/dataServiceRest/serviceInformation".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_auth_status_suggests_header() {
        let err = ServiceInfoError::HttpStatusError {
            status: 401,
            url: "http://localhost".to_string(),
        };
        assert!(err.recovery_suggestion().contains("--header"));
    }

    #[test]
    fn test_invalid_value_names_field() {
        let err = ServiceInfoError::InvalidConfigValueError {
            field: "service.url".to_string(),
            value: "ftp://host".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("service.url"));
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }
}
