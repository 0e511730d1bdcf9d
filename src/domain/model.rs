use crate::domain::wire::{null_as_default, server_timestamp};
use crate::utils::error::{Result, ServiceInfoError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// General information about a data service: its version, edition, the
/// interface version it speaks and a rough picture of what it holds.
///
/// Counts and timestamps are whatever the server reported when the snapshot
/// was taken. Nothing here is validated; treat an instance as read-only once
/// it has been populated. Fields sent as `null` read as their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceInformation {
    #[serde(deserialize_with = "null_as_default")]
    pub server_name: String,

    /// Product version in dotted form, e.g. "5.3.1".
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,

    pub security_enabled: bool,

    #[serde(deserialize_with = "null_as_default")]
    pub edition: String,

    /// Major interface version, as reported.
    #[serde(deserialize_with = "null_as_default")]
    pub version_wsdl_major: String,

    /// Minor interface version, as reported.
    #[serde(deserialize_with = "null_as_default")]
    pub version_wsdl_minor: String,

    /// Approximate number of parts on the server.
    pub part_count: u64,

    /// Approximate number of characteristics on the server.
    pub characteristic_count: u64,

    /// Approximate number of measurements on the server.
    pub measurement_count: u64,

    /// Approximate number of measured values on the server.
    pub value_count: u64,

    /// Identifiers of the features the server supports. Order carries no meaning.
    #[serde(deserialize_with = "null_as_default")]
    pub feature_list: Vec<String>,

    /// Last inspection plan modification across the whole server.
    #[serde(deserialize_with = "server_timestamp")]
    pub inspection_plan_timestamp: DateTime<Utc>,

    /// Last measurement modification across the whole server.
    #[serde(deserialize_with = "server_timestamp")]
    pub measurement_timestamp: DateTime<Utc>,

    /// Last modification of the server configuration.
    #[serde(deserialize_with = "server_timestamp")]
    pub configuration_timestamp: DateTime<Utc>,
}

impl ServiceInformation {
    /// Interface version built from the major and minor parts.
    ///
    /// Returns `0.0` when either part is empty or does not parse.
    pub fn wsdl_version(&self) -> WsdlVersion {
        self.try_wsdl_version().unwrap_or_else(|e| {
            tracing::debug!("Falling back to WSDL version 0.0: {}", e);
            WsdlVersion::default()
        })
    }

    /// Like [`wsdl_version`](Self::wsdl_version), but reports unparsable parts
    /// instead of hiding them.
    pub fn try_wsdl_version(&self) -> Result<WsdlVersion> {
        if self.version_wsdl_major.is_empty() || self.version_wsdl_minor.is_empty() {
            return Ok(WsdlVersion::default());
        }

        format!("{}.{}", self.version_wsdl_major, self.version_wsdl_minor).parse()
    }

    pub fn supports_feature(&self, feature: &str) -> bool {
        self.feature_list.iter().any(|f| f == feature)
    }

    /// Domains whose timestamp moved forward relative to `previous`.
    pub fn changes_since(&self, previous: &ServiceInformation) -> SnapshotChanges {
        SnapshotChanges {
            inspection_plan: self.inspection_plan_timestamp > previous.inspection_plan_timestamp,
            measurements: self.measurement_timestamp > previous.measurement_timestamp,
            configuration: self.configuration_timestamp > previous.configuration_timestamp,
        }
    }
}

impl fmt::Display for ServiceInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            return Ok(());
        }

        write!(f, "{} Edition, Version {}", self.edition, self.version)?;
        if !self.version_wsdl_major.is_empty() {
            write!(
                f,
                " (WSDL: {}.{})",
                self.version_wsdl_major, self.version_wsdl_minor
            )?;
        }

        Ok(())
    }
}

/// Two-component interface version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WsdlVersion {
    pub major: u32,
    pub minor: u32,
}

impl WsdlVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for WsdlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for WsdlVersion {
    type Err = ServiceInfoError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| ServiceInfoError::InvalidVersionError {
            value: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 2 {
            return Err(invalid(format!(
                "expected 2 components, found {}",
                parts.len()
            )));
        }

        let component = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|e| invalid(format!("component '{}': {}", part, e)))
        };

        Ok(Self {
            major: component(parts[0])?,
            minor: component(parts[1])?,
        })
    }
}

/// Result of comparing two snapshots of the same server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotChanges {
    pub inspection_plan: bool,
    pub measurements: bool,
    pub configuration: bool,
}

impl SnapshotChanges {
    pub fn is_empty(&self) -> bool {
        !(self.inspection_plan || self.measurements || self.configuration)
    }

    /// Names of the changed domains, for display.
    pub fn changed_domains(&self) -> Vec<&'static str> {
        let mut domains = Vec::new();
        if self.inspection_plan {
            domains.push("inspection plan");
        }
        if self.measurements {
            domains.push("measurements");
        }
        if self.configuration {
            domains.push("configuration");
        }
        domains
    }
}
