use crate::utils::error::{Result, ServiceInfoError};
use reqwest::header::HeaderName;
use std::path::{Component, Path};
use url::Url;

pub const MAX_TIMEOUT_SECONDS: u64 = 3600;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Into<String>, reason: impl Into<String>) -> ServiceInfoError {
    ServiceInfoError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.into(),
        reason: reason.into(),
    }
}

/// Parses the root URL of a data service. Only `http` and `https` servers
/// with a host are accepted.
pub fn parse_server_url(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(field, raw, format!("Unsupported URL scheme: {}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, raw, "URL has no host"));
    }

    Ok(url)
}

/// Directory snapshots are written below.
pub fn validate_output_dir(field: &str, dir: &str) -> Result<()> {
    if dir.trim().is_empty() {
        return Err(invalid(field, dir, "Directory cannot be empty"));
    }
    if dir.contains('\0') {
        return Err(invalid(field, dir, "Directory contains null bytes"));
    }
    Ok(())
}

/// A snapshot name is a relative file path that stays inside the output
/// directory.
pub fn validate_snapshot_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid(field, name, "Snapshot name cannot be empty"));
    }
    if name.contains('\0') {
        return Err(invalid(field, name, "Snapshot name contains null bytes"));
    }

    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(invalid(field, name, "Snapshot name must not contain '..'"))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid(field, name, "Snapshot name must be relative"))
            }
        }
    }

    Ok(())
}

pub fn validate_timeout(field: &str, seconds: u64) -> Result<()> {
    if seconds == 0 || seconds > MAX_TIMEOUT_SECONDS {
        return Err(invalid(
            field,
            seconds.to_string(),
            format!("Timeout must be between 1 and {} seconds", MAX_TIMEOUT_SECONDS),
        ));
    }
    Ok(())
}

/// Header names must be valid HTTP tokens.
pub fn validate_header_name(field: &str, name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| invalid(field, name, format!("Invalid header name: {}", e)))
}

/// Splits a `name=value` header argument. The name must be non-empty; the
/// value may be empty.
pub fn parse_header(field: &str, raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| invalid(field, raw, "Expected the form name=value"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(field, raw, "Header name cannot be empty"));
    }

    Ok((name.to_string(), value.trim().to_string()))
}
