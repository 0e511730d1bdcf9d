use crate::core::{ConfigProvider, ServiceInformation, ServiceInformationSource};
use crate::utils::error::{Result, ServiceInfoError};
use crate::utils::validation::{parse_server_url, validate_header_name};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Path of the service information resource, relative to the server root.
pub const SERVICE_INFORMATION_PATH: &str = "dataServiceRest/serviceInformation";

/// Reads service information from a running data service.
///
/// The server URL is only checked here, so configurations used purely for
/// offline snapshots may leave it unset or stale.
pub struct DataServiceClient {
    client: Client,
    endpoint: Url,
}

impl DataServiceClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let endpoint = service_information_url(config.server_url())?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in config.headers() {
            let header_name = validate_header_name("headers", name)?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ServiceInfoError::InvalidConfigValueError {
                    field: format!("headers.{}", name),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                }
            })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ServiceInformationSource for DataServiceClient {
    async fn fetch(&self) -> Result<ServiceInformation> {
        tracing::debug!("Requesting service information from: {}", self.endpoint);
        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        tracing::debug!("Service information response status: {}", status);
        if !status.is_success() {
            return Err(ServiceInfoError::HttpStatusError {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.bytes().await?;
        let info: ServiceInformation = serde_json::from_slice(&body)?;

        tracing::info!(
            "Retrieved service information from '{}': {}",
            info.server_name,
            info
        );
        Ok(info)
    }
}

/// Resolves the service information resource below `server_url`. The server
/// URL is treated as a directory whether or not it ends in a slash.
pub fn service_information_url(server_url: &str) -> Result<Url> {
    let mut base = parse_server_url("server_url", server_url)?;

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(SERVICE_INFORMATION_PATH)
        .map_err(|e| ServiceInfoError::InvalidConfigValueError {
            field: "server_url".to_string(),
            value: server_url.to_string(),
            reason: format!("Cannot build service information URL: {}", e),
        })
}
