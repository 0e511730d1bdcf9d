use crate::domain::model::ServiceInformation;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn server_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn headers(&self) -> &HashMap<String, String>;
    fn output_path(&self) -> &str;
}

/// Anything that can hand out a service information snapshot.
#[async_trait]
pub trait ServiceInformationSource: Send + Sync {
    async fn fetch(&self) -> Result<ServiceInformation>;
}
