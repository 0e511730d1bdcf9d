pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, TomlConfig};

pub use core::{client::DataServiceClient, snapshot::SnapshotStore};
pub use domain::model::{ServiceInformation, SnapshotChanges, WsdlVersion};
pub use domain::ports::ServiceInformationSource;
pub use utils::error::{Result, ServiceInfoError};
