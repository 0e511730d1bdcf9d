pub mod client;
pub mod snapshot;

pub use crate::domain::model::{ServiceInformation, SnapshotChanges, WsdlVersion};
pub use crate::domain::ports::{ConfigProvider, ServiceInformationSource, Storage};
pub use crate::utils::error::Result;
