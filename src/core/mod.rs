pub mod comparator;
pub mod mapping;
pub mod resolver;

pub use crate::domain::model::{DeviceProfile, FirmwareRecord};
pub use crate::domain::ports::{StrategyOutcome, VersionSource};
pub use crate::utils::error::Result;
