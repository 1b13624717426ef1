pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliArgs, Command};

pub use app::checker::{CheckOutcome, FirmwareChecker};
pub use app::commands::App;
pub use config::{store::ConfigStore, toml_config::AppConfig};
pub use core::comparator::{compare_versions, parse_version_string, Comparison};
pub use core::resolver::FirmwareResolver;
pub use domain::model::DeviceProfile;
pub use utils::error::{CheckerError, Result};
