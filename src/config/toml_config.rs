use crate::adapters::http::{VendorSite, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::core::mapping::ModelMapping;
use crate::domain::model::{DeviceProfile, ModelEntry};
use crate::utils::error::{CheckerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "RLN8-410";
pub const DEFAULT_HARDWARE_VERSION: &str = "N2MB02";
pub const DEFAULT_FIRMWARE_VERSION: &str = "v3.5.1.368_25010326";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub device: DeviceProfile,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorConfig>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub models: BTreeMap<String, ModelEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_true")]
    pub check_on_startup: bool,
    #[serde(default)]
    pub verbose_output: bool,
    #[serde(default = "default_true")]
    pub auto_open_browser_on_manual: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            check_on_startup: true,
            verbose_output: false,
            auto_open_browser_on_manual: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_device(DeviceProfile::new(
            DEFAULT_MODEL,
            DEFAULT_HARDWARE_VERSION,
            DEFAULT_FIRMWARE_VERSION,
        ))
    }
}

impl AppConfig {
    pub fn for_device(device: DeviceProfile) -> Self {
        Self {
            device,
            settings: SettingsConfig::default(),
            vendor: None,
            models: BTreeMap::new(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| CheckerError::ConfigReadError {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_required_string("device.model", &self.device.model)?;
        validation::validate_required_string(
            "device.hardware_version",
            &self.device.hardware_version,
        )?;
        validation::validate_required_string(
            "device.current_firmware_version",
            &self.device.current_firmware_version,
        )?;

        if let Some(vendor) = &self.vendor {
            if let Some(base_url) = &vendor.base_url {
                validation::validate_url("vendor.base_url", base_url)?;
            }
            if let Some(timeout) = vendor.timeout_seconds {
                validation::validate_positive_number("vendor.timeout_seconds", timeout, 1)?;
            }
        }

        Ok(())
    }

    pub fn vendor_site(&self) -> VendorSite {
        let base_url = self
            .vendor
            .as_ref()
            .and_then(|v| v.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);
        VendorSite::new(base_url)
    }

    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .vendor
            .as_ref()
            .and_then(|v| v.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn model_mapping(&self) -> ModelMapping {
        ModelMapping::with_overrides(&self.models)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
