use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 要檢查的裝置，以及目前認定已安裝的韌體版本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeviceProfile {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub hardware_version: String,
    #[serde(default)]
    pub current_firmware_version: String,
}

impl DeviceProfile {
    pub fn new(
        model: impl Into<String>,
        hardware_version: impl Into<String>,
        current_firmware_version: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            hardware_version: hardware_version.into(),
            current_firmware_version: current_firmware_version.into(),
        }
    }
}

/// One entry of the vendor firmware list for a product/hardware pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FirmwareRecord {
    pub version: Option<String>,
    pub updated_at_epoch_millis: i64,
}

impl FirmwareRecord {
    /// 欄位型別不符時視為缺值，不影響其他紀錄
    pub fn from_json(record: &Value) -> Self {
        let updated_at = record.get("updated_at");
        let updated_at_epoch_millis = updated_at
            .and_then(Value::as_i64)
            .or_else(|| updated_at.and_then(Value::as_f64).map(|millis| millis as i64))
            .unwrap_or(0);

        Self {
            version: record
                .get("version")
                .and_then(Value::as_str)
                .map(str::to_string),
            updated_at_epoch_millis,
        }
    }
}

/// A model's vendor product id and its known hardware revision ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub product_id: u32,
    #[serde(default)]
    pub hardware_versions: BTreeMap<String, u32>,
}
