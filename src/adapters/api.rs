use crate::adapters::http::VendorSite;
use crate::core::mapping::{ApiIds, ModelMapping};
use crate::domain::model::{DeviceProfile, FirmwareRecord};
use crate::domain::ports::{StrategyOutcome, VersionSource};
use crate::utils::error::{CheckerError, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, StatusCode};

/// Extra headers the firmware endpoint expects from a same-origin XHR.
fn api_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    for (name, value) in [
        ("sec-fetch-site", "same-origin"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-dest", "empty"),
        ("priority", "u=3, i"),
    ] {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    headers
}

/// 從 API 回應挑出 updated_at 最大的韌體版本
///
/// Only the first product entry is considered. Empty or malformed bodies
/// yield `None`; ties on the timestamp go to the later record.
pub fn extract_version_from_api_response(data: Option<&serde_json::Value>) -> Option<String> {
    let firmwares = data?
        .get("data")?
        .as_array()?
        .first()?
        .get("firmwares")?
        .as_array()?;

    // 只有被選中的那筆需要合法的 version
    let latest = firmwares
        .iter()
        .map(FirmwareRecord::from_json)
        .max_by_key(|record| record.updated_at_epoch_millis)?;

    if let Some(updated_at) = DateTime::from_timestamp_millis(latest.updated_at_epoch_millis) {
        tracing::debug!("Latest firmware record updated at {}", updated_at.to_rfc3339());
    }

    latest.version
}

/// Authoritative lookup through the vendor's firmware listing endpoint.
pub struct VendorApiSource {
    client: Client,
    site: VendorSite,
    mapping: ModelMapping,
}

impl VendorApiSource {
    pub fn new(client: Client, site: VendorSite, mapping: ModelMapping) -> Self {
        Self {
            client,
            site,
            mapping,
        }
    }

    pub async fn fetch_latest_version(&self, ids: ApiIds) -> Result<Option<String>> {
        tracing::info!(
            "Calling vendor API: dlProductId={}, hardwareVersion={}",
            ids.product_id,
            ids.hardware_version_id
        );

        let response = self
            .client
            .get(self.site.firmware_api_url())
            .query(&[
                ("dlProductId", ids.product_id.to_string()),
                ("hardwareVersion", ids.hardware_version_id.to_string()),
                ("lang", "en".to_string()),
            ])
            .headers(api_headers())
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());

        if response.status() != StatusCode::OK {
            return Err(CheckerError::ResponseError {
                message: format!("API returned status: {}", response.status()),
            });
        }

        let data: serde_json::Value = response.json().await?;
        let version = extract_version_from_api_response(Some(&data));
        if let Some(version) = &version {
            tracing::info!("Found latest version: {}", version);
        }

        Ok(version)
    }
}

#[async_trait]
impl VersionSource for VendorApiSource {
    fn name(&self) -> &'static str {
        "vendor-api"
    }

    async fn find_latest(&self, device: &DeviceProfile) -> StrategyOutcome {
        let Some(ids) = self.mapping.lookup(&device.model, &device.hardware_version) else {
            return StrategyOutcome::Skipped(format!(
                "No known API mapping for {} with hardware {}",
                device.model, device.hardware_version
            ));
        };

        match self.fetch_latest_version(ids).await {
            Ok(Some(version)) => StrategyOutcome::Found(version),
            Ok(None) => StrategyOutcome::NotFound,
            Err(e) => StrategyOutcome::Failed(format!("API call failed: {}", e)),
        }
    }
}
