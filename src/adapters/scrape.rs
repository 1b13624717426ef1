//! HTML-scraping fallbacks for when the firmware API cannot be used.
//!
//! These depend entirely on the vendor's page markup and are expected to
//! break; they sit behind [`VersionSource`] so they can be dropped without
//! touching the resolver's callers.

use crate::adapters::http::VendorSite;
use crate::domain::model::DeviceProfile;
use crate::domain::ports::{StrategyOutcome, VersionSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use std::sync::LazyLock;

/// 依優先順序排列的版本樣式
static VERSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)v?(\d+\.\d+\.\d+\.\d+_\d+)",
        r"(?i)Version[:\s]+(v?\d+\.\d+\.\d+(?:\.\d+)?)",
        r"(?i)(?:Firmware|Download)[:\s]+(v?\d+\.\d+\.\d+(?:\.\d+)?)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("version pattern must compile"))
    .collect()
});

/// Candidates this short are page noise, not firmware versions.
const MIN_VERSION_LEN: usize = 6;

/// Digits of a candidate with `.`, `_` and a leading `v` removed, compared as
/// an arbitrarily large integer.
fn numeric_rank(candidate: &str) -> (usize, String) {
    let digits: String = candidate.chars().filter(char::is_ascii_digit).collect();
    let significant = digits.trim_start_matches('0').to_string();
    (significant.len(), significant)
}

/// Scans text for version-like tokens.
///
/// Patterns are tried from most to least specific; the first pattern with any
/// match wins, and among its matches the numerically largest is returned as
/// the best guess for "most recent".
pub fn extract_version_from_html(html_content: &str) -> Option<String> {
    for pattern in VERSION_PATTERNS.iter() {
        let best = pattern
            .captures_iter(html_content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|candidate| candidate.len() >= MIN_VERSION_LEN)
            .max_by_key(|candidate| numeric_rank(candidate));

        if let Some(version) = best {
            return Some(version.to_string());
        }
    }

    None
}

/// GETs a page and scans it; anything but a 200 counts as no result.
async fn scan_page(client: &Client, url: &str) -> Result<Option<String>> {
    tracing::debug!("Fetching {}", url);
    let response = client.get(url).send().await?;
    if response.status() != StatusCode::OK {
        tracing::debug!("{} returned status {}", url, response.status());
        return Ok(None);
    }

    let body = response.text().await?;
    Ok(extract_version_from_html(&body))
}

/// Replays the download-center search form with the model name.
pub struct FormSearchSource {
    client: Client,
    site: VendorSite,
}

impl FormSearchSource {
    pub fn new(client: Client, site: VendorSite) -> Self {
        Self { client, site }
    }

    async fn search(&self, device: &DeviceProfile) -> Result<Option<String>> {
        tracing::info!(
            "Simulating form search for {} with HW {}",
            device.model,
            device.hardware_version
        );

        // 先取得下載中心頁面（同時拿到 session cookie）
        let download_center = self.site.download_center_url();
        let landing = self.client.get(&download_center).send().await?;
        if landing.status() != StatusCode::OK {
            tracing::debug!("Download center returned status {}", landing.status());
            return Ok(None);
        }

        let form = [
            ("model", device.model.as_str()),
            ("hardware", device.hardware_version.as_str()),
            ("hw_version", device.hardware_version.as_str()),
            ("product", device.model.as_str()),
            ("query", device.model.as_str()),
            ("search", device.model.as_str()),
            ("type", "firmware"),
        ];

        // 兩個猜測的端點各自失敗都不影響下一個
        match self.client.post(&download_center).form(&form).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                match response.text().await {
                    Ok(body) => {
                        if let Some(version) = extract_version_from_html(&body) {
                            return Ok(Some(version));
                        }
                    }
                    Err(e) => tracing::debug!("Form search body unreadable: {}", e),
                }
            }
            Ok(response) => tracing::debug!("Form search returned status {}", response.status()),
            Err(e) => tracing::debug!("Form search POST failed: {}", e),
        }

        let response = self
            .client
            .get(self.site.site_search_url())
            .query(&[("q", device.model.as_str())])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            tracing::debug!("Site search returned status {}", response.status());
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(extract_version_from_html(&body))
    }
}

#[async_trait]
impl VersionSource for FormSearchSource {
    fn name(&self) -> &'static str {
        "form-search"
    }

    async fn find_latest(&self, device: &DeviceProfile) -> StrategyOutcome {
        match self.search(device).await {
            Ok(Some(version)) => StrategyOutcome::Found(version),
            Ok(None) => StrategyOutcome::NotFound,
            Err(e) => StrategyOutcome::Failed(format!("Form search failed: {}", e)),
        }
    }
}

/// Probes guessed per-model download pages.
pub struct DownloadPageSource {
    client: Client,
    site: VendorSite,
}

impl DownloadPageSource {
    pub fn new(client: Client, site: VendorSite) -> Self {
        Self { client, site }
    }
}

#[async_trait]
impl VersionSource for DownloadPageSource {
    fn name(&self) -> &'static str {
        "download-page"
    }

    async fn find_latest(&self, device: &DeviceProfile) -> StrategyOutcome {
        let mut last_error = None;

        for url in self.site.model_page_urls(&device.model) {
            tracing::info!("Trying direct page: {}", url);
            match scan_page(&self.client, &url).await {
                Ok(Some(version)) => return StrategyOutcome::Found(version),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!("  Failed: {}", e);
                    last_error = Some(e.to_string());
                }
            }
        }

        match last_error {
            Some(error) => StrategyOutcome::Failed(error),
            None => StrategyOutcome::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_underscore_build_version() {
        let html = r#"<div class="fw">Firmware v3.5.1.368_25010326 released</div>"#;
        assert_eq!(
            extract_version_from_html(html).as_deref(),
            Some("3.5.1.368_25010326")
        );
    }

    #[test]
    fn test_extract_prefers_largest_candidate() {
        let html = r#"
            <li>v3.4.0.293_24010832</li>
            <li>v3.5.1.368_25010326</li>
            <li>v3.5.0.290_24120101</li>
        "#;
        assert_eq!(
            extract_version_from_html(html).as_deref(),
            Some("3.5.1.368_25010326")
        );
    }

    #[test]
    fn test_ranking_is_numeric_not_lexicographic() {
        // "9.9.9.9_1" 字典序較大，但數值較小
        let html = "build 9.9.9.9_1 and build 10.0.0.0_1";
        assert_eq!(extract_version_from_html(html).as_deref(), Some("10.0.0.0_1"));
    }

    #[test]
    fn test_build_suffix_pattern_beats_labeled_version() {
        let html = "Version: v9.9.9 ... file RLN8-410_3.5.1.368_25010326.zip";
        assert_eq!(
            extract_version_from_html(html).as_deref(),
            Some("3.5.1.368_25010326")
        );
    }

    #[test]
    fn test_extract_labeled_versions() {
        assert_eq!(
            extract_version_from_html("<p>Version: v3.5.1</p>").as_deref(),
            Some("v3.5.1")
        );
        assert_eq!(
            extract_version_from_html("<p>version 3.5.1.368</p>").as_deref(),
            Some("3.5.1.368")
        );
        assert_eq!(
            extract_version_from_html("<span>Firmware: 3.4.0.293</span>").as_deref(),
            Some("3.4.0.293")
        );
        assert_eq!(
            extract_version_from_html("<a>Download: v3.4.0</a>").as_deref(),
            Some("v3.4.0")
        );
    }

    #[test]
    fn test_short_matches_are_ignored() {
        assert_eq!(extract_version_from_html("Version: 1.2.3"), None);
    }

    #[test]
    fn test_no_version_in_page() {
        assert_eq!(extract_version_from_html("<html><body>No results</body></html>"), None);
        assert_eq!(extract_version_from_html(""), None);
    }

    #[test]
    fn test_numeric_rank_ignores_separators_and_leading_zeros() {
        assert_eq!(
            numeric_rank("v3.5.1.368_25010326"),
            (14, "35136825010326".to_string())
        );
        assert!(numeric_rank("10.0.0.0_1") > numeric_rank("9.9.9.9_1"));
        assert_eq!(numeric_rank("0.0.1.2_3"), numeric_rank("1.2.3"));
    }
}
