use crate::utils::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://reolink.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// URLs of the vendor web site, all derived from one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSite {
    base_url: String,
}

impl VendorSite {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn firmware_api_url(&self) -> String {
        format!("{}/wp-json/reo-v2/download/firmware/", self.base_url)
    }

    pub fn download_center_url(&self) -> String {
        format!("{}/download-center/", self.base_url)
    }

    pub fn site_search_url(&self) -> String {
        format!("{}/sitesearch/", self.base_url)
    }

    /// 猜測的機型下載頁，依序嘗試
    pub fn model_page_urls(&self, model: &str) -> Vec<String> {
        let model = model.to_lowercase();
        vec![
            format!("{}/download-center/{}/", self.base_url, model),
            format!("{}/download/{}/", self.base_url, model),
            format!("{}/support/download/{}/", self.base_url, model),
        ]
    }
}

impl Default for VendorSite {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Shared client for every strategy. The vendor rejects bare requests, so
/// browser-like headers are sent by default; the cookie store keeps the
/// session the download center hands out.
pub fn build_client(site: &VendorSite, timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(
        REFERER,
        HeaderValue::from_str(&site.download_center_url())?,
    );

    let client = Client::builder()
        .default_headers(headers)
        .cookie_store(true)
        .timeout(timeout)
        .build()?;

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_site_urls() {
        let site = VendorSite::new("https://reolink.com/");

        assert_eq!(site.base_url(), "https://reolink.com");
        assert_eq!(
            site.firmware_api_url(),
            "https://reolink.com/wp-json/reo-v2/download/firmware/"
        );
        assert_eq!(
            site.download_center_url(),
            "https://reolink.com/download-center/"
        );
        assert_eq!(site.site_search_url(), "https://reolink.com/sitesearch/");
    }

    #[test]
    fn test_model_page_urls_use_lowercase_model() {
        let urls = VendorSite::default().model_page_urls("RLN8-410");

        assert_eq!(urls.len(), 3);
        assert_eq!(urls[0], "https://reolink.com/download-center/rln8-410/");
        assert_eq!(urls[1], "https://reolink.com/download/rln8-410/");
        assert_eq!(urls[2], "https://reolink.com/support/download/rln8-410/");
    }

    #[test]
    fn test_build_client() {
        let site = VendorSite::new("http://127.0.0.1:9");
        assert!(build_client(&site, Duration::from_secs(DEFAULT_TIMEOUT_SECS)).is_ok());
    }
}
