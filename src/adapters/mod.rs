// Adapters layer: concrete resolver strategies talking to the vendor web site.

pub mod api;
pub mod http;
pub mod scrape;

use crate::core::mapping::ModelMapping;
use crate::core::resolver::FirmwareResolver;
use crate::domain::ports::VersionSource;
use self::http::VendorSite;
use reqwest::Client;

/// API first, then the two scraping fallbacks.
pub fn default_sources(
    client: Client,
    site: VendorSite,
    mapping: ModelMapping,
) -> Vec<Box<dyn VersionSource>> {
    vec![
        Box::new(api::VendorApiSource::new(client.clone(), site.clone(), mapping)),
        Box::new(scrape::FormSearchSource::new(client.clone(), site.clone())),
        Box::new(scrape::DownloadPageSource::new(client, site)),
    ]
}

pub fn default_resolver(client: Client, site: VendorSite, mapping: ModelMapping) -> FirmwareResolver {
    FirmwareResolver::new(default_sources(client, site, mapping))
}
