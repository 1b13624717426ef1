use crate::adapters::default_resolver;
use crate::adapters::http::{build_client, VendorSite};
use crate::config::toml_config::AppConfig;
use crate::core::comparator::compare_versions;
use crate::core::resolver::FirmwareResolver;
use crate::domain::model::DeviceProfile;
use crate::utils::error::Result;
use std::io::Write;

pub const EXIT_OK: i32 = 0;
pub const EXIT_UPDATE_AVAILABLE: i32 = 1;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
pub const EXIT_RUNTIME_ERROR: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    UpdateAvailable { latest: String },
    NoUpdate { latest: String },
    /// No strategy produced a version.
    LookupFailed,
}

impl CheckOutcome {
    pub fn has_update(&self) -> bool {
        matches!(self, CheckOutcome::UpdateAvailable { .. })
    }

    /// Only an available update changes the exit status; a failed lookup
    /// exits like "no update".
    pub fn exit_code(&self) -> i32 {
        if self.has_update() {
            EXIT_UPDATE_AVAILABLE
        } else {
            EXIT_OK
        }
    }
}

/// Automatic check: resolve the latest version and compare it with the
/// installed one.
pub struct FirmwareChecker {
    resolver: FirmwareResolver,
    site: VendorSite,
}

impl FirmwareChecker {
    pub fn new(resolver: FirmwareResolver, site: VendorSite) -> Self {
        Self { resolver, site }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let site = config.vendor_site();
        let client = build_client(&site, config.request_timeout())?;
        let resolver = default_resolver(client, site.clone(), config.model_mapping());
        tracing::debug!("Resolver strategies: {:?}", resolver.source_names());
        Ok(Self::new(resolver, site))
    }

    pub fn site(&self) -> &VendorSite {
        &self.site
    }

    pub async fn check_for_updates<W: Write>(
        &self,
        device: &DeviceProfile,
        out: &mut W,
    ) -> Result<CheckOutcome> {
        writeln!(
            out,
            "Checking firmware for {} (HW: {})",
            device.model, device.hardware_version
        )?;
        writeln!(out, "Current version: {}", device.current_firmware_version)?;
        writeln!(out, "{}", "-".repeat(50))?;

        let resolution = self.resolver.resolve_detailed(device).await;
        let Some(latest) = resolution.into_version() else {
            writeln!(out, "❌ Could not find firmware information automatically")?;
            writeln!(
                out,
                "💡 Try checking manually at: {}",
                self.site.download_center_url()
            )?;
            writeln!(out, "   Search for model: {}", device.model)?;
            writeln!(out, "   Hardware version: {}", device.hardware_version)?;
            return Ok(CheckOutcome::LookupFailed);
        };

        let comparison = compare_versions(&device.current_firmware_version, Some(latest.as_str()));
        writeln!(out, "{}", comparison.message)?;

        if comparison.has_update {
            Ok(CheckOutcome::UpdateAvailable { latest })
        } else {
            Ok(CheckOutcome::NoUpdate { latest })
        }
    }
}
