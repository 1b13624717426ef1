use crate::domain::model::DeviceProfile;
use crate::domain::ports::{StrategyOutcome, VersionSource};

/// One strategy attempt, in the order it was tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub source: &'static str,
    pub outcome: StrategyOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub attempts: Vec<Attempt>,
}

impl Resolution {
    pub fn version(&self) -> Option<&str> {
        self.attempts.iter().find_map(|a| a.outcome.version())
    }

    pub fn into_version(self) -> Option<String> {
        self.attempts.into_iter().find_map(|a| match a.outcome {
            StrategyOutcome::Found(version) => Some(version),
            _ => None,
        })
    }

    /// True when at least one strategy failed for network/parse reasons
    /// rather than simply finding nothing.
    pub fn had_failures(&self) -> bool {
        self.attempts
            .iter()
            .any(|a| matches!(a.outcome, StrategyOutcome::Failed(_)))
    }
}

/// Tries each [`VersionSource`] in priority order and stops at the first hit.
pub struct FirmwareResolver {
    sources: Vec<Box<dyn VersionSource>>,
}

impl FirmwareResolver {
    pub fn new(sources: Vec<Box<dyn VersionSource>>) -> Self {
        Self { sources }
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn resolve(&self, model: &str, hardware_version: &str) -> Option<String> {
        let device = DeviceProfile::new(model, hardware_version, "");
        self.resolve_detailed(&device).await.into_version()
    }

    pub async fn resolve_detailed(&self, device: &DeviceProfile) -> Resolution {
        tracing::info!(
            "Searching for firmware for {} (HW: {})...",
            device.model,
            device.hardware_version
        );

        let mut resolution = Resolution::default();

        // 依序嘗試，不並行
        for source in &self.sources {
            let outcome = source.find_latest(device).await;
            match &outcome {
                StrategyOutcome::Found(version) => {
                    tracing::info!("✅ {} found version {}", source.name(), version);
                }
                StrategyOutcome::NotFound => {
                    tracing::debug!("{} found no version", source.name());
                }
                StrategyOutcome::Skipped(reason) => {
                    tracing::info!("{} skipped: {}", source.name(), reason);
                }
                StrategyOutcome::Failed(error) => {
                    tracing::warn!("{} failed: {}", source.name(), error);
                }
            }

            let found = matches!(outcome, StrategyOutcome::Found(_));
            resolution.attempts.push(Attempt {
                source: source.name(),
                outcome,
            });
            if found {
                return resolution;
            }
        }

        tracing::info!("Could not find firmware through automated methods");
        resolution
    }
}
