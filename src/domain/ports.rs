use crate::domain::model::DeviceProfile;
use async_trait::async_trait;

/// Result of a single resolver strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    Found(String),
    /// The strategy ran but produced no version.
    NotFound,
    /// The strategy does not apply to this device.
    Skipped(String),
    /// Network or parsing failure, already logged.
    Failed(String),
}

impl StrategyOutcome {
    pub fn version(&self) -> Option<&str> {
        match self {
            StrategyOutcome::Found(version) => Some(version.as_str()),
            _ => None,
        }
    }
}

/// One way of discovering the latest published firmware version.
///
/// Implementations never return errors: every failure is reported as
/// [`StrategyOutcome::Failed`] so the resolver can move on to the next source.
#[async_trait]
pub trait VersionSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn find_latest(&self, device: &DeviceProfile) -> StrategyOutcome;
}
