//! Firmware version normalisation and comparison.
//!
//! Vendor versions look like `v3.5.1.368_25010326`: a dotted release number
//! followed by an underscore and a date-based build stamp. The build stamp is
//! folded into the release number so that two builds of the same release
//! still order correctly.

use std::cmp::Ordering;
use std::fmt;

/// Dotted numeric release identifier. Missing trailing components compare as zero.
#[derive(Debug, Clone)]
pub struct ReleaseVersion {
    components: Vec<u64>,
}

impl ReleaseVersion {
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }

        let mut components = Vec::new();
        for part in s.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            components.push(part.parse::<u64>().ok()?);
        }

        Some(Self { components })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReleaseVersion {}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparableVersion {
    Release(ReleaseVersion),
    /// Normalised text of a version that could not be parsed.
    Opaque(String),
}

impl ComparableVersion {
    pub fn is_opaque(&self) -> bool {
        matches!(self, ComparableVersion::Opaque(_))
    }
}

/// 版本字串正規化：去掉開頭的 v，並把 `_` 後面的 build 號併入版本序列
pub fn parse_version_string(version_str: &str) -> ComparableVersion {
    let trimmed = version_str.trim();
    let without_prefix = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    let clean = without_prefix.to_lowercase();

    let comparable = match clean.split_once('_') {
        Some((release, build)) if !build.contains('_') => format!("{}.{}", release, build),
        _ => clean.clone(),
    };

    match ReleaseVersion::parse(&comparable) {
        Some(release) => ComparableVersion::Release(release),
        None => ComparableVersion::Opaque(clean),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOutcome {
    UpdateAvailable,
    UpToDate,
    CurrentIsNewer,
    /// At least one side was not a parseable version; decided by raw inequality.
    Incomparable,
    LatestUnknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub has_update: bool,
    pub outcome: ComparisonOutcome,
    pub message: String,
}

pub fn compare_versions(current_version: &str, latest_version: Option<&str>) -> Comparison {
    let Some(latest_version) = latest_version else {
        return Comparison {
            has_update: false,
            outcome: ComparisonOutcome::LatestUnknown,
            message: "Could not determine latest version".to_string(),
        };
    };

    let current = parse_version_string(current_version);
    let latest = parse_version_string(latest_version);

    let (current, latest) = match (current, latest) {
        (ComparableVersion::Release(current), ComparableVersion::Release(latest)) => {
            (current, latest)
        }
        _ => {
            tracing::debug!(
                "Falling back to raw string comparison: '{}' vs '{}'",
                current_version,
                latest_version
            );
            return Comparison {
                has_update: current_version != latest_version,
                outcome: ComparisonOutcome::Incomparable,
                message: format!("Current: {}, Latest: {}", current_version, latest_version),
            };
        }
    };

    match latest.cmp(&current) {
        Ordering::Greater => Comparison {
            has_update: true,
            outcome: ComparisonOutcome::UpdateAvailable,
            message: format!(
                "🔔 New version available: {} (current: {})",
                latest_version, current_version
            ),
        },
        Ordering::Equal => Comparison {
            has_update: false,
            outcome: ComparisonOutcome::UpToDate,
            message: format!("✅ Already on latest: {}", current_version),
        },
        Ordering::Less => Comparison {
            has_update: false,
            outcome: ComparisonOutcome::CurrentIsNewer,
            message: format!(
                "Current version {} is newer than listed {}",
                current_version, latest_version
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(s: &str) -> ReleaseVersion {
        match parse_version_string(s) {
            ComparableVersion::Release(r) => r,
            ComparableVersion::Opaque(o) => panic!("expected release version, got opaque {o}"),
        }
    }

    #[test]
    fn test_parse_version_with_build_number() {
        let with_v = parse_version_string("v3.5.1.368_25010326");
        let without_v = parse_version_string("3.5.1.368_25010326");

        assert!(!with_v.is_opaque());
        assert_eq!(with_v, without_v);
        assert_eq!(release("V3.5.1.368_25010326").components(), &[3, 5, 1, 368, 25010326]);
    }

    #[test]
    fn test_parse_version_without_build_number() {
        assert_eq!(release("v3.5.1").to_string(), "3.5.1");
    }

    #[test]
    fn test_shorter_versions_pad_with_zero() {
        assert_eq!(release("3.5"), release("3.5.0"));
        assert!(release("3.5.0.1") > release("3.5"));
    }

    #[test]
    fn test_unparseable_versions_are_opaque() {
        assert_eq!(
            parse_version_string("Beta-Build"),
            ComparableVersion::Opaque("beta-build".to_string())
        );
        assert!(parse_version_string("").is_opaque());
        assert!(parse_version_string("3..5").is_opaque());
        assert!(parse_version_string("3.5.1_2_3").is_opaque());
        assert!(parse_version_string("99999999999999999999999.1").is_opaque());
    }

    #[test]
    fn test_version_comparison_build_numbers() {
        let result = compare_versions("v3.5.1.368_25010324", Some("v3.5.1.368_25010326"));

        assert!(result.has_update);
        assert_eq!(result.outcome, ComparisonOutcome::UpdateAvailable);
        assert!(result.message.contains("New version available"));
        assert!(result.message.contains("25010326") && result.message.contains("25010324"));
    }

    #[test]
    fn test_version_comparison_same_versions() {
        let result = compare_versions("v3.5.1.368_25010326", Some("v3.5.1.368_25010326"));

        assert!(!result.has_update);
        assert_eq!(result.outcome, ComparisonOutcome::UpToDate);
        assert!(result.message.to_lowercase().contains("latest"));
    }

    #[test]
    fn test_version_comparison_major_difference() {
        let result = compare_versions("v3.4.0.293_24010832", Some("v3.5.1.368_25010326"));
        assert!(result.has_update);
    }

    #[test]
    fn test_version_comparison_newer_current() {
        let result = compare_versions("v3.6.0.400_26010101", Some("v3.5.1.368_25010326"));

        assert!(!result.has_update);
        assert_eq!(result.outcome, ComparisonOutcome::CurrentIsNewer);
        assert!(result.message.contains("newer than listed"));
    }

    #[test]
    fn test_prefix_only_difference_is_same_version() {
        let result = compare_versions("3.5.1.368_25010326", Some("v3.5.1.368_25010326"));
        assert!(!result.has_update);
        assert_eq!(result.outcome, ComparisonOutcome::UpToDate);
    }

    #[test]
    fn test_missing_latest_version() {
        let result = compare_versions("v3.5.1.368_25010326", None);

        assert!(!result.has_update);
        assert_eq!(result.outcome, ComparisonOutcome::LatestUnknown);
        assert_eq!(result.message, "Could not determine latest version");
    }

    #[test]
    fn test_malformed_current_degrades_to_string_comparison() {
        let result = compare_versions("unknown", Some("v3.5.1.368_25010326"));
        assert!(result.has_update);
        assert_eq!(result.outcome, ComparisonOutcome::Incomparable);
        assert_eq!(result.message, "Current: unknown, Latest: v3.5.1.368_25010326");

        let same = compare_versions("custom-build", Some("custom-build"));
        assert!(!same.has_update);
    }

    #[test]
    fn test_ordering_agrees_with_componentwise_comparison() {
        let versions = [
            "3.4.0.293_24010832",
            "3.5.0.100_24120101",
            "3.5.1.368_25010324",
            "3.5.1.368_25010326",
            "3.5.1.369_25010101",
            "3.6.0.400_26010101",
        ];

        for (i, current) in versions.iter().enumerate() {
            for (j, latest) in versions.iter().enumerate() {
                let result = compare_versions(current, Some(latest));
                assert_eq!(result.has_update, j > i, "{current} -> {latest}");
            }
        }
    }
}
