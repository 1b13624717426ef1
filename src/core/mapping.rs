use crate::domain::model::ModelEntry;
use std::collections::{BTreeMap, HashMap};

/// Vendor API identifiers for one `(model, hardware version)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiIds {
    pub product_id: u32,
    pub hardware_version_id: u32,
}

/// Model → vendor product id / hardware revision id table.
///
/// Starts from the built-in entries and can be extended from the config file,
/// so new devices do not need a rebuild.
#[derive(Debug, Clone, Default)]
pub struct ModelMapping {
    models: HashMap<String, ModelEntry>,
}

impl ModelMapping {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 內建對照表（逐步補齊）
    pub fn builtin() -> Self {
        let mut mapping = Self::empty();
        mapping.insert(
            "RLN8-410",
            ModelEntry {
                product_id: 33,
                hardware_versions: BTreeMap::from([("N2MB02".to_string(), 231)]),
            },
        );
        mapping
    }

    /// Built-in table overlaid with config-supplied models.
    pub fn with_overrides(overrides: &BTreeMap<String, ModelEntry>) -> Self {
        let mut mapping = Self::builtin();
        for (model, entry) in overrides {
            mapping.insert(model, entry.clone());
        }
        mapping
    }

    /// Adds a model. An existing entry takes the new product id and merges the
    /// hardware versions, new labels winning.
    pub fn insert(&mut self, model: &str, entry: ModelEntry) {
        match self.models.get_mut(model) {
            Some(existing) => {
                existing.product_id = entry.product_id;
                existing.hardware_versions.extend(entry.hardware_versions);
            }
            None => {
                self.models.insert(model.to_string(), entry);
            }
        }
    }

    /// 找不到對應是正常情況，回傳 None 讓解析器改走備援策略
    pub fn lookup(&self, model: &str, hardware_version: &str) -> Option<ApiIds> {
        let entry = self.models.get(model)?;
        let hardware_version_id = *entry.hardware_versions.get(hardware_version)?;
        Some(ApiIds {
            product_id: entry.product_id,
            hardware_version_id,
        })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mapping_known_model() {
        let mapping = ModelMapping::builtin();
        assert_eq!(
            mapping.lookup("RLN8-410", "N2MB02"),
            Some(ApiIds {
                product_id: 33,
                hardware_version_id: 231
            })
        );
    }

    #[test]
    fn test_unknown_pairs_are_not_errors() {
        let mapping = ModelMapping::builtin();
        assert_eq!(mapping.lookup("RLN16-410", "N2MB02"), None);
        assert_eq!(mapping.lookup("RLN8-410", "N3MB01"), None);
        assert_eq!(mapping.lookup("", ""), None);
    }

    #[test]
    fn test_overrides_extend_builtin_table() {
        let overrides = BTreeMap::from([
            (
                "RLN16-410".to_string(),
                ModelEntry {
                    product_id: 40,
                    hardware_versions: BTreeMap::from([("H3MB18".to_string(), 300)]),
                },
            ),
            (
                "RLN8-410".to_string(),
                ModelEntry {
                    product_id: 33,
                    hardware_versions: BTreeMap::from([("N3MB01".to_string(), 512)]),
                },
            ),
        ]);

        let mapping = ModelMapping::with_overrides(&overrides);

        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.lookup("RLN16-410", "H3MB18").map(|ids| ids.product_id),
            Some(40)
        );
        // built-in hardware label survives the merge
        assert_eq!(
            mapping.lookup("RLN8-410", "N2MB02").map(|ids| ids.hardware_version_id),
            Some(231)
        );
        assert_eq!(
            mapping.lookup("RLN8-410", "N3MB01").map(|ids| ids.hardware_version_id),
            Some(512)
        );
    }
}
