use crate::error::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Matching settings, usually loaded from `~/.config/pim-match/config.json`.
///
/// Everything the matcher needs travels in this struct; nothing is read from
/// the environment at match time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Identifier column on the reference sheet.
    pub id_column: String,
    /// Name of the column appended to the import sheet.
    pub match_column: String,
    /// Columns whose agreement scores `priority_weight` instead of 1.
    pub priority_columns: Vec<String>,
    pub priority_weight: u32,
    /// Optional BASE/DERIVED inheritance fill, applied to both sheets
    /// before matching.
    pub hierarchy: Option<HierarchySettings>,
    /// Worksheet names; the first sheet is used when unset.
    pub import_sheet: Option<String>,
    pub reference_sheet: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchySettings {
    /// Column holding the hierarchy level tag.
    pub level_column: String,
    pub base_tag: String,
    pub derived_tag: String,
    /// Columns a blank derived row takes from the last base row.
    pub inherit_columns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id_column: "Unique ID".into(),
            match_column: "Matched Unique ID".into(),
            priority_columns: vec![
                "Base Part Number".into(),
                "Sellable Part Number".into(),
                "Brand".into(),
                "Color".into(),
            ],
            priority_weight: 10,
            hierarchy: Some(HierarchySettings::default()),
            import_sheet: None,
            reference_sheet: None,
        }
    }
}

impl Default for HierarchySettings {
    fn default() -> Self {
        Self {
            level_column: "salsify:data_inheritance_hierarchy_level_id".into(),
            base_tag: "base".into(),
            derived_tag: "variant".into(),
            inherit_columns: vec!["Brand".into()],
        }
    }
}

impl Settings {
    /// Load from an explicit path, or the user config file if present,
    /// or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(MatchError::FileNotFound(p.display().to_string()));
                }
                p.to_path_buf()
            }
            None => {
                let default = Self::config_path()?;
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&config_path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MatchError::Settings("home directory not found".into()))?;
        Ok(home.join(".config").join("pim-match").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.id_column.trim().is_empty() {
            return Err(MatchError::Settings("id_column must not be empty".into()));
        }
        if self.match_column.trim().is_empty() {
            return Err(MatchError::Settings("match_column must not be empty".into()));
        }
        if self.priority_weight == 0 {
            return Err(MatchError::Settings(
                "priority_weight must be at least 1".into(),
            ));
        }
        if let Some(h) = &self.hierarchy {
            if h.level_column.trim().is_empty() {
                return Err(MatchError::Settings(
                    "hierarchy.level_column must not be empty".into(),
                ));
            }
            if h.base_tag.trim().is_empty() || h.derived_tag.trim().is_empty() {
                return Err(MatchError::Settings(
                    "hierarchy tags must not be empty".into(),
                ));
            }
            if h.inherit_columns.is_empty() {
                return Err(MatchError::Settings(
                    "hierarchy.inherit_columns must name at least one column".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn zero_weight_is_rejected() {
        let settings = Settings {
            priority_weight: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn empty_inherit_list_is_rejected() {
        let mut settings = Settings::default();
        settings.hierarchy.as_mut().unwrap().inherit_columns.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn roundtrips_through_json() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id_column, settings.id_column);
        assert_eq!(back.priority_weight, settings.priority_weight);
    }
}
