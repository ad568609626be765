use crate::error::{HitlensError, Result};
use crate::merge::MergePriority;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How `refresh_hit_counts` schedules the two backend polls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStrategy {
    /// Browser poll starts only after the native poll has completed.
    #[default]
    Sequential,
    /// Both polls run together; the merge waits for both.
    Concurrent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    #[serde(default)]
    pub merge_priority: MergePriority,
    #[serde(default)]
    pub refresh_strategy: RefreshStrategy,
    /// Root used to relativize local paths. Unset means no project is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,
}

impl AggregatorConfig {
    /// Read a JSON config; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AggregatorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    pub fn with_refresh_strategy(mut self, strategy: RefreshStrategy) -> Self {
        self.refresh_strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.merge_priority.order().is_empty() {
            return Err(HitlensError::Config(
                "merge_priority must name at least one backend".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitlens_api::Backend;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = AggregatorConfig::default();
        assert_eq!(config.refresh_strategy, RefreshStrategy::Sequential);
        assert_eq!(config.merge_priority.winner(), Some(Backend::Browser));
        assert!(config.project_root.is_none());
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested/hitlens.json");

        let config = AggregatorConfig {
            merge_priority: MergePriority::new([Backend::Browser, Backend::Native]),
            refresh_strategy: RefreshStrategy::Concurrent,
            project_root: Some(PathBuf::from("/srv/shop")),
        };
        config.save_to(&config_path)?;

        let loaded = AggregatorConfig::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = AggregatorConfig::load_from(&temp_dir.path().join("missing.json"))?;
        assert_eq!(config, AggregatorConfig::default());
        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("hitlens.json");
        std::fs::write(&config_path, r#"{ "refresh_strategy": "concurrent" }"#)?;

        let config = AggregatorConfig::load_from(&config_path)?;
        assert_eq!(config.refresh_strategy, RefreshStrategy::Concurrent);
        assert_eq!(config.merge_priority, MergePriority::default());
        Ok(())
    }

    #[test]
    fn test_duplicated_priority_keeps_first_occurrence() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("hitlens.json");
        std::fs::write(
            &config_path,
            r#"{ "merge_priority": ["browser", "native", "browser"] }"#,
        )?;

        let config = AggregatorConfig::load_from(&config_path)?;
        assert_eq!(
            config.merge_priority.order(),
            &[Backend::Browser, Backend::Native]
        );
        assert_eq!(config.merge_priority.winner(), Some(Backend::Native));
        Ok(())
    }

    #[test]
    fn test_empty_priority_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("hitlens.json");
        std::fs::write(&config_path, r#"{ "merge_priority": [] }"#)?;

        let err = AggregatorConfig::load_from(&config_path).unwrap_err();
        assert!(matches!(err, HitlensError::Config(_)));
        Ok(())
    }
}
