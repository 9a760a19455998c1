use crate::error::{PumpzError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "pumps_data.json";
const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for pumpz, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PumpzConfig {
    /// Dataset read at startup when no `--data` flag is given
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Page sizes the table can be switched to
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,

    /// Page size used when the table is first shown
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_page_sizes() -> Vec<usize> {
    vec![5, 10, 25, 50]
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PumpzConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            page_sizes: default_page_sizes(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PumpzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PumpzError::Io)?;
        let config: PumpzConfig =
            serde_json::from_str(&content).map_err(PumpzError::Serialization)?;
        Ok(config.normalized())
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PumpzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PumpzError::Serialization)?;
        fs::write(config_path, content).map_err(PumpzError::Io)?;
        Ok(())
    }

    /// Sorted, deduplicated, non-zero page sizes that include the default.
    pub fn normalized(mut self) -> Self {
        self.page_sizes.retain(|s| *s > 0);
        if self.page_sizes.is_empty() {
            self.page_sizes = default_page_sizes();
        }
        if self.default_page_size == 0 {
            self.default_page_size = DEFAULT_PAGE_SIZE;
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            self.page_sizes.push(self.default_page_size);
        }
        self.page_sizes.sort_unstable();
        self.page_sizes.dedup();
        self
    }

    pub fn allows_page_size(&self, size: usize) -> bool {
        self.page_sizes.contains(&size)
    }

    pub fn set_default_page_size(&mut self, size: usize) -> Result<()> {
        if !self.allows_page_size(size) {
            return Err(PumpzError::InvalidPageSize(size));
        }
        self.default_page_size = size;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PumpzConfig::default();
        assert_eq!(config.data_file, PathBuf::from("pumps_data.json"));
        assert_eq!(config.default_page_size, 10);
        assert!(config.allows_page_size(25));
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = PumpzConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, PumpzConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("nested");

        let mut config = PumpzConfig::default();
        config.set_default_page_size(25).unwrap();
        config.data_file = PathBuf::from("/srv/pumps.json");
        config.save(&dir).unwrap();

        let loaded = PumpzConfig::load(&dir).unwrap();
        assert_eq!(loaded.default_page_size, 25);
        assert_eq!(loaded.data_file, PathBuf::from("/srv/pumps.json"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"default_page_size": 3}"#,
        )
        .unwrap();

        let config = PumpzConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.page_sizes, vec![3, 5, 10, 25, 50]);
        assert_eq!(config.data_file, PathBuf::from("pumps_data.json"));
    }

    #[test]
    fn test_normalize_drops_zero_and_duplicates() {
        let config = PumpzConfig {
            data_file: default_data_file(),
            page_sizes: vec![0, 20, 5, 20],
            default_page_size: 0,
        }
        .normalized();
        assert_eq!(config.page_sizes, vec![5, 10, 20]);
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn test_rejects_disallowed_default() {
        let mut config = PumpzConfig::default();
        assert!(matches!(
            config.set_default_page_size(7),
            Err(PumpzError::InvalidPageSize(7))
        ));
        assert_eq!(config.default_page_size, 10);
    }
}
