//! Protocol parameters

use crate::{NanoError, NanoResult, WorkDifficulty, WorkThresholds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Network parameters that vary between deployments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Minimum work difficulties
    pub work_thresholds: WorkThresholds,
    /// Accept `xrb_` addresses when decoding
    pub accept_legacy_prefix: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            work_thresholds: WorkThresholds::LIVE,
            accept_legacy_prefix: true,
        }
    }
}

impl ProtocolConfig {
    pub fn new(work_thresholds: WorkThresholds, accept_legacy_prefix: bool) -> Self {
        Self {
            work_thresholds,
            accept_legacy_prefix,
        }
    }

    /// Parse from TOML. Missing keys take their live network values.
    pub fn from_toml_str(text: &str) -> NanoResult<Self> {
        let config: ProtocolConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> NanoResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NanoError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        debug!("Loaded protocol config from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> NanoResult<String> {
        toml::to_string_pretty(self).map_err(|e| NanoError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> NanoResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_toml_string()?).map_err(|e| {
            NanoError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> NanoResult<()> {
        let thresholds = &self.work_thresholds;
        for (name, value) in [
            ("send", thresholds.send),
            ("receive", thresholds.receive),
            ("legacy", thresholds.legacy),
        ] {
            if value == WorkDifficulty::new(0) {
                return Err(NanoError::Config(format!(
                    "{name} work threshold must be greater than 0"
                )));
            }
        }

        if thresholds.receive > thresholds.send {
            return Err(NanoError::Config(format!(
                "receive threshold {} exceeds send threshold {}",
                thresholds.receive, thresholds.send
            )));
        }

        Ok(())
    }

    pub fn with_work_thresholds(mut self, thresholds: WorkThresholds) -> Self {
        self.work_thresholds = thresholds;
        self
    }

    pub fn with_legacy_prefix(mut self, accept: bool) -> Self {
        self.accept_legacy_prefix = accept;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ProtocolConfig::default();
        assert_eq!(config.work_thresholds, WorkThresholds::LIVE);
        assert!(config.accept_legacy_prefix);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ProtocolConfig::from_toml_str("accept_legacy_prefix = false").unwrap();
        assert!(!config.accept_legacy_prefix);
        assert_eq!(config.work_thresholds, WorkThresholds::LIVE);

        let config = ProtocolConfig::from_toml_str("[work_thresholds]\nsend = \"fffffffc00000000\"").unwrap();
        assert_eq!(config.work_thresholds.send, WorkDifficulty::new(0xfffffffc00000000));
        assert_eq!(config.work_thresholds.receive, WorkThresholds::LIVE.receive);
        assert_eq!(config.work_thresholds.legacy, WorkThresholds::LIVE.legacy);
    }

    #[test]
    fn test_toml_thresholds() {
        let text = r#"
            [work_thresholds]
            send = "fffffe0000000000"
            receive = "fffff00000000000"
            legacy = "fffff00000000000"
        "#;
        let config = ProtocolConfig::from_toml_str(text).unwrap();
        assert_eq!(config.work_thresholds.send, WorkDifficulty::new(0xfffffe0000000000));
        assert_eq!(config.work_thresholds.receive, WorkDifficulty::new(0xfffff00000000000));
    }

    #[test]
    fn test_config_validation() {
        let mut thresholds = WorkThresholds::LIVE;
        thresholds.send = WorkDifficulty::new(0);
        let err = ProtocolConfig::default()
            .with_work_thresholds(thresholds)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let mut thresholds = WorkThresholds::LIVE;
        thresholds.receive = WorkDifficulty::new(u64::MAX);
        assert!(ProtocolConfig::default()
            .with_work_thresholds(thresholds)
            .validate()
            .is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = ProtocolConfig::from_toml_str("accept_legacy_prefix = 3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = ProtocolConfig::from_toml_str("[work_thresholds]\nsend = \"xyz\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_file_operations() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("protocol.toml");

        let config = ProtocolConfig::default().with_legacy_prefix(false);
        config.save_to_file(&file_path).unwrap();

        let loaded = ProtocolConfig::from_file(&file_path).unwrap();
        assert_eq!(loaded, config);

        let err = ProtocolConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
