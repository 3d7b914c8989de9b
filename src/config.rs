//! Network configuration consumed when a detector is initialized.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error type for loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Armor network settings with one model file per backend.
///
/// ```yaml
/// backend: recorded
/// class_num: 4
/// point_num: 4
/// models:
///   recorded: /data/armor-session.yaml
///   burn: /models/armor.mpk
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetConfig {
    /// Registry id of the backend to use
    pub backend: String,
    pub class_num: usize,
    pub point_num: usize,
    /// Model path keyed by backend id
    #[serde(default)]
    pub models: HashMap<String, PathBuf>,
}

impl NetConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        contents.parse()
    }

    /// Settings for the configured backend, if it has a model path.
    pub fn yolo_config(&self) -> Option<YoloConfig> {
        self.yolo_config_for(&self.backend)
    }

    /// Settings for `backend`, if it has a model path.
    pub fn yolo_config_for(&self, backend: &str) -> Option<YoloConfig> {
        self.models.get(backend).map(|model_path| YoloConfig {
            model_path: model_path.clone(),
            class_num: self.class_num,
            point_num: self.point_num,
        })
    }
}

impl FromStr for NetConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_yaml::from_str(s)?)
    }
}

/// Arguments for [`Yolo::initialize`](crate::nn::Yolo::initialize).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoloConfig {
    pub model_path: PathBuf,
    pub class_num: usize,
    pub point_num: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG: &str = "\
backend: recorded
class_num: 4
point_num: 5
models:
  recorded: /data/session.yaml
  burn: /models/armor.mpk
";

    #[test]
    fn test_parse_and_select_backend() {
        let cfg: NetConfig = CONFIG.parse().unwrap();
        assert_eq!(cfg.backend, "recorded");

        let yolo = cfg.yolo_config().unwrap();
        assert_eq!(yolo.model_path, PathBuf::from("/data/session.yaml"));
        assert_eq!(yolo.class_num, 4);
        assert_eq!(yolo.point_num, 5);

        let burn = cfg.yolo_config_for("burn").unwrap();
        assert_eq!(burn.model_path, PathBuf::from("/models/armor.mpk"));
        assert!(cfg.yolo_config_for("tensorrt").is_none());
    }

    #[test]
    fn test_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(CONFIG.as_bytes()).unwrap();
        let cfg = NetConfig::load(temp.path()).unwrap();
        assert_eq!(cfg.models.len(), 2);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            NetConfig::load("/nonexistent/net.yaml"),
            Err(ConfigError::Io { .. })
        ));
        assert!(matches!(
            "backend: [".parse::<NetConfig>(),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_models_default_empty() {
        let cfg: NetConfig = "backend: recorded\nclass_num: 4\npoint_num: 4\n"
            .parse()
            .unwrap();
        assert!(cfg.yolo_config().is_none());
    }
}
