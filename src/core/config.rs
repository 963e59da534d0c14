// 分析配置管理
// 开发心理：一次分析的开关集中为一个可序列化配置对象，由调用方显式传递
// 设计原则：合理默认值、JSON加载保存、加载后校验

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use log::debug;

use crate::fusion::pairing::PairingMetric;
use super::error::{FusionError, Result};

// 分析配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // 效果评分是否按威胁评分表加权
    pub adjust_for_threat_score: bool,

    // 最优配对搜索的目标指标
    pub pairing_metric: PairingMetric,

    // 威胁评分表的持久化路径
    pub threat_table_path: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            adjust_for_threat_score: false,
            pairing_metric: PairingMetric::EffectiveDelta,
            threat_table_path: PathBuf::from("data/threat_scores.json"),
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        debug!("分析配置加载完成: {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let contents = serde_json::to_string_pretty(&self)?;
        fs::write(path, contents)?;
        debug!("分析配置已写入 {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.adjust_for_threat_score && self.threat_table_path.as_os_str().is_empty() {
            return Err(FusionError::ConfigError(
                "启用威胁加权时必须提供威胁评分表路径".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert!(!config.adjust_for_threat_score);
        assert_eq!(config.pairing_metric, PairingMetric::EffectiveDelta);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = AnalysisConfig {
            adjust_for_threat_score: true,
            pairing_metric: PairingMetric::TotalWeaknesses,
            threat_table_path: PathBuf::from("scores.json"),
        };
        config.save(&path).unwrap();

        let loaded = AnalysisConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_empty_table_path() {
        let config = AnalysisConfig {
            adjust_for_threat_score: true,
            pairing_metric: PairingMetric::EffectiveDelta,
            threat_table_path: PathBuf::new(),
        };
        assert!(matches!(config.validate(), Err(FusionError::ConfigError(_))));
    }
}
