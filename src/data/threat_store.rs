// 威胁评分表持久化
// 开发心理：每属性威胁权重外部持久化为JSON，加权模式要求全表覆盖
// 设计原则：缺失条目硬失败、不做静默默认值

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use log::{debug, warn};

use crate::core::error::{FusionError, Result};
use crate::pokemon::types::TypeName;

// 属性 → 威胁评分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreatScoreTable {
    scores: HashMap<TypeName, f64>,
}

impl ThreatScoreTable {
    pub fn from_scores(scores: HashMap<TypeName, f64>) -> Self {
        Self { scores }
    }

    // 从JSON文件加载；文件缺失或损坏向上传播
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let table: ThreatScoreTable = serde_json::from_str(&contents)?;
        debug!("威胁评分表加载完成: {}个条目", table.scores.len());
        Ok(table)
    }

    // 持久化为JSON文件
    pub fn persist(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string(&self)?;
        fs::write(path, contents)?;
        debug!("威胁评分表已写入 {}", path.display());
        Ok(())
    }

    // 查询单个属性的评分；缺失条目为MissingThreatScore
    pub fn score_of(&self, type_name: TypeName) -> Result<f64> {
        match self.scores.get(&type_name) {
            Some(score) => Ok(*score),
            None => {
                warn!("威胁评分缺失: {}", type_name);
                Err(FusionError::MissingThreatScore(type_name.name().to_string()))
            }
        }
    }

    pub fn insert(&mut self, type_name: TypeName, score: f64) {
        self.scores.insert(type_name, score);
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    // 全部18个属性是否都有条目
    pub fn is_complete(&self) -> bool {
        TypeName::ALL.iter().all(|t| self.scores.contains_key(t))
    }

    // 加权模式使用前的完整性校验
    pub fn validate(&self) -> Result<()> {
        for t in TypeName::ALL {
            if !self.scores.contains_key(&t) {
                return Err(FusionError::MissingThreatScore(t.name().to_string()));
            }
        }
        Ok(())
    }
}
