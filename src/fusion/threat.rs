// 复合进攻威胁评分
// 开发心理：多项进攻指标归一化后加权合成单一排名分数
// 设计原则：拔群/被抗次数按属性总数归一，其余指标全局min-max归一，结果映射到[0.5, 1.5]

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use log::debug;

use crate::pokemon::types::TypeName;

// 归一化用的属性总数
const TYPE_COUNT: f64 = 18.0;

// 合成时参与平均的指标数
const METRIC_COUNT: f64 = 10.0;

// 单一属性的进攻指标集
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OffensiveMetrics {
    #[serde(rename = "Super_Effective_Count")]
    pub super_effective_count: f64,
    #[serde(rename = "Resisted_Count")]
    pub resisted_count: f64,
    #[serde(rename = "Move_Count")]
    pub move_count: f64,
    #[serde(rename = "Average_Power")]
    pub average_power: f64,
    #[serde(rename = "Pokemon_with_Moves_Count")]
    pub pokemon_with_moves_count: f64,
    #[serde(rename = "Pokemon_with_STAB")]
    pub pokemon_with_stab: f64,
    #[serde(rename = "Average_Attack")]
    pub average_attack: f64,
    #[serde(rename = "Average_Special_Attack")]
    pub average_special_attack: f64,
    #[serde(rename = "STAB_Average_Attack")]
    pub stab_average_attack: f64,
    #[serde(rename = "STAB_Average_Special_Attack")]
    pub stab_average_special_attack: f64,
}

// 各指标权重；缺省全为1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    #[serde(rename = "Super_Effective_Count")]
    pub super_effective_count: f64,
    #[serde(rename = "Resisted_Count")]
    pub resisted_count: f64,
    #[serde(rename = "Move_Count")]
    pub move_count: f64,
    #[serde(rename = "Average_Power")]
    pub average_power: f64,
    #[serde(rename = "Pokemon_with_Moves_Count")]
    pub pokemon_with_moves_count: f64,
    #[serde(rename = "Pokemon_with_STAB")]
    pub pokemon_with_stab: f64,
    #[serde(rename = "Average_Attack")]
    pub average_attack: f64,
    #[serde(rename = "Average_Special_Attack")]
    pub average_special_attack: f64,
    #[serde(rename = "STAB_Average_Attack")]
    pub stab_average_attack: f64,
    #[serde(rename = "STAB_Average_Special_Attack")]
    pub stab_average_special_attack: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            super_effective_count: 1.0,
            resisted_count: 1.0,
            move_count: 1.0,
            average_power: 1.0,
            pokemon_with_moves_count: 1.0,
            pokemon_with_stab: 1.0,
            average_attack: 1.0,
            average_special_attack: 1.0,
            stab_average_attack: 1.0,
            stab_average_special_attack: 1.0,
        }
    }
}

impl MetricWeights {
    // 面板默认权重：偏重拔群覆盖与平均威力
    pub fn recommended() -> Self {
        Self {
            super_effective_count: 2.0,
            resisted_count: 1.0,
            move_count: 0.1,
            average_power: 1.5,
            pokemon_with_moves_count: 1.5,
            pokemon_with_stab: 1.0,
            average_attack: 0.5,
            average_special_attack: 0.5,
            stab_average_attack: 1.0,
            stab_average_special_attack: 1.0,
        }
    }
}

// 全局min-max范围
#[derive(Debug, Clone, Copy)]
struct Range {
    min: f64,
    max: f64,
}

impl Range {
    fn new() -> Self {
        Self { min: f64::INFINITY, max: f64::NEG_INFINITY }
    }

    fn update(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    // 区间退化（所有属性同值）时该指标不携带排序信号，归一为0
    fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.0;
        }
        (value - self.min) / span
    }
}

// min-max归一化的八项指标的取值函数
const SCALED_METRICS: [fn(&OffensiveMetrics) -> f64; 8] = [
    |m| m.move_count,
    |m| m.average_power,
    |m| m.pokemon_with_moves_count,
    |m| m.pokemon_with_stab,
    |m| m.average_attack,
    |m| m.average_special_attack,
    |m| m.stab_average_attack,
    |m| m.stab_average_special_attack,
];

// 计算每个属性的复合进攻威胁评分；输出无序，调用方自行排序
pub fn composite_offensive_threat_scores(
    potentials: &HashMap<TypeName, OffensiveMetrics>,
    weights: Option<&MetricWeights>,
) -> HashMap<TypeName, f64> {
    let default_weights = MetricWeights::default();
    let weights = weights.unwrap_or(&default_weights);

    // 八项指标的全局min-max
    let mut ranges = [Range::new(); 8];
    for metrics in potentials.values() {
        for (range, accessor) in ranges.iter_mut().zip(SCALED_METRICS.iter()) {
            range.update(accessor(metrics));
        }
    }

    let mut scores = HashMap::with_capacity(potentials.len());

    for (type_name, metrics) in potentials {
        // 拔群次数按属性总数归一；被抗次数反向归一
        let normalized_super = metrics.super_effective_count / TYPE_COUNT;
        let normalized_resisted = 1.0 - metrics.resisted_count / TYPE_COUNT;

        let weighted_sum = weights.super_effective_count * normalized_super
            + weights.resisted_count * normalized_resisted
            + weights.move_count * ranges[0].normalize(metrics.move_count)
            + weights.average_power * ranges[1].normalize(metrics.average_power)
            + weights.pokemon_with_moves_count * ranges[2].normalize(metrics.pokemon_with_moves_count)
            + weights.pokemon_with_stab * ranges[3].normalize(metrics.pokemon_with_stab)
            + weights.average_attack * ranges[4].normalize(metrics.average_attack)
            + weights.average_special_attack * ranges[5].normalize(metrics.average_special_attack)
            + weights.stab_average_attack * ranges[6].normalize(metrics.stab_average_attack)
            + weights.stab_average_special_attack
                * ranges[7].normalize(metrics.stab_average_special_attack);

        // 加权平均后从[0,1]映射到[0.5,1.5]
        let composite = weighted_sum / METRIC_COUNT;
        let composite = composite * (1.5 - 0.5) + 0.5;

        scores.insert(*type_name, composite);
    }

    debug!("复合威胁评分计算完成: {}个属性", scores.len());
    scores
}
