// 效果评分器
// 开发心理：把抗性/弱点集合压缩为单一净优势分数，支持威胁加权模式
// 设计原则：集合已由解析器保证不相交，直接求和作差；加权模式缺失条目硬失败

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::data::provider::PokedexProvider;
use crate::data::threat_store::ThreatScoreTable;
use crate::pokemon::types::{ResolvedTyping, TypeName};

// 评分模式
#[derive(Debug, Clone, Copy)]
pub enum ScoringMode<'a> {
    // 按集合大小计数
    Unweighted,
    // 按威胁评分表加权
    ThreatWeighted(&'a ThreatScoreTable),
}

// 效果概况：五个不相交类别 + 中立集合 + 合计与净优势分数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessProfile {
    pub normal_resistances: BTreeSet<TypeName>,
    pub super_resistances: BTreeSet<TypeName>,
    pub immunities: BTreeSet<TypeName>,
    pub neutral_types: BTreeSet<TypeName>,
    pub normal_weaknesses: BTreeSet<TypeName>,
    pub super_weaknesses: BTreeSet<TypeName>,
    pub total_resistances: u32,
    pub total_weaknesses: u32,
    pub effective_delta: f64,
}

// 单个集合的贡献：无权重时为基数，加权时为成员评分之和
fn set_contribution(set: &BTreeSet<TypeName>, mode: ScoringMode) -> Result<f64> {
    match mode {
        ScoringMode::Unweighted => Ok(set.len() as f64),
        ScoringMode::ThreatWeighted(table) => {
            let mut total = 0.0;
            for type_name in set {
                total += table.score_of(*type_name)?;
            }
            Ok(total)
        }
    }
}

// 净优势分数：抗性 + 超级抗性 + 2×免疫 − 弱点 − 2×超级弱点
// 单属性时超级集合为空，退化为 抗性 + 2×免疫 − 弱点
pub fn effective_delta(resolved: &ResolvedTyping, mode: ScoringMode) -> Result<f64> {
    let delta_resist = set_contribution(&resolved.normal_resistances, mode)?
        + set_contribution(&resolved.super_resistances, mode)?
        + set_contribution(&resolved.immunities, mode)? * 2.0;

    let delta_weak = set_contribution(&resolved.normal_weaknesses, mode)?
        + set_contribution(&resolved.super_weaknesses, mode)? * 2.0;

    Ok(delta_resist - delta_weak)
}

// 解析属性组合并评分，产出完整效果概况
// 合计口径沿袭数据源：单属性的合计抗性不含免疫，双属性的合计抗性包含免疫
pub fn analyze_typing(
    primary: TypeName,
    secondary: Option<TypeName>,
    provider: &dyn PokedexProvider,
    mode: ScoringMode,
) -> Result<EffectivenessProfile> {
    let primary_relations = provider.fetch_type_relations(primary)?;

    let (resolved, total_resistances, total_weaknesses) = match secondary {
        Some(second) => {
            let secondary_relations = provider.fetch_type_relations(second)?;
            let resolved = ResolvedTyping::resolve_dual(&primary_relations, &secondary_relations);
            let resist = resolved.normal_resistances.len()
                + resolved.super_resistances.len()
                + resolved.immunities.len();
            let weak = resolved.normal_weaknesses.len() + resolved.super_weaknesses.len();
            (resolved, resist as u32, weak as u32)
        }
        None => {
            let resolved = ResolvedTyping::resolve_single(&primary_relations);
            let resist = resolved.normal_resistances.len();
            let weak = resolved.normal_weaknesses.len();
            (resolved, resist as u32, weak as u32)
        }
    };

    let delta = effective_delta(&resolved, mode)?;

    Ok(EffectivenessProfile {
        normal_resistances: resolved.normal_resistances,
        super_resistances: resolved.super_resistances,
        immunities: resolved.immunities,
        neutral_types: resolved.neutral_types,
        normal_weaknesses: resolved.normal_weaknesses,
        super_weaknesses: resolved.super_weaknesses,
        total_resistances,
        total_weaknesses,
        effective_delta: delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::StaticDex;

    fn types_of(names: &[&str]) -> BTreeSet<TypeName> {
        names
            .iter()
            .map(|n| TypeName::from_name(n).unwrap())
            .collect()
    }

    #[test]
    fn test_single_type_delta() {
        let provider = StaticDex::new();
        // 电：抗飞行/钢/电(3)，弱地面(1)，无免疫 → 3 + 0 - 1 = 2
        let profile =
            analyze_typing(TypeName::Electric, None, &provider, ScoringMode::Unweighted).unwrap();
        assert_eq!(profile.effective_delta, 2.0);
        assert_eq!(profile.total_resistances, 3);
        assert_eq!(profile.total_weaknesses, 1);
        assert!(profile.super_resistances.is_empty());
        assert!(profile.super_weaknesses.is_empty());
    }

    #[test]
    fn test_single_type_immunity_counts_double() {
        let provider = StaticDex::new();
        // 一般：免疫幽灵(1)，弱格斗(1)，无抗性 → 0 + 2 - 1 = 1
        let profile =
            analyze_typing(TypeName::Normal, None, &provider, ScoringMode::Unweighted).unwrap();
        assert_eq!(profile.effective_delta, 1.0);
        // 合计口径：单属性合计抗性不含免疫
        assert_eq!(profile.total_resistances, 0);
    }

    #[test]
    fn test_dual_type_delta_fire_flying() {
        let provider = StaticDex::new();
        // 火/飞行：普抗4 + 超抗2 + 2×免疫1 − 普弱2 − 2×超弱1 = 4
        let profile = analyze_typing(
            TypeName::Fire,
            Some(TypeName::Flying),
            &provider,
            ScoringMode::Unweighted,
        )
        .unwrap();
        assert_eq!(profile.effective_delta, 4.0);
        assert_eq!(profile.total_resistances, 7);
        assert_eq!(profile.total_weaknesses, 3);
    }

    #[test]
    fn test_threat_weighted_delta() {
        let provider = StaticDex::new();
        let mut table = ThreatScoreTable::default();
        for t in TypeName::ALL {
            table.insert(t, 1.0);
        }
        // 全表1.0时加权结果与计数结果一致
        let unweighted = analyze_typing(
            TypeName::Fire,
            Some(TypeName::Flying),
            &provider,
            ScoringMode::Unweighted,
        )
        .unwrap();
        let weighted = analyze_typing(
            TypeName::Fire,
            Some(TypeName::Flying),
            &provider,
            ScoringMode::ThreatWeighted(&table),
        )
        .unwrap();
        assert_eq!(unweighted.effective_delta, weighted.effective_delta);

        // 岩石超弱点加倍计入：提高岩石评分应使delta下降2×增量
        let mut biased = table.clone();
        biased.insert(TypeName::Rock, 2.0);
        let biased_profile = analyze_typing(
            TypeName::Fire,
            Some(TypeName::Flying),
            &provider,
            ScoringMode::ThreatWeighted(&biased),
        )
        .unwrap();
        assert_eq!(biased_profile.effective_delta, weighted.effective_delta - 2.0);
    }

    #[test]
    fn test_threat_weighted_missing_entry_fails() {
        let provider = StaticDex::new();
        let mut table = ThreatScoreTable::default();
        table.insert(TypeName::Fire, 1.0);

        let result = analyze_typing(
            TypeName::Electric,
            None,
            &provider,
            ScoringMode::ThreatWeighted(&table),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_delta_invariant_under_relabeling() {
        // 分数只依赖集合大小，与具体属性无关
        let profile_a = ResolvedTyping {
            normal_resistances: types_of(&["fire", "water"]),
            super_resistances: types_of(&["grass"]),
            immunities: types_of(&["ghost"]),
            neutral_types: BTreeSet::new(),
            normal_weaknesses: types_of(&["rock", "ice"]),
            super_weaknesses: types_of(&["dark"]),
        };
        let profile_b = ResolvedTyping {
            normal_resistances: types_of(&["electric", "steel"]),
            super_resistances: types_of(&["fairy"]),
            immunities: types_of(&["dragon"]),
            neutral_types: BTreeSet::new(),
            normal_weaknesses: types_of(&["bug", "poison"]),
            super_weaknesses: types_of(&["normal"]),
        };

        let delta_a = effective_delta(&profile_a, ScoringMode::Unweighted).unwrap();
        let delta_b = effective_delta(&profile_b, ScoringMode::Unweighted).unwrap();
        assert_eq!(delta_a, delta_b);
        // 2 + 1 + 2×1 − 2 − 2×1 = 1
        assert_eq!(delta_a, 1.0);
    }
}
