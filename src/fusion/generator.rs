// 融合生成器
// 开发心理：枚举全部候选融合并评分排序；队伍模式只保留指定方向并附加队伍聚合行
// 设计原则：重复输入直接拒绝、查询失败整体中止、排序稳定

use std::collections::{BTreeSet, HashSet};
use serde::{Deserialize, Serialize};
use log::{debug, warn};

use crate::core::error::{FusionError, Result};
use crate::data::provider::PokedexProvider;
use crate::pokemon::species::{BaseStats, Creature, Evoline, Learnset};
use crate::pokemon::types::TypeName;
use super::calculator::{fuse_pair, Fusion};
use super::effectiveness::{analyze_typing, EffectivenessProfile, ScoringMode};

// 队伍聚合行的编号
pub const TEAM_ID: f64 = 0.0;
pub const TEAM_NAME: &str = "team";

// 分析完成的融合体：融合记录 + 效果概况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedFusion {
    pub fusion: Fusion,
    pub profile: EffectivenessProfile,
}

impl AnalyzedFusion {
    pub fn effective_delta(&self) -> f64 {
        self.profile.effective_delta
    }

    pub fn is_team_row(&self) -> bool {
        self.fusion.id == TEAM_ID
    }
}

// 融合体解析评分
fn analyze_fusion(
    fusion: Fusion,
    provider: &dyn PokedexProvider,
    mode: ScoringMode,
) -> Result<AnalyzedFusion> {
    let profile = analyze_typing(fusion.primary_type, fusion.secondary_type, provider, mode)?;
    Ok(AnalyzedFusion { fusion, profile })
}

// 按净优势分数降序的稳定排序：同分保持枚举顺序
fn sort_by_delta_descending(rows: &mut [AnalyzedFusion]) {
    rows.sort_by(|a, b| b.profile.effective_delta.total_cmp(&a.profile.effective_delta));
}

// 获取输入名单对应的种族记录；重名拒绝，查询失败中止
fn fetch_roster(names: &[String], provider: &dyn PokedexProvider) -> Result<Vec<Creature>> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.to_lowercase()) {
            return Err(FusionError::InvalidFusionInput(format!("重复的种族名: {}", name)));
        }
    }

    names
        .iter()
        .map(|name| {
            // 解析器运行前记录必须已规范化
            provider
                .fetch_creature(&name.to_lowercase())
                .map(Creature::normalized)
        })
        .collect()
}

// 枚举输入名单的全部融合：每个无序对(i<j)产出两个方向，评分后降序排序
pub fn possible_fusions(
    names: &[String],
    provider: &dyn PokedexProvider,
    mode: ScoringMode,
) -> Result<Vec<AnalyzedFusion>> {
    let roster = fetch_roster(names, provider)?;

    let mut analyzed = Vec::new();
    for i in 0..roster.len() {
        for j in (i + 1)..roster.len() {
            for fusion in fuse_pair(&roster[i], &roster[j]) {
                analyzed.push(analyze_fusion(fusion, provider, mode)?);
            }
        }
    }

    debug!("融合枚举完成: {}个输入产出{}个候选", roster.len(), analyzed.len());

    sort_by_delta_descending(&mut analyzed);
    Ok(analyzed)
}

// 队伍聚合行：成员数值求和，类别集合求并后按优先级重新去重
fn build_team_row(members: &[AnalyzedFusion]) -> AnalyzedFusion {
    let mut stats = BaseStats::default();
    let mut bst = 0u32;
    let mut total_resistances = 0u32;
    let mut total_weaknesses = 0u32;
    let mut effective_delta = 0.0f64;

    let mut normal_resistances = BTreeSet::new();
    let mut super_resistances = BTreeSet::new();
    let mut immunities = BTreeSet::new();
    let mut neutral_types = BTreeSet::new();
    let mut normal_weaknesses = BTreeSet::new();
    let mut super_weaknesses = BTreeSet::new();

    for member in members {
        stats.hp += member.fusion.stats.hp;
        stats.attack += member.fusion.stats.attack;
        stats.defense += member.fusion.stats.defense;
        stats.special_attack += member.fusion.stats.special_attack;
        stats.special_defense += member.fusion.stats.special_defense;
        stats.speed += member.fusion.stats.speed;
        bst += member.fusion.bst;

        total_resistances += member.profile.total_resistances;
        total_weaknesses += member.profile.total_weaknesses;
        effective_delta += member.profile.effective_delta;

        normal_resistances.extend(&member.profile.normal_resistances);
        super_resistances.extend(&member.profile.super_resistances);
        immunities.extend(&member.profile.immunities);
        neutral_types.extend(&member.profile.neutral_types);
        normal_weaknesses.extend(&member.profile.normal_weaknesses);
        super_weaknesses.extend(&member.profile.super_weaknesses);
    }

    // 累积去重：免疫 > 超抗 > 普抗 > 中立 > 普弱 > 超弱
    let mut running: BTreeSet<TypeName> = immunities.clone();
    super_resistances = &super_resistances - &running;
    running.extend(&super_resistances);
    normal_resistances = &normal_resistances - &running;
    running.extend(&normal_resistances);
    neutral_types = &neutral_types - &running;
    running.extend(&neutral_types);
    normal_weaknesses = &normal_weaknesses - &running;
    running.extend(&normal_weaknesses);
    super_weaknesses = &super_weaknesses - &running;

    AnalyzedFusion {
        fusion: Fusion {
            head: TEAM_NAME.to_string(),
            body: TEAM_NAME.to_string(),
            id: TEAM_ID,
            head_id: 0,
            body_id: 0,
            primary_type: TypeName::Normal,
            secondary_type: None,
            stats,
            bst,
            learnset: Learnset::new(),
            evoline: Evoline::new(),
        },
        profile: EffectivenessProfile {
            normal_resistances,
            super_resistances,
            immunities,
            neutral_types,
            normal_weaknesses,
            super_weaknesses,
            total_resistances,
            total_weaknesses,
            effective_delta,
        },
    }
}

// 从显式(head, body)配对构建队伍：每对只保留head匹配的方向，末尾附加队伍聚合行
pub fn fused_team(
    pairs: &[(String, String)],
    provider: &dyn PokedexProvider,
    mode: ScoringMode,
) -> Result<Vec<AnalyzedFusion>> {
    let mut members = Vec::with_capacity(pairs.len());

    for (head_name, body_name) in pairs {
        let head = provider.fetch_creature(&head_name.to_lowercase())?.normalized();
        let body = provider.fetch_creature(&body_name.to_lowercase())?.normalized();

        let mut matched = false;
        for fusion in fuse_pair(&head, &body) {
            if fusion.head == head_name.to_lowercase() {
                members.push(analyze_fusion(fusion, provider, mode)?);
                matched = true;
                break;
            }
        }

        if !matched {
            warn!("配对无匹配方向: {} / {}", head_name, body_name);
            return Err(FusionError::InvalidFusionInput(format!(
                "无法构建指定方向的融合: {} / {}",
                head_name, body_name
            )));
        }
    }

    let team_row = build_team_row(&members);
    members.push(team_row);

    sort_by_delta_descending(&mut members);
    Ok(members)
}
