// 招式数据与招式面分析模块
// 开发心理：招式面决定进攻覆盖，需要威力过滤、危险招式标记、覆盖类别折叠
// 设计原则：无威力招式不参与覆盖、覆盖类别按优先级收敛

use std::collections::{BTreeSet, HashMap};
use serde::{Deserialize, Serialize};
use lazy_static::lazy_static;
use log::debug;

use crate::core::error::Result;
use crate::data::provider::PokedexProvider;
use super::types::TypeName;

// 固定伤害招式：威力字段缺失但实战危险
pub const DANGEROUS_MOVES: [&str; 4] = ["sonic-boom", "dragon-rage", "seismic-toss", "night-shade"];

// 危险招式的威力警戒线
pub const CAUTION_POWER: u32 = 80;

// 招式信息：属性与可选威力（变化招式无威力）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInfo {
    pub name: String,
    pub move_type: TypeName,
    pub power: Option<u32>,
}

// 单个招式的分析行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDetail {
    pub name: String,
    pub move_type: Option<TypeName>,
    pub power: u32,
    pub caution: bool,
}

// 分析一组招式：解析属性/威力并标记危险招式
pub fn analyze_moveset(moves: &[String], provider: &dyn PokedexProvider) -> Vec<MoveDetail> {
    moves
        .iter()
        .map(|name| {
            let info = provider.fetch_move_info(name);
            let power = info.as_ref().and_then(|i| i.power).unwrap_or(0);
            let caution = power >= CAUTION_POWER || DANGEROUS_MOVES.contains(&name.as_str());

            MoveDetail {
                name: name.clone(),
                move_type: info.map(|i| i.move_type),
                power,
                caution,
            }
        })
        .collect()
}

// 招式面的进攻覆盖：四个互斥类别
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveCoverage {
    pub double_damage_to: BTreeSet<TypeName>,
    pub neutral_damage_to: BTreeSet<TypeName>,
    pub half_damage_to: BTreeSet<TypeName>,
    pub no_damage_to: BTreeSet<TypeName>,
}

// 计算招式面的进攻属性覆盖
// 只统计有威力的招式；覆盖(拔群)优先，其次中立，再抵抗，最后免疫
pub fn type_coverage(moves: &[String], provider: &dyn PokedexProvider) -> Result<MoveCoverage> {
    let unique_moves: BTreeSet<&String> = moves.iter().collect();

    let mut move_types = BTreeSet::new();
    for current_move in unique_moves {
        if let Some(info) = provider.fetch_move_info(&current_move.to_lowercase()) {
            if info.power.is_some() {
                move_types.insert(info.move_type);
            }
        }
    }

    let mut covered = BTreeSet::new();
    let mut neutral = BTreeSet::new();
    let mut resisted = BTreeSet::new();
    let mut immune = BTreeSet::new();

    for offensive_type in move_types {
        let relations = provider.fetch_type_relations(offensive_type)?;

        for defensive_type in TypeName::ALL {
            if relations.double_damage_to.contains(&defensive_type) {
                covered.insert(defensive_type);
            } else if relations.half_damage_to.contains(&defensive_type)
                && !covered.contains(&defensive_type)
                && !neutral.contains(&defensive_type)
            {
                resisted.insert(defensive_type);
            } else if relations.no_damage_to.contains(&defensive_type)
                && !covered.contains(&defensive_type)
                && !neutral.contains(&defensive_type)
                && !resisted.contains(&defensive_type)
            {
                immune.insert(defensive_type);
            } else if !neutral.contains(&defensive_type) && !covered.contains(&defensive_type) {
                neutral.insert(defensive_type);
            }
        }

        // 每轮结束后收敛：高优先级类别吸收低优先级成员
        neutral = &neutral - &covered;
        resisted = &(&resisted - &covered) - &neutral;
        immune = &(&(&immune - &covered) - &neutral) - &resisted;
    }

    debug!(
        "招式面覆盖: 拔群{} 中立{} 抵抗{} 免疫{}",
        covered.len(),
        neutral.len(),
        resisted.len(),
        immune.len()
    );

    Ok(MoveCoverage {
        double_damage_to: covered,
        neutral_damage_to: neutral,
        half_damage_to: resisted,
        no_damage_to: immune,
    })
}

// 队伍覆盖：逐个成员的覆盖 + 合并招式面的整体覆盖
pub fn team_coverage(
    movesets: &[Vec<String>],
    provider: &dyn PokedexProvider,
) -> Result<(Vec<MoveCoverage>, MoveCoverage)> {
    let mut member_coverage = Vec::with_capacity(movesets.len());
    let mut combined_moveset = Vec::new();

    for moveset in movesets {
        member_coverage.push(type_coverage(moveset, provider)?);
        combined_moveset.extend(moveset.iter().cloned());
    }

    let combined = type_coverage(&combined_moveset, provider)?;
    Ok((member_coverage, combined))
}

// 内置招式表，按招式名（小写）索引
lazy_static! {
    pub static ref MOVE_DATABASE: HashMap<&'static str, MoveInfo> = {
        let mut db = HashMap::new();
        add_static_moves(&mut db);
        debug!("内置招式表初始化完成，共加载了{}个招式", db.len());
        db
    };
}

fn add_move(
    db: &mut HashMap<&'static str, MoveInfo>,
    name: &'static str,
    move_type: TypeName,
    power: Option<u32>,
) {
    db.insert(name, MoveInfo { name: name.to_string(), move_type, power });
}

fn add_static_moves(db: &mut HashMap<&'static str, MoveInfo>) {
    add_move(db, "tackle", TypeName::Normal, Some(40));
    add_move(db, "scratch", TypeName::Normal, Some(40));
    add_move(db, "quick-attack", TypeName::Normal, Some(40));
    add_move(db, "body-slam", TypeName::Normal, Some(85));
    add_move(db, "hyper-beam", TypeName::Normal, Some(150));
    add_move(db, "sonic-boom", TypeName::Normal, None);
    add_move(db, "growl", TypeName::Normal, None);
    add_move(db, "tail-whip", TypeName::Normal, None);
    add_move(db, "sand-attack", TypeName::Ground, None);
    add_move(db, "leer", TypeName::Normal, None);
    add_move(db, "wrap", TypeName::Normal, Some(15));
    add_move(db, "bite", TypeName::Dark, Some(60));
    add_move(db, "gust", TypeName::Flying, Some(40));
    add_move(db, "wing-attack", TypeName::Flying, Some(60));
    add_move(db, "ember", TypeName::Fire, Some(40));
    add_move(db, "flamethrower", TypeName::Fire, Some(90));
    add_move(db, "fire-spin", TypeName::Fire, Some(35));
    add_move(db, "water-gun", TypeName::Water, Some(40));
    add_move(db, "hydro-pump", TypeName::Water, Some(110));
    add_move(db, "vine-whip", TypeName::Grass, Some(45));
    add_move(db, "razor-leaf", TypeName::Grass, Some(55));
    add_move(db, "thunder-shock", TypeName::Electric, Some(40));
    add_move(db, "thunderbolt", TypeName::Electric, Some(90));
    add_move(db, "ice-beam", TypeName::Ice, Some(90));
    add_move(db, "earthquake", TypeName::Ground, Some(100));
    add_move(db, "sludge-bomb", TypeName::Poison, Some(90));
    add_move(db, "shadow-ball", TypeName::Ghost, Some(80));
    add_move(db, "night-shade", TypeName::Ghost, None);
    add_move(db, "lick", TypeName::Ghost, Some(30));
    add_move(db, "hypnosis", TypeName::Psychic, None);
    add_move(db, "dragon-claw", TypeName::Dragon, Some(80));
    add_move(db, "dragon-rage", TypeName::Dragon, None);
    add_move(db, "seismic-toss", TypeName::Fighting, None);
}
