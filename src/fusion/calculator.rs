// 融合计算器
// 开发心理：种族值按头/身加权混合，属性按头主身副规则继承
// 设计原则：浮点加权后截断、每个无序对产出两个方向的融合体

use serde::{Deserialize, Serialize};

use crate::pokemon::species::{BaseStats, Creature, Evoline, Learnset};
use crate::pokemon::types::TypeName;

// 融合体记录：head主导HP/特攻/特防与主属性，body主导攻击/防御/速度与副属性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fusion {
    pub head: String,
    pub body: String,
    pub id: f64,
    pub head_id: u32,
    pub body_id: u32,
    pub primary_type: TypeName,
    pub secondary_type: Option<TypeName>,
    pub stats: BaseStats,
    pub bst: u32,
    #[serde(default)]
    pub learnset: Learnset,
    #[serde(default)]
    pub evoline: Evoline,
}

// 复合编号：head编号为整数部分，body编号为小数部分
fn composite_id(head_id: u32, body_id: u32) -> f64 {
    format!("{}.{}", head_id, body_id).parse().unwrap_or_default()
}

// 单项种族值混合：主导方2/3 + 次要方1/3，对浮点和截断取整
fn blend_stat(dominant: u16, minor: u16) -> u16 {
    ((2.0 * dominant as f64 / 3.0) + (minor as f64 / 3.0)) as u16
}

// 六项种族值混合：HP/特攻/特防偏向head，攻击/防御/速度偏向body
pub fn fuse_stats(head: &BaseStats, body: &BaseStats) -> BaseStats {
    BaseStats {
        hp: blend_stat(head.hp, body.hp),
        attack: blend_stat(body.attack, head.attack),
        defense: blend_stat(body.defense, head.defense),
        special_attack: blend_stat(head.special_attack, body.special_attack),
        special_defense: blend_stat(head.special_defense, body.special_defense),
        speed: blend_stat(body.speed, head.speed),
    }
}

// 按键合并两个学习表/进化线：同键列表拼接，不去重
pub fn combine_learnsets(first: &Learnset, second: &Learnset) -> Learnset {
    let mut combined = first.clone();
    for (key, moves) in second {
        combined.entry(*key).or_default().extend(moves.iter().cloned());
    }
    combined
}

pub fn combine_evolines(first: &Evoline, second: &Evoline) -> Evoline {
    let mut combined = first.clone();
    for (species, triggers) in second {
        combined
            .entry(species.clone())
            .or_default()
            .extend(triggers.iter().cloned());
    }
    combined
}

// 构造一个方向的融合体
// 副属性取body的副属性；缺失或与head主属性冲突时回退到body的主属性；
// 回退后仍与主属性相同则副属性为空
fn directional_fusion(
    head: &Creature,
    body: &Creature,
    learnset: &Learnset,
    evoline: &Evoline,
) -> Fusion {
    let primary_type = head.primary_type;

    let secondary_candidate = match body.secondary_type {
        Some(secondary) if secondary != head.primary_type => secondary,
        _ => body.primary_type,
    };
    let secondary_type = if secondary_candidate == primary_type {
        None
    } else {
        Some(secondary_candidate)
    };

    let stats = fuse_stats(&head.stats, &body.stats);

    Fusion {
        head: head.species.clone(),
        body: body.species.clone(),
        id: composite_id(head.id, body.id),
        head_id: head.id,
        body_id: body.id,
        primary_type,
        secondary_type,
        stats,
        bst: stats.total(),
        learnset: learnset.clone(),
        evoline: evoline.clone(),
    }
}

// 融合一对种族：返回两个方向的融合体（head/body互换）
// 两个方向共享合并后的学习表与进化线
pub fn fuse_pair(first: &Creature, second: &Creature) -> [Fusion; 2] {
    let combined_learnset = combine_learnsets(&first.learnset, &second.learnset);
    let combined_evoline = combine_evolines(&first.evoline, &second.evoline);

    [
        directional_fusion(first, second, &combined_learnset, &combined_evoline),
        directional_fusion(second, first, &combined_learnset, &combined_evoline),
    ]
}

impl Fusion {
    pub fn is_single_type(&self) -> bool {
        self.secondary_type.is_none()
    }
}
