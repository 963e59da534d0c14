// Pokemon属性系统
// 开发心理：属性相克是融合分析核心，需要完整相克表、双属性抵消规则、严格的集合不相交保证
// 设计原则：18属性完整支持、复合属性处理、确定性输出

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use lazy_static::lazy_static;
use log::debug;

// Pokemon属性类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TypeName {
    Normal = 0,     // 一般
    Fighting = 1,   // 格斗
    Flying = 2,     // 飞行
    Poison = 3,     // 毒
    Ground = 4,     // 地面
    Rock = 5,       // 岩石
    Bug = 6,        // 虫
    Ghost = 7,      // 幽灵
    Steel = 8,      // 钢
    Fire = 9,       // 火
    Water = 10,     // 水
    Grass = 11,     // 草
    Electric = 12,  // 电
    Psychic = 13,   // 超能力
    Ice = 14,       // 冰
    Dragon = 15,    // 龙
    Dark = 16,      // 恶
    Fairy = 17,     // 妖精
}

impl TypeName {
    // 全部18个属性，按内部编号排列
    pub const ALL: [TypeName; 18] = [
        TypeName::Normal,
        TypeName::Fighting,
        TypeName::Flying,
        TypeName::Poison,
        TypeName::Ground,
        TypeName::Rock,
        TypeName::Bug,
        TypeName::Ghost,
        TypeName::Steel,
        TypeName::Fire,
        TypeName::Water,
        TypeName::Grass,
        TypeName::Electric,
        TypeName::Psychic,
        TypeName::Ice,
        TypeName::Dragon,
        TypeName::Dark,
        TypeName::Fairy,
    ];

    // 属性的外部小写名称，与数据源一致
    pub fn name(&self) -> &'static str {
        match self {
            TypeName::Normal => "normal",
            TypeName::Fighting => "fighting",
            TypeName::Flying => "flying",
            TypeName::Poison => "poison",
            TypeName::Ground => "ground",
            TypeName::Rock => "rock",
            TypeName::Bug => "bug",
            TypeName::Ghost => "ghost",
            TypeName::Steel => "steel",
            TypeName::Fire => "fire",
            TypeName::Water => "water",
            TypeName::Grass => "grass",
            TypeName::Electric => "electric",
            TypeName::Psychic => "psychic",
            TypeName::Ice => "ice",
            TypeName::Dragon => "dragon",
            TypeName::Dark => "dark",
            TypeName::Fairy => "fairy",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        TypeName::ALL.iter().copied().find(|t| t.name() == name)
    }

    pub fn to_id(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// 属性效果倍率
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effectiveness {
    NoEffect,          // 无效 (0倍)
    NotVeryEffective,  // 效果不佳 (0.5倍)
    Normal,            // 普通效果 (1倍)
    SuperEffective,    // 效果拔群 (2倍)
}

impl Effectiveness {
    pub fn to_multiplier(&self) -> f32 {
        match self {
            Self::NoEffect => 0.0,
            Self::NotVeryEffective => 0.5,
            Self::Normal => 1.0,
            Self::SuperEffective => 2.0,
        }
    }
}

// 属性伤害关系：防御视角三组 + 进攻视角三组
// 外部数据源提供，或由内置相克表派生；获取后不可变
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRelations {
    pub double_damage_from: BTreeSet<TypeName>,
    pub half_damage_from: BTreeSet<TypeName>,
    pub no_damage_from: BTreeSet<TypeName>,
    pub double_damage_to: BTreeSet<TypeName>,
    pub half_damage_to: BTreeSet<TypeName>,
    pub no_damage_to: BTreeSet<TypeName>,
}

// 内置属性相克表 [攻击属性][防御属性] = 效果
pub struct TypeChart {
    effectiveness_chart: [[Effectiveness; 18]; 18],
}

impl TypeChart {
    pub fn new() -> Self {
        let mut chart = Self {
            effectiveness_chart: [[Effectiveness::Normal; 18]; 18],
        };
        chart.initialize_effectiveness_chart();
        chart
    }

    pub fn effectiveness(&self, attacker: TypeName, defender: TypeName) -> Effectiveness {
        self.effectiveness_chart[attacker as usize][defender as usize]
    }

    // 派生某一属性的完整伤害关系
    pub fn damage_relations(&self, type_name: TypeName) -> DamageRelations {
        let mut relations = DamageRelations::default();

        for other in TypeName::ALL {
            // 防御视角：other攻击type_name
            match self.effectiveness(other, type_name) {
                Effectiveness::SuperEffective => {
                    relations.double_damage_from.insert(other);
                }
                Effectiveness::NotVeryEffective => {
                    relations.half_damage_from.insert(other);
                }
                Effectiveness::NoEffect => {
                    relations.no_damage_from.insert(other);
                }
                Effectiveness::Normal => {}
            }

            // 进攻视角：type_name攻击other
            match self.effectiveness(type_name, other) {
                Effectiveness::SuperEffective => {
                    relations.double_damage_to.insert(other);
                }
                Effectiveness::NotVeryEffective => {
                    relations.half_damage_to.insert(other);
                }
                Effectiveness::NoEffect => {
                    relations.no_damage_to.insert(other);
                }
                Effectiveness::Normal => {}
            }
        }

        relations
    }

    fn set_effectiveness(&mut self, attacker: TypeName, defender: TypeName, effectiveness: Effectiveness) {
        self.effectiveness_chart[attacker as usize][defender as usize] = effectiveness;
    }

    fn initialize_effectiveness_chart(&mut self) {
        use Effectiveness::{NoEffect, NotVeryEffective, SuperEffective};
        use TypeName::*;

        // 无效果组合
        self.set_effectiveness(Normal, Ghost, NoEffect);
        self.set_effectiveness(Fighting, Ghost, NoEffect);
        self.set_effectiveness(Ghost, Normal, NoEffect);
        self.set_effectiveness(Electric, Ground, NoEffect);
        self.set_effectiveness(Poison, Steel, NoEffect);
        self.set_effectiveness(Ground, Flying, NoEffect);
        self.set_effectiveness(Psychic, Dark, NoEffect);
        self.set_effectiveness(Dragon, Fairy, NoEffect);

        // 效果拔群组合
        // 格斗系
        self.set_effectiveness(Fighting, Normal, SuperEffective);
        self.set_effectiveness(Fighting, Rock, SuperEffective);
        self.set_effectiveness(Fighting, Steel, SuperEffective);
        self.set_effectiveness(Fighting, Ice, SuperEffective);
        self.set_effectiveness(Fighting, Dark, SuperEffective);

        // 飞行系
        self.set_effectiveness(Flying, Fighting, SuperEffective);
        self.set_effectiveness(Flying, Bug, SuperEffective);
        self.set_effectiveness(Flying, Grass, SuperEffective);

        // 毒系
        self.set_effectiveness(Poison, Grass, SuperEffective);
        self.set_effectiveness(Poison, Fairy, SuperEffective);

        // 地面系
        self.set_effectiveness(Ground, Poison, SuperEffective);
        self.set_effectiveness(Ground, Rock, SuperEffective);
        self.set_effectiveness(Ground, Steel, SuperEffective);
        self.set_effectiveness(Ground, Fire, SuperEffective);
        self.set_effectiveness(Ground, Electric, SuperEffective);

        // 岩石系
        self.set_effectiveness(Rock, Flying, SuperEffective);
        self.set_effectiveness(Rock, Bug, SuperEffective);
        self.set_effectiveness(Rock, Fire, SuperEffective);
        self.set_effectiveness(Rock, Ice, SuperEffective);

        // 虫系
        self.set_effectiveness(Bug, Grass, SuperEffective);
        self.set_effectiveness(Bug, Psychic, SuperEffective);
        self.set_effectiveness(Bug, Dark, SuperEffective);

        // 幽灵系
        self.set_effectiveness(Ghost, Ghost, SuperEffective);
        self.set_effectiveness(Ghost, Psychic, SuperEffective);

        // 钢系
        self.set_effectiveness(Steel, Rock, SuperEffective);
        self.set_effectiveness(Steel, Ice, SuperEffective);
        self.set_effectiveness(Steel, Fairy, SuperEffective);

        // 火系
        self.set_effectiveness(Fire, Bug, SuperEffective);
        self.set_effectiveness(Fire, Steel, SuperEffective);
        self.set_effectiveness(Fire, Grass, SuperEffective);
        self.set_effectiveness(Fire, Ice, SuperEffective);

        // 水系
        self.set_effectiveness(Water, Ground, SuperEffective);
        self.set_effectiveness(Water, Rock, SuperEffective);
        self.set_effectiveness(Water, Fire, SuperEffective);

        // 草系
        self.set_effectiveness(Grass, Ground, SuperEffective);
        self.set_effectiveness(Grass, Rock, SuperEffective);
        self.set_effectiveness(Grass, Water, SuperEffective);

        // 电系
        self.set_effectiveness(Electric, Flying, SuperEffective);
        self.set_effectiveness(Electric, Water, SuperEffective);

        // 超能力系
        self.set_effectiveness(Psychic, Fighting, SuperEffective);
        self.set_effectiveness(Psychic, Poison, SuperEffective);

        // 冰系
        self.set_effectiveness(Ice, Flying, SuperEffective);
        self.set_effectiveness(Ice, Ground, SuperEffective);
        self.set_effectiveness(Ice, Grass, SuperEffective);
        self.set_effectiveness(Ice, Dragon, SuperEffective);

        // 龙系
        self.set_effectiveness(Dragon, Dragon, SuperEffective);

        // 恶系
        self.set_effectiveness(Dark, Ghost, SuperEffective);
        self.set_effectiveness(Dark, Psychic, SuperEffective);

        // 妖精系
        self.set_effectiveness(Fairy, Fighting, SuperEffective);
        self.set_effectiveness(Fairy, Dragon, SuperEffective);
        self.set_effectiveness(Fairy, Dark, SuperEffective);

        // 效果不佳组合
        // 一般系
        self.set_effectiveness(Normal, Rock, NotVeryEffective);
        self.set_effectiveness(Normal, Steel, NotVeryEffective);

        // 格斗系
        self.set_effectiveness(Fighting, Flying, NotVeryEffective);
        self.set_effectiveness(Fighting, Poison, NotVeryEffective);
        self.set_effectiveness(Fighting, Bug, NotVeryEffective);
        self.set_effectiveness(Fighting, Psychic, NotVeryEffective);
        self.set_effectiveness(Fighting, Fairy, NotVeryEffective);

        // 飞行系
        self.set_effectiveness(Flying, Rock, NotVeryEffective);
        self.set_effectiveness(Flying, Steel, NotVeryEffective);
        self.set_effectiveness(Flying, Electric, NotVeryEffective);

        // 毒系
        self.set_effectiveness(Poison, Poison, NotVeryEffective);
        self.set_effectiveness(Poison, Ground, NotVeryEffective);
        self.set_effectiveness(Poison, Rock, NotVeryEffective);
        self.set_effectiveness(Poison, Ghost, NotVeryEffective);

        // 地面系
        self.set_effectiveness(Ground, Bug, NotVeryEffective);
        self.set_effectiveness(Ground, Grass, NotVeryEffective);

        // 岩石系
        self.set_effectiveness(Rock, Fighting, NotVeryEffective);
        self.set_effectiveness(Rock, Ground, NotVeryEffective);
        self.set_effectiveness(Rock, Steel, NotVeryEffective);

        // 虫系
        self.set_effectiveness(Bug, Fighting, NotVeryEffective);
        self.set_effectiveness(Bug, Flying, NotVeryEffective);
        self.set_effectiveness(Bug, Poison, NotVeryEffective);
        self.set_effectiveness(Bug, Ghost, NotVeryEffective);
        self.set_effectiveness(Bug, Steel, NotVeryEffective);
        self.set_effectiveness(Bug, Fire, NotVeryEffective);
        self.set_effectiveness(Bug, Fairy, NotVeryEffective);

        // 幽灵系
        self.set_effectiveness(Ghost, Dark, NotVeryEffective);

        // 钢系
        self.set_effectiveness(Steel, Steel, NotVeryEffective);
        self.set_effectiveness(Steel, Fire, NotVeryEffective);
        self.set_effectiveness(Steel, Water, NotVeryEffective);
        self.set_effectiveness(Steel, Electric, NotVeryEffective);

        // 火系
        self.set_effectiveness(Fire, Rock, NotVeryEffective);
        self.set_effectiveness(Fire, Fire, NotVeryEffective);
        self.set_effectiveness(Fire, Water, NotVeryEffective);
        self.set_effectiveness(Fire, Dragon, NotVeryEffective);

        // 水系
        self.set_effectiveness(Water, Water, NotVeryEffective);
        self.set_effectiveness(Water, Grass, NotVeryEffective);
        self.set_effectiveness(Water, Dragon, NotVeryEffective);

        // 草系
        self.set_effectiveness(Grass, Flying, NotVeryEffective);
        self.set_effectiveness(Grass, Poison, NotVeryEffective);
        self.set_effectiveness(Grass, Bug, NotVeryEffective);
        self.set_effectiveness(Grass, Steel, NotVeryEffective);
        self.set_effectiveness(Grass, Fire, NotVeryEffective);
        self.set_effectiveness(Grass, Grass, NotVeryEffective);
        self.set_effectiveness(Grass, Dragon, NotVeryEffective);

        // 电系
        self.set_effectiveness(Electric, Grass, NotVeryEffective);
        self.set_effectiveness(Electric, Electric, NotVeryEffective);
        self.set_effectiveness(Electric, Dragon, NotVeryEffective);

        // 超能力系
        self.set_effectiveness(Psychic, Psychic, NotVeryEffective);
        self.set_effectiveness(Psychic, Steel, NotVeryEffective);

        // 冰系
        self.set_effectiveness(Ice, Steel, NotVeryEffective);
        self.set_effectiveness(Ice, Fire, NotVeryEffective);
        self.set_effectiveness(Ice, Water, NotVeryEffective);
        self.set_effectiveness(Ice, Ice, NotVeryEffective);

        // 龙系
        self.set_effectiveness(Dragon, Steel, NotVeryEffective);

        // 恶系
        self.set_effectiveness(Dark, Fighting, NotVeryEffective);
        self.set_effectiveness(Dark, Dark, NotVeryEffective);
        self.set_effectiveness(Dark, Fairy, NotVeryEffective);

        // 妖精系
        self.set_effectiveness(Fairy, Poison, NotVeryEffective);
        self.set_effectiveness(Fairy, Steel, NotVeryEffective);
        self.set_effectiveness(Fairy, Fire, NotVeryEffective);
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::new()
    }
}

// 全局相克表
lazy_static! {
    pub static ref TYPE_CHART: TypeChart = {
        let chart = TypeChart::new();
        debug!("属性相克表初始化完成");
        chart
    };
}

// 属性组合的防御解析结果：五个类别集合 + 中立集合
// 不变式：六个集合两两不相交，并集为全部18个属性
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTyping {
    pub normal_resistances: BTreeSet<TypeName>,
    pub super_resistances: BTreeSet<TypeName>,
    pub immunities: BTreeSet<TypeName>,
    pub neutral_types: BTreeSet<TypeName>,
    pub normal_weaknesses: BTreeSet<TypeName>,
    pub super_weaknesses: BTreeSet<TypeName>,
}

impl ResolvedTyping {
    // 单属性解析：直接复制伤害关系，超级类别恒为空
    pub fn resolve_single(relations: &DamageRelations) -> Self {
        let resistances = relations.half_damage_from.clone();
        let immunities = relations.no_damage_from.clone();
        let weaknesses = relations.double_damage_from.clone();

        let neutral_types = TypeName::ALL
            .iter()
            .copied()
            .filter(|t| {
                !resistances.contains(t) && !immunities.contains(t) && !weaknesses.contains(t)
            })
            .collect();

        Self {
            normal_resistances: resistances,
            super_resistances: BTreeSet::new(),
            immunities,
            neutral_types,
            normal_weaknesses: weaknesses,
            super_weaknesses: BTreeSet::new(),
        }
    }

    // 双属性解析：一侧抗性与另一侧弱点相互抵消趋向中立，
    // 除非两侧同为抗性（超级抗性）或同为弱点（超级弱点）；免疫总是优先
    pub fn resolve_dual(relations1: &DamageRelations, relations2: &DamageRelations) -> Self {
        let resistances1 = &relations1.half_damage_from;
        let resistances2 = &relations2.half_damage_from;
        let immunities1 = &relations1.no_damage_from;
        let immunities2 = &relations2.no_damage_from;
        let weaknesses1 = &relations1.double_damage_from;
        let weaknesses2 = &relations2.double_damage_from;

        let combined_resistances: BTreeSet<TypeName> = resistances1 | resistances2;
        let combined_weaknesses: BTreeSet<TypeName> = weaknesses1 | weaknesses2;
        let combined_immunities: BTreeSet<TypeName> = immunities1 | immunities2;

        let super_resistances: BTreeSet<TypeName> =
            resistances1.intersection(resistances2).copied().collect();
        let super_weaknesses: BTreeSet<TypeName> =
            weaknesses1.intersection(weaknesses2).copied().collect();

        let normal_resistances: BTreeSet<TypeName> =
            &(&(&combined_resistances - &combined_weaknesses) - &super_resistances)
                - &combined_immunities;

        let normal_weaknesses: BTreeSet<TypeName> =
            &(&(&(&combined_weaknesses - &combined_resistances) - &combined_immunities)
                - &super_resistances)
                - &super_weaknesses;

        let neutral_types = TypeName::ALL
            .iter()
            .copied()
            .filter(|t| {
                !normal_resistances.contains(t)
                    && !super_resistances.contains(t)
                    && !combined_immunities.contains(t)
                    && !normal_weaknesses.contains(t)
                    && !super_weaknesses.contains(t)
            })
            .collect();

        Self {
            normal_resistances,
            super_resistances,
            immunities: combined_immunities,
            neutral_types,
            normal_weaknesses,
            super_weaknesses,
        }
    }

    // 按主属性/可选副属性解析；副属性必须已与主属性去重
    pub fn resolve(primary: &DamageRelations, secondary: Option<&DamageRelations>) -> Self {
        match secondary {
            Some(second) => Self::resolve_dual(primary, second),
            None => Self::resolve_single(primary),
        }
    }

    pub fn is_partition(&self) -> bool {
        let total = self.normal_resistances.len()
            + self.super_resistances.len()
            + self.immunities.len()
            + self.neutral_types.len()
            + self.normal_weaknesses.len()
            + self.super_weaknesses.len();

        let mut union: BTreeSet<&TypeName> = BTreeSet::new();
        union.extend(&self.normal_resistances);
        union.extend(&self.super_resistances);
        union.extend(&self.immunities);
        union.extend(&self.neutral_types);
        union.extend(&self.normal_weaknesses);
        union.extend(&self.super_weaknesses);

        total == 18 && union.len() == 18
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_roundtrip() {
        for t in TypeName::ALL {
            assert_eq!(TypeName::from_name(t.name()), Some(t));
        }
        assert_eq!(TypeName::from_name("shadow"), None);
    }

    #[test]
    fn test_chart_basic_matchups() {
        let chart = TypeChart::new();
        assert_eq!(
            chart.effectiveness(TypeName::Water, TypeName::Fire).to_multiplier(),
            2.0
        );
        assert_eq!(
            chart.effectiveness(TypeName::Electric, TypeName::Ground).to_multiplier(),
            0.0
        );
        assert_eq!(
            chart.effectiveness(TypeName::Fire, TypeName::Water).to_multiplier(),
            0.5
        );
        assert_eq!(
            chart.effectiveness(TypeName::Normal, TypeName::Fighting).to_multiplier(),
            1.0
        );
    }

    #[test]
    fn test_damage_relations_derivation() {
        let relations = TYPE_CHART.damage_relations(TypeName::Electric);
        assert!(relations.double_damage_from.contains(&TypeName::Ground));
        assert!(relations.half_damage_from.contains(&TypeName::Flying));
        assert!(relations.half_damage_from.contains(&TypeName::Steel));
        assert!(relations.half_damage_from.contains(&TypeName::Electric));
        assert!(relations.no_damage_to.contains(&TypeName::Ground));
        assert!(relations.double_damage_to.contains(&TypeName::Water));
    }

    #[test]
    fn test_single_type_super_sets_empty() {
        for t in TypeName::ALL {
            let resolved = ResolvedTyping::resolve_single(&TYPE_CHART.damage_relations(t));
            assert!(resolved.super_resistances.is_empty());
            assert!(resolved.super_weaknesses.is_empty());
            assert!(resolved.is_partition(), "partition violated for {}", t);
        }
    }

    #[test]
    fn test_dual_type_partition_invariant() {
        for t1 in TypeName::ALL {
            for t2 in TypeName::ALL {
                if t1 == t2 {
                    continue;
                }
                let resolved = ResolvedTyping::resolve_dual(
                    &TYPE_CHART.damage_relations(t1),
                    &TYPE_CHART.damage_relations(t2),
                );
                assert!(resolved.is_partition(), "partition violated for {}/{}", t1, t2);
            }
        }
    }

    #[test]
    fn test_fire_flying_resolution() {
        let resolved = ResolvedTyping::resolve_dual(
            &TYPE_CHART.damage_relations(TypeName::Fire),
            &TYPE_CHART.damage_relations(TypeName::Flying),
        );

        // 双方都抗虫和草
        assert!(resolved.super_resistances.contains(&TypeName::Bug));
        assert!(resolved.super_resistances.contains(&TypeName::Grass));
        assert_eq!(resolved.super_resistances.len(), 2);

        // 双方都弱岩石
        assert_eq!(
            resolved.super_weaknesses.iter().copied().collect::<Vec<_>>(),
            vec![TypeName::Rock]
        );

        // 飞行免疫地面
        assert_eq!(
            resolved.immunities.iter().copied().collect::<Vec<_>>(),
            vec![TypeName::Ground]
        );

        // 火弱水/飞行不抗 → 普通弱点；火抗冰/飞行弱冰 → 抵消为中立
        assert!(resolved.normal_weaknesses.contains(&TypeName::Water));
        assert!(resolved.normal_weaknesses.contains(&TypeName::Electric));
        assert_eq!(resolved.normal_weaknesses.len(), 2);
        assert!(resolved.neutral_types.contains(&TypeName::Ice));

        assert_eq!(resolved.normal_resistances.len(), 4);
        assert!(resolved.normal_resistances.contains(&TypeName::Fighting));
        assert!(resolved.normal_resistances.contains(&TypeName::Steel));
        assert!(resolved.normal_resistances.contains(&TypeName::Fire));
        assert!(resolved.normal_resistances.contains(&TypeName::Fairy));
    }

    #[test]
    fn test_serde_lowercase_names() {
        let json = serde_json::to_string(&TypeName::Fire).unwrap();
        assert_eq!(json, "\"fire\"");
        let parsed: TypeName = serde_json::from_str("\"fairy\"").unwrap();
        assert_eq!(parsed, TypeName::Fairy);
    }
}
