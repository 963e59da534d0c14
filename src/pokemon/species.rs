// 宝可梦种族数据模块
// 开发心理：定义融合分析所需的种族记录：属性、六项种族值、可学招式表、进化线
// 设计原则：数据驱动、记录不可变、内置图鉴支持离线分析

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use lazy_static::lazy_static;
use log::debug;

use super::types::TypeName;

// 基础能力值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn new(hp: u16, attack: u16, defense: u16, special_attack: u16, special_defense: u16, speed: u16) -> Self {
        Self { hp, attack, defense, special_attack, special_defense, speed }
    }

    // 种族值总和 (BST)
    pub fn total(&self) -> u32 {
        self.hp as u32
            + self.attack as u32
            + self.defense as u32
            + self.special_attack as u32
            + self.special_defense as u32
            + self.speed as u32
    }
}

// 可学招式表的键：等级习得或技能机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LearnKey {
    Level(u8),
    Tm,
}

impl From<LearnKey> for String {
    fn from(key: LearnKey) -> Self {
        match key {
            LearnKey::Level(level) => level.to_string(),
            LearnKey::Tm => "TM".to_string(),
        }
    }
}

impl TryFrom<String> for LearnKey {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        if value == "TM" {
            return Ok(LearnKey::Tm);
        }
        value
            .parse::<u8>()
            .map(LearnKey::Level)
            .map_err(|_| format!("无效的习得键: {}", value))
    }
}

impl std::fmt::Display for LearnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LearnKey::Level(level) => write!(f, "{}", level),
            LearnKey::Tm => f.write_str("TM"),
        }
    }
}

// 进化触发条件：等级数字或定性方式标签
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvoTrigger {
    Level(u8),
    Method(String),
}

// 等级 → 招式名列表（外加TM哨兵键）
pub type Learnset = HashMap<LearnKey, Vec<String>>;

// 目标种族 → 触发条件列表
pub type Evoline = HashMap<String, Vec<EvoTrigger>>;

// 种族记录：获取一次后在进程生命周期内缓存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub species: String,
    pub id: u32,
    pub primary_type: TypeName,
    pub secondary_type: Option<TypeName>,
    pub stats: BaseStats,
    #[serde(default)]
    pub learnset: Learnset,
    #[serde(default)]
    pub evoline: Evoline,
}

impl Creature {
    pub fn bst(&self) -> u32 {
        self.stats.total()
    }

    pub fn is_single_type(&self) -> bool {
        self.secondary_type.is_none()
    }

    // 记录进入引擎前的规范化：
    // 一般/飞行复合属性整体视为纯飞行；副属性与主属性相同时丢弃
    pub fn normalize(&mut self) {
        if self.primary_type == TypeName::Normal && self.secondary_type == Some(TypeName::Flying) {
            self.primary_type = TypeName::Flying;
            self.secondary_type = None;
        }

        if self.secondary_type == Some(self.primary_type) {
            self.secondary_type = None;
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

// 全局内置图鉴，按种族名（小写）索引
lazy_static! {
    static ref SPECIES_DATABASE: HashMap<&'static str, Creature> = {
        let mut db = HashMap::new();
        add_static_dex(&mut db);
        debug!("内置图鉴初始化完成，共加载了{}个种族", db.len());
        db
    };
}

pub fn dex_species(name: &str) -> Option<&'static Creature> {
    SPECIES_DATABASE.get(name.to_lowercase().as_str())
}

pub fn all_dex_species() -> &'static HashMap<&'static str, Creature> {
    &SPECIES_DATABASE
}

fn learnset_from(entries: &[(LearnKey, &[&str])]) -> Learnset {
    entries
        .iter()
        .map(|(key, moves)| (*key, moves.iter().map(|m| m.to_string()).collect()))
        .collect()
}

fn evoline_from(entries: &[(&str, &[EvoTrigger])]) -> Evoline {
    entries
        .iter()
        .map(|(species, triggers)| (species.to_string(), triggers.to_vec()))
        .collect()
}

fn add_static_dex(db: &mut HashMap<&'static str, Creature>) {
    // 妙蛙种子 #001
    db.insert("bulbasaur", Creature {
        species: "bulbasaur".to_string(),
        id: 1,
        primary_type: TypeName::Grass,
        secondary_type: Some(TypeName::Poison),
        stats: BaseStats::new(45, 49, 49, 65, 65, 45),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["tackle", "growl"]),
            (LearnKey::Level(7), &["vine-whip"]),
            (LearnKey::Level(13), &["razor-leaf"]),
            (LearnKey::Tm, &["sludge-bomb"]),
        ]),
        evoline: evoline_from(&[
            ("ivysaur", &[EvoTrigger::Level(16)]),
            ("venusaur", &[EvoTrigger::Level(32)]),
        ]),
    });

    // 妙蛙花 #003
    db.insert("venusaur", Creature {
        species: "venusaur".to_string(),
        id: 3,
        primary_type: TypeName::Grass,
        secondary_type: Some(TypeName::Poison),
        stats: BaseStats::new(80, 82, 83, 100, 100, 80),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["tackle", "growl", "vine-whip"]),
            (LearnKey::Level(13), &["razor-leaf"]),
            (LearnKey::Tm, &["sludge-bomb", "earthquake"]),
        ]),
        evoline: evoline_from(&[
            ("ivysaur", &[EvoTrigger::Level(16)]),
            ("venusaur", &[EvoTrigger::Level(32)]),
        ]),
    });

    // 小火龙 #004
    db.insert("charmander", Creature {
        species: "charmander".to_string(),
        id: 4,
        primary_type: TypeName::Fire,
        secondary_type: None,
        stats: BaseStats::new(39, 52, 43, 60, 50, 65),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["scratch", "growl"]),
            (LearnKey::Level(7), &["ember"]),
            (LearnKey::Tm, &["flamethrower"]),
        ]),
        evoline: evoline_from(&[
            ("charmeleon", &[EvoTrigger::Level(16)]),
            ("charizard", &[EvoTrigger::Level(36)]),
        ]),
    });

    // 喷火龙 #006
    db.insert("charizard", Creature {
        species: "charizard".to_string(),
        id: 6,
        primary_type: TypeName::Fire,
        secondary_type: Some(TypeName::Flying),
        stats: BaseStats::new(78, 84, 78, 109, 85, 100),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["scratch", "growl", "ember"]),
            (LearnKey::Level(17), &["wing-attack"]),
            (LearnKey::Tm, &["flamethrower", "dragon-claw", "earthquake"]),
        ]),
        evoline: evoline_from(&[
            ("charmeleon", &[EvoTrigger::Level(16)]),
            ("charizard", &[EvoTrigger::Level(36)]),
        ]),
    });

    // 杰尼龟 #007
    db.insert("squirtle", Creature {
        species: "squirtle".to_string(),
        id: 7,
        primary_type: TypeName::Water,
        secondary_type: None,
        stats: BaseStats::new(44, 48, 65, 50, 64, 43),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["tackle", "tail-whip"]),
            (LearnKey::Level(7), &["water-gun"]),
            (LearnKey::Tm, &["ice-beam"]),
        ]),
        evoline: evoline_from(&[
            ("wartortle", &[EvoTrigger::Level(16)]),
            ("blastoise", &[EvoTrigger::Level(36)]),
        ]),
    });

    // 水箭龟 #009
    db.insert("blastoise", Creature {
        species: "blastoise".to_string(),
        id: 9,
        primary_type: TypeName::Water,
        secondary_type: None,
        stats: BaseStats::new(79, 83, 100, 85, 105, 78),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["tackle", "tail-whip", "water-gun"]),
            (LearnKey::Level(42), &["hydro-pump"]),
            (LearnKey::Tm, &["ice-beam", "earthquake"]),
        ]),
        evoline: evoline_from(&[
            ("wartortle", &[EvoTrigger::Level(16)]),
            ("blastoise", &[EvoTrigger::Level(36)]),
        ]),
    });

    // 大比鸟 #018（一般/飞行 → 规范化为纯飞行）
    db.insert("pidgeot", Creature {
        species: "pidgeot".to_string(),
        id: 18,
        primary_type: TypeName::Normal,
        secondary_type: Some(TypeName::Flying),
        stats: BaseStats::new(83, 80, 75, 70, 70, 101),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["tackle", "sand-attack"]),
            (LearnKey::Level(5), &["gust"]),
            (LearnKey::Tm, &["hyper-beam"]),
        ]),
        evoline: evoline_from(&[
            ("pidgeotto", &[EvoTrigger::Level(18)]),
            ("pidgeot", &[EvoTrigger::Level(36)]),
        ]),
    });

    // 皮卡丘 #025
    db.insert("pikachu", Creature {
        species: "pikachu".to_string(),
        id: 25,
        primary_type: TypeName::Electric,
        secondary_type: None,
        stats: BaseStats::new(35, 55, 40, 50, 50, 90),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["thunder-shock", "growl"]),
            (LearnKey::Level(5), &["tail-whip"]),
            (LearnKey::Tm, &["thunderbolt"]),
        ]),
        evoline: evoline_from(&[
            ("raichu", &[EvoTrigger::Method("use-item".to_string())]),
        ]),
    });

    // 耿鬼 #094
    db.insert("gengar", Creature {
        species: "gengar".to_string(),
        id: 94,
        primary_type: TypeName::Ghost,
        secondary_type: Some(TypeName::Poison),
        stats: BaseStats::new(60, 65, 60, 130, 75, 110),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["lick", "hypnosis"]),
            (LearnKey::Level(29), &["shadow-ball"]),
            (LearnKey::Tm, &["sludge-bomb", "night-shade"]),
        ]),
        evoline: evoline_from(&[
            ("haunter", &[EvoTrigger::Level(25)]),
            ("gengar", &[EvoTrigger::Method("trade".to_string())]),
        ]),
    });

    // 化石翼龙 #142
    db.insert("aerodactyl", Creature {
        species: "aerodactyl".to_string(),
        id: 142,
        primary_type: TypeName::Rock,
        secondary_type: Some(TypeName::Flying),
        stats: BaseStats::new(80, 105, 65, 60, 75, 130),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["wing-attack", "bite"]),
            (LearnKey::Tm, &["earthquake", "hyper-beam"]),
        ]),
        evoline: Evoline::new(),
    });

    // 卡比兽 #143
    db.insert("snorlax", Creature {
        species: "snorlax".to_string(),
        id: 143,
        primary_type: TypeName::Normal,
        secondary_type: None,
        stats: BaseStats::new(160, 110, 65, 65, 110, 30),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["tackle"]),
            (LearnKey::Level(36), &["body-slam"]),
            (LearnKey::Tm, &["hyper-beam", "earthquake"]),
        ]),
        evoline: Evoline::new(),
    });

    // 快龙 #149
    db.insert("dragonite", Creature {
        species: "dragonite".to_string(),
        id: 149,
        primary_type: TypeName::Dragon,
        secondary_type: Some(TypeName::Flying),
        stats: BaseStats::new(91, 134, 95, 100, 100, 80),
        learnset: learnset_from(&[
            (LearnKey::Level(1), &["wrap", "leer"]),
            (LearnKey::Level(15), &["dragon-rage"]),
            (LearnKey::Level(61), &["dragon-claw"]),
            (LearnKey::Tm, &["ice-beam", "hyper-beam"]),
        ]),
        evoline: evoline_from(&[
            ("dragonair", &[EvoTrigger::Level(30)]),
            ("dragonite", &[EvoTrigger::Level(55)]),
        ]),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dex_lookup() {
        let pikachu = dex_species("pikachu").unwrap();
        assert_eq!(pikachu.id, 25);
        assert_eq!(pikachu.primary_type, TypeName::Electric);
        assert_eq!(pikachu.stats.speed, 90);
        assert!(dex_species("missingno").is_none());
    }

    #[test]
    fn test_dex_lookup_case_insensitive() {
        assert!(dex_species("Charizard").is_some());
    }

    #[test]
    fn test_bst() {
        let charizard = dex_species("charizard").unwrap();
        assert_eq!(charizard.bst(), 534);
    }

    #[test]
    fn test_normal_flying_normalization() {
        let pidgeot = dex_species("pidgeot").unwrap().clone().normalized();
        assert_eq!(pidgeot.primary_type, TypeName::Flying);
        assert_eq!(pidgeot.secondary_type, None);
    }

    #[test]
    fn test_duplicate_secondary_collapses() {
        let mut creature = dex_species("charmander").unwrap().clone();
        creature.secondary_type = Some(TypeName::Fire);
        creature.normalize();
        assert_eq!(creature.secondary_type, None);
    }

    #[test]
    fn test_learn_key_serde() {
        let json = serde_json::to_string(&LearnKey::Level(16)).unwrap();
        assert_eq!(json, "\"16\"");
        let json = serde_json::to_string(&LearnKey::Tm).unwrap();
        assert_eq!(json, "\"TM\"");

        let parsed: LearnKey = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(parsed, LearnKey::Level(7));
        let parsed: LearnKey = serde_json::from_str("\"TM\"").unwrap();
        assert_eq!(parsed, LearnKey::Tm);
        assert!(serde_json::from_str::<LearnKey>("\"HM\"").is_err());
    }

    #[test]
    fn test_evo_trigger_serde() {
        let triggers = vec![EvoTrigger::Level(36), EvoTrigger::Method("trade".to_string())];
        let json = serde_json::to_string(&triggers).unwrap();
        assert_eq!(json, "[36,\"trade\"]");
        let parsed: Vec<EvoTrigger> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, triggers);
    }

    #[test]
    fn test_creature_roundtrip() {
        let charizard = dex_species("charizard").unwrap();
        let json = serde_json::to_string(charizard).unwrap();
        let parsed: Creature = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, charizard);
    }
}
