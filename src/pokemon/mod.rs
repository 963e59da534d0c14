// 宝可梦数据域模块
// 开发心理：属性、种族、招式三大基础数据域，供融合引擎消费

pub mod types;
pub mod species;
pub mod moves;

pub use types::{DamageRelations, Effectiveness, ResolvedTyping, TypeChart, TypeName, TYPE_CHART};
pub use species::{BaseStats, Creature, EvoTrigger, Evoline, LearnKey, Learnset};
pub use moves::{MoveCoverage, MoveDetail, MoveInfo, DANGEROUS_MOVES};
