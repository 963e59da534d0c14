// 数据提供者抽象
// 开发心理：外部种族/属性/招式查询抽象为trait，内置图鉴实现支持离线分析与测试
// 设计原则：阻塞式同步查询、结果不可变、未知招式不是错误

use log::{debug, warn};

use crate::core::error::{FusionError, Result};
use crate::pokemon::moves::{MoveInfo, MOVE_DATABASE};
use crate::pokemon::species::{dex_species, Creature};
use crate::pokemon::types::{DamageRelations, TypeName, TYPE_CHART};

// 外部数据查询能力
// 种族与属性查询失败返回LookupFailure；招式未知返回None
pub trait PokedexProvider {
    fn fetch_creature(&self, name: &str) -> Result<Creature>;

    fn fetch_type_relations(&self, type_name: TypeName) -> Result<DamageRelations>;

    fn fetch_move_info(&self, name: &str) -> Option<MoveInfo>;
}

// 内置图鉴提供者：由静态种族表、相克表、招式表支撑
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDex;

impl StaticDex {
    pub fn new() -> Self {
        Self
    }
}

impl PokedexProvider for StaticDex {
    fn fetch_creature(&self, name: &str) -> Result<Creature> {
        match dex_species(name) {
            Some(creature) => {
                debug!("图鉴命中: {}", name);
                Ok(creature.clone().normalized())
            }
            None => {
                warn!("图鉴查询失败: {}", name);
                Err(FusionError::LookupFailure(format!("未知种族: {}", name)))
            }
        }
    }

    fn fetch_type_relations(&self, type_name: TypeName) -> Result<DamageRelations> {
        Ok(TYPE_CHART.damage_relations(type_name))
    }

    fn fetch_move_info(&self, name: &str) -> Option<MoveInfo> {
        MOVE_DATABASE.get(name.to_lowercase().as_str()).cloned()
    }
}
