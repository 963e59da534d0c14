// 查询记忆化缓存
// 开发心理：上游数据静态不变，同键查询在进程生命周期内只发生一次
// 设计原则：显式键值缓存、无上限、失败不入缓存、条目相互独立

use std::cell::RefCell;
use std::collections::HashMap;
use log::debug;

use crate::core::error::Result;
use crate::pokemon::moves::MoveInfo;
use crate::pokemon::species::Creature;
use crate::pokemon::types::{DamageRelations, TypeName};
use super::provider::PokedexProvider;

// 缓存统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
}

// 记忆化提供者包装：内层提供者的成功结果按键缓存
// 引擎为单线程请求/响应模型，内部可变性用RefCell表达
pub struct CachedProvider<P: PokedexProvider> {
    inner: P,
    creatures: RefCell<HashMap<String, Creature>>,
    relations: RefCell<HashMap<TypeName, DamageRelations>>,
    moves: RefCell<HashMap<String, Option<MoveInfo>>>,
    statistics: RefCell<CacheStatistics>,
}

impl<P: PokedexProvider> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            creatures: RefCell::new(HashMap::new()),
            relations: RefCell::new(HashMap::new()),
            moves: RefCell::new(HashMap::new()),
            statistics: RefCell::new(CacheStatistics::default()),
        }
    }

    pub fn statistics(&self) -> CacheStatistics {
        *self.statistics.borrow()
    }

    pub fn clear(&self) {
        self.creatures.borrow_mut().clear();
        self.relations.borrow_mut().clear();
        self.moves.borrow_mut().clear();
        debug!("查询缓存已清空");
    }

    fn record_hit(&self) {
        self.statistics.borrow_mut().hits += 1;
    }

    fn record_miss(&self) {
        self.statistics.borrow_mut().misses += 1;
    }
}

impl<P: PokedexProvider> PokedexProvider for CachedProvider<P> {
    fn fetch_creature(&self, name: &str) -> Result<Creature> {
        let key = name.to_lowercase();

        if let Some(cached) = self.creatures.borrow().get(&key) {
            self.record_hit();
            return Ok(cached.clone());
        }

        self.record_miss();
        // 失败不缓存：一次查询失败不得污染其他键
        let creature = self.inner.fetch_creature(&key)?;
        self.creatures.borrow_mut().insert(key, creature.clone());
        Ok(creature)
    }

    fn fetch_type_relations(&self, type_name: TypeName) -> Result<DamageRelations> {
        if let Some(cached) = self.relations.borrow().get(&type_name) {
            self.record_hit();
            return Ok(cached.clone());
        }

        self.record_miss();
        let relations = self.inner.fetch_type_relations(type_name)?;
        self.relations.borrow_mut().insert(type_name, relations.clone());
        Ok(relations)
    }

    fn fetch_move_info(&self, name: &str) -> Option<MoveInfo> {
        let key = name.to_lowercase();

        if let Some(cached) = self.moves.borrow().get(&key) {
            self.record_hit();
            return cached.clone();
        }

        self.record_miss();
        // 未知招式是稳定结果，同样记忆化
        let info = self.inner.fetch_move_info(&key);
        self.moves.borrow_mut().insert(key, info.clone());
        info
    }
}
