// 数据访问层模块
// 开发心理：提供者抽象 + 记忆化缓存 + 威胁评分表持久化

pub mod provider;
pub mod cache;
pub mod threat_store;

pub use provider::{PokedexProvider, StaticDex};
pub use cache::{CacheStatistics, CachedProvider};
pub use threat_store::ThreatScoreTable;
