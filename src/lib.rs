// 宝可梦融合分析引擎库入口
// 开发心理：纯函数分析核心，数据获取抽象为提供者，表现层完全外置
// 架构：数据域(pokemon) → 融合引擎(fusion) → 数据访问(data)，核心基座(core)共享

// 核心基础 - 错误与配置
pub mod core;

// 数据域 - 属性、种族、招式
pub mod pokemon;

// 融合引擎 - 计算、评分、生成、配对、威胁
pub mod fusion;

// 数据访问 - 提供者、缓存、威胁评分表
pub mod data;

// 重新导出核心类型
pub use crate::core::{AnalysisConfig, FusionError, Result};
pub use pokemon::{BaseStats, Creature, DamageRelations, ResolvedTyping, TypeName};
pub use fusion::{
    composite_offensive_threat_scores, fused_team, optimal_fusions, possible_fusions,
    AnalyzedFusion, EffectivenessProfile, Fusion, MetricWeights, OffensiveMetrics, PairingMetric,
    ScoringMode,
};
pub use data::{CachedProvider, PokedexProvider, StaticDex, ThreatScoreTable};

// 版本信息
pub const VERSION: &str = "0.1.0";
pub const NAME: &str = "pokefusion";

// 引擎常量
pub mod constants {
    // 属性总数
    pub const TYPE_COUNT: usize = 18;

    // 六项种族值
    pub const STAT_COUNT: usize = 6;

    // 队伍成员上限
    pub const MAX_TEAM_SIZE: usize = 6;
}

// 便利函数：初始化日志系统
pub fn init() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "pokefusion=info");
    }

    let _ = env_logger::try_init();

    log::info!("融合分析引擎初始化完成 v{}", VERSION);
}
