// 融合分析引擎模块
// 开发心理：计算器→评分器→生成器→配对搜索的纯函数流水线

pub mod calculator;
pub mod effectiveness;
pub mod generator;
pub mod pairing;
pub mod threat;

pub use calculator::{combine_evolines, combine_learnsets, fuse_pair, fuse_stats, Fusion};
pub use effectiveness::{analyze_typing, effective_delta, EffectivenessProfile, ScoringMode};
pub use generator::{fused_team, possible_fusions, AnalyzedFusion, TEAM_ID, TEAM_NAME};
pub use pairing::{find_extreme_pairs, optimal_fusions, pair_scores, PairScores, PairingMetric};
pub use threat::{composite_offensive_threat_scores, MetricWeights, OffensiveMetrics};
