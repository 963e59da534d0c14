// 核心基础模块
// 开发心理：错误类型与配置是全库共享的基座

pub mod error;
pub mod config;

pub use error::{FusionError, Result};
pub use config::AnalysisConfig;
