// 错误处理系统
// 开发心理：统一的错误类型系统，提供清晰的错误信息
// 使用Rust的Result类型确保错误处理的安全性和一致性

use std::{fmt, error::Error as StdError, io};
use serde::{Serialize, Deserialize};

// 融合分析主要错误类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FusionError {
    // 外部数据查询失败（种族/属性/招式未找到或传输错误）
    LookupFailure(String),

    // 威胁评分表中缺少必需的属性条目
    MissingThreatScore(String),

    // 融合输入无效（重复名称、无法获取的配对）
    InvalidFusionInput(String),

    // 配置错误
    ConfigError(String),

    // IO错误
    IoError(String),

    // 序列化错误
    SerializationError(String),
}

// Result类型别名
pub type Result<T> = std::result::Result<T, FusionError>;

impl fmt::Display for FusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FusionError::LookupFailure(msg) => write!(f, "查询失败: {}", msg),
            FusionError::MissingThreatScore(msg) => write!(f, "缺少威胁评分: {}", msg),
            FusionError::InvalidFusionInput(msg) => write!(f, "融合输入无效: {}", msg),
            FusionError::ConfigError(msg) => write!(f, "配置错误: {}", msg),
            FusionError::IoError(msg) => write!(f, "IO错误: {}", msg),
            FusionError::SerializationError(msg) => write!(f, "序列化错误: {}", msg),
        }
    }
}

impl StdError for FusionError {}

impl From<io::Error> for FusionError {
    fn from(error: io::Error) -> Self {
        FusionError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for FusionError {
    fn from(error: serde_json::Error) -> Self {
        FusionError::SerializationError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FusionError::LookupFailure("missingno".to_string());
        assert!(err.to_string().contains("missingno"));

        let err = FusionError::MissingThreatScore("fire".to_string());
        assert!(err.to_string().contains("fire"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err: FusionError = io_err.into();
        assert!(matches!(err, FusionError::IoError(_)));
    }

    #[test]
    fn test_serde_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: FusionError = json_err.into();
        assert!(matches!(err, FusionError::SerializationError(_)));
    }
}
