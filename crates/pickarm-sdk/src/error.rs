//! SDK 错误类型

use pickarm_kinematics::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// 配置文件错误
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// 读写失败
    #[error("Failed to access config file {path}: {source}")]
    Io {
        /// 文件路径
        path: PathBuf,
        /// 底层 I/O 错误
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML 序列化失败
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// 内容可以解析但数值不一致
    #[error("Config is invalid: {0}")]
    Invalid(#[from] ConfigError),
}

impl ConfigFileError {
    /// 是否为文件不存在
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// tick 循环错误
#[derive(Debug, Error)]
pub enum LoopError {
    /// 频率无效
    #[error("Invalid frequency_hz: {0} (must be finite and > 0)")]
    InvalidFrequency(f64),
}
