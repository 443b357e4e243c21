//! TOML 配置文件
//!
//! 文件中缺省的字段取默认值，读入后立即做完整校验：
//!
//! ```toml
//! home = [0.0, 25.0, 80.0, 90.0]
//!
//! [object]
//! grasp_radius = 1.4
//!
//! [automation]
//! speed_deg_per_tick = 1.5
//!
//! [automation.waypoints.reach]
//! lower = 30.0
//! upper = 105.0
//! ```

use crate::error::ConfigFileError;
use pickarm_control::ArmConfig;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// 从 TOML 文本解析并校验
pub fn from_toml_str(text: &str) -> Result<ArmConfig, ConfigFileError> {
    let config: ArmConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// 序列化为 TOML 文本
pub fn to_toml_string(config: &ArmConfig) -> Result<String, ConfigFileError> {
    Ok(toml::to_string_pretty(config)?)
}

/// 读取配置文件
pub fn load(path: impl AsRef<Path>) -> Result<ArmConfig, ConfigFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = from_toml_str(&text)?;
    info!("Loaded arm config from {}", path.display());
    Ok(config)
}

/// 读取配置文件；文件不存在时返回默认配置
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ArmConfig, ConfigFileError> {
    match load(path.as_ref()) {
        Err(e) if e.is_not_found() => {
            debug!("{} not found, using default config", path.as_ref().display());
            Ok(ArmConfig::default())
        },
        other => other,
    }
}

/// 写入配置文件（先校验）
pub fn save(path: impl AsRef<Path>, config: &ArmConfig) -> Result<(), ConfigFileError> {
    let path = path.as_ref();
    config.validate()?;
    let text = to_toml_string(config)?;
    fs::write(path, text).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved arm config to {}", path.display());
    Ok(())
}
