//! 配置错误类型
//!
//! 几何尺寸、关节限位和路径点都在构造时校验，运行期的运动学计算本身是全函数，
//! 不会产生错误。

use crate::joint::Joint;
use thiserror::Error;

/// 配置校验错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// 尺寸无效（NaN、无穷或非正数）
    #[error("Dimension '{name}' must be finite and positive, got {value}")]
    InvalidDimension {
        /// 字段名
        name: &'static str,
        /// 实际值
        value: f64,
    },

    /// 关节限位无效（min >= max 或非有限值）
    #[error("Joint {joint} limits are invalid: [{min}, {max}]")]
    InvalidLimit {
        /// 关节
        joint: Joint,
        /// 下限
        min: f64,
        /// 上限
        max: f64,
    },

    /// 路径点超出关节限位
    #[error(
        "Waypoint '{waypoint}' drives joint {joint} to {value:.1}, outside [{min:.1}, {max:.1}]"
    )]
    WaypointOutOfRange {
        /// 路径点名称
        waypoint: &'static str,
        /// 关节
        joint: Joint,
        /// 目标角度
        value: f64,
        /// 下限
        min: f64,
        /// 上限
        max: f64,
    },

    /// 路径点会让夹爪穿过地面
    #[error("Waypoint '{waypoint}' puts the gripper tip at y={height:.3}, below the floor limit")]
    UnsafeWaypoint {
        /// 路径点名称
        waypoint: &'static str,
        /// 末端高度
        height: f64,
    },

    /// 参数无效
    #[error("Invalid parameter '{param}': {reason}")]
    InvalidParameter {
        /// 参数名
        param: &'static str,
        /// 原因
        reason: String,
    },
}

impl ConfigError {
    /// 是否为路径点相关错误
    pub fn is_waypoint_error(&self) -> bool {
        matches!(
            self,
            Self::WaypointOutOfRange { .. } | Self::UnsafeWaypoint { .. }
        )
    }
}

/// 校验一个必须为正的有限尺寸
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}

/// 校验一个必须为非负的有限尺寸
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}
