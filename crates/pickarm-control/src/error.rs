//! 控制层错误类型

use pickarm_kinematics::{ConfigError, Deg, Joint};
use thiserror::Error;

/// 控制错误
///
/// 被拒绝的运动不会改变任何状态，错误里携带的 `current` 就是仍然生效的关节值，
/// 调用方（滑块、键盘）应据此回显。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    /// 运动会让夹爪指尖穿过地面
    #[error(
        "Motion of joint {joint} to {requested} rejected: gripper tip would reach y={tip_height:.3} (limit {limit:.3})"
    )]
    UnsafeMotion {
        /// 关节
        joint: Joint,
        /// 请求的角度
        requested: Deg,
        /// 保持不变的当前角度
        current: Deg,
        /// 候选姿态的指尖高度
        tip_height: f64,
        /// 硬限位高度
        limit: f64,
    },

    /// 输入不是有限数值
    #[error("Requested value for joint {joint} is not a finite number")]
    NonFiniteInput {
        /// 关节
        joint: Joint,
        /// 保持不变的当前角度
        current: Deg,
    },

    /// 配置无效
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl ControlError {
    /// 是否为安全门拒绝
    pub fn is_safety_rejection(&self) -> bool {
        matches!(self, Self::UnsafeMotion { .. })
    }

    /// 被拒绝时仍然生效的关节值
    pub fn current_value(&self) -> Option<Deg> {
        match self {
            Self::UnsafeMotion { current, .. } | Self::NonFiniteInput { current, .. } => {
                Some(*current)
            },
            Self::Config(_) => None,
        }
    }
}
