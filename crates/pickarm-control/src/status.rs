//! 用户可见的状态
//!
//! 只描述"发生了什么"，具体的显示文字由上层决定。

use crate::automation::AutomationStep;
use pickarm_kinematics::Joint;

/// 手动输入来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// 滑块（绝对值）
    Slider,
    /// 键盘（增量）
    Keyboard,
}

/// 机械臂状态
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ArmStatus {
    /// 初始状态
    #[default]
    Ready,
    /// 已复位
    SystemReset,
    /// 手动控制中
    Manual(InputSource),
    /// 手动运动被安全门拒绝
    MotionBlocked(Joint),
    /// 自动流程正在执行某一步
    Automation(AutomationStep),
    /// 自动流程已暂停（步骤保留）
    AutomationPaused,
    /// 自动流程已停止
    AutomationStopped,
    /// 自动流程途中物体丢失
    AutomationAborted,
    /// 抓取成功
    ObjectPickedUp,
    /// 物体已放下
    ObjectDropped,
    /// 距离太远，抓取失败
    TooFar {
        /// 腕部末端到物体中心的距离
        distance: f64,
    },
    /// 自动流程完成
    TaskComplete,
}

impl ArmStatus {
    /// 是否为失败/警告类状态
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::MotionBlocked(_) | Self::AutomationAborted | Self::TooFar { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ready() {
        assert_eq!(ArmStatus::default(), ArmStatus::Ready);
    }

    #[test]
    fn test_warning_states() {
        assert!(ArmStatus::TooFar { distance: 3.0 }.is_warning());
        assert!(ArmStatus::MotionBlocked(Joint::Upper).is_warning());
        assert!(ArmStatus::AutomationAborted.is_warning());
        assert!(!ArmStatus::TaskComplete.is_warning());
        assert!(!ArmStatus::Automation(AutomationStep::Lift).is_warning());
    }
}
