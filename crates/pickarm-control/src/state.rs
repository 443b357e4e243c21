//! 运行时状态

use crate::automation::AutomationState;
use crate::config::ArmConfig;
use crate::model::ArmModel;
use crate::object::ObjectState;
use pickarm_kinematics::JointVector;

/// 可变的机械臂状态
///
/// 只由控制器持有，通过引用传给手动控制和自动流程。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmState {
    /// 当前关节角（已提交、已通过安全门）
    pub joints: JointVector,
    /// 物体
    pub object: ObjectState,
    /// 自动流程
    pub automation: AutomationState,
}

impl ArmState {
    /// 初始状态
    pub fn home(config: &ArmConfig, model: &ArmModel) -> Self {
        Self {
            joints: config.home,
            object: model.home_object(),
            automation: AutomationState::idle(config.automation.speed_deg_per_tick),
        }
    }
}
