//! 手动控制
//!
//! 滑块给出绝对值，键盘给出增量。两者都走同一条提交路径：
//! 俯仰关节先过安全门再夹紧，其余关节只夹紧。
//! 任何手动操作都会取消正在进行（或已暂停）的自动流程。

use crate::error::ControlError;
use crate::model::ArmModel;
use crate::state::ArmState;
use pickarm_kinematics::{ConfigError, Deg, Joint};
use tracing::{debug, info};

/// 手动控制参数
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManualConfig {
    /// 每次按键的增量
    pub nudge_step: Deg,
}

impl Default for ManualConfig {
    fn default() -> Self {
        Self {
            nudge_step: Deg(3.0),
        }
    }
}

impl ManualConfig {
    /// 校验增量
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nudge_step.is_finite() && self.nudge_step.0 > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidParameter {
                param: "manual.nudge_step",
                reason: format!("must be finite and > 0, got {}", self.nudge_step.0),
            })
        }
    }
}

/// 手动控制器（借用模型与状态）
pub struct ManualController<'a> {
    model: &'a ArmModel,
    state: &'a mut ArmState,
}

impl<'a> ManualController<'a> {
    /// 创建
    pub fn new(model: &'a ArmModel, state: &'a mut ArmState) -> Self {
        Self { model, state }
    }

    /// 取消自动流程
    pub fn cancel_automation(&mut self) {
        let automation = &mut self.state.automation;
        if automation.active || automation.is_paused() {
            info!("Manual input cancels automation at step {}", automation.step);
            automation.reset();
        }
    }

    /// 设置关节绝对角度，返回实际提交的值
    pub fn set_joint(&mut self, joint: Joint, value: Deg) -> Result<Deg, ControlError> {
        self.cancel_automation();
        self.commit(joint, value)
    }

    /// 在当前角度上叠加增量，返回实际提交的值
    pub fn nudge(&mut self, joint: Joint, delta: Deg) -> Result<Deg, ControlError> {
        self.cancel_automation();
        let candidate = self.state.joints[joint] + delta;
        self.commit(joint, candidate)
    }

    fn commit(&mut self, joint: Joint, candidate: Deg) -> Result<Deg, ControlError> {
        match self.model.propose(&self.state.joints, joint, candidate) {
            Ok(value) => {
                self.state.joints[joint] = value;
                Ok(value)
            },
            Err(e) => {
                debug!("Manual motion rejected: {}", e);
                Err(e)
            },
        }
    }
}
