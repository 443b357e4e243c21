//! 键盘绑定
//!
//! | 按键 | 动作 |
//! |------|------|
//! | `a` / `d` | 基座 − / + |
//! | `w` / `s` | 下臂 + / − |
//! | `i` / `k` | 上臂 + / − |
//! | `j` / `l` | 腕部 − / + |
//! | `enter` | 抓取/释放 |
//! | `space` | 自动流程 启动/暂停 |
//! | `r` | 复位 |
//!
//! 自动流程运行时只有 `space` 和 `r` 生效，其余按键被忽略。

use pickarm_control::{ArmController, ControlError, GrabOutcome};
use pickarm_kinematics::{Deg, Joint};
use std::str::FromStr;

/// 按键命令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// 按配置步长微调关节
    Nudge {
        /// 关节
        joint: Joint,
        /// 正向
        positive: bool,
    },
    /// 抓取/释放
    GrabToggle,
    /// 自动流程 启动/暂停
    AutomationToggle,
    /// 复位
    Reset,
}

impl KeyCommand {
    /// 解析按键名（不区分大小写）
    pub fn from_key(key: &str) -> Option<Self> {
        let nudge = |joint, positive| Some(KeyCommand::Nudge { joint, positive });
        match key.to_ascii_lowercase().as_str() {
            "a" => nudge(Joint::Base, false),
            "d" => nudge(Joint::Base, true),
            "w" => nudge(Joint::Lower, true),
            "s" => nudge(Joint::Lower, false),
            "i" => nudge(Joint::Upper, true),
            "k" => nudge(Joint::Upper, false),
            "j" => nudge(Joint::Wrist, false),
            "l" => nudge(Joint::Wrist, true),
            "enter" | "return" => Some(KeyCommand::GrabToggle),
            " " | "space" => Some(KeyCommand::AutomationToggle),
            "r" => Some(KeyCommand::Reset),
            _ => None,
        }
    }

    /// 自动流程运行时是否仍然生效
    pub fn allowed_during_automation(&self) -> bool {
        matches!(self, KeyCommand::AutomationToggle | KeyCommand::Reset)
    }
}

impl FromStr for KeyCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyCommand::from_key(s).ok_or_else(|| format!("Unbound key: {:?}", s))
    }
}

/// 按键执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// 关节已移动到该值
    Moved(Joint, Deg),
    /// 运动被拒绝
    Rejected(ControlError),
    /// 抓取/释放结果
    Grab(GrabOutcome),
    /// 自动流程已切换
    AutomationToggled,
    /// 已复位
    Reset,
    /// 自动流程运行中，按键被忽略
    Ignored,
}

/// 执行按键命令
pub fn apply_key(arm: &mut ArmController, command: KeyCommand) -> KeyOutcome {
    if !arm.manual_enabled() && !command.allowed_during_automation() {
        return KeyOutcome::Ignored;
    }

    match command {
        KeyCommand::Nudge { joint, positive } => match arm.nudge_joint_step(joint, positive) {
            Ok(value) => KeyOutcome::Moved(joint, value),
            Err(e) => KeyOutcome::Rejected(e),
        },
        KeyCommand::GrabToggle => KeyOutcome::Grab(arm.request_grab_toggle()),
        KeyCommand::AutomationToggle => {
            arm.request_automation_toggle();
            KeyOutcome::AutomationToggled
        },
        KeyCommand::Reset => {
            arm.request_reset();
            KeyOutcome::Reset
        },
    }
}
