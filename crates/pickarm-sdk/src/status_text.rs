//! 状态文字
//!
//! 控制层只给出 [`ArmStatus`]，显示文字和色调都在这里决定。

use pickarm_control::{ArmStatus, AutomationStep, InputSource};
use std::fmt;

/// 显示色调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    /// 默认（黑）
    Neutral,
    /// 次要（灰）
    Muted,
    /// 提示（亮蓝）
    Info,
    /// 自动流程进行中（深蓝）
    Progress,
    /// 成功（绿）
    Success,
    /// 失败（红）
    Error,
}

impl StatusTone {
    /// 对应的 CSS 颜色
    pub fn css_color(self) -> &'static str {
        match self {
            StatusTone::Neutral => "#000",
            StatusTone::Muted => "#6c757d",
            StatusTone::Info => "#007bff",
            StatusTone::Progress => "#2850a7",
            StatusTone::Success => "#28a745",
            StatusTone::Error => "#dc3545",
        }
    }
}

/// 自动流程步骤的显示文字
pub fn step_text(step: AutomationStep) -> &'static str {
    match step {
        AutomationStep::Idle => "Idle",
        AutomationStep::AlignBase => "Auto: Aligning Base...",
        AutomationStep::Reach => "Auto: Reaching for Object...",
        AutomationStep::Grab => "Auto: Grabbing Object...",
        AutomationStep::Lift => "Auto: Lifting...",
        AutomationStep::MoveToDrop => "Auto: Moving to Drop...",
        AutomationStep::PositionForDrop => "Auto: Positioning for Drop...",
        AutomationStep::Release => "Auto: Releasing Object...",
    }
}

/// 状态的显示文字
pub fn status_text(status: &ArmStatus) -> String {
    match status {
        ArmStatus::Ready => "Ready".to_string(),
        ArmStatus::SystemReset => "System Reset: Ready".to_string(),
        ArmStatus::Manual(InputSource::Slider) => "Manual Control (Slider)".to_string(),
        ArmStatus::Manual(InputSource::Keyboard) => "Manual Control (Keyboard)".to_string(),
        ArmStatus::MotionBlocked(joint) => format!("Blocked: {} would hit the floor", joint),
        ArmStatus::Automation(step) => step_text(*step).to_string(),
        ArmStatus::AutomationPaused => "Auto: Paused".to_string(),
        ArmStatus::AutomationStopped => "Auto: Stopped".to_string(),
        ArmStatus::AutomationAborted => "Auto: Object lost, stopped".to_string(),
        ArmStatus::ObjectPickedUp => "Object Picked Up!".to_string(),
        ArmStatus::ObjectDropped => "Object Dropped".to_string(),
        ArmStatus::TooFar { distance } => format!("Too far! Move closer ({:.1})", distance),
        ArmStatus::TaskComplete => "Task Complete!".to_string(),
    }
}

/// 状态的显示色调
pub fn status_tone(status: &ArmStatus) -> StatusTone {
    match status {
        ArmStatus::Ready | ArmStatus::SystemReset => StatusTone::Neutral,
        ArmStatus::Manual(InputSource::Slider) => StatusTone::Muted,
        ArmStatus::Manual(InputSource::Keyboard) => StatusTone::Info,
        ArmStatus::Automation(_) | ArmStatus::AutomationPaused | ArmStatus::AutomationStopped => {
            StatusTone::Progress
        },
        ArmStatus::ObjectPickedUp | ArmStatus::ObjectDropped | ArmStatus::TaskComplete => {
            StatusTone::Success
        },
        ArmStatus::MotionBlocked(_) | ArmStatus::AutomationAborted | ArmStatus::TooFar { .. } => {
            StatusTone::Error
        },
    }
}

/// 同时带有文字与色调的状态行
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    /// 文字
    pub text: String,
    /// 色调
    pub tone: StatusTone,
}

impl From<&ArmStatus> for StatusLine {
    fn from(status: &ArmStatus) -> Self {
        Self {
            text: status_text(status),
            tone: status_tone(status),
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
