//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use pickarm_sdk::prelude::*;
//! ```

// 控制层
pub use pickarm_control::{
    ArmConfig, ArmController, ArmStatus, AutomationStep, GrabOutcome, InputSource, Snapshot,
};

// 运动学层
pub use pickarm_kinematics::{Deg, Joint, JointArray, JointVector, LimitState};

// SDK 层
pub use crate::keymap::{KeyCommand, KeyOutcome, apply_key};
pub use crate::status_text::{StatusTone, status_text, status_tone};
pub use crate::tick_loop::{LoopConfig, run_ticks};

// 错误类型
pub use crate::error::{ConfigFileError, LoopError};
pub use pickarm_control::ControlError;
pub use pickarm_kinematics::ConfigError;
