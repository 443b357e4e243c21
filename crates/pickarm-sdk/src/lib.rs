//! pickarm SDK - 四关节取放机械臂仿真
//!
//! # 架构设计
//!
//! 从底层到高层：
//!
//! - **运动学层** (`kinematics`): 角度单位、正运动学、关节限位、地面安全门
//! - **控制层** (`control`): 抓取/释放、自动取放流程、手动控制、`ArmController`
//! - **SDK 层**（本 crate）: 配置文件、状态文字、键盘绑定、日志、tick 循环
//!
//! # 快速开始
//!
//! ```rust
//! use pickarm_sdk::prelude::*;
//!
//! let mut arm = ArmController::new(ArmConfig::default()).unwrap();
//! arm.request_automation_toggle();
//! loop {
//!     let snapshot = arm.tick();
//!     if !snapshot.automation.active {
//!         break;
//!     }
//! }
//! assert_eq!(status_text(&arm.status()), "Task Complete!");
//! ```

pub mod config_file;
pub mod error;
pub mod keymap;
pub mod logging;
pub mod prelude;
pub mod status_text;
pub mod tick_loop;

pub use pickarm_control as control;
pub use pickarm_kinematics as kinematics;

// --- 常用类型 ---

pub use error::{ConfigFileError, LoopError};
pub use keymap::{KeyCommand, KeyOutcome, apply_key};
pub use logging::init_logger;
pub use status_text::{StatusLine, StatusTone, status_text, status_tone};
pub use tick_loop::{LoopConfig, LoopExit, LoopSummary, run_ticks};

pub use pickarm_control::{
    ArmConfig, ArmController, ArmStatus, AutomationStep, ControlError, GrabOutcome, Snapshot,
};
pub use pickarm_kinematics::{ConfigError, Deg, Joint, JointVector, LimitState};
