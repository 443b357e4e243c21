//! # pickarm control
//!
//! 四关节取放机械臂的控制层：手动控制、抓取/释放、七步自动取放流程。
//!
//! ## 模块
//!
//! - `model`: 不可变的机械臂模型与统一的关节提交路径
//! - `state`: 可变运行时状态
//! - `object`: 物体与抓取判定
//! - `automation`: 自动流程状态机
//! - `manual`: 滑块/键盘手动控制
//! - `controller`: 对外的单一入口 [`ArmController`]
//!
//! 所有调用都在同一个执行上下文中进行，没有锁也没有后台线程。

pub mod automation;
pub mod config;
pub mod controller;
pub mod error;
pub mod manual;
pub mod model;
pub mod object;
pub mod state;
pub mod status;

pub use automation::{
    AutomationConfig, AutomationState, AutomationStep, PitchPose, Sequencer, Waypoints,
};
pub use config::ArmConfig;
pub use controller::{ArmController, GrabOutcome, Snapshot};
pub use error::ControlError;
pub use manual::{ManualConfig, ManualController};
pub use model::{ArmModel, Feedback};
pub use object::{GrabResult, ObjectConfig, ObjectState, attempt_grab};
pub use state::ArmState;
pub use status::{ArmStatus, InputSource};
