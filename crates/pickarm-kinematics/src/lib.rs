//! # pickarm kinematics
//!
//! 四关节机械臂（基座偏航、下臂俯仰、上臂俯仰、腕部旋转）的纯计算层，无 I/O、无日志。
//!
//! ## 模块
//!
//! - `units`: 角度 NewType
//! - `joint`: 关节枚举与关节数组
//! - `config`: 连杆尺寸、地面、运动链选项
//! - `kinematics`: 正运动学位姿链
//! - `limits`: 关节限位与接近分级
//! - `safety`: 地面安全门
//!
//! ## 示例
//!
//! ```rust
//! use pickarm_kinematics::{Deg, JointVector, KinematicChain, SafetyGate};
//!
//! let chain = KinematicChain::default();
//! let pose = chain.compute_pose(&JointVector::from_degrees([0.0, 25.0, 80.0, 90.0]));
//! println!("wrist tip: {}", pose.wrist_tip);
//!
//! let gate = SafetyGate::default();
//! assert!(gate.is_safe(Deg(25.0), Deg(80.0)));
//! assert!(!gate.is_safe(Deg(90.0), Deg(80.0)));
//! ```

pub mod config;
pub mod error;
pub mod joint;
pub mod kinematics;
pub mod limits;
pub mod safety;
pub mod units;

// 重新导出常用类型
pub use config::{ChainOptions, FloorConfig, LinkDimensions};
pub use error::ConfigError;
pub use joint::{Joint, JointArray, JointVector};
pub use kinematics::{KinematicChain, Pose, Transform};
pub use limits::{JointLimit, JointLimits, LimitState};
pub use safety::{SafetyCheck, SafetyGate};
pub use units::Deg;

// 与 nalgebra 的类型保持一致，下游无需单独声明依赖
pub use nalgebra::{Point3, Vector3};
