//! 机械臂整体配置

use crate::automation::{AutomationConfig, PitchPose, check_in_range};
use crate::manual::ManualConfig;
use crate::object::ObjectConfig;
use pickarm_kinematics::{
    ChainOptions, ConfigError, FloorConfig, Joint, JointLimits, JointVector, LinkDimensions,
    SafetyGate,
};

/// 机械臂整体配置
///
/// 各字段缺省时取参考场景的默认值。标量字段排在子表之前，便于序列化为 TOML。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArmConfig {
    /// 初始/复位关节角
    pub home: JointVector,
    /// 连杆尺寸
    pub dimensions: LinkDimensions,
    /// 运动链选项
    pub chain: ChainOptions,
    /// 地面
    pub floor: FloorConfig,
    /// 关节限位
    pub limits: JointLimits,
    /// 物体
    pub object: ObjectConfig,
    /// 自动流程
    pub automation: AutomationConfig,
    /// 手动控制
    pub manual: ManualConfig,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            home: JointVector::from_degrees([0.0, 25.0, 80.0, 90.0]),
            dimensions: LinkDimensions::default(),
            chain: ChainOptions::default(),
            floor: FloorConfig::default(),
            limits: JointLimits::default(),
            object: ObjectConfig::default(),
            automation: AutomationConfig::default(),
            manual: ManualConfig::default(),
        }
    }
}

impl ArmConfig {
    /// 安全门
    pub fn safety_gate(&self) -> SafetyGate {
        SafetyGate::new(self.dimensions, self.floor)
    }

    /// 完整校验
    ///
    /// 除各部分自身的校验外，初始姿态和所有路径点都必须落在限位内并通过安全门。
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dimensions.validate()?;
        self.floor.validate()?;
        self.limits.validate()?;
        self.object.validate()?;
        self.manual.validate()?;

        let gate = self.safety_gate();
        for joint in [Joint::Base, Joint::Wrist] {
            check_in_range("home", joint, self.home[joint], &self.limits)?;
        }
        PitchPose {
            lower: self.home[Joint::Lower],
            upper: self.home[Joint::Upper],
        }
        .validate("home", &self.limits, &gate)?;

        self.automation.validate(&self.limits, &gate)
    }
}
