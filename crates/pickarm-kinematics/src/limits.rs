//! 关节限位策略
//!
//! 每个关节有静态的 `[min, max]` 区间和一个共享的接近阈值。
//! `clamp` 与 `classify` 都是纯函数、全函数，不会失败。

use crate::error::ConfigError;
use crate::joint::{Joint, JointArray, JointVector};
use crate::units::Deg;

/// 接近程度分级
///
/// 同时用于关节机械限位和地面高度的显示反馈。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LimitState {
    /// 正常
    #[default]
    Normal,
    /// 接近限位
    Near,
    /// 到达限位
    Limit,
}

impl LimitState {
    /// 叠加地面高度状态后的显示状态
    ///
    /// 机械限位 `Limit` 优先级最高；否则非正常的地面状态不会被关节状态覆盖。
    pub fn overlay_floor(self, floor: LimitState) -> LimitState {
        match (self, floor) {
            (LimitState::Limit, _) => LimitState::Limit,
            (joint, LimitState::Normal) => joint,
            (_, floor) => floor,
        }
    }
}

/// 单关节限位
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointLimit {
    /// 下限
    pub min: Deg,
    /// 上限
    pub max: Deg,
}

impl JointLimit {
    /// 创建限位
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min: Deg(min),
            max: Deg(max),
        }
    }

    /// 是否在闭区间内
    #[inline]
    pub fn contains(&self, value: Deg) -> bool {
        value >= self.min && value <= self.max
    }

    /// 限制到闭区间
    #[inline]
    pub fn clamp(&self, value: Deg) -> Deg {
        value.clamp(self.min, self.max)
    }

    /// 分级：到达边界为 `Limit`，距边界不超过 `threshold` 为 `Near`
    pub fn classify(&self, value: Deg, threshold: Deg) -> LimitState {
        if value <= self.min || value >= self.max {
            LimitState::Limit
        } else if value <= self.min + threshold || value >= self.max - threshold {
            LimitState::Near
        } else {
            LimitState::Normal
        }
    }
}

/// 全部关节限位
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JointLimits {
    /// 接近阈值
    pub proximity_threshold: Deg,
    /// 每个关节的区间
    pub joints: JointArray<JointLimit>,
}

impl Default for JointLimits {
    fn default() -> Self {
        Self {
            proximity_threshold: Deg(10.0),
            joints: JointArray::new([
                JointLimit::new(-180.0, 180.0),
                JointLimit::new(0.0, 90.0),
                JointLimit::new(40.0, 135.0),
                JointLimit::new(0.0, 180.0),
            ]),
        }
    }
}

impl JointLimits {
    /// 获取某关节的限位
    #[inline]
    pub fn get(&self, joint: Joint) -> &JointLimit {
        &self.joints[joint]
    }

    /// 限制到关节区间
    #[inline]
    pub fn clamp(&self, joint: Joint, value: Deg) -> Deg {
        self.joints[joint].clamp(value)
    }

    /// 关节接近程度分级
    #[inline]
    pub fn classify(&self, joint: Joint, value: Deg) -> LimitState {
        self.joints[joint].classify(value, self.proximity_threshold)
    }

    /// 对整组关节角分级
    pub fn classify_all(&self, joints: &JointVector) -> JointArray<LimitState> {
        joints.map_with_joint(|joint, value| self.classify(joint, value))
    }

    /// 校验：每个区间 min < max 且为有限值，阈值非负
    pub fn validate(&self) -> Result<(), ConfigError> {
        for joint in Joint::ALL {
            let limit = self.joints[joint];
            if !(limit.min.is_finite() && limit.max.is_finite() && limit.min < limit.max) {
                return Err(ConfigError::InvalidLimit {
                    joint,
                    min: limit.min.0,
                    max: limit.max.0,
                });
            }
        }
        if !(self.proximity_threshold.is_finite() && self.proximity_threshold.0 >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                param: "proximity_threshold",
                reason: format!("must be finite and >= 0, got {}", self.proximity_threshold.0),
            });
        }
        Ok(())
    }
}
