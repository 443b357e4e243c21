//! 地面安全门
//!
//! 对下臂/上臂的任何提交都必须先经过 [`SafetyGate::is_safe`]。
//! 不安全的候选值直接丢弃而不是夹到边界：夹紧后的值取决于运动方向，仍可能越界。

use crate::config::{FloorConfig, LinkDimensions};
use crate::limits::LimitState;
use crate::units::Deg;

/// 一次安全检查的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyCheck {
    /// 候选姿态下的指尖高度
    pub tip_height: f64,
    /// 硬限位高度
    pub limit: f64,
}

impl SafetyCheck {
    /// 指尖严格高于硬限位
    #[inline]
    pub fn is_safe(&self) -> bool {
        self.tip_height > self.limit
    }
}

/// 地面安全门
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyGate {
    dimensions: LinkDimensions,
    floor: FloorConfig,
}

impl SafetyGate {
    /// 创建安全门
    pub fn new(dimensions: LinkDimensions, floor: FloorConfig) -> Self {
        Self { dimensions, floor }
    }

    /// 地面配置
    #[inline]
    pub fn floor(&self) -> &FloorConfig {
        &self.floor
    }

    /// 硬限位高度 `floor_y + hard_margin`
    #[inline]
    pub fn floor_limit(&self) -> f64 {
        self.floor.hard_limit_y()
    }

    /// 候选姿态的指尖高度
    #[inline]
    pub fn tip_height(&self, lower: Deg, upper: Deg) -> f64 {
        self.dimensions.tip_height(lower, upper)
    }

    /// 检查候选姿态
    pub fn check(&self, lower: Deg, upper: Deg) -> SafetyCheck {
        SafetyCheck {
            tip_height: self.tip_height(lower, upper),
            limit: self.floor_limit(),
        }
    }

    /// 候选姿态是否安全
    #[inline]
    pub fn is_safe(&self, lower: Deg, upper: Deg) -> bool {
        self.check(lower, upper).is_safe()
    }

    /// 指尖高度的显示分级（红色/黄色警告带）
    pub fn floor_state(&self, tip_height: f64) -> LimitState {
        if tip_height <= self.floor.red_y() {
            LimitState::Limit
        } else if tip_height <= self.floor.warning_y() {
            LimitState::Near
        } else {
            LimitState::Normal
        }
    }
}

impl Default for SafetyGate {
    fn default() -> Self {
        Self::new(LinkDimensions::default(), FloorConfig::default())
    }
}
