//! 几何与场景配置
//!
//! 所有数值阈值都以配置注入，默认值对应参考场景：
//! 基座落在 y=-2.0 的地面顶面上，下臂 4.5、上臂 4.0，指尖在腕部下方 1.8。

use crate::error::{ConfigError, ensure_non_negative, ensure_positive};
use crate::units::Deg;

/// 连杆尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkDimensions {
    /// 机器人根坐标系在世界坐标中的高度
    pub ground_offset: f64,
    /// 基座高度（根坐标系到下臂转轴）
    pub base_height: f64,
    /// 下臂长度
    pub lower_arm_length: f64,
    /// 上臂长度
    pub upper_arm_length: f64,
    /// 腕部转轴到指尖的竖直距离
    pub gripper_tip_offset: f64,
}

impl Default for LinkDimensions {
    fn default() -> Self {
        Self {
            ground_offset: -2.0,
            base_height: 1.2,
            lower_arm_length: 4.5,
            upper_arm_length: 4.0,
            gripper_tip_offset: 1.8,
        }
    }
}

impl LinkDimensions {
    /// 指尖世界高度
    ///
    /// 只取决于下臂和上臂俯仰角，基座偏航与腕部旋转不改变高度：
    ///
    /// ```text
    /// y = ground + base_h + L·cos(lower) + U·cos(lower + upper) − tip_offset
    /// ```
    pub fn tip_height(&self, lower: Deg, upper: Deg) -> f64 {
        let lower_rad = lower.to_radians();
        let sum_rad = (lower + upper).to_radians();

        self.ground_offset
            + self.base_height
            + self.lower_arm_length * lower_rad.cos()
            + self.upper_arm_length * sum_rad.cos()
            - self.gripper_tip_offset
    }

    /// 校验尺寸
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ground_offset.is_finite() {
            return Err(ConfigError::InvalidDimension {
                name: "ground_offset",
                value: self.ground_offset,
            });
        }
        ensure_positive("base_height", self.base_height)?;
        ensure_positive("lower_arm_length", self.lower_arm_length)?;
        ensure_positive("upper_arm_length", self.upper_arm_length)?;
        ensure_non_negative("gripper_tip_offset", self.gripper_tip_offset)?;
        Ok(())
    }
}

/// 地面平面配置
///
/// 三档高度阈值（均相对 `floor_y`）：
/// - `hard_margin`: 硬限位，安全门拒绝任何让指尖低于此高度的运动
/// - `red_margin`: 显示用红色警告
/// - `warning_margin`: 显示用黄色预警
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FloorConfig {
    /// 地面板中心高度
    pub floor_y: f64,
    /// 地面板厚度
    pub thickness: f64,
    /// 硬限位余量
    pub hard_margin: f64,
    /// 红色警告余量
    pub red_margin: f64,
    /// 黄色预警余量
    pub warning_margin: f64,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            floor_y: -2.1,
            thickness: 0.2,
            hard_margin: 0.05,
            red_margin: 0.3,
            warning_margin: 0.7,
        }
    }
}

impl FloorConfig {
    /// 地面顶面高度（物体静置在此平面上）
    #[inline]
    pub fn top_y(&self) -> f64 {
        self.floor_y + self.thickness / 2.0
    }

    /// 安全门硬限位高度
    #[inline]
    pub fn hard_limit_y(&self) -> f64 {
        self.floor_y + self.hard_margin
    }

    /// 红色警告高度
    #[inline]
    pub fn red_y(&self) -> f64 {
        self.floor_y + self.red_margin
    }

    /// 黄色预警高度
    #[inline]
    pub fn warning_y(&self) -> f64 {
        self.floor_y + self.warning_margin
    }

    /// 校验阈值顺序：hard <= red <= warning
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.floor_y.is_finite() {
            return Err(ConfigError::InvalidDimension {
                name: "floor_y",
                value: self.floor_y,
            });
        }
        ensure_non_negative("floor.thickness", self.thickness)?;
        ensure_non_negative("floor.hard_margin", self.hard_margin)?;
        if !(self.hard_margin <= self.red_margin && self.red_margin <= self.warning_margin) {
            return Err(ConfigError::InvalidParameter {
                param: "floor margins",
                reason: format!(
                    "expected hard <= red <= warning, got {} / {} / {}",
                    self.hard_margin, self.red_margin, self.warning_margin
                ),
            });
        }
        Ok(())
    }
}

/// 运动链选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChainOptions {
    /// 自动调平：夹爪额外旋转 -(lower + upper)，始终竖直朝下
    pub auto_level: bool,
    /// 报告的腕部末端点是否下移 `gripper_tip_offset`（指尖而非腕部转轴）
    pub apply_tip_offset: bool,
    /// 报告的腕部末端点不低于 `floor_y + hard_margin + gripper_tip_offset`
    ///
    /// 只影响抓取距离和释放落点，不影响安全门。
    pub clamp_wrist_tip: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            auto_level: true,
            apply_tip_offset: true,
            clamp_wrist_tip: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tip_height_upright() {
        let dims = LinkDimensions::default();
        // 全部竖直: -2.0 + 1.2 + 4.5 + 4.0 - 1.8
        assert_relative_eq!(dims.tip_height(Deg(0.0), Deg(0.0)), 5.9, epsilon = 1e-12);
    }

    #[test]
    fn test_tip_height_default_pose() {
        let dims = LinkDimensions::default();
        let expected = -2.0 + 1.2 + 4.5 * 25f64.to_radians().cos()
            + 4.0 * 105f64.to_radians().cos()
            - 1.8;
        assert_relative_eq!(dims.tip_height(Deg(25.0), Deg(80.0)), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_dimensions_validate() {
        assert!(LinkDimensions::default().validate().is_ok());

        let dims = LinkDimensions {
            lower_arm_length: 0.0,
            ..Default::default()
        };
        assert_eq!(
            dims.validate(),
            Err(ConfigError::InvalidDimension {
                name: "lower_arm_length",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_floor_thresholds() {
        let floor = FloorConfig::default();
        assert_relative_eq!(floor.top_y(), -2.0, epsilon = 1e-12);
        assert_relative_eq!(floor.hard_limit_y(), -2.05, epsilon = 1e-12);
        assert_relative_eq!(floor.red_y(), -1.8, epsilon = 1e-12);
        assert_relative_eq!(floor.warning_y(), -1.4, epsilon = 1e-12);
        assert!(floor.validate().is_ok());
    }

    #[test]
    fn test_floor_validate_margin_order() {
        let floor = FloorConfig {
            red_margin: 1.0,
            warning_margin: 0.5,
            ..Default::default()
        };
        assert!(floor.validate().is_err());
    }
}
