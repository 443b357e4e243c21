//! 被操作物体与抓取/释放逻辑
//!
//! 物体有两种状态：
//! - 静置：`position` 是权威世界坐标
//! - 被夹持：位置由夹爪位姿推导（见 [`Pose::grasp_point`]），`position` 不再有效
//!
//! [`Pose::grasp_point`]: pickarm_kinematics::Pose::grasp_point

use pickarm_kinematics::{ConfigError, Deg, Point3, Pose};

/// 物体与夹爪参数
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObjectConfig {
    /// 立方体边长
    pub size: f64,
    /// 初始 X 坐标
    pub home_x: f64,
    /// 初始 Z 坐标
    pub home_z: f64,
    /// 抓取半径：腕部末端与物体中心距离严格小于此值才能抓住
    pub grasp_radius: f64,
    /// 被夹持时物体中心在夹爪原点下方的距离
    pub grasp_offset: f64,
    /// 夹爪张开时单侧指头的偏移
    pub open_gap: f64,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            size: 0.8,
            home_x: 5.0,
            home_z: 0.0,
            grasp_radius: 1.4,
            grasp_offset: 1.8,
            open_gap: 0.2,
        }
    }
}

impl ObjectConfig {
    /// 静置高度：物体中心落在地面顶面上方半个边长处
    #[inline]
    pub fn rest_height(&self, floor_top: f64) -> f64 {
        floor_top + self.size / 2.0
    }

    /// 初始位置
    pub fn home_position(&self, floor_top: f64) -> Point3<f64> {
        Point3::new(self.home_x, self.rest_height(floor_top), self.home_z)
    }

    /// 校验参数
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, f64, bool); 6] = [
            ("object.size", self.size, self.size > 0.0),
            ("object.grasp_radius", self.grasp_radius, self.grasp_radius > 0.0),
            ("object.grasp_offset", self.grasp_offset, self.grasp_offset >= 0.0),
            ("object.open_gap", self.open_gap, self.open_gap >= 0.0),
            ("object.home_x", self.home_x, true),
            ("object.home_z", self.home_z, true),
        ];
        for (name, value, ok) in checks {
            if !(value.is_finite() && ok) {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }
        Ok(())
    }
}

/// 一次抓取尝试的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabResult {
    /// 是否抓住
    pub success: bool,
    /// 腕部末端到物体中心的欧氏距离
    pub distance: f64,
}

/// 抓取判定
///
/// 距离严格小于半径才算成功；恰好等于半径视为太远。
pub fn attempt_grab(wrist_tip: &Point3<f64>, object: &Point3<f64>, radius: f64) -> GrabResult {
    let distance = (wrist_tip - object).norm();
    GrabResult {
        success: distance < radius,
        distance,
    }
}

/// 物体运行时状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectState {
    /// 静置时的世界坐标
    pub position: Point3<f64>,
    /// 是否被夹持
    pub carried: bool,
    /// 当前夹爪开口（夹持时为 0）
    pub gripper_gap: f64,
}

impl ObjectState {
    /// 静置在给定位置、夹爪张开
    pub fn resting(position: Point3<f64>, open_gap: f64) -> Self {
        Self {
            position,
            carried: false,
            gripper_gap: open_gap,
        }
    }

    /// 尝试抓取；成功时进入夹持状态、夹爪闭合
    ///
    /// 已经夹持时直接视为成功，距离为 0。
    pub fn try_grab(&mut self, wrist_tip: &Point3<f64>, radius: f64) -> GrabResult {
        if self.carried {
            return GrabResult {
                success: true,
                distance: 0.0,
            };
        }
        let result = attempt_grab(wrist_tip, &self.position, radius);
        if result.success {
            self.carried = true;
            self.gripper_gap = 0.0;
        }
        result
    }

    /// 释放：物体落到腕部末端正下方的地面上
    ///
    /// 释放总是成功，与当前夹持状态无关。
    pub fn release(&mut self, wrist_tip: &Point3<f64>, rest_height: f64, open_gap: f64) {
        self.carried = false;
        self.gripper_gap = open_gap;
        self.position = Point3::new(wrist_tip.x, rest_height, wrist_tip.z);
    }

    /// 物体当前世界坐标
    pub fn world_position(&self, pose: &Pose, wrist: Deg, grasp_offset: f64) -> Point3<f64> {
        if self.carried {
            pose.grasp_point(wrist, grasp_offset)
        } else {
            self.position
        }
    }
}
