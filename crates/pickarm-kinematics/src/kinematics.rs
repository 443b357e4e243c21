//! 正运动学
//!
//! 把关节角向量映射为一串刚体变换（4×4 齐次矩阵）。每一级都在上一级之上右乘，
//! 先平移后旋转的顺序不能交换：
//!
//! ```text
//! base        = T(0, ground, 0) · Ry(base)
//! lower_pivot = base · T(0, base_h, 0)
//! lower       = lower_pivot · Rz(lower)
//! upper_pivot = lower · T(0, L, 0)
//! upper       = upper_pivot · Rz(upper)
//! gripper     = upper · T(0, U, 0) [· Rz(-(lower + upper))]
//! ```
//!
//! 结果不做缓存，每个 tick 都从当前关节角重新计算。

use crate::config::{ChainOptions, LinkDimensions};
use crate::joint::{Joint, JointVector};
use crate::units::Deg;
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};

/// 齐次变换矩阵
pub type Transform = Matrix4<f64>;

/// 一次求值得到的位姿链
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// 世界 → 基座（含基座偏航）
    pub base: Transform,
    /// 下臂转轴
    pub lower_pivot: Transform,
    /// 下臂（含俯仰）
    pub lower: Transform,
    /// 上臂转轴
    pub upper_pivot: Transform,
    /// 上臂（含俯仰）
    pub upper: Transform,
    /// 夹爪/腕部
    pub gripper: Transform,
    /// 腕部末端世界坐标
    pub wrist_tip: Point3<f64>,
}

impl Pose {
    /// 把腕部末端点的高度抬到 `min_y` 以上
    pub fn clamp_wrist_tip(&mut self, min_y: f64) {
        if self.wrist_tip.y < min_y {
            self.wrist_tip.y = min_y;
        }
    }

    /// 夹爪坐标系原点（腕部转轴）
    pub fn gripper_origin(&self) -> Point3<f64> {
        translation_of(&self.gripper)
    }

    /// 被抓取物体的世界变换
    ///
    /// 物体挂在腕部旋转之后、夹爪原点下方 `grasp_offset` 处。
    pub fn grasp_transform(&self, wrist: Deg, grasp_offset: f64) -> Transform {
        self.gripper * rotation_y(wrist) * translation(0.0, -grasp_offset, 0.0)
    }

    /// 被抓取物体的世界坐标
    pub fn grasp_point(&self, wrist: Deg, grasp_offset: f64) -> Point3<f64> {
        translation_of(&self.grasp_transform(wrist, grasp_offset))
    }
}

/// 运动链
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicChain {
    dimensions: LinkDimensions,
    options: ChainOptions,
}

impl KinematicChain {
    /// 创建运动链
    pub fn new(dimensions: LinkDimensions, options: ChainOptions) -> Self {
        Self {
            dimensions,
            options,
        }
    }

    /// 连杆尺寸
    #[inline]
    pub fn dimensions(&self) -> &LinkDimensions {
        &self.dimensions
    }

    /// 运动链选项
    #[inline]
    pub fn options(&self) -> &ChainOptions {
        &self.options
    }

    /// 计算位姿链
    pub fn compute_pose(&self, joints: &JointVector) -> Pose {
        let dims = &self.dimensions;

        let base = translation(0.0, dims.ground_offset, 0.0) * rotation_y(joints[Joint::Base]);
        let lower_pivot = base * translation(0.0, dims.base_height, 0.0);
        let lower = lower_pivot * rotation_z(joints[Joint::Lower]);
        let upper_pivot = lower * translation(0.0, dims.lower_arm_length, 0.0);
        let upper = upper_pivot * rotation_z(joints[Joint::Upper]);

        let mut gripper = upper * translation(0.0, dims.upper_arm_length, 0.0);
        if self.options.auto_level {
            gripper = gripper * rotation_z(-(joints[Joint::Lower] + joints[Joint::Upper]));
        }

        let mut wrist_tip = translation_of(&gripper);
        if self.options.apply_tip_offset {
            wrist_tip.y -= dims.gripper_tip_offset;
        }

        Pose {
            base,
            lower_pivot,
            lower,
            upper_pivot,
            upper,
            gripper,
            wrist_tip,
        }
    }

    /// 指尖世界高度，见 [`LinkDimensions::tip_height`]
    #[inline]
    pub fn tip_height(&self, lower: Deg, upper: Deg) -> f64 {
        self.dimensions.tip_height(lower, upper)
    }
}

impl Default for KinematicChain {
    fn default() -> Self {
        Self::new(LinkDimensions::default(), ChainOptions::default())
    }
}

/// 平移矩阵
pub fn translation(x: f64, y: f64, z: f64) -> Transform {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}

/// 绕 Y 轴旋转
pub fn rotation_y(angle: Deg) -> Transform {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle.to_radians()).to_homogeneous()
}

/// 绕 Z 轴旋转
pub fn rotation_z(angle: Deg) -> Transform {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle.to_radians()).to_homogeneous()
}

/// 取齐次矩阵的平移分量
pub fn translation_of(m: &Transform) -> Point3<f64> {
    Point3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn home() -> JointVector {
        JointVector::from_degrees([0.0, 25.0, 80.0, 90.0])
    }

    #[test]
    fn test_upright_pose() {
        let chain = KinematicChain::default();
        let pose = chain.compute_pose(&JointVector::from_degrees([0.0, 0.0, 0.0, 0.0]));

        let origin = pose.gripper_origin();
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(origin.y, -2.0 + 1.2 + 4.5 + 4.0, epsilon = 1e-12);
        assert_relative_eq!(pose.wrist_tip.y, origin.y - 1.8, epsilon = 1e-12);
    }

    #[test]
    fn test_pivot_positions() {
        let chain = KinematicChain::default();
        let pose = chain.compute_pose(&home());

        let lower_pivot = translation_of(&pose.lower_pivot);
        assert_relative_eq!(lower_pivot.y, -0.8, epsilon = 1e-12);

        // 正角度的 Rz 让下臂朝 -X 倾斜
        let upper_pivot = translation_of(&pose.upper_pivot);
        let l = 25f64.to_radians();
        assert_relative_eq!(upper_pivot.x, -4.5 * l.sin(), epsilon = 1e-12);
        assert_relative_eq!(upper_pivot.y, -0.8 + 4.5 * l.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_wrist_tip_matches_height_formula() {
        let chain = KinematicChain::default();
        for (lower, upper) in [(25.0, 80.0), (30.0, 105.0), (0.0, 40.0), (90.0, 135.0)] {
            let joints = JointVector::from_degrees([37.0, lower, upper, 12.0]);
            let pose = chain.compute_pose(&joints);
            assert_relative_eq!(
                pose.wrist_tip.y,
                chain.tip_height(Deg(lower), Deg(upper)),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_base_yaw_mirrors_reach() {
        let chain = KinematicChain::default();
        let reach = JointVector::from_degrees([0.0, 30.0, 105.0, 90.0]);
        let turned = JointVector::from_degrees([-180.0, 30.0, 105.0, 90.0]);

        let a = chain.compute_pose(&reach).wrist_tip;
        let b = chain.compute_pose(&turned).wrist_tip;
        assert_relative_eq!(a.x, -b.x, epsilon = 1e-9);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        assert!(b.x > 5.0 && b.x < 5.2);
    }

    #[test]
    fn test_auto_level_keeps_gripper_vertical() {
        let chain = KinematicChain::default();
        let pose = chain.compute_pose(&JointVector::from_degrees([0.0, 35.0, 95.0, 0.0]));

        // 调平后夹爪局部 Y 轴与世界 Y 轴对齐
        let local_y = pose.gripper.fixed_view::<3, 1>(0, 1).into_owned();
        assert_relative_eq!(local_y, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_without_auto_level_gripper_tilts() {
        let chain = KinematicChain::new(
            LinkDimensions::default(),
            ChainOptions {
                auto_level: false,
                apply_tip_offset: true,
                ..Default::default()
            },
        );
        let pose = chain.compute_pose(&JointVector::from_degrees([0.0, 35.0, 95.0, 0.0]));
        let local_y = pose.gripper.fixed_view::<3, 1>(0, 1).into_owned();
        assert!((local_y.y - 1.0).abs() > 0.1);

        // 平移分量与调平与否无关
        let leveled = KinematicChain::default()
            .compute_pose(&JointVector::from_degrees([0.0, 35.0, 95.0, 0.0]));
        assert_relative_eq!(pose.wrist_tip, leveled.wrist_tip, epsilon = 1e-12);
    }

    #[test]
    fn test_tip_offset_policy() {
        let chain = KinematicChain::new(
            LinkDimensions::default(),
            ChainOptions {
                auto_level: true,
                apply_tip_offset: false,
                ..Default::default()
            },
        );
        let pose = chain.compute_pose(&home());
        assert_relative_eq!(pose.wrist_tip, pose.gripper_origin(), epsilon = 1e-12);
    }

    #[test]
    fn test_grasp_point_leveled_is_below_origin() {
        let chain = KinematicChain::default();
        let pose = chain.compute_pose(&home());
        let grasp = pose.grasp_point(Deg(90.0), 1.8);
        // 调平时腕部旋转不改变下挂点
        assert_relative_eq!(grasp, pose.wrist_tip, epsilon = 1e-9);
    }

    #[test]
    fn test_clamp_wrist_tip_only_raises() {
        let chain = KinematicChain::default();
        let mut pose = chain.compute_pose(&home());
        let before = pose.wrist_tip;

        pose.clamp_wrist_tip(before.y - 1.0);
        assert_eq!(pose.wrist_tip, before);

        pose.clamp_wrist_tip(before.y + 1.0);
        assert_relative_eq!(pose.wrist_tip.y, before.y + 1.0, epsilon = 1e-12);
        assert_eq!(pose.wrist_tip.x, before.x);
    }

    #[test]
    fn test_pose_is_deterministic() {
        let chain = KinematicChain::default();
        assert_eq!(chain.compute_pose(&home()), chain.compute_pose(&home()));
    }
}
