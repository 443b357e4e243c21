//! 机械臂模型
//!
//! 把运行期不变的部分（运动链、安全门、关节限位、物体参数）打包，
//! 手动控制与自动流程都通过它提交关节值。

use crate::config::ArmConfig;
use crate::error::ControlError;
use crate::object::{ObjectConfig, ObjectState};
use pickarm_kinematics::{
    Deg, Joint, JointArray, JointLimits, JointVector, KinematicChain, LimitState, Pose,
    SafetyGate,
};

/// 关节与地面的显示反馈
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedback {
    /// 每个关节的显示状态（俯仰关节已叠加地面状态）
    pub joints: JointArray<LimitState>,
    /// 指尖高度
    pub tip_height: f64,
    /// 指尖高度分级
    pub floor: LimitState,
}

/// 不可变的机械臂模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmModel {
    chain: KinematicChain,
    gate: SafetyGate,
    limits: JointLimits,
    object: ObjectConfig,
}

impl ArmModel {
    /// 从配置构造（不做校验，见 [`ArmConfig::validate`]）
    pub fn new(config: &ArmConfig) -> Self {
        Self {
            chain: KinematicChain::new(config.dimensions, config.chain),
            gate: SafetyGate::new(config.dimensions, config.floor),
            limits: config.limits,
            object: config.object,
        }
    }

    /// 运动链
    #[inline]
    pub fn chain(&self) -> &KinematicChain {
        &self.chain
    }

    /// 安全门
    #[inline]
    pub fn gate(&self) -> &SafetyGate {
        &self.gate
    }

    /// 关节限位
    #[inline]
    pub fn limits(&self) -> &JointLimits {
        &self.limits
    }

    /// 物体参数
    #[inline]
    pub fn object(&self) -> &ObjectConfig {
        &self.object
    }

    /// 当前关节角下的位姿链
    ///
    /// 开启 `clamp_wrist_tip` 时，腕部末端点不低于硬限位上方一个指尖偏移。
    pub fn pose(&self, joints: &JointVector) -> Pose {
        let mut pose = self.chain.compute_pose(joints);
        if self.chain.options().clamp_wrist_tip {
            pose.clamp_wrist_tip(
                self.gate.floor_limit() + self.chain.dimensions().gripper_tip_offset,
            );
        }
        pose
    }

    /// 物体静置时的中心高度
    pub fn rest_height(&self) -> f64 {
        self.object.rest_height(self.gate.floor().top_y())
    }

    /// 初始位置上的物体
    pub fn home_object(&self) -> ObjectState {
        ObjectState::resting(
            self.object.home_position(self.gate.floor().top_y()),
            self.object.open_gap,
        )
    }

    /// 计算某关节候选值最终能提交的值
    ///
    /// 俯仰关节先对原始候选值做安全检查，再夹到限位；夹紧改变了数值时再检查一次，
    /// 保证最终提交的姿态一定通过安全门。其余关节只做夹紧。
    pub fn propose(
        &self,
        joints: &JointVector,
        joint: Joint,
        candidate: Deg,
    ) -> Result<Deg, ControlError> {
        let current = joints[joint];
        if !candidate.is_finite() {
            return Err(ControlError::NonFiniteInput { joint, current });
        }

        let clamped = self.limits.clamp(joint, candidate);
        if joint.is_pitch() {
            self.ensure_safe(joints, joint, candidate, candidate)?;
            if clamped != candidate {
                self.ensure_safe(joints, joint, candidate, clamped)?;
            }
        }
        Ok(clamped)
    }

    fn ensure_safe(
        &self,
        joints: &JointVector,
        joint: Joint,
        requested: Deg,
        value: Deg,
    ) -> Result<(), ControlError> {
        let mut lower = joints[Joint::Lower];
        let mut upper = joints[Joint::Upper];
        match joint {
            Joint::Lower => lower = value,
            Joint::Upper => upper = value,
            Joint::Base | Joint::Wrist => {},
        }

        let check = self.gate.check(lower, upper);
        if check.is_safe() {
            Ok(())
        } else {
            Err(ControlError::UnsafeMotion {
                joint,
                requested,
                current: joints[joint],
                tip_height: check.tip_height,
                limit: check.limit,
            })
        }
    }

    /// 关节限位反馈叠加地面接近反馈
    pub fn feedback(&self, joints: &JointVector) -> Feedback {
        let tip_height = self.gate.tip_height(joints[Joint::Lower], joints[Joint::Upper]);
        let floor = self.gate.floor_state(tip_height);
        let states = joints.map_with_joint(|joint, value| {
            let state = self.limits.classify(joint, value);
            if joint.is_pitch() {
                state.overlay_floor(floor)
            } else {
                state
            }
        });

        Feedback {
            joints: states,
            tip_height,
            floor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ArmModel {
        ArmModel::new(&ArmConfig::default())
    }

    fn home() -> JointVector {
        JointVector::from_degrees([0.0, 25.0, 80.0, 90.0])
    }

    #[test]
    fn test_propose_clamps_non_pitch() {
        let model = model();
        assert_eq!(model.propose(&home(), Joint::Base, Deg(250.0)), Ok(Deg(180.0)));
        assert_eq!(model.propose(&home(), Joint::Wrist, Deg(-5.0)), Ok(Deg(0.0)));
    }

    #[test]
    fn test_propose_rejects_unsafe_pitch() {
        let model = model();
        let err = model.propose(&home(), Joint::Lower, Deg(90.0)).unwrap_err();
        assert!(err.is_safety_rejection());
        assert_eq!(err.current_value(), Some(Deg(25.0)));
    }

    #[test]
    fn test_propose_rejects_nan() {
        let model = model();
        let err = model.propose(&home(), Joint::Upper, Deg(f64::NAN)).unwrap_err();
        assert_eq!(
            err,
            ControlError::NonFiniteInput {
                joint: Joint::Upper,
                current: Deg(80.0)
            }
        );
    }

    #[test]
    fn test_propose_clamps_safe_pitch() {
        let model = model();
        // 上臂 30° 低于下限，夹到 40°
        assert_eq!(model.propose(&home(), Joint::Upper, Deg(30.0)), Ok(Deg(40.0)));
    }

    #[test]
    fn test_pose_wrist_tip_clamp_is_optional() {
        // 下臂 45° 上臂 80°：指尖低于 floor_limit + tip_offset，但仍在硬限位之上
        let joints = JointVector::from_degrees([0.0, 45.0, 80.0, 90.0]);
        let raw = model().pose(&joints).wrist_tip;
        assert!(raw.y < -2.05 + 1.8);

        let mut config = ArmConfig::default();
        config.chain.clamp_wrist_tip = true;
        let clamped = ArmModel::new(&config).pose(&joints).wrist_tip;
        assert!((clamped.y - (-2.05 + 1.8)).abs() < 1e-12);
        assert_eq!(clamped.x, raw.x);
        assert_eq!(clamped.z, raw.z);
    }

    #[test]
    fn test_home_object_rests_on_floor() {
        let object = model().home_object();
        assert!(!object.carried);
        assert!((object.position.y - (-1.6)).abs() < 1e-12);
        assert_eq!(object.position.x, 5.0);
    }

    #[test]
    fn test_feedback_overlay() {
        let model = model();
        let feedback = model.feedback(&home());
        assert_eq!(feedback.floor, LimitState::Normal);
        assert_eq!(feedback.joints[Joint::Lower], LimitState::Normal);

        // 俯身接近地面：俯仰关节显示地面警告，基座不受影响
        let low = JointVector::from_degrees([0.0, 45.0, 80.0, 90.0]);
        let feedback = model.feedback(&low);
        assert_ne!(feedback.floor, LimitState::Normal);
        assert_eq!(feedback.joints[Joint::Lower], feedback.floor);
        assert_eq!(feedback.joints[Joint::Base], LimitState::Normal);
    }
}
