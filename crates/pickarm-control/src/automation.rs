//! 自动取放流程
//!
//! 七步状态机，每个 tick 最多推进一步：
//!
//! ```text
//! 0 Idle ─▶ 1 AlignBase ─▶ 2 Reach ─▶ 3 Grab ─▶ 4 Lift ─▶ 5 MoveToDrop ─▶ 6 PositionForDrop ─▶ 7 Release ─▶ 0
//!                                       │
//!                                       └─ 太远 ─▶ 0
//! ```
//!
//! 关节以固定角速度向目标逼近，剩余量小于一步时直接对齐到目标。
//! 每一次俯仰提交都要经过安全门，被拒绝时该关节原地不动，流程停在当前步骤等待下一个 tick。

use crate::error::ControlError;
use crate::model::ArmModel;
use crate::state::ArmState;
use crate::status::ArmStatus;
use pickarm_kinematics::{ConfigError, Deg, Joint, JointLimits, JointVector, SafetyGate};
use std::fmt;
use tracing::{debug, info, trace, warn};

/// 流程步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum AutomationStep {
    /// 空闲
    #[default]
    Idle = 0,
    /// 基座转向物体
    AlignBase = 1,
    /// 俯身到抓取位
    Reach = 2,
    /// 抓取
    Grab = 3,
    /// 抬起
    Lift = 4,
    /// 基座转向放置点
    MoveToDrop = 5,
    /// 俯身到放置位
    PositionForDrop = 6,
    /// 释放
    Release = 7,
}

impl AutomationStep {
    /// 全部步骤（按执行顺序）
    pub const ALL: [AutomationStep; 8] = [
        AutomationStep::Idle,
        AutomationStep::AlignBase,
        AutomationStep::Reach,
        AutomationStep::Grab,
        AutomationStep::Lift,
        AutomationStep::MoveToDrop,
        AutomationStep::PositionForDrop,
        AutomationStep::Release,
    ];

    /// 步骤编号
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// 从编号构造
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// 这一步开始前物体必须已被夹持
    pub const fn requires_object(self) -> bool {
        matches!(
            self,
            AutomationStep::Lift | AutomationStep::MoveToDrop | AutomationStep::PositionForDrop
        )
    }

    /// 下一步；最后一步之后回到 Idle
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(AutomationStep::Idle)
    }
}

impl fmt::Display for AutomationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AutomationStep::Idle => "idle",
            AutomationStep::AlignBase => "align_base",
            AutomationStep::Reach => "reach",
            AutomationStep::Grab => "grab",
            AutomationStep::Lift => "lift",
            AutomationStep::MoveToDrop => "move_to_drop",
            AutomationStep::PositionForDrop => "position_for_drop",
            AutomationStep::Release => "release",
        };
        write!(f, "{}", name)
    }
}

/// 下臂 + 上臂的目标姿态
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchPose {
    /// 下臂角度
    pub lower: Deg,
    /// 上臂角度
    pub upper: Deg,
}

impl PitchPose {
    /// 创建姿态
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower: Deg(lower),
            upper: Deg(upper),
        }
    }

    /// 校验：两个关节都在限位内且姿态通过安全门
    pub fn validate(
        &self,
        waypoint: &'static str,
        limits: &JointLimits,
        gate: &SafetyGate,
    ) -> Result<(), ConfigError> {
        check_in_range(waypoint, Joint::Lower, self.lower, limits)?;
        check_in_range(waypoint, Joint::Upper, self.upper, limits)?;
        let check = gate.check(self.lower, self.upper);
        if !check.is_safe() {
            return Err(ConfigError::UnsafeWaypoint {
                waypoint,
                height: check.tip_height,
            });
        }
        Ok(())
    }
}

/// 检查单个关节目标是否在限位内
pub(crate) fn check_in_range(
    waypoint: &'static str,
    joint: Joint,
    value: Deg,
    limits: &JointLimits,
) -> Result<(), ConfigError> {
    let limit = limits.get(joint);
    if limit.contains(value) {
        Ok(())
    } else {
        Err(ConfigError::WaypointOutOfRange {
            waypoint,
            joint,
            value: value.0,
            min: limit.min.0,
            max: limit.max.0,
        })
    }
}

/// 流程路径点
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Waypoints {
    /// 第 1 步：基座对准物体
    pub align_base: Deg,
    /// 第 5 步：基座对准放置点
    pub drop_base: Deg,
    /// 第 2 步：抓取姿态
    pub reach: PitchPose,
    /// 第 4 步：抬起姿态
    pub lift: PitchPose,
    /// 第 6 步：放置姿态
    pub place: PitchPose,
}

impl Default for Waypoints {
    fn default() -> Self {
        Self {
            align_base: Deg(-180.0),
            drop_base: Deg(5.0),
            reach: PitchPose::new(30.0, 105.0),
            lift: PitchPose::new(10.0, 90.0),
            place: PitchPose::new(35.0, 95.0),
        }
    }
}

impl Waypoints {
    /// 校验全部路径点
    pub fn validate(&self, limits: &JointLimits, gate: &SafetyGate) -> Result<(), ConfigError> {
        check_in_range("align_base", Joint::Base, self.align_base, limits)?;
        self.reach.validate("reach", limits, gate)?;
        self.lift.validate("lift", limits, gate)?;
        check_in_range("drop_base", Joint::Base, self.drop_base, limits)?;
        self.place.validate("place", limits, gate)?;
        Ok(())
    }
}

/// 自动流程配置
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutomationConfig {
    /// 每个 tick 的最大角度变化（度）
    pub speed_deg_per_tick: f64,
    /// 路径点
    pub waypoints: Waypoints,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            speed_deg_per_tick: 1.5,
            waypoints: Waypoints::default(),
        }
    }
}

impl AutomationConfig {
    /// 校验速度与路径点
    pub fn validate(&self, limits: &JointLimits, gate: &SafetyGate) -> Result<(), ConfigError> {
        if !(self.speed_deg_per_tick.is_finite() && self.speed_deg_per_tick > 0.0) {
            return Err(ConfigError::InvalidParameter {
                param: "automation.speed_deg_per_tick",
                reason: format!("must be finite and > 0, got {}", self.speed_deg_per_tick),
            });
        }
        self.waypoints.validate(limits, gate)
    }
}

/// 自动流程运行状态
///
/// - `active && step != Idle`: 运行中
/// - `!active && step != Idle`: 已暂停，再次启动时从该步骤继续
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomationState {
    /// 是否正在推进
    pub active: bool,
    /// 当前步骤
    pub step: AutomationStep,
    /// 角速度（度/tick）
    pub speed_deg_per_tick: f64,
}

impl AutomationState {
    /// 空闲状态
    pub fn idle(speed_deg_per_tick: f64) -> Self {
        Self {
            active: false,
            step: AutomationStep::Idle,
            speed_deg_per_tick,
        }
    }

    /// 已暂停
    #[inline]
    pub fn is_paused(&self) -> bool {
        !self.active && self.step != AutomationStep::Idle
    }

    /// 停止并回到 Idle
    pub fn reset(&mut self) {
        self.active = false;
        self.step = AutomationStep::Idle;
    }
}

/// 单个关节向目标逼近一个 tick
///
/// 返回 `true` 表示本次已对齐到目标。候选值被安全门拒绝时关节保持不动，返回 `false`。
pub fn move_toward(
    model: &ArmModel,
    joints: &mut JointVector,
    joint: Joint,
    target: Deg,
    speed: f64,
) -> bool {
    let current = joints[joint];
    let remaining = target - current;
    let snap = remaining.abs().0 < speed;
    let candidate = if snap {
        target
    } else {
        current + Deg(speed.copysign(remaining.0))
    };

    match model.propose(joints, joint, candidate) {
        Ok(value) => {
            joints[joint] = value;
            snap && value == target
        },
        Err(ControlError::UnsafeMotion { tip_height, .. }) => {
            debug!(
                "Automation stalled on {}: {} would put tip at y={:.3}",
                joint, candidate, tip_height
            );
            false
        },
        Err(e) => {
            trace!("Automation step on {} rejected: {}", joint, e);
            false
        },
    }
}

/// 下臂与上臂同时逼近；两者都对齐才算到达
fn move_pitch_toward(model: &ArmModel, joints: &mut JointVector, pose: PitchPose, speed: f64) -> bool {
    let lower_done = move_toward(model, joints, Joint::Lower, pose.lower, speed);
    let upper_done = move_toward(model, joints, Joint::Upper, pose.upper, speed);
    lower_done && upper_done
}

/// 流程推进器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sequencer {
    waypoints: Waypoints,
}

impl Sequencer {
    /// 创建推进器
    pub fn new(waypoints: Waypoints) -> Self {
        Self { waypoints }
    }

    /// 推进一个 tick，返回本 tick 的状态
    ///
    /// 调用方只在 `state.automation.active` 时调用。
    pub fn advance(&self, model: &ArmModel, state: &mut ArmState) -> ArmStatus {
        let step = state.automation.step;
        let speed = state.automation.speed_deg_per_tick;

        if step.requires_object() && !state.object.carried {
            warn!("Automation aborted at step {}: object is not held", step);
            state.automation.reset();
            return ArmStatus::AutomationAborted;
        }

        match step {
            AutomationStep::Idle => {
                state.automation.active = false;
                ArmStatus::Ready
            },
            AutomationStep::AlignBase => {
                let target = self.waypoints.align_base;
                if move_toward(model, &mut state.joints, Joint::Base, target, speed) {
                    self.enter(state, AutomationStep::Reach);
                }
                ArmStatus::Automation(AutomationStep::AlignBase)
            },
            AutomationStep::Reach => {
                if move_pitch_toward(model, &mut state.joints, self.waypoints.reach, speed) {
                    self.enter(state, AutomationStep::Grab);
                }
                ArmStatus::Automation(AutomationStep::Reach)
            },
            AutomationStep::Grab => {
                let pose = model.pose(&state.joints);
                let result = state.object.try_grab(&pose.wrist_tip, model.object().grasp_radius);
                if result.success {
                    info!("Automation grabbed object (d={:.2})", result.distance);
                    self.enter(state, AutomationStep::Lift);
                    ArmStatus::ObjectPickedUp
                } else {
                    warn!(
                        "Automation grab failed: object {:.2} away, radius {:.2}",
                        result.distance,
                        model.object().grasp_radius
                    );
                    state.automation.reset();
                    ArmStatus::TooFar {
                        distance: result.distance,
                    }
                }
            },
            AutomationStep::Lift => {
                if move_pitch_toward(model, &mut state.joints, self.waypoints.lift, speed) {
                    self.enter(state, AutomationStep::MoveToDrop);
                }
                ArmStatus::Automation(AutomationStep::Lift)
            },
            AutomationStep::MoveToDrop => {
                let target = self.waypoints.drop_base;
                if move_toward(model, &mut state.joints, Joint::Base, target, speed) {
                    self.enter(state, AutomationStep::PositionForDrop);
                }
                ArmStatus::Automation(AutomationStep::MoveToDrop)
            },
            AutomationStep::PositionForDrop => {
                if move_pitch_toward(model, &mut state.joints, self.waypoints.place, speed) {
                    self.enter(state, AutomationStep::Release);
                }
                ArmStatus::Automation(AutomationStep::PositionForDrop)
            },
            AutomationStep::Release => {
                let pose = model.pose(&state.joints);
                state.object.release(&pose.wrist_tip, model.rest_height(), model.object().open_gap);
                state.automation.reset();
                info!("Automation complete, object placed at {}", state.object.position);
                ArmStatus::TaskComplete
            },
        }
    }

    fn enter(&self, state: &mut ArmState, step: AutomationStep) {
        debug!("Automation step {} -> {}", state.automation.step, step);
        state.automation.step = step;
    }
}
