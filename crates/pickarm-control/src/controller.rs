//! 机械臂控制器
//!
//! 单线程、单一所有者：所有输入（滑块、键盘、按钮）和 tick 都在同一个执行上下文里调用，
//! 每次调用结束后状态都是自洽的。渲染层只读取 [`Snapshot`]。
//!
//! # 示例
//!
//! ```rust
//! use pickarm_control::{ArmConfig, ArmController};
//!
//! let mut arm = ArmController::new(ArmConfig::default()).unwrap();
//! arm.request_automation_toggle();
//! for _ in 0..1000 {
//!     let snapshot = arm.tick();
//!     if !snapshot.automation.active {
//!         break;
//!     }
//! }
//! ```

use crate::automation::{AutomationState, AutomationStep, Sequencer};
use crate::config::ArmConfig;
use crate::error::ControlError;
use crate::manual::ManualController;
use crate::model::{ArmModel, Feedback};
use crate::object::ObjectState;
use crate::state::ArmState;
use crate::status::{ArmStatus, InputSource};
use pickarm_kinematics::{Deg, Joint, JointVector, Point3, Pose, Transform};
use tracing::{debug, info};

/// 手动抓取按钮的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrabOutcome {
    /// 抓住了物体
    PickedUp {
        /// 抓取时的距离
        distance: f64,
    },
    /// 距离太远
    TooFar {
        /// 腕部末端到物体中心的距离
        distance: f64,
    },
    /// 释放了物体
    Released {
        /// 落地位置
        position: Point3<f64>,
    },
}

impl GrabOutcome {
    /// 操作是否生效
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::TooFar { .. })
    }
}

/// 一帧的只读快照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// 关节角
    pub joints: JointVector,
    /// 位姿链
    pub pose: Pose,
    /// 物体状态
    pub object: ObjectState,
    /// 物体世界坐标（夹持时由夹爪推导）
    pub object_position: Point3<f64>,
    /// 物体世界变换（夹持时带腕部旋转）
    pub object_transform: Transform,
    /// 关节与地面反馈
    pub feedback: Feedback,
    /// 自动流程状态
    pub automation: AutomationState,
    /// 手动输入是否可用
    pub manual_enabled: bool,
    /// 用户可见状态
    pub status: ArmStatus,
}

/// 机械臂控制器
#[derive(Debug, Clone)]
pub struct ArmController {
    config: ArmConfig,
    model: ArmModel,
    sequencer: Sequencer,
    state: ArmState,
    status: ArmStatus,
}

impl ArmController {
    /// 校验配置并创建控制器，初始处于复位姿态
    pub fn new(config: ArmConfig) -> Result<Self, ControlError> {
        config.validate()?;
        let model = ArmModel::new(&config);
        let state = ArmState::home(&config, &model);
        info!("Arm controller ready at home pose {}", config.home);

        Ok(Self {
            config,
            model,
            sequencer: Sequencer::new(config.automation.waypoints),
            state,
            status: ArmStatus::Ready,
        })
    }

    /// 配置
    #[inline]
    pub fn config(&self) -> &ArmConfig {
        &self.config
    }

    /// 模型
    #[inline]
    pub fn model(&self) -> &ArmModel {
        &self.model
    }

    /// 当前状态
    #[inline]
    pub fn state(&self) -> &ArmState {
        &self.state
    }

    /// 当前关节角
    #[inline]
    pub fn joints(&self) -> &JointVector {
        &self.state.joints
    }

    /// 当前用户可见状态
    #[inline]
    pub fn status(&self) -> ArmStatus {
        self.status
    }

    /// 自动流程运行时手动输入不可用
    #[inline]
    pub fn manual_enabled(&self) -> bool {
        !self.state.automation.active
    }

    /// 滑块：设置关节绝对角度
    ///
    /// 被拒绝时状态不变，错误中带有仍然生效的值供滑块回显。
    pub fn set_joint_absolute(&mut self, joint: Joint, value: Deg) -> Result<Deg, ControlError> {
        self.manual(joint, InputSource::Slider, |manual| manual.set_joint(joint, value))
    }

    /// 键盘：在当前角度上叠加增量
    pub fn nudge_joint(&mut self, joint: Joint, delta: Deg) -> Result<Deg, ControlError> {
        self.manual(joint, InputSource::Keyboard, |manual| manual.nudge(joint, delta))
    }

    /// 键盘：按配置的步长正向/反向微调
    pub fn nudge_joint_step(&mut self, joint: Joint, positive: bool) -> Result<Deg, ControlError> {
        let step = self.config.manual.nudge_step;
        self.nudge_joint(joint, if positive { step } else { -step })
    }

    fn manual<F>(&mut self, joint: Joint, source: InputSource, op: F) -> Result<Deg, ControlError>
    where
        F: FnOnce(&mut ManualController<'_>) -> Result<Deg, ControlError>,
    {
        let result = op(&mut ManualController::new(&self.model, &mut self.state));
        self.status = match &result {
            Ok(_) => ArmStatus::Manual(source),
            Err(e) if e.is_safety_rejection() => ArmStatus::MotionBlocked(joint),
            Err(_) => self.status,
        };
        result
    }

    /// 抓取按钮：未夹持时尝试抓取，夹持时释放
    ///
    /// 同时取消自动流程。
    pub fn request_grab_toggle(&mut self) -> GrabOutcome {
        ManualController::new(&self.model, &mut self.state).cancel_automation();
        let pose = self.model.pose(&self.state.joints);
        let object = &mut self.state.object;

        if object.carried {
            object.release(&pose.wrist_tip, self.model.rest_height(), self.model.object().open_gap);
            info!("Object released at {}", object.position);
            self.status = ArmStatus::ObjectDropped;
            return GrabOutcome::Released {
                position: object.position,
            };
        }

        let result = object.try_grab(&pose.wrist_tip, self.model.object().grasp_radius);
        if result.success {
            info!("Object picked up (d={:.2})", result.distance);
            self.status = ArmStatus::ObjectPickedUp;
            GrabOutcome::PickedUp {
                distance: result.distance,
            }
        } else {
            debug!("Grab missed: d={:.2}", result.distance);
            self.status = ArmStatus::TooFar {
                distance: result.distance,
            };
            GrabOutcome::TooFar {
                distance: result.distance,
            }
        }
    }

    /// 自动流程按钮：启动、暂停、恢复
    ///
    /// 空闲时从第 1 步开始；运行中则暂停并保留当前步骤；暂停时从保留的步骤继续。
    pub fn request_automation_toggle(&mut self) {
        let automation = &mut self.state.automation;
        if automation.active {
            automation.active = false;
            info!("Automation paused at step {}", automation.step);
            self.status = ArmStatus::AutomationPaused;
        } else {
            if automation.step == AutomationStep::Idle {
                automation.step = AutomationStep::AlignBase;
            }
            automation.active = true;
            info!("Automation started at step {}", automation.step);
            self.status = ArmStatus::Automation(automation.step);
        }
    }

    /// 停止按钮：终止流程并回到 Idle
    pub fn stop_automation(&mut self) {
        self.state.automation.reset();
        info!("Automation stopped");
        self.status = ArmStatus::AutomationStopped;
    }

    /// 复位：关节、物体、流程全部回到初始状态
    ///
    /// 幂等。
    pub fn request_reset(&mut self) {
        self.state = ArmState::home(&self.config, &self.model);
        info!("System reset");
        self.status = ArmStatus::SystemReset;
    }

    /// 推进一个 tick 并返回快照
    ///
    /// 流程未激活时不改变任何状态。
    pub fn tick(&mut self) -> Snapshot {
        if self.state.automation.active {
            self.status = self.sequencer.advance(&self.model, &mut self.state);
        }
        self.snapshot()
    }

    /// 当前快照
    pub fn snapshot(&self) -> Snapshot {
        let joints = self.state.joints;
        let pose = self.model.pose(&joints);
        let object = self.state.object;
        let wrist = joints[Joint::Wrist];
        let grasp_offset = self.model.object().grasp_offset;

        let object_transform = if object.carried {
            pose.grasp_transform(wrist, grasp_offset)
        } else {
            Transform::new_translation(&object.position.coords)
        };

        Snapshot {
            joints,
            pose,
            object,
            object_position: object.world_position(&pose, wrist, grasp_offset),
            object_transform,
            feedback: self.model.feedback(&joints),
            automation: self.state.automation,
            manual_enabled: self.manual_enabled(),
            status: self.status,
        }
    }
}
