//! 端到端场景测试
//!
//! 全部使用默认配置（参考场景）：
//! - 完整的自动取放流程
//! - 关节限位分级
//! - 地面安全门拒绝
//! - 抓取半径判定
//! - 手动抓取/释放、暂停/恢复

use approx::assert_relative_eq;
use pickarm_control::{AutomationStep, ObjectConfig, attempt_grab};
use pickarm_kinematics::{JointLimits, Point3};
use pickarm_sdk::prelude::*;

const TICK_BUDGET: usize = 2000;

fn arm() -> ArmController {
    ArmController::new(ArmConfig::default()).unwrap()
}

/// 运行自动流程直到结束，返回 tick 数和经过的状态序列（去重）
fn run_to_idle(arm: &mut ArmController) -> (usize, Vec<ArmStatus>) {
    let mut statuses: Vec<ArmStatus> = Vec::new();
    for tick in 1..=TICK_BUDGET {
        let snapshot = arm.tick();
        if statuses.last() != Some(&snapshot.status) {
            statuses.push(snapshot.status);
        }
        if !snapshot.automation.active {
            return (tick, statuses);
        }
    }
    panic!("automation did not finish within {} ticks", TICK_BUDGET);
}

#[test]
fn scenario_full_automation_completes() {
    let mut arm = arm();
    arm.request_automation_toggle();
    let (ticks, statuses) = run_to_idle(&mut arm);

    let snapshot = arm.snapshot();
    assert!(!snapshot.automation.active);
    assert_eq!(snapshot.automation.step, AutomationStep::Idle);
    assert!(!snapshot.object.carried);
    assert_eq!(status_text(&snapshot.status), "Task Complete!");
    assert!(ticks > 120, "base alignment alone needs 120 ticks, got {}", ticks);

    // 停在放置姿态，物体落在腕部末端正下方的地面上
    assert_eq!(snapshot.joints, JointVector::from_degrees([5.0, 35.0, 95.0, 90.0]));
    assert_relative_eq!(snapshot.object.position.x, snapshot.pose.wrist_tip.x, epsilon = 1e-9);
    assert_relative_eq!(snapshot.object.position.z, snapshot.pose.wrist_tip.z, epsilon = 1e-9);
    assert_relative_eq!(snapshot.object.position.y, -1.6, epsilon = 1e-12);
    assert_relative_eq!(snapshot.object.gripper_gap, 0.2);

    // 状态按步骤顺序出现
    let expected = [
        ArmStatus::Automation(AutomationStep::AlignBase),
        ArmStatus::Automation(AutomationStep::Reach),
        ArmStatus::ObjectPickedUp,
        ArmStatus::Automation(AutomationStep::Lift),
        ArmStatus::Automation(AutomationStep::MoveToDrop),
        ArmStatus::Automation(AutomationStep::PositionForDrop),
        ArmStatus::TaskComplete,
    ];
    assert_eq!(statuses, expected);
}

#[test]
fn scenario_object_follows_gripper_while_carried() {
    let mut arm = arm();
    arm.request_automation_toggle();

    let mut carried_frames = 0;
    for _ in 0..TICK_BUDGET {
        let snapshot = arm.tick();
        if snapshot.object.carried {
            carried_frames += 1;
            let expected = snapshot.pose.grasp_point(snapshot.joints[Joint::Wrist], 1.8);
            assert_relative_eq!(snapshot.object_position, expected, epsilon = 1e-12);
        }
        if !snapshot.automation.active {
            break;
        }
    }
    assert!(carried_frames > 100);
}

#[test]
fn scenario_limit_classification() {
    let limits = JointLimits::default();
    assert_eq!(limits.classify(Joint::Lower, Deg(89.0)), LimitState::Near);
    assert_eq!(limits.classify(Joint::Lower, Deg(90.0)), LimitState::Limit);
    assert_eq!(limits.classify(Joint::Lower, Deg(45.0)), LimitState::Normal);
}

#[test]
fn scenario_floor_rejection() {
    let mut arm = arm();
    let before = *arm.joints();

    let err = arm.set_joint_absolute(Joint::Lower, Deg(90.0)).unwrap_err();
    assert!(err.is_safety_rejection());
    assert_eq!(err.current_value(), Some(Deg(25.0)));
    assert_eq!(*arm.joints(), before);
    assert_eq!(status_text(&arm.status()), "Blocked: lower would hit the floor");

    // 一步步前倾直到被拒绝，最后接受的姿态仍在硬限位之上
    let gate = *arm.model().gate();
    let mut rejected = false;
    for _ in 0..40 {
        match arm.nudge_joint(Joint::Lower, Deg(1.0)) {
            Ok(_) => {
                let joints = arm.joints();
                assert!(gate.is_safe(joints[Joint::Lower], joints[Joint::Upper]));
            },
            Err(e) => {
                assert!(e.is_safety_rejection());
                rejected = true;
                break;
            },
        }
    }
    assert!(rejected);
    assert!(arm.snapshot().feedback.tip_height > gate.floor_limit());
}

#[test]
fn scenario_grab_radius() {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let near = attempt_grab(&origin, &Point3::new(1.0, 0.0, 0.0), 1.4);
    assert!(near.success);

    let far = attempt_grab(&origin, &Point3::new(0.0, 0.0, 2.0), 1.4);
    assert!(!far.success);
    assert_relative_eq!(far.distance, 2.0);
    assert_eq!(
        status_text(&ArmStatus::TooFar {
            distance: far.distance
        }),
        "Too far! Move closer (2.0)"
    );
}

#[test]
fn scenario_manual_grab_and_release() {
    let mut arm = arm();
    arm.set_joint_absolute(Joint::Base, Deg(-180.0)).unwrap();
    arm.set_joint_absolute(Joint::Lower, Deg(30.0)).unwrap();
    arm.set_joint_absolute(Joint::Upper, Deg(105.0)).unwrap();
    assert!(arm.request_grab_toggle().is_success());

    // 抬起并转到另一侧再释放
    arm.set_joint_absolute(Joint::Lower, Deg(10.0)).unwrap();
    arm.set_joint_absolute(Joint::Base, Deg(-90.0)).unwrap();
    let tip = arm.snapshot().pose.wrist_tip;

    match arm.request_grab_toggle() {
        GrabOutcome::Released { position } => {
            assert_relative_eq!(position.x, tip.x, epsilon = 1e-12);
            assert_relative_eq!(position.z, tip.z, epsilon = 1e-12);
            assert_relative_eq!(position.y, -1.6, epsilon = 1e-12);
        },
        other => panic!("expected release, got {:?}", other),
    }
    let snapshot = arm.snapshot();
    assert!(!snapshot.object.carried);
    assert_eq!(status_text(&snapshot.status), "Object Dropped");
}

#[test]
fn scenario_pause_resume_completes() {
    let mut arm = arm();
    arm.request_automation_toggle();
    for _ in 0..150 {
        arm.tick();
    }
    let paused_step = arm.state().automation.step;
    assert_ne!(paused_step, AutomationStep::Idle);

    arm.request_automation_toggle();
    assert_eq!(status_text(&arm.status()), "Auto: Paused");
    for _ in 0..50 {
        arm.tick();
    }
    assert_eq!(arm.state().automation.step, paused_step);

    arm.request_automation_toggle();
    run_to_idle(&mut arm);
    assert_eq!(arm.status(), ArmStatus::TaskComplete);
}

#[test]
fn scenario_manual_input_cancels_automation() {
    let mut arm = arm();
    arm.request_automation_toggle();
    for _ in 0..30 {
        arm.tick();
    }
    arm.set_joint_absolute(Joint::Wrist, Deg(45.0)).unwrap();
    assert!(arm.manual_enabled());
    assert_eq!(arm.state().automation.step, AutomationStep::Idle);

    // 重新启动从第 1 步开始
    arm.request_automation_toggle();
    assert_eq!(arm.state().automation.step, AutomationStep::AlignBase);
}

#[test]
fn scenario_object_out_of_reach_fails_grab() {
    let mut config = ArmConfig::default();
    config.object = ObjectConfig {
        home_x: 9.0,
        ..Default::default()
    };
    let mut arm = ArmController::new(config).unwrap();
    arm.request_automation_toggle();
    run_to_idle(&mut arm);

    let snapshot = arm.snapshot();
    assert!(matches!(snapshot.status, ArmStatus::TooFar { distance } if distance > 1.4));
    assert!(!snapshot.object.carried);
    assert_eq!(snapshot.automation.step, AutomationStep::Idle);
    // 停在抓取姿态
    assert_eq!(snapshot.joints[Joint::Lower], Deg(30.0));
}
