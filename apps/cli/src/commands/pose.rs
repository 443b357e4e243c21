//! pose 命令
//!
//! 计算给定关节角的位姿、安全检查和反馈（不做夹紧）

use anyhow::{Context, Result};
use clap::Args;
use pickarm_control::{ArmConfig, ArmModel};
use pickarm_kinematics::{Joint, JointVector, LimitState, Point3, kinematics::translation_of};
use serde_json::json;

use crate::utils::{format_point, state_marker};

/// 位姿查询参数
#[derive(Args, Debug)]
pub struct PoseCommand {
    /// 关节角（度）：base,lower,upper,wrist；缺省为配置中的初始姿态
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub joints: Option<Vec<f64>>,

    /// 以 JSON 输出
    #[arg(long)]
    pub json: bool,
}

impl PoseCommand {
    fn joints(&self, config: &ArmConfig) -> Result<JointVector> {
        match &self.joints {
            None => Ok(config.home),
            Some(values) => {
                let values: [f64; 4] = values.as_slice().try_into().with_context(|| {
                    format!("Expected 4 joint values, got {}", values.len())
                })?;
                Ok(JointVector::from_degrees(values))
            },
        }
    }

    /// 执行
    pub fn execute(&self, config: ArmConfig) -> Result<()> {
        let joints = self.joints(&config)?;
        let model = ArmModel::new(&config);
        let pose = model.pose(&joints);
        let check = model.gate().check(joints[Joint::Lower], joints[Joint::Upper]);
        let feedback = model.feedback(&joints);

        if self.json {
            let point = |p: Point3<f64>| json!([p.x, p.y, p.z]);
            let state = |s: LimitState| format!("{:?}", s).to_lowercase();
            let output = json!({
                "joints": joints.into_array().map(|d| d.0),
                "lower_pivot": point(translation_of(&pose.lower_pivot)),
                "upper_pivot": point(translation_of(&pose.upper_pivot)),
                "gripper": point(pose.gripper_origin()),
                "wrist_tip": point(pose.wrist_tip),
                "tip_height": check.tip_height,
                "floor_limit": check.limit,
                "safe": check.is_safe(),
                "feedback": feedback.joints.into_array().map(state),
                "floor_state": state(feedback.floor),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("📍 Joints {}", joints);
        println!("  lower pivot {}", format_point(&translation_of(&pose.lower_pivot)));
        println!("  upper pivot {}", format_point(&translation_of(&pose.upper_pivot)));
        println!("  gripper     {}", format_point(&pose.gripper_origin()));
        println!("  wrist tip   {}", format_point(&pose.wrist_tip));
        println!();
        for joint in Joint::ALL {
            println!("  {} {}", state_marker(feedback.joints[joint]), joint);
        }
        if check.is_safe() {
            println!(
                "✅ Tip height {:.3} is above the floor limit {:.3}",
                check.tip_height, check.limit
            );
        } else {
            println!(
                "🛑 Tip height {:.3} is at or below the floor limit {:.3}; this pose would be rejected",
                check.tip_height, check.limit
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickarm_kinematics::Deg;

    #[test]
    fn test_default_joints_are_home() {
        let cmd = PoseCommand {
            joints: None,
            json: false,
        };
        assert_eq!(cmd.joints(&ArmConfig::default()).unwrap(), ArmConfig::default().home);
    }

    #[test]
    fn test_joint_count_checked() {
        let cmd = PoseCommand {
            joints: Some(vec![0.0, 25.0, 80.0]),
            json: false,
        };
        assert!(cmd.joints(&ArmConfig::default()).is_err());

        let cmd = PoseCommand {
            joints: Some(vec![-90.0, 25.0, 80.0, 0.0]),
            json: true,
        };
        let joints = cmd.joints(&ArmConfig::default()).unwrap();
        assert_eq!(joints[Joint::Base], Deg(-90.0));
    }
}
