//! 输出与配置加载工具

use anyhow::{Context, Result};
use pickarm_control::{ArmConfig, Snapshot};
use pickarm_kinematics::{Joint, LimitState, Point3};
use pickarm_sdk::config_file;
use std::path::Path;

/// 加载配置；未指定路径时使用默认配置
pub fn load_config(path: Option<&Path>) -> Result<ArmConfig> {
    match path {
        Some(path) => config_file::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ArmConfig::default()),
    }
}

/// 反馈状态标记
pub fn state_marker(state: LimitState) -> &'static str {
    match state {
        LimitState::Normal => "✅",
        LimitState::Near => "⚠️ ",
        LimitState::Limit => "🛑",
    }
}

/// 格式化坐标
pub fn format_point(p: &Point3<f64>) -> String {
    format!("({:>7.3}, {:>7.3}, {:>7.3})", p.x, p.y, p.z)
}

/// 打印关节与反馈
pub fn print_joints(snapshot: &Snapshot) {
    for joint in Joint::ALL {
        println!(
            "  {} {:<6} {:>7.1}°",
            state_marker(snapshot.feedback.joints[joint]),
            joint.name(),
            snapshot.joints[joint].0
        );
    }
    println!(
        "  {} tip height {:.3}",
        state_marker(snapshot.feedback.floor),
        snapshot.feedback.tip_height
    );
}

/// 打印物体状态
pub fn print_object(snapshot: &Snapshot) {
    let holder = if snapshot.object.carried {
        "carried"
    } else {
        "resting"
    };
    println!(
        "  object {} at {}",
        holder,
        format_point(&snapshot.object_position)
    );
}
