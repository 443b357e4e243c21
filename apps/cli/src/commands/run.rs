//! run 命令
//!
//! 无界面运行一次自动取放流程，打印状态变化

use anyhow::{Context, Result};
use clap::Args;
use pickarm_control::{ArmConfig, ArmController, ArmStatus};
use pickarm_sdk::{LoopConfig, run_ticks, status_text};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::utils;

/// 自动运行命令参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// tick 频率（Hz）
    #[arg(short, long, default_value_t = 60.0)]
    pub frequency: f64,

    /// 最大 tick 数
    #[arg(long)]
    pub max_ticks: Option<usize>,

    /// 不休眠，尽快运行
    #[arg(long)]
    pub fast: bool,
}

impl RunCommand {
    fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            frequency_hz: if self.fast { 0.0 } else { self.frequency },
            max_ticks: self.max_ticks,
            stop_when_idle: true,
        }
    }

    /// 执行
    pub fn execute(&self, config: ArmConfig) -> Result<()> {
        let mut arm = ArmController::new(config).context("Invalid arm configuration")?;

        let stop = Arc::new(AtomicBool::new(false));
        let handler_flag = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        })
        .context("Failed to install Ctrl-C handler")?;

        println!("🤖 Starting pick-and-place from {}", arm.joints());
        arm.request_automation_toggle();

        let mut tick = 0usize;
        let mut last = arm.status();
        println!("[{:>5}] {}", tick, status_text(&last));

        let summary = run_ticks(&mut arm, &self.loop_config(), &stop, |snapshot| {
            tick += 1;
            if snapshot.status != last {
                println!("[{:>5}] {}", tick, status_text(&snapshot.status));
                last = snapshot.status;
            }
        })?;

        if summary.final_status != last {
            println!("[{:>5}] {}", summary.ticks, status_text(&summary.final_status));
        }

        let snapshot = arm.snapshot();
        println!();
        println!("📊 {} ticks in {:.2} s ({:?})", summary.ticks, summary.elapsed.as_secs_f64(), summary.exit);
        utils::print_joints(&snapshot);
        utils::print_object(&snapshot);

        if summary.final_status != ArmStatus::TaskComplete {
            anyhow::bail!(
                "Automation ended without completing: {}",
                status_text(&summary.final_status)
            );
        }
        Ok(())
    }
}
