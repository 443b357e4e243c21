//! Tick 循环
//!
//! 以固定频率推进 [`ArmController`]，直到自动流程结束、达到迭代上限或收到停止信号。
//!
//! # 特性
//!
//! - **精确定时**: 使用 `spin_sleep` 实现低抖动延时
//! - **协作式停止**: 每个 tick 开头检查停止标志，置位后停止自动流程并返回
//!
//! ```rust,no_run
//! use pickarm_sdk::prelude::*;
//! use std::sync::atomic::AtomicBool;
//!
//! let mut arm = ArmController::new(ArmConfig::default()).unwrap();
//! arm.request_automation_toggle();
//! let stop = AtomicBool::new(false);
//! let summary = run_ticks(&mut arm, &LoopConfig::default(), &stop, |_| {}).unwrap();
//! println!("{} ticks, last status: {:?}", summary.ticks, summary.final_status);
//! ```

use crate::error::LoopError;
use pickarm_control::{ArmController, ArmStatus, Snapshot};
use spin_sleep::SpinSleeper;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// 循环配置
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// tick 频率（Hz），0 表示不休眠、尽快运行
    pub frequency_hz: f64,

    /// 最大 tick 数（None 表示不限）
    pub max_ticks: Option<usize>,

    /// 自动流程变为非激活时结束
    pub stop_when_idle: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            frequency_hz: 60.0,
            max_ticks: None,
            stop_when_idle: true,
        }
    }
}

impl LoopConfig {
    /// 不休眠的配置，用于测试和批量仿真
    pub fn unpaced(max_ticks: usize) -> Self {
        LoopConfig {
            frequency_hz: 0.0,
            max_ticks: Some(max_ticks),
            stop_when_idle: true,
        }
    }

    fn period(&self) -> Result<Option<Duration>, LoopError> {
        if !self.frequency_hz.is_finite() || self.frequency_hz < 0.0 {
            return Err(LoopError::InvalidFrequency(self.frequency_hz));
        }
        if self.frequency_hz == 0.0 {
            return Ok(None);
        }
        if self.frequency_hz > 1000.0 {
            warn!(
                "Very high tick frequency: {} Hz, animation speed is defined per tick",
                self.frequency_hz
            );
        }
        Ok(Some(Duration::from_secs_f64(1.0 / self.frequency_hz)))
    }
}

/// 循环结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// 自动流程已不再激活
    Idle,
    /// 达到 tick 上限
    TickBudget,
    /// 收到停止信号
    Stopped,
}

/// 循环结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSummary {
    /// 执行的 tick 数
    pub ticks: usize,
    /// 结束原因
    pub exit: LoopExit,
    /// 结束时的状态
    pub final_status: ArmStatus,
    /// 墙钟耗时
    pub elapsed: Duration,
}

/// 运行 tick 循环
///
/// 每个 tick 的快照都会交给 `on_frame`。
pub fn run_ticks<F>(
    arm: &mut ArmController,
    config: &LoopConfig,
    stop: &AtomicBool,
    mut on_frame: F,
) -> Result<LoopSummary, LoopError>
where
    F: FnMut(&Snapshot),
{
    let period = config.period()?;
    let sleeper = SpinSleeper::default();
    let started = Instant::now();
    let mut ticks = 0;

    let exit = loop {
        if stop.load(Ordering::Relaxed) {
            if arm.state().automation.active {
                arm.stop_automation();
            }
            info!("Tick loop stopped after {} ticks", ticks);
            break LoopExit::Stopped;
        }

        if let Some(max_ticks) = config.max_ticks
            && ticks >= max_ticks
        {
            debug!("Tick budget of {} exhausted", max_ticks);
            break LoopExit::TickBudget;
        }

        let frame_start = Instant::now();
        let snapshot = arm.tick();
        ticks += 1;
        on_frame(&snapshot);

        if config.stop_when_idle && !snapshot.automation.active {
            break LoopExit::Idle;
        }

        if let Some(period) = period {
            let spent = frame_start.elapsed();
            if spent < period {
                sleeper.sleep(period - spent);
            }
        }
    };

    Ok(LoopSummary {
        ticks,
        exit,
        final_status: arm.status(),
        elapsed: started.elapsed(),
    })
}
