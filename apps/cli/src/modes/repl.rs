//! REPL 模式（交互式 Shell）
//!
//! 专用输入线程 + crossbeam 通道：输入线程只负责读行，控制器只在主线程中被修改。
//! 主线程同时监听输入和定时器，自动流程在等待输入期间继续推进。

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, bounded, select, tick};
use pickarm_control::{ArmConfig, ArmController, ArmStatus, AutomationState, GrabOutcome};
use pickarm_kinematics::{Deg, Joint};
use pickarm_sdk::status_text::step_text;
use pickarm_sdk::{KeyCommand, KeyOutcome, apply_key, status_text};
use rustyline::Editor;
use std::thread;
use std::time::Duration;

use crate::utils;

/// 自动流程的 tick 周期
const TICK_PERIOD: Duration = Duration::from_millis(16);

/// 输入线程发送的 Ctrl+C 标记
const SIGINT: &str = "SIGINT";

/// REPL 会话
pub struct ReplSession {
    arm: ArmController,
    last_status: ArmStatus,
}

impl ReplSession {
    /// 创建新会话
    pub fn new(config: ArmConfig) -> Result<Self> {
        let arm = ArmController::new(config).context("Invalid arm configuration")?;
        let last_status = arm.status();
        Ok(Self { arm, last_status })
    }

    /// 推进一个 tick；状态变化时打印
    pub fn tick(&mut self) {
        if self.arm.state().automation.active {
            self.arm.tick();
            self.report_status();
        }
    }

    fn report_status(&mut self) {
        let status = self.arm.status();
        if status != self.last_status {
            println!("  » {}", status_text(&status));
            self.last_status = status;
        }
    }

    /// 处理一行输入
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        if line == " " {
            self.handle_key(line)?;
            self.report_status();
            return Ok(());
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&head) = parts.first() else {
            return Ok(());
        };

        // 与按键一致：自动流程运行时手动命令不生效
        if matches!(head, "set" | "nudge" | "grab") && !self.arm.manual_enabled() {
            println!("  ⚠️  Automation running, '{}' ignored", head);
            return Ok(());
        }

        match head {
            "set" => {
                let (joint, value) = parse_joint_value(&parts)?;
                let result = self.arm.set_joint_absolute(joint, value);
                self.report_motion(joint, result);
            },
            "nudge" => {
                let (joint, delta) = parse_joint_value(&parts)?;
                let result = self.arm.nudge_joint(joint, delta);
                self.report_motion(joint, result);
            },
            "grab" => {
                let outcome = self.arm.request_grab_toggle();
                self.report_grab(outcome);
            },
            "auto" => self.arm.request_automation_toggle(),
            "stop" => self.arm.stop_automation(),
            "reset" => self.arm.request_reset(),
            "pose" | "status" => {
                let snapshot = self.arm.snapshot();
                println!("📊 {}", status_text(&snapshot.status));
                utils::print_joints(&snapshot);
                utils::print_object(&snapshot);
                println!("  automation {}", automation_line(&snapshot.automation));
            },
            "space" | "enter" | "return" => self.handle_key(head)?,
            "key" => {
                let key = parts.get(1).copied().unwrap_or(" ");
                self.handle_key(key)?;
            },
            other if other.chars().count() == 1 => self.handle_key(other)?,
            _ => anyhow::bail!("Unknown command: {}", head),
        }

        self.report_status();
        Ok(())
    }

    fn handle_key(&mut self, key: &str) -> Result<()> {
        let command: KeyCommand = key.parse().map_err(anyhow::Error::msg)?;
        match apply_key(&mut self.arm, command) {
            KeyOutcome::Moved(joint, value) => println!("  {} → {}", joint, value),
            KeyOutcome::Rejected(e) => println!("  🛑 {}", e),
            KeyOutcome::Grab(outcome) => self.report_grab(outcome),
            KeyOutcome::Ignored => println!("  ⚠️  Automation running, key ignored"),
            KeyOutcome::AutomationToggled | KeyOutcome::Reset => {},
        }
        Ok(())
    }

    fn report_motion(&self, joint: Joint, result: Result<Deg, pickarm_control::ControlError>) {
        match result {
            Ok(value) => println!("  {} → {}", joint, value),
            Err(e) => println!("  🛑 {} (still {})", e, self.arm.joints()[joint]),
        }
    }

    fn report_grab(&self, outcome: GrabOutcome) {
        match outcome {
            GrabOutcome::PickedUp { distance } => println!("  ✅ Picked up (d={:.2})", distance),
            GrabOutcome::TooFar { distance } => println!("  ⚠️  Too far (d={:.2})", distance),
            GrabOutcome::Released { position } => {
                println!("  ✅ Released at {}", utils::format_point(&position))
            },
        }
    }

    /// Ctrl+C：停止自动流程
    pub fn interrupt(&mut self) {
        if self.arm.state().automation.active {
            tracing::info!("Interrupted, stopping automation");
            self.arm.stop_automation();
            self.report_status();
        }
    }
}

/// 自动流程的步骤与运行状态
fn automation_line(automation: &AutomationState) -> String {
    let state = if automation.active {
        "running"
    } else if automation.is_paused() {
        "paused"
    } else {
        "idle"
    };
    format!("{} ({})", step_text(automation.step), state)
}

/// `set lower 40` / `nudge base -3`
fn parse_joint_value(parts: &[&str]) -> Result<(Joint, Deg)> {
    let [_, joint, value] = parts else {
        anyhow::bail!("Usage: {} <joint> <degrees>", parts.first().copied().unwrap_or("set"));
    };
    let joint: Joint = joint.parse().map_err(anyhow::Error::msg)?;
    let value: f64 = value
        .parse()
        .with_context(|| format!("Invalid angle: {}", value))?;
    Ok((joint, Deg(value)))
}

/// REPL 输入（专用输入线程）
pub struct ReplInput {
    command_rx: Receiver<String>,
    _input_thread: thread::JoinHandle<Result<()>>,
}

impl ReplInput {
    /// 创建专用输入线程（保留历史记录）
    pub fn new() -> Self {
        let (command_tx, command_rx) = bounded::<String>(10);

        let input_thread = thread::spawn(move || {
            use rustyline::history::DefaultHistory;

            let mut rl = Editor::<(), DefaultHistory>::new()
                .map_err(|e| anyhow::anyhow!("Failed to initialize readline: {}", e))?;

            let history_path = ".pickarm_history";
            rl.load_history(history_path).ok(); // 首次运行没有历史文件

            println!("pickarm CLI v{} - 交互式 Shell", env!("CARGO_PKG_VERSION"));
            println!("输入 'help' 查看帮助，'exit' 退出");
            println!();

            loop {
                match rl.readline("pickarm> ") {
                    Ok(line) => {
                        // 保留单个空格：它是自动流程切换键
                        let line = if line.trim().is_empty() && !line.is_empty() {
                            " ".to_string()
                        } else {
                            line.trim().to_string()
                        };

                        if line.is_empty() {
                            continue;
                        }

                        if line == "exit" || line == "quit" {
                            rl.save_history(history_path).ok();
                            let _ = command_tx.send(line);
                            break;
                        }

                        let _ = rl.add_history_entry(line.clone());

                        if command_tx.send(line).is_err() {
                            break; // 主线程已退出
                        }
                    },

                    Err(rustyline::error::ReadlineError::Interrupted) => {
                        println!("^C");
                        let _ = command_tx.send(SIGINT.to_string());
                    },

                    Err(rustyline::error::ReadlineError::Eof) => {
                        rl.save_history(history_path).ok();
                        let _ = command_tx.send("exit".to_string());
                        break;
                    },

                    Err(err) => {
                        eprintln!("Error: {:?}", err);
                        let _ = command_tx.send("exit".to_string());
                        break;
                    },
                }
            }

            Ok(())
        });

        Self {
            command_rx,
            _input_thread: input_thread,
        }
    }
}

/// 运行 REPL 模式
pub fn run_repl(config: ArmConfig) -> Result<()> {
    let mut session = ReplSession::new(config)?;
    let input = ReplInput::new();
    let ticker = tick(TICK_PERIOD);

    loop {
        select! {
            recv(input.command_rx) -> line => {
                let Ok(line) = line else {
                    break; // 输入线程已退出
                };

                match line.as_str() {
                    "exit" | "quit" => {
                        println!("👋 再见！");
                        break;
                    },
                    "help" => print_help(),
                    SIGINT => session.interrupt(),
                    _ => {
                        if let Err(err) = session.handle_line(&line) {
                            eprintln!("❌ Error: {}", err);
                        }
                    },
                }
            },
            recv(ticker) -> _ => session.tick(),
        }
    }

    Ok(())
}

/// 打印帮助信息
fn print_help() {
    println!("可用命令:");
    println!("  set <joint> <deg>        设置关节角度（base/lower/upper/wrist）");
    println!("  nudge <joint> <deg>      在当前角度上叠加增量");
    println!("  grab                     抓取/释放");
    println!("  auto                     启动/暂停自动取放");
    println!("  stop                     停止自动取放");
    println!("  reset                    复位");
    println!("  status                   显示关节、地面与物体状态");
    println!("  exit                     退出");
    println!();
    println!("按键（输入单个字符后回车）:");
    println!("  a/d 基座  w/s 下臂  i/k 上臂  j/l 腕部  空格 自动  r 复位");
    println!("  enter                    抓取/释放");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickarm_control::AutomationStep;

    fn session() -> ReplSession {
        ReplSession::new(ArmConfig::default()).unwrap()
    }

    #[test]
    fn test_set_and_nudge() {
        let mut session = session();
        session.handle_line("set base 45").unwrap();
        session.handle_line("nudge base -5").unwrap();
        assert_eq!(session.arm.joints()[Joint::Base], Deg(40.0));
    }

    #[test]
    fn test_key_bindings() {
        let mut session = session();
        session.handle_line("d").unwrap();
        assert_eq!(session.arm.joints()[Joint::Base], Deg(3.0));
        session.handle_line(" ").unwrap();
        assert!(session.arm.state().automation.active);
        session.handle_line("r").unwrap();
        assert!(!session.arm.state().automation.active);
    }

    #[test]
    fn test_manual_commands_ignored_during_automation() {
        let mut session = session();
        session.handle_line("auto").unwrap();
        for _ in 0..5 {
            session.tick();
        }
        let before = session.arm.joints().clone();

        session.handle_line("d").unwrap();
        session.handle_line("set base 40").unwrap();
        session.handle_line("nudge lower 5").unwrap();
        session.handle_line("grab").unwrap();

        assert_eq!(session.arm.joints(), &before);
        assert!(session.arm.state().automation.active);
        assert!(!session.arm.state().object.carried);
        assert_eq!(session.arm.status(), ArmStatus::Automation(AutomationStep::AlignBase));

        // 暂停后手动命令恢复
        session.handle_line("auto").unwrap();
        session.handle_line("set base 40").unwrap();
        assert_eq!(session.arm.joints()[Joint::Base], Deg(40.0));
    }

    #[test]
    fn test_automation_line() {
        let mut session = session();
        assert_eq!(automation_line(&session.arm.state().automation), "Idle (idle)");

        session.handle_line("auto").unwrap();
        session.tick();
        session.handle_line("auto").unwrap();
        assert_eq!(
            automation_line(&session.arm.state().automation),
            "Auto: Aligning Base... (paused)"
        );
    }

    #[test]
    fn test_invalid_commands() {
        let mut session = session();
        assert!(session.handle_line("set elbow 10").is_err());
        assert!(session.handle_line("set lower").is_err());
        assert!(session.handle_line("set lower abc").is_err());
        assert!(session.handle_line("dance").is_err());
        assert!(session.handle_line("x").is_err());
    }

    #[test]
    fn test_tick_and_interrupt() {
        let mut session = session();
        session.handle_line("auto").unwrap();
        for _ in 0..10 {
            session.tick();
        }
        assert_eq!(session.arm.joints()[Joint::Base], Deg(-15.0));
        session.interrupt();
        assert_eq!(session.arm.status(), ArmStatus::AutomationStopped);
    }
}
