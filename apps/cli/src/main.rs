//! # pickarm CLI
//!
//! 四关节取放机械臂仿真的命令行工具。
//!
//! ## 无界面运行
//!
//! ```bash
//! # 以默认场景运行一次完整的自动取放
//! pickarm-cli run
//!
//! # 使用自定义配置，尽快运行
//! pickarm-cli --config configs/wide_grasp.toml run --fast
//!
//! # 查看某组关节角的位姿与安全状态
//! pickarm-cli pose --joints 0,25,80,90
//! ```
//!
//! ## 交互式 Shell
//!
//! ```bash
//! $ pickarm-cli shell
//! pickarm> w
//! pickarm> set lower 40
//! pickarm> auto
//! pickarm> exit
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod modes;
mod utils;

use commands::{ConfigCommand, PoseCommand, RunCommand};
use modes::repl::run_repl;

/// pickarm CLI - 取放机械臂仿真命令行工具
#[derive(Parser, Debug)]
#[command(name = "pickarm-cli")]
#[command(about = "Command-line interface for the pickarm pick-and-place simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置文件（TOML），缺省使用参考场景
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 运行一次自动取放流程
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 计算并显示位姿
    Pose {
        #[command(flatten)]
        args: PoseCommand,
    },

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 启动交互式 Shell（REPL 模式）
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志；状态变化直接打印，默认只显示警告
    pickarm_sdk::logging::init_logger_with(if cli.verbose {
        "pickarm=debug"
    } else {
        "pickarm=warn"
    });

    let config = utils::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { args } => args.execute(config),
        Commands::Pose { args } => args.execute(config),
        Commands::Config(cmd) => cmd.execute(config),
        Commands::Shell => run_repl(config),
    }
}
