//! 配置管理命令
//!
//! 显示、生成与检查 TOML 配置文件

use anyhow::{Context, Result};
use clap::Subcommand;
use pickarm_control::ArmConfig;
use pickarm_sdk::config_file;
use std::path::PathBuf;

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 以 TOML 打印当前生效的配置
    Show,

    /// 写出一份默认配置
    Init {
        /// 输出路径
        path: PathBuf,

        /// 覆盖已存在的文件
        #[arg(short, long)]
        force: bool,
    },

    /// 检查当前配置的几何与路径点
    Check,
}

impl ConfigCommand {
    /// 执行
    pub fn execute(self, config: ArmConfig) -> Result<()> {
        match self {
            ConfigCommand::Show => Self::show_(&config),
            ConfigCommand::Init { path, force } => Self::init_(path, force),
            ConfigCommand::Check => Self::check_(&config),
        }
    }

    fn show_(config: &ArmConfig) -> Result<()> {
        let text = config_file::to_toml_string(config).context("Failed to render config")?;
        print!("{}", text);
        Ok(())
    }

    fn init_(path: PathBuf, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }
        config_file::save(&path, &ArmConfig::default())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✅ Wrote default config to {}", path.display());
        Ok(())
    }

    fn check_(config: &ArmConfig) -> Result<()> {
        config.validate().context("Config check failed")?;

        let gate = config.safety_gate();
        let waypoints = &config.automation.waypoints;
        println!("✅ Config is valid");
        println!("  floor limit        {:.3}", gate.floor_limit());
        for (name, pose) in [
            ("reach", waypoints.reach),
            ("lift", waypoints.lift),
            ("place", waypoints.place),
        ] {
            let check = gate.check(pose.lower, pose.upper);
            println!(
                "  {:<6} {} / {}  tip {:>7.3}  margin {:.3}",
                name,
                pose.lower,
                pose.upper,
                check.tip_height,
                check.tip_height - check.limit
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arm.toml");

        ConfigCommand::Init {
            path: path.clone(),
            force: false,
        }
        .execute(ArmConfig::default())
        .unwrap();
        assert_eq!(config_file::load(&path).unwrap(), ArmConfig::default());

        let again = ConfigCommand::Init {
            path: path.clone(),
            force: false,
        }
        .execute(ArmConfig::default());
        assert!(again.is_err());

        ConfigCommand::Init { path, force: true }
            .execute(ArmConfig::default())
            .unwrap();
    }

    #[test]
    fn test_check_default() {
        assert!(ConfigCommand::Check.execute(ArmConfig::default()).is_ok());
    }
}
