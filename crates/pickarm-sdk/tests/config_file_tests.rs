//! 配置文件集成测试
//!
//! 覆盖仓库自带的 `configs/*.toml` 以及磁盘读写。

use pickarm_sdk::config_file;
use pickarm_sdk::prelude::*;
use std::path::PathBuf;

fn bundled(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../configs")
        .join(name)
}

#[test]
fn test_reference_config_matches_default() {
    let config = config_file::load(bundled("reference.toml")).unwrap();
    assert_eq!(config, ArmConfig::default());
}

#[test]
fn test_wide_grasp_config_runs_to_completion() {
    let config = config_file::load(bundled("wide_grasp.toml")).unwrap();
    assert!(!config.chain.auto_level);
    assert_eq!(config.object.grasp_radius, 4.5);

    let mut arm = ArmController::new(config).unwrap();
    arm.request_automation_toggle();
    for _ in 0..1000 {
        if !arm.tick().automation.active {
            break;
        }
    }
    assert_eq!(arm.status(), ArmStatus::TaskComplete);
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arm.toml");

    let mut config = ArmConfig::default();
    config.object.grasp_radius = 2.0;
    config.home[Joint::Wrist] = Deg(0.0);
    config_file::save(&path, &config).unwrap();

    assert_eq!(config_file::load(&path).unwrap(), config);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let err = config_file::load(&path).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(config_file::load_or_default(&path).unwrap(), ArmConfig::default());
}

#[test]
fn test_save_refuses_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");

    let mut config = ArmConfig::default();
    config.limits.joints[Joint::Lower].max = Deg(-1.0);
    let err = config_file::save(&path, &config).unwrap_err();
    assert!(matches!(err, ConfigFileError::Invalid(_)));
    assert!(!path.exists());
}
