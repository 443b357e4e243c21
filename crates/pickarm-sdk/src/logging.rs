//! 日志初始化
//!
//! 使用 `tracing-subscriber` 输出到 stderr，`RUST_LOG` 优先于默认过滤规则；
//! 通过 `log` crate 发出的记录经 `tracing-log` 转入同一个订阅者。

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// 默认过滤规则
pub const DEFAULT_FILTER: &str = "pickarm=info";

static INIT: Once = Once::new();

/// 以默认过滤规则初始化日志
///
/// 可重复调用，只有第一次生效。
pub fn init_logger() -> bool {
    init_logger_with(DEFAULT_FILTER)
}

/// 以给定的默认过滤规则初始化日志
///
/// 返回本次调用是否真正安装了订阅者。进程中已有全局订阅者（例如测试框架安装的）时返回 `false`。
pub fn init_logger_with(default_filter: &str) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            let _ = tracing_log::LogTracer::init_with_filter(log::LevelFilter::Trace);
            installed = true;
        }
    });
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let _first = init_logger();
        assert!(!init_logger());
        assert!(!init_logger_with("pickarm=debug"));
        tracing::info!("logger ready");
    }
}
