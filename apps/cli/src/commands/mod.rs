//! 命令定义和实现

pub mod config;
pub mod pose;
pub mod run;

pub use config::ConfigCommand;
pub use pose::PoseCommand;
pub use run::RunCommand;
