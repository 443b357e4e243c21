//! 运行模式
//!
//! - REPL 模式：交互式 Shell，键盘绑定与文本命令

pub mod repl;
