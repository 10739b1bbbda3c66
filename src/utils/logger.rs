// ============================================================================
// Dictum - 日志工具
// ============================================================================
//
// 文件: src/utils/logger.rs
// 职责: 面向用户的控制台输出
// 边界:
//   - ✅ 带标签的彩色控制台输出
//   - ✅ 颜色控制（配置、--no-color、非终端 stdout）
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应写入日志文件（诊断信息走 `tracing`）
//
// ============================================================================

use colored::Colorize;

use super::constants::{icons, APP_NAME};

/// 简单的日志工具
pub struct Logger;

impl Logger {
    /// 仅在启用颜色且 stdout 为终端时输出颜色
    pub fn configure(colored: bool) {
        let enabled = colored && atty::is(atty::Stream::Stdout);
        colored::control::set_override(enabled);
    }

    pub fn info<S: AsRef<str>>(msg: S) {
        println!("{} {}", format!("[{APP_NAME}]").cyan(), msg.as_ref());
    }

    pub fn warn<S: AsRef<str>>(msg: S) {
        println!("{} {}", format!("[{}]", icons::WARNING).yellow(), msg.as_ref());
    }

    pub fn error<S: AsRef<str>>(msg: S) {
        eprintln!("{} {}", format!("[{}]", icons::ERROR).red(), msg.as_ref());
    }

    pub fn success<S: AsRef<str>>(msg: S) {
        println!("{} {}", format!("[{APP_NAME}]").green(), msg.as_ref());
    }

    /// 上一条消息下方的缩进详情行
    pub fn detail<S: AsRef<str>>(msg: S) {
        println!("  {} {}", icons::ARROW.bright_black(), msg.as_ref());
    }
}
