// ============================================================================
// Dictum - CLI Watch 命令
// ============================================================================
//
// 文件: src/cli/watch.rs
// 职责: 源文件监听命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ Ctrl-C 处理
//   - ✅ 变更和重建结果输出
//   - ❌ 不应包含变更检测逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::time::Duration;

use super::merge::{build_failure, print_report};
use crate::core::builder::{BuildReport, DictionaryBuilder};
use crate::core::error::BuildError;
use crate::core::watcher::{Change, WatchEvent, Watcher};
use crate::models::config::Config;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 翻译源变更时自动重新构建词典
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// 轮询间隔（毫秒）
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,
}

pub async fn handle_watch(args: WatchArgs) -> Result<()> {
    let config = Config::current()?;
    let builder = DictionaryBuilder::from_config(&config);

    if !builder.language_root().is_dir() {
        return Err(build_failure(BuildError::LanguageRootNotFound(
            builder.language_root().to_path_buf(),
        )));
    }

    let interval_ms = args.interval_ms.unwrap_or(config.watch.interval_ms).max(1);
    let interval = Duration::from_millis(interval_ms);
    Logger::info(tf!("watch.start", path = builder.language_root().display()));

    let watcher = Watcher::new(builder, interval);
    watcher
        .run(shutdown_signal(), |event| match event {
            WatchEvent::Initial(result) => report_build(result),
            WatchEvent::Rebuilt { changes, result } => {
                for change in changes {
                    Logger::info(describe_change(change));
                }
                report_build(result);
            }
        })
        .await;

    Logger::info(t!("watch.stopped"));
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn describe_change(change: &Change) -> String {
    let path = change.path().display();
    match change {
        Change::Added(_) => tf!("watch.added", path = path),
        Change::Modified(_) => tf!("watch.modified", path = path),
        Change::Removed(_) => tf!("watch.removed", path = path),
    }
}

fn report_build(result: &Result<BuildReport, BuildError>) {
    match result {
        Ok(report) => print_report(report),
        Err(e) => Logger::error(tf!("watch.failed", error = e)),
    }
}
