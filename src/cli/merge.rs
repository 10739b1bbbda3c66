// ============================================================================
// Dictum - CLI Merge 命令
// ============================================================================
//
// 文件: src/cli/merge.rs
// 职责: 词典构建命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 调用词典构建器
//   - ✅ 构建报告输出
//   - ❌ 不应包含合并逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::core::builder::{BuildReport, DictionaryBuilder};
use crate::core::error::BuildError;
use crate::models::config::Config;
use crate::models::locale::Locale;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::{t, tf, tn};

/// 将翻译源合并为 `_<locale>.json` 词典
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// 美化输出（4 个空格缩进）
    #[arg(long)]
    pub pretty: bool,

    /// 只构建指定的语言（可重复）
    #[arg(long = "locale", value_name = "CODE")]
    pub locales: Vec<String>,
}

pub fn handle_merge(args: MergeArgs) -> Result<()> {
    let config = Config::current()?;
    let builder =
        DictionaryBuilder::from_config(&config).with_pretty(args.pretty || config.merge.pretty);
    let only: Vec<Locale> = args.locales.into_iter().map(Locale::from).collect();

    Logger::info(t!("merge.start"));

    let report = builder.build(&only).map_err(build_failure)?;
    print_report(&report);
    Ok(())
}

/// 语言根目录缺失时转换为本地化提示，其他错误原样返回
pub(crate) fn build_failure(error: BuildError) -> anyhow::Error {
    match error {
        BuildError::LanguageRootNotFound(path) => {
            anyhow::anyhow!(tf!("merge.root_missing", path = path.display()))
        }
        other => other.into(),
    }
}

pub(crate) fn print_report(report: &BuildReport) {
    for build in &report.locales {
        Logger::success(format!(
            "{} {}",
            icons::SUCCESS,
            tn!("merge.locale", build.sources, locale = build.locale)
        ));
    }

    Logger::info(t!("merge.compiled_header"));
    for file in &report.compiled {
        Logger::detail(tf!(
            "merge.compiled_file",
            name = file.name,
            size = file.human_size()
        ));
    }

    Logger::success(tf!("merge.done", ms = report.duration_ms));
}
