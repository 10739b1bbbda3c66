// ============================================================================
// Dictum - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 全局参数和配置初始化
//   - ✅ 命令路由分发
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod context;
pub mod locales;
pub mod merge;
pub mod translate;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::config::{Config, RuntimeArgs};
use crate::utils::logger::Logger;
use context::{handle_context, ContextArgs};
use locales::handle_locales;
use merge::{handle_merge, MergeArgs};
use translate::{handle_translate, TranslateArgs};
use watch::{handle_watch, WatchArgs};

/// Dictum - translation dictionaries for web applications
#[derive(Debug, Parser)]
#[command(name = "dictum")]
#[command(about = "Merge translation files into JSON dictionaries and resolve request locales")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Config file (defaults to ./dictum.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Language root holding one folder per locale
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interface language (en_us, zh_cn)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge translation sources into `_<locale>.json` dictionaries
    Merge(MergeArgs),
    /// Rebuild the dictionaries whenever a source changes
    Watch(WatchArgs),
    /// Translate a key using a compiled dictionary
    Translate(TranslateArgs),
    /// Resolve the locale of a simulated request and print its render context
    Context(ContextArgs),
    /// List configured locales and their compiled dictionaries
    Locales,
}

/// 加载配置文件并合并全局参数
pub fn initialize(cli: &Cli) -> Result<()> {
    Config::initialize(cli.config.as_deref())?;
    Config::merge_runtime_args(build_runtime_args(cli))?;

    let config = Config::current()?;
    Logger::configure(config.output.colored);
    Ok(())
}

pub async fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Merge(args) => handle_merge(args),
        Commands::Watch(args) => handle_watch(args).await,
        Commands::Translate(args) => handle_translate(args),
        Commands::Context(args) => handle_context(args),
        Commands::Locales => handle_locales(),
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        language_root: cli.root.clone(),
        language: cli.language.clone(),
    }
}
