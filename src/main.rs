use clap::Parser;
use tracing_subscriber::EnvFilter;

use dictum::cli::{self, Cli};
use dictum::models::config::Config;
use dictum::utils::logger::Logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::initialize(&cli) {
        Logger::error(format!("{e:#}"));
        std::process::exit(1);
    }

    // 诊断信息输出到 stderr，stdout 只留给翻译结果和 JSON
    let default_level = if Config::get_verbose() { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    if let Err(e) = cli::run_cli(cli).await {
        Logger::error(format!("{e:#}"));
        std::process::exit(1);
    }
}
