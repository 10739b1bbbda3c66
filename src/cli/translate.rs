// ============================================================================
// Dictum - CLI Translate 命令
// ============================================================================
//
// 文件: src/cli/translate.rs
// 职责: 在编译后的词典中查找单个键
// 边界:
//   - ✅ 命令行参数和 `name=value` 解析
//   - ✅ 使用已加载的词典调用翻译器
//   - ❌ 不应包含查找或复数逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::core::provider::DictionaryProvider;
use crate::core::translator::{self, ReplacementMap};
use crate::models::config::Config;
use crate::models::locale::Locale;
use crate::tf;
use crate::utils::logger::Logger;

/// 使用编译后的词典翻译一个键
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// 点分翻译键，例如 `auth.login.title`
    pub key: String,

    /// 目标语言（默认使用配置的默认语言）
    #[arg(long, value_name = "CODE")]
    pub locale: Option<String>,

    /// 用于选择复数形式的数量
    #[arg(short = 'n', long)]
    pub count: Option<f64>,

    /// 占位符替换（可重复）
    #[arg(short = 'r', long = "replace", value_name = "NAME=VALUE", value_parser = parse_replacement)]
    pub replacements: Vec<(String, String)>,
}

pub fn handle_translate(args: TranslateArgs) -> Result<()> {
    let config = Config::current()?;
    let locale = args
        .locale
        .map(Locale::from)
        .unwrap_or_else(|| config.locales.default.clone());

    let dictionary = DictionaryProvider::new(&config.paths.language_root).load(&locale);
    let replacements: ReplacementMap = args.replacements.into_iter().collect();

    if translator::resolve(&args.key, &dictionary).is_err() {
        Logger::warn(tf!("translate.missing", key = args.key, locale = locale));
    }

    let translation = match args.count {
        Some(count) => translator::translate_plural(&args.key, count, replacements, &dictionary),
        None => translator::translate(&args.key, replacements, &dictionary),
    };
    println!("{}", translation);
    Ok(())
}

fn parse_replacement(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(tf!("translate.invalid_replacement", value = raw)),
    }
}
