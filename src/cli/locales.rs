// ============================================================================
// Dictum - CLI Locales 命令
// ============================================================================
//
// 文件: src/cli/locales.rs
// 职责: 列出已配置的语言及其编译后的词典
// 边界:
//   - ✅ 语言属性（默认、回退）
//   - ✅ 编译文件是否存在及其大小
//   - ✅ 未配置为可用语言的目录
//   - ❌ 不应构建或加载词典
//
// ============================================================================

use anyhow::Result;
use std::fs;

use crate::core::boundary::RequestLocalizer;
use crate::core::builder::{human_size, DictionaryBuilder};
use crate::models::config::Config;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::{t, tf};

pub fn handle_locales() -> Result<()> {
    let config = Config::current()?;
    let localizer = RequestLocalizer::from_config(&config);
    let manager = localizer.manager();

    Logger::info(tf!("locales.header", setter = config.locale_setter.kind));

    for locale in manager.available_locales() {
        let info = manager.describe(locale);
        let mut tags = Vec::new();
        if info.is_default {
            tags.push(t!("locales.default"));
        }
        if info.is_fallback {
            tags.push(t!("locales.fallback"));
        }

        let path = localizer.provider().dictionary_path(locale);
        let (icon, status) = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => (
                icons::LOCALE,
                tf!("locales.compiled", size = human_size(metadata.len())),
            ),
            _ => (icons::SKIP, t!("locales.not_compiled")),
        };
        tags.push(status);

        Logger::detail(format!("{} {} ({})", icon, locale, tags.join(", ")));
    }

    // 语言根目录存在时才列出目录
    let builder = DictionaryBuilder::from_config(&config);
    if builder.language_root().is_dir() {
        for folder in builder.locale_folders()? {
            if !manager.is_valid_locale(&folder) {
                Logger::warn(tf!("locales.unlisted", locale = folder));
            }
        }
    }

    Ok(())
}
