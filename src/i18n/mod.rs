// ============================================================================
// Dictum - 国际化模块
// ============================================================================
//
// 文件: src/i18n/mod.rs
// 职责: CLI 消息表和翻译宏
// 边界:
//   - ✅ 根据翻译表构建消息词典
//   - ✅ 翻译宏定义和实现
//   - ✅ 界面语言切换支持
//   - ✅ 参数化和复数消息支持
//   - ❌ 不应包含具体翻译内容
//   - ❌ 不应包含业务逻辑
//
// CLI 消息与应用词典使用同一个翻译器，
// 因此同样支持 `:name` 占位符和 `{n}` / `[a-b]` 复数形式。
//
// ============================================================================

pub mod en_us;
pub mod zh_cn;

use serde_json::Value;
use std::sync::OnceLock;

use crate::core::translator::{translate, translate_plural, Count, Replacements};
use crate::models::config::{Config, ConfigDefaults};
use crate::models::dictionary::Dictionary;

fn build_dictionary(table: &[(&str, &str)]) -> Dictionary {
    let mut dictionary = Dictionary::new();
    for &(key, message) in table {
        dictionary.set_path(key, Value::String(message.to_string()));
    }
    dictionary
}

fn messages(language: &str) -> &'static Dictionary {
    static EN_US: OnceLock<Dictionary> = OnceLock::new();
    static ZH_CN: OnceLock<Dictionary> = OnceLock::new();

    match language {
        "zh_cn" => ZH_CN.get_or_init(|| build_dictionary(zh_cn::TRANSLATIONS)),
        // 默认使用英文
        _ => EN_US.get_or_init(|| build_dictionary(en_us::TRANSLATIONS)),
    }
}

/// 全局配置中的界面语言，配置加载前使用英文
fn current_language() -> String {
    Config::get_language().unwrap_or_else(|_| Config::default_language())
}

/// 当前界面语言下 `key` 对应的消息
pub fn get_translation(key: &str) -> String {
    get_translation_with(key, Replacements::None)
}

/// 替换 `:name` 占位符后的 `key` 消息
pub fn get_translation_with(key: &str, replacements: impl Into<Replacements>) -> String {
    translate(key, replacements, messages(&current_language()))
}

/// 按 `count` 选择的 `key` 复数消息
pub fn get_plural(key: &str, count: impl Into<Count>, replacements: impl Into<Replacements>) -> String {
    translate_plural(key, count, replacements, messages(&current_language()))
}

/// 指定语言下 `key` 对应的消息
pub fn translation_in(language: &str, key: &str, replacements: impl Into<Replacements>) -> String {
    translate(key, replacements, messages(language))
}

/// 简单翻译宏
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::get_translation($key)
    };
}

/// 带命名参数的翻译: `tf!("merge.done", ms = 12)`
#[macro_export]
macro_rules! tf {
    ($key:expr, $($name:ident = $value:expr),+ $(,)?) => {{
        let mut replacements = $crate::core::translator::ReplacementMap::new();
        $(replacements.insert(stringify!($name), &$value);)+
        $crate::i18n::get_translation_with($key, replacements)
    }};
}

/// 复数翻译: `tn!("merge.locale", files, locale = code)`
#[macro_export]
macro_rules! tn {
    ($key:expr, $count:expr) => {
        $crate::i18n::get_plural($key, $count, ())
    };
    ($key:expr, $count:expr, $($name:ident = $value:expr),+ $(,)?) => {{
        let mut replacements = $crate::core::translator::ReplacementMap::new();
        $(replacements.insert(stringify!($name), &$value);)+
        $crate::i18n::get_plural($key, $count, replacements)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tables_define_the_same_keys() {
        let english: HashSet<_> = en_us::TRANSLATIONS.iter().map(|(k, _)| *k).collect();
        let chinese: HashSet<_> = zh_cn::TRANSLATIONS.iter().map(|(k, _)| *k).collect();
        assert_eq!(english, chinese);
    }

    #[test]
    fn tables_have_no_duplicate_keys() {
        for table in [en_us::TRANSLATIONS, zh_cn::TRANSLATIONS] {
            let keys: HashSet<_> = table.iter().map(|(k, _)| *k).collect();
            assert_eq!(keys.len(), table.len());
        }
    }

    #[test]
    fn replaces_named_placeholders() {
        assert_eq!(
            translation_in("en_us", "merge.done", [("ms", "42")]),
            "Done in 42 ms!"
        );
    }

    #[test]
    fn unknown_key_returns_the_key() {
        assert_eq!(translation_in("en_us", "nope.missing", ()), "nope.missing");
    }

    #[test]
    fn unknown_language_uses_english() {
        assert_eq!(
            translation_in("fr_fr", "watch.stopped", ()),
            "Stopped watching."
        );
    }

    #[test]
    fn plural_messages_select_by_count() {
        let english = messages("en_us");
        let one = translate_plural("merge.locale", 1, [("locale", "en")], english);
        let many = translate_plural("merge.locale", 3, [("locale", "en")], english);
        assert_eq!(one, "Merged locale en (1 source file)");
        assert_eq!(many, "Merged locale en (3 source files)");

        let chinese = messages("zh_cn");
        let none = translate_plural("merge.locale", 0, [("locale", "en")], chinese);
        assert_eq!(none, "已合并语言 en（没有源文件）");
    }
}
