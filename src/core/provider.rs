// ============================================================================
// Dictum - 词典提供器
// ============================================================================
//
// 文件: src/core/provider.rs
// 职责: 为展示层加载编译后的语言词典
// 边界:
//   - ✅ 读取 `<root>/_<locale>.json`
//   - ✅ 任何失败都返回空词典
//   - ❌ 不应构建词典
//   - ❌ 不应选择语言
//
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::dictionary::Dictionary;
use crate::models::locale::Locale;

#[derive(Debug, Clone)]
pub struct DictionaryProvider {
    language_root: PathBuf,
}

impl DictionaryProvider {
    pub fn new(language_root: impl Into<PathBuf>) -> Self {
        Self {
            language_root: language_root.into(),
        }
    }

    pub fn dictionary_path(&self, locale: &Locale) -> PathBuf {
        self.language_root.join(locale.dictionary_file_name())
    }

    pub fn exists(&self, locale: &Locale) -> bool {
        self.dictionary_path(locale).is_file()
    }

    /// `locale` 编译后的词典，永不失败
    pub fn load(&self, locale: &Locale) -> Dictionary {
        let path = self.dictionary_path(locale);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(locale = %locale, path = %path.display(), "no compiled dictionary");
                return Dictionary::new();
            }
            Err(e) => {
                tracing::warn!(locale = %locale, path = %path.display(), error = %e, "cannot read dictionary");
                return Dictionary::new();
            }
        };

        parse_dictionary(&path, &content)
    }
}

fn parse_dictionary(path: &Path, content: &str) -> Dictionary {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(value) => Dictionary::from_value(value).unwrap_or_else(|| {
            // `[]` 是旧版对空 PHP 数组的编码，其他内容都视为异常
            if !matches!(content.trim(), "[]") {
                tracing::warn!(path = %path.display(), "dictionary is not a JSON object");
            }
            Dictionary::new()
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed dictionary");
            Dictionary::new()
        }
    }
}
