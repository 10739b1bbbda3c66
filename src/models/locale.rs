// ============================================================================
// Dictum - 语言数据模型
// ============================================================================
//
// 文件: src/models/locale.rs
// 职责: 语言标识及其配置属性
// 边界:
//   - ✅ 语言代码 newtype
//   - ✅ 语言属性报告（默认 / 回退 / 可用）
//   - ❌ 不应包含语言解析策略
//   - ❌ 不应包含会话处理
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 不透明的语言代码，例如 `en` 或 `de_DE`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 空代码永远无法通过校验，解析时会被跳过
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// 该语言编译后词典的文件名
    pub fn dictionary_file_name(&self) -> String {
        format!("_{}.json", self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 单个语言的配置属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleInfo {
    pub locale: Locale,
    pub is_default: bool,
    pub is_fallback: bool,
    pub is_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_file_name_is_prefixed() {
        assert_eq!(Locale::from("de_DE").dictionary_file_name(), "_de_DE.json");
    }

    #[test]
    fn blank_codes_are_empty() {
        assert!(Locale::from("  ").is_empty());
        assert!(!Locale::from("en").is_empty());
    }
}
