// ============================================================================
// Dictum - 翻译源加载器
// ============================================================================
//
// 文件: src/core/source.rs
// 职责: 将单个翻译源文件加载为 JSON 表
// 边界:
//   - ✅ 按文件扩展名识别格式
//   - ✅ PHP / JSON / YAML / TOML 解码
//   - ✅ 结构检查（顶层值必须是表）
//   - ❌ 不应合并翻译表
//   - ❌ 不应遍历目录
//
// ============================================================================

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::core::error::BuildError;
use crate::core::php::parse_php_file;

/// 翻译源文件支持的格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Php,
    Json,
    Yaml,
    Toml,
}

impl SourceFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "php" => Some(SourceFormat::Php),
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "toml" => Some(SourceFormat::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// 将文件内容解码为 JSON 值
    pub fn parse(&self, content: &str) -> Result<Value, String> {
        match self {
            SourceFormat::Php => parse_php_file(content).map_err(|e| e.to_string()),
            SourceFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            SourceFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            SourceFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// 从磁盘加载一个翻译源表
pub fn load_source(path: &Path) -> Result<Value, BuildError> {
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| BuildError::UnsupportedFormat(path.to_path_buf()))?;

    let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let table = format.parse(&content).map_err(|message| BuildError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    match table {
        Value::Object(_) | Value::Array(_) => Ok(table),
        other => Err(BuildError::NotATable {
            path: path.to_path_buf(),
            found: value_kind(&other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn detects_formats_case_insensitively() {
        assert_eq!(SourceFormat::from_extension("PHP"), Some(SourceFormat::Php));
        assert_eq!(SourceFormat::from_extension("yml"), Some(SourceFormat::Yaml));
        assert_eq!(SourceFormat::from_extension("txt"), None);
    }

    #[test]
    fn loads_every_format_to_the_same_table() {
        let dir = TempDir::new().unwrap();
        let expected = json!({"title": "Sign in", "nested": {"hint": "Forgot?"}});

        let php = write(
            &dir,
            "a.php",
            "<?php return ['title' => 'Sign in', 'nested' => ['hint' => 'Forgot?']];",
        );
        let json = write(&dir, "a.json", r#"{"title":"Sign in","nested":{"hint":"Forgot?"}}"#);
        let yaml = write(&dir, "a.yaml", "title: Sign in\nnested:\n  hint: Forgot?\n");
        let toml = write(&dir, "a.toml", "title = \"Sign in\"\n[nested]\nhint = \"Forgot?\"\n");

        for path in [php, json, yaml, toml] {
            assert_eq!(load_source(&path).unwrap(), expected, "{}", path.display());
        }
    }

    #[test]
    fn rejects_scalar_sources() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.php", "<?php return 'nope';");

        assert!(matches!(
            load_source(&path),
            Err(BuildError::NotATable { found: "a string", .. })
        ));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.php", "<?php return [");

        let err = load_source(&path).unwrap_err();
        assert!(err.to_string().contains("broken.php"));
    }
}
