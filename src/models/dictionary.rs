// ============================================================================
// Dictum - 词典数据模型
// ============================================================================
//
// 文件: src/models/dictionary.rs
// 职责: 按语言合并后的翻译树
// 边界:
//   - ✅ 按源顺序存储翻译树
//   - ✅ 点分路径写入（合并侧）
//   - ✅ 点分路径查找，未命中时返回类型化结果（翻译侧）
//   - ✅ 编译后词典的 JSON 序列化
//   - ❌ 不应包含占位符或复数逻辑
//   - ❌ 不应包含文件系统访问
//
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 无法解析为可用翻译的键
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no translation for `{key}` (stopped at `{segment}`)")]
pub struct MissingTranslation {
    pub key: String,
    pub segment: String,
}

/// 单个语言的嵌套翻译树
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: Map<String, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// 由任意 JSON 值构建词典，只有对象才包含条目
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(entries) => Some(Self { entries }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }

    /// 将 `value` 写入点分路径，并按需创建中间对象。
    ///
    /// 不是对象的中间节点会被替换为空对象。
    /// 返回被替换掉的值，调用方据此报告路径重叠。
    pub fn set_path(&mut self, path: &str, value: Value) -> Option<Value> {
        let mut segments = path.split('.').peekable();
        let mut node = &mut self.entries;
        let mut displaced = None;

        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                return node.insert(segment.to_string(), value).or(displaced);
            }

            let slot = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                displaced = Some(std::mem::replace(slot, Value::Object(Map::new())));
            }
            node = match slot {
                Value::Object(map) => map,
                _ => unreachable!("slot was just made an object"),
            };
        }

        displaced
    }

    /// 逐段解析点分键。
    ///
    /// 数组节点接受数字段，任何一段缺失都算未命中。
    pub fn lookup(&self, key: &str) -> Result<&Value, MissingTranslation> {
        let mut segments = key.split('.');
        let first = segments.next().unwrap_or_default();
        let mut node = self
            .entries
            .get(first)
            .ok_or_else(|| Self::miss(key, first))?;

        for segment in segments {
            let next = match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            node = next.ok_or_else(|| Self::miss(key, segment))?;
        }

        Ok(node)
    }

    /// 序列化词典，美化输出使用四个空格缩进
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if !pretty {
            return serde_json::to_string(&self.entries);
        }

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.entries.serialize(&mut serializer)?;
        // serde_json 只会写出合法的 UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn miss(key: &str, segment: &str) -> MissingTranslation {
        MissingTranslation {
            key: key.to_string(),
            segment: segment.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_path_creates_intermediate_objects() {
        let mut dictionary = Dictionary::new();
        let displaced = dictionary.set_path("auth.login", json!({"title": "Sign in"}));

        assert!(displaced.is_none());
        assert_eq!(
            dictionary.into_value(),
            json!({"auth": {"login": {"title": "Sign in"}}})
        );
    }

    #[test]
    fn set_path_reports_overwritten_leaf() {
        let mut dictionary = Dictionary::new();
        dictionary.set_path("auth", json!({"login": "old"}));
        let displaced = dictionary.set_path("auth.login", json!({"title": "new"}));

        assert_eq!(displaced, Some(json!("old")));
        assert_eq!(
            dictionary.lookup("auth.login.title").ok(),
            Some(&json!("new"))
        );
    }

    #[test]
    fn set_path_replaces_scalar_intermediate() {
        let mut dictionary = Dictionary::new();
        dictionary.set_path("menu", json!("flat"));
        let displaced = dictionary.set_path("menu.main", json!({"home": "Home"}));

        assert_eq!(displaced, Some(json!("flat")));
        assert_eq!(dictionary.lookup("menu.main.home").ok(), Some(&json!("Home")));
    }

    #[test]
    fn lookup_reports_the_failing_segment() {
        let dictionary = Dictionary::from_value(json!({"a": {"b": "c"}})).unwrap();
        let miss = dictionary.lookup("a.x.y").unwrap_err();

        assert_eq!(miss.key, "a.x.y");
        assert_eq!(miss.segment, "x");
    }

    #[test]
    fn lookup_indexes_into_arrays() {
        let dictionary = Dictionary::from_value(json!({"days": ["Mon", "Tue"]})).unwrap();
        assert_eq!(dictionary.lookup("days.1").ok(), Some(&json!("Tue")));
        assert!(dictionary.lookup("days.7").is_err());
    }

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let dictionary = Dictionary::from_value(json!({"a": "b"})).unwrap();
        assert_eq!(dictionary.to_json(true).unwrap(), "{\n    \"a\": \"b\"\n}");
        assert_eq!(dictionary.to_json(false).unwrap(), "{\"a\":\"b\"}");
    }

    #[test]
    fn empty_dictionary_serializes_as_object() {
        assert_eq!(Dictionary::new().to_json(false).unwrap(), "{}");
    }
}
