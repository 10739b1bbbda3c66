// ============================================================================
// Dictum - 翻译器
// ============================================================================
//
// 文件: src/core/translator.rs
// 职责: 键查找、占位符替换和复数形式选择
// 边界:
//   - ✅ 在合并后的词典中解析点分键
//   - ✅ 替换参数规范化和 `:name` 替换
//   - ✅ 复数形式选择（`{n}`、`[a-b]`、按位置）
//   - ❌ 不应加载词典或感知当前语言
//   - ❌ 不应持有任何状态
//
// 这里的函数都是纯函数。任何未命中（未知键、非文本值、
// 空的复数形式）都返回键本身，而不是错误。
//
// ============================================================================

use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use crate::models::dictionary::{Dictionary, MissingTranslation};

/// 决定复数选择和隐式 `:count` 占位符的数值
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Count(f64);

impl Count {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `-0` 输出为 `0`，整数值不带小数部分
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

macro_rules! count_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Count {
            fn from(value: $ty) -> Self {
                Count(value as f64)
            }
        })*
    };
}

count_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// 有序的 `name → value` 占位符表，后插入的值原位覆盖
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMap {
    entries: Vec<(String, String)>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// `other` 的条目覆盖 `self` 的条目
    pub fn merge(mut self, other: ReplacementMap) -> Self {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for ReplacementMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ReplacementMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// 调用方传入的替换参数（规范化之前）
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Replacements {
    #[default]
    None,
    /// `{count, value, n}` 的简写
    Number(Count),
    /// `{value, name}` 的简写
    Text(String),
    Map(ReplacementMap),
}

impl Replacements {
    pub fn normalize(self) -> ReplacementMap {
        match self {
            Replacements::None => ReplacementMap::new(),
            Replacements::Number(count) => count_replacements(count),
            Replacements::Text(text) => {
                let mut map = ReplacementMap::new();
                map.insert("value", &text);
                map.insert("name", &text);
                map
            }
            Replacements::Map(map) => map,
        }
    }
}

impl From<()> for Replacements {
    fn from(_: ()) -> Self {
        Replacements::None
    }
}

impl From<&str> for Replacements {
    fn from(text: &str) -> Self {
        Replacements::Text(text.to_string())
    }
}

impl From<String> for Replacements {
    fn from(text: String) -> Self {
        Replacements::Text(text)
    }
}

impl From<ReplacementMap> for Replacements {
    fn from(map: ReplacementMap) -> Self {
        Replacements::Map(map)
    }
}

impl<T: Into<Count>> From<Option<T>> for Replacements {
    fn from(value: Option<T>) -> Self {
        value
            .map(|count| Replacements::Number(count.into()))
            .unwrap_or_default()
    }
}

macro_rules! replacements_from_number {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Replacements {
            fn from(value: $ty) -> Self {
                Replacements::Number(Count::from(value))
            }
        })*
    };
}

replacements_from_number!(i32, i64, u32, u64, usize, f64);

impl<const N: usize> From<[(&str, &str); N]> for Replacements {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Replacements::Map(pairs.into_iter().collect())
    }
}

impl From<&Value> for Replacements {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(|n| Replacements::Number(Count(n)))
                .unwrap_or_default(),
            Value::String(s) => Replacements::Text(s.clone()),
            Value::Object(map) => Replacements::Map(
                map.iter()
                    .map(|(name, value)| (name.clone(), json_to_text(value)))
                    .collect(),
            ),
            _ => Replacements::None,
        }
    }
}

fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn count_replacements(count: Count) -> ReplacementMap {
    let mut map = ReplacementMap::new();
    map.insert("count", count);
    map.insert("value", count);
    map.insert("n", count);
    map
}

/// 将 `key` 解析为可用的翻译字符串。
///
/// 只有非空字符串、数字和 `true` 可用；对象、列表、
/// `null`、`false` 和 `""` 都算未命中。
pub fn resolve<'a>(
    key: &str,
    dictionary: &'a Dictionary,
) -> Result<Cow<'a, str>, MissingTranslation> {
    let miss = || MissingTranslation {
        key: key.to_string(),
        segment: key.rsplit('.').next().unwrap_or(key).to_string(),
    };

    match dictionary.lookup(key)? {
        Value::String(s) if !s.is_empty() => Ok(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Ok(Cow::Owned(n.to_string())),
        Value::Bool(true) => Ok(Cow::Borrowed("true")),
        _ => Err(miss()),
    }
}

/// 按表中顺序逐项替换所有 `:name`
pub fn replace_placeholders(translation: &str, replacements: &ReplacementMap) -> String {
    let mut out = translation.to_string();
    for (name, value) in replacements.iter() {
        out = out.replace(&format!(":{name}"), value);
    }
    out
}

/// 翻译 `key`，无法解析时原样返回
pub fn translate(
    key: &str,
    replacements: impl Into<Replacements>,
    dictionary: &Dictionary,
) -> String {
    match resolve(key, dictionary) {
        Ok(translation) => replace_placeholders(&translation, &replacements.into().normalize()),
        Err(miss) => {
            tracing::trace!(%miss, "missing translation");
            key.to_string()
        }
    }
}

/// 翻译 `key`，并选择与 `count` 匹配的复数形式
pub fn translate_plural(
    key: &str,
    count: impl Into<Count>,
    replacements: impl Into<Replacements>,
    dictionary: &Dictionary,
) -> String {
    let count = count.into();
    let translation = match resolve(key, dictionary) {
        Ok(translation) => translation,
        Err(miss) => {
            tracing::trace!(%miss, "missing translation");
            return key.to_string();
        }
    };

    let rules = PluralRuleSet::parse(&translation);
    let form = match rules.select(count) {
        Some(form) if !form.is_empty() => form,
        _ => return key.to_string(),
    };

    let replacements = count_replacements(count).merge(replacements.into().normalize());
    replace_placeholders(form, &replacements)
}

/// 单条翻译中以 `|` 分隔的各个形式
#[derive(Debug, Clone, PartialEq)]
pub struct PluralRuleSet<'a> {
    forms: Vec<&'a str>,
}

impl<'a> PluralRuleSet<'a> {
    pub fn parse(translation: &'a str) -> Self {
        Self {
            forms: translation.split('|').collect(),
        }
    }

    pub fn forms(&self) -> &[&'a str] {
        &self.forms
    }

    /// 为 `count` 选择形式。
    ///
    /// 先尝试所有精确的 `{n}` 形式，再尝试 `[a-b]` 区间形式；
    /// 都不匹配时，数量为 1 使用第一个形式，
    /// 否则使用第二个形式。
    pub fn select(&self, count: Count) -> Option<&'a str> {
        let count = count.value();
        match self.forms.as_slice() {
            [] => return None,
            [only] => return Some(*only),
            _ => {}
        }

        let positional = if count == 1.0 {
            self.forms[0]
        } else {
            self.forms[1]
        };

        if let Some(text) = self
            .forms
            .iter()
            .copied()
            .filter_map(exact_form)
            .find(|(n, _)| *n == count)
            .map(|(_, text)| text)
        {
            return Some(text);
        }

        if let Some(text) = self
            .forms
            .iter()
            .copied()
            .filter_map(range_form)
            .find(|(min, max, _)| count >= *min && count <= *max)
            .map(|(_, _, text)| text)
        {
            return Some(text);
        }

        Some(positional)
    }
}

fn exact_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{(\d+)\}\s?(.*)").expect("exact-count pattern is valid"))
}

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\s*\[\s*(\d+)\s*(?:-|,)\s*(\d*\*?)\s*\]\s*(.*)").expect("range pattern is valid")
    })
}

/// `{3} three things` → `(3, "three things")`
fn exact_form(form: &str) -> Option<(f64, &str)> {
    let captures = exact_pattern().captures(form)?;
    let count = captures.get(1)?.as_str().parse::<f64>().ok()?;
    Some((count, captures.get(2)?.as_str()))
}

/// `[2-10] a few` → `(2, 10, "a few")`，上界为 `*` 表示无上限
fn range_form(form: &str) -> Option<(f64, f64, &str)> {
    let captures = range_pattern().captures(form)?;
    let min = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let upper = captures.get(2)?.as_str();
    let max = if upper == "*" {
        f64::INFINITY
    } else {
        // `10*` 按 10 处理，空边界永不匹配
        upper.trim_end_matches('*').parse::<f64>().ok()?
    };
    Some((min, max, captures.get(3)?.as_str()))
}
