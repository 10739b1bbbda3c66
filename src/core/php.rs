// ============================================================================
// Dictum - PHP 翻译文件解析器
// ============================================================================
//
// 文件: src/core/php.rs
// 职责: 将 `return [...]` 形式的 PHP 翻译文件解析为 JSON 值
// 边界:
//   - ✅ 数组字面量（`[...]` 和 `array(...)`）
//   - ✅ 标量字面量、引号字符串和 `.` 拼接
//   - ✅ 注释以及开始/结束标签
//   - ❌ 不应执行任意 PHP（不支持变量、函数调用和常量）
//   - ❌ 不应访问文件系统
//
// 语法:
//   file   := "<?php"? ("declare" "(" ... ")" ";")* "return" expr ";"? "?>"?
//   expr   := term ("." term)*
//   term   := array | string | number | "true" | "false" | "null"
//   array  := "[" entries "]" | "array" "(" entries ")"
//   entry  := expr ("=>" expr)?
//
// ============================================================================

use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct PhpParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// 解析 PHP 翻译文件的内容
pub fn parse_php_file(source: &str) -> Result<Value, PhpParseError> {
    let mut parser = Parser::new(source);
    parser.parse_file()
}

/// 经过 PHP 整数字符串规范化后的数组键
#[derive(Debug, Clone, PartialEq)]
enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    fn into_string(self) -> String {
        match self {
            Key::Int(i) => i.to_string(),
            Key::Str(s) => s,
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn parse_file(&mut self) -> Result<Value, PhpParseError> {
        self.skip_whitespace_and_comments();
        if self.eat_str("<?php") {
            self.skip_whitespace_and_comments();
        }

        while self.peek_keyword("declare") {
            self.skip_declare()?;
            self.skip_whitespace_and_comments();
        }

        if !self.eat_keyword("return") {
            return Err(self.error("expected `return` statement"));
        }

        let value = self.parse_expr()?;

        self.skip_whitespace_and_comments();
        self.eat_char(';');
        self.skip_whitespace_and_comments();
        if self.eat_str("?>") {
            // 结束标签之后是内联 HTML，只允许空白
            self.skip_whitespace_and_comments();
        }
        if !self.at_end() {
            return Err(self.error("unexpected content after return statement"));
        }

        Ok(value)
    }

    fn skip_declare(&mut self) -> Result<(), PhpParseError> {
        self.eat_keyword("declare");
        self.skip_whitespace_and_comments();
        self.expect_char('(')?;
        let mut depth = 1;
        while depth > 0 {
            match self.bump() {
                Some('(') => depth += 1,
                Some(')') => depth -= 1,
                Some(_) => {}
                None => return Err(self.error("unterminated declare")),
            }
        }
        self.skip_whitespace_and_comments();
        self.expect_char(';')
    }

    fn parse_expr(&mut self) -> Result<Value, PhpParseError> {
        let first = self.parse_term()?;

        self.skip_whitespace_and_comments();
        if self.peek() != Some('.') || self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            return Ok(first);
        }

        let mut joined = scalar_to_string(&first)
            .ok_or_else(|| self.error("cannot concatenate an array"))?;
        while self.peek() == Some('.') {
            self.bump();
            let next = self.parse_term()?;
            let piece = scalar_to_string(&next)
                .ok_or_else(|| self.error("cannot concatenate an array"))?;
            joined.push_str(&piece);
            self.skip_whitespace_and_comments();
        }

        Ok(Value::String(joined))
    }

    fn parse_term(&mut self) -> Result<Value, PhpParseError> {
        self.skip_whitespace_and_comments();
        match self.peek() {
            Some('[') => {
                self.bump();
                self.parse_entries(']')
            }
            Some('\'') => self.parse_single_quoted().map(Value::String),
            Some('"') => self.parse_double_quoted().map(Value::String),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.parse_number()
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.read_identifier();
                match word.to_ascii_lowercase().as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    "array" => {
                        self.skip_whitespace_and_comments();
                        self.expect_char('(')?;
                        self.parse_entries(')')
                    }
                    _ => Err(self.error(format!("unsupported expression `{word}`"))),
                }
            }
            Some('<') if self.peek_at(1) == Some('<') => {
                Err(self.error("heredoc strings are not supported"))
            }
            Some(c) => Err(self.error(format!("unexpected character `{c}`"))),
            None => Err(self.error("unexpected end of file")),
        }
    }

    /// 读取条目直到结束分隔符，开始分隔符已被消费
    fn parse_entries(&mut self, close: char) -> Result<Value, PhpParseError> {
        let mut entries: Vec<(Key, Value)> = Vec::new();
        let mut next_index: i64 = 0;

        loop {
            self.skip_whitespace_and_comments();
            if self.eat_char(close) {
                break;
            }

            let first = self.parse_expr()?;
            self.skip_whitespace_and_comments();

            let (key, value) = if self.eat_str("=>") {
                let key = self.to_key(first)?;
                let value = self.parse_expr()?;
                (key, value)
            } else {
                (Key::Int(next_index), first)
            };

            if let Key::Int(i) = key {
                next_index = next_index.max(i.saturating_add(1));
            }
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }

            self.skip_whitespace_and_comments();
            if self.eat_char(',') {
                continue;
            }
            self.skip_whitespace_and_comments();
            if self.eat_char(close) {
                break;
            }
            return Err(self.error(format!("expected `,` or `{close}`")));
        }

        Ok(entries_to_value(entries))
    }

    fn to_key(&self, value: Value) -> Result<Key, PhpParseError> {
        match value {
            Value::String(s) => Ok(normalize_string_key(s)),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .map(Key::Int)
                .ok_or_else(|| self.error("invalid numeric key")),
            Value::Bool(b) => Ok(Key::Int(i64::from(b))),
            Value::Null => Ok(Key::Str(String::new())),
            _ => Err(self.error("arrays cannot be used as keys")),
        }
    }

    fn parse_single_quoted(&mut self) -> Result<String, PhpParseError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(out),
                Some('\\') => match self.peek() {
                    Some('\'') | Some('\\') => {
                        if let Some(c) = self.bump() {
                            out.push(c);
                        }
                    }
                    _ => out.push('\\'),
                },
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    /// `\xHH` 和八进制转义表示原始字节，因此先按字节拼接字符串，
    /// 读到结束引号后必须能解码为 UTF-8
    fn parse_double_quoted(&mut self) -> Result<String, PhpParseError> {
        self.bump();
        let mut bytes = Vec::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => self.parse_escape(&mut bytes)?,
                Some(c) => push_char(&mut bytes, c),
                None => return Err(self.error("unterminated string")),
            }
        }
        String::from_utf8(bytes).map_err(|_| self.error("string is not valid UTF-8"))
    }

    fn parse_escape(&mut self, out: &mut Vec<u8>) -> Result<(), PhpParseError> {
        let Some(c) = self.peek() else {
            return Err(self.error("unterminated string"));
        };
        match c {
            'n' => out.push(b'\n'),
            't' => out.push(b'\t'),
            'r' => out.push(b'\r'),
            'v' => out.push(0x0B),
            'e' => out.push(0x1B),
            'f' => out.push(0x0C),
            '\\' | '$' | '"' => push_char(out, c),
            '0'..='7' => {
                let digits = self.take_while_max(3, |c| ('0'..='7').contains(&c));
                // `\400` 及以上按 PHP 的方式回绕
                let code = u32::from_str_radix(&digits, 8).unwrap_or(0) & 0xFF;
                out.push(code as u8);
                return Ok(());
            }
            'x' if self.peek_at(1).is_some_and(|c| c.is_ascii_hexdigit()) => {
                self.bump();
                let digits = self.take_while_max(2, |c| c.is_ascii_hexdigit());
                out.push(u8::from_str_radix(&digits, 16).unwrap_or(0));
                return Ok(());
            }
            'u' if self.peek_at(1) == Some('{') => {
                self.bump();
                self.bump();
                let digits = self.take_while_max(8, |c| c.is_ascii_hexdigit());
                self.expect_char('}')?;
                let ch = u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.error("invalid unicode escape"))?;
                push_char(out, ch);
                return Ok(());
            }
            // 未知转义保留反斜杠
            _ => {
                out.push(b'\\');
                return Ok(());
            }
        }
        self.bump();
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Value, PhpParseError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.bump();
            self.skip_whitespace_and_comments();
        }
        let sign = if self.chars[start] == '-' { "-" } else { "" };
        let digits = self.take_while_max(usize::MAX, |c| {
            c.is_ascii_digit() || c == '.' || c == '_' || c == 'e' || c == 'E'
        });
        let literal = format!("{sign}{}", digits.replace('_', ""));

        if let Ok(i) = literal.parse::<i64>() {
            return Ok(Value::Number(Number::from(i)));
        }
        literal
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| self.error(format!("invalid number `{literal}`")))
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) | (Some('#'), _) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    self.pos += 2;
                    while !self.at_end() && !self.eat_str("*/") {
                        self.bump();
                    }
                }
                _ => return,
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        self.take_while_max(usize::MAX, |c| c.is_ascii_alphanumeric() || c == '_')
    }

    fn take_while_max(&mut self, max: usize, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while out.len() < max {
            match self.peek() {
                Some(c) if pred(c) => {
                    out.push(c);
                    self.bump();
                }
                _ => break,
            }
        }
        out
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn eat_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), PhpParseError> {
        if self.eat_char(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{expected}`")))
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        let matches = expected
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c));
        if matches {
            self.pos += expected.chars().count();
        }
        matches
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        let len = keyword.chars().count();
        let matches = keyword
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i).map(|p| p.to_ascii_lowercase()) == Some(c));
        matches
            && !self
                .peek_at(len)
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.pos += keyword.chars().count();
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> PhpParseError {
        let consumed = &self.chars[..self.pos.min(self.chars.len())];
        let line = consumed.iter().filter(|&&c| c == '\n').count() + 1;
        let column = consumed.iter().rev().take_while(|&&c| c != '\n').count() + 1;
        PhpParseError {
            line,
            column,
            message: message.into(),
        }
    }
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buffer = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
}

/// `"5"` 转为整数键 5，`"05"` 和 `"-0"` 保持为字符串
fn normalize_string_key(s: String) -> Key {
    let canonical = match s.strip_prefix('-') {
        Some(rest) => !rest.is_empty() && !rest.starts_with('0') && rest.bytes().all(|b| b.is_ascii_digit()),
        None => s == "0" || (!s.starts_with('0') && !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())),
    };
    match canonical.then(|| s.parse::<i64>().ok()).flatten() {
        Some(i) => Key::Int(i),
        None => Key::Str(s),
    }
}

/// PHP 将键为 `0..n` 的数组编码为 JSON 列表，其余编码为对象
fn entries_to_value(entries: Vec<(Key, Value)>) -> Value {
    let is_list = entries
        .iter()
        .enumerate()
        .all(|(i, (key, _))| *key == Key::Int(i as i64));

    if is_list {
        Value::Array(entries.into_iter().map(|(_, value)| value).collect())
    } else {
        let map: Map<String, Value> = entries
            .into_iter()
            .map(|(key, value)| (key.into_string(), value))
            .collect();
        Value::Object(map)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) | Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
