// ============================================================================
// Dictum - 词典构建器
// ============================================================================
//
// 文件: src/core/builder.rs
// 职责: 将各文件的翻译表合并为每种语言一个 JSON 词典
// 边界:
//   - ✅ 在语言根目录下发现语言目录
//   - ✅ 按稳定顺序枚举源文件
//   - ✅ 点分路径推导与合并
//   - ✅ 写入 `_<locale>.json` 并列出已编译文件
//   - ❌ 不应包含源文件格式解析
//   - ❌ 不应包含 CLI 输出格式化
//
// 算法:
// 1. 语言根目录的每个直接子目录都是一种语言
// 2. 遍历语言目录中可识别的源文件，按相对路径排序
// 3. `auth/login.php` 写入 `auth.login`，路径重叠时后出现的文件覆盖先前的
// 4. 合并结果写入 `<root>/_<locale>.json`
//
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use crate::core::error::BuildError;
use crate::core::source::load_source;
use crate::models::config::Config;
use crate::models::dictionary::Dictionary;
use crate::models::locale::Locale;

/// 单个翻译源文件及其写入的点分路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub key: String,
}

/// 单个语言的合并结果
#[derive(Debug, Clone)]
pub struct LocaleBuild {
    pub locale: Locale,
    pub sources: usize,
    pub output: PathBuf,
}

/// 语言根目录中找到的已编译 `_<locale>.json` 文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFile {
    pub name: String,
    pub size: u64,
}

impl CompiledFile {
    pub fn human_size(&self) -> String {
        human_size(self.size)
    }
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub locales: Vec<LocaleBuild>,
    pub compiled: Vec<CompiledFile>,
    pub duration_ms: u64,
}

/// 词典构建器
pub struct DictionaryBuilder {
    /// 存放各语言目录和编译产物的目录
    language_root: PathBuf,
    /// 可识别的源文件扩展名（小写，不含点）
    extensions: Vec<String>,
    pretty: bool,
}

impl DictionaryBuilder {
    pub fn new(language_root: impl Into<PathBuf>) -> Self {
        Self {
            language_root: language_root.into(),
            extensions: vec!["php".to_string()],
            pretty: false,
        }
    }

    /// 基于配置的语言根目录、扩展名和输出风格创建构建器
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.paths.language_root)
            .with_extensions(&config.merge.extensions)
            .with_pretty(config.merge.pretty)
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn language_root(&self) -> &Path {
        &self.language_root
    }

    /// 构建所有语言目录，`only` 非空时只构建其中的语言。
    ///
    /// 指定的语言即使没有目录也会得到一个（空）词典。
    pub fn build(&self, only: &[Locale]) -> Result<BuildReport, BuildError> {
        let start_time = Instant::now();

        if !self.language_root.is_dir() {
            return Err(BuildError::LanguageRootNotFound(self.language_root.clone()));
        }

        let locales = if only.is_empty() {
            self.locale_folders()?
        } else {
            only.to_vec()
        };

        let mut builds = Vec::with_capacity(locales.len());
        for locale in locales {
            tracing::info!(locale = %locale, "merging locale");
            let sources = self.source_files(&locale)?;
            let dictionary = self.merge(&locale, &sources)?;
            let output = self.write_dictionary(&locale, &dictionary)?;
            builds.push(LocaleBuild {
                locale,
                sources: sources.len(),
                output,
            });
        }

        Ok(BuildReport {
            locales: builds,
            compiled: self.compiled_files()?,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// 单个语言的合并词典，不写入磁盘
    pub fn merge_locale(&self, locale: &Locale) -> Result<Dictionary, BuildError> {
        let sources = self.source_files(locale)?;
        self.merge(locale, &sources)
    }

    /// 语言根目录的直接子目录，按名称排序
    pub fn locale_folders(&self) -> Result<Vec<Locale>, BuildError> {
        let entries = fs::read_dir(&self.language_root).map_err(|source| BuildError::Read {
            path: self.language_root.clone(),
            source,
        })?;

        let mut locales = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| BuildError::Read {
                path: self.language_root.clone(),
                source,
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_hidden(&name) {
                locales.push(Locale::from(name));
            }
        }

        locales.sort();
        Ok(locales)
    }

    /// `locale` 中可识别的源文件，按相对路径排序
    pub fn source_files(&self, locale: &Locale) -> Result<Vec<SourceFile>, BuildError> {
        let locale_dir = self.language_root.join(locale.as_str());
        if !locale_dir.is_dir() {
            tracing::debug!(locale = %locale, "no locale folder, dictionary will be empty");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&locale_dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(&e.file_name().to_string_lossy()))
        {
            let entry = entry.map_err(|source| BuildError::Walk {
                path: locale_dir.clone(),
                source,
            })?;

            if !entry.file_type().is_file() || !self.is_recognized(entry.path()) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&locale_dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push((relative, entry.into_path()));
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files
            .into_iter()
            .map(|(relative, path)| SourceFile {
                key: dotted_key(&relative),
                path,
            })
            .collect())
    }

    /// 语言根目录中现有的 `_*.json` 编译文件
    pub fn compiled_files(&self) -> Result<Vec<CompiledFile>, BuildError> {
        let entries = fs::read_dir(&self.language_root).map_err(|source| BuildError::Read {
            path: self.language_root.clone(),
            source,
        })?;

        let mut compiled = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !(name.starts_with('_') && name.ends_with(".json")) {
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            compiled.push(CompiledFile { name, size });
        }

        compiled.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(compiled)
    }

    pub fn is_recognized(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn merge(&self, locale: &Locale, sources: &[SourceFile]) -> Result<Dictionary, BuildError> {
        let mut dictionary = Dictionary::new();

        for source in sources {
            let table = load_source(&source.path)?;
            tracing::debug!(locale = %locale, key = %source.key, file = %source.path.display(), "merging source");

            if dictionary.set_path(&source.key, table).is_some() {
                tracing::warn!(
                    locale = %locale,
                    key = %source.key,
                    file = %source.path.display(),
                    "translation path overlaps an earlier file; the later file wins"
                );
            }
        }

        Ok(dictionary)
    }

    fn write_dictionary(
        &self,
        locale: &Locale,
        dictionary: &Dictionary,
    ) -> Result<PathBuf, BuildError> {
        let output = self.language_root.join(locale.dictionary_file_name());
        let json = dictionary.to_json(self.pretty)?;
        fs::write(&output, json).map_err(|source| BuildError::Write {
            path: output.clone(),
            source,
        })?;
        Ok(output)
    }
}

/// `auth/login.php` → `auth.login`
pub fn dotted_key(relative: &Path) -> String {
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(".")
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_key_strips_extension_and_joins_folders() {
        assert_eq!(dotted_key(Path::new("auth/login.php")), "auth.login");
        assert_eq!(dotted_key(Path::new("validation.php")), "validation");
        assert_eq!(dotted_key(Path::new("a/b/c.yaml")), "a.b.c");
    }

    #[test]
    fn human_sizes() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.00 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn recognizes_configured_extensions_only() {
        let builder = DictionaryBuilder::new("lang").with_extensions([".PHP", "yaml"]);
        assert!(builder.is_recognized(Path::new("en/auth.php")));
        assert!(builder.is_recognized(Path::new("en/auth.yaml")));
        assert!(!builder.is_recognized(Path::new("en/auth.json")));
    }
}
