// ============================================================================
// Dictum - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置结构定义和进程级全局配置
// 边界:
//   - ✅ 配置结构定义
//   - ✅ TOML 反序列化和默认值
//   - ✅ 语言设置校验
//   - ✅ 合并 CLI 运行时覆盖参数
//   - ❌ 不应包含语言解析逻辑
//   - ❌ 不应包含 CLI 参数解析
//   - ❌ 不应包含词典构建逻辑
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::models::locale::Locale;

/// 全局配置管理器，启动时设置一次
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// 在工作目录中查找的默认配置文件名
pub const CONFIG_FILE_NAME: &str = "dictum.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("default locale `{0}` is not in the available locales")]
    DefaultNotAvailable(Locale),

    #[error("no available locales configured")]
    NoLocales,

    #[error("no source file extensions configured")]
    NoExtensions,

    #[error("config is not initialized")]
    NotInitialized,

    #[error("config lock is poisoned")]
    Poisoned,
}

/// Dictum 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub locales: LocalesConfig,
    #[serde(default)]
    pub locale_setter: LocaleSetterConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// 存放 `<locale>/` 源目录和编译后 `_<locale>.json` 文件的目录
    #[serde(default = "Config::default_language_root")]
    pub language_root: PathBuf,
}

/// 可用语言白名单，进程生命周期内不变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalesConfig {
    #[serde(default = "Config::default_available_locales")]
    pub available: Vec<Locale>,
    #[serde(default = "Config::default_locale")]
    pub default: Locale,
    #[serde(default = "Config::default_locale")]
    pub fallback: Locale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleSetterConfig {
    #[serde(default)]
    pub kind: LocaleSetterKind,
    /// 保存用户偏好语言的身份属性名
    #[serde(default = "Config::default_user_locale_property")]
    pub user_locale_property: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// 可识别的源文件扩展名（不含点）
    #[serde(default = "Config::default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "Config::default_watch_interval_ms")]
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default = "Config::default_colored")]
    pub colored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// CLI 自身的界面语言
    #[serde(default = "Config::default_language")]
    pub language: String,
}

/// 可在配置中选择的语言设置器类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSetterKind {
    /// 先取会话语言，再取默认语言
    Session,
    /// 先取已登录用户的语言，再取会话语言，最后取默认语言
    #[default]
    UserSession,
    /// 禁用语言解析
    None,
}

impl LocaleSetterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocaleSetterKind::Session => "session",
            LocaleSetterKind::UserSession => "user_session",
            LocaleSetterKind::None => "none",
        }
    }
}

impl std::fmt::Display for LocaleSetterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CLI 运行时覆盖参数
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub language_root: Option<PathBuf>,
    pub language: Option<String>,
}

/// 配置默认值，全局配置初始化之前也可使用
pub trait ConfigDefaults {
    fn default_language_root() -> PathBuf {
        PathBuf::from("lang")
    }

    fn default_available_locales() -> Vec<Locale> {
        vec![Locale::from("en")]
    }

    fn default_locale() -> Locale {
        Locale::from("en")
    }

    fn default_user_locale_property() -> Option<String> {
        Some("language".to_string())
    }

    fn default_extensions() -> Vec<String> {
        vec!["php".to_string()]
    }

    fn default_watch_interval_ms() -> u64 {
        500
    }

    fn default_colored() -> bool {
        true
    }

    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 加载并安装全局配置（启动时调用一次）
    pub fn initialize(path: Option<&Path>) -> anyhow::Result<()> {
        let config = Self::load(path)?;
        config.validate()?;
        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 读取配置文件，默认配置文件不存在时使用默认值
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        if path.is_none() && !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: config_path,
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locales.available.is_empty() {
            return Err(ConfigError::NoLocales);
        }
        if !self.locales.available.contains(&self.locales.default) {
            return Err(ConfigError::DefaultNotAvailable(self.locales.default.clone()));
        }
        if self.merge.extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        Ok(())
    }

    /// 将 CLI 覆盖参数合并到全局配置
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.apply(args);
        Ok(())
    }

    fn apply(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(language_root) = args.language_root {
            self.paths.language_root = language_root;
        }
        if let Some(language) = args.language {
            self.i18n.language = language;
        }
    }

    /// 全局配置的快照
    pub fn current() -> Result<Config, ConfigError> {
        let global_config = GLOBAL_CONFIG.get().ok_or(ConfigError::NotInitialized)?;
        let config = global_config.read().map_err(|_| ConfigError::Poisoned)?;
        Ok(config.clone())
    }

    /// CLI 界面语言
    pub fn get_language() -> Result<String, ConfigError> {
        Self::current().map(|config| config.i18n.language)
    }

    pub fn get_verbose() -> bool {
        Self::current()
            .map(|config| config.output.verbose)
            .unwrap_or(false)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            locales: LocalesConfig::default(),
            locale_setter: LocaleSetterConfig::default(),
            merge: MergeConfig::default(),
            watch: WatchConfig::default(),
            output: OutputConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            language_root: Config::default_language_root(),
        }
    }
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            available: Config::default_available_locales(),
            default: Config::default_locale(),
            fallback: Config::default_locale(),
        }
    }
}

impl Default for LocaleSetterConfig {
    fn default() -> Self {
        Self {
            kind: LocaleSetterKind::default(),
            user_locale_property: Config::default_user_locale_property(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            extensions: Config::default_extensions(),
            pretty: false,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_ms: Config::default_watch_interval_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            colored: Config::default_colored(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Config::default_language(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.paths.language_root, PathBuf::from("lang"));
        assert_eq!(config.locales.available, vec![Locale::from("en")]);
        assert_eq!(config.locale_setter.kind, LocaleSetterKind::UserSession);
        assert_eq!(config.merge.extensions, vec!["php".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_locale_section() {
        let config = Config::from_toml(
            r#"
            [locales]
            available = ["en", "de", "fr"]
            default = "de"
            fallback = "en"

            [locale_setter]
            kind = "session"
            "#,
        )
        .unwrap();

        assert_eq!(config.locales.default, Locale::from("de"));
        assert_eq!(config.locale_setter.kind, LocaleSetterKind::Session);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_default_outside_available_set() {
        let config = Config::from_toml(
            r#"
            [locales]
            available = ["en"]
            default = "fr"
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::DefaultNotAvailable(_))
        ));
    }

    #[test]
    fn runtime_args_override_file_values() {
        let mut config = Config::default();
        config.apply(RuntimeArgs {
            verbose: Some(true),
            colored: Some(false),
            language_root: Some(PathBuf::from("resources/lang")),
            language: Some("zh_cn".to_string()),
        });

        assert!(config.output.verbose);
        assert!(!config.output.colored);
        assert_eq!(config.paths.language_root, PathBuf::from("resources/lang"));
        assert_eq!(config.i18n.language, "zh_cn");
    }
}
