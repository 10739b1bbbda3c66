//! 词典构建流程和语言策略的错误类型。

use std::path::PathBuf;

/// 导致词典构建中止的错误
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("language folder not found at {0}")]
    LanguageRootNotFound(PathBuf),

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported translation file {0}")]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{path} must return a table of translations, found {found}")]
    NotATable { path: PathBuf, found: &'static str },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode dictionary: {0}")]
    Encode(#[from] serde_json::Error),
}

/// 为请求查找候选语言时的错误
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("identity lookup failed: {0}")]
    Identity(String),

    #[error("session store failed: {0}")]
    Session(String),
}
