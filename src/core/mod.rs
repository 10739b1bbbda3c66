// ============================================================================
// Dictum - 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 核心模块入口和类型重导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重导出
//   - ❌ 不应包含具体实现
//   - ❌ 不应包含 CLI 逻辑
//
// ============================================================================

pub mod boundary;
pub mod builder;
pub mod error;
pub mod php;
pub mod policy;
pub mod provider;
pub mod source;
pub mod translator;
pub mod watcher;

// 重导出常用类型
pub use boundary::{RenderContext, RequestLocalizer};
pub use builder::{BuildReport, DictionaryBuilder};
pub use error::{BuildError, LocaleError};
pub use policy::{LocaleManager, LocaleSetter, RequestLocale};
pub use provider::DictionaryProvider;
pub use translator::{translate, translate_plural, ReplacementMap, Replacements};
pub use watcher::{Watcher, WatchEvent};
