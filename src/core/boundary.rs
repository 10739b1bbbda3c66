// ============================================================================
// Dictum - 请求边界
// ============================================================================
//
// 文件: src/core/boundary.rs
// 职责: 宿主在渲染前为每个请求执行的钩子
// 边界:
//   - ✅ 执行配置的语言设置器并记录其失败
//   - ✅ 加载解析得到的语言词典
//   - ✅ 所有页面共享的渲染上下文
//   - ❌ 不应包含解析规则（见 policy.rs）
//   - ❌ 不应包含 HTTP 处理
//
// ============================================================================

use serde::Serialize;

use crate::core::policy::{LocaleManager, LocaleSetter, RequestLocale};
use crate::core::provider::DictionaryProvider;
use crate::core::translator::{self, Count, Replacements};
use crate::models::config::Config;
use crate::models::dictionary::Dictionary;
use crate::models::locale::Locale;

/// 附加到每个渲染页面的数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderContext {
    pub locale: Locale,
    pub dictionary: Dictionary,
}

impl RenderContext {
    pub fn translate(&self, key: &str, replacements: impl Into<Replacements>) -> String {
        translator::translate(key, replacements, &self.dictionary)
    }

    pub fn translate_plural(
        &self,
        key: &str,
        count: impl Into<Count>,
        replacements: impl Into<Replacements>,
    ) -> String {
        translator::translate_plural(key, count, replacements, &self.dictionary)
    }
}

/// 语言解析和词典加载，启动时装配一次
pub struct RequestLocalizer {
    manager: LocaleManager,
    setter: Option<Box<dyn LocaleSetter>>,
    provider: DictionaryProvider,
}

impl RequestLocalizer {
    pub fn new(
        manager: LocaleManager,
        setter: Option<Box<dyn LocaleSetter>>,
        provider: DictionaryProvider,
    ) -> Self {
        Self {
            manager,
            setter,
            provider,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let manager = LocaleManager::new(config.locales.clone())
            .with_user_locale_property(config.locale_setter.user_locale_property.clone());
        Self::new(
            manager,
            config.locale_setter.build(),
            DictionaryProvider::new(&config.paths.language_root),
        )
    }

    pub fn manager(&self) -> &LocaleManager {
        &self.manager
    }

    pub fn provider(&self) -> &DictionaryProvider {
        &self.provider
    }

    /// 解析请求语言，然后加载其词典。
    ///
    /// 解析失败只记录日志，`request.current` 保持不变。
    pub fn prepare(&self, request: &mut RequestLocale<'_>) -> RenderContext {
        if let Some(setter) = &self.setter {
            let prior = request.current.clone();
            match setter.resolve_and_apply(&self.manager, request) {
                Ok(Some(locale)) => {
                    tracing::debug!(setter = setter.name(), locale = %locale, "locale applied")
                }
                Ok(None) => {
                    tracing::debug!(setter = setter.name(), locale = %request.current, "no valid locale candidate")
                }
                Err(e) => {
                    request.current = prior;
                    tracing::warn!(setter = setter.name(), error = %e, locale = %request.current, "locale resolution failed")
                }
            }
        }

        RenderContext {
            locale: request.current.clone(),
            dictionary: self.provider.load(&request.current),
        }
    }
}
