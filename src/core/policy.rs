// ============================================================================
// Dictum - 语言策略
// ============================================================================
//
// 文件: src/core/policy.rs
// 职责: 决定请求使用哪种语言
// 边界:
//   - ✅ 可用语言白名单校验
//   - ✅ 将语言应用到请求和会话
//   - ✅ 回退链: 用户身份 → 会话 → 默认
//   - ✅ 启动时根据配置选择设置器变体
//   - ❌ 不应加载词典
//   - ❌ 不应吞掉错误（由请求边界处理）
//
// ============================================================================

use std::collections::HashMap;

use crate::core::error::LocaleError;
use crate::models::config::{LocaleSetterConfig, LocaleSetterKind, LocalesConfig};
use crate::models::locale::{Locale, LocaleInfo};

/// 保存语言的会话键
pub const SESSION_LOCALE_KEY: &str = "locale";

/// 对宿主会话存储的最小 get/put 访问
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocaleError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), LocaleError>;
}

/// 请求的已登录用户（如果有）
pub trait IdentityProvider {
    /// 读取指定属性，例如用户的偏好语言
    fn attribute(&self, name: &str) -> Result<Option<String>, LocaleError>;
}

/// 内存会话存储
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(locale: impl Into<String>) -> Self {
        let mut session = Self::new();
        session
            .values
            .insert(SESSION_LOCALE_KEY.to_string(), locale.into());
        session
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Result<Option<String>, LocaleError> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), LocaleError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 基于固定属性表的用户身份
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    attributes: HashMap<String, String>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl IdentityProvider for StaticIdentity {
    fn attribute(&self, name: &str) -> Result<Option<String>, LocaleError> {
        Ok(self.attributes.get(name).cloned())
    }
}

/// 在渲染流程中传递的单次请求语言状态
pub struct RequestLocale<'a> {
    pub current: Locale,
    pub session: &'a mut dyn SessionStore,
    pub identity: Option<&'a dyn IdentityProvider>,
}

impl<'a> RequestLocale<'a> {
    pub fn new(current: Locale, session: &'a mut dyn SessionStore) -> Self {
        Self {
            current,
            session,
            identity: None,
        }
    }

    pub fn with_identity(mut self, identity: &'a dyn IdentityProvider) -> Self {
        self.identity = Some(identity);
        self
    }
}

/// 可用语言白名单及请求语言状态的操作
#[derive(Debug, Clone)]
pub struct LocaleManager {
    locales: LocalesConfig,
    user_locale_property: Option<String>,
}

impl LocaleManager {
    pub fn new(locales: LocalesConfig) -> Self {
        Self {
            locales,
            user_locale_property: None,
        }
    }

    pub fn with_user_locale_property(mut self, property: Option<String>) -> Self {
        self.user_locale_property = property.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn available_locales(&self) -> &[Locale] {
        &self.locales.available
    }

    pub fn default_locale(&self) -> &Locale {
        &self.locales.default
    }

    pub fn fallback_locale(&self) -> &Locale {
        &self.locales.fallback
    }

    pub fn is_valid_locale(&self, locale: &Locale) -> bool {
        self.locales.available.contains(locale)
    }

    pub fn describe(&self, locale: &Locale) -> LocaleInfo {
        LocaleInfo {
            locale: locale.clone(),
            is_default: &self.locales.default == locale,
            is_fallback: &self.locales.fallback == locale,
            is_available: self.is_valid_locale(locale),
        }
    }

    /// 将 `locale` 应用到请求并保存到会话。
    ///
    /// 不做校验，调用方需先检查 `is_valid_locale`。
    /// 会话写入失败时请求保持当前语言。
    pub fn set_locale(
        &self,
        request: &mut RequestLocale<'_>,
        locale: &Locale,
    ) -> Result<(), LocaleError> {
        request.session.put(SESSION_LOCALE_KEY, locale.as_str())?;
        request.current = locale.clone();
        Ok(())
    }

    pub fn session_locale(
        &self,
        request: &RequestLocale<'_>,
    ) -> Result<Option<Locale>, LocaleError> {
        Ok(request.session.get(SESSION_LOCALE_KEY)?.map(Locale::from))
    }

    /// 已登录用户的语言属性（两者都配置时）
    pub fn authenticated_user_locale(
        &self,
        request: &RequestLocale<'_>,
    ) -> Result<Option<Locale>, LocaleError> {
        let (Some(identity), Some(property)) = (request.identity, &self.user_locale_property)
        else {
            return Ok(None);
        };
        Ok(identity.attribute(property)?.map(Locale::from))
    }

    /// 应用第一个非空且有效的候选语言，并返回它
    pub fn apply_first_valid(
        &self,
        request: &mut RequestLocale<'_>,
        candidates: impl IntoIterator<Item = Option<Locale>>,
    ) -> Result<Option<Locale>, LocaleError> {
        let chosen = candidates
            .into_iter()
            .flatten()
            .find(|locale| !locale.is_empty() && self.is_valid_locale(locale));

        match chosen {
            Some(locale) => {
                self.set_locale(request, &locale)?;
                Ok(Some(locale))
            }
            None => Ok(None),
        }
    }
}

/// 解析并应用单次请求语言的策略
pub trait LocaleSetter: Send + Sync {
    fn name(&self) -> &'static str;

    /// 返回应用的语言，没有合格候选时返回 `None`
    fn resolve_and_apply(
        &self,
        manager: &LocaleManager,
        request: &mut RequestLocale<'_>,
    ) -> Result<Option<Locale>, LocaleError>;
}

/// 先取会话语言，再取默认语言
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionLocaleSetter;

impl LocaleSetter for SessionLocaleSetter {
    fn name(&self) -> &'static str {
        "session"
    }

    fn resolve_and_apply(
        &self,
        manager: &LocaleManager,
        request: &mut RequestLocale<'_>,
    ) -> Result<Option<Locale>, LocaleError> {
        let candidates = [
            manager.session_locale(request)?,
            Some(manager.default_locale().clone()),
        ];
        manager.apply_first_valid(request, candidates)
    }
}

/// 先取已登录用户的语言，再取会话语言，最后取默认语言
#[derive(Debug, Clone, Copy, Default)]
pub struct UserSessionLocaleSetter;

impl LocaleSetter for UserSessionLocaleSetter {
    fn name(&self) -> &'static str {
        "user_session"
    }

    fn resolve_and_apply(
        &self,
        manager: &LocaleManager,
        request: &mut RequestLocale<'_>,
    ) -> Result<Option<Locale>, LocaleError> {
        let candidates = [
            manager.authenticated_user_locale(request)?,
            manager.session_locale(request)?,
            Some(manager.default_locale().clone()),
        ];
        manager.apply_first_valid(request, candidates)
    }
}

impl LocaleSetterKind {
    /// 创建配置的设置器，`None` 表示禁用语言解析
    pub fn build(self) -> Option<Box<dyn LocaleSetter>> {
        match self {
            LocaleSetterKind::Session => Some(Box::new(SessionLocaleSetter)),
            LocaleSetterKind::UserSession => Some(Box::new(UserSessionLocaleSetter)),
            LocaleSetterKind::None => None,
        }
    }
}

impl LocaleSetterConfig {
    pub fn build(&self) -> Option<Box<dyn LocaleSetter>> {
        self.kind.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn manager() -> LocaleManager {
        LocaleManager::new(LocalesConfig {
            available: vec!["en".into(), "de".into(), "fr".into()],
            default: "en".into(),
            fallback: "en".into(),
        })
        .with_user_locale_property(Some("language".to_string()))
    }

    fn resolve_with(
        setter: &dyn LocaleSetter,
        user: Option<&str>,
        session: Option<&str>,
    ) -> (Locale, Option<String>) {
        let manager = manager();
        let mut store = session.map(MemorySession::with_locale).unwrap_or_default();
        let identity = user
            .map(|code| StaticIdentity::new().with_attribute("language", code))
            .unwrap_or_default();

        let mut request = RequestLocale::new(Locale::from("initial"), &mut store);
        if user.is_some() {
            request = request.with_identity(&identity);
        }
        setter.resolve_and_apply(&manager, &mut request).unwrap();
        let current = request.current.clone();
        drop(request);
        (current, store.get(SESSION_LOCALE_KEY).unwrap())
    }

    #[rstest]
    #[case(Some("fr"), Some("de"), "fr")]
    #[case(None, Some("de"), "de")]
    #[case(Some("xx"), Some("de"), "de")]
    #[case(Some(""), Some("de"), "de")]
    #[case(None, None, "en")]
    #[case(Some("xx"), Some("yy"), "en")]
    fn user_session_precedence(
        #[case] user: Option<&str>,
        #[case] session: Option<&str>,
        #[case] expected: &str,
    ) {
        let (current, stored) = resolve_with(&UserSessionLocaleSetter, user, session);
        assert_eq!(current, Locale::from(expected));
        assert_eq!(stored.as_deref(), Some(expected));
    }

    #[test]
    fn session_setter_ignores_identity() {
        let (current, _) = resolve_with(&SessionLocaleSetter, Some("fr"), Some("de"));
        assert_eq!(current, Locale::from("de"));
    }

    #[test]
    fn unresolvable_chain_leaves_locale_untouched() {
        let manager = LocaleManager::new(LocalesConfig {
            available: vec!["de".into()],
            default: "en".into(),
            fallback: "en".into(),
        });
        let mut store = MemorySession::new();
        let mut request = RequestLocale::new(Locale::from("de"), &mut store);

        let applied = SessionLocaleSetter
            .resolve_and_apply(&manager, &mut request)
            .unwrap();

        assert_eq!(applied, None);
        assert_eq!(request.current, Locale::from("de"));
        drop(request);
        assert_eq!(store.get(SESSION_LOCALE_KEY).unwrap(), None);
    }

    #[test]
    fn set_locale_does_not_validate() {
        let manager = manager();
        let mut store = MemorySession::new();
        let mut request = RequestLocale::new(Locale::from("en"), &mut store);
        manager.set_locale(&mut request, &Locale::from("xx")).unwrap();
        assert_eq!(request.current, Locale::from("xx"));
    }

    struct RejectingSession;

    impl SessionStore for RejectingSession {
        fn get(&self, _key: &str) -> Result<Option<String>, LocaleError> {
            Ok(Some("de".to_string()))
        }

        fn put(&mut self, _key: &str, _value: &str) -> Result<(), LocaleError> {
            Err(LocaleError::Session("write rejected".to_string()))
        }
    }

    #[test]
    fn failed_session_write_leaves_current_locale() {
        let manager = manager();
        let mut store = RejectingSession;
        let mut request = RequestLocale::new(Locale::from("en"), &mut store);

        let result = SessionLocaleSetter.resolve_and_apply(&manager, &mut request);

        assert!(matches!(result, Err(LocaleError::Session(_))));
        assert_eq!(request.current, Locale::from("en"));
    }

    #[rstest]
    #[case("en", true)]
    #[case("de", true)]
    #[case("xx", false)]
    #[case("EN", false)]
    #[case("", false)]
    fn validity_is_membership(#[case] code: &str, #[case] valid: bool) {
        assert_eq!(manager().is_valid_locale(&Locale::from(code)), valid);
    }

    #[test]
    fn identity_without_property_is_ignored() {
        let manager = manager().with_user_locale_property(Some(" ".to_string()));
        let mut store = MemorySession::new();
        let identity = StaticIdentity::new().with_attribute("language", "fr");
        let request = RequestLocale::new(Locale::from("en"), &mut store).with_identity(&identity);
        assert_eq!(manager.authenticated_user_locale(&request).unwrap(), None);
    }

    #[test]
    fn describes_locale_attributes() {
        let info = manager().describe(&Locale::from("en"));
        assert!(info.is_default && info.is_fallback && info.is_available);
        assert!(!manager().describe(&Locale::from("xx")).is_available);
    }

    #[test]
    fn setter_kinds_build_the_matching_strategy() {
        assert_eq!(LocaleSetterKind::Session.build().map(|s| s.name()), Some("session"));
        assert_eq!(
            LocaleSetterKind::UserSession.build().map(|s| s.name()),
            Some("user_session")
        );
        assert!(LocaleSetterKind::None.build().is_none());
    }
}
