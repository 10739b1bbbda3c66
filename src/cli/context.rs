// ============================================================================
// Dictum - CLI Context 命令
// ============================================================================
//
// 文件: src/cli/context.rs
// 职责: 模拟一次请求经过语言边界
// 边界:
//   - ✅ 根据参数构造内存会话和身份
//   - ✅ 以 JSON 输出渲染上下文
//   - ❌ 不应包含语言解析逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::core::boundary::RequestLocalizer;
use crate::core::policy::{MemorySession, RequestLocale, StaticIdentity};
use crate::models::config::{Config, ConfigDefaults};
use crate::tf;
use crate::utils::logger::Logger;

/// 解析模拟请求的语言并输出其渲染上下文
#[derive(Debug, Args)]
pub struct ContextArgs {
    /// 会话中保存的语言
    #[arg(long, value_name = "CODE")]
    pub session_locale: Option<String>,

    /// 已登录用户的语言，省略则视为访客请求
    #[arg(long, value_name = "CODE")]
    pub user_locale: Option<String>,
}

pub fn handle_context(args: ContextArgs) -> Result<()> {
    let config = Config::current()?;
    let localizer = RequestLocalizer::from_config(&config);

    let mut session = args
        .session_locale
        .map(MemorySession::with_locale)
        .unwrap_or_default();

    let property = config
        .locale_setter
        .user_locale_property
        .clone()
        .or_else(Config::default_user_locale_property)
        .unwrap_or_default();
    let identity = args
        .user_locale
        .map(|locale| StaticIdentity::new().with_attribute(property, locale));

    let mut request = RequestLocale::new(config.locales.default.clone(), &mut session);
    if let Some(identity) = &identity {
        request = request.with_identity(identity);
    }

    let context = localizer.prepare(&mut request);
    Logger::info(tf!("context.resolved", locale = context.locale));
    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}
