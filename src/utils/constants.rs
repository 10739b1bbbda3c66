// ============================================================================
// Dictum - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用常量定义
// 边界:
//   - ✅ 应用名称和控制台图标
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 控制台标签中显示的应用名称
pub const APP_NAME: &str = "DICTUM";

/// 控制台图标
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "!";
    pub const ARROW: &str = "→";
    /// 语言列表中的语言标记
    pub const LOCALE: &str = "●";
    /// 缺失编译文件的标记
    pub const SKIP: &str = "○";
}
