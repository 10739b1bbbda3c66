// ============================================================================
// Dictum - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: 中文命令行消息
// 边界:
//   - ✅ 中文翻译字符串定义
//   - ✅ 翻译键值对维护
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含其他语言翻译
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 合并命令
    ("merge.start", "正在合并语言文件..."),
    (
        "merge.locale",
        "{0} 已合并语言 :locale（没有源文件）|[1-*] 已合并语言 :locale（:count 个源文件）",
    ),
    ("merge.compiled_header", "已编译的语言文件:"),
    ("merge.compiled_file", ":name - :size"),
    ("merge.done", "完成，用时 :ms 毫秒！"),
    (
        "merge.root_missing",
        "未找到语言目录 :path。请为每个语言创建子目录，例如 :path/en/auth.php",
    ),
    // 监听命令
    ("watch.start", "正在监听 :path 中的变更..."),
    ("watch.added", "新增文件 :path"),
    ("watch.modified", "文件 :path 已修改"),
    ("watch.removed", "文件 :path 已删除"),
    ("watch.failed", "构建失败: :error"),
    ("watch.stopped", "已停止监听。"),
    // 翻译命令
    ("translate.missing", "语言 :locale 中没有 :key 的翻译"),
    (
        "translate.invalid_replacement",
        "无效的替换参数 `:value`，应为 name=value",
    ),
    // 语言列表命令
    ("locales.header", "已配置的语言（语言设置策略: :setter）"),
    ("locales.default", "默认"),
    ("locales.fallback", "回退"),
    ("locales.compiled", "已编译，:size"),
    ("locales.not_compiled", "未编译"),
    ("locales.unlisted", "目录 :locale 包含源文件，但不在可用语言列表中"),
    // 上下文命令
    ("context.resolved", "解析得到的语言 :locale"),
];
