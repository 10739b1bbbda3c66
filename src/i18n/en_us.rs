// ============================================================================
// Dictum - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English CLI messages definition
// 边界:
//   - ✅ English translation strings definition
//   - ✅ Translation key-value pairs maintenance
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Merge command
    ("merge.start", "Merging language files..."),
    (
        "merge.locale",
        "{0} Merged locale :locale (no source files)|{1} Merged locale :locale (1 source file)|[2-*] Merged locale :locale (:count source files)",
    ),
    ("merge.compiled_header", "Compiled language files:"),
    ("merge.compiled_file", ":name - :size"),
    ("merge.done", "Done in :ms ms!"),
    (
        "merge.root_missing",
        "Language folder not found at :path. Create it with one folder per locale, e.g. :path/en/auth.php",
    ),
    // Watch command
    ("watch.start", "Watching for changes in :path..."),
    ("watch.added", "File :path has been added"),
    ("watch.modified", "File :path has been changed"),
    ("watch.removed", "File :path has been removed"),
    ("watch.failed", "Build failed: :error"),
    ("watch.stopped", "Stopped watching."),
    // Translate command
    ("translate.missing", "No translation for :key in locale :locale"),
    (
        "translate.invalid_replacement",
        "Invalid replacement `:value`, expected name=value",
    ),
    // Locales command
    ("locales.header", "Configured locales (locale setter: :setter)"),
    ("locales.default", "default"),
    ("locales.fallback", "fallback"),
    ("locales.compiled", "compiled, :size"),
    ("locales.not_compiled", "not compiled"),
    (
        "locales.unlisted",
        "Folder :locale has sources but is not an available locale",
    ),
    // Context command
    ("context.resolved", "Resolved locale :locale"),
];
