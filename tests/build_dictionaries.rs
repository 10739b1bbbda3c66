//! 将语言目录合并为编译词典的端到端测试。

use std::fs;
use std::path::Path;

use dictum::core::builder::DictionaryBuilder;
use dictum::core::error::BuildError;
use dictum::core::provider::DictionaryProvider;
use dictum::core::translator::translate;
use dictum::models::locale::Locale;
use rstest::{fixture, rstest};
use serde_json::{json, Value};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[fixture]
fn language_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "en/auth/login.php",
        r#"<?php

return [
    'title' => 'Sign in',
    'failed' => 'These credentials do not match our records.',
    'welcome' => 'Welcome back, :name',
];
"#,
    );
    write(
        root,
        "en/menu.php",
        "<?php return array('items' => '{0} Nothing|{1} One item|[2-*] :count items');",
    );
    write(root, "de/auth/login.php", "<?php return ['title' => 'Anmelden'];");
    write(root, "de/readme.md", "not a translation source");

    dir
}

#[rstest]
fn nested_sources_land_at_their_dotted_path(language_root: TempDir) {
    let report = DictionaryBuilder::new(language_root.path()).build(&[]).unwrap();

    let built: Vec<_> = report.locales.iter().map(|b| b.locale.to_string()).collect();
    assert_eq!(built, vec!["de", "en"]);

    let english = read_json(&language_root.path().join("_en.json"));
    assert_eq!(english["auth"]["login"]["title"], json!("Sign in"));
    assert_eq!(
        english["menu"]["items"],
        json!("{0} Nothing|{1} One item|[2-*] :count items")
    );

    let german = read_json(&language_root.path().join("_de.json"));
    assert_eq!(german, json!({"auth": {"login": {"title": "Anmelden"}}}));
}

#[rstest]
fn rebuilding_unchanged_sources_is_byte_identical(language_root: TempDir) {
    let builder = DictionaryBuilder::new(language_root.path()).with_pretty(true);
    let output = language_root.path().join("_en.json");

    builder.build(&[]).unwrap();
    let first = fs::read(&output).unwrap();
    builder.build(&[]).unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[rstest]
fn report_lists_compiled_files_with_sizes(language_root: TempDir) {
    let report = DictionaryBuilder::new(language_root.path()).build(&[]).unwrap();

    let names: Vec<_> = report.compiled.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["_de.json", "_en.json"]);
    assert!(report.compiled.iter().all(|f| f.size > 0));
    assert!(report.compiled[0].human_size().ends_with(" B"));
}

#[rstest]
fn requested_locale_without_folder_is_written_empty(language_root: TempDir) {
    let report = DictionaryBuilder::new(language_root.path())
        .build(&[Locale::from("fr")])
        .unwrap();

    assert_eq!(report.locales.len(), 1);
    assert_eq!(report.locales[0].sources, 0);
    assert_eq!(
        fs::read_to_string(language_root.path().join("_fr.json")).unwrap(),
        "{}"
    );
    assert!(!language_root.path().join("_en.json").exists());
}

#[test]
fn missing_language_root_fails_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("lang");

    let error = DictionaryBuilder::new(&root).build(&[]).unwrap_err();

    assert!(matches!(error, BuildError::LanguageRootNotFound(ref path) if path == &root));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[rstest]
fn unparsable_source_names_the_file(language_root: TempDir) {
    write(language_root.path(), "en/broken.php", "<?php return ['a' => ;");

    let error = DictionaryBuilder::new(language_root.path())
        .build(&[])
        .unwrap_err();

    assert!(matches!(error, BuildError::Parse { .. }));
    assert!(error.to_string().contains("broken.php"));
}

#[rstest]
fn later_file_in_path_order_wins_on_overlap(language_root: TempDir) {
    // `auth/login.php` 排在 `auth.php` 之前，因此单文件会覆盖目录中的内容
    write(language_root.path(), "en/auth.php", "<?php return ['logout' => 'Sign out'];");

    let builder = DictionaryBuilder::new(language_root.path());
    let keys: Vec<_> = builder
        .source_files(&Locale::from("en"))
        .unwrap()
        .into_iter()
        .map(|source| source.key)
        .collect();
    assert_eq!(keys, vec!["auth.login", "auth", "menu"]);

    builder.build(&[Locale::from("en")]).unwrap();

    let english = read_json(&language_root.path().join("_en.json"));
    assert_eq!(english["auth"], json!({"logout": "Sign out"}));
    assert!(english["auth"].get("login").is_none());
}

#[rstest]
fn configured_extensions_mix_formats(language_root: TempDir) {
    write(language_root.path(), "en/validation.json", r#"{"required": "Required"}"#);
    write(language_root.path(), "en/pages/home.yaml", "title: Home\n");
    write(language_root.path(), "en/pages/about.toml", "title = \"About\"\n");

    DictionaryBuilder::new(language_root.path())
        .with_extensions(["php", "json", "yaml", "toml"])
        .build(&[Locale::from("en")])
        .unwrap();

    let english = read_json(&language_root.path().join("_en.json"));
    assert_eq!(english["validation"]["required"], json!("Required"));
    assert_eq!(english["pages"]["home"]["title"], json!("Home"));
    assert_eq!(english["pages"]["about"]["title"], json!("About"));
}

#[rstest]
fn compiled_dictionary_feeds_the_translator(language_root: TempDir) {
    DictionaryBuilder::new(language_root.path()).build(&[]).unwrap();
    let dictionary = DictionaryProvider::new(language_root.path()).load(&Locale::from("en"));

    assert_eq!(
        translate("auth.login.welcome", [("name", "Ana")], &dictionary),
        "Welcome back, Ana"
    );
    assert_eq!(translate("auth.login.missing", (), &dictionary), "auth.login.missing");
}
