// ============================================================================
// Dictum - 源文件监听器
// ============================================================================
//
// 文件: src/core/watcher.rs
// 职责: 翻译源变更时重新构建词典
// 边界:
//   - ✅ 轮询源文件快照（修改时间 + 大小）
//   - ✅ 变更检测（新增 / 修改 / 删除）
//   - ✅ 支持优雅退出的重建循环
//   - ❌ 不应包含合并逻辑
//   - ❌ 不应直接输出到终端（通过回调通知调用方）
//
// ============================================================================

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

use crate::core::builder::{BuildReport, DictionaryBuilder};
use crate::core::error::BuildError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Change {
    Added(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
}

impl Change {
    pub fn path(&self) -> &Path {
        match self {
            Change::Added(path) | Change::Modified(path) | Change::Removed(path) => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

/// 某一时刻语言目录下所有源文件的状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    files: BTreeMap<PathBuf, Stamp>,
}

impl Snapshot {
    /// 语言根目录下的文件是编译产物，不参与跟踪
    pub fn capture(builder: &DictionaryBuilder) -> Self {
        let mut files = BTreeMap::new();

        for entry in WalkDir::new(builder.language_root())
            .min_depth(2)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'))
            .flatten()
        {
            if !entry.file_type().is_file() || !builder.is_recognized(entry.path()) {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            files.insert(
                entry.into_path(),
                Stamp {
                    modified: metadata.modified().ok(),
                    len: metadata.len(),
                },
            );
        }

        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// `self` 与较新快照 `newer` 之间的变更，已排序
    pub fn changes(&self, newer: &Snapshot) -> Vec<Change> {
        let mut changes = Vec::new();

        for (path, stamp) in &newer.files {
            match self.files.get(path) {
                None => changes.push(Change::Added(path.clone())),
                Some(old) if old != stamp => changes.push(Change::Modified(path.clone())),
                Some(_) => {}
            }
        }
        for path in self.files.keys() {
            if !newer.files.contains_key(path) {
                changes.push(Change::Removed(path.clone()));
            }
        }

        changes.sort();
        changes
    }
}

/// 每次构建后通知调用方的事件
pub enum WatchEvent<'a> {
    /// 开始监听时执行的构建
    Initial(&'a Result<BuildReport, BuildError>),
    Rebuilt {
        changes: &'a [Change],
        result: &'a Result<BuildReport, BuildError>,
    },
}

pub struct Watcher {
    builder: DictionaryBuilder,
    interval: Duration,
}

impl Watcher {
    /// 监听模式下总是美化输出
    pub fn new(builder: DictionaryBuilder, interval: Duration) -> Self {
        Self {
            builder: builder.with_pretty(true),
            interval,
        }
    }

    /// 先构建一次，之后每检测到变更就重新构建，直到 `shutdown` 完成。
    ///
    /// 构建失败通过 `on_event` 报告，不会停止监听。
    pub async fn run<F, H>(&self, shutdown: F, mut on_event: H)
    where
        F: Future<Output = ()>,
        H: FnMut(WatchEvent<'_>),
    {
        let initial = self.builder.build(&[]);
        on_event(WatchEvent::Initial(&initial));

        let mut snapshot = Snapshot::capture(&self.builder);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::debug!("watcher stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let current = Snapshot::capture(&self.builder);
                    let changes = snapshot.changes(&current);
                    if changes.is_empty() {
                        continue;
                    }

                    tracing::debug!(count = changes.len(), "source files changed");
                    let result = self.builder.build(&[]);
                    on_event(WatchEvent::Rebuilt { changes: &changes, result: &result });
                    snapshot = current;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tokio::sync::Notify;

    fn setup() -> (TempDir, DictionaryBuilder) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("en/auth")).unwrap();
        fs::write(dir.path().join("en/auth/login.php"), "<?php return ['a' => 'b'];").unwrap();
        let builder = DictionaryBuilder::new(dir.path());
        (dir, builder)
    }

    #[test]
    fn snapshot_tracks_sources_but_not_outputs() {
        let (dir, builder) = setup();
        fs::write(dir.path().join("_en.json"), "{}").unwrap();
        fs::write(dir.path().join("en/notes.txt"), "ignored").unwrap();
        fs::create_dir_all(dir.path().join("en/.git")).unwrap();
        fs::write(dir.path().join("en/.git/x.php"), "<?php return [];").unwrap();

        assert_eq!(Snapshot::capture(&builder).len(), 1);
    }

    #[test]
    fn detects_added_modified_and_removed_files() {
        let (dir, builder) = setup();
        let before = Snapshot::capture(&builder);

        fs::write(
            dir.path().join("en/auth/login.php"),
            "<?php return ['a' => 'changed'];",
        )
        .unwrap();
        fs::write(dir.path().join("en/menu.php"), "<?php return [];").unwrap();
        let middle = Snapshot::capture(&builder);

        let changes = before.changes(&middle);
        assert!(changes.contains(&Change::Added(dir.path().join("en/menu.php"))));
        assert!(changes.contains(&Change::Modified(dir.path().join("en/auth/login.php"))));

        fs::remove_file(dir.path().join("en/menu.php")).unwrap();
        let after = Snapshot::capture(&builder);
        assert_eq!(
            middle.changes(&after),
            vec![Change::Removed(dir.path().join("en/menu.php"))]
        );
    }

    #[tokio::test]
    async fn runs_initial_build_and_stops_on_shutdown() {
        let (dir, builder) = setup();
        let watcher = Watcher::new(builder, Duration::from_millis(10));
        let mut initial_ok = false;

        watcher
            .run(std::future::ready(()), |event| {
                if let WatchEvent::Initial(result) = event {
                    initial_ok = result.is_ok();
                }
            })
            .await;

        assert!(initial_ok);
        let written = fs::read_to_string(dir.path().join("_en.json")).unwrap();
        assert!(written.contains("\n    \"auth\""));
    }

    #[tokio::test]
    async fn rebuilds_after_a_source_changes() {
        let (dir, builder) = setup();
        let source = dir.path().join("en/auth/login.php");
        let watcher = Watcher::new(builder, Duration::from_millis(10));

        let edited = source.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            // 先写临时文件再重命名，轮询不会读到写了一半的文件
            let staged = edited.with_extension("tmp");
            fs::write(&staged, "<?php return ['a' => 'rebuilt value'];").unwrap();
            fs::rename(&staged, &edited).unwrap();
        });

        let stop = Notify::new();
        let mut rebuilt = Vec::new();
        let run = watcher.run(stop.notified(), |event| {
            if let WatchEvent::Rebuilt { changes, result } = event {
                assert!(result.is_ok());
                rebuilt.extend(changes.iter().cloned());
                stop.notify_one();
            }
        });
        tokio::time::timeout(Duration::from_secs(5), run)
            .await
            .expect("watcher should stop after the first rebuild");

        assert_eq!(rebuilt, vec![Change::Modified(source)]);
        let written = fs::read_to_string(dir.path().join("_en.json")).unwrap();
        assert!(written.contains("rebuilt value"));
    }
}
