//! 目录索引
//!
//! 遍历共享根目录并产出分类、带尺寸和时间戳的条目。
//!
//! # 视图模式
//!
//! - **Top**: 只列直接子项，目录折叠为一条递归聚合尺寸的条目
//! - **Flat**: 递归列出子树中的每个文件，目录本身不产出条目
//!
//! 条目只在一次扫描内有效；扫描结果不缓存，每次请求重新遍历，
//! 以文件系统当前状态为准。

pub mod order;

pub use order::{SortKey, sort_entries};

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

use crate::error::{Result, ShareError};
use crate::paths::display_name;

/// 列表视图模式（按请求选择，不持久化）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Top,
    Flat,
}

impl ViewMode {
    /// 对应的查询参数值
    pub fn query_value(&self) -> &'static str {
        match self {
            ViewMode::Top => "top",
            ViewMode::Flat => "flat",
        }
    }
}

impl FromStr for ViewMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "flat" => Ok(ViewMode::Flat),
            // 未知值回退到 Top，宽容处理浏览器传来的参数
            _ => Ok(ViewMode::Top),
        }
    }
}

/// 条目类型
///
/// `NestedFile` 表示只有通过 Flat 视图的递归遍历才能看到的文件，
/// 即其父目录不是共享根目录本身。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    File,
    Folder,
    NestedFile,
}

/// 一次扫描产出的目录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// 相对共享根目录的显示路径（统一使用 `/` 分隔）
    pub name: String,
    pub kind: EntryKind,
    /// 底层文件系统对象的最后修改时间（Unix 秒）
    pub modified_at: u64,
    /// 文件为自身字节数；目录为子树内所有文件字节数之和
    pub size_bytes: u64,
}

/// 目录扫描器
///
/// 只读遍历，无副作用。Top 模式下每个子目录都要付出其子树规模的
/// 遍历成本来完成尺寸聚合，这是该功能固有的开销。
pub struct PathCatalog {
    root: PathBuf,
}

impl PathCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 按给定视图模式扫描根目录
    ///
    /// 根目录不存在或不是目录时返回 [`ShareError::NotADirectory`]。
    /// 个别不可读的子路径跳过并继续，不会让整次扫描失败。
    pub fn scan(&self, mode: ViewMode) -> Result<Vec<Entry>> {
        let meta = match fs::metadata(&self.root) {
            Ok(m) => m,
            // 不存在、或路径中某一段不是目录：归入 NotADirectory
            Err(e)
                if e.kind() == ErrorKind::NotFound
                    || e.kind() == ErrorKind::NotADirectory =>
            {
                return Err(ShareError::NotADirectory(self.root.clone()));
            }
            // 其余读取失败（权限拒绝等）按 IO 错误上报
            Err(e) => return Err(e.into()),
        };
        if !meta.is_dir() {
            return Err(ShareError::NotADirectory(self.root.clone()));
        }

        match mode {
            ViewMode::Top => self.scan_top(),
            ViewMode::Flat => self.scan_flat(),
        }
    }

    /// Top 视图：直接子项，目录折叠为聚合条目
    fn scan_top(&self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for dent in fs::read_dir(&self.root)? {
            let dent = match dent {
                Ok(d) => d,
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            };
            let meta = match dent.metadata() {
                Ok(m) => m,
                Err(e) => {
                    warn!("Skipping {:?}: {}", dent.file_name(), e);
                    continue;
                }
            };
            let name = dent.file_name().to_string_lossy().into_owned();

            if meta.is_dir() {
                entries.push(Entry {
                    name,
                    kind: EntryKind::Folder,
                    modified_at: mtime_secs(&meta),
                    size_bytes: subtree_size(&dent.path()),
                });
            } else if meta.is_file() {
                entries.push(Entry {
                    name,
                    kind: EntryKind::File,
                    modified_at: mtime_secs(&meta),
                    size_bytes: meta.len(),
                });
            }
            // 符号链接和其他特殊类型不进入列表
        }

        Ok(entries)
    }

    /// Flat 视图：子树中每个普通文件各产出一条
    fn scan_flat(&self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for dent in WalkDir::new(&self.root).min_depth(1).follow_links(false) {
            let dent = match dent {
                Ok(d) => d,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            if !dent.file_type().is_file() {
                continue;
            }
            let rel = match dent.path().strip_prefix(&self.root) {
                Ok(r) => r.to_path_buf(),
                Err(_) => continue,
            };
            let meta = match dent.metadata() {
                Ok(m) => m,
                Err(e) => {
                    warn!("Skipping {:?}: {}", dent.path(), e);
                    continue;
                }
            };
            let kind = if rel.components().count() > 1 {
                EntryKind::NestedFile
            } else {
                EntryKind::File
            };
            entries.push(Entry {
                name: display_name(&rel),
                kind,
                modified_at: mtime_secs(&meta),
                size_bytes: meta.len(),
            });
        }

        Ok(entries)
    }
}

/// 递归累加子树中所有文件的字节数
///
/// 只有文件叶子计入，目录自身的 inode 开销不算 —— 对应
/// “下载后占多大”的语义。不可读的子路径按跳过处理。
fn subtree_size(dir: &Path) -> u64 {
    WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

fn mtime_secs(meta: &fs::Metadata) -> u64 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_tolerant_parsing() {
        assert_eq!("flat".parse::<ViewMode>().unwrap(), ViewMode::Flat);
        assert_eq!("top".parse::<ViewMode>().unwrap(), ViewMode::Top);
        // 未知值回退到默认
        assert_eq!("bogus".parse::<ViewMode>().unwrap(), ViewMode::Top);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = Entry {
            name: "sub/b.txt".to_string(),
            kind: EntryKind::NestedFile,
            modified_at: 1000,
            size_bytes: 50,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"sizeBytes\":50"));
        assert!(json.contains("\"modifiedAt\":1000"));
        assert!(json.contains("\"nestedFile\""));
        assert!(!json.contains("size_bytes"));
    }
}
