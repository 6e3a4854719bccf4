//! Lanshare Core Library
//!
//! 局域网文件共享守护进程的核心实现库。
//!
//! # 模块
//!
//! - **catalog**: 目录索引（Top / Flat 视图）与排序策略
//! - **archive**: 子树 ZIP 归档导出
//! - **notes**: 共享文本笔记
//! - **index**: 组合根（列表 + 上传放置）
//! - **paths**: 客户端相对路径的收容检查
//!
//! 文件系统本身即是唯一数据源：每次列表请求都重新遍历目录树，
//! 不做任何跨请求缓存，也不维护共享可变状态。
//!
//! # 使用示例
//!
//! ```ignore
//! use lanshare_core::{Indexer, ShareConfig, SortKey, ViewMode};
//!
//! let config = ShareConfig::new("uploads", "notes.txt", 8000)?;
//! let indexer = Indexer::new(config);
//!
//! // 扫描并排序，交给展示层渲染
//! let entries = indexer.list(ViewMode::Top, SortKey::TimeDescending)?;
//! ```

pub mod archive;
pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod notes;
pub mod paths;

// Catalog re-exports
pub use catalog::{Entry, EntryKind, PathCatalog, SortKey, ViewMode, sort_entries};

// Archive re-exports
pub use archive::ArchiveExporter;

// Config re-exports
pub use config::{Settings, ShareConfig};

// Error re-exports
pub use error::{Result, ShareError};

// Composition root re-exports
pub use index::Indexer;
pub use notes::NoteStore;
