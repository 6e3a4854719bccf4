//! 组合根
//!
//! 把目录扫描、排序与上传放置组合为展示层需要的入口。
//! 持有启动时构造的不可变配置，自身无任何可变状态。

use log::info;
use std::fs;
use std::path::PathBuf;

use crate::catalog::{Entry, PathCatalog, SortKey, ViewMode, sort_entries};
use crate::config::ShareConfig;
use crate::error::{Result, ShareError};
use crate::paths;

/// 列表与上传的组合根
pub struct Indexer {
    config: ShareConfig,
    catalog: PathCatalog,
}

impl Indexer {
    pub fn new(config: ShareConfig) -> Self {
        let catalog = PathCatalog::new(config.root.clone());
        Self { config, catalog }
    }

    pub fn config(&self) -> &ShareConfig {
        &self.config
    }

    /// 扫描并排序，供展示层渲染
    pub fn list(&self, mode: ViewMode, key: SortKey) -> Result<Vec<Entry>> {
        let mut entries = self.catalog.scan(mode)?;
        sort_entries(&mut entries, key);
        Ok(entries)
    }

    /// 解析一个用于下载的已有文件路径
    ///
    /// 越界或不存在都返回 [`ShareError::NotFound`]。
    pub fn resolve_file(&self, relative: &str) -> Result<PathBuf> {
        let path = paths::resolve_existing(&self.config.root, relative)?;
        if !path.is_file() {
            return Err(ShareError::NotFound);
        }
        Ok(path)
    }

    /// 上传放置：把客户端相对路径落盘到根目录之下
    ///
    /// 相对路径可以携带子目录段，缺失的中间目录会被创建。
    /// 空文件名跳过（返回 `None`），不视为整批失败；重名文件
    /// 最后写入者获胜。收容检查在任何目录创建或写入之前完成。
    pub fn place(&self, uploaded_name: &str, content: &[u8]) -> Result<Option<PathBuf>> {
        if uploaded_name.is_empty() {
            return Ok(None);
        }

        // 词法检查：拒绝 `..`、绝对路径等越界成分
        let dest = paths::resolve_under(&self.config.root, uploaded_name)?;
        let file_name = dest.file_name().ok_or(ShareError::NotFound)?.to_owned();
        let parent = dest.parent().ok_or(ShareError::NotFound)?.to_path_buf();

        // 创建任何目录之前，先对 parent 最深的已存在祖先做符号链接
        // 感知的收容验证：根目录内指向外部的符号链接不能作为落盘起点
        let mut existing = parent.as_path();
        while !existing.exists() {
            existing = existing.parent().ok_or(ShareError::NotFound)?;
        }
        paths::verify_contained(&self.config.root, existing)?;

        fs::create_dir_all(&parent)?;

        // 目录落盘后对完整父路径再验证一次
        let parent = paths::verify_contained(&self.config.root, &parent)?;
        let stored = parent.join(file_name);
        fs::write(&stored, content)?;

        info!("Stored upload: {}", stored.display());
        Ok(Some(stored))
    }
}
