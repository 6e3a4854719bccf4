//! 文件夹归档导出
//!
//! 将共享根目录下的任意子树打包为一个 ZIP 字节流（deflate 压缩），
//! 可被任何标准 ZIP 工具打开。归档在内存中暂存，所有退出路径上
//! 缓冲区随作用域释放，不产生临时文件。
//!
//! # 安全性
//!
//! 目标路径在打包前经过收容检查：解析后逃出共享根目录的请求
//! 与目标不存在一样返回 [`ShareError::NotFound`]。

use log::{debug, warn};
use std::fs::File;
use std::io::Cursor;
use std::path::PathBuf;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, ShareError};
use crate::paths::{self, display_name};

/// 子树归档导出器
pub struct ArchiveExporter {
    root: PathBuf,
}

impl ArchiveExporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 建议的下载文件名：`<目录名>.zip`
    pub fn download_name(folder: &str) -> String {
        let base = folder.trim_end_matches('/').rsplit('/').next().unwrap_or(folder);
        format!("{base}.zip")
    }

    /// 把 `folder`（相对根目录）的内容打包为 ZIP 字节流
    ///
    /// 归档内部路径相对 `folder` 本身，没有额外的包装目录层；
    /// 空子目录保留为目录条目。目标不存在、不是目录或越界时
    /// 返回 [`ShareError::NotFound`]。单个不可读的子路径跳过，
    /// 不会让整次打包失败。
    pub fn pack(&self, folder: &str) -> Result<Vec<u8>> {
        let target = paths::resolve_existing(&self.root, folder)?;
        if !target.is_dir() {
            return Err(ShareError::NotFound);
        }

        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

            for dent in WalkDir::new(&target).min_depth(1).follow_links(false) {
                let dent = match dent {
                    Ok(d) => d,
                    Err(e) => {
                        warn!("Skipping unreadable path while packing: {}", e);
                        continue;
                    }
                };
                let rel = match dent.path().strip_prefix(&target) {
                    Ok(r) => r,
                    Err(_) => continue,
                };
                let entry_name = display_name(rel);

                if dent.file_type().is_dir() {
                    zip.add_directory(format!("{entry_name}/"), options)?;
                } else if dent.file_type().is_file() {
                    zip.start_file(&entry_name, options)?;
                    let mut file = File::open(dent.path())?;
                    std::io::copy(&mut file, &mut zip)?;
                }
            }

            zip.finish()?;
        }

        debug!("Packed {}: {} bytes", folder, buffer.len());
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_name() {
        assert_eq!(ArchiveExporter::download_name("photos"), "photos.zip");
        assert_eq!(ArchiveExporter::download_name("a/b/photos"), "photos.zip");
        assert_eq!(ArchiveExporter::download_name("photos/"), "photos.zip");
    }
}
