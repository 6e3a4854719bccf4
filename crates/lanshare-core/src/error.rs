//! 错误类型定义
//!
//! 核心子系统的错误分类。单个子条目的遍历失败（例如聚合尺寸时遇到
//! 不可读的子目录）按条目吸收，不会上升为这里的错误；只有主资源
//! （URL 中点名的文件/目录、归档目标、上传目标）的失败才会传播。

use std::path::PathBuf;
use thiserror::Error;

/// 核心错误分类
#[derive(Debug, Error)]
pub enum ShareError {
    /// 请求的文件或目录不存在，或解析后逃出了共享根目录。
    ///
    /// 两种情况刻意不可区分，避免向客户端泄露越权探测的结果。
    #[error("not found")]
    NotFound,

    /// 扫描目标不存在或不是目录
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// 意外的读写失败（磁盘满、权限拒绝等）
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP 归档构造失败
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, ShareError>;
