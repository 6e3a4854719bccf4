//! 路径收容检查
//!
//! 所有客户端提供的相对路径在触碰文件系统之前都要经过本模块：
//! 先做词法检查（拒绝 `..`、绝对路径等越界成分），再在目标已存在时
//! 做符号链接感知的规范化验证。越界尝试一律映射为
//! [`ShareError::NotFound`]，与目标不存在不可区分。

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, ShareError};

/// 将客户端提供的相对路径词法解析到根目录之下
///
/// 拒绝绝对路径和包含 `..` 的路径；目标可以尚不存在（用于上传）。
pub fn resolve_under(root: &Path, relative: &str) -> Result<PathBuf> {
    let mut out = root.to_path_buf();
    for comp in Path::new(relative).components() {
        match comp {
            Component::Normal(seg) => out.push(seg),
            Component::CurDir => {}
            // `..`、根、盘符前缀都可以把结果带出共享根目录
            _ => return Err(ShareError::NotFound),
        }
    }
    Ok(out)
}

/// 规范化 `path` 并验证其仍位于 `root` 之内
///
/// 要求 `path` 已存在；穿过符号链接逃出根目录的情况在这里被拦截。
pub fn verify_contained(root: &Path, path: &Path) -> Result<PathBuf> {
    let canonical_root = root.canonicalize().map_err(|_| ShareError::NotFound)?;
    let canonical = path.canonicalize().map_err(|_| ShareError::NotFound)?;
    if !canonical.starts_with(&canonical_root) {
        return Err(ShareError::NotFound);
    }
    Ok(canonical)
}

/// 解析并验证一个已存在的客户端相对路径
pub fn resolve_existing(root: &Path, relative: &str) -> Result<PathBuf> {
    let joined = resolve_under(root, relative)?;
    verify_contained(root, &joined)
}

/// 把根目录下的相对路径转成统一使用 `/` 分隔的显示名
///
/// 与宿主平台的路径语法无关，列表和归档内部路径都用这一形式。
pub(crate) fn display_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
