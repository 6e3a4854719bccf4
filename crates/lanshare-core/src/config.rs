//! 应用配置
//!
//! 提供共享目录、笔记文件名、监听端口等默认设置的读取。
//! 运行期配置 [`ShareConfig`] 在启动时构造一次，之后不可变，
//! 以参数传递给各组件，不存在全局可变状态。

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::Result;

/// 运行期配置
///
/// 启动时由 CLI 参数与持久化设置合并而成，进程生命周期内固定。
#[derive(Debug, Clone)]
pub struct ShareConfig {
    /// 共享根目录（绝对路径，已规范化）
    pub root: PathBuf,
    /// 共享笔记文件名（相对根目录）
    pub note_file: String,
    /// HTTP 监听端口
    pub port: u16,
}

impl ShareConfig {
    /// 创建运行期配置
    ///
    /// 共享目录不存在时自动创建，并解析为规范化绝对路径，
    /// 之后所有收容检查都以该路径为边界。
    pub fn new(root: impl Into<PathBuf>, note_file: impl Into<String>, port: u16) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let root = root.canonicalize()?;
        Ok(Self {
            root,
            note_file: note_file.into(),
            port,
        })
    }
}

/// 持久化设置（`settings.toml`，手工编辑）
///
/// CLI 未显式给出的参数从这里取默认值。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// 默认共享目录
    pub share_dir: PathBuf,
    /// 默认笔记文件名
    pub note_file: String,
    /// 默认监听端口
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            share_dir: PathBuf::from("uploads"),
            note_file: "notes.txt".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// 获取配置文件路径
    fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lanshare");
        config_dir.join("settings.toml")
    }

    /// 加载设置（如果文件不存在则使用默认值）
    pub fn load() -> Self {
        let path = Self::config_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(settings) => {
                        debug!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        log::warn!("Failed to parse settings: {}, using defaults", e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read settings file: {}, using defaults", e);
                }
            }
        }
        Self::default()
    }
}
