//! Lanshare Daemon
//!
//! 局域网文件共享守护进程，负责：
//! - HTTP 索引页（排序 / 视图切换）
//! - 文件上传与下载
//! - 文件夹 ZIP 归档导出
//! - 共享文本笔记

mod netinfo;
mod render;
mod server;

use anyhow::Result;
use clap::Parser;
use lanshare_core::{Settings, ShareConfig};
use tracing_subscriber::EnvFilter;

/// 局域网文件共享 - 上传/下载/共享笔记
#[derive(Parser)]
#[command(name = "lanshare", version, about = "局域网文件共享 - 上传/下载/共享笔记")]
struct Cli {
    /// 共享目录（默认取设置文件中的值）
    folder: Option<String>,

    /// 共享笔记文件名
    #[arg(long)]
    notes: Option<String>,

    /// HTTP 监听端口
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 桥接 log crate（lanshare-core 使用）到 tracing
    let _ = tracing_log::LogTracer::init();

    // 初始化日志
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,lanshare_core=debug")),
        )
        .try_init();

    let cli = Cli::parse();
    let settings = Settings::load();

    let folder = cli
        .folder
        .unwrap_or_else(|| settings.share_dir.to_string_lossy().into_owned());
    let notes = cli.notes.unwrap_or(settings.note_file);
    let port = cli.port.unwrap_or(settings.port);

    let config = ShareConfig::new(folder, notes, port)?;

    let device = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "lanshare".to_string());

    println!("📂 Serving folder: {}", config.root.display());
    println!("📝 Shared notes file: {}", config.note_file);
    println!("🖥️  Device: {}", device);
    println!("🌐 Open in browser: http://{}:{}", netinfo::local_ip(), config.port);

    server::run(config).await
}
