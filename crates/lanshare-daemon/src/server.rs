//! HTTP 服务
//!
//! 路由：
//! - `GET  /`                       索引页（`sort` / `mode` 查询参数）
//! - `GET  /files/*path`            文件下载（流式）
//! - `GET  /download_folder/:name`  文件夹 ZIP 归档导出
//! - `POST /upload`                 多文件上传（multipart）
//! - `GET|POST /shared_text`        共享笔记读写
//! - `GET  /favicon.ico`            图标
//!
//! 每个请求由独立任务处理，请求之间不共享可变内存状态；
//! 扫描和归档打包在 `spawn_blocking` 上执行，不会阻塞接受循环。

use axum::{
    Form, Router,
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use lanshare_core::{
    ArchiveExporter, Indexer, NoteStore, ShareConfig, ShareError, SortKey, ViewMode,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::io::ReaderStream;
use tracing::{error, info, warn};

use crate::render;

/// 每个请求共享的只读状态
pub struct AppState {
    pub indexer: Indexer,
    pub exporter: ArchiveExporter,
    pub notes: NoteStore,
}

#[derive(Deserialize)]
pub struct IndexQuery {
    sort: Option<String>,
    mode: Option<String>,
}

#[derive(Deserialize)]
pub struct NoteForm {
    content: String,
}

/// 启动 HTTP 服务器并阻塞至退出
pub async fn run(config: ShareConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        exporter: ArchiveExporter::new(config.root.clone()),
        notes: NoteStore::new(&config.root, &config.note_file),
        indexer: Indexer::new(config.clone()),
    });

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/files/*path", get(file_handler))
        .route("/download_folder/:name", get(download_folder_handler))
        .route("/upload", post(upload_handler))
        .route("/shared_text", get(note_read_handler).post(note_write_handler))
        .route("/favicon.ico", get(favicon_handler))
        // 上传体量不设上限，与局域网共享的用途一致
        .layer(DefaultBodyLimit::disable())
        .with_state(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}

/// 索引页：扫描 + 排序 + 模板渲染
async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Response {
    // 查询参数宽容解析，未知值回退到默认而不是报错
    let sort: SortKey = query.sort.as_deref().unwrap_or("").parse().unwrap_or_default();
    let mode: ViewMode = query.mode.as_deref().unwrap_or("").parse().unwrap_or_default();

    let scan_state = state.clone();
    let scanned = tokio::task::spawn_blocking(move || scan_state.indexer.list(mode, sort)).await;

    match scanned {
        Ok(Ok(entries)) => {
            let note_file = &state.indexer.config().note_file;
            Html(render::index_page(&entries, note_file, sort, mode)).into_response()
        }
        Ok(Err(e)) => {
            error!("Listing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Listing failed").into_response()
        }
        Err(e) => {
            error!("Scan task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

/// 单文件下载：收容检查后流式返回
async fn file_handler(State(state): State<Arc<AppState>>, Path(path): Path<String>) -> Response {
    let resolved = match state.indexer.resolve_file(&path) {
        Ok(p) => p,
        Err(_) => {
            return (StatusCode::NOT_FOUND, Html("<h3>File not found</h3>")).into_response();
        }
    };

    match tokio::fs::File::open(&resolved).await {
        Ok(file) => {
            let mime = mime_guess::from_path(&resolved).first_or_octet_stream();
            let headers = [("Content-Type", mime.as_ref())];
            (headers, Body::from_stream(ReaderStream::new(file))).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, Html("<h3>File not found</h3>")).into_response(),
    }
}

/// 文件夹归档导出
///
/// 打包在阻塞线程上进行；客户端中途断开时响应体被丢弃，
/// 内存中的归档缓冲随之释放，不会留下任何临时存储。
async fn download_folder_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let pack_state = state.clone();
    let folder = name.clone();
    let packed = tokio::task::spawn_blocking(move || pack_state.exporter.pack(&folder)).await;

    match packed {
        Ok(Ok(data)) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                ArchiveExporter::download_name(&name)
            );
            let headers = [
                ("Content-Type", "application/zip"),
                ("Content-Disposition", disposition.as_str()),
            ];
            (headers, data).into_response()
        }
        Ok(Err(ShareError::NotFound)) => {
            (StatusCode::NOT_FOUND, Html("<h3>Folder not found</h3>")).into_response()
        }
        Ok(Err(e)) => {
            error!("Failed to pack {}: {}", name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create ZIP").into_response()
        }
        Err(e) => {
            error!("Pack task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

/// 多文件上传
///
/// 客户端相对路径可携带子目录段；空文件名跳过，越界路径按
/// NotFound 拒绝，单个条目的失败不影响已写入的条目。
async fn upload_handler(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed multipart body: {}", e);
                return (StatusCode::BAD_REQUEST, "Malformed upload").into_response();
            }
        };

        let name = field.file_name().unwrap_or_default().to_string();
        let data = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read upload field: {}", e);
                return (StatusCode::BAD_REQUEST, "Malformed upload").into_response();
            }
        };

        let place_state = state.clone();
        let placed =
            tokio::task::spawn_blocking(move || place_state.indexer.place(&name, &data)).await;

        match placed {
            Ok(Ok(_)) => {}
            Ok(Err(ShareError::NotFound)) => {
                return (StatusCode::NOT_FOUND, "Invalid upload path").into_response();
            }
            Ok(Err(e)) => {
                error!("Failed to store upload: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Upload failed").into_response();
            }
            Err(e) => {
                error!("Upload task failed: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response();
            }
        }
    }

    "OK".into_response()
}

/// 读取共享笔记（不存在时返回空文本）
async fn note_read_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.notes.read() {
        Ok(text) => text.into_response(),
        Err(e) => {
            error!("Failed to read note: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read note").into_response()
        }
    }
}

/// 写入共享笔记（行尾规范化，最后写入者获胜）
async fn note_write_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NoteForm>,
) -> Response {
    match state.notes.write(&form.content) {
        Ok(()) => "OK".into_response(),
        Err(e) => {
            error!("Failed to write note: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to write note").into_response()
        }
    }
}

/// 内嵌图标，避免依赖共享目录里的文件
async fn favicon_handler() -> Response {
    const FAVICON: &str = concat!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 16 16\">",
        "<text y=\"13\" font-size=\"13\">\u{1F4C2}</text>",
        "</svg>",
    );
    ([("Content-Type", "image/svg+xml")], FAVICON).into_response()
}
