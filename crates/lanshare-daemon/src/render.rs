//! 索引页渲染
//!
//! 把目录条目注入内嵌的 HTML 模板（占位符替换）。展示层不做任何
//! 文件系统访问，只消费一次扫描的结果。

use lanshare_core::{Entry, EntryKind, SortKey, ViewMode};

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// 字节数转人类可读字符串
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} PB")
}

/// 渲染索引页
///
/// 文件夹条目链接到归档导出，文件条目链接到直接下载；
/// 当前的排序和视图选择回填进模板供页面恢复选中状态。
pub fn index_page(entries: &[Entry], note_file: &str, sort: SortKey, mode: ViewMode) -> String {
    let mut links = String::new();
    for entry in entries {
        let icon = match entry.kind {
            EntryKind::Folder => "📁",
            EntryKind::File => "📄",
            EntryKind::NestedFile => "📂📄",
        };
        let href = match entry.kind {
            EntryKind::Folder => format!("/download_folder/{}", entry.name),
            _ => format!("/files/{}", entry.name),
        };
        links.push_str(&format!(
            "<a href=\"{href}\" class=\"list-group-item list-group-item-action\">{icon} {name} <span class=\"file-size\">({size})</span></a>",
            name = entry.name,
            size = human_size(entry.size_bytes),
        ));
    }

    let links_or_warning = if entries.is_empty() {
        "<i>No files yet.</i>".to_string()
    } else {
        links
    };

    INDEX_TEMPLATE
        .replace("{{ LINKS_PLACEHOLDER }}", &links_or_warning)
        .replace("{{ NOTES_FILE_PLACEHOLDER }}", note_file)
        .replace("{{ SORT_SELECTED_PLACEHOLDER }}", sort.query_value())
        .replace("{{ MODE_SELECTED_PLACEHOLDER }}", mode.query_value())
}
