//! 共享笔记
//!
//! 单一共享文本文件的读写。不做并发控制：同时写入时最后写入者
//! 获胜，这是该功能接受的行为而非缺陷。

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// 共享笔记存储
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    pub fn new(root: &Path, file_name: &str) -> Self {
        Self {
            path: root.join(file_name),
        }
    }

    /// 读取笔记内容；文件不存在视为空笔记而非错误
    pub fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入笔记，统一行尾为 `\n`，整体覆盖旧内容
    pub fn write(&self, text: &str) -> Result<()> {
        let normalized = text.replace("\r\n", "\n");
        fs::write(&self.path, normalized)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_note_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = NoteStore::new(dir.path(), "notes.txt");
        assert_eq!(store.read().unwrap(), "");
    }

    #[test]
    fn test_write_normalizes_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let store = NoteStore::new(dir.path(), "notes.txt");

        store.write("line1\r\nline2").unwrap();
        assert_eq!(store.read().unwrap(), "line1\nline2");
    }

    #[test]
    fn test_write_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = NoteStore::new(dir.path(), "notes.txt");

        store.write("a much longer first note").unwrap();
        store.write("short").unwrap();
        assert_eq!(store.read().unwrap(), "short");
    }
}
