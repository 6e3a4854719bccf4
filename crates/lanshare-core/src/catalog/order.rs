//! 排序策略
//!
//! 条目的全序比较器族，按键（名称 / 时间 / 尺寸）和方向选择。
//! 全部基于标准库的稳定排序：相等键的条目保持扫描时的相对顺序。

use std::str::FromStr;

use super::Entry;

/// 排序键
///
/// 默认最新优先，与浏览界面的预期一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    NameAscending,
    NameDescending,
    TimeAscending,
    #[default]
    TimeDescending,
    SizeAscending,
    SizeDescending,
}

impl SortKey {
    /// 对应的查询参数值
    pub fn query_value(&self) -> &'static str {
        match self {
            SortKey::NameAscending => "az",
            SortKey::NameDescending => "za",
            SortKey::TimeAscending => "oldest",
            SortKey::TimeDescending => "newest",
            SortKey::SizeAscending => "size_asc",
            SortKey::SizeDescending => "size_desc",
        }
    }
}

impl FromStr for SortKey {
    type Err = ();

    /// 宽容解析：未知键回退到默认（最新优先）而不是让请求失败
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "az" => SortKey::NameAscending,
            "za" => SortKey::NameDescending,
            "oldest" => SortKey::TimeAscending,
            "newest" => SortKey::TimeDescending,
            "size_asc" => SortKey::SizeAscending,
            "size_desc" => SortKey::SizeDescending,
            _ => SortKey::default(),
        })
    }
}

/// 按给定键对条目做稳定排序
///
/// 名称比较对大小写不敏感；时间和尺寸按数值比较。
pub fn sort_entries(entries: &mut [Entry], key: SortKey) {
    match key {
        SortKey::NameAscending => {
            entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortKey::NameDescending => {
            entries.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()));
        }
        SortKey::TimeAscending => {
            entries.sort_by(|a, b| a.modified_at.cmp(&b.modified_at));
        }
        SortKey::TimeDescending => {
            entries.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        }
        SortKey::SizeAscending => {
            entries.sort_by(|a, b| a.size_bytes.cmp(&b.size_bytes));
        }
        SortKey::SizeDescending => {
            entries.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntryKind;

    fn entry(name: &str, modified_at: u64, size_bytes: u64) -> Entry {
        Entry {
            name: name.to_string(),
            kind: EntryKind::File,
            modified_at,
            size_bytes,
        }
    }

    #[test]
    fn test_sort_key_tolerant_parsing() {
        assert_eq!("az".parse::<SortKey>().unwrap(), SortKey::NameAscending);
        assert_eq!("za".parse::<SortKey>().unwrap(), SortKey::NameDescending);
        assert_eq!("oldest".parse::<SortKey>().unwrap(), SortKey::TimeAscending);
        assert_eq!("newest".parse::<SortKey>().unwrap(), SortKey::TimeDescending);
        assert_eq!("size_asc".parse::<SortKey>().unwrap(), SortKey::SizeAscending);
        assert_eq!("size_desc".parse::<SortKey>().unwrap(), SortKey::SizeDescending);
        // 未知键回退到默认
        assert_eq!("bogus".parse::<SortKey>().unwrap(), SortKey::TimeDescending);
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::TimeDescending);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let mut entries = vec![entry("Zeta", 0, 0), entry("alpha", 0, 0), entry("Beta", 0, 0)];
        sort_entries(&mut entries, SortKey::NameAscending);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn test_sort_is_stable_under_ties() {
        // 三个同尺寸条目，排序后应保持原有相对顺序
        let mut entries = vec![
            entry("first", 3, 100),
            entry("second", 1, 100),
            entry("third", 2, 100),
        ];
        sort_entries(&mut entries, SortKey::SizeAscending);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut entries = vec![
            entry("a", 5, 10),
            entry("b", 3, 30),
            entry("c", 5, 20),
            entry("d", 1, 40),
        ];
        sort_entries(&mut entries, SortKey::TimeDescending);
        let once = entries.clone();
        sort_entries(&mut entries, SortKey::TimeDescending);
        assert_eq!(entries, once);
    }

    #[test]
    fn test_descending_orders() {
        let mut entries = vec![entry("a", 1, 10), entry("b", 2, 20), entry("c", 3, 30)];
        sort_entries(&mut entries, SortKey::SizeDescending);
        let sizes: Vec<u64> = entries.iter().map(|e| e.size_bytes).collect();
        assert_eq!(sizes, vec![30, 20, 10]);

        sort_entries(&mut entries, SortKey::TimeAscending);
        let times: Vec<u64> = entries.iter().map(|e| e.modified_at).collect();
        assert_eq!(times, vec![1, 2, 3]);
    }
}
