//! Directory listing entries.

use serde::{Deserialize, Serialize};

/// Entry type as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// One entry of a directory listing.
///
/// Entries are snapshots of what the server returned; the client never edits
/// one in place, it replaces the whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Entry name (last path component)
    pub name: String,
    /// Absolute path of the entry
    pub path: String,
    /// File or directory
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Size in bytes (0 for directories)
    #[serde(default)]
    pub size: u64,
    /// Inline content, when the server sends it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileEntry {
    /// Build a file entry.
    pub fn file(name: impl Into<String>, path: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            entry_type: EntryType::File,
            size,
            content: None,
        }
    }

    /// Build a directory entry.
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            entry_type: EntryType::Directory,
            size: 0,
            content: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_directory(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    /// Size for display; directories show nothing.
    pub fn display_size(&self) -> Option<String> {
        self.is_file().then(|| format_size(self.size))
    }
}

/// Human-readable size: `0 B`, `512 B`, `1.5 KB`, `2.25 MB`, ...
///
/// Rounded to at most two decimals, trailing zeros dropped.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    let mut text = format!("{:.2}", rounded);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{} {}", text, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_format() {
        let entry: FileEntry = serde_json::from_str(
            r#"{"name":"docs","type":"directory","size":0,"path":"/docs"}"#,
        )
        .unwrap();
        assert!(entry.is_directory());
        assert!(!entry.is_file());
        assert_eq!(entry, FileEntry::directory("docs", "/docs"));

        let json = serde_json::to_value(FileEntry::file("a.txt", "/a.txt", 3)).unwrap();
        assert_eq!(json["type"], "file");
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_missing_size_defaults_to_zero() {
        let entry: FileEntry =
            serde_json::from_str(r#"{"name":"a","type":"file","path":"/a"}"#).unwrap();
        assert_eq!(entry.size, 0);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(2_359_296), "2.25 MB");
        assert_eq!(format_size(5 * 1_073_741_824), "5 GB");
        assert_eq!(format_size(3 * 1_099_511_627_776), "3072 GB");
    }

    #[test]
    fn test_display_size_only_for_files() {
        assert_eq!(FileEntry::file("a", "/a", 2048).display_size().as_deref(), Some("2 KB"));
        assert_eq!(FileEntry::directory("d", "/d").display_size(), None);
    }
}
