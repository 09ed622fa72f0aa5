use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Default number of days before entries are prunable.
pub const PRUNE_AGE_DAYS: i64 = 30;

/// What a recovery entry holds on to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryCategory {
    /// A collection could not be written to the store
    Write,
    /// A macro was deleted
    Delete,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Write => write!(f, "write"),
            RecoveryCategory::Delete => write!(f, "delete"),
        }
    }
}

/// One line of the recovery log.
///
/// The log is JSON Lines: every entry is a single object on its own line,
/// so a torn append damages at most the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    #[serde(default)]
    pub fields: IndexMap<String, String>,
    /// The data that would otherwise be lost
    #[serde(default)]
    pub body: String,
}

impl RecoveryEntry {
    fn new(category: RecoveryCategory, description: String, fields: [(&str, &str); 2]) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: String::new(),
        }
    }
}

pub fn recovery_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(".recovery.log")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append a recovery entry to the log. Errors are logged and swallowed.
pub fn log_recovery(data_dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = append_entry(data_dir, &entry) {
        log::warn!("could not write to recovery log: {}", e);
    }
}

fn append_entry(data_dir: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let mut line = serde_json::to_string(entry)?;
    line.push('\n');
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(recovery_log_path(data_dir))?
        .write_all(line.as_bytes())
}

/// Record a failed collection write, keeping the payload that was lost.
pub fn log_write_failure(data_dir: &Path, key: &str, error: &str, payload: String) {
    let mut entry = RecoveryEntry::new(
        RecoveryCategory::Write,
        format!("{} write failed", key),
        [("Key", key), ("Error", error)],
    );
    entry.body = payload;
    log_recovery(data_dir, entry);
}

/// Record a deleted macro so it can be restored by hand.
pub fn log_macro_deletion(data_dir: &Path, macro_id: &str, title: &str, record: String) {
    let mut entry = RecoveryEntry::new(
        RecoveryCategory::Delete,
        format!("macro {} deleted", macro_id),
        [("Macro", macro_id), ("Title", title)],
    );
    entry.body = record;
    log_recovery(data_dir, entry);
}

/// Entries in the order they were written. Unreadable lines are skipped.
fn load_entries(data_dir: &Path) -> io::Result<Vec<RecoveryEntry>> {
    let content = match std::fs::read_to_string(recovery_log_path(data_dir)) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("skipping unreadable recovery entry: {}", e);
                None
            }
        })
        .collect())
}

/// Read recovery entries, most recent first.
pub fn read_recovery_entries(data_dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let mut entries = load_entries(data_dir).unwrap_or_default();
    entries.reverse();
    if let Some(n) = limit {
        entries.truncate(n);
    }
    entries
}

/// Drop entries older than `PRUNE_AGE_DAYS`, or every entry when `all`.
/// Returns the number of entries removed.
pub fn prune_recovery(data_dir: &Path, all: bool) -> io::Result<usize> {
    let path = recovery_log_path(data_dir);
    if !path.exists() {
        return Ok(0);
    }
    let entries = load_entries(data_dir)?;
    let before = entries.len();
    let cutoff = Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS);

    let mut out = String::new();
    let mut kept = 0;
    for entry in entries.iter().filter(|e| !all && e.timestamp >= cutoff) {
        out.push_str(&serde_json::to_string(entry)?);
        out.push('\n');
        kept += 1;
    }
    atomic_write(&path, out.as_bytes())?;
    Ok(before - kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(days_ago: i64, body: &str) -> RecoveryEntry {
        let mut entry = RecoveryEntry::new(
            RecoveryCategory::Write,
            "macros write failed".into(),
            [("Key", "macros"), ("Error", "disk full")],
        );
        entry.timestamp = Utc::now() - chrono::Duration::days(days_ago);
        entry.body = body.into();
        entry
    }

    #[test]
    fn atomic_write_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("macros.json");
        atomic_write(&path, b"[1]").unwrap();
        atomic_write(&path, b"[2]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[2]");
    }

    #[test]
    fn log_and_read_back() {
        let tmp = TempDir::new().unwrap();
        log_write_failure(tmp.path(), "macros", "disk full", "[\n  {}\n]".into());
        log_macro_deletion(tmp.path(), "abc", "Greeting", "{\"id\":\"abc\"}".into());

        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert_eq!(content.lines().count(), 2);

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, RecoveryCategory::Delete);
        assert_eq!(entries[0].description, "macro abc deleted");
        assert_eq!(entries[0].fields["Title"], "Greeting");
        assert_eq!(entries[0].body, "{\"id\":\"abc\"}");
        assert_eq!(entries[1].category, RecoveryCategory::Write);
        assert_eq!(entries[1].body, "[\n  {}\n]");
        assert_eq!(entries[1].fields["Error"], "disk full");
    }

    #[test]
    fn read_respects_limit() {
        let tmp = TempDir::new().unwrap();
        for i in 0..3 {
            log_recovery(tmp.path(), entry(0, &i.to_string()));
        }
        let entries = read_recovery_entries(tmp.path(), Some(2));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].body, "2");
        assert_eq!(entries[1].body, "1");
    }

    #[test]
    fn torn_line_is_skipped() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), entry(0, "kept"));
        let path = recovery_log_path(tmp.path());
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"{\"timestamp\":").unwrap();

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].body, "kept");
    }

    #[test]
    fn missing_log_reads_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(read_recovery_entries(tmp.path(), None).is_empty());
        assert_eq!(prune_recovery(tmp.path(), true).unwrap(), 0);
    }

    #[test]
    fn prune_drops_old_entries() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), entry(45, "old"));
        log_recovery(tmp.path(), entry(1, "new"));
        assert_eq!(prune_recovery(tmp.path(), false).unwrap(), 1);
        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].body, "new");

        assert_eq!(prune_recovery(tmp.path(), true).unwrap(), 1);
        assert!(read_recovery_entries(tmp.path(), None).is_empty());
    }
}
