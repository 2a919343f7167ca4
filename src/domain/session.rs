use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated CSV kept for the rest of the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: chrono::DateTime<chrono::Local>,
    pub csv: String,
    pub row_count: usize,
    pub incomplete_count: usize,
}

impl HistoryEntry {
    pub fn new(csv: String, row_count: usize, incomplete_count: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: chrono::Local::now(),
            csv,
            row_count,
            incomplete_count,
        }
    }

    /// Timestamp used in artifact file names
    pub fn file_stamp(&self) -> String {
        self.created_at.format("%Y-%m-%d_%H-%M-%S").to_string()
    }
}

/// In-memory state of one interactive session; dropped on exit
#[derive(Debug, Default)]
pub struct GenerationSession {
    pub last_description: Option<String>,
    pub last_refined: Option<String>,
    history: Vec<HistoryEntry>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_refined(&mut self, description: &str, refined: &str) {
        self.last_description = Some(description.to_string());
        self.last_refined = Some(refined.to_string());
    }

    pub fn record_csv(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.history.push(entry);
        &self.history[self.history.len() - 1]
    }

    pub fn last_csv(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// 1-based lookup, matching the numbering shown to the user
    pub fn entry(&self, number: usize) -> Option<&HistoryEntry> {
        number.checked_sub(1).and_then(|index| self.history.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_append_only_and_one_based() {
        let mut session = GenerationSession::new();
        assert!(session.last_csv().is_none());

        session.record_csv(HistoryEntry::new("a".to_string(), 1, 0));
        session.record_csv(HistoryEntry::new("b".to_string(), 2, 1));

        assert_eq!(session.history().len(), 2);
        assert_eq!(session.entry(1).map(|e| e.csv.as_str()), Some("a"));
        assert_eq!(session.entry(2).map(|e| e.csv.as_str()), Some("b"));
        assert!(session.entry(0).is_none());
        assert!(session.entry(3).is_none());
        assert_eq!(session.last_csv().map(|e| e.row_count), Some(2));
    }

    #[test]
    fn test_record_refined_replaces_previous() {
        let mut session = GenerationSession::new();
        session.record_refined("first", "refined first");
        session.record_refined("second", "refined second");
        assert_eq!(session.last_description.as_deref(), Some("second"));
        assert_eq!(session.last_refined.as_deref(), Some("refined second"));
    }

    #[test]
    fn test_file_stamp_format() {
        let entry = HistoryEntry::new(String::new(), 0, 0);
        let stamp = entry.file_stamp();
        assert_eq!(stamp.len(), "2024-01-01_00-00-00".len());
        assert_eq!(&stamp[10..11], "_");
    }
}
