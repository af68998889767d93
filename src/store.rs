use crate::dates::{self, parse_date};
use crate::errors::StorageError;
use crate::models::Entry;
use crate::storage::KeyValueStore;
use tracing::{debug, warn};

/// The entries of one session, persisted as a JSON array under `key`.
///
/// The store does not validate words; callers run [`crate::word::validate_word`] first.
pub struct EntryStore<'a, K: KeyValueStore> {
    kv: &'a mut K,
    key: String,
}

impl<'a, K: KeyValueStore> EntryStore<'a, K> {
    pub fn new(kv: &'a mut K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Inserts `entry`, replacing any entry with the same date.
    pub fn upsert(&mut self, entry: Entry) -> Result<(), StorageError> {
        let mut entries = self.load();
        match entries.iter_mut().find(|existing| existing.date == entry.date) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        let payload = serde_json::to_string(&entries)?;
        self.kv.set(&self.key, payload)?;
        debug!(key = %self.key, count = entries.len(), "saved entries");
        Ok(())
    }

    /// All entries, most recent date first.
    pub fn get_all(&self) -> Vec<Entry> {
        let mut entries = self.load();
        entries.sort_by(|a, b| sort_key(&b.date).cmp(&sort_key(&a.date)));
        entries
    }

    pub fn get_by_date(&self, date: &str) -> Option<Entry> {
        self.load().into_iter().find(|entry| entry.date == date)
    }

    pub fn get_today(&self) -> Option<Entry> {
        self.get_by_date(&dates::date_key(dates::today()))
    }

    pub fn recent(&self, limit: usize) -> Vec<Entry> {
        let mut entries = self.get_all();
        entries.truncate(limit);
        entries
    }

    pub fn count(&self) -> usize {
        self.load().len()
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.kv.remove(&self.key)
    }

    fn load(&self) -> Vec<Entry> {
        let Some(payload) = self.kv.get(&self.key) else {
            return Vec::new();
        };
        match serde_json::from_str(&payload) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(key = %self.key, "ignoring unreadable entries: {err}");
                Vec::new()
            }
        }
    }
}

// Descending order puts unparseable dates after every real date.
fn sort_key(date: &str) -> (Option<chrono::NaiveDate>, &str) {
    (parse_date(date), date)
}
