//! Generated-website store.
//!
//! Owns one logical table mapping slug -> [`GeneratedWebsite`], serialized as
//! a single JSON object under a fixed key of a [`KeyValueMedium`]. Every
//! operation re-reads the medium; nothing is cached in memory.
//!
//! Records are decoded one by one. An entry that does not decode is hidden
//! from readers but carried through every rewrite of the table unchanged.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};
use webgen_types::config::DEFAULT_STORAGE_KEY;
use webgen_types::error::StoreError;
use webgen_types::website::{GeneratedWebsite, WebsiteDraft, generate_slug};

use crate::service::clock::{Clock, SystemClock};
use crate::storage::medium::KeyValueMedium;

/// The persisted table: slug -> website.
pub type WebsiteTable = BTreeMap<String, GeneratedWebsite>;

/// Table as read from the medium.
#[derive(Default)]
struct StoredTable {
    websites: WebsiteTable,
    /// Entries that failed to decode, kept as raw JSON.
    unreadable: Map<String, Value>,
}

impl StoredTable {
    fn remove(&mut self, slug: &str) -> bool {
        let website = self.websites.remove(slug).is_some();
        let raw = self.unreadable.remove(slug).is_some();
        website || raw
    }
}

/// Service owning the persisted website table.
///
/// Generic over the storage medium and clock so tests can substitute
/// in-memory doubles. Reads degrade to an empty table on missing or corrupted
/// data; writes report medium failures as [`StoreError`].
///
/// Mutations through one store are serialized, so callers sharing it across
/// threads never lose each other's writes. Other processes writing the same
/// key are not coordinated with.
pub struct WebsiteStore<M: KeyValueMedium, C: Clock = SystemClock> {
    medium: M,
    clock: C,
    storage_key: String,
    write_lock: Mutex<()>,
}

impl<M: KeyValueMedium, C: Clock> WebsiteStore<M, C> {
    /// Create a store over `medium` using [`DEFAULT_STORAGE_KEY`].
    pub fn new(medium: M, clock: C) -> Self {
        Self::with_key(medium, clock, DEFAULT_STORAGE_KEY)
    }

    /// Create a store that keeps its table under `storage_key`.
    pub fn with_key(medium: M, clock: C, storage_key: impl Into<String>) -> Self {
        Self {
            medium,
            clock,
            storage_key: storage_key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Slug a website titled `title` would receive if saved right now.
    pub fn generate_slug(&self, title: &str) -> String {
        generate_slug(title, self.clock.now())
    }

    /// Persist a new website and return its freshly minted slug.
    ///
    /// Always a create: the record gets a new slug and `createdAt`. If the
    /// minted slug already exists (same title within the same millisecond)
    /// the existing entry is replaced; no uniqueness retry is attempted.
    pub fn save_website(&self, draft: WebsiteDraft) -> Result<String, StoreError> {
        let _guard = self.lock_writes();
        let mut table = self.read_table();

        let now = self.clock.now();
        let slug = generate_slug(&draft.title, now);
        if table.remove(&slug) {
            tracing::warn!(%slug, "slug collision, replacing existing website");
        }

        let website = GeneratedWebsite::from_draft(slug.clone(), draft, now);
        table.websites.insert(slug.clone(), website);
        self.write_table(&table)?;

        tracing::debug!(%slug, key = %self.storage_key, "saved website");
        Ok(slug)
    }

    /// Look up a website by slug.
    pub fn get_website(&self, slug: &str) -> Option<GeneratedWebsite> {
        self.get_all_websites().remove(slug)
    }

    /// Read the whole table.
    ///
    /// A missing key yields an empty table. A medium read failure or a value
    /// that is not a JSON object is logged and also yields an empty table.
    /// Individual records that fail to decode are logged and left out.
    pub fn get_all_websites(&self) -> WebsiteTable {
        self.read_table().websites
    }

    /// All websites, most recently created first.
    pub fn get_websites_list(&self) -> Vec<GeneratedWebsite> {
        let mut websites: Vec<GeneratedWebsite> = self.get_all_websites().into_values().collect();
        websites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        websites
    }

    /// Delete a website. Returns false (and writes nothing) if the slug is absent.
    ///
    /// An undecodable entry stored under `slug` is removed as well.
    pub fn delete_website(&self, slug: &str) -> Result<bool, StoreError> {
        let _guard = self.lock_writes();
        let mut table = self.read_table();
        if !table.remove(slug) {
            return Ok(false);
        }

        self.write_table(&table)?;
        tracing::debug!(%slug, key = %self.storage_key, "deleted website");
        Ok(true)
    }

    /// Remove the table's key from the medium entirely.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let _guard = self.lock_writes();
        self.medium.remove_item(&self.storage_key).map_err(|err| {
            tracing::error!(key = %self.storage_key, "failed to clear website table: {err}");
            StoreError::from(err)
        })?;
        tracing::debug!(key = %self.storage_key, "cleared website table");
        Ok(())
    }

    /// Number of stored websites.
    pub fn get_count(&self) -> usize {
        self.get_all_websites().len()
    }

    // The guard protects no data, so a poisoned lock is still usable.
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_table(&self) -> StoredTable {
        let raw = match self.medium.get_item(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StoredTable::default(),
            Err(err) => {
                tracing::error!(key = %self.storage_key, "failed to read website table: {err}");
                return StoredTable::default();
            }
        };

        let entries = match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(
                    key = %self.storage_key,
                    "stored website table is unreadable, treating as empty: {err}"
                );
                return StoredTable::default();
            }
        };

        let mut table = StoredTable::default();
        for (slug, value) in entries {
            match serde_json::from_value::<GeneratedWebsite>(value.clone()) {
                Ok(website) => {
                    table.websites.insert(slug, website);
                }
                Err(err) => {
                    tracing::warn!(%slug, key = %self.storage_key, "skipping unreadable website: {err}");
                    table.unreadable.insert(slug, value);
                }
            }
        }
        table
    }

    fn write_table(&self, table: &StoredTable) -> Result<(), StoreError> {
        let mut entries = table.unreadable.clone();
        for (slug, website) in &table.websites {
            let value = serde_json::to_value(website)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            entries.insert(slug.clone(), value);
        }

        let raw =
            serde_json::to_string(&entries).map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.medium
            .set_item(&self.storage_key, &raw)
            .map_err(|err| {
                tracing::error!(key = %self.storage_key, "failed to write website table: {err}");
                StoreError::from(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, Duration, SubsecRound, TimeZone, Utc};
    use webgen_types::error::MediumError;
    use webgen_types::website::TechStack;

    // --- Test doubles ---

    /// In-memory medium that counts writes and can be made to fail.
    #[derive(Default)]
    struct MockMedium {
        items: Mutex<HashMap<String, String>>,
        writes: AtomicUsize,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl MockMedium {
        fn with_item(key: &str, value: &str) -> Self {
            let medium = Self::default();
            medium
                .items
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            medium
        }

        fn raw(&self, key: &str) -> Option<String> {
            self.items.lock().unwrap().get(key).cloned()
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl KeyValueMedium for MockMedium {
        fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
            if self.fail_reads {
                return Err(MediumError::Unavailable("read blocked".to_string()));
            }
            Ok(self.items.lock().unwrap().get(key).cloned())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
            if self.fail_writes {
                return Err(MediumError::Unavailable("quota exceeded".to_string()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.items
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove_item(&self, key: &str) -> Result<(), MediumError> {
            if self.fail_writes {
                return Err(MediumError::Unavailable("quota exceeded".to_string()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.items.lock().unwrap().remove(key);
            Ok(())
        }
    }

    /// Clock that only moves when told to.
    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn at_millis(ms: i64) -> Self {
            Self {
                now: Mutex::new(Utc.timestamp_millis_opt(ms).unwrap()),
            }
        }

        fn advance_millis(&self, ms: i64) {
            let mut now = self.now.lock().unwrap();
            *now += Duration::milliseconds(ms);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn store() -> WebsiteStore<MockMedium, ManualClock> {
        WebsiteStore::new(MockMedium::default(), ManualClock::at_millis(1_700_000_000_000))
    }

    fn draft(title: &str) -> WebsiteDraft {
        WebsiteDraft {
            prompt: "coffee shop".to_string(),
            title: title.to_string(),
            description: "A cozy place".to_string(),
            site_type: "business".to_string(),
            primary_color: "#6f4e37".to_string(),
            secondary_color: "cream".to_string(),
            sections: vec!["hero".to_string(), "menu".to_string()],
            features: vec!["online ordering".to_string()],
            components: vec!["Navbar".to_string(), "Footer".to_string()],
            tech_stack: TechStack {
                framework: "react".to_string(),
                styling: "tailwind".to_string(),
                backend: "none".to_string(),
            },
            files: Some(serde_json::json!({"index.html": "<h1>Brew</h1>", "n": [1, 2.5]})),
            html: Some("<h1>Brew</h1>".to_string()),
            ai_generated_html: None,
            extra: serde_json::json!({"css": "h1 { color: brown; }", "framework": "react"})
                .as_object()
                .cloned()
                .unwrap(),
        }
    }

    // --- Scenarios ---

    #[test]
    fn test_save_and_get_brew_haven() {
        let store = store();
        let slug = store.save_website(draft("Brew Haven Cafe")).unwrap();

        assert_eq!(slug, "brew-haven-cafe-yw3v28");
        let site = store.get_website(&slug).unwrap();
        assert_eq!(site.content.title, "Brew Haven Cafe");
        assert_eq!(site.id, slug);
        assert_eq!(site.slug, slug);
        assert_eq!(store.get_count(), 1);
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let store = WebsiteStore::new(MockMedium::default(), SystemClock);
        let before = Utc::now().trunc_subsecs(3);
        let original = draft("Round Trip");

        let slug = store.save_website(original.clone()).unwrap();
        let site = store.get_website(&slug).unwrap();

        assert_eq!(site.content, original);
        assert_eq!(site.id, slug);
        assert_eq!(site.slug, slug);
        assert!(site.created_at >= before);
        assert!(slug.starts_with("round-trip-"));
    }

    #[test]
    fn test_save_ignores_caller_identity_fields() {
        let store = store();
        let forged: WebsiteDraft = serde_json::from_str(
            r#"{"id": "forged", "slug": "forged", "createdAt": "1999-01-01T00:00:00Z", "title": "Real"}"#,
        )
        .unwrap();

        let slug = store.save_website(forged).unwrap();
        assert_eq!(slug, "real-yw3v28");
        assert!(store.get_website("forged").is_none());

        let site = store.get_website(&slug).unwrap();
        assert_eq!(
            site.created_at,
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
        );
        assert!(site.content.extra.is_empty());
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = store();
        assert!(store.get_website("nope-000000").is_none());
        store.save_website(draft("Exists")).unwrap();
        assert!(store.get_website("nope-000000").is_none());
    }

    #[test]
    fn test_get_all_is_idempotent() {
        let store = store();
        store.save_website(draft("One")).unwrap();
        store.clock.advance_millis(5);
        store.save_website(draft("Two")).unwrap();

        let first = store.get_all_websites();
        let second = store.get_all_websites();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_stored_layout_is_single_json_object_keyed_by_slug() {
        let store = store();
        let slug = store.save_website(draft("Layout")).unwrap();

        let raw = store.medium().raw(DEFAULT_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object[&slug]["slug"], slug.as_str());
        assert_eq!(object[&slug]["createdAt"], "2023-11-14T22:13:20.000Z");
        assert_eq!(object[&slug]["css"], "h1 { color: brown; }");
        assert_eq!(object[&slug]["techStack"]["styling"], "tailwind");
    }

    #[test]
    fn test_list_orders_most_recent_first() {
        let store = store();
        let first = store.save_website(draft("First")).unwrap();
        store.clock.advance_millis(1_000);
        let second = store.save_website(draft("Second")).unwrap();
        store.clock.advance_millis(1_000);
        let third = store.save_website(draft("Third")).unwrap();

        let slugs: Vec<String> = store
            .get_websites_list()
            .into_iter()
            .map(|w| w.slug)
            .collect();
        assert_eq!(slugs, vec![third, second, first]);
    }

    #[test]
    fn test_delete_absent_returns_false_without_write() {
        let store = store();
        store.save_website(draft("Keep")).unwrap();
        let writes = store.medium().writes();

        assert!(!store.delete_website("missing-000000").unwrap());
        assert_eq!(store.get_count(), 1);
        assert_eq!(store.medium().writes(), writes);
    }

    #[test]
    fn test_delete_present_decrements_count() {
        let store = store();
        let keep = store.save_website(draft("Keep")).unwrap();
        store.clock.advance_millis(1);
        let gone = store.save_website(draft("Gone")).unwrap();
        assert_eq!(store.get_count(), 2);

        assert!(store.delete_website(&gone).unwrap());
        assert_eq!(store.get_count(), 1);
        assert!(store.get_website(&gone).is_none());
        assert!(store.get_website(&keep).is_some());
    }

    #[test]
    fn test_clear_all_removes_key() {
        let store = store();
        store.save_website(draft("A")).unwrap();
        store.clock.advance_millis(1);
        store.save_website(draft("B")).unwrap();

        store.clear_all().unwrap();

        assert_eq!(store.get_count(), 0);
        assert!(store.get_websites_list().is_empty());
        assert!(store.medium().raw(DEFAULT_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_corrupted_value_reads_as_empty() {
        let medium = MockMedium::with_item(DEFAULT_STORAGE_KEY, "{not json at all");
        let store = WebsiteStore::new(medium, ManualClock::at_millis(1_700_000_000_000));

        assert!(store.get_all_websites().is_empty());
        assert!(store.get_websites_list().is_empty());
        assert_eq!(store.get_count(), 0);
        assert!(store.get_website("anything").is_none());
    }

    #[test]
    fn test_wrong_json_shape_reads_as_empty() {
        for raw in ["null", "[]", "42", r#"{"a-000000": {"title": "missing identity"}}"#] {
            let medium = MockMedium::with_item(DEFAULT_STORAGE_KEY, raw);
            let store = WebsiteStore::new(medium, ManualClock::at_millis(0));
            assert!(store.get_all_websites().is_empty(), "raw {raw:?}");
        }
    }

    #[test]
    fn test_save_over_corrupted_value_starts_fresh_table() {
        let medium = MockMedium::with_item(DEFAULT_STORAGE_KEY, "garbage");
        let store = WebsiteStore::new(medium, ManualClock::at_millis(1_700_000_000_000));

        let slug = store.save_website(draft("Fresh")).unwrap();
        assert_eq!(store.get_count(), 1);
        assert!(store.get_website(&slug).is_some());
    }

    #[test]
    fn test_read_failure_reads_as_empty() {
        let medium = MockMedium {
            fail_reads: true,
            ..Default::default()
        };
        let store = WebsiteStore::new(medium, ManualClock::at_millis(0));
        assert!(store.get_all_websites().is_empty());
        assert_eq!(store.get_count(), 0);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let medium = MockMedium {
            fail_writes: true,
            ..Default::default()
        };
        let store = WebsiteStore::new(medium, ManualClock::at_millis(0));

        let err = store.save_website(draft("Doomed")).unwrap_err();
        assert!(matches!(err, StoreError::Medium(MediumError::Unavailable(_))));
        assert_eq!(store.get_count(), 0);
        assert!(store.clear_all().is_err());
    }

    #[test]
    fn test_same_millisecond_collision_replaces() {
        let store = store();
        let first = store.save_website(draft("Twin")).unwrap();
        let mut second_draft = draft("Twin");
        second_draft.description = "second".to_string();
        let second = store.save_website(second_draft).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.get_count(), 1);
        assert_eq!(
            store.get_website(&first).unwrap().content.description,
            "second"
        );
    }

    #[test]
    fn test_same_title_different_millis_both_kept() {
        let store = store();
        let first = store.save_website(draft("Twin")).unwrap();
        store.clock.advance_millis(1);
        let second = store.save_website(draft("Twin")).unwrap();

        assert_ne!(first, second);
        assert_eq!(store.get_count(), 2);
    }

    #[test]
    fn test_custom_keys_are_isolated() {
        let medium = MockMedium::default();
        let sites = WebsiteStore::with_key(&medium, ManualClock::at_millis(0), "sites");
        let drafts = WebsiteStore::with_key(&medium, ManualClock::at_millis(0), "drafts");

        sites.save_website(draft("Only Here")).unwrap();
        assert_eq!(sites.get_count(), 1);
        assert_eq!(drafts.get_count(), 0);

        drafts.clear_all().unwrap();
        assert_eq!(sites.get_count(), 1);
        assert_eq!(sites.storage_key(), "sites");
    }

    #[test]
    fn test_generate_slug_uses_clock() {
        let store = store();
        assert_eq!(store.generate_slug("Brew Haven Cafe"), "brew-haven-cafe-yw3v28");
    }

    const LEGACY_TABLE: &str = r#"{
        "old-abc123": {
            "id": "old-abc123",
            "slug": "old-abc123",
            "title": "Old",
            "primaryColor": null,
            "css": "h1{}",
            "javascript": "x()",
            "createdAt": "2024-03-01T12:00:00.000Z"
        },
        "broken-abc124": {
            "id": "broken-abc124",
            "slug": "broken-abc124",
            "title": "No timestamp"
        }
    }"#;

    #[test]
    fn test_bad_record_does_not_hide_the_rest() {
        let medium = MockMedium::with_item(DEFAULT_STORAGE_KEY, LEGACY_TABLE);
        let store = WebsiteStore::new(medium, ManualClock::at_millis(1_700_000_000_000));

        assert_eq!(store.get_count(), 1);
        let old = store.get_website("old-abc123").unwrap();
        assert_eq!(old.content.primary_color, "");
        assert!(store.get_website("broken-abc124").is_none());
    }

    #[test]
    fn test_save_keeps_existing_records_verbatim() {
        let medium = MockMedium::with_item(DEFAULT_STORAGE_KEY, LEGACY_TABLE);
        let store = WebsiteStore::new(medium, ManualClock::at_millis(1_700_000_000_000));

        let slug = store.save_website(draft("New")).unwrap();
        assert_eq!(store.get_count(), 2);
        assert!(store.get_website("old-abc123").is_some());

        let raw = store.medium().raw(DEFAULT_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["old-abc123"]["css"], "h1{}");
        assert_eq!(value["old-abc123"]["javascript"], "x()");
        assert_eq!(value["broken-abc124"]["title"], "No timestamp");
        assert!(value["broken-abc124"].get("createdAt").is_none());
        assert_eq!(value[&slug]["title"], "New");
    }

    #[test]
    fn test_delete_removes_unreadable_entry() {
        let medium = MockMedium::with_item(DEFAULT_STORAGE_KEY, LEGACY_TABLE);
        let store = WebsiteStore::new(medium, ManualClock::at_millis(0));

        assert!(store.delete_website("broken-abc124").unwrap());
        let raw = store.medium().raw(DEFAULT_STORAGE_KEY).unwrap();
        assert!(!raw.contains("broken-abc124"));
        assert_eq!(store.get_count(), 1);
    }

    #[test]
    fn test_concurrent_saves_are_all_kept() {
        let store = WebsiteStore::new(MockMedium::default(), SystemClock);

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    for i in 0..25 {
                        store
                            .save_website(draft(&format!("Site {worker} {i}")))
                            .unwrap();
                    }
                });
            }
        });

        assert_eq!(store.get_count(), 200);
    }
}
