use crate::error::{GuardiasError, Result};
use crate::io;
use crate::shift::{parse_date, KeyStyle, Shift};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Store handle shared by the bot dispatcher and the HTTP server.
/// Hold the lock across register-and-persist.
pub type SharedStore = Arc<tokio::sync::Mutex<ShiftStore>>;

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Shifts live only as long as the process.
    Memory,
    /// Shifts are written to a JSON file after every registration.
    File(PathBuf),
}

// ---------------------------------------------------------------------------
// ShiftStore
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ShiftStore {
    groups: BTreeMap<String, Vec<Shift>>,
    backend: Backend,
    key_style: KeyStyle,
}

impl ShiftStore {
    pub fn in_memory(key_style: KeyStyle) -> Self {
        Self {
            groups: BTreeMap::new(),
            backend: Backend::Memory,
            key_style,
        }
    }

    /// Open a store, reading existing shifts from the backend when possible.
    ///
    /// A missing, unreadable or corrupt file produces an empty store. The
    /// failure is logged and never returned.
    pub fn load(backend: Backend, key_style: KeyStyle) -> Self {
        let groups = match &backend {
            Backend::Memory => BTreeMap::new(),
            Backend::File(path) => match read_groups(path) {
                Ok(Some(groups)) => {
                    tracing::info!(path = %path.display(), groups = groups.len(), "loaded shifts");
                    groups
                }
                Ok(None) => {
                    tracing::info!(path = %path.display(), "no shift file yet, starting empty");
                    BTreeMap::new()
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not load shifts, starting empty");
                    BTreeMap::new()
                }
            },
        };
        Self {
            groups,
            backend,
            key_style,
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn key_style(&self) -> KeyStyle {
        self.key_style
    }

    /// Grouped view keyed by start date or ISO week, in key order.
    pub fn groups(&self) -> &BTreeMap<String, Vec<Shift>> {
        &self.groups
    }

    /// Every shift, in key order and then insertion order.
    pub fn shifts(&self) -> impl Iterator<Item = &Shift> {
        self.groups.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    /// Register `week_count` consecutive weekly shifts for `person` starting on
    /// `start_date_text`, then persist.
    ///
    /// Input is validated before anything is appended. A persistence failure
    /// is returned after the in-memory append has happened.
    pub fn register(
        &mut self,
        person: &str,
        start_date_text: &str,
        week_count: i64,
    ) -> Result<Vec<Shift>> {
        let start = parse_date(start_date_text)?;
        let weeks = u32::try_from(week_count)
            .ok()
            .filter(|w| *w > 0)
            .filter(|w| {
                start
                    .checked_add_signed(chrono::Duration::weeks(i64::from(*w)))
                    .is_some()
            })
            .ok_or_else(|| GuardiasError::InvalidWeekCount(week_count.to_string()))?;

        let added = Shift::weekly(person, start, weeks);
        for shift in &added {
            let key = self.key_style.key_for(shift.start_date());
            self.groups.entry(key).or_default().push(shift.clone());
        }
        tracing::info!(person, start = %start, weeks, "registered shifts");

        self.save()?;
        Ok(added)
    }

    /// Write the full store to the backing file. No-op for memory stores.
    pub fn save(&self) -> Result<()> {
        let Backend::File(path) = &self.backend else {
            return Ok(());
        };
        let data = serde_json::to_string_pretty(&self.groups)?;
        io::atomic_write(path, data.as_bytes())?;
        tracing::debug!(path = %path.display(), shifts = self.len(), "saved shifts");
        Ok(())
    }
}

fn read_groups(path: &Path) -> Result<Option<BTreeMap<String, Vec<Shift>>>> {
    let Some(data) = io::read_if_exists(path)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&data)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ShiftReport;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn triples(store: &ShiftStore) -> Vec<(String, NaiveDate, NaiveDate)> {
        store
            .shifts()
            .map(|s| (s.person().to_string(), s.start_date(), s.end_date()))
            .collect()
    }

    #[test]
    fn register_single_week() {
        let mut store = ShiftStore::in_memory(KeyStyle::Date);
        let added = store.register("Juan", "2024-12-25", 1).unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(
            triples(&store),
            vec![("Juan".into(), date(2024, 12, 25), date(2024, 12, 31))]
        );
        assert!(store.groups().contains_key("2024-12-25"));
    }

    #[test]
    fn register_three_weeks_spans_keys() {
        let mut store = ShiftStore::in_memory(KeyStyle::Date);
        store.register("Juan", "2024-12-25", 3).unwrap();
        let starts: Vec<_> = store.shifts().map(Shift::start_date).collect();
        assert_eq!(
            starts,
            vec![date(2024, 12, 25), date(2025, 1, 1), date(2025, 1, 8)]
        );
        assert_eq!(store.groups().len(), 3);
        assert!(store.shifts().all(|s| (s.end_date() - s.start_date()).num_days() == 6));
    }

    #[test]
    fn iso_week_store_groups_by_week() {
        let mut store = ShiftStore::in_memory(KeyStyle::IsoWeek);
        store.register("Ana", "2024-12-30", 1).unwrap();
        store.register("Luis", "2025-01-01", 1).unwrap();
        assert_eq!(store.groups().len(), 1);
        assert_eq!(store.groups()["2025-W01"].len(), 2);
    }

    #[test]
    fn invalid_date_leaves_store_unchanged() {
        let mut store = ShiftStore::in_memory(KeyStyle::Date);
        let err = store.register("Juan", "25-12-2024", 1).unwrap_err();
        assert!(matches!(err, GuardiasError::InvalidDateFormat(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn zero_and_negative_weeks_rejected() {
        let mut store = ShiftStore::in_memory(KeyStyle::Date);
        for weeks in [0, -2] {
            let err = store.register("Juan", "2024-12-25", weeks).unwrap_err();
            assert!(matches!(err, GuardiasError::InvalidWeekCount(_)));
        }
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn empty_and_duplicate_names_accepted() {
        let mut store = ShiftStore::in_memory(KeyStyle::Date);
        store.register("", "2024-12-25", 1).unwrap();
        store.register("Juan", "2024-12-25", 1).unwrap();
        store.register("Juan", "2024-12-25", 1).unwrap();
        assert_eq!(store.groups()["2024-12-25"].len(), 3);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guardias.json");
        let mut store = ShiftStore::load(Backend::File(path.clone()), KeyStyle::Date);
        store.register("Juan", "2024-12-25", 3).unwrap();
        store.register("Ana", "2024-12-02", 1).unwrap();

        let reloaded = ShiftStore::load(Backend::File(path), KeyStyle::Date);
        assert_eq!(triples(&reloaded), triples(&store));
    }

    #[test]
    fn register_persists_before_returning() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guardias.json");
        let mut store = ShiftStore::load(Backend::File(path.clone()), KeyStyle::IsoWeek);
        store.register("Juan", "2024-12-25", 1).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["2024-W52"][0]["person"], "Juan");
        assert_eq!(raw["2024-W52"][0]["end_date"], "2024-12-31");
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ShiftStore::load(
            Backend::File(dir.path().join("missing.json")),
            KeyStyle::Date,
        );
        assert!(store.is_empty());
    }

    #[test]
    fn load_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guardias.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = ShiftStore::load(Backend::File(path), KeyStyle::Date);
        assert!(store.is_empty());
    }

    #[test]
    fn load_out_of_range_date_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guardias.json");
        std::fs::write(
            &path,
            r#"{"k":[{"person":"X","start_date":"+262142-12-31"}]}"#,
        )
        .unwrap();
        let store = ShiftStore::load(Backend::File(path), KeyStyle::Date);
        assert!(store.is_empty());
        assert!(ShiftReport::new(&store)
            .render(262142, 12)
            .starts_with("No hay guardias registradas"));
    }

    #[test]
    fn load_accepts_spanish_field_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guardias.json");
        std::fs::write(
            &path,
            r#"{"2024-W10":[{"nombre":"Luis","fecha_inicio":"2024-03-04","fecha_fin":"2024-03-10"}]}"#,
        )
        .unwrap();
        let store = ShiftStore::load(Backend::File(path), KeyStyle::IsoWeek);
        assert_eq!(
            triples(&store),
            vec![("Luis".into(), date(2024, 3, 4), date(2024, 3, 10))]
        );
    }

    #[test]
    fn save_failure_is_storage_unavailable() {
        let dir = TempDir::new().unwrap();
        // The target path is an existing directory, so the rename fails.
        let mut store = ShiftStore::load(Backend::File(dir.path().to_path_buf()), KeyStyle::Date);
        let err = store.register("Juan", "2024-12-25", 1).unwrap_err();
        assert!(matches!(err, GuardiasError::StorageUnavailable { .. }));
    }

    #[test]
    fn memory_save_is_noop() {
        let store = ShiftStore::in_memory(KeyStyle::Date);
        store.save().unwrap();
        assert_eq!(store.backend(), &Backend::Memory);
    }
}
