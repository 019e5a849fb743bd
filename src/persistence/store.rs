use super::blob::BlobStore;
use crate::domain::{IdGenerator, Task, TaskId};
use crate::error::TaskError;
use chrono::{NaiveDate, Utc};

/// Default blob key the task collection is stored under
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Owns the task collection and writes it back to the blob store after every mutation
pub struct TaskStore {
    tasks: Vec<Task>,
    blob: Box<dyn BlobStore>,
    key: String,
    ids: IdGenerator,
    /// Raw blob to preserve before the first overwrite, when part of it couldn't be read
    unreadable: Option<String>,
}

/// Key the unreadable original is copied to before it gets overwritten
pub fn backup_key(key: &str) -> String {
    format!("{}.bak", key)
}

/// Decode each record on its own so one bad entry doesn't discard the rest.
/// The flag is set when anything was dropped.
fn parse_tasks(key: &str, raw: &str) -> (Vec<Task>, bool) {
    let records = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored tasks are malformed, starting empty");
            return (Vec::new(), true);
        }
    };

    let mut dropped = false;
    let tasks: Vec<Task> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Task>(record) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "skipping unreadable task record");
                dropped = true;
                None
            }
        })
        .collect();
    (tasks, dropped)
}

impl TaskStore {
    /// Load the collection stored under `key`.
    ///
    /// A missing or unreadable entry yields an empty collection. Records that fail to
    /// decode are skipped, and the raw blob is copied to [`backup_key`] on the next save.
    pub fn load(blob: Box<dyn BlobStore>, key: &str) -> Self {
        let (tasks, unreadable) = match blob.get(key) {
            Ok(Some(raw)) => {
                let (tasks, dropped) = parse_tasks(key, &raw);
                let keep_copy = dropped && !raw.trim().is_empty();
                (tasks, keep_copy.then_some(raw))
            }
            Ok(None) => (Vec::new(), None),
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read stored tasks, starting empty");
                (Vec::new(), None)
            }
        };

        tracing::info!(key, count = tasks.len(), "loaded tasks");

        Self {
            ids: IdGenerator::seeded(&tasks),
            tasks,
            blob,
            key: key.to_string(),
            unreadable,
        }
    }

    /// Serialize the full collection into a single blob write
    pub fn save(&mut self) -> Result<(), TaskError> {
        if let Some(raw) = &self.unreadable {
            let backup = backup_key(&self.key);
            self.blob.set(&backup, raw)?;
            tracing::warn!(key = %backup, "saved a copy of the unreadable stored tasks");
            self.unreadable = None;
        }

        let json = serde_json::to_string(&self.tasks).map_err(crate::error::StorageError::from)?;
        self.blob.set(&self.key, &json)?;
        Ok(())
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a new task. `date` defaults to `today`.
    pub fn add(&mut self, text: &str, date: Option<NaiveDate>, today: NaiveDate) -> Result<TaskId, TaskError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }

        let now = Utc::now();
        let id = self.ids.next_id(now.timestamp_millis());
        let date = date.unwrap_or(today);
        self.tasks.push(Task::new(id, text.to_string(), date, now));
        tracing::info!(%id, %date, "added task");

        self.save()?;
        Ok(id)
    }

    /// Remove the task with `id`. Returns false (and writes nothing) if it doesn't exist.
    pub fn remove(&mut self, id: TaskId) -> Result<bool, TaskError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        self.tasks.remove(pos);
        tracing::info!(%id, "removed task");

        self.save()?;
        Ok(true)
    }

    /// Flip completion of the task with `id`. Unknown ids are ignored.
    pub fn toggle(&mut self, id: TaskId) -> Result<bool, TaskError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.toggle();
        tracing::debug!(%id, completed = task.completed, "toggled task");

        self.save()?;
        Ok(true)
    }

    /// Overwrite text and date of the task with `id`. Unknown ids are ignored.
    pub fn update(&mut self, id: TaskId, text: &str, date: NaiveDate) -> Result<bool, TaskError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.text = text.to_string();
        task.date = date;
        tracing::info!(%id, %date, "updated task");

        self.save()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::persistence::blob::{FileBlobStore, MemoryBlobStore};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Memory store whose contents stay observable after being boxed into a `TaskStore`
    #[derive(Clone, Default)]
    struct SharedBlob(Rc<RefCell<MemoryBlobStore>>);

    impl BlobStore for SharedBlob {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    /// Rejects every write
    struct ReadOnlyBlob;

    impl BlobStore for ReadOnlyBlob {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn persisted(blob: &SharedBlob) -> Vec<Task> {
        let raw = blob.get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = TaskStore::load(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        for raw in ["not json", "{\"id\":1}", "[{\"id\":\"x\"}]", ""] {
            let blob = MemoryBlobStore::with_entry(DEFAULT_STORAGE_KEY, raw);
            let store = TaskStore::load(Box::new(blob), DEFAULT_STORAGE_KEY);
            assert!(store.is_empty(), "expected empty for {:?}", raw);
        }
    }

    #[test]
    fn test_load_skips_only_bad_records() {
        let raw = r#"[
            {"id":1709625600000,"text":"keep","date":"2024-03-05","completed":false,"createdAt":"2024-03-05T08:00:00.000Z"},
            {"id":1709625600001,"text":"blank date","date":"","completed":false,"createdAt":"2024-03-05T08:00:00.000Z"}
        ]"#;
        let blob = SharedBlob::default();
        blob.0.borrow_mut().set(DEFAULT_STORAGE_KEY, raw).unwrap();

        let mut store = TaskStore::load(Box::new(blob.clone()), DEFAULT_STORAGE_KEY);
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].text, "keep");

        store.add("new", None, date(2024, 3, 6)).unwrap();
        let texts: Vec<String> = persisted(&blob).into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["keep", "new"]);

        // the untouched original is kept next to the rewritten collection
        let backup = blob.get(&backup_key(DEFAULT_STORAGE_KEY)).unwrap();
        assert_eq!(backup.as_deref(), Some(raw));
    }

    #[test]
    fn test_clean_load_writes_no_backup() {
        let blob = SharedBlob::default();
        let mut store = TaskStore::load(Box::new(blob.clone()), DEFAULT_STORAGE_KEY);
        store.add("a", None, date(2024, 1, 1)).unwrap();

        let mut reloaded = TaskStore::load(Box::new(blob.clone()), DEFAULT_STORAGE_KEY);
        reloaded.add("b", None, date(2024, 1, 1)).unwrap();
        assert_eq!(blob.get(&backup_key(DEFAULT_STORAGE_KEY)).unwrap(), None);
    }

    #[test]
    fn test_malformed_blob_is_backed_up_once() {
        let blob = SharedBlob::default();
        blob.0.borrow_mut().set(DEFAULT_STORAGE_KEY, "not json").unwrap();

        let mut store = TaskStore::load(Box::new(blob.clone()), DEFAULT_STORAGE_KEY);
        assert!(store.is_empty());
        store.add("a", None, date(2024, 1, 1)).unwrap();
        assert_eq!(blob.get(&backup_key(DEFAULT_STORAGE_KEY)).unwrap().as_deref(), Some("not json"));

        blob.0.borrow_mut().set(&backup_key(DEFAULT_STORAGE_KEY), "cleared").unwrap();
        store.add("b", None, date(2024, 1, 1)).unwrap();
        assert_eq!(blob.get(&backup_key(DEFAULT_STORAGE_KEY)).unwrap().as_deref(), Some("cleared"));
    }

    #[test]
    fn test_add_buy_milk() {
        let mut store = TaskStore::load(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        let id = store
            .add("Buy milk", Some(date(2024, 3, 5)), date(2024, 1, 1))
            .unwrap();

        assert_eq!(store.len(), 1);
        let task = store.get(id).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.date, date(2024, 3, 5));
        assert!(!task.completed);
    }

    #[test]
    fn test_add_defaults_to_today() {
        let today = date(2024, 6, 1);
        let mut store = TaskStore::load(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        let id = store.add("Water plants", None, today).unwrap();
        assert_eq!(store.get(id).unwrap().date, today);
    }

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut store = TaskStore::load(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        assert!(matches!(store.add("   ", None, date(2024, 1, 1)), Err(TaskError::EmptyText)));
        assert!(store.is_empty());

        let id = store.add("  padded  ", None, date(2024, 1, 1)).unwrap();
        assert_eq!(store.get(id).unwrap().text, "padded");
    }

    #[test]
    fn test_rapid_adds_get_unique_ids() {
        let mut store = TaskStore::load(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        let ids: Vec<TaskId> = (0..50)
            .map(|i| store.add(&format!("t{}", i), None, date(2024, 1, 1)).unwrap())
            .collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_toggle_and_unknown_id() {
        let mut store = TaskStore::load(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        let id = store.add("a", None, date(2024, 1, 1)).unwrap();

        assert!(store.toggle(id).unwrap());
        assert!(store.get(id).unwrap().completed);
        assert!(!store.toggle(TaskId(-1)).unwrap());
    }

    #[test]
    fn test_update_only_touches_target() {
        let mut store = TaskStore::load(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        let a = store.add("a", Some(date(2024, 1, 1)), date(2024, 1, 1)).unwrap();
        let b = store.add("b", Some(date(2024, 1, 2)), date(2024, 1, 1)).unwrap();
        let before_b = store.get(b).unwrap().clone();

        assert!(store.update(a, " renamed ", date(2024, 2, 2)).unwrap());
        assert_eq!(store.get(a).unwrap().text, "renamed");
        assert_eq!(store.get(a).unwrap().date, date(2024, 2, 2));
        assert_eq!(store.get(b).unwrap(), &before_b);
    }

    #[test]
    fn test_update_rejects_blank() {
        let mut store = TaskStore::load(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        let a = store.add("a", None, date(2024, 1, 1)).unwrap();
        assert!(matches!(store.update(a, "", date(2024, 1, 1)), Err(TaskError::EmptyText)));
        assert_eq!(store.get(a).unwrap().text, "a");
    }

    #[test]
    fn test_remove() {
        let mut store = TaskStore::load(Box::new(MemoryBlobStore::new()), DEFAULT_STORAGE_KEY);
        let a = store.add("a", None, date(2024, 1, 1)).unwrap();
        let b = store.add("b", None, date(2024, 1, 1)).unwrap();

        assert!(store.remove(a).unwrap());
        assert!(!store.remove(a).unwrap());
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, b);
    }

    #[test]
    fn test_persisted_matches_memory_after_each_operation() {
        let blob = SharedBlob::default();
        let mut store = TaskStore::load(Box::new(blob.clone()), DEFAULT_STORAGE_KEY);
        let today = date(2024, 3, 1);

        let a = store.add("a", Some(date(2024, 3, 5)), today).unwrap();
        assert_eq!(persisted(&blob), store.tasks());

        let b = store.add("b", None, today).unwrap();
        assert_eq!(persisted(&blob), store.tasks());

        store.toggle(a).unwrap();
        assert_eq!(persisted(&blob), store.tasks());

        store.update(b, "b2", date(2024, 3, 9)).unwrap();
        assert_eq!(persisted(&blob), store.tasks());

        store.remove(a).unwrap();
        assert_eq!(persisted(&blob), store.tasks());

        let reloaded = TaskStore::load(Box::new(blob.clone()), DEFAULT_STORAGE_KEY);
        assert_eq!(reloaded.tasks(), store.tasks());
    }

    #[test]
    fn test_file_store_survives_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::load(Box::new(FileBlobStore::new(temp_dir.path())), "tasks");
        let id = store.add("Buy milk", Some(date(2024, 3, 5)), date(2024, 3, 1)).unwrap();
        store.toggle(id).unwrap();

        let reloaded = TaskStore::load(Box::new(FileBlobStore::new(temp_dir.path())), "tasks");
        assert_eq!(reloaded.tasks(), store.tasks());

        // new ids keep increasing past the loaded ones
        let mut reloaded = reloaded;
        let next = reloaded.add("next", None, date(2024, 3, 1)).unwrap();
        assert!(next > id);
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut store = TaskStore::load(Box::new(ReadOnlyBlob), DEFAULT_STORAGE_KEY);
        let err = store.add("a", None, date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, TaskError::Storage(_)));
        // the in-memory mutation stays applied
        assert_eq!(store.len(), 1);
    }
}
