use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::{broadcast, Mutex, OwnedMutexGuard};

use super::notifier::{Notifier, Severity};
use super::seed::default_categories;
use crate::storage::{Storage, CATEGORIES_KEY};
use crate::types::{Category, CategoryId, CategoryPatch, NewCategory, StoreError};

const EVENT_CAPACITY: usize = 64;

/// Committed change to the category collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryEvent {
    Loaded { count: usize },
    Created(Category),
    Updated(Category),
    Deleted(CategoryId),
}

/// Ordered collection of categories mirrored to a persisted snapshot.
///
/// Clones share the same state. Mutations are applied one at a time in the
/// order they were issued: each takes its queue turn in the caller, then runs
/// on its own task so that dropping the caller's future never leaves a
/// mutation half done.
#[derive(Clone)]
pub struct CategoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    storage: Arc<dyn Storage + Send + Sync>,
    notifier: Arc<dyn Notifier>,
    latency: Duration,
    categories: RwLock<Arc<Vec<Category>>>,
    loading: AtomicBool,
    queue: Arc<Mutex<()>>,
    events: broadcast::Sender<CategoryEvent>,
}

impl CategoryStore {
    pub fn new(
        storage: Arc<dyn Storage + Send + Sync>,
        notifier: Arc<dyn Notifier>,
        latency: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                storage,
                notifier,
                latency,
                categories: RwLock::new(Arc::new(Vec::new())),
                loading: AtomicBool::new(true),
                queue: Arc::new(Mutex::new(())),
                events,
            }),
        }
    }

    /// Build a store and load its initial data.
    pub fn open(
        storage: Arc<dyn Storage + Send + Sync>,
        notifier: Arc<dyn Notifier>,
        latency: Duration,
    ) -> Self {
        let store = Self::new(storage, notifier, latency);
        store.load();
        store
    }

    /// Restore the persisted snapshot, seeding defaults when it is absent or
    /// unreadable. Never fails.
    pub fn load(&self) -> Arc<Vec<Category>> {
        let inner = &self.inner;
        let (categories, persist) = match inner.storage.load(CATEGORIES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Category>>(&raw) {
                Ok(categories) => (categories, false),
                Err(e) => {
                    log::error!("Error parsing stored categories: {}", e);
                    (default_categories(), true)
                }
            },
            Ok(None) => (default_categories(), true),
            Err(e) => {
                // Leave whatever is stored alone; it may be readable next time.
                log::warn!("Could not read stored categories, using defaults: {:#}", e);
                (default_categories(), false)
            }
        };

        if persist {
            if let Err(e) = inner.persist(&categories) {
                log::error!("Failed to persist default categories: {}", e);
            }
        }

        let count = categories.len();
        let snapshot = Arc::new(categories);
        inner.publish(snapshot.clone());
        inner.loading.store(false, Ordering::SeqCst);
        inner.emit(CategoryEvent::Loaded { count });
        log::info!("📦 Loaded {} categories", count);
        snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// Current collection in insertion order.
    pub fn list(&self) -> Arc<Vec<Category>> {
        self.inner.snapshot()
    }

    pub fn get(&self, id: &CategoryId) -> Option<Category> {
        self.inner.snapshot().iter().find(|c| &c.id == id).cloned()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CategoryEvent> {
        self.inner.events.subscribe()
    }

    pub async fn create(&self, new: NewCategory) -> Result<Category, StoreError> {
        let inner = self.inner.clone();
        let turn = inner.queue.clone().lock_owned().await;
        tokio::spawn(async move {
            let result = inner.apply_create(turn, new).await;
            inner.report(
                &result,
                "Category added successfully!",
                "Failed to add category. Please try again.",
            );
            result
        })
        .await?
    }

    pub async fn update(&self, id: &CategoryId, patch: CategoryPatch) -> Result<Category, StoreError> {
        let inner = self.inner.clone();
        let id = id.clone();
        let turn = inner.queue.clone().lock_owned().await;
        tokio::spawn(async move {
            let result = inner.apply_update(turn, id, patch).await;
            inner.report(
                &result,
                "Category updated successfully!",
                "Failed to update category. Please try again.",
            );
            result
        })
        .await?
    }

    /// Remove the category with `id`. Succeeds whether or not it existed and
    /// returns the removed record, if any.
    pub async fn delete(&self, id: &CategoryId) -> Result<Option<Category>, StoreError> {
        let inner = self.inner.clone();
        let id = id.clone();
        let turn = inner.queue.clone().lock_owned().await;
        tokio::spawn(async move {
            let result = inner.apply_delete(turn, id).await;
            inner.report(
                &result,
                "Category deleted successfully!",
                "Failed to delete category. Please try again.",
            );
            result
        })
        .await?
    }
}

impl Inner {
    async fn apply_create(
        &self,
        _turn: OwnedMutexGuard<()>,
        new: NewCategory,
    ) -> Result<Category, StoreError> {
        self.simulate_latency().await;

        let current = self.snapshot();
        let category = Category::from_new(next_id(&current), new);
        let mut next = current.as_ref().clone();
        next.push(category.clone());

        self.commit(next)?;
        tracing::debug!(id = %category.id, name = %category.name, "category created");
        self.emit(CategoryEvent::Created(category.clone()));
        Ok(category)
    }

    async fn apply_update(
        &self,
        _turn: OwnedMutexGuard<()>,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Category, StoreError> {
        self.simulate_latency().await;

        let mut next = self.snapshot().as_ref().clone();
        let Some(category) = next.iter_mut().find(|c| c.id == id) else {
            return Err(StoreError::NotFound(id));
        };
        category.apply(&patch);
        let updated = category.clone();

        self.commit(next)?;
        tracing::debug!(id = %updated.id, "category updated");
        self.emit(CategoryEvent::Updated(updated.clone()));
        Ok(updated)
    }

    async fn apply_delete(
        &self,
        _turn: OwnedMutexGuard<()>,
        id: CategoryId,
    ) -> Result<Option<Category>, StoreError> {
        self.simulate_latency().await;

        let current = self.snapshot();
        let removed = current.iter().find(|c| c.id == id).cloned();
        let next: Vec<Category> = current.iter().filter(|c| c.id != id).cloned().collect();

        self.commit(next)?;
        tracing::debug!(id = %id, removed = removed.is_some(), "category deleted");
        self.emit(CategoryEvent::Deleted(id));
        Ok(removed)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Persist `next` and only then make it the in-memory collection.
    fn commit(&self, next: Vec<Category>) -> Result<(), StoreError> {
        self.persist(&next)?;
        self.publish(Arc::new(next));
        Ok(())
    }

    fn persist(&self, categories: &[Category]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(categories)?;
        self.storage.save(CATEGORIES_KEY, &raw)?;
        Ok(())
    }

    fn snapshot(&self) -> Arc<Vec<Category>> {
        match self.categories.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, categories: Arc<Vec<Category>>) {
        let mut guard = match self.categories.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = categories;
    }

    fn emit(&self, event: CategoryEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn report<T>(&self, result: &Result<T, StoreError>, ok: &str, failed: &str) {
        match result {
            Ok(_) => self.notifier.notify(Severity::Success, ok),
            Err(e) => {
                log::error!("Category operation failed: {}", e);
                self.notifier.notify(Severity::Error, failed);
            }
        }
    }
}

/// Millisecond timestamp, bumped past every numeric id already in use.
/// An id of `u64::MAX` cannot be bumped past and is ignored; no timestamp
/// reaches it.
fn next_id(existing: &[Category]) -> CategoryId {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let floor = existing
        .iter()
        .filter_map(|c| c.id.as_millis()?.checked_add(1))
        .max()
        .unwrap_or(0);
    CategoryId::new(now.max(floor).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::stores::notifier::RecordingNotifier;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            item_count: 1,
            image_url: "https://example.com/a.jpg".to_string(),
        }
    }

    fn store_with(storage: MemoryStorage) -> (CategoryStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CategoryStore::open(Arc::new(storage), notifier.clone(), Duration::ZERO);
        (store, notifier)
    }

    fn persisted(storage: &MemoryStorage) -> Vec<Category> {
        let raw = storage.load(CATEGORIES_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn loading_flag_clears_after_load() {
        let store = CategoryStore::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(RecordingNotifier::new()),
            Duration::ZERO,
        );
        assert!(store.is_loading());
        assert!(store.list().is_empty());
        store.load();
        assert!(!store.is_loading());
        assert_eq!(store.list().len(), 6);
    }

    #[test]
    fn seeds_and_persists_defaults_when_absent() {
        let storage = MemoryStorage::new();
        let (store, _) = store_with(storage.clone());
        assert_eq!(store.list().as_ref(), &default_categories());
        assert_eq!(persisted(&storage), default_categories());
    }

    #[test]
    fn malformed_snapshot_falls_back_to_defaults() {
        let storage = MemoryStorage::new().with_value(CATEGORIES_KEY, "{not json");
        let (store, _) = store_with(storage.clone());
        assert_eq!(store.list().as_ref(), &default_categories());
        assert_eq!(persisted(&storage), default_categories());
    }

    #[test]
    fn well_formed_snapshot_is_restored() {
        let stored = vec![Category {
            id: CategoryId::new("42"),
            name: "Hats".into(),
            item_count: 2,
            image_url: "data:image/png;base64,AAAA".into(),
        }];
        let storage =
            MemoryStorage::new().with_value(CATEGORIES_KEY, &serde_json::to_string(&stored).unwrap());
        let (store, _) = store_with(storage);
        assert_eq!(store.list().as_ref(), &stored);
    }

    #[tokio::test]
    async fn create_appends_and_get_finds_it() {
        let storage = MemoryStorage::new();
        let (store, notifier) = store_with(storage.clone());

        let created = store.create(new_category("Shoes")).await.unwrap();
        assert!(!created.id.as_str().is_empty());
        assert_eq!(store.list().last(), Some(&created));
        assert_eq!(store.get(&created.id), Some(created.clone()));
        assert_eq!(persisted(&storage), store.list().as_ref().clone());
        assert_eq!(
            notifier.last(),
            Some((Severity::Success, "Category added successfully!".to_string()))
        );
    }

    #[tokio::test]
    async fn back_to_back_creates_get_unique_ids_in_order() {
        let (store, _) = store_with(MemoryStorage::new());
        let a = store.create(new_category("A")).await.unwrap();
        let b = store.create(new_category("B")).await.unwrap();
        assert_ne!(a.id, b.id);
        let names: Vec<_> = store.list().iter().skip(6).map(|c| c.name.clone()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[tokio::test]
    async fn update_missing_id_reports_not_found() {
        let storage = MemoryStorage::new();
        let (store, notifier) = store_with(storage.clone());
        let before = store.list();

        let err = store
            .update(&CategoryId::new("nope"), CategoryPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id.as_str() == "nope"));
        assert_eq!(store.list(), before);
        assert_eq!(
            notifier.last(),
            Some((
                Severity::Error,
                "Failed to update category. Please try again.".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn delete_reports_removed_record() {
        let (store, _) = store_with(MemoryStorage::new());
        let removed = store.delete(&CategoryId::new("3")).await.unwrap();
        assert_eq!(removed.map(|c| c.name), Some("Formal Wear".to_string()));
        assert!(store.delete(&CategoryId::new("3")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn subscribers_see_committed_changes() {
        let (store, _) = store_with(MemoryStorage::new());
        let mut events = store.subscribe();

        let created = store.create(new_category("Bags")).await.unwrap();
        store.delete(&created.id).await.unwrap();

        assert_eq!(events.recv().await.unwrap(), CategoryEvent::Created(created.clone()));
        assert_eq!(events.recv().await.unwrap(), CategoryEvent::Deleted(created.id));
    }

    #[tokio::test]
    async fn dropped_caller_still_commits() {
        let storage = MemoryStorage::new();
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CategoryStore::open(
            Arc::new(storage.clone()),
            notifier,
            Duration::from_millis(20),
        );
        let mut events = store.subscribe();

        let pending = store.create(new_category("Late"));
        let _ = tokio::time::timeout(Duration::from_millis(1), pending).await;

        let event = events.recv().await.unwrap();
        assert!(matches!(event, CategoryEvent::Created(ref c) if c.name == "Late"));
        assert_eq!(persisted(&storage).len(), 7);
    }

    #[test]
    fn next_id_is_past_existing_numeric_ids() {
        let far_future = u64::MAX / 2;
        let existing = vec![Category {
            id: CategoryId::new(far_future.to_string()),
            name: "x".into(),
            item_count: 0,
            image_url: "u".into(),
        }];
        assert_eq!(next_id(&existing).as_millis(), Some(far_future + 1));
    }

    #[test]
    fn next_id_ignores_ids_that_cannot_be_bumped() {
        let existing = vec![Category {
            id: CategoryId::new(u64::MAX.to_string()),
            name: "x".into(),
            item_count: 0,
            image_url: "u".into(),
        }];
        let id = next_id(&existing).as_millis().unwrap();
        assert!(id > 0 && id < u64::MAX);
    }

    #[tokio::test]
    async fn create_succeeds_next_to_max_numeric_id() {
        let stored = vec![Category {
            id: CategoryId::new(u64::MAX.to_string()),
            name: "Edge".into(),
            item_count: 1,
            image_url: "u".into(),
        }];
        let storage =
            MemoryStorage::new().with_value(CATEGORIES_KEY, &serde_json::to_string(&stored).unwrap());
        let (store, _) = store_with(storage.clone());

        let created = store.create(new_category("After")).await.unwrap();
        assert_ne!(created.id, stored[0].id);
        assert_eq!(persisted(&storage).len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_mutations_commit_in_issue_order() {
        let store = CategoryStore::open(
            Arc::new(MemoryStorage::new()),
            Arc::new(RecordingNotifier::new()),
            Duration::from_millis(1),
        );

        for round in 0..50 {
            let names = [format!("A{round}"), format!("B{round}"), format!("C{round}")];
            let (a, b, c) = tokio::join!(
                store.create(new_category(&names[0])),
                store.create(new_category(&names[1])),
                store.create(new_category(&names[2])),
            );
            a.unwrap();
            b.unwrap();
            c.unwrap();

            let list = store.list();
            let tail: Vec<_> = list[list.len() - 3..].iter().map(|c| c.name.clone()).collect();
            assert_eq!(tail, names, "round {round}");
        }
    }

    /// Reads always fail; writes go to the wrapped memory storage.
    struct UnreadableStorage(MemoryStorage);

    impl Storage for UnreadableStorage {
        fn load(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("disk unavailable"))
        }

        fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.0.save(key, value)
        }

        fn remove(&self, key: &str) -> anyhow::Result<()> {
            self.0.remove(key)
        }
    }

    #[tokio::test]
    async fn unreadable_snapshot_is_kept_until_first_mutation() {
        let storage = MemoryStorage::new().with_value(CATEGORIES_KEY, "[]");
        let store = CategoryStore::open(
            Arc::new(UnreadableStorage(storage.clone())),
            Arc::new(RecordingNotifier::new()),
            Duration::ZERO,
        );

        assert_eq!(store.list().as_ref(), &default_categories());
        assert!(persisted(&storage).is_empty());

        store.create(new_category("Shoes")).await.unwrap();
        assert_eq!(persisted(&storage), store.list().as_ref().clone());
        assert_eq!(persisted(&storage).len(), 7);
    }
}
