use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::{broadcast, Mutex, OwnedMutexGuard};

use super::auth::Authenticator;
use super::notifier::{Notifier, Severity};
use crate::storage::{Storage, SESSION_KEY};
use crate::types::{Identity, StoreError};

const EVENT_CAPACITY: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Identity),
    SignedOut,
}

/// Holds at most one authenticated identity, mirrored to a persisted
/// snapshot.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    storage: Arc<dyn Storage + Send + Sync>,
    notifier: Arc<dyn Notifier>,
    authenticator: Arc<dyn Authenticator>,
    latency: Duration,
    identity: RwLock<Option<Identity>>,
    queue: Arc<Mutex<()>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    pub fn new(
        storage: Arc<dyn Storage + Send + Sync>,
        notifier: Arc<dyn Notifier>,
        authenticator: Arc<dyn Authenticator>,
        latency: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                storage,
                notifier,
                authenticator,
                latency,
                identity: RwLock::new(None),
                queue: Arc::new(Mutex::new(())),
                events,
            }),
        }
    }

    pub fn open(
        storage: Arc<dyn Storage + Send + Sync>,
        notifier: Arc<dyn Notifier>,
        authenticator: Arc<dyn Authenticator>,
        latency: Duration,
    ) -> Self {
        let store = Self::new(storage, notifier, authenticator, latency);
        store.load();
        store
    }

    /// Restore a persisted identity. A malformed snapshot is discarded and
    /// the store starts signed out.
    pub fn load(&self) -> Option<Identity> {
        let inner = &self.inner;
        let restored = match inner.storage.load(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    log::error!("Error parsing stored user: {}", e);
                    if let Err(e) = inner.storage.remove(SESSION_KEY) {
                        log::error!("Failed to discard stored user: {:#}", e);
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read stored user: {:#}", e);
                None
            }
        };

        if let Some(identity) = &restored {
            log::info!("🔐 Restored session for {}", identity.email);
        }
        inner.set(restored.clone());
        restored
    }

    pub fn current(&self) -> Option<Identity> {
        self.inner.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.get().is_some()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub async fn login(&self, email: &str, credential: &str) -> Result<Identity, StoreError> {
        let inner = self.inner.clone();
        let email = email.to_string();
        let credential = credential.to_string();
        let turn = inner.queue.clone().lock_owned().await;
        tokio::spawn(async move {
            let result = inner
                .establish(turn, |auth| auth.login(&email, &credential))
                .await;
            inner.report(&result, "Login successful!", "Login failed. Please try again.");
            result
        })
        .await?
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        credential: &str,
    ) -> Result<Identity, StoreError> {
        let inner = self.inner.clone();
        let name = name.to_string();
        let email = email.to_string();
        let credential = credential.to_string();
        let turn = inner.queue.clone().lock_owned().await;
        tokio::spawn(async move {
            let result = inner
                .establish(turn, |auth| auth.signup(&name, &email, &credential))
                .await;
            inner.report(
                &result,
                "Account created successfully!",
                "Signup failed. Please try again.",
            );
            result
        })
        .await?
    }

    /// Clear the identity and its snapshot. Storage problems are logged.
    pub async fn logout(&self) {
        let inner = self.inner.clone();
        let turn = inner.queue.clone().lock_owned().await;
        let handle = tokio::spawn(async move { inner.clear(turn).await });
        if let Err(e) = handle.await {
            log::error!("Logout task failed: {}", e);
        }
    }
}

impl Inner {
    async fn establish<F>(
        &self,
        _turn: OwnedMutexGuard<()>,
        authenticate: F,
    ) -> Result<Identity, StoreError>
    where
        F: FnOnce(&dyn Authenticator) -> Result<Identity, StoreError>,
    {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let identity = authenticate(self.authenticator.as_ref())?;
        let raw = serde_json::to_string(&identity)?;
        self.storage.save(SESSION_KEY, &raw)?;
        self.set(Some(identity.clone()));

        tracing::debug!(user = %identity.id, "session established");
        let _ = self.events.send(SessionEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn clear(&self, _turn: OwnedMutexGuard<()>) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            log::error!("Failed to remove stored user: {:#}", e);
        }
        self.set(None);
        let _ = self.events.send(SessionEvent::SignedOut);
        self.notifier
            .notify(Severity::Success, "Logged out successfully!");
    }

    fn get(&self) -> Option<Identity> {
        match self.identity.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, identity: Option<Identity>) {
        let mut guard = match self.identity.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = identity;
    }

    fn report(&self, result: &Result<Identity, StoreError>, ok: &str, failed: &str) {
        match result {
            Ok(_) => self.notifier.notify(Severity::Success, ok),
            Err(e) => {
                log::error!("Session operation failed: {}", e);
                self.notifier.notify(Severity::Error, failed);
            }
        }
    }
}
