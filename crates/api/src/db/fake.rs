//! In-memory [`UserStore`] for router tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use roster_core::{User, UserDraft, UserId};

use super::{RepositoryError, UserStore};

/// Mirrors the table contract: sequential IDs starting at 1, never reused.
#[derive(Default)]
pub(crate) struct FakeUserStore {
    rows: RwLock<BTreeMap<UserId, User>>,
    next_id: RwLock<i32>,
    failing: AtomicBool,
    delay: Duration,
}

impl FakeUserStore {
    /// A store whose every call fails as if the connection were gone.
    pub(crate) fn failing() -> Self {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        store
    }

    /// A store whose every call takes `delay` before answering.
    pub(crate) fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub(crate) async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    async fn check(&self) -> Result<(), RepositoryError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for FakeUserStore {
    async fn insert(&self, draft: &UserDraft) -> Result<UserId, RepositoryError> {
        self.check().await?;
        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let id = UserId::new(*next_id);
        self.rows
            .write()
            .await
            .insert(id, draft.clone().with_id(id));
        Ok(id)
    }

    async fn select_all(&self) -> Result<Vec<User>, RepositoryError> {
        self.check().await?;
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn select_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        self.check().await?;
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn update_by_id(&self, id: UserId, draft: &UserDraft) -> Result<u64, RepositoryError> {
        self.check().await?;
        let mut rows = self.rows.write().await;
        Ok(rows.get_mut(&id).map_or(0, |row| {
            row.name.clone_from(&draft.name);
            row.age = draft.age;
            1
        }))
    }

    async fn delete_by_id(&self, id: UserId) -> Result<u64, RepositoryError> {
        self.check().await?;
        Ok(u64::from(self.rows.write().await.remove(&id).is_some()))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check().await
    }
}
