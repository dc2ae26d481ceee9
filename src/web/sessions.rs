//! In-memory session storage that drops records once they expire.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tower_sessions::SessionStore;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion};
use tracing::{debug, error};

/// Session records keyed by id. Expired records are invisible to `load` and
/// removed by [`ExpiredDeletion::delete_expired`].
#[derive(Clone, Debug, Default)]
pub struct SessionCache(Arc<Mutex<HashMap<Id, Record>>>);

impl SessionCache {
    /// Number of records currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    /// True when no records are held.
    pub async fn is_empty(&self) -> bool {
        self.0.lock().await.is_empty()
    }

    /// Spawns a task that calls `delete_expired` every `period`.
    pub fn spawn_sweeper(&self, period: std::time::Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // first tick fires immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(err) = store.delete_expired().await {
                    error!("Failed to delete expired sessions: {}", err);
                }
            }
        })
    }
}

fn is_active(record: &Record, now: OffsetDateTime) -> bool {
    record.expiry_date > now
}

#[async_trait]
impl SessionStore for SessionCache {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.0.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.0.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .0
            .lock()
            .await
            .get(session_id)
            .filter(|record| is_active(record, now))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.0.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SessionCache {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc();
        let mut records = self.0.lock().await;
        let before = records.len();
        records.retain(|_, record| is_active(record, now));
        let removed = before - records.len();
        if removed > 0 {
            debug!("Dropped {} expired sessions", removed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn record(expires_in: Duration) -> Record {
        Record {
            id: Id::default(),
            data: Default::default(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn expired_records_are_hidden_then_deleted() {
        let store = SessionCache::default();
        let mut live = record(Duration::minutes(30));
        let mut stale = record(Duration::seconds(-1));
        store.create(&mut live).await.expect("create live");
        store.create(&mut stale).await.expect("create stale");

        assert_eq!(store.len().await, 2);
        assert!(store.load(&stale.id).await.expect("load").is_none());
        assert_eq!(store.load(&live.id).await.expect("load"), Some(live.clone()));

        store.delete_expired().await.expect("sweep");
        assert_eq!(store.len().await, 1);
        assert!(store.load(&live.id).await.expect("load").is_some());
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = SessionCache::default();
        let mut live = record(Duration::minutes(30));
        store.create(&mut live).await.expect("create");
        store.delete(&live.id).await.expect("delete");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn sweeper_empties_store_after_expiry() {
        let store = SessionCache::default();
        for _ in 0..10 {
            store
                .create(&mut record(Duration::milliseconds(200)))
                .await
                .expect("create");
        }
        let sweeper = store.spawn_sweeper(std::time::Duration::from_millis(50));

        tokio::time::sleep(std::time::Duration::from_millis(600)).await;
        sweeper.abort();

        assert!(store.is_empty().await);
    }
}
