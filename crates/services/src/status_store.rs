use std::sync::Arc;

use exam_core::model::{CourseId, QuestionId, QuestionStatusMap, StatusFlags};
use storage::{KeyValueRepository, StorageKeys};
use tokio::sync::Mutex;

use crate::error::StatusStoreError;

#[derive(Debug, Clone, Default)]
struct StatusMaps {
    visited: QuestionStatusMap,
    attempted: QuestionStatusMap,
}

/// Visited/attempted flags for one exam attempt, mirrored to client-local
/// storage on every mutation.
///
/// Clones share state. A mutation and its write-back run under one lock, so
/// storage always ends up holding the latest full map.
#[derive(Clone)]
pub struct StatusStore {
    keys: StorageKeys,
    repo: Arc<dyn KeyValueRepository>,
    maps: Arc<Mutex<StatusMaps>>,
}

impl StatusStore {
    /// Hydrate both maps for `course`.
    ///
    /// Never fails: a missing, unreadable or malformed map loads as empty.
    pub async fn load(course: &CourseId, repo: Arc<dyn KeyValueRepository>) -> Self {
        let keys = StorageKeys::for_course(course);
        let visited = read_map(repo.as_ref(), keys.visited()).await;
        let attempted = read_map(repo.as_ref(), keys.attempted()).await;
        tracing::debug!(
            target: "exam.store",
            course = %course,
            visited = visited.len(),
            attempted = attempted.len(),
            "status store hydrated"
        );
        Self {
            keys,
            repo,
            maps: Arc::new(Mutex::new(StatusMaps { visited, attempted })),
        }
    }

    /// Flag `id` as visited and persist the visited map.
    ///
    /// # Errors
    ///
    /// Returns `StatusStoreError` if the write-back fails; the in-memory flag
    /// stays set.
    pub async fn mark_visited(&self, id: &QuestionId) -> Result<(), StatusStoreError> {
        let mut maps = self.maps.lock().await;
        maps.visited.mark(id.clone());
        let encoded = maps.visited.to_json();
        self.repo.set(self.keys.visited(), &encoded).await?;
        Ok(())
    }

    /// Flag `id` as attempted and persist the attempted map.
    ///
    /// # Errors
    ///
    /// Returns `StatusStoreError` if the write-back fails; the in-memory flag
    /// stays set.
    pub async fn mark_attempted(&self, id: &QuestionId) -> Result<(), StatusStoreError> {
        let mut maps = self.maps.lock().await;
        maps.attempted.mark(id.clone());
        let encoded = maps.attempted.to_json();
        self.repo.set(self.keys.attempted(), &encoded).await?;
        Ok(())
    }

    pub async fn get(&self, id: &QuestionId) -> StatusFlags {
        let maps = self.maps.lock().await;
        StatusFlags::lookup(id, &maps.visited, &maps.attempted)
    }

    /// Copies of the visited and attempted maps.
    pub async fn maps(&self) -> (QuestionStatusMap, QuestionStatusMap) {
        let maps = self.maps.lock().await;
        (maps.visited.clone(), maps.attempted.clone())
    }
}

async fn read_map(repo: &dyn KeyValueRepository, key: &str) -> QuestionStatusMap {
    let raw = match repo.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return QuestionStatusMap::new(),
        Err(err) => {
            tracing::warn!(target: "exam.store", key, error = %err, "status map unreadable");
            return QuestionStatusMap::new();
        }
    };
    QuestionStatusMap::from_json(&raw).unwrap_or_else(|err| {
        tracing::warn!(target: "exam.store", key, error = %err, "discarding malformed status map");
        QuestionStatusMap::new()
    })
}
