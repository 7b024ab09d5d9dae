use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use exam_core::model::CourseId;
use storage::{KeyValueRepository, StorageKeys};
use tokio::task::JoinHandle;

const SUPPRESSED: &str = "true";

/// Flags read by the external anti-cheating monitor.
///
/// * the per-course suppression flag, stored client-locally, covers internal
///   navigations;
/// * the ignore-violations flag is process-wide and covers the
///   submit-confirmation dialog.
///
/// Clones share both flags.
#[derive(Clone)]
pub struct ViolationGuard {
    key: String,
    repo: Arc<dyn KeyValueRepository>,
    ignore: Arc<AtomicBool>,
}

impl ViolationGuard {
    #[must_use]
    pub fn new(course: &CourseId, repo: Arc<dyn KeyValueRepository>) -> Self {
        Self {
            key: StorageKeys::for_course(course).suppress_violation().to_string(),
            repo,
            ignore: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn suppress(&self) {
        if let Err(err) = self.repo.set(&self.key, SUPPRESSED).await {
            tracing::warn!(target: "exam.navigation", key = %self.key, error = %err, "could not set suppression flag");
        }
    }

    pub async fn release(&self) {
        if let Err(err) = self.repo.remove(&self.key).await {
            tracing::warn!(target: "exam.navigation", key = %self.key, error = %err, "could not clear suppression flag");
        }
    }

    /// Clear the suppression flag once `delay` has passed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn release_after(&self, delay: Duration) -> JoinHandle<()> {
        let guard = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            guard.release().await;
        })
    }

    /// Whether the suppression flag is currently set. Unreadable storage reads
    /// as not suppressed.
    pub async fn is_suppressed(&self) -> bool {
        matches!(self.repo.get(&self.key).await, Ok(Some(value)) if value == SUPPRESSED)
    }

    /// Set the ignore-violations flag until the returned guard is dropped.
    #[must_use]
    pub fn ignore_violations(&self) -> IgnoreViolations {
        self.ignore.store(true, Ordering::Release);
        IgnoreViolations {
            flag: Arc::clone(&self.ignore),
        }
    }

    #[must_use]
    pub fn is_ignoring(&self) -> bool {
        self.ignore.load(Ordering::Acquire)
    }
}

/// Holds the ignore-violations flag; clears it on drop.
#[must_use = "the flag is cleared as soon as the guard is dropped"]
pub struct IgnoreViolations {
    flag: Arc<AtomicBool>,
}

impl Drop for IgnoreViolations {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
