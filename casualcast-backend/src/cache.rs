use casualcast_data::FeedSnapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::fetch::{FeedSource, FetchError};

#[derive(Debug)]
struct Cached {
    fetched_at: Instant,
    snapshot: Arc<FeedSnapshot>,
}

/// Keeps the last snapshot of the feed until it is older than `revalidate`.
///
/// Callers are serialised on the entry, so an expired snapshot is fetched
/// once no matter how many pages ask for it at the same time.
#[derive(Debug)]
pub(crate) struct SnapshotCache<S> {
    source: S,
    revalidate: Duration,
    entry: Mutex<Option<Cached>>,
}

impl<S: FeedSource> SnapshotCache<S> {
    pub(crate) fn new(source: S, revalidate: Duration) -> Self {
        Self {
            source,
            revalidate,
            entry: Mutex::new(None),
        }
    }

    pub(crate) fn revalidate(&self) -> Duration {
        self.revalidate
    }

    /// The current snapshot, fetching a new one if the cached one is stale.
    ///
    /// A failed fetch leaves the stale entry in place; the next call tries again.
    pub(crate) async fn get(&self) -> Result<Arc<FeedSnapshot>, FetchError> {
        let mut entry = self.entry.lock().await;
        if let Some(cached) = entry.as_ref() {
            let age = cached.fetched_at.elapsed();
            if age < self.revalidate {
                tracing::debug!("snapshot is {:?} old, reusing it", age);
                return Ok(Arc::clone(&cached.snapshot));
            }
            tracing::debug!("snapshot is {:?} old, regenerating", age);
        }

        // age counts from when the fetch started
        let started = Instant::now();
        let snapshot = Arc::new(self.source.fetch().await?);
        *entry = Some(Cached {
            fetched_at: started,
            snapshot: Arc::clone(&snapshot),
        });
        Ok(snapshot)
    }
}
