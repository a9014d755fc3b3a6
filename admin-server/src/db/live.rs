//! Live collection feeds
//!
//! Every mutation republishes the full ordered snapshot of its collection;
//! consumers mirror snapshots wholesale — there is no incremental diffing
//! contract. Each snapshot carries a monotonic per-collection version so a
//! consumer can tell stale pushes from fresh ones.
//!
//! Subscription lifecycle: [`CollectionFeed::subscribe`] hands out a
//! [`Subscription`] the caller owns; it detaches exactly once, either via
//! [`Subscription::unsubscribe`] (which consumes the handle) or on drop.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::broadcast;

/// 资源版本管理器
///
/// 每种资源类型维护独立的版本号，支持原子递增。
/// 客户端可以通过版本号判断快照新旧。
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// One full replacement snapshot of a collection
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub version: u64,
    pub records: Arc<Vec<T>>,
}

impl<T> Snapshot<T> {
    fn empty() -> Self {
        Self {
            version: 0,
            records: Arc::new(Vec::new()),
        }
    }
}

/// Snapshot channel capacity; consumers that lag simply skip to the latest
const FEED_CAPACITY: usize = 16;

/// Push-based feed of full collection snapshots
pub struct CollectionFeed<T> {
    name: &'static str,
    tx: broadcast::Sender<Snapshot<T>>,
    last: RwLock<Snapshot<T>>,
    versions: Arc<ResourceVersions>,
    subscribers: AtomicUsize,
}

impl<T: Clone + Send + 'static> CollectionFeed<T> {
    pub fn new(name: &'static str, versions: Arc<ResourceVersions>) -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            name,
            tx,
            last: RwLock::new(Snapshot::empty()),
            versions,
            subscribers: AtomicUsize::new(0),
        }
    }

    /// Publish a new full snapshot, returning its version
    pub fn publish(&self, records: Vec<T>) -> u64 {
        let snapshot = Snapshot {
            version: self.versions.increment(self.name),
            records: Arc::new(records),
        };
        *self.last.write() = snapshot.clone();
        // No receivers is fine; the snapshot is still retained as `last`
        let _ = self.tx.send(snapshot.clone());
        snapshot.version
    }

    /// Latest published snapshot (version 0 and empty before first publish)
    pub fn latest(&self) -> Snapshot<T> {
        self.last.read().clone()
    }

    /// Subscribe: returns the current snapshot plus a live handle
    pub fn subscribe(self: &Arc<Self>) -> (Snapshot<T>, Subscription<T>) {
        self.subscribers.fetch_add(1, Ordering::Relaxed);
        let subscription = Subscription {
            rx: self.tx.subscribe(),
            feed: Arc::clone(self),
        };
        (self.latest(), subscription)
    }

    /// Number of currently attached subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::Relaxed)
    }
}

/// Live handle onto a [`CollectionFeed`]
///
/// Detaches exactly once: `unsubscribe` consumes the handle, and dropping
/// an un-unsubscribed handle detaches it as well, so a double detach is
/// unrepresentable.
pub struct Subscription<T> {
    rx: broadcast::Receiver<Snapshot<T>>,
    feed: Arc<CollectionFeed<T>>,
}

impl<T: Clone + Send + 'static> Subscription<T> {
    /// Next snapshot push; `None` once the feed is gone
    ///
    /// A lagged receiver skips straight to the latest snapshot — only the
    /// newest full state matters.
    pub async fn recv(&mut self) -> Option<Snapshot<T>> {
        match self.rx.recv().await {
            Ok(snapshot) => Some(snapshot),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(
                    feed = self.feed.name,
                    skipped,
                    "Feed consumer lagged, jumping to latest snapshot"
                );
                Some(self.feed.latest())
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }

    /// Explicitly detach from the feed
    pub fn unsubscribe(self) {
        // Drop does the bookkeeping
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.feed.subscribers.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> Arc<CollectionFeed<i32>> {
        Arc::new(CollectionFeed::new(
            "test",
            Arc::new(ResourceVersions::new()),
        ))
    }

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let feed = feed();
        let (initial, mut sub) = feed.subscribe();
        assert_eq!(initial.version, 0);
        assert!(initial.records.is_empty());

        feed.publish(vec![1, 2, 3]);
        let snapshot = sub.recv().await.unwrap();
        assert_eq!(snapshot.version, 1);
        assert_eq!(*snapshot.records, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn versions_are_monotonic() {
        let feed = feed();
        assert_eq!(feed.publish(vec![1]), 1);
        assert_eq!(feed.publish(vec![2]), 2);
        assert_eq!(feed.latest().version, 2);
        assert_eq!(*feed.latest().records, vec![2]);
    }

    #[tokio::test]
    async fn unsubscribe_detaches_exactly_once() {
        let feed = feed();
        assert_eq!(feed.subscriber_count(), 0);

        let (_, sub_a) = feed.subscribe();
        let (_, sub_b) = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 2);

        sub_a.unsubscribe();
        assert_eq!(feed.subscriber_count(), 1);

        drop(sub_b);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn lagged_subscriber_jumps_to_latest() {
        let feed = feed();
        let (_, mut sub) = feed.subscribe();
        for i in 0..(FEED_CAPACITY as i32 + 8) {
            feed.publish(vec![i]);
        }
        let snapshot = sub.recv().await.unwrap();
        assert_eq!(snapshot.version, feed.latest().version);
    }
}
