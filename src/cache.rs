use std::{collections::HashMap, sync::Arc, time::Duration};

use serde_json::Value;
use tokio::{sync::RwLock, time::Instant};

use crate::{
    error::Result,
    sanity::{ContentSource, Query},
};

struct Entry {
    fetched_at: Instant,
    value: Value,
}

/// 按固定时间窗口缓存查询结果
///
/// 窗口内的重复查询直接返回上次的结果；窗口过后同步重新请求并替换缓存。
/// 每次写入时清掉所有过期条目，缓存大小不超过一个窗口内的不同查询数。
/// 请求失败不写入缓存。窗口为零时不缓存。
#[derive(Clone)]
pub struct Revalidate<S> {
    inner: S,
    window: Duration,
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl<S: ContentSource> Revalidate<S> {
    pub fn new(inner: S, window: Duration) -> Self {
        Self {
            inner,
            window,
            entries: Default::default(),
        }
    }

    async fn fresh(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.window)
            .map(|entry| entry.value.clone())
    }
}

impl<S: ContentSource> ContentSource for Revalidate<S> {
    async fn fetch(&self, query: &Query) -> Result<Value> {
        if self.window.is_zero() {
            return self.inner.fetch(query).await;
        }

        let key = query.cache_key();
        if let Some(value) = self.fresh(&key).await {
            tracing::debug!(query = query.name(), "served from cache");
            return Ok(value);
        }

        let value = self.inner.fetch(query).await?;

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.window);
        if entries.len() < before {
            tracing::debug!(evicted = before - entries.len(), "dropped expired entries");
        }
        entries.insert(
            key,
            Entry {
                fetched_at: Instant::now(),
                value: value.clone(),
            },
        );

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use serde_json::json;

    use super::*;
    use crate::error::Error;

    /// 模拟后端：返回当前版本号，可切换为失败
    #[derive(Default)]
    struct Backend {
        version: AtomicUsize,
        calls: AtomicUsize,
        failing: Mutex<bool>,
    }

    impl ContentSource for Arc<Backend> {
        async fn fetch(&self, _query: &Query) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *self.failing.lock().unwrap() {
                return Err(Error::FormatError("backend down"));
            }
            Ok(json!({ "version": self.version.load(Ordering::SeqCst) }))
        }
    }

    fn query() -> Query {
        Query::new("posts", "*[_type == \"post\"]")
    }

    #[tokio::test(start_paused = true)]
    async fn test_serves_stale_within_window() {
        let backend = Arc::new(Backend::default());
        let cache = Revalidate::new(backend.clone(), Duration::from_secs(30));

        assert_eq!(cache.fetch(&query()).await.unwrap()["version"], 0);

        backend.version.store(1, Ordering::SeqCst);
        tokio::time::advance(Duration::from_secs(29)).await;

        assert_eq!(
            cache.fetch(&query()).await.unwrap()["version"],
            0,
            "窗口内应返回缓存的旧数据"
        );
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetches_after_window() {
        let backend = Arc::new(Backend::default());
        let cache = Revalidate::new(backend.clone(), Duration::from_secs(30));

        cache.fetch(&query()).await.unwrap();
        backend.version.store(7, Ordering::SeqCst);
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(cache.fetch(&query()).await.unwrap()["version"], 7);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_params_are_cached_separately() {
        let backend = Arc::new(Backend::default());
        let cache = Revalidate::new(backend.clone(), Duration::from_secs(30));

        cache.fetch(&query().param("slug", "a")).await.unwrap();
        cache.fetch(&query().param("slug", "b")).await.unwrap();
        cache.fetch(&query().param("slug", "a")).await.unwrap();

        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_not_cached() {
        let backend = Arc::new(Backend::default());
        let cache = Revalidate::new(backend.clone(), Duration::from_secs(30));

        *backend.failing.lock().unwrap() = true;
        assert!(cache.fetch(&query()).await.is_err());

        *backend.failing.lock().unwrap() = false;
        assert_eq!(cache.fetch(&query()).await.unwrap()["version"], 0);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_window_always_fetches() {
        let backend = Arc::new(Backend::default());
        let cache = Revalidate::new(backend.clone(), Duration::ZERO);

        cache.fetch(&query()).await.unwrap();
        cache.fetch(&query()).await.unwrap();

        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
        assert!(cache.entries.read().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entries_are_dropped() {
        let backend = Arc::new(Backend::default());
        let cache = Revalidate::new(backend.clone(), Duration::from_secs(30));

        for i in 0..1000 {
            cache.fetch(&query().param("slug", format!("plant-{}", i))).await.unwrap();
        }
        assert_eq!(cache.entries.read().await.len(), 1000);

        tokio::time::advance(Duration::from_secs(3600)).await;
        cache.fetch(&query().param("slug", "fresh")).await.unwrap();

        assert_eq!(cache.entries.read().await.len(), 1, "过期条目应在写入时清除");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unexpired_entries_survive_eviction() {
        let backend = Arc::new(Backend::default());
        let cache = Revalidate::new(backend.clone(), Duration::from_secs(30));

        cache.fetch(&query().param("slug", "old")).await.unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;
        cache.fetch(&query().param("slug", "young")).await.unwrap();
        tokio::time::advance(Duration::from_secs(15)).await;
        cache.fetch(&query().param("slug", "newest")).await.unwrap();

        let entries = cache.entries.read().await;
        assert_eq!(entries.len(), 2);
        assert!(!entries.contains_key(&query().param("slug", "old").cache_key()));
    }
}
