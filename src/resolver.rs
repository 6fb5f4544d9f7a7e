// src/resolver.rs
use crate::session::Session;
use crate::types::SearchItem;
use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Turns redirect links into their final destinations, at most `cap` at a time.
pub struct RedirectResolver {
    semaphore: Arc<Semaphore>,
}

impl RedirectResolver {
    pub fn new(cap: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(cap.max(1))),
        }
    }

    /// Resolve every item through `session`. Items whose lookup fails are
    /// dropped from the result.
    pub async fn resolve_batch(&self, session: &Session, items: Vec<SearchItem>) -> Vec<SearchItem> {
        self.resolve_with(items, |url| {
            let session = session.clone();
            async move { session.resolve_redirect(&url).await.ok() }
        })
        .await
    }

    /// Run `resolve` on each item's URL under the concurrency cap and wait
    /// for all of them. Each task fills its own slot; empty slots are dropped.
    pub async fn resolve_with<F, Fut>(&self, items: Vec<SearchItem>, resolve: F) -> Vec<SearchItem>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Option<String>>,
    {
        let mut slots: Vec<Option<SearchItem>> = vec![None; items.len()];
        let mut futures = FuturesUnordered::new();

        for (idx, item) in items.into_iter().enumerate() {
            let semaphore = self.semaphore.clone();
            let lookup = resolve(item.url.clone());

            futures.push(async move {
                let resolved = match semaphore.acquire_owned().await {
                    Ok(_permit) => lookup.await,
                    Err(_) => None,
                };
                (idx, item, resolved)
            });
        }

        while let Some((idx, item, resolved)) = futures.next().await {
            match resolved {
                Some(url) => slots[idx] = Some(SearchItem { url, ..item }),
                None => debug!("Dropping unresolved redirect {}", item.url),
            }
        }

        slots.into_iter().flatten().collect()
    }
}
