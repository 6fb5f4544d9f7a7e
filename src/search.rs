// src/search.rs
use crate::types::SearchItem;

/// How many pages to request, and how many results to ask for on each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub pages: usize,
    pub per_page: usize,
}

impl PagePlan {
    /// Result offset of the given zero-based page.
    pub fn offset(&self, page: usize) -> usize {
        page * self.per_page
    }
}

/// Split `limit` results into pages of at most `per_page_max`.
pub fn page_plan(limit: usize, per_page_max: usize) -> PagePlan {
    if limit > per_page_max {
        PagePlan {
            pages: limit.div_ceil(per_page_max),
            per_page: per_page_max,
        }
    } else {
        PagePlan {
            pages: 1,
            per_page: limit,
        }
    }
}

/// Accumulation state for one (engine, category) search.
#[derive(Debug)]
pub struct SearchSession {
    limit: usize,
    pages_fetched: usize,
    reported_total: Option<u64>,
    items: Vec<SearchItem>,
}

impl SearchSession {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            pages_fetched: 0,
            reported_total: None,
            items: Vec::new(),
        }
    }

    pub fn record_page(&mut self) {
        self.pages_fetched += 1;
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn reported_total(&self) -> Option<u64> {
        self.reported_total
    }

    pub fn record_total(&mut self, total: u64) {
        self.reported_total = Some(total);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.limit
    }

    /// Append a page's batch, cutting its tail so the running total never
    /// passes the limit. Returns how many items were kept.
    pub fn push_batch(&mut self, mut batch: Vec<SearchItem>) -> usize {
        let room = self.limit.saturating_sub(self.items.len());
        batch.truncate(room);
        let kept = batch.len();
        self.items.extend(batch);
        kept
    }

    pub fn into_items(self) -> Vec<SearchItem> {
        self.items
    }
}
