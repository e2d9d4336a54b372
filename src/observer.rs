use crate::Item;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hooks invoked by the search driver.
///
/// Implementations must be `Sync`: with parallel dispatch the hooks fire from
/// several rayon workers at once.
pub trait MiningObserver: Sync {
    /// A frequent candidate was formed at recursion `depth` (1 for single items).
    fn on_candidate(&self, _depth: usize) {}

    fn on_accept(&self, _itemset: &[Item], _support: usize) {}

    /// A frequent itemset was dropped because it is not closed.
    fn on_not_closed(&self, _itemset: &[Item], _support: usize) {}

    /// A projected context of roughly `bytes` bytes was built.
    fn on_projection(&self, _bytes: usize) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MiningObserver for NoopObserver {}

/// Counters gathered over a mining run
#[derive(Debug, Default)]
pub struct MiningStats {
    candidates: AtomicUsize,
    accepted: AtomicUsize,
    not_closed: AtomicUsize,
    projections: AtomicUsize,
    projected_bytes: AtomicUsize,
    max_depth: AtomicUsize,
}

/// Plain copy of [`MiningStats`] counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub candidates: usize,
    pub accepted: usize,
    pub not_closed: usize,
    pub projections: usize,
    pub projected_bytes: usize,
    pub max_depth: usize,
}

impl MiningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            candidates: self.candidates.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            not_closed: self.not_closed.load(Ordering::Relaxed),
            projections: self.projections.load(Ordering::Relaxed),
            projected_bytes: self.projected_bytes.load(Ordering::Relaxed),
            max_depth: self.max_depth.load(Ordering::Relaxed),
        }
    }
}

impl MiningObserver for MiningStats {
    fn on_candidate(&self, depth: usize) {
        self.candidates.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    fn on_accept(&self, _itemset: &[Item], _support: usize) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    fn on_not_closed(&self, _itemset: &[Item], _support: usize) {
        self.not_closed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_projection(&self, bytes: usize) {
        self.projections.fetch_add(1, Ordering::Relaxed);
        self.projected_bytes.fetch_add(bytes, Ordering::Relaxed);
    }
}

pub fn estimate_tree_size(num_nodes: usize, num_items: usize) -> usize {
    let node_size = std::mem::size_of::<usize>() * 5 + std::mem::size_of::<Vec<(usize, usize)>>();
    let header_overhead = 64;
    num_nodes * node_size + num_items * std::mem::size_of::<Vec<usize>>() + header_overhead
}

pub fn estimate_rows_size(num_rows: usize, num_items: usize) -> usize {
    num_rows * std::mem::size_of::<(usize, Vec<Item>)>() + num_items * std::mem::size_of::<Item>()
}

pub fn estimate_sets_size(num_sets: usize, num_elements: usize) -> usize {
    num_sets * std::mem::size_of::<(Item, Vec<usize>)>() + num_elements * std::mem::size_of::<usize>()
}
