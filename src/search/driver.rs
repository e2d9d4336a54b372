use crate::observer::MiningObserver;
use crate::storage::FrequentItemsets;
use crate::support::canonical;
use crate::Item;
use rayon::prelude::*;

/// A frontier item with its support under the current prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub item: Item,
    pub support: usize,
}

/// Projected state of one node of the search.
///
/// A context owns whatever representation its strategy counts with (rows,
/// tid-sets, diffsets, a conditional tree, node lists) restricted to the
/// transactions supporting the current prefix.
pub trait SearchContext: Sized + Sync {
    /// Frequent extensions of the prefix, in the strategy's canonical order.
    fn candidates(&self) -> &[Candidate];

    /// Context for `prefix ∪ {candidates[position]}`; its frontier holds only
    /// frequent items that come after `position` in canonical order.
    fn project(&self, position: usize, min_count: usize) -> Self;

    /// Whether `itemset` (the prefix extended by `candidates[position]`,
    /// sorted) is closed. `child` is the context returned by `project`.
    fn is_closed(&self, itemset: &[Item], support: usize, position: usize, child: &Self) -> bool;

    /// Rough size of the context in bytes.
    fn size_bytes(&self) -> usize;

    /// Every frequent extension of the prefix with its support, when the
    /// context can list them without recursing.
    fn enumerate_all(&self) -> Option<Vec<(Vec<Item>, usize)>> {
        None
    }
}

/// Depth-first branch-and-bound over a [`SearchContext`].
pub struct Driver<'o> {
    min_count: usize,
    closed_only: bool,
    observer: &'o dyn MiningObserver,
}

impl<'o> Driver<'o> {
    pub fn new(min_count: usize, closed_only: bool, observer: &'o dyn MiningObserver) -> Self {
        Self {
            min_count,
            closed_only,
            observer,
        }
    }

    pub fn run<C: SearchContext>(&self, root: &C) -> FrequentItemsets {
        let mut result = FrequentItemsets::new();
        let mut prefix = Vec::new();
        self.search(root, &mut prefix, &mut result);
        result
    }

    /// Runs each top-level branch on the rayon pool and merges the branch
    /// results in canonical order.
    pub fn run_parallel<C: SearchContext>(&self, root: &C) -> FrequentItemsets {
        if let Some(result) = self.shortcut(root, &[]) {
            return result;
        }

        let branches: Vec<FrequentItemsets> = (0..root.candidates().len())
            .into_par_iter()
            .map(|position| {
                let mut result = FrequentItemsets::new();
                let mut prefix = Vec::new();
                self.branch(root, position, &mut prefix, &mut result);
                result
            })
            .collect();

        let mut merged = FrequentItemsets::new();
        for branch in branches {
            merged.merge(branch);
        }
        merged
    }

    fn shortcut<C: SearchContext>(&self, ctx: &C, prefix: &[Item]) -> Option<FrequentItemsets> {
        if self.closed_only {
            return None;
        }
        let patterns = ctx.enumerate_all()?;

        let mut result = FrequentItemsets::new();
        for (suffix, support) in patterns {
            if support < self.min_count {
                continue;
            }
            let mut itemset = prefix.to_vec();
            itemset.extend(suffix);
            self.observer.on_candidate(itemset.len());
            let itemset = canonical(&itemset);
            self.observer.on_accept(&itemset, support);
            result.accept(itemset, support);
        }
        Some(result)
    }

    fn search<C: SearchContext>(&self, ctx: &C, prefix: &mut Vec<Item>, out: &mut FrequentItemsets) {
        if let Some(result) = self.shortcut(ctx, prefix) {
            out.merge(result);
            return;
        }

        for position in 0..ctx.candidates().len() {
            self.branch(ctx, position, prefix, out);
        }
    }

    fn branch<C: SearchContext>(
        &self,
        ctx: &C,
        position: usize,
        prefix: &mut Vec<Item>,
        out: &mut FrequentItemsets,
    ) {
        let candidate = ctx.candidates()[position];
        if candidate.support < self.min_count {
            return;
        }

        prefix.push(candidate.item);
        self.observer.on_candidate(prefix.len());

        let child = ctx.project(position, self.min_count);
        self.observer.on_projection(child.size_bytes());
        tracing::trace!(
            depth = prefix.len(),
            item = candidate.item,
            support = candidate.support,
            frontier = child.candidates().len(),
            "projected"
        );

        let itemset = canonical(prefix);
        if !self.closed_only || ctx.is_closed(&itemset, candidate.support, position, &child) {
            self.observer.on_accept(&itemset, candidate.support);
            out.accept(itemset, candidate.support);
        } else {
            self.observer.on_not_closed(&itemset, candidate.support);
        }

        if !child.candidates().is_empty() {
            self.search(&child, prefix, out);
        }
        prefix.pop();
    }
}
