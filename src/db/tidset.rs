/// Sorted set of transaction indices.
///
/// All operations are linear merges over the two sorted slices, switching to
/// a galloping search when one side is much shorter than the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TidSet {
    tids: Vec<usize>,
}

const GALLOP_RATIO: usize = 32;

impl TidSet {
    pub fn new() -> Self {
        Self { tids: Vec::new() }
    }

    pub fn full(num_transactions: usize) -> Self {
        Self {
            tids: (0..num_transactions).collect(),
        }
    }

    pub(crate) fn push(&mut self, tid: usize) {
        debug_assert!(self.tids.last().map_or(true, |&last| last < tid));
        self.tids.push(tid);
    }

    pub fn len(&self) -> usize {
        self.tids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tids.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.tids
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.tids.iter().copied()
    }

    pub fn intersect(&self, other: &TidSet) -> TidSet {
        let (small, large) = if self.len() <= other.len() {
            (&self.tids, &other.tids)
        } else {
            (&other.tids, &self.tids)
        };

        if small.len() * GALLOP_RATIO < large.len() {
            let tids = small
                .iter()
                .copied()
                .filter(|tid| large.binary_search(tid).is_ok())
                .collect();
            return TidSet { tids };
        }

        let mut tids = Vec::with_capacity(small.len());
        let (mut i, mut j) = (0, 0);
        while i < small.len() && j < large.len() {
            match small[i].cmp(&large[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    tids.push(small[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        TidSet { tids }
    }

    /// Size of the intersection without materializing it.
    pub fn intersection_len(&self, other: &TidSet) -> usize {
        let (a, b) = (&self.tids, &other.tids);
        let (mut i, mut j, mut count) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    count += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        count
    }

    /// Elements of `self` absent from `other`.
    pub fn difference(&self, other: &TidSet) -> TidSet {
        let (a, b) = (&self.tids, &other.tids);
        let mut tids = Vec::with_capacity(a.len());
        let mut j = 0;
        for &tid in a {
            while j < b.len() && b[j] < tid {
                j += 1;
            }
            if j == b.len() || b[j] != tid {
                tids.push(tid);
            }
        }
        TidSet { tids }
    }

    pub fn is_subset(&self, other: &TidSet) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.intersection_len(other) == self.len()
    }
}

impl FromIterator<usize> for TidSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut tids: Vec<usize> = iter.into_iter().collect();
        tids.sort_unstable();
        tids.dedup();
        TidSet { tids }
    }
}
