use std::collections::{BTreeMap, BTreeSet};

/// Records, for each small region touched during a scan, the set of distinct
/// canonical labels seen across its 4-connected neighbourhood. One
/// accumulator is owned by each scan tile, so no locking is needed during
/// the parallel phase; the per-tile maps are absorbed into one after the
/// scan barrier. Ordered maps keep the reduction and the neighbour
/// resolution deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct AdjacencyAccumulator {
    neighbours: BTreeMap<usize, BTreeSet<usize>>,
}

impl AdjacencyAccumulator {
    pub(crate) fn new() -> Self {
        AdjacencyAccumulator {
            neighbours: BTreeMap::new(),
        }
    }

    /// Inserts `neighbour` into the set for `small_label`. The caller passes
    /// canonical labels and has already checked the two differ.
    pub(crate) fn record(&mut self, small_label: usize, neighbour: usize) {
        self.neighbours
            .entry(small_label)
            .or_default()
            .insert(neighbour);
    }

    /// Set-unions another accumulator into this one, key by key. A label
    /// recorded by two different tiles keeps the union of both neighbour
    /// sets.
    pub(crate) fn absorb(mut self, other: AdjacencyAccumulator) -> Self {
        for (small_label, neighbours) in other.neighbours {
            self.neighbours
                .entry(small_label)
                .or_default()
                .extend(neighbours);
        }
        self
    }

    /// The recorded small labels and their neighbour sets, in ascending
    /// label order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> {
        self.neighbours
            .iter()
            .map(|(&small_label, neighbours)| (small_label, neighbours))
    }
}
