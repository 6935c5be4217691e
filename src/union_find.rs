/// A flat union-find table over region labels. Every label carries a parent
/// pointer; a label whose parent is itself is the canonical representative of
/// its equivalence class. Canonical labels are always the numerically smallest
/// root of the classes merged into them, which keeps the output labelling
/// reproducible regardless of merge order.
pub(crate) struct LabelLut {
    parent: Vec<usize>,
}

impl LabelLut {
    pub(crate) fn new(n_labels: usize) -> Self {
        LabelLut {
            parent: (0..n_labels).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Resolves a label to its canonical representative by walking parent
    /// pointers. Performs no path compression, so concurrent readers are safe
    /// while the table is not being mutated; compression is deferred to
    /// `flatten`.
    pub(crate) fn find(&self, label: usize) -> usize {
        let mut canonical = label;
        while self.parent[canonical] != canonical {
            canonical = self.parent[canonical];
        }
        canonical
    }

    /// Merges the classes of two labels. The larger root is pointed at the
    /// smaller one, so the smaller label always survives as canonical.
    pub(crate) fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        if root_a < root_b {
            self.parent[root_b] = root_a;
        } else {
            self.parent[root_a] = root_b;
        }
    }

    /// Rewrites every label's entry to point directly at its root, collapsing
    /// all chains built up by the unions of one merge pass. Turns subsequent
    /// lookups into single reads for the relabelling sweep.
    pub(crate) fn flatten(&mut self) {
        for label in 0..self.parent.len() {
            self.parent[label] = self.find(label);
        }
    }
}
