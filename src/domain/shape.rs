//! Forest shape and its closed-form counts

use std::fmt;

use crate::domain::DomainError;

/// Parameters of a uniform forest: `trees` complete trees of branching
/// factor `degree`, each with `depth` levels (root at level 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestShape {
    pub trees: u64,
    pub depth: u32,
    pub degree: u64,
}

impl ForestShape {
    pub fn new(trees: u64, depth: u32, degree: u64) -> Self {
        Self {
            trees,
            depth,
            degree,
        }
    }

    /// Whether a node at `level` is on the last permitted level and
    /// therefore gets no children.
    ///
    /// With `depth == 0` every level counts as last, so roots are never expanded.
    pub fn is_last_level(&self, level: u32) -> bool {
        u64::from(level) + 1 >= u64::from(self.depth)
    }

    /// Edges below a single root: `degree + degree^2 + ... + degree^(depth-1)`.
    fn edges_per_tree(&self) -> Option<u64> {
        if self.depth <= 1 || self.degree == 0 {
            return Some(0);
        }
        if self.degree == 1 {
            return Some(u64::from(self.depth - 1));
        }
        let mut total: u64 = 0;
        let mut level_width: u64 = 1;
        for _ in 1..self.depth {
            level_width = level_width.checked_mul(self.degree)?;
            total = total.checked_add(level_width)?;
        }
        Some(total)
    }

    /// Number of `parent,child,ownership` rows the generator emits.
    ///
    /// Returns `None` if the count does not fit in a `u64`.
    pub fn edge_count(&self) -> Option<u64> {
        self.edges_per_tree()?.checked_mul(self.trees)
    }

    /// Number of distinct node ids, roots included: `trees + edge_count()`.
    ///
    /// For `depth >= 1` and `degree >= 2` this equals
    /// `trees * (degree^depth - 1) / (degree - 1)`, and `trees * depth` for `degree == 1`.
    pub fn node_count(&self) -> Option<u64> {
        self.edge_count()?.checked_add(self.trees)
    }

    /// The total printed by the legacy generator's summary line.
    ///
    /// It is the node count of a perfect forest, not its edge count, and
    /// drops the roots entirely when `depth == 0`.
    pub fn reference_total(&self) -> Option<u64> {
        if self.degree == 1 {
            return self.trees.checked_mul(u64::from(self.depth));
        }
        let per_tree = if self.degree == 0 {
            // (0^L - 1) / (0 - 1)
            if self.depth == 0 {
                0
            } else {
                1
            }
        } else {
            let full = self.degree.checked_pow(self.depth)?;
            (full - 1) / (self.degree - 1)
        };
        self.trees.checked_mul(per_tree)
    }

    /// Width of the widest level across the forest; bounds the work queue.
    pub fn widest_level(&self) -> Option<u64> {
        if self.depth <= 1 || self.degree == 0 {
            return Some(self.trees);
        }
        self.degree
            .checked_pow(self.depth - 1)?
            .checked_mul(self.trees)
    }

    /// Edge count, or an error naming the shape if it overflows.
    pub fn expected_edges(&self) -> Result<u64, DomainError> {
        self.node_count()
            .and(self.edge_count())
            .ok_or_else(|| DomainError::ShapeOverflow(self.to_string()))
    }
}

impl fmt::Display for ForestShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tree(s) with depth {} and node degree {}",
            self.trees, self.depth, self.degree
        )
    }
}
