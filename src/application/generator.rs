//! Breadth-first forest generation
//!
//! Writes a forest of complete uniform trees as `parent,child,ownership` rows.
//! Node ids come from one counter shared by the whole forest and are handed out
//! in the order nodes leave a single FIFO queue, so numbering is breadth-first
//! across all trees, not per tree.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, trace};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{ForestShape, NodeLabeler, Ownership, OwnershipFormat};

/// Header row. The spaces after the commas are part of the format; data rows have none.
pub const CSV_HEADER: &str = "parent, child, ownership";

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0;

/// Counts of what a generation pass actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub roots: u64,
    pub edges: u64,
}

impl GenerationStats {
    /// Distinct node ids: every root plus one child per edge.
    pub fn nodes(&self) -> u64 {
        self.roots + self.edges
    }
}

/// Generates a forest of the given shape.
#[derive(Debug, Clone)]
pub struct ForestGenerator {
    shape: ForestShape,
    labeler: NodeLabeler,
    format: OwnershipFormat,
}

impl ForestGenerator {
    pub fn new(shape: ForestShape) -> Self {
        Self {
            shape,
            labeler: NodeLabeler::default(),
            format: OwnershipFormat::default(),
        }
    }

    pub fn with_labeler(mut self, labeler: NodeLabeler) -> Self {
        self.labeler = labeler;
        self
    }

    pub fn with_format(mut self, format: OwnershipFormat) -> Self {
        self.format = format;
        self
    }

    /// Write the forest to `out`, drawing ownership values from `rng`.
    ///
    /// The writer is not flushed; callers owning a buffered writer flush it.
    /// Shapes whose counts overflow `u64` are rejected before anything is written.
    pub fn generate<W: Write, R: Rng + ?Sized>(
        &self,
        out: W,
        rng: &mut R,
    ) -> ApplicationResult<GenerationStats> {
        self.shape.expected_edges()?;
        self.write_forest(out, rng)
            .map_err(|e| ApplicationError::io("write forest rows", e))
    }

    /// Create (or truncate) `path` and write the forest with a `StdRng` seeded by `seed`.
    #[instrument(skip(self), fields(shape = %self.shape))]
    pub fn generate_file(&self, path: &Path, seed: u64) -> ApplicationResult<GenerationStats> {
        self.shape.expected_edges()?;
        let file = File::create(path).with_path_context("create output", path)?;
        let mut out = BufWriter::new(file);
        let mut rng = StdRng::seed_from_u64(seed);

        let stats = self
            .write_forest(&mut out, &mut rng)
            .with_path_context("write output", path)?;
        out.flush().with_path_context("flush output", path)?;

        info!(
            "wrote {} edges ({} nodes) to {}",
            stats.edges,
            stats.nodes(),
            path.display()
        );
        Ok(stats)
    }

    fn write_forest<W: Write, R: Rng + ?Sized>(
        &self,
        mut out: W,
        rng: &mut R,
    ) -> io::Result<GenerationStats> {
        let shape = &self.shape;
        // callers validated the shape, so the widest level fits
        debug!(
            "generate: {}, widest level {} nodes",
            shape,
            shape.widest_level().unwrap_or(u64::MAX)
        );

        writeln!(out, "{}", CSV_HEADER)?;

        let mut queue: VecDeque<(u64, u32)> = (0..shape.trees).map(|root| (root, 0)).collect();
        let mut next_id = shape.trees;
        let mut stats = GenerationStats {
            roots: shape.trees,
            edges: 0,
        };
        let mut current_level = 0;

        while let Some((parent_id, level)) = queue.pop_front() {
            if level != current_level {
                trace!("level {}: {} rows so far", level, stats.edges);
                current_level = level;
            }
            if shape.is_last_level(level) {
                continue;
            }

            let parent = self.labeler.label(parent_id);
            for child_id in next_id..next_id + shape.degree {
                let ownership = Ownership::sample(rng);
                writeln!(
                    out,
                    "{},{},{}",
                    parent,
                    self.labeler.label(child_id),
                    ownership.format(self.format)
                )?;
                queue.push_back((child_id, level + 1));
            }
            next_id += shape.degree;
            stats.edges += shape.degree;
        }

        Ok(stats)
    }
}
