//! Flat ensemble arena — iterations × (entities + residual).
//!
//! Rows live contiguously in one index-addressed buffer, so parallel
//! workers write disjoint slices without locking and per-iteration
//! allocations never alias.

use pleito_core::errors::EngineError;
use pleito_core::types::EntityId;

/// The N sampled outcome vectors produced by one run.
///
/// Columns 0..n hold the entities (sorted by id); the last column is
/// the "others" residual. Every entry is in [0, 1] and each row sums
/// to ≈ 1.
#[derive(Debug, Clone)]
pub struct ProjectionEnsemble {
    entity_ids: Vec<EntityId>,
    iterations: usize,
    width: usize,
    data: Vec<f64>,
}

impl ProjectionEnsemble {
    /// Allocate a zero-filled arena for `iterations` rows.
    pub(crate) fn zeroed(entity_ids: Vec<EntityId>, iterations: usize) -> Self {
        let width = entity_ids.len() + 1;
        Self {
            entity_ids,
            iterations,
            width,
            data: vec![0.0; iterations * width],
        }
    }

    /// Rebuild an ensemble from explicit rows, e.g. one replayed from
    /// storage by the caller. Each row must carry one entry per entity
    /// plus the trailing residual.
    pub fn from_rows(
        entity_ids: Vec<EntityId>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, EngineError> {
        let width = entity_ids.len() + 1;
        let iterations = rows.len();
        let mut data = Vec::with_capacity(iterations * width);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(EngineError::Internal {
                    message: format!(
                        "ensemble row {i} has {} entries, expected {width}",
                        row.len()
                    ),
                });
            }
            data.extend_from_slice(&row);
        }
        Ok(Self {
            entity_ids,
            iterations,
            width,
            data,
        })
    }

    /// Entity ids, in column order.
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.entity_ids
    }

    /// Number of iterations (rows).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Row width: entity count plus the residual column.
    pub fn width(&self) -> usize {
        self.width
    }

    /// One iteration's outcome vector, residual included.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.width..(i + 1) * self.width]
    }

    /// Mutable access to the whole arena, for parallel row fills.
    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Mean of one column across all rows.
    pub fn column_mean(&self, col: usize) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..self.iterations {
            sum += self.data[i * self.width + col];
        }
        sum / self.iterations as f64
    }

    /// Sorted copy of one column, for percentile lookups.
    pub fn column_sorted(&self, col: usize) -> Vec<f64> {
        let mut column: Vec<f64> = (0..self.iterations)
            .map(|i| self.data[i * self.width + col])
            .collect();
        column.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        column
    }
}
