//! Candidate ranking — win probabilities from a multi-candidate
//! ensemble and the overall-winner call.

use smallvec::SmallVec;

use pleito_core::errors::EngineError;
use pleito_core::types::{EntityId, Ranking, WinProbability};

use crate::sample::ProjectionEnsemble;

/// Computes per-candidate win probabilities over an ensemble.
pub struct CandidateRanker;

impl CandidateRanker {
    pub fn new() -> Self {
        Self
    }

    /// Win probability per candidate = fraction of iterations in which
    /// that candidate holds the maximum share; iterations with tied
    /// leaders split the credit equally. The residual column never
    /// competes.
    ///
    /// The winner is the highest probability, tie-broken by higher
    /// point estimate, then lexical id.
    pub fn rank(&self, ensemble: &ProjectionEnsemble) -> Result<Ranking, EngineError> {
        let n = ensemble.entity_ids().len();
        if n == 0 || ensemble.iterations() == 0 {
            return Err(EngineError::Internal {
                message: "ranking requires a non-empty ensemble".to_string(),
            });
        }

        let mut wins = vec![0.0f64; n];
        for i in 0..ensemble.iterations() {
            let row = &ensemble.row(i)[..n];
            let mut leaders: SmallVec<[usize; 4]> = SmallVec::new();
            let mut best = f64::NEG_INFINITY;
            for (j, &share) in row.iter().enumerate() {
                if share > best {
                    best = share;
                    leaders.clear();
                    leaders.push(j);
                } else if share == best {
                    leaders.push(j);
                }
            }
            let credit = 1.0 / leaders.len() as f64;
            for &j in &leaders {
                wins[j] += credit;
            }
        }

        let iterations = ensemble.iterations() as f64;
        let points: Vec<f64> = (0..n).map(|col| ensemble.column_mean(col)).collect();

        let mut win_probabilities: Vec<WinProbability> = ensemble
            .entity_ids()
            .iter()
            .enumerate()
            .map(|(j, id)| WinProbability {
                entity: id.clone(),
                probability: wins[j] / iterations,
            })
            .collect();

        let winner = pick_winner(&win_probabilities, &points, ensemble.entity_ids());

        win_probabilities.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.entity.cmp(&b.entity))
        });

        Ok(Ranking {
            win_probabilities,
            winner,
        })
    }
}

impl Default for CandidateRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// Highest probability wins; ties break on point estimate, then id.
/// `probabilities` here is still in entity-id (column) order.
fn pick_winner(
    probabilities: &[WinProbability],
    points: &[f64],
    ids: &[EntityId],
) -> EntityId {
    let mut best = 0;
    for j in 1..probabilities.len() {
        let better = match probabilities[j]
            .probability
            .partial_cmp(&probabilities[best].probability)
        {
            Some(std::cmp::Ordering::Greater) => true,
            Some(std::cmp::Ordering::Less) => false,
            _ => match points[j].partial_cmp(&points[best]) {
                Some(std::cmp::Ordering::Greater) => true,
                Some(std::cmp::Ordering::Less) => false,
                _ => ids[j] < ids[best],
            },
        };
        if better {
            best = j;
        }
    }
    ids[best].clone()
}
