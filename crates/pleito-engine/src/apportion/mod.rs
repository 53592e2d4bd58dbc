//! Highest-quotient (D'Hondt) seat apportionment with a viability
//! barrier.
//!
//! Seats go one at a time to the entity holding the highest unused
//! quotient `share / (seats_won + 1)`. Ties break on larger raw share,
//! then lexical entity id — deterministic, never random.

use pleito_core::config::ApportionmentConfig;
use pleito_core::errors::ApportionmentError;
use pleito_core::types::EntityId;

/// Converts one vote-share vector into integer seat counts.
pub struct SeatApportioner<'a> {
    config: &'a ApportionmentConfig,
}

impl<'a> SeatApportioner<'a> {
    pub fn new(config: &'a ApportionmentConfig) -> Self {
        Self { config }
    }

    /// Assign `total_seats` seats over `shares`.
    ///
    /// `others` is the residual share outside the universe; it
    /// completes the unit sum but never competes for seats. The
    /// returned counts align with the input order and always sum to
    /// `total_seats`.
    ///
    /// Degenerate inputs follow fallback rules rather than erroring:
    /// everyone below the viability threshold re-admits all entities,
    /// and an all-zero vector distributes seats round-robin in lexical
    /// order.
    pub fn apportion(
        &self,
        shares: &[(EntityId, f64)],
        others: f64,
        total_seats: u32,
    ) -> Result<Vec<u32>, ApportionmentError> {
        if shares.is_empty() {
            return Err(ApportionmentError::EmptyShares);
        }
        for (entity, share) in shares {
            if !share.is_finite() {
                return Err(ApportionmentError::NonFiniteShare {
                    entity: entity.clone(),
                    value: *share,
                });
            }
        }
        let sum: f64 = shares.iter().map(|(_, s)| s).sum::<f64>() + others;
        let tolerance = self.config.share_sum_tolerance;
        if (sum - 1.0).abs() > tolerance {
            return Err(ApportionmentError::UnnormalizedShares { sum, tolerance });
        }

        let mut seats = vec![0u32; shares.len()];
        if total_seats == 0 {
            return Ok(seats);
        }

        // Viability barrier, with fallback when it would bar everyone.
        let threshold = self.config.viability.threshold(total_seats);
        let mut viable: Vec<usize> = (0..shares.len())
            .filter(|&i| shares[i].1 >= threshold)
            .collect();
        if viable.is_empty() {
            viable = (0..shares.len()).collect();
        }

        let viable_mass: f64 = viable.iter().map(|&i| shares[i].1).sum();
        if viable_mass <= f64::EPSILON {
            // All-zero competition: round-robin in lexical order.
            viable.sort_by(|&a, &b| shares[a].0.cmp(&shares[b].0));
            for k in 0..total_seats {
                seats[viable[k as usize % viable.len()]] += 1;
            }
            return Ok(seats);
        }

        for _ in 0..total_seats {
            let mut best = viable[0];
            let mut best_quotient = quotient(shares[best].1, seats[best]);
            for &i in viable.iter().skip(1) {
                let q = quotient(shares[i].1, seats[i]);
                if beats(q, shares[i].1, &shares[i].0, best_quotient, shares[best].1, &shares[best].0)
                {
                    best = i;
                    best_quotient = q;
                }
            }
            seats[best] += 1;
        }

        debug_assert_eq!(seats.iter().sum::<u32>(), total_seats);
        Ok(seats)
    }
}

fn quotient(share: f64, seats_won: u32) -> f64 {
    share / (seats_won + 1) as f64
}

/// Strict "candidate a beats candidate b" ordering: higher quotient,
/// then higher raw share, then lexically smaller entity id.
fn beats(
    quotient_a: f64,
    share_a: f64,
    id_a: &EntityId,
    quotient_b: f64,
    share_b: f64,
    id_b: &EntityId,
) -> bool {
    if quotient_a != quotient_b {
        return quotient_a > quotient_b;
    }
    if share_a != share_b {
        return share_a > share_b;
    }
    id_a < id_b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_shares(pairs: &[(&str, f64)]) -> Vec<(EntityId, f64)> {
        pairs
            .iter()
            .map(|(id, share)| (EntityId::from(*id), *share))
            .collect()
    }

    fn open_config() -> ApportionmentConfig {
        ApportionmentConfig {
            viability: pleito_core::config::ViabilityRule::None,
            ..ApportionmentConfig::default()
        }
    }

    #[test]
    fn test_dhondt_concrete_scenario() {
        // Votes {A: 1000, B: 800, C: 600}, 5 seats, no barrier →
        // quotients give {A: 2, B: 2, C: 1}.
        let total = 2400.0;
        let shares = entity_shares(&[
            ("A", 1000.0 / total),
            ("B", 800.0 / total),
            ("C", 600.0 / total),
        ]);
        let config = open_config();
        let seats = SeatApportioner::new(&config)
            .apportion(&shares, 0.0, 5)
            .unwrap();
        assert_eq!(seats, vec![2, 2, 1]);
    }

    #[test]
    fn test_seats_always_conserved() {
        let shares = entity_shares(&[("A", 0.51), ("B", 0.29), ("C", 0.13), ("D", 0.07)]);
        let config = ApportionmentConfig::default();
        for total_seats in [0u32, 1, 3, 8, 30, 513] {
            let seats = SeatApportioner::new(&config)
                .apportion(&shares, 0.0, total_seats)
                .unwrap();
            assert_eq!(seats.iter().sum::<u32>(), total_seats);
        }
    }

    #[test]
    fn test_viability_threshold_excludes_small_entities() {
        // With 5 seats the electoral quotient is 0.2; C at 0.1 is out.
        let shares = entity_shares(&[("A", 0.5), ("B", 0.4), ("C", 0.1)]);
        let config = ApportionmentConfig::default();
        let seats = SeatApportioner::new(&config)
            .apportion(&shares, 0.0, 5)
            .unwrap();
        assert_eq!(seats[2], 0);
        assert_eq!(seats.iter().sum::<u32>(), 5);
    }

    #[test]
    fn test_everyone_below_threshold_readmits_all() {
        // Fixed 0.9 threshold bars everyone; fallback re-admits all.
        let shares = entity_shares(&[("A", 0.6), ("B", 0.4)]);
        let config = ApportionmentConfig {
            viability: pleito_core::config::ViabilityRule::Fixed { share: 0.9 },
            ..ApportionmentConfig::default()
        };
        let seats = SeatApportioner::new(&config)
            .apportion(&shares, 0.0, 4)
            .unwrap();
        assert_eq!(seats.iter().sum::<u32>(), 4);
        assert!(seats[0] >= seats[1]);
    }

    #[test]
    fn test_all_zero_round_robin_lexical() {
        let shares = entity_shares(&[("C", 0.0), ("A", 0.0), ("B", 0.0)]);
        let config = open_config();
        let seats = SeatApportioner::new(&config)
            .apportion(&shares, 1.0, 4)
            .unwrap();
        // Lexical order A, B, C: A gets the extra fourth seat.
        assert_eq!(seats, vec![1, 2, 1]);
    }

    #[test]
    fn test_single_entity_takes_every_seat() {
        let shares = entity_shares(&[("A", 1.0)]);
        let config = ApportionmentConfig::default();
        let seats = SeatApportioner::new(&config)
            .apportion(&shares, 0.0, 7)
            .unwrap();
        assert_eq!(seats, vec![7]);
    }

    #[test]
    fn test_tie_breaks_by_share_then_id() {
        // Equal shares: the lexically smaller id wins the odd seat.
        let shares = entity_shares(&[("B", 0.5), ("A", 0.5)]);
        let config = open_config();
        let seats = SeatApportioner::new(&config)
            .apportion(&shares, 0.0, 3)
            .unwrap();
        assert_eq!(seats, vec![1, 2]);
    }

    #[test]
    fn test_unnormalized_vector_rejected() {
        let shares = entity_shares(&[("A", 0.4), ("B", 0.3)]);
        let config = ApportionmentConfig::default();
        let err = SeatApportioner::new(&config)
            .apportion(&shares, 0.0, 5)
            .unwrap_err();
        assert!(matches!(err, ApportionmentError::UnnormalizedShares { .. }));
    }

    #[test]
    fn test_empty_shares_rejected() {
        let config = ApportionmentConfig::default();
        let err = SeatApportioner::new(&config)
            .apportion(&[], 1.0, 5)
            .unwrap_err();
        assert!(matches!(err, ApportionmentError::EmptyShares));
    }

    #[test]
    fn test_residual_share_never_wins_seats() {
        // Others holds 60% but every seat still lands on an entity.
        let shares = entity_shares(&[("A", 0.25), ("B", 0.15)]);
        let config = open_config();
        let seats = SeatApportioner::new(&config)
            .apportion(&shares, 0.6, 10)
            .unwrap();
        assert_eq!(seats.iter().sum::<u32>(), 10);
    }
}
