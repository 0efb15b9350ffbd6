use sajulotto_db::models::HistoricalDraw;

use super::{count_occurrences, WeightVector, POOL_SIZE};

pub const PRIOR_WEIGHT: f64 = 1.0;
pub const ITERATIONS: usize = 50;
pub const LEARNING_RATE: f64 = 0.05;
pub const WEIGHT_FLOOR: f64 = 0.01;

/// Pondération « CDM » : part d'un a priori uniforme puis pousse chaque poids
/// vers sa fréquence observée, un pas fixe à la fois.
///
/// À chaque itération, avec `total` la somme des poids en début d'itération et
/// `n` le nombre total d'occurrences observées :
/// `w ← max(w + LEARNING_RATE × (observé − w/total × n), WEIGHT_FLOOR)`.
/// Il s'agit d'un lisseur heuristique, pas d'une inférence variationnelle.
pub fn frequency_weights(history: &[HistoricalDraw]) -> WeightVector {
    let observed = count_occurrences(history);
    let total_observed: f64 = observed.iter().map(|&c| c as f64).sum();

    let mut weights = [PRIOR_WEIGHT; POOL_SIZE];

    for _ in 0..ITERATIONS {
        let total: f64 = weights.iter().sum();
        for (w, &count) in weights.iter_mut().zip(observed.iter()) {
            let share = *w / total;
            let gradient = count as f64 - share * total_observed;
            *w = (*w + LEARNING_RATE * gradient).max(WEIGHT_FLOOR);
        }
    }

    let weights = WeightVector::from_array(weights);
    log::debug!(
        "Pondération CDM : {} occurrences sur {} tirages, poids minimal {:.3}",
        total_observed,
        history.len(),
        weights.min()
    );
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::make_draw;

    fn sample() -> Vec<HistoricalDraw> {
        vec![
            make_draw(3, (2024, 3, 2), [1, 2, 3, 4, 5, 6]),
            make_draw(2, (2024, 2, 24), [1, 2, 3, 10, 11, 12]),
            make_draw(1, (2024, 2, 17), [1, 20, 21, 22, 23, 24]),
        ]
    }

    #[test]
    fn test_uniform_without_history() {
        let weights = frequency_weights(&[]);
        for &w in weights.as_slice() {
            assert!((w - PRIOR_WEIGHT).abs() < 1e-12);
        }
    }

    #[test]
    fn test_frequent_numbers_weigh_more() {
        let weights = frequency_weights(&sample());
        assert!(weights.weight(1) > weights.weight(2), "1 sort 3 fois, 2 sort 2 fois");
        assert!(weights.weight(2) > weights.weight(4));
        assert!(weights.weight(4) > weights.weight(45));
    }

    #[test]
    fn test_floor_respected() {
        let weights = frequency_weights(&sample());
        assert!(weights.min() >= WEIGHT_FLOOR);
    }

    #[test]
    fn test_unseen_numbers_share_weight() {
        let weights = frequency_weights(&sample());
        assert!((weights.weight(40).unwrap() - weights.weight(45).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let draws = sample();
        assert_eq!(frequency_weights(&draws), frequency_weights(&draws));
    }
}
