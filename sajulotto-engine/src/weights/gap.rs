use sajulotto_db::models::HistoricalDraw;

use super::{WeightVector, POOL_SIZE};

pub const BASE_WEIGHT: f64 = 10.0;

/// Retard attribué à un numéro absent de l'historique (au-delà de la dernière phase).
pub const NEVER_SEEN_DAYS: i64 = 9999;

/// (borne supérieure incluse en jours, multiplicateur). Au-delà : `OVERDUE_MULTIPLIER`.
const PHASES: [(i64, u32); 3] = [(60, 1), (120, 2), (180, 5)];
const OVERDUE_MULTIPLIER: u32 = 12;

pub fn phase_multiplier(gap_days: i64) -> u32 {
    PHASES
        .iter()
        .find(|&&(bound, _)| gap_days <= bound)
        .map(|&(_, multiplier)| multiplier)
        .unwrap_or(OVERDUE_MULTIPLIER)
}

/// Retard en jours de chaque numéro par rapport au tirage le plus récent.
///
/// L'historique est trié par date décroissante avant calcul : l'ordre fourni
/// par l'appelant n'a pas d'importance.
pub fn gap_days(history: &[HistoricalDraw]) -> [i64; POOL_SIZE] {
    let mut gaps = [NEVER_SEEN_DAYS; POOL_SIZE];

    let mut sorted: Vec<&HistoricalDraw> = history.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let Some(latest) = sorted.first().map(|d| d.date) else {
        return gaps;
    };

    for (idx, gap) in gaps.iter_mut().enumerate() {
        let number = (idx + 1) as u8;
        if let Some(draw) = sorted.iter().find(|d| d.contains(number)) {
            *gap = (latest - draw.date).num_days();
        }
    }

    gaps
}

/// Pondération « 3-Strategy » : poids de base × multiplicateur de phase.
pub fn gap_weights(history: &[HistoricalDraw]) -> WeightVector {
    let gaps = gap_days(history);
    let mut weights = [0.0f64; POOL_SIZE];
    for (w, &gap) in weights.iter_mut().zip(gaps.iter()) {
        *w = BASE_WEIGHT * phase_multiplier(gap) as f64;
    }
    WeightVector::from_array(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::make_draw;

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(phase_multiplier(0), 1);
        assert_eq!(phase_multiplier(60), 1);
        assert_eq!(phase_multiplier(61), 2);
        assert_eq!(phase_multiplier(120), 2);
        assert_eq!(phase_multiplier(121), 5);
        assert_eq!(phase_multiplier(180), 5);
        assert_eq!(phase_multiplier(181), 12);
        assert_eq!(phase_multiplier(NEVER_SEEN_DAYS), 12);
    }

    #[test]
    fn test_two_draw_history() {
        // 2024-03-01 - 200 jours = 2023-08-14
        let draws = vec![
            make_draw(2, (2024, 3, 1), [1, 2, 3, 4, 5, 6]),
            make_draw(1, (2023, 8, 14), [7, 8, 9, 10, 11, 12]),
        ];
        let gaps = gap_days(&draws);
        assert_eq!(gaps[6], 200);
        assert_eq!(phase_multiplier(gaps[6]), 12);
        assert_eq!(gaps[0], 0);
        assert_eq!(phase_multiplier(gaps[0]), 1);

        let weights = gap_weights(&draws);
        assert_eq!(weights.weight(7), Some(120.0));
        assert_eq!(weights.weight(1), Some(10.0));
        assert_eq!(weights.weight(45), Some(120.0));
    }

    #[test]
    fn test_most_recent_occurrence_wins() {
        let draws = vec![
            make_draw(3, (2024, 6, 1), [1, 2, 3, 4, 5, 6]),
            make_draw(2, (2024, 4, 1), [20, 21, 22, 23, 24, 25]),
            make_draw(1, (2023, 6, 1), [20, 30, 31, 32, 33, 34]),
        ];
        let gaps = gap_days(&draws);
        assert_eq!(gaps[19], 61);
        assert_eq!(phase_multiplier(gaps[19]), 2);
        assert_eq!(gaps[29], 366);
    }

    #[test]
    fn test_unordered_history_is_sorted() {
        let ordered = vec![
            make_draw(3, (2024, 6, 1), [1, 2, 3, 4, 5, 6]),
            make_draw(2, (2024, 4, 1), [20, 21, 22, 23, 24, 25]),
            make_draw(1, (2023, 6, 1), [20, 30, 31, 32, 33, 34]),
        ];
        let shuffled = vec![ordered[1].clone(), ordered[2].clone(), ordered[0].clone()];
        assert_eq!(gap_days(&ordered), gap_days(&shuffled));
    }

    #[test]
    fn test_empty_history_all_overdue() {
        let weights = gap_weights(&[]);
        for &w in weights.as_slice() {
            assert_eq!(w, BASE_WEIGHT * OVERDUE_MULTIPLIER as f64);
        }
    }
}
