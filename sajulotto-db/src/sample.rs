use chrono::NaiveDate;

use crate::models::HistoricalDraw;

/// (numéro, date, numéros gagnants, bonus). L'ordre des lignes n'est pas chronologique.
const SAMPLE: [(u32, (i32, u32, u32), [u8; 6], u8); 8] = [
    (600, (2014, 5, 31), [5, 11, 14, 27, 29, 36], 44),
    (599, (2014, 5, 24), [8, 12, 17, 29, 30, 44], 3),
    (1060, (2023, 3, 25), [3, 10, 24, 33, 38, 45], 12),
    (1059, (2023, 3, 18), [7, 10, 22, 25, 34, 40], 27),
    (894, (2020, 1, 18), [19, 32, 37, 40, 41, 45], 2),
    (893, (2020, 1, 11), [1, 15, 17, 23, 25, 41], 10),
    (762, (2017, 7, 8), [10, 12, 18, 31, 38, 41], 42),
    (630, (2014, 12, 27), [3, 4, 15, 22, 28, 40], 41),
];

/// Jeu de tirages historiques fourni avec l'outil.
pub fn sample_draws() -> Vec<HistoricalDraw> {
    SAMPLE
        .iter()
        .filter_map(|&(draw_number, (y, m, d), numbers, bonus)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| HistoricalDraw {
                draw_number,
                date,
                numbers,
                bonus,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate_draw;

    #[test]
    fn test_sample_is_complete() {
        assert_eq!(sample_draws().len(), SAMPLE.len());
    }

    #[test]
    fn test_sample_draws_are_valid() {
        for draw in sample_draws() {
            assert!(validate_draw(&draw.numbers, draw.bonus).is_ok(), "tirage {} invalide", draw.draw_number);
        }
    }
}
