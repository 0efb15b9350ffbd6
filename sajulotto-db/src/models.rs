use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

/// Plus grand numéro tirable.
pub const MAX_NUMBER: u8 = 45;

/// Nombre de numéros gagnants par tirage (hors bonus).
pub const PICK_COUNT: usize = 6;

/// Format des dates dans les fichiers d'échange (`2023.03.25`).
pub const DATE_FORMAT: &str = "%Y.%m.%d";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalDraw {
    pub draw_number: u32,
    pub date: NaiveDate,
    pub numbers: [u8; PICK_COUNT],
    pub bonus: u8,
}

impl HistoricalDraw {
    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

pub fn parse_draw_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .with_context(|| format!("Format de date invalide: '{}' (attendu AAAA.MM.JJ)", raw))
}

pub fn format_draw_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn validate_numbers(numbers: &[u8; PICK_COUNT]) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > MAX_NUMBER {
            bail!("Numéro {} hors limites (1-{})", n, MAX_NUMBER);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro en double : {}", numbers[i]);
            }
        }
    }
    Ok(())
}

pub fn validate_draw(numbers: &[u8; PICK_COUNT], bonus: u8) -> Result<()> {
    validate_numbers(numbers)?;
    if bonus < 1 || bonus > MAX_NUMBER {
        bail!("Bonus {} hors limites (1-{})", bonus, MAX_NUMBER);
    }
    if numbers.contains(&bonus) {
        bail!("Le bonus {} figure déjà parmi les numéros", bonus);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&[1, 2, 3, 4, 5, 6], 7).is_ok());
        assert!(validate_draw(&[45, 44, 43, 42, 41, 40], 1).is_ok());
    }

    #[test]
    fn test_validate_draw_out_of_range() {
        assert!(validate_draw(&[0, 2, 3, 4, 5, 6], 7).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 5, 46], 7).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 5, 6], 75).is_err());
    }

    #[test]
    fn test_validate_draw_duplicates() {
        assert!(validate_draw(&[1, 1, 3, 4, 5, 6], 7).is_err());
    }

    #[test]
    fn test_validate_numbers_ignores_bonus() {
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 6]).is_ok());
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 5]).is_err());
    }

    #[test]
    fn test_validate_draw_bonus_in_numbers() {
        assert!(validate_draw(&[1, 2, 3, 4, 5, 6], 6).is_err());
    }

    #[test]
    fn test_parse_draw_date() {
        let date = parse_draw_date("2023.03.25").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 3, 25).unwrap());
        assert_eq!(format_draw_date(&date), "2023.03.25");
        assert!(parse_draw_date("25/03/2023").is_err());
    }

    #[test]
    fn test_contains() {
        let draw = HistoricalDraw {
            draw_number: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            numbers: [1, 2, 3, 4, 5, 6],
            bonus: 7,
        };
        assert!(draw.contains(3));
        assert!(!draw.contains(7));
    }
}
