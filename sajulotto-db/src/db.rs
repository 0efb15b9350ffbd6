use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;

use crate::models::HistoricalDraw;
use crate::sample::sample_draws;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    draw_number   INTEGER PRIMARY KEY,
    date          TEXT NOT NULL,
    number_1      INTEGER NOT NULL,
    number_2      INTEGER NOT NULL,
    number_3      INTEGER NOT NULL,
    number_4      INTEGER NOT NULL,
    number_5      INTEGER NOT NULL,
    number_6      INTEGER NOT NULL,
    bonus         INTEGER NOT NULL
);
";

const ISO_DATE: &str = "%Y-%m-%d";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("sajulotto.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

/// Insère le jeu de tirages fourni avec l'outil si la base est vide.
/// Retourne le nombre de tirages insérés.
pub fn seed_sample_if_empty(conn: &Connection) -> Result<u32> {
    if count_draws(conn)? > 0 {
        return Ok(0);
    }
    let mut inserted = 0;
    for draw in sample_draws() {
        if insert_draw(conn, &draw)? {
            inserted += 1;
        }
    }
    log::info!("{} tirages d'exemple insérés", inserted);
    Ok(inserted)
}

pub fn insert_draw(conn: &Connection, draw: &HistoricalDraw) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (draw_number, date, number_1, number_2, number_3, number_4, number_5, number_6, bonus)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            draw.draw_number,
            draw.date.format(ISO_DATE).to_string(),
            draw.numbers[0],
            draw.numbers[1],
            draw.numbers[2],
            draw.numbers[3],
            draw.numbers[4],
            draw.numbers[5],
            draw.bonus,
        ],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

/// Tirages du plus récent au plus ancien.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<HistoricalDraw>> {
    let mut stmt = conn.prepare(
        "SELECT draw_number, date, number_1, number_2, number_3, number_4, number_5, number_6, bonus
         FROM draws ORDER BY date DESC, draw_number DESC LIMIT ?1"
    )?;
    let rows = stmt.query_map([limit], |row| {
        Ok((
            row.get::<_, u32>(0)?,
            row.get::<_, String>(1)?,
            [
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, u8>(5)?,
                row.get::<_, u8>(6)?,
                row.get::<_, u8>(7)?,
            ],
            row.get::<_, u8>(8)?,
        ))
    })?.collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(draw_number, raw_date, numbers, bonus)| {
            let date = NaiveDate::parse_from_str(&raw_date, ISO_DATE)
                .with_context(|| format!("Date corrompue pour le tirage {}: '{}'", draw_number, raw_date))?;
            Ok(HistoricalDraw { draw_number, date, numbers, bonus })
        })
        .collect()
}

pub fn fetch_all_draws(conn: &Connection) -> Result<Vec<HistoricalDraw>> {
    let n = count_draws(conn)?;
    fetch_last_draws(conn, n)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_draw(number: u32, date: &str) -> HistoricalDraw {
        HistoricalDraw {
            draw_number: number,
            date: NaiveDate::parse_from_str(date, ISO_DATE).unwrap(),
            numbers: [1, 2, 3, 4, 5, 6],
            bonus: 7,
        }
    }

    #[test]
    fn test_insert_and_count() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 0);

        insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let inserted = insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();
        assert!(inserted);
        let inserted = insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();
        assert!(!inserted);
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_fetch_order() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();
        insert_draw(&conn, &test_draw(3, "2024-01-15")).unwrap();
        insert_draw(&conn, &test_draw(2, "2024-01-08")).unwrap();

        let draws = fetch_last_draws(&conn, 10).unwrap();
        let numbers: Vec<u32> = draws.iter().map(|d| d.draw_number).collect();
        assert_eq!(numbers, vec![3, 2, 1]);

        let limited = fetch_last_draws(&conn, 2).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].draw_number, 3);
    }

    #[test]
    fn test_roundtrip_fields() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let draw = HistoricalDraw {
            draw_number: 1060,
            date: NaiveDate::from_ymd_opt(2023, 3, 25).unwrap(),
            numbers: [3, 10, 24, 33, 38, 45],
            bonus: 12,
        };
        insert_draw(&conn, &draw).unwrap();
        let fetched = fetch_all_draws(&conn).unwrap();
        assert_eq!(fetched, vec![draw]);
    }

    #[test]
    fn test_seed_sample_only_once() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let first = seed_sample_if_empty(&conn).unwrap();
        assert_eq!(first as usize, sample_draws().len());
        let second = seed_sample_if_empty(&conn).unwrap();
        assert_eq!(second, 0);
        assert_eq!(count_draws(&conn).unwrap() as usize, sample_draws().len());
    }

    #[test]
    fn test_seed_skipped_when_not_empty() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();

        assert_eq!(seed_sample_if_empty(&conn).unwrap(), 0);
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }
}
