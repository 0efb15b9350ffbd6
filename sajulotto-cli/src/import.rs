use anyhow::{Context, Result};
use sajulotto_db::rusqlite::Connection;
use std::path::Path;

use sajulotto_db::db::insert_draw;
use sajulotto_db::models::{parse_draw_date, validate_draw, HistoricalDraw, PICK_COUNT};

/// Colonnes attendues : numéro ; date (AAAA.MM.JJ) ; six numéros ; bonus.
fn parse_record(record: &csv::StringRecord) -> Result<HistoricalDraw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let raw_number = get(0)?;
    let draw_number = raw_number
        .parse::<u32>()
        .with_context(|| format!("Numéro de tirage invalide: '{}'", raw_number))?;
    let date = parse_draw_date(&get(1)?)?;

    let mut numbers = [0u8; PICK_COUNT];
    for (i, slot) in numbers.iter_mut().enumerate() {
        *slot = get_u8(2 + i)?;
    }
    let bonus = get_u8(2 + PICK_COUNT)?;

    validate_draw(&numbers, bonus)
        .with_context(|| format!("Tirage {} rejeté", draw_number))?;

    Ok(HistoricalDraw {
        draw_number,
        date,
        numbers,
        bonus,
    })
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

/// Importe un fichier `;`. Avec `has_header`, la première ligne est ignorée.
pub fn import_csv(conn: &Connection, path: &Path, has_header: bool) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(has_header)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    if has_header {
        log::info!("Première ligne de {:?} traitée comme en-tête (--no-header pour l'inclure)", path);
    }

    let tx = conn.unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => {
                match parse_record(&record) {
                    Ok(draw) => {
                        match insert_draw(&tx, &draw) {
                            Ok(true) => result.inserted += 1,
                            Ok(false) => result.skipped += 1,
                            Err(e) => {
                                log::error!("Erreur insertion tirage {}: {:#}", result.total_records, e);
                                result.errors += 1;
                            }
                        }
                    }
                    Err(e) => {
                        log::warn!("Erreur parsing ligne {}: {:#}", result.total_records, e);
                        result.errors += 1;
                    }
                }
            }
            Err(e) => {
                log::warn!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}
