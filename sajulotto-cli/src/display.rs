use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::import::ImportResult;
use sajulotto_db::models::{format_draw_date, HistoricalDraw};
use sajulotto_engine::merger::GeneratedResult;
use sajulotto_engine::profile::Profile;
use sajulotto_engine::weights::gap::NEVER_SEEN_DAYS;
use sajulotto_engine::weights::{WeightPolicy, WeightVector};

/// Couleur d'une boule selon sa dizaine.
pub fn ball_color(number: u8) -> Color {
    match number {
        0..=10 => Color::Yellow,
        11..=20 => Color::Blue,
        21..=30 => Color::Red,
        31..=40 => Color::Grey,
        _ => Color::Green,
    }
}

fn ball_cell(number: u8) -> Cell {
    Cell::new(format!("{:2}", number)).fg(ball_color(number))
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_profile(profile: &Profile, elemental: &[u8]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Naissance", "띠 (Zodiaque)", "오행 (Élément)", "Numéros de l'élément"]);

    table.add_row(vec![
        format!(
            "{}-{:02}-{:02} {:02}h",
            profile.year, profile.month, profile.day, profile.hour
        ),
        profile.zodiac.to_string(),
        profile.element.to_string(),
        join_numbers(elemental),
    ]);
    println!("{table}");
}

pub fn display_results(results: &[GeneratedResult]) {
    println!("\n🎲 Numéros porte-bonheur\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "N1", "N2", "N3", "N4", "N5", "N6", "Stratégies"]);

    for (i, result) in results.iter().enumerate() {
        let mut row = vec![Cell::new(i + 1)];
        row.extend(result.numbers.iter().map(|&n| ball_cell(n)));
        row.push(Cell::new(
            result
                .strategies
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" + "),
        ));
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_fortune(text: &str) {
    println!("\n🔮 운세 & 전략 분석\n");
    println!("{text}");
}

pub fn display_draws(draws: &[HistoricalDraw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Tirage", "Date", "Numéros", "Bonus"]);

    for draw in draws {
        let mut sorted = draw.numbers;
        sorted.sort();

        table.add_row(vec![
            Cell::new(draw.draw_number),
            Cell::new(format_draw_date(&draw.date)),
            Cell::new(join_numbers(&sorted)),
            ball_cell(draw.bonus),
        ]);
    }

    println!("{table}");
}

pub fn display_weights(policy: WeightPolicy, weights: &WeightVector, gaps: Option<&[i64]>, history_len: usize) {
    println!("\n⚖️  Pondération {} sur {} tirages\n", policy, history_len);

    let mut header = vec!["Numéro", "Poids", "Part"];
    if gaps.is_some() {
        header.push("Retard (jours)");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    let mut shares = weights.shares();
    shares.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (number, share) in shares {
        let mut row = vec![
            ball_cell(number),
            Cell::new(weights.weight(number).map_or_else(String::new, |w| format!("{:.3}", w))),
            Cell::new(format!("{:.2} %", share * 100.0)),
        ];
        if let Some(gaps) = gaps {
            let gap = gaps[(number - 1) as usize];
            let label = if gap >= NEVER_SEEN_DAYS {
                "jamais sorti".to_string()
            } else {
                gap.to_string()
            };
            row.push(Cell::new(label));
        }
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}
