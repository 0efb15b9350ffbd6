mod config;
mod display;
mod import;
mod narrative;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{api_key_from_env, AppConfig, DEFAULT_CONFIG_PATH};
use crate::display::{
    display_draws, display_fortune, display_import_summary, display_profile, display_results,
    display_weights,
};
use crate::narrative::{build_prompt, fortune_or_fallback, GeminiClient, FAILURE_MESSAGE};
use sajulotto_db::db::{count_draws, db_path, fetch_last_draws, insert_draw, migrate, open_db, seed_sample_if_empty};
use sajulotto_db::models::{
    parse_draw_date, validate_draw, validate_numbers, HistoricalDraw, MAX_NUMBER, PICK_COUNT,
};
use sajulotto_db::rusqlite::Connection;
use sajulotto_engine::merger::generate_result;
use sajulotto_engine::pools::elemental_numbers;
use sajulotto_engine::profile::{GenerationRequest, Profile};
use sajulotto_engine::strategy::{distinct, Strategy};
use sajulotto_engine::weights::gap::gap_days;
use sajulotto_engine::weights::WeightPolicy;

#[derive(Parser)]
#[command(name = "sajulotto", about = "Numéros de loto 6/45 selon le saju et l'historique des tirages")]
struct Cli {
    /// Fichier de configuration JSON
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct BirthArgs {
    /// Année de naissance
    #[arg(short, long, allow_negative_numbers = true)]
    year: i32,

    /// Mois de naissance
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,

    /// Jour de naissance
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=31))]
    day: u32,

    /// Heure de naissance (0-23)
    #[arg(long, default_value = "12", value_parser = clap::value_parser!(u32).range(0..=23))]
    hour: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Afficher le zodiaque et l'élément d'une année de naissance
    Profile {
        #[command(flatten)]
        birth: BirthArgs,
    },

    /// Générer des numéros porte-bonheur
    Generate {
        #[command(flatten)]
        birth: BirthArgs,

        /// Stratégie (une ou deux, option répétable)
        #[arg(short, long = "strategy", value_enum, default_value = "saju")]
        strategies: Vec<Strategy>,

        /// Nombre de grilles
        #[arg(short, long, default_value = "1")]
        grids: usize,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Ne pas demander de récit à l'IA
        #[arg(long)]
        no_fortune: bool,
    },

    /// Lister les derniers tirages
    History {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Afficher le vecteur de poids d'une stratégie pondérée
    Weights {
        #[arg(short, long, value_enum, default_value = "cdm")]
        policy: WeightPolicy,
    },

    /// Importer des tirages depuis un fichier CSV
    Import {
        /// Chemin vers le fichier CSV (séparateur ';')
        #[arg(short, long)]
        file: PathBuf,

        /// Le fichier n'a pas de ligne d'en-tête
        #[arg(long)]
        no_header: bool,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Ajouter un tirage manuellement
    Add,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    let path = config.db_path.as_ref().map(PathBuf::from).unwrap_or_else(db_path);
    let conn = open_db(&path)?;
    migrate(&conn)?;
    seed_sample_if_empty(&conn)?;

    match cli.command {
        Command::Profile { birth } => cmd_profile(&birth),
        Command::Generate {
            birth,
            strategies,
            grids,
            seed,
            no_fortune,
        } => cmd_generate(&conn, &config, &birth, &strategies, grids, seed, no_fortune),
        Command::History { last } => cmd_history(&conn, last),
        Command::Weights { policy } => cmd_weights(&conn, &config, policy),
        Command::Import { file, no_header } => cmd_import(&conn, &file, !no_header),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::Add => cmd_add(&conn),
    }
}

fn request_from(birth: &BirthArgs, strategies: &[Strategy]) -> GenerationRequest {
    GenerationRequest {
        birth_year: birth.year,
        birth_month: birth.month,
        birth_day: birth.day,
        birth_hour: birth.hour,
        strategies: strategies.to_vec(),
    }
}

fn load_history(conn: &Connection, config: &AppConfig) -> Result<Vec<HistoricalDraw>> {
    let n = count_draws(conn)?;
    let window = config.history_window.map_or(n, |w| w.min(n));
    fetch_last_draws(conn, window)
}

fn cmd_profile(birth: &BirthArgs) -> Result<()> {
    let profile = Profile::from_request(&request_from(birth, &[]));
    display_profile(&profile, elemental_numbers(profile.element));
    Ok(())
}

fn cmd_generate(
    conn: &Connection,
    config: &AppConfig,
    birth: &BirthArgs,
    strategies: &[Strategy],
    grids: usize,
    seed: Option<u64>,
    no_fortune: bool,
) -> Result<()> {
    let strategies = distinct(strategies);
    if strategies.len() > 2 {
        bail!("Choisissez au plus deux stratégies ({} demandées)", strategies.len());
    }

    let request = request_from(birth, &strategies);
    let profile = Profile::from_request(&request);
    let history = if strategies.iter().any(Strategy::is_weighted) {
        let history = load_history(conn, config)?;
        log::info!("{} tirages utilisés pour la pondération", history.len());
        history
    } else {
        Vec::new()
    };

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut results = Vec::with_capacity(grids);
    for _ in 0..grids.max(1) {
        results.push(generate_result(&request, &history, &mut rng)?);
    }

    display_profile(&profile, elemental_numbers(profile.element));
    display_results(&results);

    if no_fortune || !config.fortune.enabled {
        return Ok(());
    }

    let prompt = build_prompt(&profile, &results[0].numbers, &strategies);
    let text = match api_key_from_env() {
        None => fortune_or_fallback(None, &prompt),
        Some(key) => match GeminiClient::new(&config.fortune, key) {
            Ok(client) => fortune_or_fallback(Some(&client), &prompt),
            Err(e) => {
                log::warn!("Client IA indisponible : {:#}", e);
                FAILURE_MESSAGE.to_string()
            }
        },
    };
    display_fortune(&text);

    Ok(())
}

fn cmd_history(conn: &Connection, last: u32) -> Result<()> {
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_weights(conn: &Connection, config: &AppConfig, policy: WeightPolicy) -> Result<()> {
    let history = load_history(conn, config)?;
    let weights = policy.compute(&history);
    let gaps = match policy {
        WeightPolicy::ThreeStrategy => Some(gap_days(&history)),
        WeightPolicy::Cdm => None,
    };
    display_weights(policy, &weights, gaps.as_ref().map(|g| g.as_slice()), history.len());
    Ok(())
}

fn cmd_import(conn: &Connection, file: &Path, has_header: bool) -> Result<()> {
    let result = import::import_csv(conn, file, has_header)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_add(conn: &Connection) -> Result<()> {
    println!("Ajout d'un tirage manuellement\n");

    let raw_number = prompt("Numéro du tirage (ex: 1061) : ")?;
    let draw_number: u32 = raw_number
        .parse()
        .with_context(|| format!("Numéro de tirage invalide: '{}'", raw_number))?;
    let date = parse_draw_date(&prompt("Date (AAAA.MM.JJ) : ")?)?;

    let numbers = prompt_numbers()?;
    let bonus = prompt_bonus(&numbers)?;

    validate_draw(&numbers, bonus)?;

    let draw = HistoricalDraw {
        draw_number,
        date,
        numbers,
        bonus,
    };

    println!("\nTirage à insérer :");
    display_draws(std::slice::from_ref(&draw));

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            println!("Ce tirage existe déjà (doublon ignoré).");
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_numbers() -> Result<[u8; PICK_COUNT]> {
    loop {
        let input = prompt(&format!("{} numéros (séparés par des espaces, 1-{}) : ", PICK_COUNT, MAX_NUMBER))?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == PICK_COUNT => {
                let mut arr = [0u8; PICK_COUNT];
                arr.copy_from_slice(&v);
                if validate_numbers(&arr).is_ok() {
                    return Ok(arr);
                }
                println!("Numéros invalides (1-{}, pas de doublons). Réessayez.", MAX_NUMBER);
            }
            _ => println!("Entrez exactement {} numéros. Réessayez.", PICK_COUNT),
        }
    }
}

fn prompt_bonus(numbers: &[u8; PICK_COUNT]) -> Result<u8> {
    loop {
        let input = prompt(&format!("Numéro bonus (1-{}) : ", MAX_NUMBER))?;
        match input.parse::<u8>() {
            Ok(b) if validate_draw(numbers, b).is_ok() => return Ok(b),
            _ => println!("Bonus invalide (1-{}, absent des numéros). Réessayez.", MAX_NUMBER),
        }
    }
}
