pub mod frequency;
pub mod gap;

use sajulotto_db::models::{HistoricalDraw, MAX_NUMBER};
use serde::{Deserialize, Serialize};

use crate::strategy::Strategy;

pub const POOL_SIZE: usize = MAX_NUMBER as usize;

/// Poids par numéro : l'indice i correspond au numéro i + 1.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector([f64; POOL_SIZE]);

impl WeightVector {
    pub fn from_array(weights: [f64; POOL_SIZE]) -> Self {
        Self(weights)
    }

    /// Poids du numéro `number`, `None` hors de 1..=45.
    pub fn weight(&self, number: u8) -> Option<f64> {
        let idx = number.checked_sub(1)? as usize;
        self.0.get(idx).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn min(&self) -> f64 {
        self.0.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Part de chaque numéro dans le poids total, pour l'affichage.
    pub fn shares(&self) -> Vec<(u8, f64)> {
        let total = self.total();
        self.0
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let share = if total > 0.0 { w / total } else { 1.0 / POOL_SIZE as f64 };
                ((i + 1) as u8, share)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WeightPolicy {
    /// Lissage itératif vers la fréquence observée
    Cdm,
    /// Multiplicateurs par phase de retard
    ThreeStrategy,
}

impl WeightPolicy {
    pub fn for_strategy(strategy: Strategy) -> Option<Self> {
        match strategy {
            Strategy::Cdm => Some(WeightPolicy::Cdm),
            Strategy::ThreeStrategy => Some(WeightPolicy::ThreeStrategy),
            _ => None,
        }
    }

    pub fn compute(&self, history: &[HistoricalDraw]) -> WeightVector {
        match self {
            WeightPolicy::Cdm => frequency::frequency_weights(history),
            WeightPolicy::ThreeStrategy => gap::gap_weights(history),
        }
    }
}

impl std::fmt::Display for WeightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightPolicy::Cdm => write!(f, "CDM"),
            WeightPolicy::ThreeStrategy => write!(f, "3-Strategy"),
        }
    }
}

/// Comptage des numéros gagnants ; les valeurs hors grille sont ignorées.
pub fn count_occurrences(history: &[HistoricalDraw]) -> [u32; POOL_SIZE] {
    let mut counts = [0u32; POOL_SIZE];
    for draw in history {
        for &n in &draw.numbers {
            if n >= 1 && (n as usize) <= POOL_SIZE {
                counts[(n - 1) as usize] += 1;
            }
        }
    }
    counts
}

#[cfg(test)]
pub(crate) fn make_draw(draw_number: u32, date: (i32, u32, u32), numbers: [u8; 6]) -> HistoricalDraw {
    HistoricalDraw {
        draw_number,
        date: chrono::NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        numbers,
        bonus: 45,
    }
}
