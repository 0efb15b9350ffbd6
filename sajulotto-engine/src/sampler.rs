use anyhow::{bail, Result};
use rand::distr::weighted::{Error as WeightError, WeightedIndex};
use rand::prelude::Distribution;
use rand::seq::IndexedRandom;
use rand::Rng;

use sajulotto_db::models::MAX_NUMBER;

/// Tirage pondéré sans remise sur les numéros 1..=45.
///
/// `weights[i]` est le poids du numéro `i + 1`. Les numéros de `exclude` ne sont
/// jamais tirés. Chaque numéro choisi voit son poids remis à zéro ; quand il ne
/// reste plus de poids positif, les tirages suivants sont uniformes parmi les
/// numéros encore disponibles. Demander plus de numéros qu'il n'en reste est une
/// erreur.
pub fn sample_without_replacement<R: Rng + ?Sized>(
    weights: &[f64],
    count: usize,
    exclude: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    let pool = MAX_NUMBER as usize;
    if weights.len() != pool {
        bail!("Vecteur de poids de taille {} (attendu {})", weights.len(), pool);
    }

    // Ramené à [0, 1] pour que la somme reste finie.
    let max = weights
        .iter()
        .copied()
        .filter(|w| w.is_finite() && *w > 0.0)
        .fold(0.0, f64::max);
    let mut remaining: Vec<f64> = weights
        .iter()
        .map(|&w| if w.is_finite() && w > 0.0 { w / max } else { 0.0 })
        .collect();
    let mut available = vec![true; pool];
    for &n in exclude {
        if (1..=MAX_NUMBER).contains(&n) {
            remaining[(n - 1) as usize] = 0.0;
            available[(n - 1) as usize] = false;
        }
    }

    let open = available.iter().filter(|&&a| a).count();
    if count > open {
        bail!("Impossible de tirer {} numéros distincts : {} disponibles", count, open);
    }

    let mut selected = Vec::with_capacity(count);

    while selected.len() < count {
        let idx = match WeightedIndex::new(&remaining) {
            Ok(dist) => dist.sample(rng),
            Err(WeightError::InsufficientNonZero) => {
                let candidates: Vec<usize> = (0..pool).filter(|&i| available[i]).collect();
                match candidates.choose(rng) {
                    Some(&i) => i,
                    None => bail!("Plus aucun numéro disponible"),
                }
            }
            Err(e) => bail!("Poids invalides : {}", e),
        };

        remaining[idx] = 0.0;
        available[idx] = false;
        selected.push((idx + 1) as u8);
    }

    Ok(selected)
}
