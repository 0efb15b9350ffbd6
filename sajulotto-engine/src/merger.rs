use anyhow::{anyhow, Result};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use sajulotto_db::models::{HistoricalDraw, MAX_NUMBER, PICK_COUNT};

use crate::pools::{mixed_numbers, pool_for};
use crate::profile::{Element, GenerationRequest, Profile};
use crate::sampler::sample_without_replacement;
use crate::strategy::{distinct, Strategy};
use crate::weights::{WeightPolicy, WeightVector};

/// Taille du lot tiré pour chaque stratégie pondérée.
pub const WEIGHTED_CANDIDATES: usize = 10;

/// Candidats conservés quand le tirage aléatoire accompagne une autre stratégie.
pub const DILUTED_CANDIDATES: usize = 3;

/// Marge de suréchantillonnage pour le remplissage pondéré.
pub const FILL_OVERSAMPLE: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResult {
    pub numbers: [u8; PICK_COUNT],
    pub strategies: Vec<Strategy>,
    pub element: Element,
}

/// Vecteurs de poids calculés au plus une fois par génération.
struct WeightCache<'a> {
    history: &'a [HistoricalDraw],
    cdm: Option<WeightVector>,
    gap: Option<WeightVector>,
}

impl<'a> WeightCache<'a> {
    fn new(history: &'a [HistoricalDraw]) -> Self {
        Self { history, cdm: None, gap: None }
    }

    fn get(&mut self, policy: WeightPolicy) -> &WeightVector {
        let history = self.history;
        let slot = match policy {
            WeightPolicy::Cdm => &mut self.cdm,
            WeightPolicy::ThreeStrategy => &mut self.gap,
        };
        slot.get_or_insert_with(|| policy.compute(history))
    }
}

/// Produit six numéros distincts, triés, dans 1..=45.
///
/// Les candidats de chaque stratégie sont réunis puis mélangés, sans priorité
/// entre stratégies. Si `Random` est combiné à une autre stratégie, seuls trois
/// candidats sont gardés. Le complément vient du vecteur de retard (prioritaire)
/// ou de fréquence quand une stratégie pondérée est active sans `Random`, sinon
/// d'une permutation uniforme des numéros restants.
pub fn generate<R: Rng + ?Sized>(
    strategies: &[Strategy],
    element: Element,
    history: &[HistoricalDraw],
    rng: &mut R,
) -> Result<[u8; PICK_COUNT]> {
    let selected = distinct(strategies);
    let mut weights = WeightCache::new(history);
    let mut candidates = collect_candidates(&selected, element, &mut weights, rng)?;

    log::debug!("Stratégies {:?} : {} candidats retenus", selected, candidates.len());

    if candidates.len() < PICK_COUNT {
        let fill = fill_numbers(&selected, &candidates, &mut weights, rng)?;
        for n in fill {
            if candidates.len() >= PICK_COUNT {
                break;
            }
            if !candidates.contains(&n) {
                candidates.push(n);
            }
        }
    }

    candidates.truncate(PICK_COUNT);
    candidates.sort();

    let numbers: [u8; PICK_COUNT] = candidates
        .try_into()
        .map_err(|v: Vec<u8>| anyhow!("Grille incomplète : {:?}", v))?;
    Ok(numbers)
}

/// Candidats réunis, filtrés, mélangés puis dilués si `Random` accompagne une
/// autre stratégie. `selected` est supposé sans doublon.
fn collect_candidates<R: Rng + ?Sized>(
    selected: &[Strategy],
    element: Element,
    weights: &mut WeightCache<'_>,
    rng: &mut R,
) -> Result<Vec<u8>> {
    let mut candidates: Vec<u8> = Vec::new();

    for &strategy in selected {
        match strategy {
            Strategy::Saju | Strategy::Probability => {
                push_unique(&mut candidates, pool_for(strategy, element));
            }
            Strategy::Mixed => {
                let fixed = mixed_numbers();
                push_unique(&mut candidates, fixed);
                let others: Vec<u8> = (1..=MAX_NUMBER).filter(|n| !fixed.contains(n)).collect();
                if let Some(&extra) = others.choose(rng) {
                    push_unique(&mut candidates, &[extra]);
                }
            }
            Strategy::Cdm | Strategy::ThreeStrategy => {
                if let Some(policy) = WeightPolicy::for_strategy(strategy) {
                    let vector = weights.get(policy);
                    let picked = sample_without_replacement(vector.as_slice(), WEIGHTED_CANDIDATES, &[], rng)?;
                    push_unique(&mut candidates, &picked);
                }
            }
            Strategy::Random => {}
        }
    }

    candidates.retain(|n| (1..=MAX_NUMBER).contains(n));
    candidates.shuffle(rng);

    if selected.contains(&Strategy::Random) && selected.len() > 1 {
        candidates.truncate(DILUTED_CANDIDATES);
    }

    Ok(candidates)
}

/// Politique de pondération du remplissage : `ThreeStrategy` avant `Cdm`,
/// aucune si `Random` est sélectionné.
pub fn fill_policy(strategies: &[Strategy]) -> Option<WeightPolicy> {
    if strategies.contains(&Strategy::Random) {
        None
    } else if strategies.contains(&Strategy::ThreeStrategy) {
        Some(WeightPolicy::ThreeStrategy)
    } else if strategies.contains(&Strategy::Cdm) {
        Some(WeightPolicy::Cdm)
    } else {
        None
    }
}

fn fill_numbers<R: Rng + ?Sized>(
    selected: &[Strategy],
    chosen: &[u8],
    weights: &mut WeightCache<'_>,
    rng: &mut R,
) -> Result<Vec<u8>> {
    let needed = PICK_COUNT.saturating_sub(chosen.len());
    match fill_policy(selected) {
        Some(policy) => {
            let open = MAX_NUMBER as usize - chosen.len();
            let request = (needed + FILL_OVERSAMPLE).min(open);
            let vector = weights.get(policy);
            sample_without_replacement(vector.as_slice(), request, chosen, rng)
        }
        None => {
            let mut rest: Vec<u8> = (1..=MAX_NUMBER).filter(|n| !chosen.contains(n)).collect();
            rest.shuffle(rng);
            Ok(rest)
        }
    }
}

fn push_unique(candidates: &mut Vec<u8>, numbers: &[u8]) {
    for &n in numbers {
        if !candidates.contains(&n) {
            candidates.push(n);
        }
    }
}

/// Point d'entrée complet : profil de naissance puis génération.
pub fn generate_result<R: Rng + ?Sized>(
    request: &GenerationRequest,
    history: &[HistoricalDraw],
    rng: &mut R,
) -> Result<GeneratedResult> {
    let profile = Profile::from_request(request);
    let numbers = generate(&request.strategies, profile.element, history, rng)?;
    Ok(GeneratedResult {
        numbers,
        strategies: request.strategies.clone(),
        element: profile.element,
    })
}
