use crate::profile::Element;
use crate::strategy::Strategy;

pub const WOOD_NUMBERS: [u8; 5] = [3, 13, 23, 33, 43];
pub const FIRE_NUMBERS: [u8; 5] = [2, 12, 22, 32, 42];
pub const EARTH_NUMBERS: [u8; 5] = [5, 15, 25, 35, 45];
// 46 dépasse la grille : le fusionneur l'écarte.
pub const METAL_NUMBERS: [u8; 5] = [6, 16, 26, 36, 46];
pub const WATER_NUMBERS: [u8; 5] = [1, 11, 21, 31, 41];

pub const PROBABILITY_NUMBERS: [u8; 6] = [3, 16, 23, 33, 36, 43];

pub const MIXED_BASE: [u8; 4] = [6, 13, 21, 26];
pub const MIXED_MID: [u8; 1] = [34];
const MIXED_FIXED: [u8; 5] = [6, 13, 21, 26, 34];

pub fn elemental_numbers(element: Element) -> &'static [u8] {
    match element {
        Element::Wood => &WOOD_NUMBERS,
        Element::Fire => &FIRE_NUMBERS,
        Element::Earth => &EARTH_NUMBERS,
        Element::Metal => &METAL_NUMBERS,
        Element::Water => &WATER_NUMBERS,
    }
}

/// Base + milieu de la stratégie mixte (le sixième numéro est tiré à la génération).
pub fn mixed_numbers() -> &'static [u8] {
    &MIXED_FIXED
}

/// Ensemble fixe d'une stratégie. Vide pour les stratégies aléatoires ou pondérées.
pub fn pool_for(strategy: Strategy, element: Element) -> &'static [u8] {
    match strategy {
        Strategy::Saju => elemental_numbers(element),
        Strategy::Mixed => mixed_numbers(),
        Strategy::Probability => &PROBABILITY_NUMBERS,
        Strategy::Random | Strategy::Cdm | Strategy::ThreeStrategy => &[],
    }
}
