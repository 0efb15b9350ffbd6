use serde::{Deserialize, Serialize};

use crate::strategy::Strategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Element::Wood => "목(Wood)",
            Element::Fire => "화(Fire)",
            Element::Earth => "토(Earth)",
            Element::Metal => "금(Metal)",
            Element::Water => "수(Water)",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zodiac {
    Monkey,
    Rooster,
    Dog,
    Pig,
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Sheep,
}

impl Zodiac {
    pub fn label(&self) -> &'static str {
        match self {
            Zodiac::Monkey => "원숭이(Monkey)",
            Zodiac::Rooster => "닭(Rooster)",
            Zodiac::Dog => "개(Dog)",
            Zodiac::Pig => "돼지(Pig)",
            Zodiac::Rat => "쥐(Rat)",
            Zodiac::Ox => "소(Ox)",
            Zodiac::Tiger => "호랑이(Tiger)",
            Zodiac::Rabbit => "토끼(Rabbit)",
            Zodiac::Dragon => "용(Dragon)",
            Zodiac::Snake => "뱀(Snake)",
            Zodiac::Horse => "말(Horse)",
            Zodiac::Sheep => "양(Sheep)",
        }
    }
}

impl std::fmt::Display for Zodiac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Tiges célestes simplifiées : deux chiffres consécutifs par élément, 0 → Bois.
const STEMS: [Element; 10] = [
    Element::Wood,
    Element::Wood,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Water,
    Element::Water,
];

/// Indexé par `année mod 12` : l'année 0 (et 2016, 2028…) est celle du Singe.
const ZODIACS: [Zodiac; 12] = [
    Zodiac::Monkey,
    Zodiac::Rooster,
    Zodiac::Dog,
    Zodiac::Pig,
    Zodiac::Rat,
    Zodiac::Ox,
    Zodiac::Tiger,
    Zodiac::Rabbit,
    Zodiac::Dragon,
    Zodiac::Snake,
    Zodiac::Horse,
    Zodiac::Sheep,
];

// rem_euclid : une année négative donne toujours un reste dans [0, n).
pub fn element_of(birth_year: i32) -> Element {
    STEMS[birth_year.rem_euclid(10) as usize]
}

pub fn zodiac_of(birth_year: i32) -> Zodiac {
    ZODIACS[birth_year.rem_euclid(12) as usize]
}

pub fn resolve(birth_year: i32) -> (Zodiac, Element) {
    (zodiac_of(birth_year), element_of(birth_year))
}

/// Paramètres d'une demande de génération. Seule l'année influe sur le moteur ;
/// mois, jour et heure sont conservés pour le profil affiché.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub birth_year: i32,
    pub birth_month: u32,
    pub birth_day: u32,
    pub birth_hour: u32,
    pub strategies: Vec<Strategy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub zodiac: Zodiac,
    pub element: Element,
}

impl Profile {
    pub fn from_request(request: &GenerationRequest) -> Self {
        let (zodiac, element) = resolve(request.birth_year);
        Self {
            year: request.birth_year,
            month: request.birth_month,
            day: request.birth_day,
            hour: request.birth_hour,
            zodiac,
            element,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_years() {
        assert_eq!(resolve(1990), (Zodiac::Horse, Element::Wood));
        assert_eq!(resolve(1984), (Zodiac::Rat, Element::Earth));
        assert_eq!(resolve(2024), (Zodiac::Dragon, Element::Earth));
        assert_eq!(resolve(2016), (Zodiac::Monkey, Element::Metal));
        assert_eq!(resolve(1999), (Zodiac::Rabbit, Element::Water));
    }

    #[test]
    fn test_periodicity() {
        for year in -300..3000 {
            assert_eq!(element_of(year), element_of(year + 10), "année {year}");
            assert_eq!(zodiac_of(year), zodiac_of(year + 12), "année {year}");
        }
    }

    #[test]
    fn test_negative_years_normalized() {
        assert_eq!(element_of(-1), Element::Water);
        assert_eq!(element_of(-10), Element::Wood);
        assert_eq!(zodiac_of(-1), Zodiac::Sheep);
        assert_eq!(zodiac_of(-12), Zodiac::Monkey);
        assert_eq!(resolve(i32::MIN), (Zodiac::Rat, Element::Fire));
    }

    #[test]
    fn test_idempotent() {
        let first = resolve(1975);
        for _ in 0..10 {
            assert_eq!(resolve(1975), first);
        }
    }

    #[test]
    fn test_profile_from_request() {
        let request = GenerationRequest {
            birth_year: 1990,
            birth_month: 5,
            birth_day: 17,
            birth_hour: 8,
            strategies: vec![Strategy::Saju],
        };
        let profile = Profile::from_request(&request);
        assert_eq!(profile.zodiac, Zodiac::Horse);
        assert_eq!(profile.element, Element::Wood);
        assert_eq!((profile.month, profile.day, profile.hour), (5, 17, 8));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Element::Metal.to_string(), "금(Metal)");
        assert_eq!(Zodiac::Dragon.to_string(), "용(Dragon)");
    }
}
