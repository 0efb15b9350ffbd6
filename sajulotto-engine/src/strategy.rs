use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Numéros associés à l'élément de naissance
    Saju,
    /// Base fixe + un numéro aléatoire
    Mixed,
    /// Table fixe des numéros « les plus probables »
    Probability,
    /// Tirage uniforme
    Random,
    /// Pondération par fréquence historique
    Cdm,
    /// Pondération par retard (phases de 60/120/180 jours)
    ThreeStrategy,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Saju,
        Strategy::Mixed,
        Strategy::Probability,
        Strategy::Random,
        Strategy::Cdm,
        Strategy::ThreeStrategy,
    ];

    pub fn is_weighted(&self) -> bool {
        matches!(self, Strategy::Cdm | Strategy::ThreeStrategy)
    }

    /// Libellé transmis au récit IA.
    pub fn narrative_label(&self) -> &'static str {
        match self {
            Strategy::Saju => "사주 오행",
            Strategy::Mixed => "MIXED",
            Strategy::Probability => "PROBABILITY",
            Strategy::Random => "RANDOM",
            Strategy::Cdm => "CDM 과학적 분석",
            Strategy::ThreeStrategy => "3-Strategy 간격 분석",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Saju => write!(f, "SAJU"),
            Strategy::Mixed => write!(f, "MIXED"),
            Strategy::Probability => write!(f, "PROBABILITY"),
            Strategy::Random => write!(f, "RANDOM"),
            Strategy::Cdm => write!(f, "CDM"),
            Strategy::ThreeStrategy => write!(f, "3-STRATEGY"),
        }
    }
}

/// Supprime les doublons en conservant l'ordre de sélection.
pub fn distinct(strategies: &[Strategy]) -> Vec<Strategy> {
    let mut out: Vec<Strategy> = Vec::with_capacity(strategies.len());
    for &s in strategies {
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

pub fn narrative_labels(strategies: &[Strategy]) -> String {
    distinct(strategies)
        .iter()
        .map(|s| s.narrative_label())
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_keeps_order() {
        let s = distinct(&[Strategy::Cdm, Strategy::Saju, Strategy::Cdm]);
        assert_eq!(s, vec![Strategy::Cdm, Strategy::Saju]);
    }

    #[test]
    fn test_weighted_tags() {
        let weighted: Vec<Strategy> = Strategy::ALL.into_iter().filter(|s| s.is_weighted()).collect();
        assert_eq!(weighted, vec![Strategy::Cdm, Strategy::ThreeStrategy]);
    }

    #[test]
    fn test_narrative_labels() {
        assert_eq!(narrative_labels(&[Strategy::Cdm, Strategy::Saju]), "CDM 과학적 분석 + 사주 오행");
        assert_eq!(narrative_labels(&[Strategy::Random]), "RANDOM");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Strategy::ThreeStrategy).unwrap();
        assert_eq!(json, "\"three-strategy\"");
        let back: Strategy = serde_json::from_str("\"saju\"").unwrap();
        assert_eq!(back, Strategy::Saju);
    }
}
