use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use sajulotto_engine::profile::Profile;
use sajulotto_engine::strategy::{narrative_labels, Strategy};

use crate::config::FortuneConfig;

pub const PROMPT_TEMPLATE: &str = "
You are a mystical Korean fortune teller specialized in Saju (Four Pillars of Destiny) and Numerology.
The user was born in {year} ({zodiac}, {element} element).
We have generated the following Lucky Lotto Numbers for them: {numbers}.
The strategy used was: {strategy}.

Please provide a short, mystical, and encouraging reading (max 3 sentences).
Explain why these numbers might be lucky for their element ({element}).
If the strategy mentions 사주, emphasize the elemental harmony.
If it is RANDOM or MIXED, emphasize luck and chance.
If it mentions CDM or 3-Strategy, emphasize patterns hidden in past draws.
Keep the tone wise, traditional yet modern.
Output in Korean.
";

pub const NO_KEY_MESSAGE: &str = "AI API Key가 설정되지 않아 운세 해석을 건너뜁니다.";
pub const FAILURE_MESSAGE: &str = "오늘의 운세 연결이 원활하지 않습니다. 하지만 행운은 당신 곁에 있습니다!";
pub const EMPTY_MESSAGE: &str = "운세 정보를 가져올 수 없습니다.";

pub fn build_prompt(profile: &Profile, numbers: &[u8], strategies: &[Strategy]) -> String {
    let numbers = numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    PROMPT_TEMPLATE
        .replace("{year}", &profile.year.to_string())
        .replace("{zodiac}", profile.zodiac.label())
        .replace("{element}", profile.element.label())
        .replace("{numbers}", &numbers)
        .replace("{strategy}", &narrative_labels(strategies))
}

/// Service de texte libre. Le résultat est traité comme opaque.
pub trait FortuneTeller {
    fn tell(&self, prompt: &str) -> Result<String>;
}

pub struct GeminiClient {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

impl GeminiClient {
    pub fn new(config: &FortuneConfig, api_key: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Impossible de créer le client HTTP")?;
        let url = format!(
            "{}/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model
        );
        Ok(Self { client, url, api_key })
    }
}

impl FortuneTeller for GeminiClient {
    fn tell(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .with_context(|| format!("POST {}", self.url))?
            .error_for_status()
            .context("Réponse non-200 du service de récit")?;

        let parsed: GenerateResponse = resp.json().context("Réponse JSON invalide")?;
        Ok(parsed.text())
    }
}

/// Récit pour une grille. Ne renvoie jamais d'erreur : toute défaillance est
/// remplacée par un message fixe.
pub fn fortune_or_fallback(teller: Option<&dyn FortuneTeller>, prompt: &str) -> String {
    let Some(teller) = teller else {
        return NO_KEY_MESSAGE.to_string();
    };
    match teller.tell(prompt) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => EMPTY_MESSAGE.to_string(),
        Err(e) => {
            log::warn!("Récit IA indisponible : {:#}", e);
            FAILURE_MESSAGE.to_string()
        }
    }
}
