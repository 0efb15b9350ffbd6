use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Variables d'environnement lues, dans l'ordre, pour la clé de l'API.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_CONFIG_PATH: &str = "sajulotto.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FortuneConfig {
    pub enabled: bool,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for FortuneConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Chemin de la base ; `data/sajulotto.db` du répertoire courant si absent.
    pub db_path: Option<String>,
    /// Nombre maximal de tirages utilisés par les stratégies pondérées (tous si absent).
    pub history_window: Option<u32>,
    pub fortune: FortuneConfig,
}

impl AppConfig {
    /// Charge la configuration JSON. Un fichier absent donne la configuration par défaut.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Pas de configuration à {:?}, valeurs par défaut", path);
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {:?}", path))?;
        let config: AppConfig = serde_json::from_str(&json)
            .with_context(|| format!("JSON invalide dans {:?}", path))?;
        Ok(config)
    }
}

pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.db_path.is_none());
        assert!(config.history_window.is_none());
        assert!(config.fortune.enabled);
        assert_eq!(config.fortune.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"history_window": 50, "fortune": {"enabled": false}}"#).unwrap();
        assert_eq!(config.history_window, Some(50));
        assert!(!config.fortune.enabled);
        assert_eq!(config.fortune.timeout_secs, 20);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let config = AppConfig::load(Path::new("/nonexistent/sajulotto.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let path = std::env::temp_dir().join(format!("sajulotto-invalid-{}.json", std::process::id()));
        std::fs::write(&path, "{ pas du json").unwrap();
        assert!(AppConfig::load(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
