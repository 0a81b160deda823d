//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded first when
//! present); CLI flags override them.

use std::env;
use std::path::PathBuf;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// Default record store location (relative to current dir).
pub const DEFAULT_STORE_PATH: &str = ".checkin/records.json";

/// Settings shared by the server and the CLI.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `GEMINI_API_KEY`
    pub gemini_api_key: Option<String>,
    /// `GEMINI_MODEL`
    pub gemini_model: String,
    /// `CHECKIN_STORE`
    pub store_path: PathBuf,
}

impl Settings {
    /// Read settings from the environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            store_path: get("CHECKIN_STORE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(|_| None);
        assert!(settings.gemini_api_key.is_none());
        assert_eq!(settings.gemini_model, DEFAULT_MODEL);
        assert_eq!(settings.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let vars: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "  "),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("CHECKIN_STORE", "/tmp/records.json"),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert!(settings.gemini_api_key.is_none());
        assert_eq!(settings.gemini_model, "gemini-2.5-flash");
        assert_eq!(settings.store_path, PathBuf::from("/tmp/records.json"));
    }
}
