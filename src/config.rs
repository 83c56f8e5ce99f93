use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::tasks::refresher::DEFAULT_REFRESH_INTERVAL;
use crate::widget::DEFAULT_HIGHLIGHT;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_CHOICES: &str = "python,javascript";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;

lazy_static! {
    // Choice ids become part of element ids, keep them simple
    static ref CHOICE_ID: Regex = Regex::new(r"^[a-z0-9_-]+$").unwrap();
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
    #[error("Invalid choice id: {0:?}")]
    InvalidChoice(String),
    #[error("No choices configured")]
    NoChoices,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub choices: Vec<String>,
    pub refresh_interval: Duration,
    pub highlight_duration: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Split out from `from_env` so tests don't have to touch the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("VOTE_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let choices = parse_choices(
            &lookup("VOTE_CHOICES").unwrap_or_else(|| DEFAULT_CHOICES.to_string()),
        )?;

        let refresh_ms = parse_or(
            "VOTE_REFRESH_MS",
            lookup("VOTE_REFRESH_MS"),
            DEFAULT_REFRESH_INTERVAL.as_millis() as u64,
        )?;
        let highlight_ms = parse_or(
            "VOTE_HIGHLIGHT_MS",
            lookup("VOTE_HIGHLIGHT_MS"),
            DEFAULT_HIGHLIGHT.as_millis() as u64,
        )?;
        let connect_ms = parse_or(
            "VOTE_CONNECT_TIMEOUT_MS",
            lookup("VOTE_CONNECT_TIMEOUT_MS"),
            DEFAULT_CONNECT_TIMEOUT_MS,
        )?;

        if refresh_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "VOTE_REFRESH_MS".to_string(),
                value: "0".to_string(),
            });
        }

        info!("Using vote API at {} with choices {:?}", api_url, choices);

        Ok(Self {
            api_url,
            choices,
            refresh_interval: Duration::from_millis(refresh_ms),
            highlight_duration: Duration::from_millis(highlight_ms),
            connect_timeout: Duration::from_millis(connect_ms),
        })
    }
}

pub fn parse_choices(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut choices: Vec<String> = Vec::new();
    for choice in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if !CHOICE_ID.is_match(choice) {
            return Err(ConfigError::InvalidChoice(choice.to_string()));
        }
        if !choices.iter().any(|c| c == choice) {
            choices.push(choice.to_string());
        }
    }

    if choices.is_empty() {
        return Err(ConfigError::NoChoices);
    }
    Ok(choices)
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_page() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert_eq!(config.choices, vec!["python", "javascript"]);
        assert_eq!(config.refresh_interval, Duration::from_millis(2000));
        assert_eq!(config.highlight_duration, Duration::from_millis(500));
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("VOTE_API_URL", "http://votes.local:9000/"),
            ("VOTE_CHOICES", "rust, go ,rust"),
            ("VOTE_REFRESH_MS", "750"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://votes.local:9000");
        assert_eq!(config.choices, vec!["rust", "go"]);
        assert_eq!(config.refresh_interval, Duration::from_millis(750));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[("VOTE_REFRESH_MS", "soon")])).unwrap_err(),
            ConfigError::Invalid {
                key: "VOTE_REFRESH_MS".to_string(),
                value: "soon".to_string()
            }
        );
        assert!(matches!(
            Config::from_lookup(lookup(&[("VOTE_REFRESH_MS", "0")])),
            Err(ConfigError::Invalid { .. })
        ));
        assert_eq!(
            parse_choices("python,Java Script").unwrap_err(),
            ConfigError::InvalidChoice("Java Script".to_string())
        );
        assert_eq!(parse_choices(" , ").unwrap_err(), ConfigError::NoChoices);
    }
}
