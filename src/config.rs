use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

use crate::practicum;

/// How long the poller sleeps between cycles unless overridden.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Clone, Debug)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    /// Homework-status endpoint. Defaults to the production API.
    pub endpoint: String,
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// All three credentials must be present and non-blank; the error lists
    /// every missing variable at once.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut required = |name: &'static str| match lookup(name).filter(|v| !v.trim().is_empty())
        {
            Some(value) => value,
            None => {
                missing.push(name);
                String::new()
            }
        };

        let practicum_token = required("PRACTICUM_TOKEN");
        let telegram_token = required("TELEGRAM_TOKEN");
        let telegram_chat_id = required("TELEGRAM_CHAT_ID");

        if !missing.is_empty() {
            return Err(anyhow!(
                "missing required environment variables: {}",
                missing.join(", ")
            ));
        }

        let endpoint = lookup("PRACTICUM_ENDPOINT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| practicum::ENDPOINT.to_string());

        let poll_interval = match lookup("POLL_INTERVAL_SECONDS") {
            Some(value) => Duration::from_secs(
                value
                    .parse::<u64>()
                    .context("POLL_INTERVAL_SECONDS must be a valid number")?,
            ),
            None => DEFAULT_POLL_INTERVAL,
        };

        Ok(Config {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    const ALL_SET: &[(&str, &str)] = &[
        ("PRACTICUM_TOKEN", "practicum-secret"),
        ("TELEGRAM_TOKEN", "telegram-secret"),
        ("TELEGRAM_CHAT_ID", "42"),
    ];

    #[test]
    fn all_credentials_present_uses_defaults() {
        let config = Config::from_lookup(lookup_from(ALL_SET)).unwrap();

        assert_eq!(config.practicum_token, "practicum-secret");
        assert_eq!(config.telegram_token, "telegram-secret");
        assert_eq!(config.telegram_chat_id, "42");
        assert_eq!(config.endpoint, practicum::ENDPOINT);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn each_missing_credential_is_fatal() {
        for dropped in ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"] {
            let lookup = move |name: &str| {
                if name == dropped {
                    return None;
                }
                ALL_SET
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value.to_string())
            };

            let error = Config::from_lookup(lookup).unwrap_err();
            assert!(error.to_string().contains(dropped), "error should name {dropped}");
        }
    }

    #[test]
    fn all_missing_credentials_are_listed_together() {
        let error = Config::from_lookup(|_| None).unwrap_err();
        let message = error.to_string();

        assert!(message.contains("PRACTICUM_TOKEN"));
        assert!(message.contains("TELEGRAM_TOKEN"));
        assert!(message.contains("TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let lookup = |name: &str| {
            if name == "TELEGRAM_TOKEN" {
                return Some("   ".to_string());
            }
            ALL_SET
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        };

        let error = Config::from_lookup(lookup).unwrap_err();
        assert!(error.to_string().contains("TELEGRAM_TOKEN"));
    }

    #[test]
    fn endpoint_and_interval_overrides_are_honored() {
        const WITH_OVERRIDES: &[(&str, &str)] = &[
            ("PRACTICUM_TOKEN", "practicum-secret"),
            ("TELEGRAM_TOKEN", "telegram-secret"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("PRACTICUM_ENDPOINT", "http://localhost:9999/statuses/"),
            ("POLL_INTERVAL_SECONDS", "30"),
        ];

        let config = Config::from_lookup(lookup_from(WITH_OVERRIDES)).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9999/statuses/");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn non_numeric_interval_is_rejected() {
        const BAD_INTERVAL: &[(&str, &str)] = &[
            ("PRACTICUM_TOKEN", "practicum-secret"),
            ("TELEGRAM_TOKEN", "telegram-secret"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("POLL_INTERVAL_SECONDS", "soon"),
        ];

        let error = Config::from_lookup(lookup_from(BAD_INTERVAL)).unwrap_err();
        assert!(error.to_string().contains("POLL_INTERVAL_SECONDS"));
    }
}
