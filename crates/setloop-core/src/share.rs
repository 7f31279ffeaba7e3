//! Share-link codec.
//!
//! A workout is shared as a query string:
//!
//! ```text
//! exercises=Push-ups%2CSquats&exerciseTime=30&restTime=15
//! ```
//!
//! Exercise names are joined on `,`. Decoding is lenient: absent, empty,
//! non-numeric or unsupported values are dropped rather than reported.

use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use crate::error::ConfigError;
use crate::storage::{is_supported_duration, WorkoutConfig};

pub const EXERCISES_PARAM: &str = "exercises";
pub const EXERCISE_TIME_PARAM: &str = "exerciseTime";
pub const REST_TIME_PARAM: &str = "restTime";

const EXERCISE_DELIMITER: char = ',';

/// The subset of a [`WorkoutConfig`] a share link managed to carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedConfig {
    pub exercises: Option<Vec<String>>,
    pub exercise_duration: Option<u32>,
    pub rest_duration: Option<u32>,
}

impl SharedConfig {
    pub fn is_empty(&self) -> bool {
        self.exercises.is_none() && self.exercise_duration.is_none() && self.rest_duration.is_none()
    }

    /// Overwrite the fields this link carries.
    pub fn apply_to(&self, config: &mut WorkoutConfig) {
        if let Some(exercises) = &self.exercises {
            config.exercises = exercises.clone();
            config.ensure_blank_slot();
        }
        if let Some(secs) = self.exercise_duration {
            config.exercise_duration = secs;
        }
        if let Some(secs) = self.rest_duration {
            config.rest_duration = secs;
        }
    }
}

/// Encode the shareable part of `config` as a query string.
pub fn encode(config: &WorkoutConfig) -> String {
    let exercises = config
        .valid_exercises()
        .join(&EXERCISE_DELIMITER.to_string());
    form_urlencoded::Serializer::new(String::new())
        .append_pair(EXERCISES_PARAM, &exercises)
        .append_pair(EXERCISE_TIME_PARAM, &config.exercise_duration.to_string())
        .append_pair(REST_TIME_PARAM, &config.rest_duration.to_string())
        .finish()
}

/// Attach the encoded config to `base`, replacing any existing query.
pub fn share_url(base: &str, config: &WorkoutConfig) -> Result<Url, ConfigError> {
    let mut url = Url::parse(base).map_err(|e| ConfigError::InvalidValue {
        key: "base".to_string(),
        message: e.to_string(),
    })?;
    url.set_query(Some(&encode(config)));
    Ok(url)
}

/// Decode a query string, a `?`-prefixed query, or a full URL.
pub fn decode(input: &str) -> SharedConfig {
    let input = input.trim();
    let query = match Url::parse(input) {
        Ok(url) if url.query().is_some() => url.query().unwrap_or_default().to_string(),
        _ => input.trim_start_matches('?').to_string(),
    };

    let mut shared = SharedConfig::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            EXERCISES_PARAM if !value.is_empty() => {
                shared.exercises = Some(
                    value
                        .split(EXERCISE_DELIMITER)
                        .map(str::to_string)
                        .collect(),
                );
            }
            EXERCISE_TIME_PARAM => {
                if let Some(secs) = parse_duration(&value) {
                    shared.exercise_duration = Some(secs);
                }
            }
            REST_TIME_PARAM => {
                if let Some(secs) = parse_duration(&value) {
                    shared.rest_duration = Some(secs);
                }
            }
            _ => {}
        }
    }
    shared
}

fn parse_duration(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|secs| is_supported_duration(*secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_skips_blank_exercises() {
        let config = WorkoutConfig {
            exercises: vec!["Push-ups".into(), "".into(), "Jumping Jacks".into(), "".into()],
            exercise_duration: 45,
            rest_duration: 15,
        };
        assert_eq!(
            encode(&config),
            "exercises=Push-ups%2CJumping+Jacks&exerciseTime=45&restTime=15"
        );
    }

    #[test]
    fn decode_reads_what_encode_writes() {
        let config = WorkoutConfig {
            exercises: vec!["A & B".into(), "C".into(), "".into()],
            exercise_duration: 60,
            rest_duration: 30,
        };
        let shared = decode(&encode(&config));
        assert_eq!(
            shared.exercises,
            Some(vec!["A & B".to_string(), "C".to_string()])
        );
        assert_eq!(shared.exercise_duration, Some(60));
        assert_eq!(shared.rest_duration, Some(30));
    }

    #[test]
    fn decode_accepts_full_url_and_leading_question_mark() {
        let from_url = decode("https://example.com/timer?exerciseTime=90");
        assert_eq!(from_url.exercise_duration, Some(90));

        let from_query = decode("?restTime=120");
        assert_eq!(from_query.rest_duration, Some(120));
    }

    #[test]
    fn decode_ignores_invalid_values() {
        let shared = decode("exercises=&exerciseTime=abc&restTime=20&other=1");
        assert!(shared.is_empty());
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut config = WorkoutConfig::default();
        decode("exercises=Row,Dips").apply_to(&mut config);
        assert_eq!(config.exercises, vec!["Row", "Dips", ""]);
        assert_eq!(config.exercise_duration, 30);
        assert_eq!(config.rest_duration, 30);
    }

    #[test]
    fn share_url_replaces_existing_query() {
        let url = share_url("https://example.com/app?old=1", &WorkoutConfig::default()).unwrap();
        assert_eq!(url.path(), "/app");
        assert!(url.query().unwrap().starts_with("exercises=Push-ups%2CSquats"));
        assert!(share_url("not a url", &WorkoutConfig::default()).is_err());
    }
}
