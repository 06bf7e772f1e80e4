use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::matching::weights::MatchWeights;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub matching: MatchingConfig,
}

/// Knobs for the matching engine and the ranking endpoints.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Upper bound on per-entity score computations in flight during a ranking call.
    pub concurrency: usize,
    pub default_limit: usize,
    pub max_limit: usize,
    pub weights: MatchWeights,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            default_limit: 20,
            max_limit: 100,
            weights: MatchWeights::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            database_url: lookup("DATABASE_URL").with_context(|| {
                "Required environment variable 'DATABASE_URL' is not set".to_string()
            })?,
            database_max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            port: parse_var(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            matching: MatchingConfig::from_lookup(&lookup)?,
        })
    }
}

impl MatchingConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = MatchingConfig::default();

        let concurrency: usize = parse_var(lookup, "MATCH_CONCURRENCY", defaults.concurrency)?;
        if concurrency == 0 {
            bail!("MATCH_CONCURRENCY must be at least 1");
        }

        let default_limit: usize =
            parse_var(lookup, "MATCH_DEFAULT_LIMIT", defaults.default_limit)?;
        let max_limit: usize = parse_var(lookup, "MATCH_MAX_LIMIT", defaults.max_limit)?;
        if default_limit == 0 || default_limit > max_limit {
            bail!("MATCH_DEFAULT_LIMIT must be between 1 and MATCH_MAX_LIMIT ({max_limit})");
        }

        Ok(Self {
            concurrency,
            default_limit,
            max_limit,
            weights: weights_from_lookup(lookup)?,
        })
    }
}

const WEIGHT_KEYS: [&str; 4] = [
    "MATCH_WEIGHT_SKILLS",
    "MATCH_WEIGHT_EXPERIENCE",
    "MATCH_WEIGHT_LOCATION",
    "MATCH_WEIGHT_SALARY",
];

/// Reads the optional weight override. All four variables must be set together.
fn weights_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<MatchWeights> {
    let present = WEIGHT_KEYS.iter().filter(|k| lookup(k).is_some()).count();
    if present == 0 {
        return Ok(MatchWeights::default());
    }
    if present != WEIGHT_KEYS.len() {
        bail!(
            "MATCH_WEIGHT_* overrides must set all of {}",
            WEIGHT_KEYS.join(", ")
        );
    }

    let weights = MatchWeights {
        skills: parse_var(lookup, WEIGHT_KEYS[0], 0.0)?,
        experience: parse_var(lookup, WEIGHT_KEYS[1], 0.0)?,
        location: parse_var(lookup, WEIGHT_KEYS[2], 0.0)?,
        salary: parse_var(lookup, WEIGHT_KEYS[3], 0.0)?,
    };
    weights
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid MATCH_WEIGHT_* override: {e}"))?;
    Ok(weights)
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const DB: (&str, &str) = ("DATABASE_URL", "postgres://localhost/jobmatch");

    #[test]
    fn test_matching_defaults_are_consistent() {
        let cfg = MatchingConfig::default();
        assert!(cfg.concurrency >= 1);
        assert!(cfg.default_limit <= cfg.max_limit);
        assert!(cfg.weights.validate().is_ok());
    }

    #[test]
    fn test_unset_vars_fall_back_to_defaults() {
        let cfg = load(&[DB]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.database_max_connections, 10);
        assert_eq!(cfg.rust_log, "info");
        assert_eq!(cfg.matching.concurrency, 8);
        assert_eq!(cfg.matching.weights, MatchWeights::default());
    }

    #[test]
    fn test_database_url_is_required() {
        assert!(load(&[]).is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(load(&[DB, ("PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_full_weight_override_accepted() {
        let cfg = load(&[
            DB,
            ("MATCH_WEIGHT_SKILLS", "0.4"),
            ("MATCH_WEIGHT_EXPERIENCE", "0.3"),
            ("MATCH_WEIGHT_LOCATION", "0.2"),
            ("MATCH_WEIGHT_SALARY", "0.1"),
        ])
        .unwrap();
        assert_eq!(cfg.matching.weights.experience, 0.3);
    }

    #[test]
    fn test_partial_weight_override_rejected() {
        let err = load(&[
            DB,
            ("MATCH_WEIGHT_SKILLS", "0.5"),
            ("MATCH_WEIGHT_SALARY", "0.5"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("must set all of"));
    }

    #[test]
    fn test_weight_override_must_sum_to_one() {
        let err = load(&[
            DB,
            ("MATCH_WEIGHT_SKILLS", "0.5"),
            ("MATCH_WEIGHT_EXPERIENCE", "0.5"),
            ("MATCH_WEIGHT_LOCATION", "0.5"),
            ("MATCH_WEIGHT_SALARY", "0.5"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("invalid MATCH_WEIGHT_* override"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(load(&[DB, ("MATCH_CONCURRENCY", "0")]).is_err());
    }

    #[test]
    fn test_default_limit_above_max_rejected() {
        assert!(load(&[DB, ("MATCH_DEFAULT_LIMIT", "50"), ("MATCH_MAX_LIMIT", "10")]).is_err());
        assert!(load(&[DB, ("MATCH_DEFAULT_LIMIT", "0")]).is_err());
        let cfg = load(&[DB, ("MATCH_DEFAULT_LIMIT", "10"), ("MATCH_MAX_LIMIT", "10")]).unwrap();
        assert_eq!(cfg.matching.default_limit, 10);
    }
}
