use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeslotError};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u8(profile: &str, key: &str, default: u8) -> u8 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub rules: RulesConfig,
    pub hours: HoursConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TIMESLOT_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("TIMESLOT_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            rules: RulesConfig::from_env_profiled(p),
            hours: HoursConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject settings the rule engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.hours.min >= self.hours.max {
            return Err(TimeslotError::Config {
                key: "HOUR_MIN".to_string(),
                value: self.hours.min.to_string(),
                reason: format!("must be below HOUR_MAX ({})", self.hours.max),
            });
        }
        if self.hours.max > 24 {
            return Err(TimeslotError::Config {
                key: "HOUR_MAX".to_string(),
                value: self.hours.max.to_string(),
                reason: "hours are bounded by 24".to_string(),
            });
        }
        Ok(())
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  rules:  file={}, watch_poll_ms={}", self.rules.file.display(), self.rules.watch_poll_ms);
        tracing::info!("  hours:  min={}, max={}", self.hours.min, self.hours.max);
    }

    /// Structured view for `--json` output.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "rules": { "file": self.rules.file, "watch_poll_ms": self.rules.watch_poll_ms },
            "hours": { "min": self.hours.min, "max": self.hours.max },
        })
    }
}

// ── Rules file ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// YAML snapshot holding the saved rule collection.
    pub file: PathBuf,
    /// Poll interval handed to the filesystem watcher.
    pub watch_poll_ms: u64,
}

impl RulesConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            file: PathBuf::from(profiled_env_or(p, "RULES_FILE", "data/rules.yml")),
            watch_poll_ms: profiled_env_u64(p, "WATCH_POLL_MS", 500),
        }
    }
}

// ── Hour domain ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HoursConfig {
    pub min: u8,
    pub max: u8,
}

impl HoursConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            min: profiled_env_u8(p, "HOUR_MIN", 0),
            max: profiled_env_u8(p, "HOUR_MAX", 24),
        }
    }
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self { min: 0, max: 24 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let cfg = Config::for_profile("CFGTEST_DEFAULTS");
        assert_eq!(cfg.profile_label(), "CFGTEST_DEFAULTS");
        assert_eq!(cfg.hours.min, 0);
        assert_eq!(cfg.hours.max, 24);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn profiled_key_wins_over_plain_key() {
        env::set_var("CFGTEST_PROFILED_RULES_FILE", "/tmp/profiled.yml");
        let cfg = Config::for_profile("cfgtest_profiled");
        assert_eq!(cfg.profile, "CFGTEST_PROFILED");
        assert_eq!(cfg.rules.file, PathBuf::from("/tmp/profiled.yml"));
        env::remove_var("CFGTEST_PROFILED_RULES_FILE");
    }

    #[test]
    fn unparsable_numbers_fall_back_to_default() {
        env::set_var("CFGTEST_BADNUM_HOUR_MAX", "late");
        let cfg = Config::for_profile("CFGTEST_BADNUM");
        assert_eq!(cfg.hours.max, 24);
        env::remove_var("CFGTEST_BADNUM_HOUR_MAX");
    }

    #[test]
    fn inverted_hour_domain_is_rejected() {
        let mut cfg = Config::for_profile("CFGTEST_INVERTED");
        cfg.hours = HoursConfig { min: 12, max: 8 };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("HOUR_MIN"));

        cfg.hours = HoursConfig { min: 0, max: 30 };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_profile_label() {
        let cfg = Config {
            profile: String::new(),
            rules: RulesConfig { file: PathBuf::from("r.yml"), watch_poll_ms: 500 },
            hours: HoursConfig::default(),
        };
        assert_eq!(cfg.profile_label(), "default");
        assert_eq!(cfg.summary()["hours"]["max"], 24);
    }
}
