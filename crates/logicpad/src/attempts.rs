//! Check-attempt policy.
//!
//! The attempt counter and pass flag belong to whoever stores the exercise;
//! the [`Checker`](crate::Checker) reads and updates them through
//! [`AttemptLedger`]. The configured [`MaxTries`] caps how often a student may
//! check; an instructor is never capped and never counted.

use std::fmt;

use serde::Deserialize;

use crate::config::ConfigError;

/// Maximum number of checks a student may run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "MaxTriesRepr")]
pub enum MaxTries {
    #[default]
    Unlimited,
    /// Checking is disabled for students.
    None,
    Limited(u32),
}

impl MaxTries {
    /// Returns `true` if a student who has used `attempts` checks may check again.
    pub fn allows(self, attempts: u32) -> bool {
        match self {
            MaxTries::Unlimited => true,
            MaxTries::None => false,
            MaxTries::Limited(max) => attempts < max,
        }
    }

    /// Checks left after `attempts`, or `None` when unlimited.
    pub fn remaining(self, attempts: u32) -> Option<u32> {
        match self {
            MaxTries::Unlimited => None,
            MaxTries::None => Some(0),
            MaxTries::Limited(max) => Some(max.saturating_sub(attempts)),
        }
    }
}

impl fmt::Display for MaxTries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxTries::Unlimited => write!(f, "unlimited"),
            MaxTries::None => write!(f, "none"),
            MaxTries::Limited(max) => write!(f, "{max}"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaxTriesRepr {
    Count(u32),
    Keyword(String),
}

impl TryFrom<MaxTriesRepr> for MaxTries {
    type Error = ConfigError;

    fn try_from(repr: MaxTriesRepr) -> Result<Self, Self::Error> {
        match repr {
            MaxTriesRepr::Count(max) => Ok(MaxTries::Limited(max)),
            MaxTriesRepr::Keyword(word) => match word.to_ascii_lowercase().as_str() {
                "unlimited" => Ok(MaxTries::Unlimited),
                "none" => Ok(MaxTries::None),
                _ => Err(ConfigError::InvalidMaxTries(word)),
            },
        }
    }
}

/// Who is running a check.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[default]
    Student,
    /// Exercise author or instructor; bypasses the attempt cap.
    Instructor,
}

/// Externally owned attempt counter and pass flag.
pub trait AttemptLedger {
    /// Number of checks counted so far.
    fn attempts(&self) -> u32;

    /// Outcome of the most recent counted check.
    fn passed(&self) -> bool;

    /// Counts one check and stores its outcome.
    fn record(&mut self, passed: bool);
}

/// In-memory [`AttemptLedger`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    attempts: u32,
    passed: bool,
}

impl AttemptRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a record saved with an exercise.
    pub fn with_state(attempts: u32, passed: bool) -> Self {
        Self { attempts, passed }
    }
}

impl AttemptLedger for AttemptRecord {
    fn attempts(&self) -> u32 {
        self.attempts
    }

    fn passed(&self) -> bool {
        self.passed
    }

    fn record(&mut self, passed: bool) {
        self.attempts = self.attempts.saturating_add(1);
        self.passed = passed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        max_tries: MaxTries,
    }

    fn parse(value: &str) -> Result<MaxTries, toml::de::Error> {
        toml::from_str::<Wrapper>(&format!("max_tries = {value}")).map(|w| w.max_tries)
    }

    #[test]
    fn test_allows() {
        assert!(MaxTries::Unlimited.allows(1_000));
        assert!(!MaxTries::None.allows(0));
        assert!(MaxTries::Limited(2).allows(1));
        assert!(!MaxTries::Limited(2).allows(2));
    }

    #[test]
    fn test_remaining() {
        assert_eq!(MaxTries::Unlimited.remaining(4), None);
        assert_eq!(MaxTries::Limited(3).remaining(1), Some(2));
        assert_eq!(MaxTries::Limited(3).remaining(7), Some(0));
    }

    #[test]
    fn test_deserialize() {
        assert_eq!(parse("\"unlimited\"").unwrap(), MaxTries::Unlimited);
        assert_eq!(parse("\"None\"").unwrap(), MaxTries::None);
        assert_eq!(parse("5").unwrap(), MaxTries::Limited(5));
        assert!(parse("\"often\"").is_err());
        assert!(parse("-1").is_err());
    }

    #[test]
    fn test_record() {
        let mut record = AttemptRecord::new();
        record.record(false);
        record.record(true);
        assert_eq!(record.attempts(), 2);
        assert!(record.passed());

        let restored = AttemptRecord::with_state(2, true);
        assert_eq!(restored, record);
    }
}
