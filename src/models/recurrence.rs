//! Recurrence rules for spending items
//!
//! The server stores recurrence as an RFC 5545 rule set, e.g.
//! `DTSTART:20261101T000000Z\nRRULE:FREQ=MONTHLY;INTERVAL=1`. This client
//! only needs to build the common shapes and describe them back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repeat frequency named by an `FREQ=` part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            "YEARLY" => Some(Self::Yearly),
            _ => None,
        }
    }

    fn as_rule(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
            Self::Yearly => "year",
        }
    }
}

/// A recurrence rule set string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecurrenceRule(String);

impl RecurrenceRule {
    /// Accept a raw rule set, requiring a recognizable `FREQ=` part
    pub fn parse(s: &str) -> Result<Self, RecurrenceParseError> {
        let rule = Self(s.trim().to_string());
        if rule.0.is_empty() {
            return Err(RecurrenceParseError::Empty);
        }
        if rule.frequency().is_none() {
            return Err(RecurrenceParseError::MissingFrequency(rule.0));
        }
        Ok(rule)
    }

    /// Build a rule from a shorthand whose first occurrence is `start`
    ///
    /// Shorthands: `daily`, `weekly`, `biweekly`, `monthly`, `quarterly`,
    /// `yearly`. Anything else is parsed as a raw rule set.
    pub fn from_shorthand(
        input: &str,
        start: DateTime<Utc>,
    ) -> Result<Self, RecurrenceParseError> {
        let (frequency, interval) = match input.trim().to_lowercase().as_str() {
            "daily" => (Frequency::Daily, 1),
            "weekly" => (Frequency::Weekly, 1),
            "biweekly" | "bi-weekly" => (Frequency::Weekly, 2),
            "monthly" => (Frequency::Monthly, 1),
            "quarterly" => (Frequency::Monthly, 3),
            "yearly" | "annually" => (Frequency::Yearly, 1),
            _ => return Self::parse(input),
        };

        Ok(Self(format!(
            "DTSTART:{}\nRRULE:FREQ={};INTERVAL={}",
            start.format("%Y%m%dT%H%M%SZ"),
            frequency.as_rule(),
            interval
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `FREQ=` part, if the rule names a supported one
    pub fn frequency(&self) -> Option<Frequency> {
        self.rule_part("FREQ").and_then(Frequency::parse)
    }

    /// The `INTERVAL=` part, defaulting to 1
    pub fn interval(&self) -> u32 {
        self.rule_part("INTERVAL")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1)
    }

    /// Human readable description, e.g. "Every 2 weeks"
    pub fn description(&self) -> String {
        match self.frequency() {
            Some(frequency) if self.interval() == 1 => {
                format!("Every {}", frequency.unit())
            }
            Some(frequency) => format!("Every {} {}s", self.interval(), frequency.unit()),
            None => self.0.clone(),
        }
    }

    fn rule_part(&self, key: &str) -> Option<&str> {
        self.0
            .lines()
            .map(|line| line.strip_prefix("RRULE:").unwrap_or(line))
            .flat_map(|line| line.split(';'))
            .filter_map(|part| part.split_once('='))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
            .map(|(_, v)| v.trim())
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Error type for recurrence parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceParseError {
    Empty,
    MissingFrequency(String),
}

impl fmt::Display for RecurrenceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Recurrence rule cannot be empty"),
            Self::MissingFrequency(s) => {
                write!(f, "Recurrence rule has no supported FREQ part: {}", s)
            }
        }
    }
}

impl std::error::Error for RecurrenceParseError {}
