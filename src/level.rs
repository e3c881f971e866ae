//! Severity levels and their names.
//!
//! # Design Decisions
//! - A level is an open ordinal, not a closed enum: sinks and callers may use
//!   ordinals the table does not know about
//! - Unknown ordinals are named by their number so a line is never lost
//!   because of a missing name

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Severity of a log call. Higher ordinal = higher severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(pub u8);

impl Level {
    pub const TRACE: Level = Level(1);
    pub const DEBUG: Level = Level(2);
    pub const INFO: Level = Level(3);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(5);

    /// Ordinal value.
    pub fn ordinal(self) -> u8 {
        self.0
    }

    /// Canonical name, or the ordinal as text for unknown levels.
    pub fn name(self) -> Cow<'static, str> {
        LevelTable::name_of(self)
    }
}

impl From<u8> for Level {
    fn from(ordinal: u8) -> Self {
        Level(ordinal)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LevelTable::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown log level `{}`", raw)))
    }
}

/// Static mapping between ordinals and names.
pub struct LevelTable;

const NAMES: [(Level, &str); 5] = [
    (Level::TRACE, "TRACE"),
    (Level::DEBUG, "DEBUG"),
    (Level::INFO, "INFO"),
    (Level::WARN, "WARN"),
    (Level::ERROR, "ERROR"),
];

impl LevelTable {
    /// Name of `level`. Unregistered ordinals come back as their decimal text.
    pub fn name_of(level: Level) -> Cow<'static, str> {
        match Self::lookup(level) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(level.0.to_string()),
        }
    }

    /// Returns the registered name, if any.
    pub fn lookup(level: Level) -> Option<&'static str> {
        NAMES
            .iter()
            .find(|(known, _)| *known == level)
            .map(|(_, name)| *name)
    }

    /// Parses a level name (case-insensitive) or a bare ordinal.
    pub fn parse(raw: &str) -> Option<Level> {
        let raw = raw.trim();
        if let Ok(ordinal) = raw.parse::<u8>() {
            return Some(Level(ordinal));
        }
        NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(raw))
            .map(|(level, _)| *level)
    }

    /// All registered levels in ascending severity.
    pub fn levels() -> impl Iterator<Item = Level> {
        NAMES.iter().map(|(level, _)| *level)
    }
}
