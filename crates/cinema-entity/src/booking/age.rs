//! Ticket age categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The age category of a ticket holder. Determines the unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeCategory {
    /// Child ticket.
    Child,
    /// Adult ticket.
    Adult,
    /// Senior ticket.
    Senior,
}

impl AgeCategory {
    /// All categories, in display order.
    pub const ALL: [AgeCategory; 3] = [Self::Child, Self::Adult, Self::Senior];

    /// The stored label (`child`, `adult`, `senior`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Adult => "adult",
            Self::Senior => "senior",
        }
    }

    /// Parse a stored label, falling back to `Adult` for anything unknown.
    pub fn from_label_or_adult(label: &str) -> Self {
        label.parse().unwrap_or(Self::Adult)
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is not one of the known categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown age category '{0}'")]
pub struct UnknownAgeCategory(pub String);

impl FromStr for AgeCategory {
    type Err = UnknownAgeCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "child" => Ok(Self::Child),
            "adult" => Ok(Self::Adult),
            "senior" => Ok(Self::Senior),
            _ => Err(UnknownAgeCategory(s.to_string())),
        }
    }
}
