//! The fixed expense category taxonomy
//!
//! Categories are a closed set rather than free-form strings, so budget
//! lookups and report breakdowns cannot diverge on spelling or casing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spending category assigned to every transaction
///
/// Income transactions carry a category as well, though reports only break
/// expenses down by category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    Food,
    Travel,
    Bills,
    Shopping,
    Health,
    Entertainment,
    Work,
    Other,
}

impl Category {
    /// Get all categories in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Travel,
            Self::Bills,
            Self::Shopping,
            Self::Health,
            Self::Entertainment,
            Self::Work,
            Self::Other,
        ]
    }

    /// Get the name for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Entertainment => "Entertainment",
            Self::Work => "Work",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "travel" => Ok(Self::Travel),
            "bills" => Ok(Self::Bills),
            "shopping" => Ok(Self::Shopping),
            "health" => Ok(Self::Health),
            "entertainment" => Ok(Self::Entertainment),
            "work" => Ok(Self::Work),
            "other" => Ok(Self::Other),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// Error type for category parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for CategoryParseError {}
