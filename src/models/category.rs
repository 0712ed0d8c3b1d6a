// src/models/category.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Stream tag attached to every question.
///
/// `General` questions are shown to the student but never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "Science")]
    Science,
    #[serde(alias = "Arts")]
    Arts,
    #[serde(alias = "Commerce")]
    Commerce,
    #[serde(alias = "General")]
    General,
}

impl Category {
    /// Scored streams in canonical order. Recommendation ties resolve to the
    /// earliest entry.
    pub const SCORED: [Category; 3] = [Category::Science, Category::Arts, Category::Commerce];

    pub fn is_scored(self) -> bool {
        !matches!(self, Category::General)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Science => "science",
            Category::Arts => "arts",
            Category::Commerce => "commerce",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "science" => Ok(Category::Science),
            "arts" => Ok(Category::Arts),
            "commerce" => Ok(Category::Commerce),
            "general" => Ok(Category::General),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_case() {
        assert_eq!("Science".parse::<Category>(), Ok(Category::Science));
        assert_eq!(" COMMERCE ".parse::<Category>(), Ok(Category::Commerce));
        assert!("engineering".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_and_accepts_capitalized() {
        assert_eq!(serde_json::to_string(&Category::Arts).unwrap(), "\"arts\"");
        let parsed: Category = serde_json::from_str("\"General\"").unwrap();
        assert_eq!(parsed, Category::General);
    }

    #[test]
    fn general_is_not_scored() {
        assert!(!Category::General.is_scored());
        assert!(Category::SCORED.iter().all(|c| c.is_scored()));
    }
}
