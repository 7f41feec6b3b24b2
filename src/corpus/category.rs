// Category — the fixed set of corpus partitions a word can be analyzed against.
//
// Each category is backed by one or more newsgroups of the 20 Newsgroups
// corpus. Everything outside those newsgroups is background.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Space,
    Sports,
    Hockey,
    Baseball,
    /// Backed by the medical newsgroup, used as a proxy for biology.
    Animals,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Space,
        Category::Sports,
        Category::Hockey,
        Category::Baseball,
        Category::Animals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Space => "space",
            Category::Sports => "sports",
            Category::Hockey => "hockey",
            Category::Baseball => "baseball",
            Category::Animals => "animals",
        }
    }

    /// Newsgroup directories whose documents count as in-category.
    pub fn newsgroups(&self) -> &'static [&'static str] {
        match self {
            Category::Space => &["sci.space"],
            Category::Sports => &["rec.sport.baseball", "rec.sport.hockey"],
            Category::Hockey => &["rec.sport.hockey"],
            Category::Baseball => &["rec.sport.baseball"],
            Category::Animals => &["sci.med"],
        }
    }

    pub fn contains_newsgroup(&self, newsgroup: &str) -> bool {
        self.newsgroups().contains(&newsgroup)
    }
}

impl FromStr for Category {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| AnalysisError::CategoryNotFound(s.trim().to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Hockey ".parse::<Category>().unwrap(), Category::Hockey);
        assert_eq!("SPACE".parse::<Category>().unwrap(), Category::Space);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "cooking".parse::<Category>().unwrap_err();
        assert!(matches!(err, AnalysisError::CategoryNotFound(ref c) if c == "cooking"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn sports_spans_both_sport_newsgroups() {
        assert!(Category::Sports.contains_newsgroup("rec.sport.hockey"));
        assert!(Category::Sports.contains_newsgroup("rec.sport.baseball"));
        assert!(!Category::Hockey.contains_newsgroup("rec.sport.baseball"));
    }
}
