//! Card metadata enums.
//!
//! These mirror what sellers can pick in the sale setup form: the physical
//! condition grades common to card trading, and the print language of the
//! card. Both round-trip through their display strings, which is also how
//! they are stored.

use serde::{Deserialize, Serialize};

/// Error returned when a stored metadata string is not a known variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {field}: {value}")]
pub struct MetadataError {
    /// Which metadata field failed to parse.
    pub field: &'static str,
    /// The offending value.
    pub value: String,
}

/// Physical condition grade of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CardCondition {
    #[default]
    #[serde(rename = "Near Mint")]
    NearMint,
    Mint,
    #[serde(rename = "Lightly Played")]
    LightlyPlayed,
    Played,
    Damaged,
}

impl CardCondition {
    /// All grades, best first, in form-display order.
    pub const ALL: [Self; 5] = [
        Self::Mint,
        Self::NearMint,
        Self::LightlyPlayed,
        Self::Played,
        Self::Damaged,
    ];

    /// The display string, also used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NearMint => "Near Mint",
            Self::Mint => "Mint",
            Self::LightlyPlayed => "Lightly Played",
            Self::Played => "Played",
            Self::Damaged => "Damaged",
        }
    }
}

impl std::fmt::Display for CardCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CardCondition {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Near Mint" => Ok(Self::NearMint),
            "Mint" => Ok(Self::Mint),
            "Lightly Played" => Ok(Self::LightlyPlayed),
            "Played" => Ok(Self::Played),
            "Damaged" => Ok(Self::Damaged),
            other => Err(MetadataError {
                field: "condition",
                value: other.to_owned(),
            }),
        }
    }
}

/// Print language of a card.
///
/// The catalog serves the Spanish and English variants; Portuguese and
/// Japanese prints circulate in the local market without a catalog entry of
/// their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CardLanguage {
    #[default]
    English,
    Spanish,
    Portuguese,
    Japanese,
}

impl CardLanguage {
    /// The display string, also used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::Portuguese => "Portuguese",
            Self::Japanese => "Japanese",
        }
    }
}

impl std::fmt::Display for CardLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CardLanguage {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "English" => Ok(Self::English),
            "Spanish" => Ok(Self::Spanish),
            "Portuguese" => Ok(Self::Portuguese),
            "Japanese" => Ok(Self::Japanese),
            other => Err(MetadataError {
                field: "language",
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_round_trip() {
        for condition in CardCondition::ALL {
            let parsed: CardCondition = condition.as_str().parse().unwrap();
            assert_eq!(parsed, condition);
        }
    }

    #[test]
    fn test_condition_unknown() {
        let err = "Graded 9.5".parse::<CardCondition>().unwrap_err();
        assert_eq!(err.field, "condition");
        assert_eq!(err.value, "Graded 9.5");
    }

    #[test]
    fn test_condition_serde_uses_display_names() {
        let json = serde_json::to_string(&CardCondition::NearMint).unwrap();
        assert_eq!(json, "\"Near Mint\"");
        let parsed: CardCondition = serde_json::from_str("\"Lightly Played\"").unwrap();
        assert_eq!(parsed, CardCondition::LightlyPlayed);
    }

    #[test]
    fn test_language_round_trip() {
        for language in [
            CardLanguage::English,
            CardLanguage::Spanish,
            CardLanguage::Portuguese,
            CardLanguage::Japanese,
        ] {
            let parsed: CardLanguage = language.as_str().parse().unwrap();
            assert_eq!(parsed, language);
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CardCondition::default(), CardCondition::NearMint);
        assert_eq!(CardLanguage::default(), CardLanguage::English);
    }
}
