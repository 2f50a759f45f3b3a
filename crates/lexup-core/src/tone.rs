//! Style registers used to pick synonyms.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named style register that selects which synonym list is preferred.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Tone {
    /// Professional and polished (the fallback for every lookup).
    #[default]
    Formal,
    /// Scholarly and precise.
    Academic,
    /// Corporate and strategic.
    Business,
    /// Friendly and conversational.
    Casual,
}

impl Tone {
    /// Every tone, in display order.
    pub const ALL: [Self; 4] = [Self::Formal, Self::Academic, Self::Business, Self::Casual];

    /// Returns the tone as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Academic => "academic",
            Self::Business => "business",
            Self::Casual => "casual",
        }
    }

    /// Short human-readable description of the register.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Formal => "Professional and polished",
            Self::Academic => "Scholarly and precise",
            Self::Business => "Corporate and strategic",
            Self::Casual => "Friendly and conversational",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown tone '{s}'. Use: formal, academic, business, casual")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_formal() {
        assert_eq!(Tone::default(), Tone::Formal);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Casual".parse::<Tone>().unwrap(), Tone::Casual);
        assert_eq!(" business ".parse::<Tone>().unwrap(), Tone::Business);
        assert!("shouty".parse::<Tone>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Tone::Academic).unwrap();
        assert_eq!(json, "\"academic\"");
    }
}
