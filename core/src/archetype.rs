//! Guest archetypes: the closed segment set every rate table is keyed by.

use crate::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Archetype {
    SoloBusiness,
    LeisureCouple,
    FamilyWithKids,
    TourGroup,
    Other,
}

impl Archetype {
    /// Every archetype, in declaration order.
    pub const ALL: [Archetype; 5] = [
        Archetype::SoloBusiness,
        Archetype::LeisureCouple,
        Archetype::FamilyWithKids,
        Archetype::TourGroup,
        Archetype::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoloBusiness => "SoloBusiness",
            Self::LeisureCouple => "LeisureCouple",
            Self::FamilyWithKids => "FamilyWithKids",
            Self::TourGroup => "TourGroup",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                ForecastError::invalid_argument(
                    "archetype",
                    s,
                    Archetype::ALL.iter().map(|a| a.as_str()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for a in Archetype::ALL {
            assert_eq!(a.as_str().parse::<Archetype>().unwrap(), a);
        }
    }

    #[test]
    fn unknown_name_lists_valid_options() {
        let err = "Backpacker".parse::<Archetype>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Backpacker"), "message should name the key: {msg}");
        assert!(msg.contains("TourGroup"), "message should list options: {msg}");
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&Archetype::FamilyWithKids).unwrap();
        assert_eq!(json, "\"FamilyWithKids\"");
    }
}
