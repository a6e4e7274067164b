use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed view over the integer difficulty carried by a recipe.
///
/// The API uses `1`, `2` and `3`. Anything else is kept as `Unknown` so that
/// a recipe with an unexpected value still renders instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown(u8),
}

impl Difficulty {
    /// Returns the raw value as sent by the API.
    pub fn value(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Unknown(value) => value,
        }
    }

    /// Returns the human readable label shown on cards and filter chips.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown(_) => "Unknown",
        }
    }
}

impl From<u8> for Difficulty {
    fn from(value: u8) -> Self {
        match value {
            1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            3 => Difficulty::Hard,
            other => Difficulty::Unknown(other),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.value()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels() {
        assert_eq!(Difficulty::from(1), Difficulty::Easy);
        assert_eq!(Difficulty::from(2).label(), "Medium");
        assert_eq!(Difficulty::from(3).to_string(), "Hard");
    }

    #[test]
    fn test_unknown_level_keeps_value() {
        let difficulty = Difficulty::from(7);
        assert_eq!(difficulty, Difficulty::Unknown(7));
        assert_eq!(difficulty.label(), "Unknown");
        assert_eq!(difficulty.value(), 7);
    }
}
