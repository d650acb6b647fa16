use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use leaderboard::*;
pub use observation::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod leaderboard;
mod observation;
mod types;

/// Difficulty tiers offered by the settings screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Display order used by leaderboard listings.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }

    /// Lenient lookup for selections coming from the outside, anything unknown becomes `Normal`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::debug!("Unknown difficulty {:?}, using {}", name, Self::Normal);
            Self::Normal
        })
    }

    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile::new_unchecked(self, 4, 3),
            Self::Normal => DifficultyProfile::new_unchecked(self, 4, 6),
            Self::Hard => DifficultyProfile::new_unchecked(self, 6, 8),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Normal
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Board dimensions for one game. The card count is always even and non-zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProfileFields")]
pub struct DifficultyProfile {
    difficulty: Difficulty,
    columns: Coord,
    rows: Coord,
}

impl DifficultyProfile {
    pub(crate) const fn new_unchecked(difficulty: Difficulty, columns: Coord, rows: Coord) -> Self {
        Self {
            difficulty,
            columns,
            rows,
        }
    }

    pub fn try_new(difficulty: Difficulty, columns: Coord, rows: Coord) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mult(columns, rows) % 2 != 0 {
            return Err(GameError::OddCardCount);
        }
        Ok(Self::new_unchecked(difficulty, columns, rows))
    }

    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        difficulty.profile()
    }

    pub fn from_name(name: &str) -> Self {
        Difficulty::from_name(name).profile()
    }

    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub const fn columns(&self) -> Coord {
        self.columns
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn total_cards(&self) -> CardCount {
        mult(self.columns, self.rows)
    }

    pub const fn total_pairs(&self) -> CardCount {
        self.total_cards() / 2
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

#[derive(Deserialize)]
struct ProfileFields {
    difficulty: Difficulty,
    columns: Coord,
    rows: Coord,
}

impl TryFrom<ProfileFields> for DifficultyProfile {
    type Error = GameError;

    fn try_from(fields: ProfileFields) -> Result<Self> {
        Self::try_new(fields.difficulty, fields.columns, fields.rows)
    }
}

/// Pair values in board order, one per card id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeckFields")]
pub struct Deck {
    profile: DifficultyProfile,
    values: Vec<PairValue>,
}

#[derive(Deserialize)]
struct DeckFields {
    profile: DifficultyProfile,
    values: Vec<PairValue>,
}

impl TryFrom<DeckFields> for Deck {
    type Error = GameError;

    fn try_from(fields: DeckFields) -> Result<Self> {
        Self::from_values(fields.profile, fields.values)
    }
}

impl Deck {
    /// Builds a deck from an explicit ordering, every value in `1..=total_pairs` has to show up exactly twice.
    pub fn from_values(profile: DifficultyProfile, values: Vec<PairValue>) -> Result<Self> {
        if values.len() != usize::from(profile.total_cards()) {
            return Err(GameError::InvalidDeck);
        }

        let total_pairs = profile.total_pairs();
        let mut seen = vec![0u8; usize::from(total_pairs)];
        for &value in &values {
            if value == 0 || value > total_pairs {
                return Err(GameError::InvalidDeck);
            }
            let count = &mut seen[usize::from(value - 1)];
            *count += 1;
            if *count > 2 {
                return Err(GameError::InvalidDeck);
            }
        }

        Ok(Self::from_values_unchecked(profile, values))
    }

    pub(crate) fn from_values_unchecked(profile: DifficultyProfile, values: Vec<PairValue>) -> Self {
        Self { profile, values }
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.profile
    }

    pub fn values(&self) -> &[PairValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_at(&self, id: CardId) -> Option<PairValue> {
        self.values.get(usize::from(id)).copied()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Flipped,
    Matched,
    Mismatch,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Flipped => true,
            Matched => true,
            Mismatch => true,
            Won => true,
        }
    }

    /// Whether this reveal turned the second card of an attempt, which is what counts as a move.
    pub const fn completes_move(self) -> bool {
        matches!(self, Self::Matched | Self::Mismatch | Self::Won)
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Matched | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    NoChange,
    Hidden,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Hidden => true,
        }
    }
}
