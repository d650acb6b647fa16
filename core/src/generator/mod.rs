use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, profile: DifficultyProfile) -> Deck;
}

/// Every pair value twice, in ascending order: `1, 1, 2, 2, ...`.
pub(crate) fn ordered_values(profile: DifficultyProfile) -> Vec<PairValue> {
    (1..=profile.total_pairs())
        .flat_map(|value| [value, value])
        .collect()
}

/// Lays the pairs out side by side without shuffling, handy for scripted games.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OrderedDeckGenerator;

impl DeckGenerator for OrderedDeckGenerator {
    fn generate(self, profile: DifficultyProfile) -> Deck {
        Deck::from_values_unchecked(profile, ordered_values(profile))
    }
}
