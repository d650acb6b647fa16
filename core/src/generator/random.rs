use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform shuffle of the ordered deck driven by any caller supplied RNG.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleDeckGenerator<R> {
    rng: R,
}

impl<R: Rng> ShuffleDeckGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<R: Rng> DeckGenerator for ShuffleDeckGenerator<R> {
    fn generate(mut self, profile: DifficultyProfile) -> Deck {
        let mut values = ordered_values(profile);
        values.shuffle(&mut self.rng);
        Deck::from_values_unchecked(profile, values)
    }
}

impl<R: Rng> DeckGenerator for &mut ShuffleDeckGenerator<R> {
    fn generate(self, profile: DifficultyProfile) -> Deck {
        let mut values = ordered_values(profile);
        values.shuffle(&mut self.rng);
        Deck::from_values_unchecked(profile, values)
    }
}

/// Seeded generator, the same seed always deals the same deck.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, profile: DifficultyProfile) -> Deck {
        let deck = ShuffleDeckGenerator::new(SmallRng::seed_from_u64(self.seed)).generate(profile);
        log::trace!("dealt {} cards from seed {}", deck.len(), self.seed);
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_paired(deck: &Deck) {
        let profile = deck.profile();
        assert_eq!(deck.len(), usize::from(profile.total_cards()));
        for value in 1..=profile.total_pairs() {
            let count = deck.values().iter().filter(|&&v| v == value).count();
            assert_eq!(count, 2, "value {} appears {} times", value, count);
        }
    }

    #[test]
    fn every_preset_deals_complete_pairs() {
        for difficulty in Difficulty::ALL {
            let deck = RandomDeckGenerator::new(7).generate(difficulty.profile());
            assert_paired(&deck);
        }
    }

    #[test]
    fn same_seed_same_deck() {
        let profile = Difficulty::Hard.profile();
        let a = RandomDeckGenerator::new(42).generate(profile);
        let b = RandomDeckGenerator::new(42).generate(profile);
        assert_eq!(a, b);
        assert_ne!(a.values(), OrderedDeckGenerator.generate(profile).values());
    }

    #[test]
    fn shared_rng_keeps_dealing_new_decks() {
        let profile = Difficulty::Normal.profile();
        let mut generator = ShuffleDeckGenerator::new(SmallRng::seed_from_u64(3));
        let first = (&mut generator).generate(profile);
        let second = (&mut generator).generate(profile);
        assert_paired(&first);
        assert_paired(&second);
        assert_ne!(first, second);
    }

    #[test]
    fn ordered_generator_is_deterministic() {
        let profile = Difficulty::Easy.profile();
        let deck = OrderedDeckGenerator.generate(profile);
        assert_eq!(deck.values(), &[1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6]);
    }
}
