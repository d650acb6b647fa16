use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Cards that are face up but not yet resolved, never more than two.
pub type SelectionBuffer = SmallVec<[CardId; 2]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::Ready | Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Everything a renderer needs to draw the current game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Vec<Card>,
    moves_made: Saturating<MoveCount>,
    pairs_found: CardCount,
    selection: SelectionBuffer,
    state: EngineState,
}

impl GameSession {
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn moves_made(&self) -> MoveCount {
        self.moves_made.0
    }

    pub fn pairs_found(&self) -> CardCount {
        self.pairs_found
    }

    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    pub fn state(&self) -> EngineState {
        self.state
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EngineFields")]
pub struct MatchEngine {
    profile: DifficultyProfile,
    session: GameSession,
}

impl MatchEngine {
    /// Lays out `deck` face down.
    ///
    /// Panics when the deck was dealt for a different profile or the profile holds an odd number of cards, neither
    /// can come out of the checked constructors.
    pub fn new(profile: DifficultyProfile, deck: Deck) -> Self {
        assert!(
            profile.total_cards() >= 2 && profile.total_cards() % 2 == 0,
            "profile must hold a non-zero even number of cards, got {}",
            profile.total_cards()
        );
        assert_eq!(deck.profile(), profile, "deck was dealt for a different profile");
        assert_eq!(
            deck.len(),
            usize::from(profile.total_cards()),
            "deck does not fit the profile"
        );

        let board = deck
            .values()
            .iter()
            .zip(0..)
            .map(|(&pair_value, id)| Card::new(id, pair_value))
            .collect();

        log::debug!(
            "New {} game, {}x{} cards",
            profile.difficulty(),
            profile.columns(),
            profile.rows()
        );

        Self {
            profile,
            session: GameSession {
                board,
                moves_made: Saturating(0),
                pairs_found: 0,
                selection: SelectionBuffer::new(),
                state: Default::default(),
            },
        }
    }

    pub fn generate(profile: DifficultyProfile, generator: impl DeckGenerator) -> Self {
        let deck = generator.generate(profile);
        Self::new(profile, deck)
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.profile
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn state(&self) -> EngineState {
        self.session.state
    }

    pub fn is_won(&self) -> bool {
        self.session.state.is_finished()
    }

    pub fn moves_made(&self) -> MoveCount {
        self.session.moves_made()
    }

    pub fn pairs_found(&self) -> CardCount {
        self.session.pairs_found
    }

    pub fn total_pairs(&self) -> CardCount {
        self.profile.total_pairs()
    }

    pub fn cards(&self) -> &[Card] {
        &self.session.board
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.session.board.get(usize::from(id))
    }

    /// Two mismatched cards are waiting for [`Self::resolve_pending`].
    pub fn has_pending_mismatch(&self) -> bool {
        self.session.selection.len() == 2
    }

    /// Whether a reveal at `id` would be accepted.
    pub fn can_reveal(&self, id: CardId) -> bool {
        match self.card(id) {
            Some(card) => !self.has_pending_mismatch() && card.state() == CardState::Hidden,
            None => false,
        }
    }

    /// Turns a card face up and, when it is the second of an attempt, scores the attempt.
    ///
    /// Rejected reveals (a full selection, a face-up card, a matched card) report `NoChange` and leave the game
    /// untouched. Only ids outside the board are an error.
    pub fn reveal(&mut self, id: CardId) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let index = self.validate_id(id)?;

        if !self.can_reveal(id) {
            log::trace!("reveal of card {} rejected", id);
            return Ok(NoChange);
        }

        self.session.board[index].flip();
        self.session.selection.push(id);
        self.mark_started();

        let &[first, second] = self.session.selection.as_slice() else {
            return Ok(Flipped);
        };

        self.session.moves_made += 1;

        if self.pair_value(first) != self.pair_value(second) {
            log::debug!("cards {} and {} do not match", first, second);
            return Ok(Mismatch);
        }

        for matched in [first, second] {
            self.session.board[usize::from(matched)].set_matched();
        }
        self.session.pairs_found += 1;
        self.session.selection.clear();
        log::debug!(
            "cards {} and {} match, {}/{} pairs",
            first,
            second,
            self.session.pairs_found,
            self.total_pairs()
        );

        if self.session.pairs_found == self.total_pairs() {
            self.session.state = EngineState::Won;
            log::debug!("game won in {} moves", self.moves_made());
            Ok(Won)
        } else {
            Ok(Matched)
        }
    }

    /// Flips every unmatched face-up card back down and empties the selection.
    pub fn resolve_pending(&mut self) -> ResolveOutcome {
        let mut hidden = 0;
        for card in self
            .session
            .board
            .iter_mut()
            .filter(|card| card.state() == CardState::Flipped)
        {
            card.hide();
            hidden += 1;
        }
        self.session.selection.clear();

        if hidden > 0 {
            log::trace!("hid {} cards", hidden);
            ResolveOutcome::Hidden
        } else {
            ResolveOutcome::NoChange
        }
    }

    fn pair_value(&self, id: CardId) -> PairValue {
        self.session.board[usize::from(id)].pair_value()
    }

    fn mark_started(&mut self) {
        if self.session.state.is_ready() {
            self.session.state = EngineState::Active;
        }
    }

    fn validate_id(&self, id: CardId) -> Result<usize> {
        let index = usize::from(id);
        if index < self.session.board.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidCardId)
        }
    }
}

impl StorageKey for MatchEngine {
    const KEY: &'static str = "pairs:game:v1";
}

#[derive(Deserialize)]
struct EngineFields {
    profile: DifficultyProfile,
    session: GameSession,
}

impl TryFrom<EngineFields> for MatchEngine {
    type Error = GameError;

    fn try_from(EngineFields { profile, session }: EngineFields) -> Result<Self> {
        session.validate(profile)?;
        Ok(Self { profile, session })
    }
}

fn ensure(condition: bool) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(GameError::CorruptState)
    }
}

impl GameSession {
    /// Checks a restored session against what [`MatchEngine`] can actually produce while playing.
    fn validate(&self, profile: DifficultyProfile) -> Result<()> {
        let board = &self.board;
        ensure(board.len() == usize::from(profile.total_cards()))?;
        ensure(board.iter().zip(0..).all(|(card, id)| card.id() == id))?;
        Deck::from_values(profile, board.iter().map(Card::pair_value).collect())
            .map_err(|_| GameError::CorruptState)?;

        // both cards of a pair get matched in the same move
        let mut matched = vec![0u8; usize::from(profile.total_pairs())];
        for card in board.iter().filter(|card| card.is_matched()) {
            ensure(card.is_flipped())?;
            matched[usize::from(card.pair_value() - 1)] += 1;
        }
        ensure(matched.iter().all(|&count| count == 0 || count == 2))?;
        let matched_pairs = matched.iter().filter(|&&count| count == 2).count();
        ensure(matched_pairs == usize::from(self.pairs_found))?;
        ensure(self.moves_made.0 >= MoveCount::from(self.pairs_found))?;

        // face-up unmatched cards are exactly the selection
        let selection = &self.selection;
        ensure(selection.len() <= 2)?;
        for (index, &id) in selection.iter().enumerate() {
            let card = board.get(usize::from(id)).ok_or(GameError::CorruptState)?;
            ensure(card.state() == CardState::Flipped)?;
            ensure(!selection[..index].contains(&id))?;
        }
        let flipped = board
            .iter()
            .filter(|card| card.state() == CardState::Flipped)
            .count();
        ensure(flipped == selection.len())?;
        if let &[first, second] = selection.as_slice() {
            ensure(board[usize::from(first)].pair_value() != board[usize::from(second)].pair_value())?;
        }

        let won = self.pairs_found == profile.total_pairs();
        match self.state {
            EngineState::Ready => ensure(self.moves_made.0 == 0 && selection.is_empty() && !won),
            EngineState::Active => ensure(!won),
            EngineState::Won => ensure(won),
        }
    }
}
