use serde::{Deserialize, Serialize};

use crate::*;

/// What the player may see of a single card, face-down cards keep their value hidden.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Flipped(PairValue),
    Matched(PairValue),
}

impl CardFace {
    pub fn from_card(card: &Card) -> Self {
        match card.state() {
            CardState::Hidden => Self::Hidden,
            CardState::Flipped => Self::Flipped(card.pair_value()),
            CardState::Matched => Self::Matched(card.pair_value()),
        }
    }

    pub const fn value(self) -> Option<PairValue> {
        match self {
            Self::Hidden => None,
            Self::Flipped(value) | Self::Matched(value) => Some(value),
        }
    }
}

/// Render-safe snapshot of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub difficulty: Difficulty,
    pub columns: Coord,
    pub rows: Coord,
    pub faces: Vec<CardFace>,
    pub moves_made: MoveCount,
    pub pairs_found: CardCount,
    pub total_pairs: CardCount,
    pub state: EngineState,
}

impl BoardView {
    pub fn from_engine(engine: &MatchEngine) -> Self {
        let profile = engine.profile();
        Self {
            difficulty: profile.difficulty(),
            columns: profile.columns(),
            rows: profile.rows(),
            faces: engine.cards().iter().map(CardFace::from_card).collect(),
            moves_made: engine.moves_made(),
            pairs_found: engine.pairs_found(),
            total_pairs: engine.total_pairs(),
            state: engine.state(),
        }
    }

    pub fn face(&self, id: CardId) -> Option<CardFace> {
        self.faces.get(usize::from(id)).copied()
    }

    pub fn face_at(&self, coords: (Coord, Coord)) -> Option<CardFace> {
        if coords.0 >= self.columns || coords.1 >= self.rows {
            return None;
        }
        self.face(coords_to_id(coords, self.columns))
    }

    /// Faces grouped into rows, top to bottom.
    pub fn card_rows(&self) -> impl Iterator<Item = &[CardFace]> {
        self.faces.chunks(usize::from(self.columns).max(1))
    }
}

impl From<&MatchEngine> for BoardView {
    fn from(engine: &MatchEngine) -> Self {
        Self::from_engine(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_cards_do_not_leak_values() {
        let profile = Difficulty::Easy.profile();
        let mut engine = MatchEngine::generate(profile, OrderedDeckGenerator);
        engine.reveal(0).unwrap();
        engine.reveal(1).unwrap();
        engine.reveal(5).unwrap();

        let view = BoardView::from_engine(&engine);

        assert_eq!(view.face(0), Some(CardFace::Matched(1)));
        assert_eq!(view.face(5), Some(CardFace::Flipped(3)));
        assert_eq!(view.face(2), Some(CardFace::Hidden));
        assert_eq!(view.face(2).and_then(CardFace::value), None);
        assert_eq!(view.face_at((1, 1)), Some(CardFace::Flipped(3)));
        assert_eq!(view.face_at((4, 0)), None);
        assert_eq!(view.moves_made, 1);
        assert_eq!(view.pairs_found, 1);
    }

    #[test]
    fn rows_follow_profile_layout() {
        let engine = MatchEngine::generate(Difficulty::Hard.profile(), OrderedDeckGenerator);
        let view = BoardView::from(&engine);

        assert_eq!(view.card_rows().count(), 8);
        assert!(view.card_rows().all(|row| row.len() == 6));
    }
}
