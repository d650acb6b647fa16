use serde::{Deserialize, Serialize};

use crate::*;

/// Per-card lifecycle: `Hidden -> Flipped -> (Hidden | Matched)`, `Matched` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    Hidden,
    Flipped,
    Matched,
}

impl CardState {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Flipped | Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    pair_value: PairValue,
    is_flipped: bool,
    is_matched: bool,
}

impl Card {
    pub(crate) const fn new(id: CardId, pair_value: PairValue) -> Self {
        Self {
            id,
            pair_value,
            is_flipped: false,
            is_matched: false,
        }
    }

    pub const fn id(&self) -> CardId {
        self.id
    }

    pub const fn pair_value(&self) -> PairValue {
        self.pair_value
    }

    pub const fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub const fn is_matched(&self) -> bool {
        self.is_matched
    }

    pub const fn state(&self) -> CardState {
        match (self.is_flipped, self.is_matched) {
            (_, true) => CardState::Matched,
            (true, false) => CardState::Flipped,
            (false, false) => CardState::Hidden,
        }
    }

    pub(crate) fn flip(&mut self) {
        debug_assert!(!self.is_matched, "matched cards never change");
        self.is_flipped = true;
    }

    pub(crate) fn hide(&mut self) {
        if !self.is_matched {
            self.is_flipped = false;
        }
    }

    pub(crate) fn set_matched(&mut self) {
        self.is_flipped = true;
        self.is_matched = true;
    }
}
