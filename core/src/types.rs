/// Single axis used for board width and height.
pub type Coord = u8;

/// Count type used for card and pair totals.
pub type CardCount = u16;

/// Position of a card on the board, row-major and 0-based.
pub type CardId = CardCount;

/// Value shared by the two cards of a pair, starting at 1.
pub type PairValue = CardCount;

/// Number of completed two-card attempts.
pub type MoveCount = u32;

pub const fn mult(a: Coord, b: Coord) -> CardCount {
    let a = a as CardCount;
    let b = b as CardCount;
    a.saturating_mul(b)
}

/// Converts a row-major card id into `(column, row)`.
pub const fn id_to_coords(id: CardId, columns: Coord) -> (Coord, Coord) {
    let columns = columns as CardCount;
    ((id % columns) as Coord, (id / columns) as Coord)
}

pub const fn coords_to_id((column, row): (Coord, Coord), columns: Coord) -> CardId {
    row as CardId * columns as CardId + column as CardId
}
