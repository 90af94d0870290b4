//! Push Fight position representation.
//!
//! This module provides the core state type:
//! - Piece identities and the fixed starting placement
//! - The terminal predicate and winner determination
//! - The canonical role-set key used to deduplicate positions
//!
//! A `Position` is a pure value. Moves never mutate a position; the move
//! generator builds new ones. Piece ids keep occupancy bookkeeping simple,
//! but pieces of the same color and role are interchangeable, which is why
//! equality of *positions* goes through [`Position::key`].

use std::fmt;

use crate::board::{self, Cell};
use crate::constants::{
    BLACK_MOVERS, BLACK_PUSHERS, MOVERS_PER_SIDE, NROWS, NUM_PIECES, PIECES_PER_SIDE,
    PUSHERS_PER_SIDE, WHITE_MOVERS, WHITE_PUSHERS,
};

/// A side in the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// What a piece is allowed to do: pushers push, movers only slide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Pusher,
    Mover,
}

/// Index into [`Position::cells`]. White pushers come first, then white
/// movers, then the black pieces in the same order.
pub type PieceId = usize;

/// The color a piece id belongs to.
pub fn color_of(id: PieceId) -> Color {
    if id < PIECES_PER_SIDE {
        Color::White
    } else {
        Color::Black
    }
}

/// The role a piece id carries.
pub fn role_of(id: PieceId) -> Role {
    if id % PIECES_PER_SIDE < PUSHERS_PER_SIDE {
        Role::Pusher
    } else {
        Role::Mover
    }
}

/// The piece occupying a cell in a raw placement, if any.
pub fn occupant(cells: &[Cell; NUM_PIECES], cell: Cell) -> Option<PieceId> {
    cells.iter().position(|&c| c == cell)
}

/// A board state: piece placement, side to move, and the anchor left by
/// the previous push.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Piece id -> cell. Pairwise distinct; off-grid only in terminal states.
    pub cells: [Cell; NUM_PIECES],
    /// Whose turn it is.
    pub white_to_move: bool,
    /// Destination square of the previous push. Pushing through it is illegal.
    pub anchor: Option<Cell>,
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl Position {
    /// The fixed starting position: white on the left file, black on the
    /// right, white to move, no anchor yet.
    pub fn start() -> Self {
        Position {
            cells: [
                // white pushers
                (0, 4),
                (1, 4),
                (3, 4),
                // white movers
                (2, 4),
                (2, 3),
                // black pushers
                (0, 5),
                (2, 5),
                (3, 5),
                // black movers
                (2, 6),
                (1, 6),
            ],
            white_to_move: true,
            anchor: None,
        }
    }

    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Piece ids of the side to move's pushers.
    pub fn pushers_to_move(&self) -> std::ops::Range<PieceId> {
        if self.white_to_move {
            WHITE_PUSHERS
        } else {
            BLACK_PUSHERS
        }
    }

    /// Piece ids of every piece belonging to the side to move.
    pub fn pieces_to_move(&self) -> std::ops::Range<PieceId> {
        if self.white_to_move {
            WHITE_PUSHERS.start..WHITE_MOVERS.end
        } else {
            BLACK_PUSHERS.start..BLACK_MOVERS.end
        }
    }

    /// The piece on a cell, if any.
    pub fn occupant(&self, cell: Cell) -> Option<PieceId> {
        occupant(&self.cells, cell)
    }

    /// The game is over once any piece has left the grid.
    pub fn is_over(&self) -> bool {
        self.cells.iter().any(|&c| !board::is_on_grid(c))
    }

    /// The winner of a finished game. The turn flips when a push resolves,
    /// so the side that just shoved a piece off is the side *not* to move.
    pub fn winner(&self) -> Option<Color> {
        if self.is_over() {
            Some(self.side_to_move().opponent())
        } else {
            None
        }
    }

    /// Structural well-formedness: all pieces on-grid and pairwise distinct.
    /// Terminal states legitimately fail the on-grid half.
    pub fn is_valid(&self) -> bool {
        let distinct = (0..NUM_PIECES)
            .all(|i| (i + 1..NUM_PIECES).all(|j| self.cells[i] != self.cells[j]));
        distinct && self.cells.iter().all(|&c| board::is_on_grid(c))
    }

    /// The canonical key for deduplication.
    pub fn key(&self) -> PositionKey {
        PositionKey {
            pieces: role_sets(&self.cells),
            anchor: self.anchor,
            white_to_move: self.white_to_move,
        }
    }
}

/// Sorted cell sets per (color, role) group: white pushers, white movers,
/// black pushers, black movers.
pub type RoleSets = (
    [Cell; PUSHERS_PER_SIDE],
    [Cell; MOVERS_PER_SIDE],
    [Cell; PUSHERS_PER_SIDE],
    [Cell; MOVERS_PER_SIDE],
);

/// Erase piece identities within each (color, role) group by sorting.
pub fn role_sets(cells: &[Cell; NUM_PIECES]) -> RoleSets {
    let mut wp: [Cell; PUSHERS_PER_SIDE] = std::array::from_fn(|i| cells[WHITE_PUSHERS.start + i]);
    let mut wm: [Cell; MOVERS_PER_SIDE] = std::array::from_fn(|i| cells[WHITE_MOVERS.start + i]);
    let mut bp: [Cell; PUSHERS_PER_SIDE] = std::array::from_fn(|i| cells[BLACK_PUSHERS.start + i]);
    let mut bm: [Cell; MOVERS_PER_SIDE] = std::array::from_fn(|i| cells[BLACK_MOVERS.start + i]);
    wp.sort_unstable();
    wm.sort_unstable();
    bp.sort_unstable();
    bm.sort_unstable();
    (wp, wm, bp, bm)
}

/// Order-independent fingerprint of a position. Two positions with equal
/// keys differ at most by which interchangeable piece sits where.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pieces: RoleSets,
    anchor: Option<Cell>,
    white_to_move: bool,
}

fn glyph(id: PieceId) -> char {
    match (color_of(id), role_of(id)) {
        (Color::White, Role::Pusher) => 'P',
        (Color::White, Role::Mover) => 'M',
        (Color::Black, Role::Pusher) => 'p',
        (Color::Black, Role::Mover) => 'm',
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NROWS {
            for col in 1..=8 {
                let cell = (row, col);
                let ch = if !board::is_on_grid(cell) {
                    ' '
                } else if let Some(id) = self.occupant(cell) {
                    glyph(id)
                } else {
                    '.'
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "{:?} to move", self.side_to_move())?;
        if let Some((r, c)) = self.anchor {
            write!(f, ", anchor at ({r}, {c})")?;
        }
        writeln!(f)
    }
}
