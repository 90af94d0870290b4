//! Packed bit-plane position encoding.
//!
//! A position fits one word: four parallel boolean planes indexed by the
//! dense cell numbering (occupied, is-pusher, is-white, is-anchor) plus a
//! side-to-move bit above them. Piece identities are not stored; decoding
//! hands ids out in cell order within each (color, role) group, which is
//! exactly the freedom the canonical key allows. The planner never
//! touches this module; it exists for persistence and transport.

use std::fmt;

use crate::board::{self, Cell};
use crate::constants::{MOVERS_PER_SIDE, NCELLS, NUM_PIECES, PUSHERS_PER_SIDE};
use crate::position::{Color, Position, Role, color_of, role_of};

/// A packed position. Only the low `4 * NCELLS + 1` bits are used.
pub type Packed = u128;

const PLANE_BITS: u32 = NCELLS as u32;
const PLANE_MASK: u32 = (1 << PLANE_BITS) - 1;
const OCCUPIED: u32 = 0;
const PUSHER: u32 = 1;
const WHITE: u32 = 2;
const ANCHOR: u32 = 3;
const TURN_BIT: u32 = 4 * PLANE_BITS;

/// Ways a packed word can fail to describe a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Bits set above the four planes and the turn bit.
    StrayBits,
    /// A pusher, color, or anchor bit marks a cell the occupancy plane
    /// leaves empty.
    MarkedEmptyCell,
    /// The anchor plane marks more than one cell.
    MultipleAnchors,
    /// A (color, role) group does not have its required piece count.
    PieceCount,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::StrayBits => write!(f, "bits set outside the board planes"),
            CodecError::MarkedEmptyCell => write!(f, "plane bit set on an unoccupied cell"),
            CodecError::MultipleAnchors => write!(f, "more than one anchor cell"),
            CodecError::PieceCount => write!(f, "wrong piece count in a color/role group"),
        }
    }
}

impl std::error::Error for CodecError {}

fn plane(packed: Packed, which: u32) -> u32 {
    ((packed >> (which * PLANE_BITS)) as u32) & PLANE_MASK
}

fn cell_bit(cell: Cell) -> u32 {
    board::cell_index(cell).expect("packed cells are on-grid") as u32
}

/// Pack an in-progress position.
///
/// Terminal positions are not representable: an off-grid piece has no
/// cell index. Handing one in is a caller bug.
pub fn encode(pos: &Position) -> Packed {
    assert!(pos.is_valid(), "only an in-progress position can be packed");
    let mut packed: Packed = 0;
    for (id, &cell) in pos.cells.iter().enumerate() {
        let idx = cell_bit(cell);
        packed |= 1u128 << (OCCUPIED * PLANE_BITS + idx);
        if role_of(id) == Role::Pusher {
            packed |= 1u128 << (PUSHER * PLANE_BITS + idx);
        }
        if color_of(id) == Color::White {
            packed |= 1u128 << (WHITE * PLANE_BITS + idx);
        }
    }
    if let Some(anchor) = pos.anchor {
        packed |= 1u128 << (ANCHOR * PLANE_BITS + cell_bit(anchor));
    }
    if pos.white_to_move {
        packed |= 1u128 << TURN_BIT;
    }
    packed
}

/// Unpack a position, assigning piece ids in cell order within each
/// (color, role) group.
pub fn decode(packed: Packed) -> Result<Position, CodecError> {
    if packed >> (TURN_BIT + 1) != 0 {
        return Err(CodecError::StrayBits);
    }
    let occupied = plane(packed, OCCUPIED);
    let pusher = plane(packed, PUSHER);
    let white = plane(packed, WHITE);
    let anchor = plane(packed, ANCHOR);

    if (pusher | white | anchor) & !occupied != 0 {
        return Err(CodecError::MarkedEmptyCell);
    }
    if anchor.count_ones() > 1 {
        return Err(CodecError::MultipleAnchors);
    }

    // Gather cells per (color, role) group in the id-layout order: white
    // pushers, white movers, black pushers, black movers.
    let mut groups: [Vec<Cell>; 4] = std::array::from_fn(|_| Vec::new());
    let mut anchor_cell = None;
    for (idx, cell) in board::all_cells().enumerate() {
        let bit = 1u32 << idx;
        if occupied & bit == 0 {
            continue;
        }
        let group = match (white & bit != 0, pusher & bit != 0) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        };
        groups[group].push(cell);
        if anchor & bit != 0 {
            anchor_cell = Some(cell);
        }
    }

    let sizes = [PUSHERS_PER_SIDE, MOVERS_PER_SIDE, PUSHERS_PER_SIDE, MOVERS_PER_SIDE];
    for (group, &expected) in groups.iter().zip(&sizes) {
        if group.len() != expected {
            return Err(CodecError::PieceCount);
        }
    }

    let mut cells: [Cell; NUM_PIECES] = [(0, 0); NUM_PIECES];
    for (slot, &cell) in groups.iter().flatten().enumerate() {
        cells[slot] = cell;
    }
    Ok(Position {
        cells,
        white_to_move: packed & (1u128 << TURN_BIT) != 0,
        anchor: anchor_cell,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::legal_moves;

    #[test]
    fn test_round_trip_preserves_the_position() {
        let start = Position::start();
        let decoded = decode(encode(&start)).unwrap();
        assert_eq!(decoded.key(), start.key());

        // A position with an anchor and black to move survives as well.
        let pushed = legal_moves(&start)
            .into_iter()
            .find(|m| m.is_valid())
            .unwrap();
        let decoded = decode(encode(&pushed)).unwrap();
        assert_eq!(decoded.key(), pushed.key());
    }

    #[test]
    fn test_decoded_ids_stay_within_role_groups() {
        let start = Position::start();
        let decoded = decode(encode(&start)).unwrap();
        for id in 0..NUM_PIECES {
            let original = start.occupant(decoded.cells[id]).unwrap();
            assert_eq!(color_of(id), color_of(original));
            assert_eq!(role_of(id), role_of(original));
        }
    }

    #[test]
    fn test_stray_bits_are_rejected() {
        let packed = encode(&Position::start());
        assert_eq!(
            decode(packed | (1u128 << (TURN_BIT + 1))),
            Err(CodecError::StrayBits)
        );
    }

    #[test]
    fn test_missing_piece_is_rejected() {
        // Clearing a black mover's occupancy bit leaves its group short
        // without orphaning any other plane bit.
        let idx = cell_bit((1, 6));
        let packed = encode(&Position::start()) & !(1u128 << idx);
        assert_eq!(decode(packed), Err(CodecError::PieceCount));
    }

    #[test]
    fn test_marks_off_pieces_are_rejected() {
        let empty_idx = cell_bit((1, 1));
        let packed = encode(&Position::start()) | (1u128 << (ANCHOR * PLANE_BITS + empty_idx));
        assert_eq!(decode(packed), Err(CodecError::MarkedEmptyCell));
    }

    #[test]
    fn test_two_anchors_are_rejected() {
        let a = cell_bit((0, 4));
        let b = cell_bit((0, 5));
        let packed = encode(&Position::start())
            | (1u128 << (ANCHOR * PLANE_BITS + a))
            | (1u128 << (ANCHOR * PLANE_BITS + b));
        assert_eq!(decode(packed), Err(CodecError::MultipleAnchors));
    }
}
