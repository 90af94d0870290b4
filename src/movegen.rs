//! Legal move generation.
//!
//! A turn is zero, one, or two slides followed by a mandatory push, so one
//! "move" takes a position all the way to the opponent's turn. Generation
//! works on raw placements (piece id -> cell arrays) and only builds full
//! [`Position`] values for emitted successors:
//!
//! 1. Flood-fill the empty cells into cardinally-connected regions and
//!    record which pieces stand on each region's boundary.
//! 2. Run a worklist of (placement, slides-used) pairs, depth-capped at two
//!    slides. Every popped placement attempts all pushes; shallower ones
//!    also relocate each boundary piece of the side to move into every cell
//!    of its region.
//! 3. Deduplicate throughout with the canonical role-set key, so the
//!    branching factor counts distinct positions rather than permutations
//!    of interchangeable pieces.
//!
//! The successor set is unordered; callers must not rely on its order.

use std::collections::HashSet;

use crate::board::{self, Cell};
use crate::constants::{CARDINAL_DIRS, MAX_SLIDES, NCELLS, NUM_PIECES};
use crate::position::{PieceId, Position, PositionKey, RoleSets, role_sets};

type Placement = [Cell; NUM_PIECES];

/// Dense cell-indexed occupancy map for a placement. Off-grid pieces
/// (possible only in terminal states) simply do not appear.
type Occupancy = [Option<PieceId>; NCELLS];

fn occupancy(cells: &Placement) -> Occupancy {
    let mut occ = [None; NCELLS];
    for (id, &cell) in cells.iter().enumerate() {
        if let Some(i) = board::cell_index(cell) {
            occ[i] = Some(id);
        }
    }
    occ
}

fn occupant_at(occ: &Occupancy, cell: Cell) -> Option<PieceId> {
    board::cell_index(cell).and_then(|i| occ[i])
}

/// A maximal connected area of empty cells plus the pieces on its rim.
struct Region {
    cells: Vec<Cell>,
    boundary: Vec<PieceId>,
}

/// Partition the unoccupied on-grid cells of a placement into regions.
fn empty_regions(occ: &Occupancy) -> Vec<Region> {
    let mut visited = [false; NCELLS];
    let mut regions = Vec::new();

    for (seed_idx, seed) in board::all_cells().enumerate() {
        if visited[seed_idx] || occ[seed_idx].is_some() {
            continue;
        }
        visited[seed_idx] = true;
        let mut stack = vec![seed];
        let mut area = Vec::new();
        let mut boundary = Vec::new();
        let mut on_rim = [false; NUM_PIECES];

        while let Some(cell) = stack.pop() {
            area.push(cell);
            for n in board::cardinal_neighbors(cell) {
                let Some(i) = board::cell_index(n) else {
                    continue;
                };
                if let Some(id) = occ[i] {
                    if !on_rim[id] {
                        on_rim[id] = true;
                        boundary.push(id);
                    }
                } else if !visited[i] {
                    visited[i] = true;
                    stack.push(n);
                }
            }
        }
        regions.push(Region { cells: area, boundary });
    }
    regions
}

/// Walk a push from `pusher`'s cell in direction `dir`.
///
/// Returns the chain of pieces to shift, pusher first, or None when the
/// push is illegal: the walk runs into the anchor square, the lead piece
/// would land on a railed-off cell, or nothing besides the pusher would
/// move (that would be a slide, not a push).
fn push_chain(
    cells: &Placement,
    occ: &Occupancy,
    anchor: Option<Cell>,
    pusher: PieceId,
    dir: (i8, i8),
) -> Option<Vec<PieceId>> {
    let (dr, dc) = dir;
    let mut chain = vec![pusher];
    let (mut row, mut col) = cells[pusher];

    loop {
        row += dr;
        col += dc;
        let cell = (row, col);
        if anchor == Some(cell) {
            return None;
        }
        match occupant_at(occ, cell) {
            Some(id) => chain.push(id),
            None => {
                let open = match row {
                    -1 | 4 => board::is_rail_gap(cell),
                    _ => true,
                };
                return (open && chain.len() > 1).then_some(chain);
            }
        }
    }
}

/// Shift a resolved chain one step and build the successor position. The
/// anchor lands on the pusher's new cell and the turn flips.
fn apply_push(pos: &Position, cells: &Placement, chain: &[PieceId], dir: (i8, i8)) -> Position {
    let (dr, dc) = dir;
    let mut next = *cells;
    for &id in chain {
        next[id].0 += dr;
        next[id].1 += dc;
    }
    Position {
        anchor: Some(next[chain[0]]),
        cells: next,
        white_to_move: !pos.white_to_move,
    }
}

/// Every legal successor of `pos` for one full turn of the side to move,
/// deduplicated by canonical key.
///
/// A slide combination with no legal push contributes nothing; the union
/// over all slide choices is returned. For a well-formed non-terminal
/// position the result is non-empty in practice (callers treat an empty
/// result as a rules violation, not a stalemate).
pub fn legal_moves(pos: &Position) -> Vec<Position> {
    let mut successors = Vec::new();
    let mut emitted: HashSet<PositionKey> = HashSet::new();
    let mut seen: HashSet<RoleSets> = HashSet::new();
    let mut work: Vec<(Placement, u8)> = vec![(pos.cells, 0)];
    seen.insert(role_sets(&pos.cells));

    while let Some((cells, slides)) = work.pop() {
        let occ = occupancy(&cells);

        for pusher in pos.pushers_to_move() {
            for dir in CARDINAL_DIRS {
                if let Some(chain) = push_chain(&cells, &occ, pos.anchor, pusher, dir) {
                    let next = apply_push(pos, &cells, &chain, dir);
                    if emitted.insert(next.key()) {
                        successors.push(next);
                    }
                }
            }
        }

        if slides >= MAX_SLIDES {
            continue;
        }
        for region in empty_regions(&occ) {
            for &id in &region.boundary {
                if !pos.pieces_to_move().contains(&id) {
                    continue;
                }
                for &dest in &region.cells {
                    let mut moved = cells;
                    moved[id] = dest;
                    if seen.insert(role_sets(&moved)) {
                        work.push((moved, slides + 1));
                    }
                }
            }
        }
    }
    successors
}
