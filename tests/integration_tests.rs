//! Integration tests for pushfight-rust
//!
//! End-to-end checks of the public surface: grid geometry, full-turn move
//! generation, terminal handling, the packed codec, and the planner.

use std::collections::HashSet;
use std::time::Duration;

use pushfight_rust::board::{Cell, all_cells, cell_index, is_on_grid, is_rail_gap};
use pushfight_rust::codec;
use pushfight_rust::constants::{MAX_SLIDES, NCELLS, NUM_PIECES};
use pushfight_rust::mcts;
use pushfight_rust::movegen::legal_moves;
use pushfight_rust::position::{Color, Position, PositionKey};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Build a position from raw piece cells, checking it is well-formed.
fn custom(cells: [Cell; NUM_PIECES], white_to_move: bool, anchor: Option<Cell>) -> Position {
    let pos = Position {
        cells,
        white_to_move,
        anchor,
    };
    assert!(pos.is_valid(), "test position must be well-formed");
    pos
}

fn keys(moves: &[Position]) -> HashSet<PositionKey> {
    moves.iter().map(Position::key).collect()
}

fn step(from: Cell, to: Cell) -> (i8, i8) {
    (to.0 - from.0, to.1 - from.1)
}

/// White's leading pusher stands one push away from ejecting the black
/// mover over the right edge. The rest of the board is walled in so the
/// side to move has only a handful of choices.
fn ejection_in_one() -> Position {
    custom(
        [
            (1, 7), // white pusher behind the black mover on the rim
            (0, 6),
            (2, 6),
            (2, 8),
            (3, 6),
            (0, 5), // black pushers form a wall down column 5
            (1, 5),
            (2, 5),
            (1, 8), // black mover on the rim
            (3, 5),
        ],
        true,
        None,
    )
}

// =============================================================================
// Board geometry
// =============================================================================

#[test]
fn test_grid_accepts_exactly_the_documented_cells() {
    for row in -3i8..8 {
        for col in -3i8..12 {
            let expected = match row {
                0 => (3..=7).contains(&col),
                1 | 2 => (1..=8).contains(&col),
                3 => (2..=6).contains(&col),
                _ => false,
            };
            assert_eq!(is_on_grid((row, col)), expected, "cell ({row}, {col})");
        }
    }
}

#[test]
fn test_cell_index_is_dense_row_major() {
    let cells: Vec<Cell> = all_cells().collect();
    assert_eq!(cells.len(), NCELLS);
    for (i, &cell) in cells.iter().enumerate() {
        assert_eq!(cell_index(cell), Some(i));
    }
    assert_eq!(cell_index((-1, 2)), None);
    assert_eq!(cell_index((4, 8)), None);
    assert_eq!(cell_index((1, 0)), None);
}

#[test]
fn test_rail_gaps_sit_only_beyond_the_short_rows() {
    for col in -2i8..12 {
        assert_eq!(is_rail_gap((-1, col)), col <= 2 || col >= 8, "top rail, col {col}");
        assert_eq!(is_rail_gap((4, col)), col <= 1 || col >= 7, "bottom rail, col {col}");
        assert!(!is_rail_gap((0, col)));
        assert!(!is_rail_gap((3, col)));
    }
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_generation_yields_one_set_of_positions() {
    for pos in [Position::start(), ejection_in_one()] {
        let first = legal_moves(&pos);
        let second = legal_moves(&pos);
        assert_eq!(keys(&first), keys(&second));
    }
}

#[test]
fn test_a_lone_pusher_step_never_counts_as_a_push() {
    // (0,3) next to the white pusher on (0,4) is empty in the start
    // position; stepping into it with nothing in front would be a slide
    // dressed up as a push.
    let parent = Position::start();
    let mut fake = parent.clone();
    fake.cells[0] = (0, 3);
    fake.anchor = Some((0, 3));
    fake.white_to_move = false;
    assert!(!keys(&legal_moves(&parent)).contains(&fake.key()));
}

#[test]
fn test_anchor_blocks_the_push_that_walks_through_it() {
    let cells = [
        (1, 2),
        (3, 2),
        (3, 3),
        (3, 4),
        (3, 5),
        (1, 3),
        (1, 4),
        (0, 3),
        (0, 4),
        (2, 8),
    ];
    // Pushing right from (1,2) shoves the black pair one step over.
    let expected = custom(
        [
            (1, 3),
            (3, 2),
            (3, 3),
            (3, 4),
            (3, 5),
            (1, 4),
            (1, 5),
            (0, 3),
            (0, 4),
            (2, 8),
        ],
        false,
        Some((1, 3)),
    );

    let free = custom(cells, true, None);
    assert!(keys(&legal_moves(&free)).contains(&expected.key()));

    // With the anchor sitting mid-chain the same outcome is unreachable.
    let anchored = custom(cells, true, Some((1, 4)));
    assert!(!keys(&legal_moves(&anchored)).contains(&expected.key()));
}

#[test]
fn test_pushing_a_piece_past_the_edge_ends_the_game() {
    // Black mover on the open right edge with a white pusher behind it.
    let pos = custom(
        [
            (1, 7),
            (3, 3),
            (3, 4),
            (2, 3),
            (2, 4),
            (0, 4),
            (0, 5),
            (3, 5),
            (1, 8),
            (2, 6),
        ],
        true,
        None,
    );
    assert!(!pos.is_over());

    let finished: Vec<Position> = legal_moves(&pos).into_iter().filter(|m| m.is_over()).collect();
    assert!(!finished.is_empty(), "the edge push must appear among the successors");
    for m in &finished {
        assert_eq!(m.winner(), Some(Color::White));
        assert!(m.cells.iter().any(|&c| !is_on_grid(c)));
    }
}

#[test]
fn test_successors_are_two_slides_plus_one_push_chain() {
    let parent = Position::start();
    for m in legal_moves(&parent) {
        let anchor = m.anchor.expect("every successor ends with a push");

        // Opponent pieces move only when pushed: one step each, all in
        // one shared direction.
        let opp_moved: Vec<usize> = (5..NUM_PIECES)
            .filter(|&id| parent.cells[id] != m.cells[id])
            .collect();
        for &id in &opp_moved {
            let (dr, dc) = step(parent.cells[id], m.cells[id]);
            assert_eq!(dr.abs() + dc.abs(), 1, "piece {id} moved without being pushed");
        }
        let opp_dirs: HashSet<(i8, i8)> = opp_moved
            .iter()
            .map(|&id| step(parent.cells[id], m.cells[id]))
            .collect();
        assert!(opp_dirs.len() <= 1, "pushed pieces must share one direction");

        // Some direction must explain the successor as one push chain out
        // of the anchor plus at most two slid pieces.
        let explained = [(-1, 0), (1, 0), (0, -1), (0, 1)].iter().any(|&dir| {
            if opp_dirs.iter().any(|&d| d != dir) {
                return false;
            }
            let (dr, dc) = dir;
            let mut run = HashSet::new();
            let (mut r, mut c) = anchor;
            while m.cells.contains(&(r, c)) {
                run.insert((r, c));
                r += dr;
                c += dc;
            }
            if !opp_moved.iter().all(|&id| run.contains(&m.cells[id])) {
                return false;
            }
            let slid = parent
                .pieces_to_move()
                .filter(|&id| parent.cells[id] != m.cells[id])
                .filter(|&id| m.cells[id] != anchor)
                .filter(|&id| {
                    !(run.contains(&m.cells[id]) && step(parent.cells[id], m.cells[id]) == dir)
                })
                .count();
            slid <= MAX_SLIDES as usize
        });
        assert!(explained, "a successor needs more than two slides to explain");
    }
}

// =============================================================================
// Canonicalization
// =============================================================================

#[test]
fn test_interchangeable_pieces_share_a_key() {
    let start = Position::start();

    let mut movers = start.clone();
    movers.cells.swap(3, 4); // the two white movers
    assert_ne!(movers.cells, start.cells);
    assert_eq!(movers.key(), start.key());

    let mut pushers = start.clone();
    pushers.cells.swap(5, 7); // two black pushers
    assert_eq!(pushers.key(), start.key());
}

// =============================================================================
// Codec
// =============================================================================

#[test]
fn test_packed_round_trip_preserves_the_canonical_key() {
    let start = Position::start();
    assert_eq!(codec::decode(codec::encode(&start)).unwrap().key(), start.key());

    let pushed = legal_moves(&start)
        .into_iter()
        .find(|m| m.is_valid())
        .expect("the opening offers a push that keeps every piece on the board");
    assert_eq!(codec::decode(codec::encode(&pushed)).unwrap().key(), pushed.key());
}

#[test]
fn test_malformed_packed_words_are_rejected() {
    let packed = codec::encode(&Position::start());
    assert!(codec::decode(packed | (1u128 << 120)).is_err());

    // Dropping a piece's occupancy bit orphans its color/role marks.
    let idx = cell_index((0, 4)).unwrap();
    assert!(codec::decode(packed & !(1u128 << idx)).is_err());
}

// =============================================================================
// Planner
// =============================================================================

#[test]
fn test_zero_budget_still_yields_a_legal_move() {
    let pos = ejection_in_one();
    let mut rng = fastrand::Rng::with_seed(3);
    let chosen = mcts::plan_with_rng(&pos, Duration::ZERO, &mut rng);
    assert!(keys(&legal_moves(&pos)).contains(&chosen.key()));
}

#[test]
fn test_planner_converges_on_a_winning_push() {
    let pos = ejection_in_one();
    let mut found = 0;
    for seed in 0..10 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let chosen = mcts::plan_with_rng(&pos, Duration::from_millis(50), &mut rng);
        if chosen.winner() == Some(Color::White) {
            found += 1;
        }
    }
    assert!(found >= 8, "winning push chosen only {found}/10 times");
}
