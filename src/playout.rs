//! Random playouts (game simulation).
//!
//! A playout plays uniformly-random full turns until some piece leaves the
//! grid, then reports the winner. Randomness comes from a caller-owned
//! `fastrand::Rng`, so simulations are reproducible under a fixed seed and
//! the module keeps no global state.

use crate::constants::MAX_ROLLOUT_PLIES;
use crate::movegen::legal_moves;
use crate::position::{Color, Position};

/// Play random moves from `pos` until the game ends and return the winner.
///
/// The winner of a finished game is the side that made the last push, i.e.
/// the side *not* to move in the terminal state. Random Push Fight games
/// end quickly in practice; the ply cap only guards the pathological
/// all-shuffling case, and a capped game is scored for the side that moved
/// last, matching the terminal convention.
pub fn rollout(pos: &Position, rng: &mut fastrand::Rng) -> Color {
    let mut current = pos.clone();
    let mut plies = 0;

    while !current.is_over() && plies < MAX_ROLLOUT_PLIES {
        let mut moves = legal_moves(&current);
        assert!(
            !moves.is_empty(),
            "non-terminal position with no legal turn"
        );
        let pick = rng.usize(..moves.len());
        current = moves.swap_remove(pick);
        plies += 1;
    }

    current.winner().unwrap_or_else(|| current.side_to_move().opponent())
}
