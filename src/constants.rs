//! Constants for board geometry, piece layout, and search parameters.
//!
//! The board is the standard Push Fight grid: four playable rows of uneven
//! width, with rails along the long edges. Rows are numbered 0 (top) to 3
//! (bottom); rows -1 and 4 only exist as the space a piece is shoved into
//! when it leaves the board through a rail gap.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of playable rows.
pub const NROWS: i8 = 4;

/// Per-row inclusive column bounds, indexed by row 0..=3.
///
/// Row 0 and row 3 are the short rows tucked behind the rails; rows 1 and 2
/// span the full width of the board.
pub const ROW_COLS: [(i8, i8); 4] = [(3, 7), (1, 8), (1, 8), (2, 6)];

/// Number of on-grid cells (5 + 8 + 8 + 5).
pub const NCELLS: usize = 26;

/// Start of each row in the dense row-major cell numbering.
pub const ROW_OFFSETS: [usize; 4] = [0, 5, 13, 21];

// =============================================================================
// Piece Layout
// =============================================================================

/// Pushers per side.
pub const PUSHERS_PER_SIDE: usize = 3;

/// Movers per side.
pub const MOVERS_PER_SIDE: usize = 2;

/// Pieces per side.
pub const PIECES_PER_SIDE: usize = PUSHERS_PER_SIDE + MOVERS_PER_SIDE;

/// Total pieces on the board.
pub const NUM_PIECES: usize = 2 * PIECES_PER_SIDE;

/// Piece ids 0..3: white pushers.
pub const WHITE_PUSHERS: std::ops::Range<usize> = 0..3;

/// Piece ids 3..5: white movers.
pub const WHITE_MOVERS: std::ops::Range<usize> = 3..5;

/// Piece ids 5..8: black pushers.
pub const BLACK_PUSHERS: std::ops::Range<usize> = 5..8;

/// Piece ids 8..10: black movers.
pub const BLACK_MOVERS: std::ops::Range<usize> = 8..10;

// =============================================================================
// Turn Structure
// =============================================================================

/// Maximum slide moves before the mandatory push.
pub const MAX_SLIDES: u8 = 2;

/// The four cardinal directions as (row, column) deltas.
pub const CARDINAL_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default planning budget in milliseconds.
pub const DEFAULT_BUDGET_MS: u64 = 1000;

/// Exploration constant inside the UCT radical: sqrt(UCT_C * ln(N) / n).
pub const UCT_C: f64 = 2.0;

/// Rollout length cap. Random play ends a game long before this in
/// practice; the cap bounds the degenerate shuffling case.
pub const MAX_ROLLOUT_PLIES: usize = 400;
