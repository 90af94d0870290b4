//! Static board geometry.
//!
//! The Push Fight grid is a fixed irregular shape: four rows of uneven
//! width. Rails run along the top and bottom edges, so pieces can only be
//! shoved off through the open short ends of each row or through the rail
//! gaps beyond rows 0 and 3. Everything here is a pure function of the
//! coordinates; there is no board object and no hidden state.

use crate::constants::{CARDINAL_DIRS, NROWS, ROW_COLS, ROW_OFFSETS};

/// A (row, column) coordinate. On-grid rows are 0..=3; rows -1 and 4 are
/// the rail rows a piece lands in when pushed off vertically.
pub type Cell = (i8, i8);

/// Whether a cell is part of the playable grid.
pub fn is_on_grid(cell: Cell) -> bool {
    let (row, col) = cell;
    if row < 0 || row >= NROWS {
        return false;
    }
    let (lo, hi) = ROW_COLS[row as usize];
    lo <= col && col <= hi
}

/// The four cardinal neighbors of a cell, unfiltered. Callers check
/// `is_on_grid` themselves; off-grid neighbors matter for push resolution.
pub fn cardinal_neighbors(cell: Cell) -> [Cell; 4] {
    let (row, col) = cell;
    std::array::from_fn(|i| {
        let (dr, dc) = CARDINAL_DIRS[i];
        (row + dr, col + dc)
    })
}

/// Whether an off-grid cell sits in a rail gap.
///
/// The rails cover the middle columns beyond rows 0 and 3; a vertical push
/// can only eject a piece where the rail is cut out. Horizontal ejections
/// past a row's short end never meet a rail, so they are not handled here.
pub fn is_rail_gap(cell: Cell) -> bool {
    let (row, col) = cell;
    match row {
        -1 => !(2 < col && col < 8),
        4 => !(1 < col && col < 7),
        _ => false,
    }
}

/// Dense row-major index of an on-grid cell, 0..NCELLS.
pub fn cell_index(cell: Cell) -> Option<usize> {
    if !is_on_grid(cell) {
        return None;
    }
    let (row, col) = cell;
    Some(ROW_OFFSETS[row as usize] + (col - ROW_COLS[row as usize].0) as usize)
}

/// All on-grid cells in row-major order (the `cell_index` order).
pub fn all_cells() -> impl Iterator<Item = Cell> {
    (0..NROWS).flat_map(|row| {
        let (lo, hi) = ROW_COLS[row as usize];
        (lo..=hi).map(move |col| (row, col))
    })
}
