//! Built-in sample boards.

pub mod air_quality;
pub mod cars;

use crate::board::Board;

/// Every sample board, in display order.
pub fn boards() -> Vec<Board> {
    vec![air_quality::board(), cars::board()]
}
