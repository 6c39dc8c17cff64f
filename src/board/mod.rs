//! Board topology.
//!
//! The board is a shared ring of cells plus one private safe lane per color.
//! Each color enters the ring at the first cell of its quadrant, runs a full
//! lap, and peels off into its lane from the cell just before its entry cell.
//!
//! Everything here is pure arithmetic over the board dimensions.

mod topology;

pub use topology::{Board, HOME_CODE};
