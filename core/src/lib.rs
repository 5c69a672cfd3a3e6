#![no_std]

//! Minesweeper board engine: mine placement, neighbor counts, reveal with flood fill, flags and win/loss tracking.
//!
//! ```
//! use sapper_core::*;
//!
//! let mut board = Board::initialize_with_seed(Difficulty::Easy, 7);
//! while board.continue_playing() {
//!     let (coords, _) = board
//!         .iter_cells()
//!         .find(|(_, cell)| !cell.revealed && !cell.is_mine)
//!         .unwrap();
//!     board.reveal(coords).unwrap();
//! }
//! assert!(board.is_won());
//! ```

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod difficulty;
mod error;
mod generator;
mod types;
