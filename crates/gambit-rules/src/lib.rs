//! Board state, move generation, and game flow for the gambit engine.
//!
//! This crate provides:
//! - [`Board`] - the piece grid with full snapshot history, undo/redo,
//!   and speculative move application
//! - Move and capture generation, including castling and en passant
//! - [`Game`] - turn order, king-safety filtering, and checkmate or
//!   stalemate detection
//!
//! # Architecture
//!
//! Every committed ply stores the whole position as a 64-character
//! snapshot. Undo, redo, castling rights, and en passant detection are
//! all answered by reading that history back instead of tracking
//! per-piece flags.
//!
//! # Example
//!
//! ```
//! use gambit_core::Square;
//! use gambit_rules::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! let from = Square::from_algebraic("e2").unwrap();
//! let to = Square::from_algebraic("e4").unwrap();
//! game.move_piece(from, to).unwrap();
//! assert_eq!(game.status(), GameStatus::Turn);
//! assert_eq!(game.board().ply_count(), 1);
//! ```

mod board;
mod game;
mod movegen;

pub use board::{Board, BoardError, HistoryEntry};
pub use game::{Game, GameError, GameStatus};
