//! Core types for the gambit chess engine.
//!
//! This crate provides the fundamental types shared across the engine:
//! - [`Piece`], [`PieceKind`], and [`Color`] for piece representation
//! - [`Square`] and [`Offset`] for board coordinates and displacements
//! - [`Snapshot`] for the 64-character board notation

mod color;
mod piece;
mod snapshot;
mod square;

pub use color::{Color, InvalidColor};
pub use piece::{Piece, PieceKind};
pub use snapshot::{Snapshot, SnapshotError};
pub use square::{Offset, Square, SquareError};
