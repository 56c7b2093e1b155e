//! The 64-character board notation used for history and persistence.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Piece, Square};

/// Errors raised when parsing a board snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The string does not contain exactly 64 characters.
    #[error("board snapshot must be 64 characters, found {0}")]
    WrongLength(usize),
    /// The string contains a non-ASCII character.
    #[error("board snapshot must be ASCII")]
    NotAscii,
}

/// A full board position serialized as 64 characters.
///
/// Cells are listed rank by rank starting from White's side, so the cell
/// for a square sits at index `y * 8 + x`. Piece letters use the reverse
/// of FEN case: lowercase for White, uppercase for Black. A `.` marks an
/// empty cell; any other character also decodes to an empty cell but is
/// preserved verbatim when the snapshot is printed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    cells: [u8; 64],
}

impl Snapshot {
    /// The standard chess starting position.
    pub const STARTING: &'static str =
        "rnbqkbnrpppppppp................................PPPPPPPPRNBQKBNR";

    /// Parses a 64-character board snapshot.
    pub fn parse(s: &str) -> Result<Self, SnapshotError> {
        if !s.is_ascii() {
            return Err(SnapshotError::NotAscii);
        }
        let bytes = s.as_bytes();
        if bytes.len() != 64 {
            return Err(SnapshotError::WrongLength(bytes.len()));
        }
        let mut cells = [0u8; 64];
        cells.copy_from_slice(bytes);
        Ok(Snapshot { cells })
    }

    /// Returns the raw character stored for a square.
    #[inline]
    pub fn char_at(&self, square: Square) -> char {
        self.cells[square.board_index()] as char
    }

    /// Decodes the piece standing on a square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        Piece::from_code(self.char_at(square))
    }

    /// Finds the first square holding the given piece code.
    pub fn find(&self, code: char) -> Option<Square> {
        self.cells
            .iter()
            .position(|&cell| cell as char == code)
            .and_then(Square::from_board_index)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cell in &self.cells {
            write!(f, "{}", cell as char)?;
        }
        Ok(())
    }
}

impl FromStr for Snapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snapshot::parse(s)
    }
}
