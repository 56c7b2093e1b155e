//! Board square representation.

use std::fmt;
use std::ops::Sub;

use thiserror::Error;

/// A file/rank displacement between squares.
pub type Offset = (i8, i8);

/// Errors raised when constructing or parsing squares.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// The coordinates fall outside the 8x8 board.
    #[error("square ({x}, {y}) is outside the board")]
    OutOfBounds { x: i16, y: i16 },
    /// The algebraic notation could not be parsed.
    #[error("invalid square notation '{0}'")]
    InvalidNotation(String),
}

/// A square on the chess board.
///
/// Coordinates are zero-based: `x` counts files from the a-file and `y`
/// counts ranks from White's first rank, so e4 is `(4, 3)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    /// Creates a square from file and rank coordinates.
    pub const fn new(x: u8, y: u8) -> Result<Self, SquareError> {
        if x < 8 && y < 8 {
            Ok(Square { x, y })
        } else {
            Err(SquareError::OutOfBounds {
                x: x as i16,
                y: y as i16,
            })
        }
    }

    /// Returns true if the coordinates name a square on the board.
    #[inline]
    pub const fn is_valid(x: i16, y: i16) -> bool {
        x >= 0 && x < 8 && y >= 0 && y < 8
    }

    /// Returns the file coordinate (0 is the a-file).
    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the rank coordinate (0 is White's first rank).
    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns the square reached by applying `delta` to this square.
    pub fn offset(self, delta: Offset) -> Result<Self, SquareError> {
        let (dx, dy) = delta;
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        if Square::is_valid(x, y) {
            Ok(Square {
                x: x as u8,
                y: y as u8,
            })
        } else {
            Err(SquareError::OutOfBounds { x, y })
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, SquareError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError::InvalidNotation(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(SquareError::InvalidNotation(s.to_string()));
        }
        Ok(Square {
            x: file - b'a',
            y: rank - b'1',
        })
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.x) as char, self.y + 1)
    }

    /// Returns the position of this square in a board snapshot string.
    #[inline]
    pub const fn board_index(self) -> usize {
        self.y as usize * 8 + self.x as usize
    }

    /// Creates a square from a board snapshot position (0-63).
    #[inline]
    pub const fn from_board_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Square {
                x: (index % 8) as u8,
                y: (index / 8) as u8,
            })
        } else {
            None
        }
    }

    /// Iterates every square in snapshot order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_board_index)
    }

    /// Returns true if this square is dark-colored.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.x + self.y) % 2 == 0
    }
}

impl Sub for Square {
    type Output = Offset;

    /// Returns the offset that moves `rhs` onto `self`.
    fn sub(self, rhs: Square) -> Offset {
        (self.x as i8 - rhs.x as i8, self.y as i8 - rhs.y as i8)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn new_checks_bounds() {
        assert!(Square::new(0, 0).is_ok());
        assert!(Square::new(7, 7).is_ok());
        assert_eq!(
            Square::new(8, 0),
            Err(SquareError::OutOfBounds { x: 8, y: 0 })
        );
        assert_eq!(
            Square::new(3, 9),
            Err(SquareError::OutOfBounds { x: 3, y: 9 })
        );
    }

    #[test]
    fn from_algebraic_parses_squares() {
        assert_eq!(Square::from_algebraic("a1"), Square::new(0, 0));
        assert_eq!(Square::from_algebraic("e4"), Square::new(4, 3));
        assert_eq!(Square::from_algebraic("h8"), Square::new(7, 7));
        assert_eq!(Square::from_algebraic("E4"), Square::new(4, 3));
    }

    #[test]
    fn from_algebraic_rejects_garbage() {
        for bad in ["", "e", "e44", "i1", "a9", "41", "??"] {
            assert_eq!(
                Square::from_algebraic(bad),
                Err(SquareError::InvalidNotation(bad.to_string()))
            );
        }
    }

    #[test]
    fn offset_moves_within_the_board() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.offset((0, 1)), Square::from_algebraic("e5"));
        assert_eq!(e4.offset((-2, -1)), Square::from_algebraic("c3"));
        assert_eq!(e4.offset((0, 0)), Ok(e4));
    }

    #[test]
    fn offset_off_the_board_fails() {
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(
            a1.offset((-1, 0)),
            Err(SquareError::OutOfBounds { x: -1, y: 0 })
        );
        assert_eq!(
            a1.offset((0, 8)),
            Err(SquareError::OutOfBounds { x: 0, y: 8 })
        );
    }

    #[test]
    fn subtraction_yields_the_connecting_offset() {
        let e2 = Square::from_algebraic("e2").unwrap();
        let e4 = Square::from_algebraic("e4").unwrap();
        let d3 = Square::from_algebraic("d3").unwrap();
        assert_eq!(e4 - e2, (0, 2));
        assert_eq!(e2 - e4, (0, -2));
        assert_eq!(d3 - e4, (-1, -1));
    }

    #[test]
    fn board_index_round_trip() {
        assert_eq!(Square::new(0, 0).unwrap().board_index(), 0);
        assert_eq!(Square::new(4, 3).unwrap().board_index(), 28);
        assert_eq!(Square::new(7, 7).unwrap().board_index(), 63);
        assert_eq!(Square::from_board_index(28), Square::new(4, 3).ok());
        assert_eq!(Square::from_board_index(64), None);
    }

    #[test]
    fn all_visits_each_square_once() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_algebraic(), "a1");
        assert_eq!(squares[7].to_algebraic(), "h1");
        assert_eq!(squares[63].to_algebraic(), "h8");
    }

    #[test]
    fn square_shade() {
        assert!(Square::from_algebraic("a1").unwrap().is_dark());
        assert!(!Square::from_algebraic("h1").unwrap().is_dark());
        assert!(!Square::from_algebraic("a8").unwrap().is_dark());
        assert!(Square::from_algebraic("h8").unwrap().is_dark());
    }

    proptest! {
        #[test]
        fn algebraic_round_trip(x in 0u8..8, y in 0u8..8) {
            let square = Square::new(x, y).unwrap();
            prop_assert_eq!(Square::from_algebraic(&square.to_algebraic()), Ok(square));
        }

        #[test]
        fn offset_inverts_subtraction(
            x1 in 0u8..8,
            y1 in 0u8..8,
            x2 in 0u8..8,
            y2 in 0u8..8,
        ) {
            let from = Square::new(x1, y1).unwrap();
            let to = Square::new(x2, y2).unwrap();
            prop_assert_eq!(from.offset(to - from), Ok(to));
        }
    }
}
