//! Player color representation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error raised when a side letter is neither `w` nor `b`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid color code '{0}', expected 'w' or 'b'")]
pub struct InvalidColor(pub char);

/// Represents the two players in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the pawn direction for this color (+1 for White, -1 for Black).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Parses a side letter (`'w'` or `'b'`).
    pub const fn from_char(c: char) -> Result<Self, InvalidColor> {
        match c {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            other => Err(InvalidColor(other)),
        }
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            other => Err(InvalidColor(other.chars().next().unwrap_or('?'))),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn forward_direction() {
        assert_eq!(Color::White.forward(), 1);
        assert_eq!(Color::Black.forward(), -1);
    }

    #[test]
    fn from_char_accepts_side_letters() {
        assert_eq!(Color::from_char('w'), Ok(Color::White));
        assert_eq!(Color::from_char('b'), Ok(Color::Black));
        assert_eq!(Color::from_char('x'), Err(InvalidColor('x')));
    }

    #[test]
    fn from_str_accepts_names_and_letters() {
        assert_eq!("w".parse(), Ok(Color::White));
        assert_eq!("black".parse(), Ok(Color::Black));
        assert!("grey".parse::<Color>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Color::White), "White");
        assert_eq!(format!("{}", Color::Black), "Black");
    }
}
