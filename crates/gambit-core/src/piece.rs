//! Chess piece representation.

use std::fmt;

use crate::Color;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the lowercase letter used for this kind in board snapshots.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece of a concrete color standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// Creates a piece of the given kind and color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Returns the snapshot character for this piece.
    ///
    /// Snapshot case is the reverse of FEN: lowercase letters are White
    /// pieces and uppercase letters are Black pieces.
    pub const fn code(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_uppercase(),
        }
    }

    /// Parses a snapshot character into a piece.
    ///
    /// Any character outside the twelve piece codes decodes to `None`.
    pub const fn from_code(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_codes_are_lowercase() {
        assert_eq!(Piece::new(PieceKind::Pawn, Color::White).code(), 'p');
        assert_eq!(Piece::new(PieceKind::King, Color::White).code(), 'k');
        assert_eq!(Piece::new(PieceKind::Pawn, Color::Black).code(), 'P');
        assert_eq!(Piece::new(PieceKind::Queen, Color::Black).code(), 'Q');
    }

    #[test]
    fn from_code_inverts_code() {
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(kind, color);
                assert_eq!(Piece::from_code(piece.code()), Some(piece));
            }
        }
    }

    #[test]
    fn from_code_rejects_unknown_characters() {
        assert_eq!(Piece::from_code('.'), None);
        assert_eq!(Piece::from_code('x'), None);
        assert_eq!(Piece::from_code(' '), None);
    }

    #[test]
    fn display() {
        assert_eq!(
            format!("{}", Piece::new(PieceKind::Knight, Color::White)),
            "White Knight"
        );
        assert_eq!(
            format!("{}", Piece::new(PieceKind::Rook, Color::Black)),
            "Black Rook"
        );
    }
}
