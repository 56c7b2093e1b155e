//! Move and capture generation.
//!
//! Generation is split the way the rest of the engine consumes it:
//! [`Board::moves`] lists quiet destinations, [`Board::captures`] lists
//! capture destinations (including en passant), and [`Board::attackers`]
//! answers the reverse question for check and castling tests. None of
//! these filter out moves that would expose the mover's own king; that
//! layer lives in [`Game`](crate::Game).

use gambit_core::{Color, Offset, Piece, PieceKind, Square};

use crate::Board;

const ROOK_DIRECTIONS: [Offset; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const BISHOP_DIRECTIONS: [Offset; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const QUEEN_DIRECTIONS: [Offset; 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

const KNIGHT_JUMPS: [Offset; 8] = [
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
];

const CASTLE_OFFSETS: [Offset; 2] = [(2, 0), (-2, 0)];

impl Board {
    /// Lists the empty squares the piece on `square` may move to.
    ///
    /// Castling destinations are included for an eligible king. An empty
    /// square yields an empty list.
    pub fn moves(&self, square: Square) -> Vec<Square> {
        let piece = match self.piece_at(square) {
            Some(piece) => piece,
            None => return Vec::new(),
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(square, piece.color),
            PieceKind::Knight => self.step_moves(square, &KNIGHT_JUMPS),
            PieceKind::Bishop => self.ray_moves(square, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.ray_moves(square, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.ray_moves(square, &QUEEN_DIRECTIONS),
            PieceKind::King => self.king_moves(square),
        }
    }

    /// Lists the squares the piece on `square` may capture on.
    ///
    /// For pawns this includes en passant destinations, which are empty
    /// squares; every other entry holds an enemy piece.
    pub fn captures(&self, square: Square) -> Vec<Square> {
        let piece = match self.piece_at(square) {
            Some(piece) => piece,
            None => return Vec::new(),
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_captures(square, piece.color),
            PieceKind::Knight => self.step_captures(square, &KNIGHT_JUMPS, piece.color),
            PieceKind::Bishop => self.ray_captures(square, &BISHOP_DIRECTIONS, piece.color),
            PieceKind::Rook => self.ray_captures(square, &ROOK_DIRECTIONS, piece.color),
            PieceKind::Queen => self.ray_captures(square, &QUEEN_DIRECTIONS, piece.color),
            PieceKind::King => self.step_captures(square, &QUEEN_DIRECTIONS, piece.color),
        }
    }

    /// Lists every square from which `by_side` attacks `square`.
    ///
    /// En passant is not an attack on a square and is deliberately left
    /// out; this query backs check detection and castling transit tests.
    pub fn attackers(&self, square: Square, by_side: Color) -> Vec<Square> {
        let mut attackers = Vec::new();
        // Pawns attack along their own forward diagonals, so walk
        // backward from the target to find them.
        for dx in [-1i8, 1] {
            if let Ok(origin) = square.offset((dx, -by_side.forward())) {
                if self.piece_at(origin) == Some(Piece::new(PieceKind::Pawn, by_side)) {
                    attackers.push(origin);
                }
            }
        }
        for &jump in &KNIGHT_JUMPS {
            if let Ok(origin) = square.offset(jump) {
                if self.piece_at(origin) == Some(Piece::new(PieceKind::Knight, by_side)) {
                    attackers.push(origin);
                }
            }
        }
        for &step in &QUEEN_DIRECTIONS {
            if let Ok(origin) = square.offset(step) {
                if self.piece_at(origin) == Some(Piece::new(PieceKind::King, by_side)) {
                    attackers.push(origin);
                }
            }
        }
        for &direction in &ROOK_DIRECTIONS {
            if let Some((origin, piece)) = self.first_piece_along(square, direction) {
                if piece.color == by_side
                    && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen)
                {
                    attackers.push(origin);
                }
            }
        }
        for &direction in &BISHOP_DIRECTIONS {
            if let Some((origin, piece)) = self.first_piece_along(square, direction) {
                if piece.color == by_side
                    && matches!(piece.kind, PieceKind::Bishop | PieceKind::Queen)
                {
                    attackers.push(origin);
                }
            }
        }
        attackers
    }

    /// Returns true if moving the pawn on `square` by `delta` is a legal
    /// en passant capture right now.
    pub fn is_en_passant_move(&self, square: Square, delta: Offset) -> bool {
        self.en_passant_victim(square, delta).is_some()
    }

    /// Returns true if moving the king on `square` by `delta` satisfies
    /// the castling conditions.
    ///
    /// The king must be unmoved and unattacked, every square between it
    /// and the rook must be empty and unattacked, and the first occupied
    /// square in the travel direction must hold an unmoved rook of the
    /// king's color.
    pub fn is_castle_move(&self, square: Square, delta: Offset) -> bool {
        let king = match self.piece_at(square) {
            Some(piece) if piece.kind == PieceKind::King => piece,
            _ => return false,
        };
        let (dx, dy) = delta;
        if dy != 0 || (dx != 2 && dx != -2) {
            return false;
        }
        if self.has_been_moved(square) {
            return false;
        }
        let opponent = king.color.opposite();
        if !self.attackers(square, opponent).is_empty() {
            return false;
        }
        let step = (dx.signum(), 0);
        let mut cursor = square;
        loop {
            cursor = match cursor.offset(step) {
                Ok(next) => next,
                Err(_) => return false,
            };
            match self.piece_at(cursor) {
                None => {
                    if !self.attackers(cursor, opponent).is_empty() {
                        return false;
                    }
                }
                Some(piece) => {
                    return piece.kind == PieceKind::Rook
                        && piece.color == king.color
                        && !self.has_been_moved(cursor);
                }
            }
        }
    }

    /// Finds the king of the given side.
    ///
    /// The lookup reads the latest history snapshot, which always matches
    /// the grid between commands.
    pub fn king_square(&self, side: Color) -> Option<Square> {
        let code = Piece::new(PieceKind::King, side).code();
        self.history()
            .last()
            .and_then(|entry| entry.snapshot.find(code))
    }

    /// Returns true if the given side's king is under attack. A board
    /// without that king is never in check.
    pub fn is_in_check(&self, side: Color) -> bool {
        match self.king_square(side) {
            Some(king) => !self.attackers(king, side.opposite()).is_empty(),
            None => false,
        }
    }

    /// Locates the pawn removed by an en passant capture, if the capture
    /// qualifies: the moving pawn steps behind an enemy pawn that arrived
    /// beside it with a double step on the previous ply.
    pub(crate) fn en_passant_victim(&self, square: Square, delta: Offset) -> Option<Square> {
        let pawn = match self.piece_at(square) {
            Some(piece) if piece.kind == PieceKind::Pawn => piece,
            _ => return None,
        };
        let (dx, dy) = delta;
        if dy != pawn.color.forward() || (dx != 1 && dx != -1) {
            return None;
        }
        let destination = square.offset(delta).ok()?;
        if self.piece_at(destination).is_some() {
            return None;
        }
        let beside = square.offset((dx, 0)).ok()?;
        let passed = match self.piece_at(beside) {
            Some(piece) if piece.kind == PieceKind::Pawn && piece.color != pawn.color => piece,
            _ => return None,
        };
        let history = self.history();
        if history.len() < 2 {
            return None;
        }
        let previous = &history[history.len() - 2].snapshot;
        let origin = square.offset((dx, 2 * pawn.color.forward())).ok()?;
        if previous.piece_at(beside).is_some() {
            return None;
        }
        if previous.piece_at(origin) != Some(passed) {
            return None;
        }
        Some(beside)
    }

    /// Returns the rook relocation for an approved castle: the first
    /// occupied square in the travel direction, and the square directly
    /// past the king where the rook lands.
    pub(crate) fn castle_rook_route(
        &self,
        king: Square,
        delta: Offset,
    ) -> Option<(Square, Square)> {
        let step = (delta.0.signum(), 0);
        let rook_to = king.offset(step).ok()?;
        let mut cursor = rook_to;
        loop {
            if self.piece_at(cursor).is_some() {
                return Some((cursor, rook_to));
            }
            cursor = cursor.offset(step).ok()?;
        }
    }

    fn pawn_moves(&self, square: Square, color: Color) -> Vec<Square> {
        let single = match square.offset((0, color.forward())) {
            Ok(next) if self.piece_at(next).is_none() => next,
            _ => return Vec::new(),
        };
        let mut moves = vec![single];
        if !self.has_been_moved(square) {
            if let Ok(double) = square.offset((0, 2 * color.forward())) {
                if self.piece_at(double).is_none() {
                    moves.push(double);
                }
            }
        }
        moves
    }

    fn king_moves(&self, square: Square) -> Vec<Square> {
        let mut moves = self.step_moves(square, &QUEEN_DIRECTIONS);
        for delta in CASTLE_OFFSETS {
            if self.is_castle_move(square, delta) {
                if let Ok(destination) = square.offset(delta) {
                    moves.push(destination);
                }
            }
        }
        moves
    }

    fn step_moves(&self, square: Square, steps: &[Offset]) -> Vec<Square> {
        steps
            .iter()
            .filter_map(|&step| square.offset(step).ok())
            .filter(|&next| self.piece_at(next).is_none())
            .collect()
    }

    fn ray_moves(&self, square: Square, directions: &[Offset]) -> Vec<Square> {
        let mut moves = Vec::new();
        for &direction in directions {
            let mut cursor = square;
            while let Ok(next) = cursor.offset(direction) {
                if self.piece_at(next).is_some() {
                    break;
                }
                moves.push(next);
                cursor = next;
            }
        }
        moves
    }

    fn pawn_captures(&self, square: Square, color: Color) -> Vec<Square> {
        let mut captures = Vec::new();
        for dx in [-1i8, 1] {
            let delta = (dx, color.forward());
            if let Ok(destination) = square.offset(delta) {
                let takes = match self.piece_at(destination) {
                    Some(target) => target.color != color,
                    None => self.is_en_passant_move(square, delta),
                };
                if takes {
                    captures.push(destination);
                }
            }
        }
        captures
    }

    fn step_captures(&self, square: Square, steps: &[Offset], color: Color) -> Vec<Square> {
        steps
            .iter()
            .filter_map(|&step| square.offset(step).ok())
            .filter(|&next| matches!(self.piece_at(next), Some(target) if target.color != color))
            .collect()
    }

    fn ray_captures(&self, square: Square, directions: &[Offset], color: Color) -> Vec<Square> {
        let mut captures = Vec::new();
        for &direction in directions {
            if let Some((found, target)) = self.first_piece_along(square, direction) {
                if target.color != color {
                    captures.push(found);
                }
            }
        }
        captures
    }

    fn first_piece_along(&self, square: Square, direction: Offset) -> Option<(Square, Piece)> {
        let mut cursor = square;
        while let Ok(next) = cursor.offset(direction) {
            if let Some(piece) = self.piece_at(next) {
                return Some((next, piece));
            }
            cursor = next;
        }
        None
    }
}
