//! Authoritative board state with snapshot history.
//!
//! The [`Board`] struct owns the piece grid and records every committed
//! ply as a full 64-character [`Snapshot`]. History is the source of
//! truth for undo/redo, for the has-this-piece-moved checks behind
//! castling and pawn double steps, and for en passant detection.

use std::fmt;
use std::ops::Index;

use gambit_core::{Piece, PieceKind, Snapshot, SnapshotError, Square};

/// Error type for board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The starting configuration string could not be parsed.
    InvalidConfig(SnapshotError),
    /// The source square does not hold a piece.
    EmptySource(Square),
    /// A quiet move targets an occupied square.
    OccupiedDestination(Square),
    /// The capture target is empty (and not en passant) or friendly.
    InvalidCapture(Square),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidConfig(e) => write!(f, "invalid board configuration: {}", e),
            BoardError::EmptySource(square) => write!(f, "no piece on {}", square),
            BoardError::OccupiedDestination(square) => {
                write!(f, "destination {} is occupied", square)
            }
            BoardError::InvalidCapture(square) => write!(f, "nothing to capture on {}", square),
        }
    }
}

impl std::error::Error for BoardError {}

impl From<SnapshotError> for BoardError {
    fn from(e: SnapshotError) -> Self {
        BoardError::InvalidConfig(e)
    }
}

/// One committed ply in the game record.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The position after the ply was applied.
    pub snapshot: Snapshot,
    /// Source square, `None` only for the initial entry.
    pub from: Option<Square>,
    /// Destination square, `None` only for the initial entry.
    pub to: Option<Square>,
}

/// The chess board: an 8x8 piece grid plus the full position history.
#[derive(Debug, Clone)]
pub struct Board {
    /// Piece grid indexed `[x][y]`, file first.
    grid: [[Option<Piece>; 8]; 8],
    /// Square a front end currently has highlighted, if any.
    pub selected_square: Option<Square>,
    /// Committed plies, oldest first. Never empty: the first entry holds
    /// the starting configuration with no move pair.
    history: Vec<HistoryEntry>,
    /// Plies taken back and available for replay.
    redo_history: Vec<HistoryEntry>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with the standard starting position.
    pub fn new() -> Self {
        Board::from_config(Snapshot::STARTING).expect("the starting position is a valid snapshot")
    }

    /// Creates a board from a 64-character configuration string.
    pub fn from_config(config: &str) -> Result<Self, BoardError> {
        let snapshot = Snapshot::parse(config)?;
        let mut board = Board {
            grid: [[None; 8]; 8],
            selected_square: None,
            history: vec![HistoryEntry {
                snapshot,
                from: None,
                to: None,
            }],
            redo_history: Vec::new(),
        };
        board.load_snapshot(snapshot);
        Ok(board)
    }

    /// Returns the piece standing on a square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.x() as usize][square.y() as usize]
    }

    /// Returns the committed plies, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the number of plies played since the starting configuration.
    pub fn ply_count(&self) -> usize {
        self.history.len() - 1
    }

    /// Returns true if at least one ply can be taken back.
    pub fn can_undo(&self) -> bool {
        self.history.len() > 1
    }

    /// Returns true if at least one ply can be replayed.
    pub fn can_redo(&self) -> bool {
        !self.redo_history.is_empty()
    }

    /// Serializes the current grid as a snapshot.
    pub fn snapshot(&self) -> Snapshot {
        let mut cells = String::with_capacity(64);
        for square in Square::all() {
            cells.push(match self.piece_at(square) {
                Some(piece) => piece.code(),
                None => '.',
            });
        }
        Snapshot::parse(&cells).expect("a serialized grid is 64 ASCII characters")
    }

    /// Returns true if the content of a square has ever differed from the
    /// starting configuration.
    ///
    /// This is a history scan, not a per-piece flag: a rook that left its
    /// corner and returned still counts as moved, which is exactly what
    /// castling and pawn double-step checks need.
    pub fn has_been_moved(&self, square: Square) -> bool {
        let initial = self.history[0].snapshot.char_at(square);
        self.history[1..]
            .iter()
            .any(|entry| entry.snapshot.char_at(square) != initial)
    }

    /// Moves a piece to an empty square and records the ply.
    ///
    /// The move is not checked against the movement rules; callers that
    /// need legality go through [`Game`](crate::Game). A king moving two
    /// files through its castling conditions drags the rook along.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        self.apply_move(from, to, true)
    }

    /// Captures the piece on `to` (or the passed pawn for en passant) and
    /// records the ply.
    pub fn capture_piece(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        self.apply_capture(from, to, true)
    }

    /// Takes back the most recent ply. Returns false if only the starting
    /// configuration remains.
    pub fn undo(&mut self) -> bool {
        self.rewind(true)
    }

    /// Replays the most recently undone ply. Returns false if there is
    /// nothing to replay.
    pub fn redo(&mut self) -> bool {
        let entry = match self.redo_history.pop() {
            Some(entry) => entry,
            None => return false,
        };
        self.load_snapshot(entry.snapshot);
        self.history.push(entry);
        true
    }

    /// Applies a quiet move, hands the resulting position to `probe`, then
    /// rolls the move back. The redo stack is left untouched.
    pub fn simulate_move<T>(
        &mut self,
        from: Square,
        to: Square,
        probe: impl FnOnce(&Board) -> T,
    ) -> Result<T, BoardError> {
        self.apply_move(from, to, false)?;
        let outcome = probe(self);
        self.rewind(false);
        Ok(outcome)
    }

    /// Applies a capture, hands the resulting position to `probe`, then
    /// rolls the capture back. The redo stack is left untouched.
    pub fn simulate_capture<T>(
        &mut self,
        from: Square,
        to: Square,
        probe: impl FnOnce(&Board) -> T,
    ) -> Result<T, BoardError> {
        self.apply_capture(from, to, false)?;
        let outcome = probe(self);
        self.rewind(false);
        Ok(outcome)
    }

    fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[square.x() as usize][square.y() as usize] = piece;
    }

    fn load_snapshot(&mut self, snapshot: Snapshot) {
        for square in Square::all() {
            self.set(square, snapshot.piece_at(square));
        }
    }

    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        record_for_redo: bool,
    ) -> Result<(), BoardError> {
        let piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => return Err(BoardError::EmptySource(from)),
        };
        if self.piece_at(to).is_some() {
            return Err(BoardError::OccupiedDestination(to));
        }
        let rook_route = if piece.kind == PieceKind::King && self.is_castle_move(from, to - from) {
            self.castle_rook_route(from, to - from)
        } else {
            None
        };
        if let Some((rook_from, rook_to)) = rook_route {
            let rook = self.piece_at(rook_from);
            self.set(rook_from, None);
            self.set(rook_to, rook);
        }
        self.set(to, Some(piece));
        self.set(from, None);
        self.commit(from, to, record_for_redo);
        Ok(())
    }

    fn apply_capture(
        &mut self,
        from: Square,
        to: Square,
        record_for_redo: bool,
    ) -> Result<(), BoardError> {
        let piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => return Err(BoardError::EmptySource(from)),
        };
        match self.piece_at(to) {
            Some(target) => {
                if target.color == piece.color {
                    return Err(BoardError::InvalidCapture(to));
                }
                self.set(to, None);
            }
            None => {
                let victim = match self.en_passant_victim(from, to - from) {
                    Some(square) => square,
                    None => return Err(BoardError::InvalidCapture(to)),
                };
                self.set(victim, None);
            }
        }
        // The destination is clear and the source untouched, so the final
        // relocation cannot fail and the capture commits as one ply.
        self.apply_move(from, to, record_for_redo)
    }

    fn commit(&mut self, from: Square, to: Square, record_for_redo: bool) {
        self.history.push(HistoryEntry {
            snapshot: self.snapshot(),
            from: Some(from),
            to: Some(to),
        });
        if record_for_redo {
            self.redo_history.clear();
        }
    }

    fn rewind(&mut self, redoable: bool) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        let entry = match self.history.pop() {
            Some(entry) => entry,
            None => return false,
        };
        let previous = match self.history.last() {
            Some(previous) => previous.snapshot,
            None => return false,
        };
        self.load_snapshot(previous);
        if redoable {
            self.redo_history.push(entry);
        }
        true
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Option<Piece> {
        &self.grid[square.x() as usize][square.y() as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use gambit_core::{Color, PieceKind};

    use super::*;

    fn square(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn starting_position_layout() {
        let board = Board::new();
        assert_eq!(
            board.piece_at(square("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(square("d1")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(
            board.piece_at(square("e8")),
            Some(Piece::new(PieceKind::King, Color::Black))
        );
        assert_eq!(
            board[square("a2")],
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(board.piece_at(square("e4")), None);
        assert_eq!(board.to_string(), Snapshot::STARTING);
    }

    #[test]
    fn from_config_rejects_bad_strings() {
        assert!(matches!(
            Board::from_config("rnbqk"),
            Err(BoardError::InvalidConfig(SnapshotError::WrongLength(5)))
        ));
        let fancy = "♜".repeat(64);
        assert!(matches!(
            Board::from_config(&fancy),
            Err(BoardError::InvalidConfig(SnapshotError::NotAscii))
        ));
    }

    #[test]
    fn move_piece_relocates_and_records() {
        let mut board = Board::new();
        board.move_piece(square("e2"), square("e4")).unwrap();
        assert_eq!(board.piece_at(square("e2")), None);
        assert_eq!(
            board.piece_at(square("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(board.ply_count(), 1);
        let last = board.history().last().unwrap();
        assert_eq!(last.from, Some(square("e2")));
        assert_eq!(last.to, Some(square("e4")));
    }

    #[test]
    fn move_piece_rejects_empty_source_and_occupied_destination() {
        let mut board = Board::new();
        assert_eq!(
            board.move_piece(square("e4"), square("e5")),
            Err(BoardError::EmptySource(square("e4")))
        );
        assert_eq!(
            board.move_piece(square("a1"), square("a2")),
            Err(BoardError::OccupiedDestination(square("a2")))
        );
        assert_eq!(board.ply_count(), 0);
    }

    #[test]
    fn capture_removes_the_target() {
        let mut config = String::from(Snapshot::STARTING);
        // White pawn on e4, Black pawn on d5.
        config.replace_range(28..29, "p");
        config.replace_range(12..13, ".");
        config.replace_range(35..36, "P");
        config.replace_range(51..52, ".");
        let mut board = Board::from_config(&config).unwrap();
        board.capture_piece(square("e4"), square("d5")).unwrap();
        assert_eq!(
            board.piece_at(square("d5")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(board.piece_at(square("e4")), None);
        assert_eq!(board.ply_count(), 1);
    }

    #[test]
    fn capture_rejects_friendly_and_empty_targets() {
        let mut board = Board::new();
        assert_eq!(
            board.capture_piece(square("d1"), square("d2")),
            Err(BoardError::InvalidCapture(square("d2")))
        );
        assert_eq!(
            board.capture_piece(square("b1"), square("c3")),
            Err(BoardError::InvalidCapture(square("c3")))
        );
        assert_eq!(board.ply_count(), 0);
    }

    #[test]
    fn undo_and_redo_round_trip() {
        let mut board = Board::new();
        assert!(!board.undo());
        assert!(!board.redo());
        board.move_piece(square("e2"), square("e4")).unwrap();
        assert!(board.undo());
        assert_eq!(board.to_string(), Snapshot::STARTING);
        assert_eq!(board.ply_count(), 0);
        assert!(board.redo());
        assert_eq!(
            board.piece_at(square("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(board.ply_count(), 1);
    }

    #[test]
    fn a_fresh_move_clears_the_redo_stack() {
        let mut board = Board::new();
        board.move_piece(square("e2"), square("e4")).unwrap();
        board.undo();
        assert!(board.can_redo());
        board.move_piece(square("d2"), square("d4")).unwrap();
        assert!(!board.can_redo());
        assert!(!board.redo());
    }

    #[test]
    fn has_been_moved_tracks_history_not_position() {
        let mut board = Board::new();
        assert!(!board.has_been_moved(square("e2")));
        board.move_piece(square("e2"), square("e4")).unwrap();
        assert!(board.has_been_moved(square("e2")));
        assert!(board.has_been_moved(square("e4")));
        assert!(!board.has_been_moved(square("d2")));
        board.undo();
        assert!(!board.has_been_moved(square("e2")));
    }

    #[test]
    fn a_piece_that_returns_home_still_counts_as_moved() {
        let config = format!("r...k..r{}....K...", ".".repeat(48));
        let mut board = Board::from_config(&config).unwrap();
        board.move_piece(square("h1"), square("h5")).unwrap();
        board.move_piece(square("h5"), square("h1")).unwrap();
        assert!(board.has_been_moved(square("h1")));
    }

    #[test]
    fn simulate_move_probes_and_restores() {
        let mut board = Board::new();
        let seen = board
            .simulate_move(square("e2"), square("e4"), |probed| {
                probed.piece_at(square("e4"))
            })
            .unwrap();
        assert_eq!(seen, Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(board.piece_at(square("e4")), None);
        assert_eq!(board.ply_count(), 0);
        assert_eq!(board.to_string(), Snapshot::STARTING);
    }

    #[test]
    fn simulate_leaves_the_redo_stack_alone() {
        let mut board = Board::new();
        board.move_piece(square("e2"), square("e4")).unwrap();
        board.undo();
        assert!(board.can_redo());
        board
            .simulate_move(square("d2"), square("d3"), |_| ())
            .unwrap();
        assert!(board.can_redo());
        assert!(board.redo());
        assert_eq!(
            board.piece_at(square("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn castling_drags_the_rook_and_undoes_atomically() {
        let config = format!("r...k..r{}....K...", ".".repeat(48));
        let mut board = Board::from_config(&config).unwrap();
        board.move_piece(square("e1"), square("g1")).unwrap();
        assert_eq!(
            board.piece_at(square("g1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(square("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(board.piece_at(square("e1")), None);
        assert_eq!(board.piece_at(square("h1")), None);
        assert!(board.undo());
        assert_eq!(board.to_string(), config);
    }

    #[test]
    fn queenside_castling_places_the_rook_beside_the_king() {
        let config = format!("r...k..r{}....K...", ".".repeat(48));
        let mut board = Board::from_config(&config).unwrap();
        board.move_piece(square("e1"), square("c1")).unwrap();
        assert_eq!(
            board.piece_at(square("c1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(square("d1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(board.piece_at(square("a1")), None);
    }
}
