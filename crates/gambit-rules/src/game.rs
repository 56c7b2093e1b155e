//! Game flow management layered on [`Board`].
//!
//! [`Game`] owns a board and adds everything the board itself does not
//! know about: whose turn it is, which generated moves are actually safe
//! for the mover's king, and whether the game has ended in checkmate or
//! stalemate. All state changes flow through the command methods here so
//! the status can be re-evaluated after every ply.

use std::fmt;

use gambit_core::{Color, Square};

use crate::{Board, BoardError};

/// Current phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Play continues.
    Turn,
    /// The player to move is in check and has no safe ply. Terminal.
    Checkmated,
    /// The player to move is not in check but has no safe ply. Terminal.
    Stalemate,
}

impl GameStatus {
    /// Returns true once no further plies are accepted.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Turn)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Turn => write!(f, "in progress"),
            GameStatus::Checkmated => write!(f, "checkmate"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Error type for game commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The game has already ended.
    GameOver,
    /// The source square holds a piece of the side not to move.
    WrongTurn(Color),
    /// The destination is not a safe move or capture for the source piece.
    IllegalMove { from: Square, to: Square },
    /// A board-level precondition failed.
    Board(BoardError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::GameOver => write!(f, "the game has already ended"),
            GameError::WrongTurn(color) => write!(f, "it is {}'s turn", color),
            GameError::IllegalMove { from, to } => {
                write!(f, "illegal move from {} to {}", from, to)
            }
            GameError::Board(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GameError {}

impl From<BoardError> for GameError {
    fn from(e: BoardError) -> Self {
        GameError::Board(e)
    }
}

/// A chess game: a board plus turn order and end-of-game detection.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            status: GameStatus::Turn,
        }
    }

    /// Creates a game from a 64-character configuration string and
    /// evaluates its status, so a loaded position can already be over.
    pub fn from_config(config: &str) -> Result<Self, BoardError> {
        let mut game = Game {
            board: Board::from_config(config)?,
            status: GameStatus::Turn,
        };
        game.refresh_status();
        Ok(game)
    }

    /// Returns the underlying board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the side to move. White moves on even ply counts.
    pub fn current_player(&self) -> Color {
        if self.board.ply_count() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Returns the winner once the game has ended in checkmate.
    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Checkmated => Some(self.current_player().opposite()),
            _ => None,
        }
    }

    /// Finds the king of the given side.
    pub fn king_square(&self, side: Color) -> Option<Square> {
        self.board.king_square(side)
    }

    /// Returns true if the given side's king is under attack.
    pub fn is_check(&self, side: Color) -> bool {
        self.board.is_in_check(side)
    }

    /// Lists the moves of the piece on `square` that leave its own king
    /// out of check. The piece may belong to either side.
    pub fn safe_moves(&mut self, square: Square) -> Vec<Square> {
        let mover = match self.board.piece_at(square) {
            Some(piece) => piece.color,
            None => return Vec::new(),
        };
        let mut safe = Vec::new();
        for destination in self.board.moves(square) {
            if let Ok(false) =
                self.board
                    .simulate_move(square, destination, |board| board.is_in_check(mover))
            {
                safe.push(destination);
            }
        }
        safe
    }

    /// Lists the captures of the piece on `square` that leave its own
    /// king out of check.
    pub fn safe_captures(&mut self, square: Square) -> Vec<Square> {
        let mover = match self.board.piece_at(square) {
            Some(piece) => piece.color,
            None => return Vec::new(),
        };
        let mut safe = Vec::new();
        for destination in self.board.captures(square) {
            if let Ok(false) =
                self.board
                    .simulate_capture(square, destination, |board| board.is_in_check(mover))
            {
                safe.push(destination);
            }
        }
        safe
    }

    /// Returns true if the given side has at least one safe move or
    /// capture anywhere on the board.
    pub fn has_possible_move(&mut self, side: Color) -> bool {
        let pieces: Vec<Square> = Square::all()
            .filter(|&square| {
                matches!(self.board.piece_at(square), Some(piece) if piece.color == side)
            })
            .collect();
        pieces.into_iter().any(|square| {
            !self.safe_moves(square).is_empty() || !self.safe_captures(square).is_empty()
        })
    }

    /// Plays a quiet move for the side to move.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<(), GameError> {
        self.ensure_playable(from)?;
        if !self.safe_moves(from).contains(&to) {
            return Err(GameError::IllegalMove { from, to });
        }
        self.board.move_piece(from, to)?;
        self.finish_turn();
        Ok(())
    }

    /// Plays a capture for the side to move.
    pub fn capture_piece(&mut self, from: Square, to: Square) -> Result<(), GameError> {
        self.ensure_playable(from)?;
        if !self.safe_captures(from).contains(&to) {
            return Err(GameError::IllegalMove { from, to });
        }
        self.board.capture_piece(from, to)?;
        self.finish_turn();
        Ok(())
    }

    /// Takes back the most recent ply and re-evaluates the status, which
    /// also reopens a game that had ended.
    pub fn undo(&mut self) -> bool {
        if !self.board.undo() {
            return false;
        }
        self.board.selected_square = None;
        self.refresh_status();
        true
    }

    /// Replays the most recently undone ply and re-evaluates the status.
    pub fn redo(&mut self) -> bool {
        if !self.board.redo() {
            return false;
        }
        self.board.selected_square = None;
        self.refresh_status();
        true
    }

    /// Highlights a square for a front end.
    pub fn select(&mut self, square: Square) {
        self.board.selected_square = Some(square);
    }

    /// Clears the highlighted square.
    pub fn deselect(&mut self) {
        self.board.selected_square = None;
    }

    /// Returns the highlighted square, if any.
    pub fn selected(&self) -> Option<Square> {
        self.board.selected_square
    }

    fn ensure_playable(&self, from: Square) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        match self.board.piece_at(from) {
            None => Err(GameError::Board(BoardError::EmptySource(from))),
            Some(piece) if piece.color != self.current_player() => {
                Err(GameError::WrongTurn(self.current_player()))
            }
            Some(_) => Ok(()),
        }
    }

    fn finish_turn(&mut self) {
        self.board.selected_square = None;
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        let player = self.current_player();
        self.status = if self.has_possible_move(player) {
            GameStatus::Turn
        } else if self.board.is_in_check(player) {
            GameStatus::Checkmated
        } else {
            GameStatus::Stalemate
        };
    }
}
