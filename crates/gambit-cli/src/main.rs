//! Interactive terminal board for the gambit engine.
//!
//! Reads commands from stdin and plays both sides of a game: moves,
//! captures, undo/redo, and move listing. Useful for poking at the rules
//! crate without a graphical front end.

use std::io::{self, BufRead, Write};

use clap::Parser;
use gambit_core::{Color, Square};
use gambit_rules::{Game, GameError, GameStatus};

/// Interactive terminal board for the gambit engine.
#[derive(Parser)]
#[command(name = "gambit-cli")]
#[command(about = "Play chess in the terminal, both sides by hand")]
struct Args {
    /// Starting position as a 64-character board string, a1 first
    /// (lowercase pieces are White, uppercase are Black, '.' is empty)
    #[arg(long)]
    config: Option<String>,

    /// Side whose perspective the board is drawn from ('w' or 'b')
    #[arg(long, default_value = "w")]
    perspective: Color,
}

/// A parsed line of user input.
enum Command {
    Move { from: Square, to: Square },
    Moves(Square),
    Show,
    Undo,
    Redo,
    History,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut game = match &args.config {
        Some(config) => Game::from_config(config)?,
        None => Game::new(),
    };
    tracing::info!("Starting gambit-cli");
    if let Some(config) = &args.config {
        tracing::info!("Loaded position: {}", config);
    }

    let stdin = io::stdin();
    let mut out = io::stdout();
    writeln!(out, "gambit-cli: type 'help' for commands")?;
    render(&game, args.perspective, &mut out)?;
    status_line(&game, &mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match parse_command(line.trim()) {
            Command::Move { from, to } => {
                match play(&mut game, from, to) {
                    Ok(()) => {
                        render(&game, args.perspective, &mut out)?;
                        status_line(&game, &mut out)?;
                    }
                    Err(e) => writeln!(out, "rejected: {}", e)?,
                }
            }
            Command::Moves(square) => {
                let moves = join_squares(&game.safe_moves(square));
                let captures = join_squares(&game.safe_captures(square));
                writeln!(out, "{}: moves [{}] captures [{}]", square, moves, captures)?;
            }
            Command::Show => {
                render(&game, args.perspective, &mut out)?;
                status_line(&game, &mut out)?;
            }
            Command::Undo => {
                if game.undo() {
                    render(&game, args.perspective, &mut out)?;
                    status_line(&game, &mut out)?;
                } else {
                    writeln!(out, "nothing to undo")?;
                }
            }
            Command::Redo => {
                if game.redo() {
                    render(&game, args.perspective, &mut out)?;
                    status_line(&game, &mut out)?;
                } else {
                    writeln!(out, "nothing to redo")?;
                }
            }
            Command::History => {
                for (ply, entry) in game.board().history().iter().enumerate().skip(1) {
                    if let (Some(from), Some(to)) = (entry.from, entry.to) {
                        writeln!(out, "{:>3}. {} {}", ply, from, to)?;
                    }
                }
            }
            Command::Help => print_help(&mut out)?,
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(input) => {
                writeln!(out, "unknown command '{}', type 'help'", input)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

fn parse_command(input: &str) -> Command {
    let mut words = input.split_whitespace();
    let head = match words.next() {
        Some(head) => head,
        None => return Command::Empty,
    };
    match head {
        "quit" | "exit" => Command::Quit,
        "help" => Command::Help,
        "show" | "board" => Command::Show,
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "history" => Command::History,
        "moves" => match words.next().map(Square::from_algebraic) {
            Some(Ok(square)) => Command::Moves(square),
            _ => Command::Unknown(input.to_string()),
        },
        "move" => {
            let rest: Vec<&str> = words.collect();
            match parse_move(&rest.join("")) {
                Some((from, to)) => Command::Move { from, to },
                None => Command::Unknown(input.to_string()),
            }
        }
        _ => match parse_move(input) {
            Some((from, to)) => Command::Move { from, to },
            None => Command::Unknown(input.to_string()),
        },
    }
}

/// Parses a move pair like "e2e4".
fn parse_move(s: &str) -> Option<(Square, Square)> {
    // Square notation is ASCII; checking up front keeps the byte slices
    // below on character boundaries for any input.
    if s.len() != 4 || !s.is_ascii() {
        return None;
    }
    let from = Square::from_algebraic(&s[..2]).ok()?;
    let to = Square::from_algebraic(&s[2..]).ok()?;
    Some((from, to))
}

/// Routes a move pair to the capture or quiet-move command, whichever
/// the destination calls for.
fn play(game: &mut Game, from: Square, to: Square) -> Result<(), GameError> {
    if game.safe_captures(from).contains(&to) {
        game.capture_piece(from, to)
    } else {
        game.move_piece(from, to)
    }
}

fn render<W: Write>(game: &Game, perspective: Color, out: &mut W) -> io::Result<()> {
    let ranks: Vec<u8> = match perspective {
        Color::White => (0..8).rev().collect(),
        Color::Black => (0..8).collect(),
    };
    let files: Vec<u8> = match perspective {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };
    for &y in &ranks {
        write!(out, "{} ", y + 1)?;
        for &x in &files {
            let cell = Square::new(x, y).map_or(' ', |square| {
                match game.board().piece_at(square) {
                    Some(piece) => piece.code(),
                    None if square.is_dark() => '+',
                    None => '.',
                }
            });
            write!(out, " {}", cell)?;
        }
        writeln!(out)?;
    }
    write!(out, "  ")?;
    for &x in &files {
        write!(out, " {}", (b'a' + x) as char)?;
    }
    writeln!(out)
}

fn status_line<W: Write>(game: &Game, out: &mut W) -> io::Result<()> {
    match game.status() {
        GameStatus::Turn => {
            let player = game.current_player();
            if game.is_check(player) {
                writeln!(out, "{} to move, in check", player)
            } else {
                writeln!(out, "{} to move", player)
            }
        }
        GameStatus::Checkmated => match game.winner() {
            Some(winner) => writeln!(out, "checkmate, {} wins", winner),
            None => writeln!(out, "checkmate"),
        },
        GameStatus::Stalemate => writeln!(out, "stalemate"),
    }
}

fn join_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(|square| square.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "commands:")?;
    writeln!(out, "  e2e4 / move e2e4   play a move or capture")?;
    writeln!(out, "  moves e2           list safe moves and captures")?;
    writeln!(out, "  show               draw the board")?;
    writeln!(out, "  undo / redo        step through the game record")?;
    writeln!(out, "  history            list the plies played so far")?;
    writeln!(out, "  quit               leave")?;
    writeln!(
        out,
        "pieces print as snapshot codes: lowercase White, uppercase Black;"
    )?;
    writeln!(out, "empty squares print '.' on light and '+' on dark")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_prefixed_moves() {
        assert!(matches!(parse_command("e2e4"), Command::Move { .. }));
        assert!(matches!(parse_command("move e2e4"), Command::Move { .. }));
        assert!(matches!(parse_command("move e2 e4"), Command::Move { .. }));
        assert!(matches!(parse_command("e2e9"), Command::Unknown(_)));
    }

    #[test]
    fn non_ascii_input_falls_through_to_unknown() {
        assert!(matches!(parse_command("aé4"), Command::Unknown(_)));
        assert!(matches!(parse_command("a€"), Command::Unknown(_)));
        assert!(matches!(parse_command("move aé4"), Command::Unknown(_)));
        assert!(matches!(parse_command("é2é4"), Command::Unknown(_)));
    }

    #[test]
    fn parses_the_query_commands() {
        assert!(matches!(parse_command("moves e2"), Command::Moves(_)));
        assert!(matches!(parse_command("moves"), Command::Unknown(_)));
        assert!(matches!(parse_command("undo"), Command::Undo));
        assert!(matches!(parse_command(""), Command::Empty));
        assert!(matches!(parse_command("  "), Command::Empty));
        assert!(matches!(parse_command("castle"), Command::Unknown(_)));
    }

    #[test]
    fn move_routing_prefers_captures() {
        let mut game = Game::new();
        let e2 = Square::from_algebraic("e2").unwrap();
        let e4 = Square::from_algebraic("e4").unwrap();
        let d7 = Square::from_algebraic("d7").unwrap();
        let d5 = Square::from_algebraic("d5").unwrap();
        play(&mut game, e2, e4).unwrap();
        play(&mut game, d7, d5).unwrap();
        play(&mut game, e4, d5).unwrap();
        assert!(game.board().piece_at(d5).is_some());
        assert!(game.board().piece_at(e4).is_none());
    }

    #[test]
    fn rendering_flips_with_perspective() {
        let game = Game::new();
        let mut white_view = Vec::new();
        render(&game, Color::White, &mut white_view).unwrap();
        let white_view = String::from_utf8(white_view).unwrap();
        assert!(white_view.starts_with("8 "));
        assert!(white_view.contains("R N B Q K B N R"));
        assert!(white_view.contains("6  . + . + . + . +"));
        assert!(white_view.trim_end().ends_with("a b c d e f g h"));

        let mut black_view = Vec::new();
        render(&game, Color::Black, &mut black_view).unwrap();
        let black_view = String::from_utf8(black_view).unwrap();
        assert!(black_view.starts_with("1 "));
        assert!(black_view.trim_end().ends_with("h g f e d c b a"));
    }
}
