//! Parsing of the line commands understood by the terminal front end.

use crate::error::{ChessError, ChessResult};
use crate::game::Adjustment;
use crate::piece::Piece;
use crate::types::{Color, PieceType, Position};

pub const HELP: &str = "\
To select a piece, type: \"select e 2\" (or \"select e2\")
To move the currently selected piece, type: \"move e 4\"
To edit the board, type: \"adjust put white knight c 3\", \"adjust remove c 3\" or \"adjust points black 5\"
To castle, type: \"castle\"
To redraw the board, type: \"show\"; to list the moves so far, type: \"history\"
To exit the game, type: \"exit\"   WARNING: GAME DOES NOT SAVE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Position),
    Move(Position),
    Adjust(Adjustment),
    Castle,
    Show,
    History,
    Help,
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> ChessResult<Command> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((keyword, args)) = tokens.split_first() else {
            return Err(ChessError::MalformedCommand("empty command".to_string()));
        };

        match keyword.to_lowercase().as_str() {
            "select" => Ok(Command::Select(parse_square(args)?)),
            "move" => Ok(Command::Move(parse_square(args)?)),
            "adjust" => Ok(Command::Adjust(parse_adjustment(args)?)),
            "castle" => no_args(args, Command::Castle),
            "show" => no_args(args, Command::Show),
            "history" => no_args(args, Command::History),
            "help" => no_args(args, Command::Help),
            "exit" | "quit" => no_args(args, Command::Exit),
            other => Err(ChessError::UnknownCommand(other.to_string())),
        }
    }
}

fn no_args(args: &[&str], command: Command) -> ChessResult<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ChessError::MalformedCommand(format!(
            "`{}` takes no arguments",
            format!("{command:?}").to_lowercase()
        )))
    }
}

/// Either `e2` or the file and rank as two tokens, `e 2`
fn parse_square(args: &[&str]) -> ChessResult<Position> {
    match args {
        [square] => Position::from_algebraic(square),
        [file, rank] => Position::from_algebraic(&format!("{file}{rank}")),
        _ => Err(ChessError::MalformedCommand(
            "expected a square like `e 2`".to_string(),
        )),
    }
}

fn parse_color(token: &str) -> ChessResult<Color> {
    Color::from_human(token)
        .ok_or_else(|| ChessError::MalformedCommand(format!("unknown color `{token}`")))
}

fn parse_adjustment(args: &[&str]) -> ChessResult<Adjustment> {
    match args {
        ["put", color, kind, square @ ..] => {
            let color = parse_color(color)?;
            let piece_type = PieceType::from_human(kind).ok_or_else(|| {
                ChessError::MalformedCommand(format!("unknown piece `{kind}`"))
            })?;
            Ok(Adjustment::Put {
                piece: Piece::new(piece_type, color),
                pos: parse_square(square)?,
            })
        }
        ["remove", square @ ..] => Ok(Adjustment::Remove {
            pos: parse_square(square)?,
        }),
        ["points", color, value] => {
            let color = parse_color(color)?;
            let value = value.parse::<u32>().map_err(|_| {
                ChessError::MalformedCommand(format!("points must be a number, got `{value}`"))
            })?;
            Ok(Adjustment::Points { color, value })
        }
        _ => Err(ChessError::MalformedCommand(
            "expected `adjust put|remove|points ...`".to_string(),
        )),
    }
}
