//! Error type shared by the board, the game controller and the command parser.

use crate::types::{Color, Position, Rule};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A position outside (1,1)..(8,8) was used where a square is required
    #[error("{0} is not a square on the board")]
    OutOfBounds(Position),

    /// A piece was required at this square but none is there
    #[error("there is no piece at {0}")]
    EmptySquare(Position),

    #[error("there is no currently selected piece")]
    NoSelection,

    /// The legality check needs the mover's king and could not find it
    #[error("no {0} king on the board")]
    KingNotFound(Color),

    /// Target square is not a highlighted move or attack of the selected piece
    #[error("the selected piece cannot move to {0}")]
    IllegalDestination(Position),

    /// Carries the side whose turn it actually is
    #[error("it is {0}'s turn to move")]
    WrongTurn(Color),

    #[error("{0} is not supported yet")]
    Unsupported(Rule),

    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),

    #[error("unrecognized command `{0}`")]
    UnknownCommand(String),

    #[error("malformed command: {0}")]
    MalformedCommand(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
