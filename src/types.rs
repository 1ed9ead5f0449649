use std::fmt;

use crate::error::{ChessError, ChessResult};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Uppercase letters are white, lowercase letters are black
    pub fn from_case(c: char) -> Option<Color> {
        if c.is_uppercase() {
            Some(Color::White)
        } else if c.is_lowercase() {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn from_human(s: &str) -> Option<Color> {
        match s.to_lowercase().as_str() {
            "white" | "w" => Some(Color::White),
            "black" | "b" => Some(Color::Black),
            _ => None,
        }
    }

    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Rank delta of a pawn step. The two sides mirror each other.
    pub fn forward(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_human())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'r' => Some(PieceType::Rook),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    pub fn from_human(s: &str) -> Option<PieceType> {
        match s.to_lowercase().as_str() {
            "pawn" => Some(PieceType::Pawn),
            "rook" => Some(PieceType::Rook),
            "knight" => Some(PieceType::Knight),
            "bishop" => Some(PieceType::Bishop),
            "queen" => Some(PieceType::Queen),
            "king" => Some(PieceType::King),
            other => other.chars().next().filter(|_| other.len() == 1).and_then(Self::from_char),
        }
    }

    /// Material value captured by taking this piece. The king's value is a sentinel
    /// far above anything reachable by capturing the other pieces.
    pub fn points(&self) -> u32 {
        match self {
            Self::Pawn => 1,
            Self::Rook => 5,
            Self::Knight => 3,
            Self::Bishop => 3,
            Self::Queen => 9,
            Self::King => 999,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// A square coordinate. `x` is the file (a = 1), `y` is the rank, both 1-indexed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    /// Sentinel meaning "nothing selected"
    pub const NONE: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        (1..=8).contains(&self.x) && (1..=8).contains(&self.y)
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    pub fn offset(&self, dx: i8, dy: i8) -> Position {
        Position {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Index into a 64-entry table, rank 1 first. `None` when off the board.
    pub fn index(&self) -> Option<usize> {
        if self.in_bounds() {
            Some(((self.y - 1) * 8 + (self.x - 1)) as usize)
        } else {
            None
        }
    }

    /// File letter to column number, `a` = 1
    pub fn file_from_char(c: char) -> Option<i8> {
        match c {
            'a'..='h' => Some(c as i8 - 'a' as i8 + 1),
            _ => None,
        }
    }

    pub fn from_algebraic(s: &str) -> ChessResult<Position> {
        let mut char_iter = s.chars();
        let (Some(file_char), Some(rank_char), None) =
            (char_iter.next(), char_iter.next(), char_iter.next())
        else {
            return Err(ChessError::InvalidSquare(s.to_string()));
        };

        let x = Self::file_from_char(file_char.to_ascii_lowercase());
        let y = rank_char.to_digit(10).map(|d| d as i8);
        match (x, y) {
            (Some(x), Some(y)) if Position::new(x, y).in_bounds() => Ok(Position { x, y }),
            _ => Err(ChessError::InvalidSquare(s.to_string())),
        }
    }

    pub fn to_algebraic(&self) -> String {
        if !self.in_bounds() {
            return format!("({}, {})", self.x, self.y);
        }
        format!("{}{}", (b'a' + (self.x - 1) as u8) as char, self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

/// The eight compass directions a ray can be cast in, from white's point of view.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub fn delta(&self) -> (i8, i8) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::NorthEast => (1, 1),
            Self::NorthWest => (-1, 1),
            Self::SouthEast => (1, -1),
            Self::SouthWest => (-1, -1),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
            Self::NorthEast => 4,
            Self::NorthWest => 5,
            Self::SouthEast => 6,
            Self::SouthWest => 7,
        }
    }
}

/// Rules of chess this crate does not implement yet.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Rule {
    Castling,
    EnPassant,
    Promotion,
    Checkmate,
    Stalemate,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::Castling,
        Rule::EnPassant,
        Rule::Promotion,
        Rule::Checkmate,
        Rule::Stalemate,
    ];

    pub fn is_supported(&self) -> bool {
        match self {
            Self::Castling
            | Self::EnPassant
            | Self::Promotion
            | Self::Checkmate
            | Self::Stalemate => false,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Castling => "castling",
            Self::EnPassant => "en passant",
            Self::Promotion => "promotion",
            Self::Checkmate => "checkmate detection",
            Self::Stalemate => "stalemate detection",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_human())
    }
}

/// A move that has been applied to the board, kept for the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub piece_type: PieceType,
    pub color: Color,
    pub from: Position,
    pub to: Position,
    pub captured: Option<PieceType>,
}

impl Move {
    pub fn to_human(&self) -> String {
        let maybe_capture_str = match self.captured {
            Some(p) => format!(
                " capturing {} {} at {}",
                self.color.other_color().to_human(),
                p.to_human(),
                self.to.to_algebraic()
            ),
            None => "".to_string(),
        };
        format!(
            "{} moves {} from {} to {}{}",
            self.color.to_human(),
            self.piece_type.to_human(),
            self.from.to_algebraic(),
            self.to.to_algebraic(),
            maybe_capture_str,
        )
    }

    pub fn to_algebraic(&self) -> String {
        format!(
            "{}{}{}",
            self.piece_type.to_char(),
            self.from.to_algebraic(),
            match self.captured {
                Some(_) => format!("x{}", self.to.to_algebraic()),
                None => self.to.to_algebraic(),
            },
        )
    }
}
