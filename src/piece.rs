//! The six piece variants and their movement rules.
//!
//! Every query takes the square the piece stands on. The cached `position` inside each
//! variant is bookkeeping only and is kept in sync by the board.

use crate::board::Board;
use crate::movegen::{
    pawn_attacks, pawn_moves, slide_attacks, slide_moves, step_attacks, step_moves,
    BISHOP_DIRECTIONS, KING_STEPS, KNIGHT_STEPS, ROOK_DIRECTIONS,
};
use crate::types::{Color, PieceType, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pawn {
    pub color: Color,
    pub has_moved: bool,
    pub position: Position,
}

impl Pawn {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            has_moved: false,
            position: Position::NONE,
        }
    }

    pub fn get_moves(&self, board: &Board, from: Position) -> Vec<Position> {
        pawn_moves(board, from, self.color, self.has_moved)
    }

    pub fn get_attacks(&self, board: &Board, from: Position) -> Vec<Position> {
        pawn_attacks(board, from, self.color)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Knight {
    pub color: Color,
    pub position: Position,
}

impl Knight {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            position: Position::NONE,
        }
    }

    pub fn get_moves(&self, board: &Board, from: Position) -> Vec<Position> {
        step_moves(board, from, &KNIGHT_STEPS)
    }

    pub fn get_attacks(&self, board: &Board, from: Position) -> Vec<Position> {
        step_attacks(board, from, self.color, &KNIGHT_STEPS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bishop {
    pub color: Color,
    pub position: Position,
}

impl Bishop {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            position: Position::NONE,
        }
    }

    pub fn get_moves(&self, board: &Board, from: Position) -> Vec<Position> {
        slide_moves(board, from, &BISHOP_DIRECTIONS)
    }

    pub fn get_attacks(&self, board: &Board, from: Position) -> Vec<Position> {
        slide_attacks(board, from, self.color, &BISHOP_DIRECTIONS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rook {
    pub color: Color,
    /// Kept for castling rights once castling is supported
    pub has_moved: bool,
    pub position: Position,
}

impl Rook {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            has_moved: false,
            position: Position::NONE,
        }
    }

    pub fn get_moves(&self, board: &Board, from: Position) -> Vec<Position> {
        slide_moves(board, from, &ROOK_DIRECTIONS)
    }

    pub fn get_attacks(&self, board: &Board, from: Position) -> Vec<Position> {
        slide_attacks(board, from, self.color, &ROOK_DIRECTIONS)
    }
}

/// A queen moves as a rook and a bishop of its color standing on the same square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queen {
    pub color: Color,
    pub position: Position,
}

impl Queen {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            position: Position::NONE,
        }
    }

    pub fn get_moves(&self, board: &Board, from: Position) -> Vec<Position> {
        let mut moves = Rook::new(self.color).get_moves(board, from);
        moves.extend(Bishop::new(self.color).get_moves(board, from));
        moves
    }

    pub fn get_attacks(&self, board: &Board, from: Position) -> Vec<Position> {
        let mut attacks = Rook::new(self.color).get_attacks(board, from);
        attacks.extend(Bishop::new(self.color).get_attacks(board, from));
        attacks
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct King {
    pub color: Color,
    pub has_moved: bool,
    pub position: Position,
}

impl King {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            has_moved: false,
            position: Position::NONE,
        }
    }

    pub fn get_moves(&self, board: &Board, from: Position) -> Vec<Position> {
        // TODO: castling, once rook and king move history is consulted here
        step_moves(board, from, &KING_STEPS)
    }

    pub fn get_attacks(&self, board: &Board, from: Position) -> Vec<Position> {
        step_attacks(board, from, self.color, &KING_STEPS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Pawn(Pawn),
    Knight(Knight),
    Bishop(Bishop),
    Rook(Rook),
    Queen(Queen),
    King(King),
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Piece {
        match piece_type {
            PieceType::Pawn => Piece::Pawn(Pawn::new(color)),
            PieceType::Knight => Piece::Knight(Knight::new(color)),
            PieceType::Bishop => Piece::Bishop(Bishop::new(color)),
            PieceType::Rook => Piece::Rook(Rook::new(color)),
            PieceType::Queen => Piece::Queen(Queen::new(color)),
            PieceType::King => Piece::King(King::new(color)),
        }
    }

    /// Builds a piece from its FEN letter, uppercase being white.
    pub fn from_char(c: char) -> Option<Piece> {
        let color = Color::from_case(c)?;
        let piece_type = PieceType::from_char(c)?;
        Some(Piece::new(piece_type, color))
    }

    pub fn piece_type(&self) -> PieceType {
        match self {
            Piece::Pawn(_) => PieceType::Pawn,
            Piece::Knight(_) => PieceType::Knight,
            Piece::Bishop(_) => PieceType::Bishop,
            Piece::Rook(_) => PieceType::Rook,
            Piece::Queen(_) => PieceType::Queen,
            Piece::King(_) => PieceType::King,
        }
    }

    pub fn get_points(&self) -> u32 {
        self.piece_type().points()
    }

    pub fn get_color(&self) -> Color {
        match self {
            Piece::Pawn(p) => p.color,
            Piece::Knight(p) => p.color,
            Piece::Bishop(p) => p.color,
            Piece::Rook(p) => p.color,
            Piece::Queen(p) => p.color,
            Piece::King(p) => p.color,
        }
    }

    /// Squares this piece can move to from `from`, ignoring check
    pub fn get_moves(&self, board: &Board, from: Position) -> Vec<Position> {
        match self {
            Piece::Pawn(p) => p.get_moves(board, from),
            Piece::Knight(p) => p.get_moves(board, from),
            Piece::Bishop(p) => p.get_moves(board, from),
            Piece::Rook(p) => p.get_moves(board, from),
            Piece::Queen(p) => p.get_moves(board, from),
            Piece::King(p) => p.get_moves(board, from),
        }
    }

    /// Enemy-occupied squares this piece threatens from `from`, ignoring check
    pub fn get_attacks(&self, board: &Board, from: Position) -> Vec<Position> {
        match self {
            Piece::Pawn(p) => p.get_attacks(board, from),
            Piece::Knight(p) => p.get_attacks(board, from),
            Piece::Bishop(p) => p.get_attacks(board, from),
            Piece::Rook(p) => p.get_attacks(board, from),
            Piece::Queen(p) => p.get_attacks(board, from),
            Piece::King(p) => p.get_attacks(board, from),
        }
    }

    /// Record that the piece now stands on `to`.
    pub fn apply_move(&mut self, to: Position) {
        self.set_position(to);
        match self {
            Piece::Pawn(p) => p.has_moved = true,
            Piece::Rook(p) => p.has_moved = true,
            Piece::King(p) => p.has_moved = true,
            Piece::Knight(_) | Piece::Bishop(_) | Piece::Queen(_) => {}
        }
    }

    /// `None` for the pieces whose legality never depends on move history
    pub fn has_moved(&self) -> Option<bool> {
        match self {
            Piece::Pawn(p) => Some(p.has_moved),
            Piece::Rook(p) => Some(p.has_moved),
            Piece::King(p) => Some(p.has_moved),
            Piece::Knight(_) | Piece::Bishop(_) | Piece::Queen(_) => None,
        }
    }

    /// Last position recorded by the board. The square holding the piece is authoritative.
    pub fn position(&self) -> Position {
        match self {
            Piece::Pawn(p) => p.position,
            Piece::Knight(p) => p.position,
            Piece::Bishop(p) => p.position,
            Piece::Rook(p) => p.position,
            Piece::Queen(p) => p.position,
            Piece::King(p) => p.position,
        }
    }

    pub(crate) fn set_position(&mut self, pos: Position) {
        match self {
            Piece::Pawn(p) => p.position = pos,
            Piece::Knight(p) => p.position = pos,
            Piece::Bishop(p) => p.position = pos,
            Piece::Rook(p) => p.position = pos,
            Piece::Queen(p) => p.position = pos,
            Piece::King(p) => p.position = pos,
        }
    }

    pub(crate) fn mark_moved(&mut self) {
        match self {
            Piece::Pawn(p) => p.has_moved = true,
            Piece::Rook(p) => p.has_moved = true,
            Piece::King(p) => p.has_moved = true,
            Piece::Knight(_) | Piece::Bishop(_) | Piece::Queen(_) => {}
        }
    }

    /// FEN letter: uppercase for white, lowercase for black
    pub fn to_char(&self) -> char {
        let c = self.piece_type().to_char();
        match self.get_color() {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn to_human(&self) -> String {
        format!("{} {}", self.get_color(), self.piece_type().to_human())
    }
}
