use itertools::Itertools;
use log::debug;

use crate::error::{ChessError, ChessResult};
use crate::piece::Piece;
use crate::square::{Highlight, Shade, Square};
use crate::types::{Color, PieceType, Position};

/// Piece placement field of the standard starting position
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

fn pawn_starting_rank(color: Color) -> i8 {
    match color {
        Color::White => 2,
        Color::Black => 7,
    }
}

/// Grid cell of an in-bounds position. Rank 8 is stored in row 0 so rows come out in
/// print order.
fn grid_index(pos: Position) -> Option<(usize, usize)> {
    if pos.in_bounds() {
        Some(((8 - pos.y) as usize, (pos.x - 1) as usize))
    } else {
        None
    }
}

#[derive(Debug)]
pub struct Board {
    grid: [[Square; 8]; 8],
    // square whose piece drives the highlights, `Position::NONE` when nothing is selected
    active_position: Position,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board with every square colored by checkerboard parity
    pub fn new() -> Board {
        let grid = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                Square::new(if (row + col) % 2 == 0 {
                    Shade::Light
                } else {
                    Shade::Dark
                })
            })
        });
        Board {
            grid,
            active_position: Position::NONE,
        }
    }

    /// Board set up for the start of a game
    pub fn standard() -> Board {
        let mut board = Board::new();
        for (i, piece_type) in BACK_RANK.iter().enumerate() {
            let x = i as i8 + 1;
            for color in [Color::White, Color::Black] {
                let pawn_rank = pawn_starting_rank(color);
                let back_rank = pawn_rank - color.forward();
                board.place(Piece::new(*piece_type, color), Position::new(x, back_rank));
                board.place(Piece::new(PieceType::Pawn, color), Position::new(x, pawn_rank));
            }
        }
        board
    }

    /// Build a board from the piece placement field of a FEN string. Any fields after the
    /// placement are ignored. Pawns away from their starting rank count as having moved.
    pub fn from_placement(placement: &str) -> ChessResult<Board> {
        let piece_data = placement.split_whitespace().next().unwrap_or("");
        let mut board = Board::new();
        let mut rank: i8 = 8;
        let mut file: i8 = 1;

        for piece_char in piece_data.chars() {
            if piece_char.is_ascii_alphabetic() {
                let mut piece = Piece::from_char(piece_char).ok_or_else(|| {
                    ChessError::InvalidPlacement(format!("unknown piece `{piece_char}`"))
                })?;
                let pos = Position::new(file, rank);
                if !pos.in_bounds() {
                    return Err(ChessError::InvalidPlacement(format!(
                        "rank {rank} has more than 8 files"
                    )));
                }
                if piece.piece_type() == PieceType::Pawn
                    && rank != pawn_starting_rank(piece.get_color())
                {
                    piece.mark_moved();
                }
                board.place(piece, pos);
                file += 1;
            } else if let Some(skip) = piece_char.to_digit(10).filter(|d| (1..=8).contains(d)) {
                if file + skip as i8 > 9 {
                    return Err(ChessError::InvalidPlacement(format!(
                        "rank {rank} has more than 8 files"
                    )));
                }
                file += skip as i8;
            } else if piece_char == '/' {
                if file != 9 {
                    return Err(ChessError::InvalidPlacement(format!(
                        "rank {rank} does not have 8 files"
                    )));
                }
                rank -= 1;
                file = 1;
                if rank < 1 {
                    return Err(ChessError::InvalidPlacement("more than 8 ranks".to_string()));
                }
            } else {
                return Err(ChessError::InvalidPlacement(format!(
                    "unexpected char `{piece_char}`"
                )));
            }
        }

        if rank != 1 || file != 9 {
            return Err(ChessError::InvalidPlacement(
                "placement does not cover all 64 squares".to_string(),
            ));
        }
        Ok(board)
    }

    /// `None` for positions off the board
    pub fn get_square(&self, pos: Position) -> Option<&Square> {
        grid_index(pos).map(|(row, col)| &self.grid[row][col])
    }

    fn get_square_mut(&mut self, pos: Position) -> Option<&mut Square> {
        grid_index(pos).map(move |(row, col)| &mut self.grid[row][col])
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.get_square(pos).and_then(Square::get_piece)
    }

    /// True only for in-bounds squares without a piece
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get_square(pos).map_or(false, Square::is_empty)
    }

    /// Place a piece, replacing whatever stood there. Meant for setting up positions, not
    /// for playing moves.
    pub fn put_piece(&mut self, piece: Piece, pos: Position) -> ChessResult<()> {
        if !pos.in_bounds() {
            return Err(ChessError::OutOfBounds(pos));
        }
        self.place(piece, pos);
        Ok(())
    }

    fn place(&mut self, mut piece: Piece, pos: Position) {
        piece.set_position(pos);
        if let Some(square) = self.get_square_mut(pos) {
            square.set_piece(piece);
        }
    }

    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        self.get_square_mut(pos).and_then(Square::take_piece)
    }

    /// Move the piece on `from` to `to` without any legality check, returning the piece
    /// that stood on `to`.
    pub fn relocate(&mut self, from: Position, to: Position) -> ChessResult<Option<Piece>> {
        if !to.in_bounds() {
            return Err(ChessError::OutOfBounds(to));
        }
        let mut piece = self
            .get_square_mut(from)
            .ok_or(ChessError::OutOfBounds(from))?
            .take_piece()
            .ok_or(ChessError::EmptySquare(from))?;
        piece.apply_move(to);

        let captured = self
            .get_square_mut(to)
            .and_then(|square| square.set_piece(piece));
        Ok(captured)
    }

    pub fn get_active_position(&self) -> Position {
        self.active_position
    }

    pub fn get_active_square(&self) -> Option<&Square> {
        self.get_square(self.active_position)
    }

    /// Select a square and repaint the highlights: the square itself, then every legal
    /// move and attack of the piece on it. `Position::NONE` deselects.
    pub fn set_active_square(&mut self, pos: Position) -> ChessResult<()> {
        if pos.is_none() {
            self.clear_active_square();
            return Ok(());
        }
        if !pos.in_bounds() {
            return Err(ChessError::OutOfBounds(pos));
        }

        let (moves, attacks) = match self.piece_at(pos) {
            Some(_) => (self.legal_moves(pos)?, self.legal_attacks(pos)?),
            None => (vec![], vec![]),
        };
        self.active_position = pos;
        self.repaint(&moves, &attacks);
        Ok(())
    }

    pub fn clear_active_square(&mut self) {
        self.active_position = Position::NONE;
        self.repaint(&[], &[]);
    }

    fn repaint(&mut self, moves: &[Position], attacks: &[Position]) {
        self.grid
            .iter_mut()
            .flatten()
            .for_each(Square::reset_highlight);

        let active = self.active_position;
        let marks = std::iter::once((active, Highlight::Active))
            .chain(moves.iter().map(|p| (*p, Highlight::Move)))
            .chain(attacks.iter().map(|p| (*p, Highlight::Attack)));
        for (pos, highlight) in marks {
            if let Some(square) = self.get_square_mut(pos) {
                square.set_highlight(highlight);
            }
        }
    }

    /// Every square in print order (rank 8 first, files a to h)
    pub fn squares(&self) -> impl Iterator<Item = (Position, &Square)> + '_ {
        self.grid.iter().enumerate().flat_map(|(row, rank)| {
            rank.iter()
                .enumerate()
                .map(move |(col, square)| (Position::new(col as i8 + 1, 8 - row as i8), square))
        })
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.squares()
            .filter_map(|(pos, square)| square.get_piece().map(|piece| (pos, piece)))
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.piece_type() == PieceType::King && p.get_color() == color)
            .map(|(pos, _)| pos)
    }

    /// Moves of the piece on `from` before the self-check filter
    pub fn candidate_moves(&self, from: Position) -> ChessResult<Vec<Position>> {
        let piece = self.piece_at(from).ok_or(ChessError::EmptySquare(from))?;
        Ok(piece.get_moves(self, from))
    }

    /// Attacks of the piece on `from` before the self-check filter
    pub fn candidate_attacks(&self, from: Position) -> ChessResult<Vec<Position>> {
        let piece = self.piece_at(from).ok_or(ChessError::EmptySquare(from))?;
        Ok(piece.get_attacks(self, from))
    }

    pub fn legal_moves(&self, from: Position) -> ChessResult<Vec<Position>> {
        self.filter_self_check(from, self.candidate_moves(from)?)
    }

    pub fn legal_attacks(&self, from: Position) -> ChessResult<Vec<Position>> {
        self.filter_self_check(from, self.candidate_attacks(from)?)
    }

    fn filter_self_check(&self, from: Position, candidates: Vec<Position>) -> ChessResult<Vec<Position>> {
        let mut legal = Vec::with_capacity(candidates.len());
        for to in candidates {
            if self.move_exposes_king(from, to)? {
                debug!("{from}-{to} rejected: own king would be attacked");
            } else {
                legal.push(to);
            }
        }
        Ok(legal)
    }

    /// Squares attacked by every piece of `color`, without duplicates. Each piece is
    /// evaluated from its own square; the selection is left alone.
    pub fn get_all_attacks(&self, color: Color) -> Vec<Position> {
        self.pieces()
            .filter(|(_, piece)| piece.get_color() == color)
            .flat_map(|(pos, piece)| piece.get_attacks(self, pos))
            .unique()
            .collect()
    }

    /// Whether the king of `color` stands on a square the other side attacks
    pub fn king_in_check(&self, color: Color) -> ChessResult<bool> {
        let king = self.find_king(color).ok_or(ChessError::KingNotFound(color))?;
        Ok(self.get_all_attacks(color.other_color()).contains(&king))
    }

    /// Independent board with fresh pieces in the same places, the same moved flags and
    /// the same selection. Highlights start from their base colors.
    pub fn copy(&self) -> Board {
        let mut copy = Board::new();
        copy.active_position = self.active_position;
        for (pos, piece) in self.pieces() {
            copy.place(piece.clone(), pos);
        }
        copy
    }

    /// Simulate moving the piece on `from` to `to` on a scratch copy and report whether
    /// the mover's king would then be attacked.
    pub fn move_exposes_king(&self, from: Position, to: Position) -> ChessResult<bool> {
        let mover = self
            .piece_at(from)
            .ok_or(ChessError::EmptySquare(from))?
            .get_color();

        let mut scratch = self.copy();
        scratch.relocate(from, to)?;
        scratch.active_position = Position::NONE;

        scratch.find_king(mover).ok_or(ChessError::KingNotFound(mover))?;
        let exposed = scratch
            .get_all_attacks(mover.other_color())
            .iter()
            .any(|pos| {
                scratch.piece_at(*pos).map_or(false, |p| {
                    p.piece_type() == PieceType::King && p.get_color() == mover
                })
            });
        Ok(exposed)
    }

    /// Would moving the selected piece to `destination` leave its own king attacked?
    pub fn moves_into_check(&self, destination: Position) -> ChessResult<bool> {
        if self.active_position.is_none() {
            return Err(ChessError::NoSelection);
        }
        self.move_exposes_king(self.active_position, destination)
    }
}
