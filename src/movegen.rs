//! Geometry shared by the piece variants: precomputed rays for the sliding pieces and
//! offset tables for the stepping ones.
//!
//! Nothing here knows about check. These helpers answer "where could this piece go, given
//! what is on the board", and the board layers the self-check filter on top.

use once_cell::sync::Lazy;

use crate::board::Board;
use crate::types::{Color, Direction, Position};

pub const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::West,
    Direction::East,
    Direction::North,
    Direction::South,
];

pub const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::SouthWest,
    Direction::SouthEast,
    Direction::NorthWest,
    Direction::NorthEast,
];

pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Longest ray on an 8x8 board
const MAX_RAY_LENGTH: i8 = 7;

/// Every square reachable from a given square in a given direction on an empty board,
/// nearest first.
pub struct RaysForBoard {
    rays: Vec<[Vec<Position>; 8]>,
}

impl RaysForBoard {
    pub fn new() -> Self {
        let mut rays = Vec::with_capacity(64);
        for y in 1..=8 {
            for x in 1..=8 {
                let from = Position::new(x, y);
                rays.push(Direction::ALL.map(|d| Self::cast(from, d)));
            }
        }
        Self { rays }
    }

    fn cast(from: Position, direction: Direction) -> Vec<Position> {
        let (dx, dy) = direction.delta();
        (1..=MAX_RAY_LENGTH)
            .map(|i| from.offset(dx * i, dy * i))
            .take_while(|p| p.in_bounds())
            .collect()
    }

    /// Off-board origins have no rays.
    pub fn ray(&self, from: Position, direction: Direction) -> &[Position] {
        match from.index() {
            Some(i) => &self.rays[i][direction.index()],
            None => &[],
        }
    }
}

impl Default for RaysForBoard {
    fn default() -> Self {
        Self::new()
    }
}

pub static RAYS: Lazy<RaysForBoard> = Lazy::new(RaysForBoard::new);

/// Empty squares along each ray, stopping before the first occupied square.
pub fn slide_moves(board: &Board, from: Position, directions: &[Direction]) -> Vec<Position> {
    directions
        .iter()
        .flat_map(move |d| {
            RAYS.ray(from, *d)
                .iter()
                .take_while(move |p| board.is_empty(**p))
                .copied()
        })
        .collect()
}

/// The first occupied square along each ray, if it holds a piece of the other color.
pub fn slide_attacks(
    board: &Board,
    from: Position,
    color: Color,
    directions: &[Direction],
) -> Vec<Position> {
    directions
        .iter()
        .filter_map(|d| {
            RAYS.ray(from, *d)
                .iter()
                .find(|p| !board.is_empty(**p))
                .filter(|p| is_enemy(board, **p, color))
                .copied()
        })
        .collect()
}

pub fn step_moves(board: &Board, from: Position, steps: &[(i8, i8)]) -> Vec<Position> {
    steps
        .iter()
        .map(|(dx, dy)| from.offset(*dx, *dy))
        .filter(|p| p.in_bounds() && board.is_empty(*p))
        .collect()
}

pub fn step_attacks(board: &Board, from: Position, color: Color, steps: &[(i8, i8)]) -> Vec<Position> {
    steps
        .iter()
        .map(|(dx, dy)| from.offset(*dx, *dy))
        .filter(|p| p.in_bounds() && is_enemy(board, *p, color))
        .collect()
}

/// Single step forward, plus the double step when the pawn has not moved and both
/// squares are free.
pub fn pawn_moves(board: &Board, from: Position, color: Color, has_moved: bool) -> Vec<Position> {
    let mut moves = Vec::with_capacity(2);
    let forward = color.forward();

    let one_step = from.offset(0, forward);
    if !one_step.in_bounds() || !board.is_empty(one_step) {
        return moves;
    }
    moves.push(one_step);

    if !has_moved {
        let two_step = from.offset(0, 2 * forward);
        if two_step.in_bounds() && board.is_empty(two_step) {
            moves.push(two_step);
        }
    }
    moves
}

/// Forward diagonals holding an enemy piece. Pawns never capture straight ahead.
pub fn pawn_attacks(board: &Board, from: Position, color: Color) -> Vec<Position> {
    let forward = color.forward();
    // TODO: en passant needs the last double step recorded on the board
    step_attacks(board, from, color, &[(-1, forward), (1, forward)])
}

fn is_enemy(board: &Board, pos: Position, color: Color) -> bool {
    board
        .piece_at(pos)
        .map_or(false, |piece| piece.get_color() != color)
}
