//! Movement and legality scenarios through the public API
//!
//! Run with: cargo test --test rules_tests

use chess_rules::board::Board;
use chess_rules::error::ChessError;
use chess_rules::piece::Piece;
use chess_rules::square::Highlight;
use chess_rules::types::{Color, PieceType, Position};
use itertools::Itertools;
use pretty_assertions::assert_eq;

fn pos(s: &str) -> Position {
    Position::from_algebraic(s).unwrap()
}

fn sorted(v: Vec<Position>) -> Vec<Position> {
    v.into_iter().sorted().collect()
}

fn place(board: &mut Board, piece_type: PieceType, color: Color, square: &str) {
    board.put_piece(Piece::new(piece_type, color), pos(square)).unwrap();
}

#[test]
fn opening_pawn_and_knight() {
    let board = Board::standard();

    let pawn = board.piece_at(Position::new(5, 2)).unwrap();
    assert_eq!(
        sorted(pawn.get_moves(&board, Position::new(5, 2))),
        vec![Position::new(5, 3), Position::new(5, 4)]
    );
    assert!(pawn.get_attacks(&board, Position::new(5, 2)).is_empty());

    let knight = board.piece_at(Position::new(2, 1)).unwrap();
    assert_eq!(
        sorted(knight.get_moves(&board, Position::new(2, 1))),
        vec![Position::new(1, 3), Position::new(3, 3)]
    );
    assert!(knight.get_attacks(&board, Position::new(2, 1)).is_empty());
}

#[test]
fn opening_has_twenty_legal_moves_per_side() {
    let board = Board::standard();
    for color in [Color::White, Color::Black] {
        let count: usize = board
            .pieces()
            .filter(|(_, p)| p.get_color() == color)
            .map(|(from, _)| board.legal_moves(from).unwrap().len())
            .sum();
        assert_eq!(count, 20, "{color}");
    }
}

#[test]
fn rook_ray_with_friendly_then_enemy_blocker() {
    let mut board = Board::new();
    place(&mut board, PieceType::Rook, Color::White, "b4");
    place(&mut board, PieceType::Knight, Color::White, "e4");

    let rook = board.piece_at(pos("b4")).unwrap().clone();
    let right_of_rook = |v: Vec<Position>| -> Vec<Position> {
        v.into_iter().filter(|p| p.y == 4 && p.x > 2).collect()
    };
    assert_eq!(
        right_of_rook(rook.get_moves(&board, pos("b4"))),
        vec![pos("c4"), pos("d4")]
    );
    assert!(right_of_rook(rook.get_attacks(&board, pos("b4"))).is_empty());

    place(&mut board, PieceType::Knight, Color::Black, "e4");
    place(&mut board, PieceType::Queen, Color::Black, "g4");
    assert_eq!(
        right_of_rook(rook.get_moves(&board, pos("b4"))),
        vec![pos("c4"), pos("d4")]
    );
    assert_eq!(
        right_of_rook(rook.get_attacks(&board, pos("b4"))),
        vec![pos("e4")]
    );
}

#[test]
fn pawn_double_step_only_before_first_move() {
    let mut board = Board::new();
    place(&mut board, PieceType::Pawn, Color::Black, "c7");
    let from = pos("c7");
    assert_eq!(
        board.piece_at(from).unwrap().get_moves(&board, from),
        vec![pos("c6"), pos("c5")]
    );

    board.relocate(from, pos("c6")).unwrap();
    board.relocate(pos("c6"), pos("c7")).unwrap();
    let pawn = board.piece_at(from).unwrap();
    assert_eq!(pawn.has_moved(), Some(true));
    assert_eq!(pawn.get_moves(&board, from), vec![pos("c6")]);
}

#[test]
fn pinned_blocker_on_the_e_file() {
    let mut board = Board::new();
    place(&mut board, PieceType::King, Color::White, "e1");
    place(&mut board, PieceType::Bishop, Color::White, "e2");
    place(&mut board, PieceType::Rook, Color::Black, "e7");
    place(&mut board, PieceType::King, Color::Black, "a8");

    board.set_active_square(pos("e2")).unwrap();
    assert_eq!(board.moves_into_check(pos("d3")), Ok(true));
    assert_eq!(board.moves_into_check(pos("f3")), Ok(true));

    // a rook on the pinned square may still slide along the file
    place(&mut board, PieceType::Rook, Color::White, "e2");
    board.set_active_square(pos("e2")).unwrap();
    assert_eq!(board.moves_into_check(pos("e4")), Ok(false));
    assert_eq!(board.moves_into_check(pos("e7")), Ok(false));
    assert_eq!(board.moves_into_check(pos("a2")), Ok(true));

    let highlighted_attacks: Vec<Position> = board
        .squares()
        .filter(|(_, s)| s.highlight() == Highlight::Attack)
        .map(|(p, _)| p)
        .collect();
    assert_eq!(highlighted_attacks, vec![pos("e7")]);
}

#[test]
fn attack_aggregation_does_not_move_the_selection() {
    let mut board = Board::standard();
    board.set_active_square(pos("g8")).unwrap();
    let before = board.get_active_position();
    assert!(board.get_all_attacks(Color::White).is_empty());
    assert!(board.get_all_attacks(Color::Black).is_empty());
    assert_eq!(board.get_active_position(), before);
}

#[test]
fn copy_is_a_scratch_board() {
    let mut board = Board::standard();
    let mut scratch = board.copy();
    scratch.relocate(pos("g1"), pos("f3")).unwrap();
    scratch.remove_piece(pos("a7"));

    assert!(board.piece_at(pos("f3")).is_none());
    assert!(board.piece_at(pos("g1")).is_some());
    assert!(board.piece_at(pos("a7")).is_some());

    board.remove_piece(pos("h8"));
    assert!(scratch.piece_at(pos("h8")).is_some());
}

#[test]
fn missing_king_is_reported() {
    let mut board = Board::new();
    place(&mut board, PieceType::Queen, Color::Black, "d8");
    place(&mut board, PieceType::King, Color::White, "a1");
    assert_eq!(
        board.move_exposes_king(pos("d8"), pos("d1")),
        Err(ChessError::KingNotFound(Color::Black))
    );
    assert_eq!(
        board.move_exposes_king(pos("a1"), pos("a2")),
        Ok(false)
    );
}
