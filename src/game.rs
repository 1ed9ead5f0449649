use chrono::prelude::*;
use itertools::Itertools;
use log::{info, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{ChessError, ChessResult};
use crate::piece::Piece;
use crate::square::Highlight;
use crate::types::{Color, Move, Position, Rule};

/// What selecting a square produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Empty square, nothing is selected now
    Nothing,
    Piece {
        moves: Vec<Position>,
        attacks: Vec<Position>,
    },
}

/// Edits made outside of normal play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adjustment {
    Put { piece: Piece, pos: Position },
    Remove { pos: Position },
    Points { color: Color, value: u32 },
}

pub struct Game {
    board: Board,
    config: GameConfig,
    white_points: u32,
    black_points: u32,
    side_to_move: Color,
    moves: Vec<Move>,
    game_start_time: DateTime<Local>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Game::with_board(Board::standard(), config)
    }

    pub fn with_board(board: Board, config: GameConfig) -> Self {
        Self {
            board,
            config,
            white_points: 0,
            black_points: 0,
            side_to_move: Color::White,
            moves: Vec::new(),
            game_start_time: Local::now(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Select the piece on `pos` and highlight where it can go. Anything that fails
    /// leaves nothing selected.
    pub fn select(&mut self, pos: Position) -> ChessResult<Selection> {
        let color = match self.board.piece_at(pos) {
            Some(piece) => piece.get_color(),
            None => {
                self.board.clear_active_square();
                return Ok(Selection::Nothing);
            }
        };
        if self.config.enforce_turns && color != self.side_to_move {
            self.board.clear_active_square();
            return Err(ChessError::WrongTurn(self.side_to_move));
        }
        if let Err(e) = self.board.set_active_square(pos) {
            self.board.clear_active_square();
            return Err(e);
        }

        let marked = |highlight: Highlight| {
            self.board
                .squares()
                .filter(|(_, square)| square.highlight() == highlight)
                .map(|(p, _)| p)
                .collect::<Vec<_>>()
        };
        Ok(Selection::Piece {
            moves: marked(Highlight::Move),
            attacks: marked(Highlight::Attack),
        })
    }

    /// Move the selected piece to `to`. Only squares highlighted as a move or an attack by
    /// the last selection are accepted; anything else is rejected without touching the
    /// board.
    pub fn move_selected(&mut self, to: Position) -> ChessResult<Move> {
        let from = self.board.get_active_position();
        if from.is_none() {
            return Err(ChessError::NoSelection);
        }
        let target = self.board.get_square(to).ok_or(ChessError::OutOfBounds(to))?;
        if !matches!(target.highlight(), Highlight::Move | Highlight::Attack) {
            warn!("rejected move {from}-{to}: not highlighted");
            return Err(ChessError::IllegalDestination(to));
        }

        let captured = self.board.relocate(from, to)?;
        let piece = self.board.piece_at(to).ok_or(ChessError::EmptySquare(to))?;
        let m = Move {
            piece_type: piece.piece_type(),
            color: piece.get_color(),
            from,
            to,
            captured: captured.as_ref().map(Piece::piece_type),
        };

        if let Some(captured) = captured {
            let points = captured.get_points();
            *self.points_mut(m.color) += points;
            info!("{} scores {points} for the {}", m.color, captured.to_human());
        }
        self.board.clear_active_square();
        self.side_to_move = m.color.other_color();
        self.moves.push(m);
        info!("{}", m.to_human());
        Ok(m)
    }

    pub fn adjust(&mut self, adjustment: Adjustment) -> ChessResult<()> {
        match &adjustment {
            Adjustment::Put { piece, pos } => self.board.put_piece(piece.clone(), *pos)?,
            Adjustment::Remove { pos } => {
                if !pos.in_bounds() {
                    return Err(ChessError::OutOfBounds(*pos));
                }
                self.board
                    .remove_piece(*pos)
                    .ok_or(ChessError::EmptySquare(*pos))?;
            }
            Adjustment::Points { color, value } => *self.points_mut(*color) = *value,
        }
        self.board.clear_active_square();
        info!("adjusted: {adjustment:?}");
        Ok(())
    }

    /// Ask for a rule the crate does not implement yet.
    pub fn request(&self, rule: Rule) -> ChessResult<()> {
        if rule.is_supported() {
            Ok(())
        } else {
            Err(ChessError::Unsupported(rule))
        }
    }

    pub fn points(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_points,
            Color::Black => self.black_points,
        }
    }

    fn points_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::White => &mut self.white_points,
            Color::Black => &mut self.black_points,
        }
    }

    /// Color of the last mover's opponent, white before any move
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn in_check(&self, color: Color) -> ChessResult<bool> {
        self.board.king_in_check(color)
    }

    /// Once either side reaches the win threshold, the side with more points. `None`
    /// before that or on a tie.
    pub fn winner(&self) -> Option<Color> {
        if self.is_over() {
            self.leader()
        } else {
            None
        }
    }

    /// Side with more captured points, `None` on a tie
    pub fn leader(&self) -> Option<Color> {
        match self.white_points.cmp(&self.black_points) {
            std::cmp::Ordering::Greater => Some(Color::White),
            std::cmp::Ordering::Less => Some(Color::Black),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.white_points.max(self.black_points) >= self.config.win_threshold
    }

    pub fn history(&self) -> &[Move] {
        &self.moves
    }

    pub fn transcript(&self) -> String {
        let mut transcript = String::new();
        transcript.push_str(&format!(
            "[Date \"{}\"]\n",
            self.game_start_time.format("%Y.%m.%d")
        ));
        transcript.push_str(&format!("[WhitePoints \"{}\"]\n", self.white_points));
        transcript.push_str(&format!("[BlackPoints \"{}\"]\n", self.black_points));
        transcript.push('\n');

        let moves = self
            .moves
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| format!("{}. {}", i + 1, pair.iter().map(Move::to_algebraic).join(" ")))
            .join(" ");
        transcript.push_str(&moves);
        transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceType;
    use pretty_assertions::assert_eq;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn game() -> Game {
        Game::new(GameConfig::default())
    }

    #[test]
    fn test_select_pawn() {
        let mut game = game();
        assert_eq!(
            game.select(pos("e2")),
            Ok(Selection::Piece {
                moves: vec![pos("e4"), pos("e3")],
                attacks: vec![],
            })
        );
        assert_eq!(game.board().get_active_position(), pos("e2"));
    }

    #[test]
    fn test_select_empty_square_deselects() {
        let mut game = game();
        game.select(pos("b1")).unwrap();
        assert_eq!(game.select(pos("e5")), Ok(Selection::Nothing));
        assert_eq!(game.board().get_active_position(), Position::NONE);
        assert_eq!(game.select(Position::new(0, 9)), Ok(Selection::Nothing));
    }

    #[test]
    fn test_move_selected() {
        let mut game = game();
        game.select(pos("e2")).unwrap();
        let m = game.move_selected(pos("e4")).unwrap();
        assert_eq!(m.to_human(), "white moves pawn from e2 to e4");
        assert!(game.board().piece_at(pos("e2")).is_none());
        assert_eq!(game.board().piece_at(pos("e4")).unwrap().has_moved(), Some(true));
        assert_eq!(game.board().get_active_position(), Position::NONE);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.history(), &[m]);
    }

    #[test]
    fn test_move_without_selection() {
        let mut game = game();
        assert_eq!(game.move_selected(pos("e4")), Err(ChessError::NoSelection));
    }

    #[test]
    fn test_illegal_destination_is_rejected() {
        let mut game = game();
        game.select(pos("e2")).unwrap();
        assert_eq!(
            game.move_selected(pos("e5")),
            Err(ChessError::IllegalDestination(pos("e5")))
        );
        assert_eq!(
            game.move_selected(Position::new(5, 9)),
            Err(ChessError::OutOfBounds(Position::new(5, 9)))
        );
        assert!(game.board().piece_at(pos("e2")).is_some());
        assert_eq!(game.board().get_active_position(), pos("e2"));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_capture_scores_points() {
        let board = Board::from_placement("4k3/8/8/3q4/8/8/8/3RK3").unwrap();
        let mut game = Game::with_board(board, GameConfig::default());
        game.select(pos("d1")).unwrap();
        let m = game.move_selected(pos("d5")).unwrap();
        assert_eq!(m.captured, Some(PieceType::Queen));
        assert_eq!(game.points(Color::White), 9);
        assert_eq!(game.points(Color::Black), 0);
        assert_eq!(game.leader(), Some(Color::White));
        assert!(!game.is_over());
    }

    #[test]
    fn test_taking_the_king_wins() {
        let board = Board::from_placement("7k/8/8/8/8/8/8/K6R").unwrap();
        let mut game = Game::with_board(board, GameConfig::default());
        let selection = game.select(pos("h1")).unwrap();
        assert_eq!(
            selection,
            Selection::Piece {
                moves: vec![
                    pos("h7"),
                    pos("h6"),
                    pos("h5"),
                    pos("h4"),
                    pos("h3"),
                    pos("h2"),
                    pos("b1"),
                    pos("c1"),
                    pos("d1"),
                    pos("e1"),
                    pos("f1"),
                    pos("g1"),
                ],
                attacks: vec![pos("h8")],
            }
        );
        game.move_selected(pos("h8")).unwrap();
        assert_eq!(game.points(Color::White), 999);
        assert_eq!(game.winner(), Some(Color::White));
        assert!(game.is_over());
    }

    #[test]
    fn test_enforce_turns() {
        let config = GameConfig {
            enforce_turns: true,
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        assert_eq!(game.select(pos("e7")), Err(ChessError::WrongTurn(Color::White)));
        assert_eq!(game.board().get_active_position(), Position::NONE);
        game.select(pos("e2")).unwrap();
        game.move_selected(pos("e4")).unwrap();
        assert_eq!(game.select(pos("d2")), Err(ChessError::WrongTurn(Color::Black)));
        assert!(game.select(pos("e7")).is_ok());
    }

    #[test]
    fn test_pinned_piece_selection_has_no_moves() {
        let board = Board::from_placement("4r2k/8/8/8/8/8/4N3/4K3").unwrap();
        let mut game = Game::with_board(board, GameConfig::default());
        assert_eq!(
            game.select(pos("e2")),
            Ok(Selection::Piece {
                moves: vec![],
                attacks: vec![],
            })
        );
        assert_eq!(
            game.move_selected(pos("c3")),
            Err(ChessError::IllegalDestination(pos("c3")))
        );
    }

    #[test]
    fn test_select_without_king_reports_it() {
        let board = Board::from_placement("8/8/8/8/8/8/8/R7").unwrap();
        let mut game = Game::with_board(board, GameConfig::default());
        assert_eq!(
            game.select(pos("a1")),
            Err(ChessError::KingNotFound(Color::White))
        );
        assert_eq!(game.board().get_active_position(), Position::NONE);
    }

    #[test]
    fn test_adjustments() {
        let mut game = game();
        game.select(pos("b1")).unwrap();
        game.adjust(Adjustment::Put {
            piece: Piece::new(PieceType::Queen, Color::Black),
            pos: pos("e4"),
        })
        .unwrap();
        assert_eq!(game.board().get_active_position(), Position::NONE);
        assert_eq!(game.board().piece_at(pos("e4")).map(Piece::to_char), Some('q'));

        game.adjust(Adjustment::Remove { pos: pos("e4") }).unwrap();
        assert!(game.board().piece_at(pos("e4")).is_none());
        assert_eq!(
            game.adjust(Adjustment::Remove { pos: pos("e4") }),
            Err(ChessError::EmptySquare(pos("e4")))
        );
        assert_eq!(
            game.adjust(Adjustment::Remove { pos: Position::NONE }),
            Err(ChessError::OutOfBounds(Position::NONE))
        );

        game.adjust(Adjustment::Points {
            color: Color::Black,
            value: 12,
        })
        .unwrap();
        assert_eq!(game.points(Color::Black), 12);
        assert_eq!(game.leader(), Some(Color::Black));
    }

    #[test]
    fn test_winner_compares_points_past_the_threshold() {
        let mut game = game();
        assert_eq!(game.winner(), None);

        game.adjust(Adjustment::Points {
            color: Color::White,
            value: 900,
        })
        .unwrap();
        game.adjust(Adjustment::Points {
            color: Color::Black,
            value: 1000,
        })
        .unwrap();
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Color::Black));

        game.adjust(Adjustment::Points {
            color: Color::Black,
            value: 900,
        })
        .unwrap();
        assert!(game.is_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_unsupported_rules() {
        let game = game();
        for rule in Rule::ALL {
            assert_eq!(game.request(rule), Err(ChessError::Unsupported(rule)));
        }
    }

    #[test]
    fn test_transcript() {
        let mut game = game();
        for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3")] {
            game.select(pos(from)).unwrap();
            game.move_selected(pos(to)).unwrap();
        }
        let transcript = game.transcript();
        assert!(transcript.starts_with("[Date \""));
        assert!(transcript.ends_with("1. Pe2e4 Pe7e5 2. Ng1f3"));
    }
}
