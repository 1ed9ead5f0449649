//! Text rendering of a board, with the current highlights.

use crate::board::Board;
use crate::piece::Piece;
use crate::square::{Highlight, Shade, Square};
use crate::types::Color;

// ANSI escape codes used by `RenderStyle::Ansi`
const DEFAULT_COLOR: &str = "\x1b[0m";
const BLACK_PIECE_COLOR: &str = "\x1b[34m";
const WHITE_PIECE_COLOR: &str = "\x1b[36m";
const ATTACK_SPACE_COLOR: &str = "\x1b[31m";
const MOVE_SPACE_COLOR: &str = "\x1b[32m";
const DARK_SPACE_COLOR: &str = "\x1b[37m";
const LIGHT_SPACE_COLOR: &str = "\x1b[0m";
const ACTIVE_SPACE_COLOR: &str = "\x1b[33m";

const FILE_LABELS: &str = "   a  b  c  d  e  f  g  h";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// Highlights shown with bracket shapes: `{X}` active, `<X>` move or attack
    Plain,
    /// Highlights shown with terminal colors
    Ansi,
}

/// Rank labels on the left, file labels underneath, one `[X]` cell per square.
pub fn draw_board(board: &Board, style: RenderStyle) -> String {
    let mut string = String::new();
    for (pos, square) in board.squares() {
        if pos.x == 1 {
            string.push_str(&format!("{} ", pos.y));
        }
        string.push_str(&draw_square(square, style));
        if pos.x == 8 {
            string.push('\n');
        }
    }
    string.push_str(FILE_LABELS);
    string.push('\n');
    string
}

pub fn draw_to_terminal(board: &Board, style: RenderStyle) {
    println!("{}", draw_board(board, style));
}

fn draw_square(square: &Square, style: RenderStyle) -> String {
    match style {
        RenderStyle::Plain => {
            let (open, close) = match square.highlight() {
                Highlight::Base(_) => ('[', ']'),
                Highlight::Active => ('{', '}'),
                Highlight::Move | Highlight::Attack => ('<', '>'),
            };
            let glyph = square.get_piece().map_or(' ', Piece::to_char);
            format!("{open}{glyph}{close}")
        }
        RenderStyle::Ansi => {
            let color = match square.highlight() {
                Highlight::Base(Shade::Light) => LIGHT_SPACE_COLOR,
                Highlight::Base(Shade::Dark) => DARK_SPACE_COLOR,
                Highlight::Active => ACTIVE_SPACE_COLOR,
                Highlight::Move => MOVE_SPACE_COLOR,
                Highlight::Attack => ATTACK_SPACE_COLOR,
            };
            match square.get_piece() {
                None => format!("{color}[ ]{DEFAULT_COLOR}"),
                Some(piece) => {
                    let piece_color = match piece.get_color() {
                        Color::White => WHITE_PIECE_COLOR,
                        Color::Black => BLACK_PIECE_COLOR,
                    };
                    format!(
                        "{color}[{DEFAULT_COLOR}{piece_color}{}{DEFAULT_COLOR}{color}]{DEFAULT_COLOR}",
                        piece.to_char()
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_draw_standard_board_plain() {
        let board = Board::standard();
        let expected = "\
8 [r][n][b][q][k][b][n][r]
7 [p][p][p][p][p][p][p][p]
6 [ ][ ][ ][ ][ ][ ][ ][ ]
5 [ ][ ][ ][ ][ ][ ][ ][ ]
4 [ ][ ][ ][ ][ ][ ][ ][ ]
3 [ ][ ][ ][ ][ ][ ][ ][ ]
2 [P][P][P][P][P][P][P][P]
1 [R][N][B][Q][K][B][N][R]
   a  b  c  d  e  f  g  h
";
        assert_eq!(draw_board(&board, RenderStyle::Plain), expected);
    }

    #[test]
    fn test_draw_selection_plain() {
        let mut board = Board::standard();
        board.set_active_square(Position::new(2, 1)).unwrap();
        let drawn = draw_board(&board, RenderStyle::Plain);
        let lines: Vec<&str> = drawn.lines().collect();
        assert_eq!(lines[5], "3 < >[ ]< >[ ][ ][ ][ ][ ]");
        assert_eq!(lines[7], "1 [R]{N}[B][Q][K][B][N][R]");
    }

    #[test]
    fn test_draw_ansi_uses_highlight_colors() {
        let mut board = Board::standard();
        board.set_active_square(Position::new(2, 1)).unwrap();
        let drawn = draw_board(&board, RenderStyle::Ansi);
        assert!(drawn.contains(&format!("{ACTIVE_SPACE_COLOR}[{DEFAULT_COLOR}{WHITE_PIECE_COLOR}N")));
        assert!(drawn.contains(&format!("{MOVE_SPACE_COLOR}[ ]{DEFAULT_COLOR}")));
        assert!(drawn.ends_with(&format!("{FILE_LABELS}\n")));
    }
}
