use crate::piece::Piece;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Shade {
    Light,
    Dark,
}

/// Display state of a square. Derived from the active selection, never used for legality.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Highlight {
    Base(Shade),
    Active,
    Move,
    Attack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    piece: Option<Piece>,
    highlight: Highlight,
    shade: Shade,
}

impl Square {
    pub fn new(shade: Shade) -> Self {
        Self {
            piece: None,
            highlight: Highlight::Base(shade),
            shade,
        }
    }

    pub fn get_piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// Replace the occupant, returning whatever stood here before.
    pub(crate) fn set_piece(&mut self, piece: Piece) -> Option<Piece> {
        self.piece.replace(piece)
    }

    pub(crate) fn take_piece(&mut self) -> Option<Piece> {
        self.piece.take()
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn shade(&self) -> Shade {
        self.shade
    }

    pub(crate) fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }

    pub(crate) fn reset_highlight(&mut self) {
        self.highlight = Highlight::Base(self.shade);
    }
}
