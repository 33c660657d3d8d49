use repertoire_engine::{Board, Move, Piece, PieceKind, Side, Square};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{color, style};

const CELL_WIDTH: u16 = 3;
/// Columns taken by the rank labels on the left.
const LABEL_WIDTH: u16 = 2;

/// Chess board with optional cursor, selection and move highlights.
///
/// Drawn from white's side unless [`Self::flipped`] is set.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    flipped: bool,
    cursor: Option<Square>,
    selection: Option<Square>,
    hint: Option<Move>,
    last_move: Option<Move>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            flipped: false,
            cursor: None,
            selection: None,
            hint: None,
            last_move: None,
            block: None,
        }
    }

    pub fn flipped(self, flipped: bool) -> Self {
        Self { flipped, ..self }
    }

    pub fn cursor(self, cursor: Square) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    pub fn selection(self, selection: Option<Square>) -> Self {
        Self { selection, ..self }
    }

    pub fn hint(self, hint: Option<Move>) -> Self {
        Self { hint, ..self }
    }

    pub fn last_move(self, last_move: Option<Move>) -> Self {
        Self { last_move, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        LABEL_WIDTH
            + u16::from(Square::SIZE) * CELL_WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        // One extra line for the file labels.
        u16::from(Square::SIZE) + 1 + super::block_vertical_margin(self.block.as_ref())
    }

    /// Square drawn at display position (`row`, `col`), counted from the top left.
    fn square_at(&self, row: u8, col: u8) -> Option<Square> {
        let last = Square::SIZE - 1;
        if self.flipped {
            Square::new(last - row, last - col)
        } else {
            Square::new(row, col)
        }
    }

    fn background(&self, square: Square) -> Color {
        let touches = |mv: Option<Move>| mv.is_some_and(|mv| mv.from() == square || mv.to() == square);
        if self.cursor == Some(square) {
            color::CURSOR
        } else if self.selection == Some(square) {
            color::SELECTED
        } else if touches(self.hint) {
            color::HINT
        } else if touches(self.last_move) {
            color::LAST_MOVE
        } else if (square.row() + square.col()) % 2 == 0 {
            color::LIGHT_SQUARE
        } else {
            color::DARK_SQUARE
        }
    }
}

/// Solid glyphs for both sides; the side is shown by foreground color.
fn glyph(piece: Piece) -> char {
    match piece.kind() {
        PieceKind::Pawn => '♟',
        PieceKind::Knight => '♞',
        PieceKind::Bishop => '♝',
        PieceKind::Rook => '♜',
        PieceKind::Queen => '♛',
        PieceKind::King => '♚',
    }
}

fn piece_color(side: Side) -> Color {
    match side {
        Side::White => color::WHITE_PIECE,
        Side::Black => color::BLACK_PIECE,
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for row in 0..Square::SIZE {
            let y = area.y + u16::from(row);
            if y >= area.bottom() {
                break;
            }
            for col in 0..Square::SIZE {
                let Some(square) = self.square_at(row, col) else {
                    continue;
                };
                if col == 0 {
                    buf.set_string(area.x, y, square.rank_char().to_string(), style::LABEL);
                }
                let x = area.x + LABEL_WIDTH + u16::from(col) * CELL_WIDTH;
                if x + CELL_WIDTH > area.right() {
                    break;
                }
                let mut cell_style = Style::new().bg(self.background(square));
                let text = match self.board.get(square) {
                    Some(piece) => {
                        cell_style = cell_style.fg(piece_color(piece.side()));
                        format!(" {} ", glyph(piece))
                    }
                    None => "   ".to_owned(),
                };
                buf.set_string(x, y, text, cell_style);
            }
        }

        let y = area.y + u16::from(Square::SIZE);
        if y < area.bottom() {
            for col in 0..Square::SIZE {
                let Some(square) = self.square_at(0, col) else {
                    continue;
                };
                let x = area.x + LABEL_WIDTH + u16::from(col) * CELL_WIDTH + 1;
                if x < area.right() {
                    buf.set_string(x, y, square.file_char().to_string(), style::LABEL);
                }
            }
        }
    }
}
