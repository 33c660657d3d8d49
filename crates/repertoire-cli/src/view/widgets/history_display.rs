use repertoire_engine::Move;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

/// Numbered move list, one full move per line.
///
/// When the list is taller than the area, the most recent moves are kept.
#[derive(Debug)]
pub struct HistoryDisplay<'a> {
    moves: &'a [Move],
    block: Option<BlockWidget<'a>>,
}

impl<'a> HistoryDisplay<'a> {
    pub fn new(moves: &'a [Move]) -> Self {
        Self { moves, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        // "NN. e2-e4 e7-e5"
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    fn lines(&self) -> Vec<Line<'static>> {
        self.moves
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let mut spans = vec![Span::styled(format!("{:>2}. ", i + 1), style::LABEL)];
                spans.extend(
                    pair.iter()
                        .map(|mv| Span::styled(format!("{mv} "), style::DEFAULT)),
                );
                Line::from(spans)
            })
            .collect()
    }
}

impl Widget for HistoryDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let lines = self.lines();
        let skip = lines.len().saturating_sub(usize::from(area.height));
        for (y, line) in (area.y..area.bottom()).zip(lines.into_iter().skip(skip)) {
            line.render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(s: &str) -> Vec<Move> {
        s.split(',').map(|m| m.parse().unwrap()).collect()
    }

    fn rendered(widget: HistoryDisplay, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, 16, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_owned())
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    #[test]
    fn test_pairs_moves() {
        let moves = moves("e2-e4,e7-e5,g1-f3");
        assert_eq!(
            rendered(HistoryDisplay::new(&moves), 3),
            [" 1. e2-e4 e7-e5", " 2. g1-f3", ""]
        );
    }

    #[test]
    fn test_keeps_latest_moves() {
        let moves = moves("e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4");
        assert_eq!(
            rendered(HistoryDisplay::new(&moves), 2),
            [" 2. g1-f3 b8-c6", " 3. d2-d4 e5-d4"]
        );
    }
}
