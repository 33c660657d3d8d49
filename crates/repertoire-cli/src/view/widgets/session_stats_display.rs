use std::iter;

use repertoire_engine::TrainingSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

pub struct SessionStatsDisplay<'a> {
    session: &'a TrainingSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a TrainingSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        24 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&TrainingSession) -> String),
    LabelValue(&'static str, &'static dyn Fn(&TrainingSession) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("OPENING:"),
    Row::FullValue(&|session| session.line().name().to_owned()),
    Row::LabelValue("YOU PLAY:", &|session| session.trainee().to_string()),
    Row::Empty,
    Row::LabelValue("SCORE:", &|session| session.score().to_string()),
    Row::LabelValue("ACCURACY:", &|session| {
        session
            .score()
            .accuracy()
            .map_or_else(|| "-".to_owned(), |acc| format!("{:.0}%", acc * 100.0))
    }),
    Row::LabelValue("TIME:", &|session| {
        let dur = session.elapsed();
        format!("{:0}:{:0>2}", dur.as_secs() / 60, dur.as_secs() % 60)
    }),
    Row::Empty,
    Row::LabelValue("MOVES:", &|session| session.history().len().to_string()),
    Row::LabelValue("TO MOVE:", &|session| session.turn().to_string()),
    Row::FullLabel("PHASE:"),
    Row::FullValue(&|session| session.phase().to_string()),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style::LABEL)
                        .left_aligned()
                        .render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style::LABEL)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
