use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

/// Keys that trigger an action, and the action's label.
pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

/// One-line help bar such as `↑/k up | q quit`.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self {
            bindings,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn spans(&self) -> Vec<Span<'a>> {
        self.bindings
            .iter()
            .enumerate()
            .flat_map(|(i, &(keys, action))| {
                let separator = (i > 0).then(|| Span::styled(" | ", SEPARATOR_STYLE));
                let keys = keys.iter().enumerate().flat_map(|(j, &key)| {
                    let slash = (j > 0).then(|| Span::styled("/", SEPARATOR_STYLE));
                    slash.into_iter().chain([Span::styled(key, KEY_STYLE)])
                });
                separator
                    .into_iter()
                    .chain(keys)
                    .chain([Span::raw(" "), Span::styled(action, ACTION_STYLE)])
            })
            .collect()
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const ACTION_STYLE: Style = Style::new().fg(Color::White);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        Line::from(self.spans()).centered().render(area, buf);
    }
}
