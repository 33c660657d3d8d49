use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, List, ListItem, ListState},
};
use repertoire_engine::{OpeningBook, Side};

use super::Transition;
use crate::view::widgets::{KeyBinding, KeyBindingDisplay, color, style};

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["↑", "k"], "up"),
    (&["↓", "j"], "down"),
    (&["Enter"], "train"),
    (&["q"], "quit"),
];

#[derive(Debug)]
struct MenuEntry {
    id: String,
    name: String,
    trainee: Side,
}

/// Opening selection list.
#[derive(Debug)]
pub struct MenuScreen {
    entries: Vec<MenuEntry>,
    selected: usize,
    message: Option<String>,
}

impl MenuScreen {
    pub fn new(book: &OpeningBook) -> Self {
        let entries = book
            .lines()
            .map(|line| MenuEntry {
                id: line.id().to_owned(),
                name: line.name().to_owned(),
                trainee: line.trainee(),
            })
            .collect();
        Self {
            entries,
            selected: 0,
            message: None,
        }
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(entry) = self.entries.get(self.selected) {
                    return Transition::Start(entry.id.clone());
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return Transition::Exit,
            _ => {}
        }
        Transition::Stay
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let items = self.entries.iter().map(|entry| {
            ListItem::new(Line::from(format!(
                "{:<28} as {}",
                entry.name, entry.trainee
            )))
        });
        let list = List::new(items)
            .block(Block::bordered().title(" Choose an opening "))
            .style(style::DEFAULT)
            .highlight_style(Style::new().fg(color::YELLOW).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.selected));

        let message = self.message.as_deref().unwrap_or_default();
        let [list_area, message_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_stateful_widget(list, list_area, &mut state);
        frame.render_widget(
            Line::styled(message, Style::new().fg(color::RED)).centered(),
            message_area,
        );
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn press(menu: &mut MenuScreen, code: KeyCode) -> Transition {
        menu.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut menu = MenuScreen::new(&OpeningBook::builtin());
        let ids: Vec<_> = menu.entries.iter().map(|e| e.id.clone()).collect();

        assert_eq!(press(&mut menu, KeyCode::Up), Transition::Stay);
        assert_eq!(press(&mut menu, KeyCode::Enter), Transition::Start(ids[0].clone()));

        for _ in 0..ids.len() + 2 {
            press(&mut menu, KeyCode::Char('j'));
        }
        assert_eq!(
            press(&mut menu, KeyCode::Char(' ')),
            Transition::Start(ids[ids.len() - 1].clone())
        );
        assert_eq!(press(&mut menu, KeyCode::Char('q')), Transition::Exit);
    }
}
