pub use self::{menu::MenuScreen, training::TrainingScreen};

mod menu;
mod training;

#[derive(Debug)]
pub enum Screen {
    Menu(MenuScreen),
    Training(TrainingScreen),
}

/// Screen change requested by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Start training the opening with this id.
    Start(String),
    Menu,
    Exit,
}
