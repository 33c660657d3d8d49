use std::path::PathBuf;

use repertoire_engine::Trainer;

use self::app::PlayApp;
use super::{BookArg, SelectorArg, SessionArg};
use crate::{tui::Runtime, util};

mod app;
mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Start training this opening instead of showing the menu
    #[arg(long)]
    pub(crate) opening: Option<String>,
    #[clap(flatten)]
    pub(crate) book: BookArg,
    #[clap(flatten)]
    pub(crate) selector: SelectorArg,
    #[clap(flatten)]
    pub(crate) session: SessionArg,
    /// Write debug logs to this file
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    util::init_logging(arg.log_file.as_deref())?;
    let book = arg.book.load()?;
    let trainer = Trainer::new(book, arg.session.config(), arg.selector.policy());

    let mut app = PlayApp::new(trainer);
    if let Some(id) = &arg.opening {
        app.start(id)?;
    }
    Runtime::new().run(&mut app)?;
    Ok(())
}
