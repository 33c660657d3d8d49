use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use repertoire_engine::{PawnDoubleStep, ReplySeed, SelectorPolicy, SessionConfig};

use self::{drill::DrillArg, list::ListArg, play::PlayArg};

mod drill;
mod list;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Practice openings in the terminal UI
    Play(#[clap(flatten)] PlayArg),
    /// List the openings in a book
    List(#[clap(flatten)] ListArg),
    /// Play a fixed sequence of moves and report the results as JSON
    Drill(#[clap(flatten)] DrillArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::List(arg) => list::run(&arg)?,
        Mode::Drill(arg) => drill::run(&arg)?,
    }
    Ok(())
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BookArg {
    /// Opening book JSON file (defaults to the built-in openings)
    #[arg(long)]
    book: Option<PathBuf>,
}

impl BookArg {
    pub(crate) fn load(&self) -> anyhow::Result<repertoire_engine::OpeningBook> {
        crate::util::load_book(self.book.as_deref())
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum PawnDoubleStepArg {
    #[default]
    Strict,
    DestinationOnly,
}

impl From<PawnDoubleStepArg> for PawnDoubleStep {
    fn from(arg: PawnDoubleStepArg) -> Self {
        match arg {
            PawnDoubleStepArg::Strict => PawnDoubleStep::Strict,
            PawnDoubleStepArg::DestinationOnly => PawnDoubleStep::DestinationOnly,
        }
    }
}

/// How the automated side picks among book replies.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SelectorArg {
    /// Seed for reproducible reply selection
    #[arg(long, conflicts_with = "deterministic")]
    seed: Option<u64>,
    /// Always play the first listed reply
    #[arg(long)]
    deterministic: bool,
}

impl SelectorArg {
    pub(crate) fn policy(&self) -> SelectorPolicy {
        match (self.deterministic, self.seed) {
            (true, _) => SelectorPolicy::First,
            (false, Some(seed)) => SelectorPolicy::Seeded(ReplySeed::from(seed)),
            (false, None) => SelectorPolicy::Random,
        }
    }
}

/// Rule options shared by every command that runs a session.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RulesArg {
    /// Maximum number of mistakes that can be taken back
    #[arg(long, default_value_t = 32)]
    undo_limit: usize,
    /// Whether a pawn's double step needs the passed-over square to be empty
    #[arg(long, value_enum, default_value_t)]
    pawn_double_step: PawnDoubleStepArg,
}

impl Default for RulesArg {
    fn default() -> Self {
        Self {
            undo_limit: SessionConfig::default().undo_limit,
            pawn_double_step: PawnDoubleStepArg::default(),
        }
    }
}

impl RulesArg {
    /// Replaces the rule settings of `config`.
    pub(crate) fn apply(&self, config: SessionConfig) -> SessionConfig {
        SessionConfig {
            undo_limit: self.undo_limit,
            pawn_double_step: self.pawn_double_step.into(),
            ..config
        }
    }
}

/// Timing and rule options of a training session.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SessionArg {
    /// Delay before the automated reply, in milliseconds
    #[arg(long, default_value_t = 1600)]
    reply_delay_ms: u64,
    /// How long incorrect-move feedback is shown, in milliseconds
    #[arg(long, default_value_t = 3000)]
    feedback_ms: u64,
    #[clap(flatten)]
    rules: RulesArg,
}

impl Default for SessionArg {
    fn default() -> Self {
        let config = SessionConfig::default();
        Self {
            reply_delay_ms: duration_ms(config.reply_delay),
            feedback_ms: duration_ms(config.feedback_duration),
            rules: RulesArg::default(),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl SessionArg {
    pub(crate) fn config(&self) -> SessionConfig {
        self.rules.apply(SessionConfig {
            reply_delay: Duration::from_millis(self.reply_delay_ms),
            feedback_duration: Duration::from_millis(self.feedback_ms),
            ..SessionConfig::default()
        })
    }
}
