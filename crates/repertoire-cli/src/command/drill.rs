use std::{path::PathBuf, str::FromStr};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use repertoire_engine::{
    AttemptOutcome, Move, ParseMoveError, ReplySeed, SelectorPolicy, SessionConfig, SessionView,
    Trainer, TrainingSession,
};
use serde::Serialize;

use super::{BookArg, RulesArg, SelectorArg};
use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DrillArg {
    /// Opening to drill
    #[arg(long)]
    opening: String,
    /// Trainee inputs in order: moves like `e2-e4`, or `undo`
    #[arg(value_name = "MOVE", value_delimiter = ',')]
    moves: Vec<String>,
    #[clap(flatten)]
    book: BookArg,
    #[clap(flatten)]
    selector: SelectorArg,
    #[clap(flatten)]
    pub(super) rules: RulesArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrillInput {
    Move(Move),
    Undo,
}

impl FromStr for DrillInput {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "undo" => Ok(Self::Undo),
            s => s.parse().map(Self::Move),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct DrillReport {
    opening: String,
    /// Seed of the automated side; absent when it always plays the first reply.
    seed: Option<ReplySeed>,
    played_at: DateTime<Utc>,
    steps: Vec<DrillStep>,
    session: SessionView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct DrillStep {
    input: String,
    #[serde(flatten)]
    result: StepResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum StepResult {
    Move(AttemptOutcome),
    Undo { undone: bool },
}

pub(crate) fn run(arg: &DrillArg) -> anyhow::Result<()> {
    let inputs = arg
        .moves
        .iter()
        .map(|s| {
            s.parse::<DrillInput>()
                .with_context(|| format!("Invalid move: {s:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    // Fix the seed up front so the report can reproduce the run.
    let seed = match arg.selector.policy() {
        SelectorPolicy::Random => Some(rand::random::<ReplySeed>()),
        SelectorPolicy::Seeded(seed) => Some(seed),
        SelectorPolicy::First => None,
    };
    let policy = seed.map_or(SelectorPolicy::First, SelectorPolicy::Seeded);
    let config = arg.rules.apply(SessionConfig::immediate());

    let mut trainer = Trainer::new(arg.book.load()?, config, policy);
    let session = trainer
        .start_training(&arg.opening)
        .with_context(|| format!("Failed to start drill for {:?}", arg.opening))?;
    let steps = drill(session, &inputs);

    let report = DrillReport {
        opening: arg.opening.clone(),
        seed,
        played_at: Utc::now(),
        steps,
        session: session.view(),
    };
    Output::save_json(&report, arg.output.clone())?;

    eprintln!();
    eprintln!("Drill finished");
    eprintln!("  Opening: {}", report.session.opening);
    eprintln!("  Score: {}", report.session.score);
    if let Some(accuracy) = report.session.score.accuracy() {
        eprintln!("  Accuracy: {:.1}%", accuracy * 100.0);
    }
    eprintln!("  Phase: {}", report.session.phase);
    Ok(())
}

fn drill(session: &mut TrainingSession, inputs: &[DrillInput]) -> Vec<DrillStep> {
    inputs
        .iter()
        .map(|input| {
            let step = match *input {
                DrillInput::Move(mv) => DrillStep {
                    input: mv.to_string(),
                    result: StepResult::Move(session.attempt_move(mv.from(), mv.to())),
                },
                DrillInput::Undo => DrillStep {
                    input: "undo".to_owned(),
                    result: StepResult::Undo {
                        undone: session.undo(),
                    },
                },
            };
            session.settle();
            step
        })
        .collect()
}
