use crate::commands::{run_config, run_defaults, run_score, run_weights};
use crate::infra::AppContext;
use clap::{Args, Parser, Subcommand};
use property_scorer::error::AppError;
use property_scorer::scorecard::SelectionOverride;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "property-scorer",
    about = "Score a candidate property against a weighted, editable rubric",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Score a property, starting from the rubric's default selections
    Score(ScoreArgs),
    /// Show each metric's raw weight and share of the total
    Weights(RubricArgs),
    /// Show the starting selection for every metric
    Defaults(RubricArgs),
    /// Inspect, validate, import, or reset the stored rubric
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct RubricArgs {
    /// Score against a rubric file instead of the stored rubric
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Property title shown in the summary
    #[arg(long, default_value = "")]
    pub(crate) title: String,
    /// Override a selection, e.g. --select primary_school=4_star (repeatable)
    #[arg(long = "select", value_name = "METRIC=OPTION")]
    pub(crate) selections: Vec<SelectionOverride>,
    /// Print the result and summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) rubric: RubricArgs,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ConfigCommand {
    /// Print the active rubric as JSON
    Show,
    /// Check a rubric file without storing it
    Validate {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Validate a rubric file and store it as the active rubric
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Forget the stored rubric and fall back to the built-in defaults
    Reset,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let context = AppContext::init()?;

    match cli.command {
        Command::Score(args) => run_score(&context, args),
        Command::Weights(args) => run_weights(&context, args),
        Command::Defaults(args) => run_defaults(&context, args),
        Command::Config { command } => run_config(&context, command),
    }
}
