use crate::cli::{ConfigCommand, RubricArgs, ScoreArgs};
use crate::infra::{print_json, read_rubric, AppContext};
use property_scorer::error::AppError;
use property_scorer::scorecard::{
    apply_overrides, initial_selections, selection::starting_option, weight_shares, ScoreEngine,
    ScoreResult, ScorecardSummary,
};
use serde::Serialize;
use std::fs;
use tracing::info;

#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    result: &'a ScoreResult,
    summary: &'a ScorecardSummary,
}

pub(crate) fn run_score(context: &AppContext, args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        title,
        selections,
        json,
        rubric,
    } = args;

    let rubric = context.rubric(rubric.config.as_deref())?;
    let chosen = apply_overrides(&rubric, initial_selections(&rubric), &selections)?;
    let result = ScoreEngine::new(&rubric).score(&chosen);
    let summary = ScorecardSummary::build(&title, &rubric, &chosen, &result);

    info!(
        status = %result.status,
        score = result.score,
        overrides = selections.len(),
        "scored property"
    );

    if json {
        return print_json(&ScoreReport {
            result: &result,
            summary: &summary,
        });
    }

    println!("{summary}");
    Ok(())
}

pub(crate) fn run_weights(context: &AppContext, args: RubricArgs) -> Result<(), AppError> {
    let rubric = context.rubric(args.config.as_deref())?;
    let shares = weight_shares(&rubric);
    let width = shares
        .iter()
        .map(|share| share.label.chars().count())
        .max()
        .unwrap_or(0);

    println!("Weight source: {}", rubric.weight_layout().label());
    for share in &shares {
        println!(
            "{:<width$}  {:>7} -> {:>6.2}%",
            share.label,
            share.raw,
            share.percentage,
            width = width
        );
    }
    Ok(())
}

pub(crate) fn run_defaults(context: &AppContext, args: RubricArgs) -> Result<(), AppError> {
    let rubric = context.rubric(args.config.as_deref())?;

    for (metric_id, metric) in rubric.metrics.iter() {
        match starting_option(metric) {
            Some(option) => println!(
                "{metric_id}={} ({}, {}×)",
                option.id, option.label, option.value
            ),
            None => println!("{metric_id}: no starting option (every option is a deal breaker)"),
        }
    }
    Ok(())
}

pub(crate) fn run_config(context: &AppContext, command: ConfigCommand) -> Result<(), AppError> {
    match command {
        ConfigCommand::Show => print_json(&context.service.config()?),
        ConfigCommand::Validate { path } => {
            let rubric = read_rubric(&path, context)?;
            println!(
                "{} is valid: {} metrics using {}",
                path.display(),
                rubric.metrics.len(),
                rubric.weight_layout().label()
            );
            Ok(())
        }
        ConfigCommand::Import { path } => {
            let raw = fs::read_to_string(&path)?;
            let stored = context.service.import_config(&raw)?;
            println!(
                "Stored rubric with {} metrics under key '{}' ({})",
                stored.metrics.len(),
                context.config.storage.config_key,
                context.store.path().display()
            );
            Ok(())
        }
        ConfigCommand::Reset => {
            let defaults = context.service.reset_config()?;
            println!(
                "Cleared stored rubric; using built-in defaults ({} metrics)",
                defaults.metrics.len()
            );
            Ok(())
        }
    }
}
