mod cli;
mod commands;
mod infra;

use property_scorer::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
