mod cli;
mod demo;
mod infra;

use doc_wizard::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
