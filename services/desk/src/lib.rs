mod cli;
mod demo;
mod infra;
mod replay;

use registration_form::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
