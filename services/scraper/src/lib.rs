mod cli;
mod prompt;
mod report;
mod scrape;

use kenya_jobs::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
