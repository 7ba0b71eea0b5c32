mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use income_sentinel::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
