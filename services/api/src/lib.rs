mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use medigap_quotes::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
