mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use cop_backoffice::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
