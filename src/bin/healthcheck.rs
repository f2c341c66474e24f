//! Container health check: exits 0 only when the local server answers
//! `GET /health` with 204 No Content.

use std::process::ExitCode;
use std::time::Duration;

use reqwest::StatusCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let port = std::env::var("SERVER_PORT").unwrap_or_else(|_| "8080".to_string());
    let url = format!("http://127.0.0.1:{port}/health");

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(client) => client,
        Err(_) => return ExitCode::FAILURE,
    };

    match client.get(&url).send().await {
        Ok(response) if response.status() == StatusCode::NO_CONTENT => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
