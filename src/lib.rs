pub mod config;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod upstream;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::PeopleService;

#[derive(Clone)]
pub struct AppState {
    pub service: PeopleService,
    pub config: Config,
}
