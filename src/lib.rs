use std::path::PathBuf;

use sqlx::SqlitePool;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{db, utils};

use repositories::sqlx_repo::SqlxPostRepo;
use settings::{AppConfig, PublishKey};
use use_cases::posts::PostHandler;

/// Everything handlers share. The pool inside is the only database handle in
/// the process; it is safe for concurrent use and closed by `main` on shutdown.
pub struct AppState {
    pub post_handler: AppPostHandler,
    pub publish_key: PublishKey,
    pub index_path: PathBuf,
}

pub type AppPostHandler = PostHandler<SqlxPostRepo>;

impl AppState {
    pub fn new(config: &AppConfig, pool: SqlitePool) -> Self {
        let post_repo = SqlxPostRepo::new(pool);
        let post_handler = PostHandler::new(post_repo);

        AppState {
            post_handler,
            publish_key: PublishKey::from(config),
            index_path: config.index_path(),
        }
    }
}
