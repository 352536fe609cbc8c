pub mod agent;
pub mod chat;
pub mod config_manager;
pub mod error;
pub mod routes;
pub mod state;
pub mod translate;

pub use error::{AppError, ConfigurationError};
pub use routes::build_app;
pub use state::AppState;
