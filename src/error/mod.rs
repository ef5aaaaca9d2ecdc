//! Error taxonomy: transport failures abort a run, persistence failures are
//! recovered by the reporter, everything else is rejected before any call.
mod app;
mod config;
mod persistence;
mod transport;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use persistence::PersistenceError;
pub use transport::TransportError;
pub use validation::ValidationError;
