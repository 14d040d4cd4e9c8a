pub mod config;
pub mod error;
pub mod routes;
pub mod schema;

pub use config::ServerConfig;
pub use error::{ApiError, ServerErr};
pub use routes::{configure, cors};
