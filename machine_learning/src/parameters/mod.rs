mod error;
mod loader;
mod store;

pub use error::{LoadErr, Result};
pub use store::ParameterStore;
