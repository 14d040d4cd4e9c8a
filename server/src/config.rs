use std::{env, num::NonZeroUsize, path::Path, path::PathBuf};

use crate::error::{Result, ServerErr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL_PATH: &str = "scratch_model.safetensors";
const DEFAULT_STATIC_DIR: &str = "static";

/// Immutable startup settings of the prediction server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    host: String,
    port: u16,
    model_path: PathBuf,
    static_dir: PathBuf,
    workers: Option<NonZeroUsize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            workers: None,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Returns
    /// A `ServerConfig` with defaults for every unset variable, or a `ServerErr::Config`
    /// if a variable is set to something unusable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration out of an arbitrary key lookup.
    ///
    /// # Args
    /// * `lookup` - Returns the value of a variable, if set.
    ///
    /// # Returns
    /// A `ServerConfig` instance or a `ServerErr::Config`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ServerErr::Config { key: "PORT", value: port })?;
        }

        if let Some(path) = lookup("MODEL_PATH") {
            config.model_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        if let Some(workers) = lookup("WORKERS") {
            let parsed = workers.parse().map_err(|_| ServerErr::Config {
                key: "WORKERS",
                value: workers,
            })?;
            config.workers = Some(parsed);
        }

        Ok(config)
    }

    /// Returns the `host:port` address to bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Returns the amount of HTTP worker threads, `None` meaning one per core.
    pub fn workers(&self) -> Option<NonZeroUsize> {
        self.workers
    }
}
