use std::env;

const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration, sourced from the environment with optional
/// CLI overrides applied on top.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// SQLite connection string. `None` runs the service in mock mode:
    /// seed-list directory data and dry-run dispatch.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a valid port number, got '{}'", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        Ok(Self { port, database_url })
    }

    pub fn with_overrides(mut self, port: Option<u16>, database_url: Option<String>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(database_url) = database_url {
            self.database_url = Some(database_url);
        }
        self
    }
}
