use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory for the JSON file store. When unset the server runs
    /// in-memory with the demo seed.
    pub storage_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            storage_path: env::var("STORAGE_PATH").ok().map(PathBuf::from),
        }
    }
}
