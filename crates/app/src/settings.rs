//! Settings of the application, read from `settings.toml` in the working
//! directory and from `EXPENSE_TRACKER__`-prefixed environment variables,
//! e.g. `EXPENSE_TRACKER__SERVER__PORT=8080`.
//!
//! See `settings.toml` for an example.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    /// Path of the database file, created when missing.
    Sqlite(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    String::from("info")
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("EXPENSE_TRACKER").separator("__"))
            .build()?
            .try_deserialize()
    }

    #[cfg(test)]
    fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sqlite_server() {
        let settings = Settings::from_toml(
            r#"
            [app]
            level = "debug"

            [server]
            port = 3000
            database = { sqlite = "./expense_tracker.db" }
            "#,
        )
        .unwrap();

        assert_eq!(settings.app.level, "debug");
        let server = settings.server.unwrap();
        assert_eq!(server.port, 3000);
        assert_eq!(server.bind, None);
        assert_eq!(
            server.database.url(),
            "sqlite:./expense_tracker.db?mode=rwc"
        );
    }

    #[test]
    fn parses_memory_database_and_default_level() {
        let settings = Settings::from_toml(
            r#"
            [server]
            bind = "0.0.0.0"
            port = 8080
            database = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(settings.app.level, "info");
        let server = settings.server.unwrap();
        assert_eq!(server.database, Database::Memory);
        assert_eq!(server.database.url(), "sqlite::memory:");
    }

    #[test]
    fn server_section_is_optional() {
        let settings = Settings::from_toml("[app]\nlevel = \"warn\"").unwrap();
        assert!(settings.server.is_none());
    }
}
