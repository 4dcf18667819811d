//! Command line options

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Database file used when `--db` is not given
pub const DEFAULT_DATABASE: &str = "test.sqlite3";

/// Serve an SQLite database file through a web viewer
#[derive(Parser, Debug)]
#[command(name = "sqlite-viewer")]
#[command(version)]
#[command(about = "Web viewer for SQLite database files", long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[arg(long = "db", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// HTTP server host
    #[arg(long = "bind", default_value = "localhost")]
    pub bind: String,

    /// HTTP server listen port
    #[arg(long = "listen", default_value_t = 8000)]
    pub listen: u16,

    /// URL path the viewer is mounted under
    #[arg(long = "root", default_value = "/")]
    pub root: String,

    /// Rows returned when browsing a table
    #[arg(long = "page-size", default_value_t = 100)]
    pub page_size: u32,

    /// Seconds a single database operation may run
    #[arg(long = "query-timeout", default_value_t = 30)]
    pub query_timeout: u64,

    /// Print program license and exit
    #[arg(long = "license")]
    pub license: bool,
}

impl Cli {
    /// Address to bind the HTTP listener to
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.listen)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }

    /// Whether `--db` was left at a default that does not exist
    pub fn uses_missing_default(&self) -> bool {
        self.database.as_os_str() == DEFAULT_DATABASE && !self.database.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["sqlite-viewer"]);
        assert_eq!(cli.database, PathBuf::from("test.sqlite3"));
        assert_eq!(cli.address(), "localhost:8000");
        assert_eq!(cli.root, "/");
        assert_eq!(cli.page_size, 100);
        assert_eq!(cli.query_timeout(), Duration::from_secs(30));
        assert!(!cli.license);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "sqlite-viewer",
            "--db",
            "shop.db",
            "--bind",
            "0.0.0.0",
            "--listen",
            "9000",
            "--root",
            "/viewer",
            "--page-size",
            "25",
        ]);
        assert_eq!(cli.database, PathBuf::from("shop.db"));
        assert_eq!(cli.address(), "0.0.0.0:9000");
        assert_eq!(cli.root, "/viewer");
        assert_eq!(cli.page_size, 25);
        assert!(!cli.uses_missing_default());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["sqlite-viewer", "--listen", "99999"]).is_err());
    }
}
