use backend::DatabaseConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Serves the Smart Murti character studio")]
pub struct Cli {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,
    /// JSON file used when no database URL is given
    #[arg(long, default_value = "db.json")]
    pub local_db_path: PathBuf,
    /// PostgreSQL connection string; takes precedence over the local file
    #[arg(long)]
    pub database_url: Option<String>,
}

impl Cli {
    pub fn database_config(&self) -> DatabaseConfig {
        match &self.database_url {
            Some(url) => DatabaseConfig::Postgres { url: url.clone() },
            None => DatabaseConfig::Local {
                path: self.local_db_path.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_file() {
        let cli = Cli::parse_from(["murti-launcher"]);
        assert_eq!(cli.port, 8080);
        assert!(matches!(
            cli.database_config(),
            DatabaseConfig::Local { path } if path == PathBuf::from("db.json")
        ));
    }

    #[test]
    fn database_url_selects_postgres() {
        let cli = Cli::parse_from([
            "murti-launcher",
            "--database-url",
            "postgres://localhost/murti",
        ]);
        assert!(matches!(cli.database_config(), DatabaseConfig::Postgres { .. }));
    }
}
