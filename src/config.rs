use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub api_port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let user = std::env::var("POSTGRES_USER").context("POSTGRES_USER is not set")?;
        let password =
            std::env::var("POSTGRES_PASSWORD").context("POSTGRES_PASSWORD is not set")?;
        let db_name = std::env::var("POSTGRES_DB").context("POSTGRES_DB is not set")?;
        let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
        let db_port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".into());

        let api_port = std::env::var("API_PORT")
            .unwrap_or_else(|_| "8888".into())
            .parse::<u16>()
            .context("API_PORT is not a valid port number")?;

        Ok(Self {
            database_url: format!(
                "postgres://{}:{}@{}:{}/{}",
                user, password, host, db_port, db_name
            ),
            api_port,
        })
    }
}
