use log::LevelFilter;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::env;

/// Connections kept in the pool unless `DATABASE_MAX_CONNECTIONS` says otherwise
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Creates a database connection from `DATABASE_URL` (a `.env` file is honoured)
pub async fn create_connection() -> Result<DatabaseConnection, DbErr> {
    dotenvy::dotenv().ok();

    let url = env::var("DATABASE_URL")
        .map_err(|_| DbErr::Custom("DATABASE_URL must be set".to_string()))?;

    let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(value) => value.parse().map_err(|_| {
            DbErr::Custom(format!("Invalid DATABASE_MAX_CONNECTIONS: {value}"))
        })?,
        Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(max_connections)
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(options).await
}
