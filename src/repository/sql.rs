use super::entities::Record;
use super::error::{RepositoryError, Result};
use super::interface::RepositoryProvider;
use super::migrations::COMMANDS;
use chrono::Utc;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use sqlx::Connection;
use std::io::{Error, ErrorKind};
use std::str::FromStr;
use std::time::Duration;

/// Warehouse serves access to the PostgreSQL records table over a single connection.
///
#[derive(Debug, Clone)]
pub struct Warehouse {
    pool: PgPool,
}

impl Warehouse {
    /// Creates a new Warehouse connected to PostgreSQL and verifies the connection is alive.
    ///
    pub async fn new(connection_str: &str, acquire_timeout: Duration) -> Result<Self> {
        let options = connect_options(connection_str).map_err(RepositoryError::Connection)?;

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await
            .map_err(RepositoryError::Connection)?;

        let mut conn = pool.acquire().await.map_err(RepositoryError::Connection)?;
        conn.ping().await.map_err(RepositoryError::Connection)?;

        Ok(Self { pool })
    }
}

/// Parses either a `postgres://` URL or a libpq `key=value` list like
/// `host=localhost port=5432 user=u password=p dbname=db sslmode=disable`.
///
fn connect_options(connection_str: &str) -> std::result::Result<PgConnectOptions, sqlx::Error> {
    if connection_str.contains("://") {
        return PgConnectOptions::from_str(connection_str);
    }

    let mut options = PgConnectOptions::new();
    for pair in connection_str.split_whitespace() {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(sqlx::Error::Configuration(
                format!("expected key=value, got: {}", pair).into(),
            ));
        };
        let value = value.trim_matches('\'');
        options = match key {
            "host" => options.host(value),
            "port" => {
                let Ok(port) = value.parse::<u16>() else {
                    return Err(sqlx::Error::Configuration(
                        format!("invalid port: {}", value).into(),
                    ));
                };
                options.port(port)
            }
            "user" => options.username(value),
            "password" => options.password(value),
            "dbname" => options.database(value),
            "sslmode" => options.ssl_mode(PgSslMode::from_str(value)?),
            "application_name" => options.application_name(value),
            _ => {
                return Err(sqlx::Error::Configuration(
                    format!("unsupported connection parameter: {}", key).into(),
                ))
            }
        };
    }

    Ok(options)
}

impl RepositoryProvider for Warehouse {
    async fn migrate(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await.map_err(RepositoryError::Schema)?;
        for migration in COMMANDS {
            sqlx::query(migration)
                .execute(&mut *conn)
                .await
                .map_err(RepositoryError::Schema)?;
        }
        Ok(())
    }

    /// Inserts a single record stamped with the current time.
    ///
    async fn insert_record(&self, message: &str) -> Result<()> {
        if message.is_empty() {
            return Err(RepositoryError::Insert(sqlx::Error::Io(Error::new(
                ErrorKind::InvalidInput,
                "message must not be empty",
            ))));
        }

        sqlx::query("INSERT INTO records (message, timestamp) VALUES ($1, $2)")
            .bind(message)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::Insert)?;

        Ok(())
    }

    async fn count_records(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::Count)
    }

    /// Gets the newest records, newest first.
    ///
    async fn recent_records(&self, limit: i64) -> Result<Vec<Record>> {
        sqlx::query_as::<_, Record>(
            "SELECT id, message, timestamp FROM records ORDER BY timestamp DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::Recent)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
