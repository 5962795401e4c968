use std::str::FromStr;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use tracing::{info, warn};

use crate::config::{Config, DatabaseTarget};

const CREATE_TODOS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        completed BOOLEAN DEFAULT FALSE,
        created_at TIMESTAMPTZ DEFAULT NOW()
    )
"#;

pub fn connect_options(config: &Config) -> Result<PgConnectOptions, sqlx::Error> {
    let options = match &config.database {
        DatabaseTarget::Url(url) => PgConnectOptions::from_str(url)?,
        DatabaseTarget::Params {
            host,
            port,
            user,
            password,
            database,
        } => {
            let options = PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .database(database);
            match password {
                Some(password) => options.password(password),
                None => options,
            }
        }
    };

    if config.ssl_no_verify {
        warn!("DB_SSL_NO_VERIFY is set: database TLS certificates will not be verified");
        Ok(options.ssl_mode(PgSslMode::Require))
    } else {
        Ok(options)
    }
}

/// Builds the shared pool. Each query checks out a connection for its own
/// round trip only.
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(config)?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    info!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}

pub async fn init_schema(db: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TODOS_TABLE).execute(db).await?;
    Ok(())
}
