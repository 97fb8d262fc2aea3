//! Lazily established, process-wide MongoDB connection.
//!
//! [`MongoConnection`] holds the connection string and database name and
//! creates the client on first use. A successful connection is cached for the
//! life of the value; a failed attempt caches nothing, so the next caller
//! retries. Concurrent first callers wait on the same initialisation.

use mongodb::bson::doc;
use mongodb::{Client, Database};
use tokio::sync::OnceCell;
use tracing::{error, info};

/// Database used when none is configured.
pub const DEFAULT_DB_NAME: &str = "coursenote_db";

/// Errors raised while establishing the connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The connection string was rejected or the client could not be built.
    #[error("failed to create MongoDB client: {message}")]
    Client { message: String },

    /// The server did not answer the initial ping.
    #[error("MongoDB did not respond to ping: {message}")]
    Ping { message: String },
}

impl ConnectionError {
    /// Create a client construction error with the given message.
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Create a ping failure with the given message.
    pub fn ping(message: impl Into<String>) -> Self {
        Self::Ping {
            message: message.into(),
        }
    }
}

/// Location of the document database.
///
/// # Example
///
/// ```ignore
/// let config = ConnectionConfig::new("mongodb://localhost:27017")
///     .with_db_name("coursenote_test");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    uri: String,
    db_name: String,
}

impl ConnectionConfig {
    /// Create a configuration for the given connection string using
    /// [`DEFAULT_DB_NAME`].
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            db_name: DEFAULT_DB_NAME.to_owned(),
        }
    }

    /// Override the database name.
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    /// Connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database name.
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

/// Shared handle to the MongoDB deployment.
#[derive(Debug)]
pub struct MongoConnection {
    config: ConnectionConfig,
    client: OnceCell<Client>,
}

impl MongoConnection {
    /// Record the connection settings. No I/O happens until first use.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Connection settings.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// True once a connection has been established.
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    /// Return the configured database, connecting on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] when the client cannot be created or the
    /// server does not answer. Nothing is cached on failure.
    pub async fn database(&self) -> Result<Database, ConnectionError> {
        let client = self
            .client
            .get_or_try_init(|| self.establish())
            .await?;
        Ok(client.database(self.config.db_name()))
    }

    async fn establish(&self) -> Result<Client, ConnectionError> {
        let client = Client::with_uri_str(self.config.uri())
            .await
            .map_err(|err| {
                error!(error = %err, "failed to create MongoDB client");
                ConnectionError::client(err.to_string())
            })?;

        client
            .database(self.config.db_name())
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| {
                error!(error = %err, db_name = self.config.db_name(), "MongoDB ping failed");
                ConnectionError::ping(err.to_string())
            })?;

        info!(db_name = self.config.db_name(), "connected to MongoDB");
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_defaults_database_name() {
        let config = ConnectionConfig::new("mongodb://localhost:27017");

        assert_eq!(config.uri(), "mongodb://localhost:27017");
        assert_eq!(config.db_name(), DEFAULT_DB_NAME);
    }

    #[rstest]
    fn config_accepts_database_override() {
        let config = ConnectionConfig::new("mongodb://localhost:27017").with_db_name("coursenote_test");
        assert_eq!(config.db_name(), "coursenote_test");
    }

    #[rstest]
    fn connection_errors_format_messages() {
        assert!(
            ConnectionError::client("invalid scheme")
                .to_string()
                .contains("invalid scheme")
        );
        assert!(
            ConnectionError::ping("timed out")
                .to_string()
                .contains("timed out")
        );
    }

    #[tokio::test]
    async fn failed_connection_is_not_cached() {
        let connection = MongoConnection::new(ConnectionConfig::new("not-a-mongodb-uri"));

        let first = connection.database().await;
        assert!(matches!(first, Err(ConnectionError::Client { .. })));
        assert!(!connection.is_connected());

        let second = connection.database().await;
        assert!(matches!(second, Err(ConnectionError::Client { .. })));
        assert!(!connection.is_connected());
    }
}
