//! Process settings loaded via OrthoConfig.
//!
//! Values come from `MONGODB_*` and `COURSENOTE_*` environment variables or a
//! configuration file. The binary passes only its program name, so no CLI
//! flags are parsed.
//!
//! The database name is read from `MONGODB_DB_NAME`. Deployments that still
//! export the older `DB_NAME` variable keep working: it is used when
//! `MONGODB_DB_NAME` is unset.

use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::error;

use crate::outbound::persistence::{ConnectionConfig, DEFAULT_DB_NAME};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Older environment variable naming the database.
pub const LEGACY_DB_NAME_VAR: &str = "DB_NAME";

/// Read the legacy database name, ignoring blank values.
pub fn legacy_db_name() -> Option<String> {
    std::env::var(LEGACY_DB_NAME_VAR)
        .ok()
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
}

/// Log a settings failure and turn it into the error `main` returns.
pub fn settings_error(section: &str, err: impl Display) -> std::io::Error {
    error!(error = %err, section, "invalid settings");
    std::io::Error::other(format!("invalid {section} settings: {err}"))
}

/// Location of the MongoDB deployment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MONGODB")]
pub struct MongoSettings {
    /// Connection string. Required.
    pub uri: String,
    /// Database name; defaults to `coursenote_db`.
    pub db_name: Option<String>,
}

impl MongoSettings {
    /// Use `fallback` as the database name when none was configured.
    #[must_use]
    pub fn with_db_name_fallback(mut self, fallback: Option<String>) -> Self {
        if self.db_name.is_none() {
            self.db_name = fallback;
        }
        self
    }

    /// Return the configured database name, falling back to the default.
    pub fn db_name(&self) -> &str {
        self.db_name.as_deref().unwrap_or(DEFAULT_DB_NAME)
    }

    /// Connection settings for the persistence adapter.
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(self.uri.as_str()).with_db_name(self.db_name())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSENOTE")]
pub struct ServerSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// TCP port; defaults to 8080.
    pub port: Option<u16>,
}

impl ServerSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn program_args() -> [OsString; 1] {
        [OsString::from("coursenote")]
    }

    #[rstest]
    fn mongo_uri_is_required() {
        let _guard = lock_env([
            ("MONGODB_URI", None::<String>),
            ("MONGODB_DB_NAME", None::<String>),
        ]);

        assert!(MongoSettings::load_from_iter(program_args()).is_err());
    }

    #[rstest]
    fn mongo_database_defaults_when_missing() {
        let _guard = lock_env([
            ("MONGODB_URI", Some("mongodb://localhost:27017".to_owned())),
            ("MONGODB_DB_NAME", None::<String>),
            ("DB_NAME", None::<String>),
        ]);

        let settings = MongoSettings::load_from_iter(program_args()).expect("config should load");

        assert_eq!(settings.uri, "mongodb://localhost:27017");
        assert_eq!(settings.db_name(), DEFAULT_DB_NAME);
        assert_eq!(settings.connection_config().db_name(), DEFAULT_DB_NAME);
    }

    #[rstest]
    fn mongo_database_override_is_respected() {
        let _guard = lock_env([
            ("MONGODB_URI", Some("mongodb://db:27017".to_owned())),
            ("MONGODB_DB_NAME", Some("coursenote_test".to_owned())),
        ]);

        let settings = MongoSettings::load_from_iter(program_args()).expect("config should load");

        assert_eq!(settings.db_name(), "coursenote_test");
    }

    #[rstest]
    fn legacy_database_variable_is_used_when_prefixed_one_is_unset() {
        let _guard = lock_env([
            ("MONGODB_URI", Some("mongodb://db:27017".to_owned())),
            ("MONGODB_DB_NAME", None::<String>),
            ("DB_NAME", Some("course_notes".to_owned())),
        ]);

        let settings = MongoSettings::load_from_iter(program_args())
            .expect("config should load")
            .with_db_name_fallback(legacy_db_name());

        assert_eq!(settings.db_name(), "course_notes");
        assert_eq!(settings.connection_config().db_name(), "course_notes");
    }

    #[rstest]
    fn prefixed_database_variable_beats_legacy_one() {
        let _guard = lock_env([
            ("MONGODB_URI", Some("mongodb://db:27017".to_owned())),
            ("MONGODB_DB_NAME", Some("coursenote_test".to_owned())),
            ("DB_NAME", Some("course_notes".to_owned())),
        ]);

        let settings = MongoSettings::load_from_iter(program_args())
            .expect("config should load")
            .with_db_name_fallback(legacy_db_name());

        assert_eq!(settings.db_name(), "coursenote_test");
    }

    #[rstest]
    fn blank_legacy_database_variable_is_ignored() {
        let _guard = lock_env([("DB_NAME", Some("   ".to_owned()))]);

        assert_eq!(legacy_db_name(), None);
    }

    #[rstest]
    fn settings_error_names_the_section_and_carries_the_cause() {
        let err = settings_error("MongoDB", "invalid type for `db_name`");

        assert_eq!(err.kind(), std::io::ErrorKind::Other);
        assert_eq!(
            err.to_string(),
            "invalid MongoDB settings: invalid type for `db_name`"
        );
    }

    #[rstest]
    fn missing_uri_is_reported_as_invalid_mongo_settings() {
        let _guard = lock_env([
            ("MONGODB_URI", None::<String>),
            ("MONGODB_DB_NAME", None::<String>),
        ]);

        let err = MongoSettings::load_from_iter(program_args())
            .map_err(|err| settings_error("MongoDB", err))
            .expect_err("uri is required");

        assert!(err.to_string().starts_with("invalid MongoDB settings: "));
    }

    #[rstest]
    fn server_defaults_to_all_interfaces_on_8080() {
        let _guard = lock_env([
            ("COURSENOTE_HOST", None::<String>),
            ("COURSENOTE_PORT", None::<String>),
        ]);

        let settings = ServerSettings::load_from_iter(program_args()).expect("config should load");

        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[rstest]
    fn server_environment_overrides_are_respected() {
        let _guard = lock_env([
            ("COURSENOTE_HOST", Some("127.0.0.1".to_owned())),
            ("COURSENOTE_PORT", Some("9090".to_owned())),
        ]);

        let settings = ServerSettings::load_from_iter(program_args()).expect("config should load");

        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 9090)));
    }
}
