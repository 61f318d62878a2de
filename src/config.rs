use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SqlAdapterError;

/// Character set requested when none is configured.
pub const DEFAULT_CHARSET: &str = "utf8mb4";

/// A connection setting a connector may insist on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Host,
    Database,
    Username,
    Password,
}

impl Setting {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Setting::Host => "host",
            Setting::Database => "database",
            Setting::Username => "username",
            Setting::Password => "password",
        }
    }
}

/// Settings handed to a [`Connector`](crate::connection::Connector).
///
/// Deserializes from JSON (or any serde format); the password is never serialized back
/// out:
/// ```rust
/// use sql_adapter::prelude::*;
///
/// let settings: ConnectionSettings =
///     serde_json::from_str(r#"{"host": "db", "database": "app", "username": "svc"}"#)?;
/// assert_eq!(settings.charset, "utf8mb4");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default = "default_charset")]
    pub charset: String,
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: None,
            database: None,
            username: None,
            password: None,
            charset: default_charset(),
        }
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("charset", &self.charset)
            .finish()
    }
}

impl ConnectionSettings {
    #[must_use]
    pub fn builder() -> ConnectionSettingsBuilder {
        ConnectionSettingsBuilder::default()
    }

    /// The value of `setting`, treating blank strings as missing.
    #[must_use]
    pub fn get(&self, setting: Setting) -> Option<&str> {
        let value = match setting {
            Setting::Host => self.host.as_deref(),
            Setting::Database => self.database.as_deref(),
            Setting::Username => self.username.as_deref(),
            Setting::Password => self.password.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Check that every setting in `required` is present.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConfigError` naming the first missing setting.
    pub fn require(&self, required: &[Setting]) -> Result<(), SqlAdapterError> {
        match required.iter().find(|s| self.get(**s).is_none()) {
            Some(missing) => Err(SqlAdapterError::ConfigError(format!(
                "missing mandatory connection setting `{}`",
                missing.name()
            ))),
            None => Ok(()),
        }
    }
}

/// Fluent builder for [`ConnectionSettings`].
#[derive(Debug, Clone, Default)]
pub struct ConnectionSettingsBuilder {
    settings: ConnectionSettings,
}

impl ConnectionSettingsBuilder {
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.settings.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.settings.database = Some(database.into());
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.settings.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.settings.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.settings.charset = charset.into();
        self
    }

    #[must_use]
    pub fn finish(self) -> ConnectionSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_names_first_missing_setting() {
        let settings = ConnectionSettings::builder().host("db").username("  ").finish();
        let err = settings
            .require(&[Setting::Host, Setting::Username, Setting::Database])
            .unwrap_err();
        assert!(matches!(err, SqlAdapterError::ConfigError(ref msg) if msg.contains("username")));
    }

    #[test]
    fn password_is_not_serialized() {
        let settings = ConnectionSettings::builder()
            .host("db")
            .password("hunter2")
            .finish();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("utf8mb4"));
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
