//! Database credential collection.
//!
//! Five values, prompted once in a fixed order. Host, user and database
//! name are required; the port defaults to 3306 when left blank. There is
//! no retry loop: an empty required field aborts the whole run before the
//! configuration file is touched.
//!
//! The password is held only in process memory and never logged; the
//! `Debug` impl redacts it.

use std::fmt;

use crate::error::{BerthError, Result};
use crate::ui::{Prompt, UserInterface};

/// Default MySQL port used when the port prompt is left blank.
pub const DEFAULT_PORT: u16 = 3306;

/// Database connection parameters destined for `config.yaml`.
#[derive(Clone, PartialEq, Eq)]
pub struct DbCredentials {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Collect credentials through the UI and validate them.
pub fn collect(ui: &mut dyn UserInterface) -> Result<DbCredentials> {
    let host = ui.prompt(&Prompt::input("db_host", "Database host"))?;
    let port = ui.prompt(
        &Prompt::input("db_port", "Database port").with_default(&DEFAULT_PORT.to_string()),
    )?;
    let user = ui.prompt(&Prompt::input("db_user", "Database user"))?;
    let password = ui.prompt(&Prompt::password("db_password", "Database password"))?;
    let database = ui.prompt(&Prompt::input("db_name", "Database name"))?;

    let host = require("host", host)?;
    let user = require("user", user)?;
    let database = require("database", database)?;
    let port = parse_port(&port)?;

    Ok(DbCredentials {
        host,
        port,
        user,
        password,
        database,
    })
}

fn require(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BerthError::MissingRequiredField {
            field: field.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// A blank port is never an error; anything non-blank must be numeric.
fn parse_port(value: &str) -> Result<u16> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_PORT);
    }
    trimmed
        .parse::<u16>()
        .map_err(|_| BerthError::InvalidFieldValue {
            field: "port".to_string(),
            value: trimmed.to_string(),
        })
}
