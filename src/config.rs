//! Credential resolution for the Roanuz Football API
//!
//! Each credential is resolved from an explicit argument first, then from its
//! named environment variable. A credential that is found in neither place
//! fails construction with [`RfaError::MissingCredential`] naming the field.

use crate::error::{Result, RfaError};

pub const ACCESS_KEY_ENV_VAR: &str = "RFA_ACCESS_KEY";
pub const SECRET_KEY_ENV_VAR: &str = "RFA_SECRET_KEY";
pub const APP_ID_ENV_VAR: &str = "RFA_APP_ID";

/// The three credentials required by the auth endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub app_id: String,
}

impl Credentials {
    /// Resolve all three credentials, preferring explicit values over the
    /// environment.
    pub fn resolve(
        access_key: Option<String>,
        secret_key: Option<String>,
        app_id: Option<String>,
    ) -> Result<Self> {
        Ok(Credentials {
            access_key: resolve_field(access_key, "access_key", ACCESS_KEY_ENV_VAR)?,
            secret_key: resolve_field(secret_key, "secret_key", SECRET_KEY_ENV_VAR)?,
            app_id: resolve_field(app_id, "app_id", APP_ID_ENV_VAR)?,
        })
    }
}

fn resolve_field(
    explicit: Option<String>,
    field: &'static str,
    env_var: &'static str,
) -> Result<String> {
    if let Some(value) = explicit {
        return Ok(value);
    }
    std::env::var(env_var)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(RfaError::MissingCredential { field, env_var })
}
