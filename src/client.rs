//! The Roanuz Football API client
//!
//! [`RfaClient`] owns the credentials, the HTTP client and a storage handler,
//! and exposes one thin accessor per API endpoint. All session state (device
//! id, access token, expiry) lives in the storage handler so a token acquired
//! by one process can be reused by the next.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Credentials;
use crate::error::{Result, RfaError};
use crate::storage::{
    FileStorageHandler, StorageHandler, ACCESS_TOKEN_KEY, DEVICE_ID_KEY, EXPIRES_KEY,
};


/// Base path for the Roanuz Football v1 API.
pub const API_BASE_URL: &str = "https://api.footballapi.com/v1/";

/// Default credits/points model for the fantasy endpoints.
pub const DEFAULT_FANTASY_MODEL: &str = "RZ-C-A100";

/// Shape of the `auth` object in a successful auth response.
#[derive(Debug, Deserialize)]
struct AuthSession {
    access_token: String,
    /// Epoch seconds; the API reports this as a number or a string.
    expires: Value,
}

/// How a request is sent by [`RfaClient::get_response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    /// GET with the current access token injected as a query parameter.
    Get,
    /// POST with form-encoded parameters; no token injection.
    Post,
    /// POST with a JSON body; bypasses token logic (the auth call itself).
    Auth,
}

/// Client for the Roanuz Football API.
///
/// Construction validates credentials, resolves a device id and immediately
/// authenticates unless the storage handler already holds a token. Calls are
/// blocking; the client is meant for single-threaded, sequential use.
pub struct RfaClient {
    credentials: Credentials,
    device_id: String,
    api_path: String,
    http: HttpClient,
    store: Box<dyn StorageHandler>,
}

// Manual impl: the storage handler is a trait object and the credentials
// must not end up in logs.
impl fmt::Debug for RfaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RfaClient")
            .field("device_id", &self.device_id)
            .field("api_path", &self.api_path)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RfaClient`].
///
/// Credentials left unset fall back to the `RFA_ACCESS_KEY`,
/// `RFA_SECRET_KEY` and `RFA_APP_ID` environment variables.
#[derive(Default)]
pub struct RfaClientBuilder {
    access_key: Option<String>,
    secret_key: Option<String>,
    app_id: Option<String>,
    device_id: Option<String>,
    api_path: Option<String>,
    store: Option<Box<dyn StorageHandler>>,
}

impl RfaClientBuilder {
    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Use a fixed device id instead of a stored or minted one.
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Override the API base path (defaults to [`API_BASE_URL`]).
    pub fn api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = Some(api_path.into());
        self
    }

    /// Use a custom storage handler instead of the default file-backed one.
    pub fn storage(mut self, store: impl StorageHandler + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Resolve credentials and device id, then authenticate.
    ///
    /// Fails with [`RfaError::MissingCredential`] when a credential is absent
    /// from both the builder and the environment, and with
    /// [`RfaError::AuthFailed`] when the auth endpoint rejects the app
    /// details.
    pub fn build(self) -> Result<RfaClient> {
        let credentials = Credentials::resolve(self.access_key, self.secret_key, self.app_id)?;

        let store = match self.store {
            Some(store) => store,
            None => Box::new(FileStorageHandler::new()?),
        };

        // Supplied id wins, then a previously persisted one, else mint fresh
        let device_id = match self.device_id {
            Some(id) => id,
            None if store.has_value(DEVICE_ID_KEY)? => store.get_value(DEVICE_ID_KEY)?,
            None => store.new_device_id(),
        };
        store.set_value(DEVICE_ID_KEY, &device_id)?;

        let mut api_path = self.api_path.unwrap_or_else(|| API_BASE_URL.to_string());
        if !api_path.ends_with('/') {
            api_path.push('/');
        }

        let http = HttpClient::builder()
            .user_agent(concat!("rfa-football/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let client = RfaClient {
            credentials,
            device_id,
            api_path,
            http,
            store,
        };
        client.auth()?;
        Ok(client)
    }
}

impl RfaClient {
    pub fn builder() -> RfaClientBuilder {
        RfaClientBuilder::default()
    }

    /// Build a client entirely from the environment, with default storage.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    /// The device id sent with auth requests.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Authenticate against the auth endpoint unless a token is already
    /// cached.
    ///
    /// Posts `{access_key, secret_key, app_id, device_id}` as JSON and stores
    /// the returned `access_token` and `expires` values. A response without
    /// an `auth` object fails with [`RfaError::AuthFailed`]; there is no
    /// retry.
    fn auth(&self) -> Result<()> {
        if self.store.has_value(ACCESS_TOKEN_KEY)? {
            return Ok(());
        }

        let url = format!("{}auth/", self.api_path);
        let params = [
            ("access_key", self.credentials.access_key.as_str()),
            ("secret_key", self.credentials.secret_key.as_str()),
            ("app_id", self.credentials.app_id.as_str()),
            ("device_id", self.device_id.as_str()),
        ];
        let response = self.get_response(&url, &params, RequestMethod::Auth)?;

        match response.get("auth") {
            Some(auth) => {
                let session: AuthSession =
                    serde_json::from_value(auth.clone()).map_err(|_| RfaError::AuthFailed)?;
                let expires = match session.expires {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    _ => return Err(RfaError::AuthFailed),
                };
                self.store.set_value(ACCESS_TOKEN_KEY, &session.access_token)?;
                self.store.set_value(EXPIRES_KEY, &expires)?;
                info!("obtained new access token");
                Ok(())
            }
            None => {
                error!("error getting access_token, please verify your access_key, secret_key and app_id");
                Err(RfaError::AuthFailed)
            }
        }
    }

    /// Return a non-expired access token, re-authenticating if the cached
    /// one has passed its `expires` timestamp.
    ///
    /// Expiry is only checked here, lazily, just before a token is needed.
    pub fn active_token(&self) -> Result<String> {
        if self.store.has_value(EXPIRES_KEY)? && self.store.has_value(ACCESS_TOKEN_KEY)? {
            let expires = self.store.get_value(EXPIRES_KEY)?;
            if token_expired(&expires) {
                self.store.delete_value(ACCESS_TOKEN_KEY)?;
                self.store.delete_value(EXPIRES_KEY)?;
                info!("access token expired, fetching a new one");
                self.auth()?;
            } else {
                debug!("cached access token still valid");
            }
        } else {
            self.auth()?;
        }
        self.store.get_value(ACCESS_TOKEN_KEY)
    }

    /// Issue a request and parse the JSON body.
    ///
    /// Bodies whose `status_code` is not 200 are logged (with `status_msg`
    /// when the API provides one) but still returned, so callers can inspect
    /// the error payload themselves.
    pub fn get_response(
        &self,
        url: &str,
        params: &[(&str, &str)],
        method: RequestMethod,
    ) -> Result<Value> {
        let response: Value = match method {
            RequestMethod::Auth => {
                let body: serde_json::Map<String, Value> = params
                    .iter()
                    .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                    .collect();
                self.http.post(url).json(&body).send()?.json()?
            }
            RequestMethod::Post => self.http.post(url).form(params).send()?.json()?,
            RequestMethod::Get => {
                let mut query: Vec<(&str, String)> =
                    params.iter().map(|(k, v)| (*k, v.to_string())).collect();
                query.push(("access_token", self.active_token()?));
                self.http.get(url).query(&query).send()?.json()?
            }
        };

        let status = response.get("status_code").and_then(Value::as_i64);
        if status != Some(200) {
            match response.get("status_msg").and_then(Value::as_str) {
                Some(msg) => error!(status_code = ?status, "bad response: {}", msg),
                None => error!(
                    status_code = ?status,
                    "something went wrong, please check your request params, e.g. card_type and date"
                ),
            }
        }

        Ok(response)
    }

    fn get(&self, url: String, params: &[(&str, &str)]) -> Result<Value> {
        self.get_response(&url, params, RequestMethod::Get)
    }

    /// Match details.
    pub fn get_match(&self, match_key: &str) -> Result<Value> {
        self.get(format!("{}match/{}/", self.api_path, match_key), &[])
    }

    /// Tournament details.
    pub fn get_tournament(&self, tournament_key: &str) -> Result<Value> {
        self.get(format!("{}tournament/{}/", self.api_path, tournament_key), &[])
    }

    /// A team within a tournament.
    pub fn get_tournament_team(&self, tournament_key: &str, team_key: &str) -> Result<Value> {
        self.get(
            format!("{}tournament/{}/team/{}/", self.api_path, tournament_key, team_key),
            &[],
        )
    }

    /// Details of one round of a tournament.
    pub fn get_tournament_round(&self, tournament_key: &str, round_key: &str) -> Result<Value> {
        self.get(
            format!(
                "{}tournament/{}/round-detail/{}/",
                self.api_path, tournament_key, round_key
            ),
            &[],
        )
    }

    /// Stats for a tournament.
    pub fn get_tournament_stats(&self, tournament_key: &str) -> Result<Value> {
        self.get(
            format!("{}tournament/{}/stats/", self.api_path, tournament_key),
            &[],
        )
    }

    /// Stats for a team in a tournament.
    pub fn get_tournament_team_stats(&self, tournament_key: &str, team_key: &str) -> Result<Value> {
        self.get(
            format!(
                "{}tournament/{}/team/{}/stats/",
                self.api_path, tournament_key, team_key
            ),
            &[],
        )
    }

    /// Stats for a player in a tournament.
    pub fn get_tournament_player_stats(
        &self,
        tournament_key: &str,
        player_key: &str,
    ) -> Result<Value> {
        self.get(
            format!(
                "{}tournament/{}/player/{}/stats/",
                self.api_path, tournament_key, player_key
            ),
            &[],
        )
    }

    /// Schedule, optionally restricted to a month (`YYYY-MM`).
    pub fn get_schedule(&self, date: Option<&str>) -> Result<Value> {
        let url = format!("{}schedule/", self.api_path);
        match date {
            Some(date) => self.get(url, &[("date", date)]),
            None => self.get(url, &[]),
        }
    }

    /// Schedule of a tournament.
    pub fn get_tournament_schedule(&self, tournament_key: &str) -> Result<Value> {
        self.get(
            format!("{}tournament/{}/schedule", self.api_path, tournament_key),
            &[],
        )
    }

    /// Recently concluded and ongoing tournaments.
    pub fn get_recent_tournaments(&self) -> Result<Value> {
        self.get(format!("{}recent_tournaments/", self.api_path), &[])
    }

    /// Matches in one round of a tournament.
    pub fn get_round_matches(&self, tournament_key: &str, round_key: &str) -> Result<Value> {
        self.get(
            format!(
                "{}tournament/{}/matches/{}",
                self.api_path, tournament_key, round_key
            ),
            &[],
        )
    }

    /// Recent matches in a tournament.
    pub fn get_recent_tournament_matches(&self, tournament_key: &str) -> Result<Value> {
        self.get(
            format!("{}tournament/{}/matches/", self.api_path, tournament_key),
            &[],
        )
    }

    /// Tournament points table.
    pub fn get_tournament_standings(&self, tournament_key: &str) -> Result<Value> {
        self.get(
            format!("{}tournament/{}/standings/", self.api_path, tournament_key),
            &[],
        )
    }

    /// Fantasy credits of the players in a match squad.
    ///
    /// `model` defaults to [`DEFAULT_FANTASY_MODEL`].
    pub fn get_fantasy_match_credits(
        &self,
        match_key: &str,
        model: Option<&str>,
    ) -> Result<Value> {
        self.get(
            format!("{}fantasy-match-credits/{}/", self.api_path, match_key),
            &[("model", model.unwrap_or(DEFAULT_FANTASY_MODEL))],
        )
    }

    /// Fantasy points of the players in a match squad.
    ///
    /// `model` defaults to [`DEFAULT_FANTASY_MODEL`].
    pub fn get_fantasy_match_points(&self, match_key: &str, model: Option<&str>) -> Result<Value> {
        self.get(
            format!("{}fantasy-match-points/{}/", self.api_path, match_key),
            &[("model", model.unwrap_or(DEFAULT_FANTASY_MODEL))],
        )
    }
}

/// Whether an `expires` value (epoch seconds) has passed. Values that do not
/// parse are treated as expired so the next call re-authenticates.
fn token_expired(expires: &str) -> bool {
    let Ok(expires) = expires.trim().parse::<f64>() else {
        return true;
    };
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64();
    now >= expires
}
