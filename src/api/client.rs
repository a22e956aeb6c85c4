use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use super::response::{collect, FlatRecord};
use crate::auth::credentials::TokenEndpoint;
use crate::auth::token::{Credential, TokenResponse};
use crate::config::ClientCredentials;
use crate::error::AppError;
use crate::models::team::FantasyTeam;

pub const AUTH_BASE_URL: &str = "https://api.login.yahoo.com/oauth2";
pub const FANTASY_BASE_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

const PATH_REQUEST_AUTH: &str = "/request_auth";
const PATH_GET_TOKEN: &str = "/get_token";
const REDIRECT_URI: &str = "oob";

/// Yahoo caps player collections at 25 per request.
pub const PLAYER_PAGE_SIZE: usize = 25;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Read operations against the fantasy REST API.
#[async_trait(?Send)]
pub trait FantasyApi {
    async fn league_keys(&self, game_code: &str) -> Result<Vec<String>, AppError>;

    async fn teams(&self, league_key: &str) -> Result<Vec<FantasyTeam>, AppError>;

    async fn roster(
        &self,
        team_key: &str,
        date: Option<&str>,
    ) -> Result<Vec<FlatRecord>, AppError>;

    /// Free agents of a league, optionally filtered by position, at most `max`.
    async fn free_agents(
        &self,
        league_key: &str,
        position: Option<&str>,
        max: usize,
    ) -> Result<Vec<FlatRecord>, AppError>;
}

pub struct YahooApi {
    client: reqwest::Client,
    auth_base: String,
    fantasy_base: String,
    access_token: Option<String>,
}

fn build_http_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("yfbx/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

impl YahooApi {
    pub fn new() -> Result<Self, AppError> {
        Self::with_base_urls(AUTH_BASE_URL, FANTASY_BASE_URL)
    }

    pub fn with_base_urls(
        auth_base: impl Into<String>,
        fantasy_base: impl Into<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client: build_http_client()?,
            auth_base: auth_base.into().trim_end_matches('/').to_string(),
            fantasy_base: fantasy_base.into().trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// POST a grant to the token endpoint.
    async fn request_token(
        &self,
        client: &ClientCredentials,
        form: &[(&str, &str)],
    ) -> Result<Credential, AppError> {
        let url = format!("{}{}", self.auth_base, PATH_GET_TOKEN);
        debug!(%url, grant_type = form[0].1, "POST");

        let response = self
            .client
            .post(&url)
            .basic_auth(&client.client_id, Some(&client.client_secret))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let token: TokenResponse = response.json().await?;
            Ok(Credential::from_response(token, client, Utc::now()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::AuthFlow {
                message: format!("{}: {}", status, body),
                status: Some(status.as_u16()),
            })
        }
    }

    /// GET a fantasy resource as JSON.
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        let token = self.access_token.as_deref().ok_or_else(|| AppError::AuthFlow {
            message: "no access token; run 'yfbx login' first".into(),
            status: None,
        })?;
        let url = format!("{}{}", self.fantasy_base, path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, %body, "request failed");
            Err(AppError::Api {
                message: format!("{}: {}", status, body),
                status: Some(status.as_u16()),
            })
        }
    }

    async fn players(&self, path: &str) -> Result<Vec<FlatRecord>, AppError> {
        let doc = self.get(path).await?;
        Ok(collect(&doc, "player")
            .into_iter()
            .map(FlatRecord::from_value)
            .collect())
    }
}

#[async_trait(?Send)]
impl TokenEndpoint for YahooApi {
    fn authorization_url(&self, client: &ClientCredentials) -> Result<String, AppError> {
        let url = Url::parse_with_params(
            &format!("{}{}", self.auth_base, PATH_REQUEST_AUTH),
            &[
                ("client_id", client.client_id.as_str()),
                ("redirect_uri", REDIRECT_URI),
                ("response_type", "code"),
                ("language", "en-us"),
            ],
        )
        .map_err(|e| AppError::Config(format!("invalid authorization URL: {}", e)))?;
        Ok(url.to_string())
    }

    async fn exchange_code(
        &self,
        client: &ClientCredentials,
        code: &str,
    ) -> Result<Credential, AppError> {
        self.request_token(
            client,
            &[
                ("grant_type", "authorization_code"),
                ("redirect_uri", REDIRECT_URI),
                ("code", code),
            ],
        )
        .await
    }

    async fn refresh(
        &self,
        client: &ClientCredentials,
        refresh_token: &str,
    ) -> Result<Credential, AppError> {
        self.request_token(
            client,
            &[
                ("grant_type", "refresh_token"),
                ("redirect_uri", REDIRECT_URI),
                ("refresh_token", refresh_token),
            ],
        )
        .await
    }
}

#[async_trait(?Send)]
impl FantasyApi for YahooApi {
    async fn league_keys(&self, game_code: &str) -> Result<Vec<String>, AppError> {
        let doc = self
            .get(&format!(
                "/users;use_login=1/games;game_keys={}/leagues",
                game_code
            ))
            .await?;
        Ok(collect(&doc, "league")
            .into_iter()
            .filter_map(|league| FlatRecord::from_value(league).text("league_key"))
            .collect())
    }

    async fn teams(&self, league_key: &str) -> Result<Vec<FantasyTeam>, AppError> {
        let doc = self.get(&format!("/league/{}/teams", league_key)).await?;
        Ok(collect(&doc, "team")
            .into_iter()
            .filter_map(|team| FantasyTeam::from_raw(&FlatRecord::from_value(team)))
            .collect())
    }

    async fn roster(
        &self,
        team_key: &str,
        date: Option<&str>,
    ) -> Result<Vec<FlatRecord>, AppError> {
        let suffix = date.map(|d| format!(";date={}", d)).unwrap_or_default();
        self.players(&format!("/team/{}/roster/players{}", team_key, suffix))
            .await
    }

    async fn free_agents(
        &self,
        league_key: &str,
        position: Option<&str>,
        max: usize,
    ) -> Result<Vec<FlatRecord>, AppError> {
        let filter = position
            .map(|p| format!(";position={}", p))
            .unwrap_or_default();
        let mut players = Vec::new();

        while players.len() < max {
            let count = PLAYER_PAGE_SIZE.min(max - players.len());
            let page = self
                .players(&format!(
                    "/league/{}/players;status=FA{};start={};count={}/percent_owned",
                    league_key,
                    filter,
                    players.len(),
                    count
                ))
                .await?;
            let done = page.len() < count;
            players.extend(page);
            if done {
                break;
            }
        }

        Ok(players)
    }
}
