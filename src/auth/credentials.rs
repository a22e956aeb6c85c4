use async_trait::async_trait;
use chrono::Utc;
use dialoguer::Input;
use tracing::{debug, info, warn};

use crate::api::client::YahooApi;
use crate::auth::store::TokenStore;
use crate::auth::token::Credential;
use crate::config::{AuthConfig, ClientCredentials};
use crate::error::AppError;

/// The provider side of the OAuth2 exchange.
#[async_trait(?Send)]
pub trait TokenEndpoint {
    /// URL the user opens to approve the application.
    fn authorization_url(&self, client: &ClientCredentials) -> Result<String, AppError>;

    async fn exchange_code(
        &self,
        client: &ClientCredentials,
        code: &str,
    ) -> Result<Credential, AppError>;

    async fn refresh(
        &self,
        client: &ClientCredentials,
        refresh_token: &str,
    ) -> Result<Credential, AppError>;
}

/// Gets the verifier code out of the user during first-time authorization.
pub trait Authorizer {
    fn authorization_code(&self, url: &str) -> Result<String, AppError>;
}

/// Prints the approval URL and reads the code from the terminal.
pub struct PromptAuthorizer;

impl Authorizer for PromptAuthorizer {
    fn authorization_code(&self, url: &str) -> Result<String, AppError> {
        eprintln!("Open this URL in a browser, sign in and approve the application:\n");
        eprintln!("  {}\n", url);
        Input::<String>::new()
            .with_prompt("Enter the verifier code")
            .interact_text()
            .map_err(|e| AppError::AuthFlow {
                message: e.to_string(),
                status: None,
            })
    }
}

/// Return a usable credential, interacting with the user only when no
/// stored credential can be reused or refreshed.
pub async fn obtain_credential<E, A>(
    config: &AuthConfig,
    endpoint: &E,
    authorizer: &A,
) -> Result<Credential, AppError>
where
    E: TokenEndpoint + ?Sized,
    A: Authorizer + ?Sized,
{
    let store = TokenStore::new(&config.token_file);

    if store.exists() {
        match reuse_or_refresh(&store, config, endpoint).await {
            Ok(credential) => return Ok(credential),
            Err(e) => {
                warn!(
                    path = %store.path().display(),
                    error = %e,
                    "bad token file, removing and re-authorizing"
                );
                store.delete()?;
            }
        }
    }

    authorize_first_time(&store, config, endpoint, authorizer).await
}

async fn reuse_or_refresh<E>(
    store: &TokenStore,
    config: &AuthConfig,
    endpoint: &E,
) -> Result<Credential, AppError>
where
    E: TokenEndpoint + ?Sized,
{
    let stored = store.load()?;
    if !stored.is_expired(Utc::now()) {
        debug!(path = %store.path().display(), "reusing stored access token");
        return Ok(stored);
    }

    let refresh_token = stored
        .refresh_token
        .as_deref()
        .ok_or_else(|| AppError::Token {
            path: store.path().display().to_string(),
            message: "access token expired and no refresh token is stored".into(),
        })?;
    let client = config
        .client
        .clone()
        .or_else(|| stored.client_credentials())
        .ok_or_else(|| {
            AppError::Config("no client id/secret available to refresh the token".into())
        })?;

    info!("access token expired, refreshing");
    let refreshed = endpoint
        .refresh(&client, refresh_token)
        .await?
        .inheriting(&stored);
    store.save(&refreshed)?;
    Ok(refreshed)
}

async fn authorize_first_time<E, A>(
    store: &TokenStore,
    config: &AuthConfig,
    endpoint: &E,
    authorizer: &A,
) -> Result<Credential, AppError>
where
    E: TokenEndpoint + ?Sized,
    A: Authorizer + ?Sized,
{
    let client = config.client.as_ref().ok_or_else(|| {
        AppError::Config("Missing YAHOO_CLIENT_ID / YAHOO_CLIENT_SECRET".into())
    })?;

    let url = endpoint.authorization_url(client)?;
    let code = authorizer.authorization_code(&url)?;
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::AuthFlow {
            message: "no verifier code entered".into(),
            status: None,
        });
    }

    let credential = endpoint
        .exchange_code(client, code)
        .await
        .map_err(into_auth_flow)?;
    store.save(&credential)?;
    info!(path = %store.path().display(), "authorized, token saved");
    Ok(credential)
}

/// Trade a pre-obtained refresh token for an access token without touching
/// the token file.
pub async fn credential_from_refresh_token<E>(
    client: Option<&ClientCredentials>,
    refresh_token: &str,
    endpoint: &E,
) -> Result<Credential, AppError>
where
    E: TokenEndpoint + ?Sized,
{
    let client = client.ok_or_else(|| {
        AppError::Config(
            "Missing YAHOO_CLIENT_ID / YAHOO_CLIENT_SECRET / YAHOO_REFRESH_TOKEN".into(),
        )
    })?;
    endpoint
        .refresh(client, refresh_token)
        .await
        .map_err(into_auth_flow)
}

/// Build an API client carrying a valid access token.
pub async fn authorized_api(config: &AuthConfig) -> Result<YahooApi, AppError> {
    let api = YahooApi::new()?;
    let credential = obtain_credential(config, &api, &PromptAuthorizer).await?;
    Ok(api.with_access_token(credential.access_token))
}

fn into_auth_flow(err: AppError) -> AppError {
    match err {
        AppError::AuthFlow { .. } | AppError::Config(_) => err,
        AppError::Api { message, status } => AppError::AuthFlow { message, status },
        other => AppError::AuthFlow {
            message: other.to_string(),
            status: None,
        },
    }
}
