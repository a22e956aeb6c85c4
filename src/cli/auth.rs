use chrono::Utc;
use serde_json::json;

use crate::api::client::YahooApi;
use crate::auth::credentials::{obtain_credential, PromptAuthorizer};
use crate::auth::store::TokenStore;
use crate::cli::output::print_json;
use crate::config::RuntimeConfig;
use crate::error::AppError;

pub async fn handle_login(config: &RuntimeConfig) -> Result<(), AppError> {
    let api = YahooApi::new()?;
    let credential = obtain_credential(&config.auth, &api, &PromptAuthorizer).await?;

    print_json(&json!({
        "status": "authenticated",
        "token_file": config.auth.token_file.display().to_string(),
        "expires_at": credential.expiry(),
        "has_refresh_token": credential.refresh_token.is_some(),
        "guid": credential.guid,
    }));

    Ok(())
}

pub async fn handle_logout(config: &RuntimeConfig) -> Result<(), AppError> {
    let removed = TokenStore::new(&config.auth.token_file).delete()?;
    print_json(&json!({
        "status": "logged_out",
        "removed": removed,
    }));
    Ok(())
}

pub async fn handle_status(config: &RuntimeConfig) -> Result<(), AppError> {
    let store = TokenStore::new(&config.auth.token_file);
    if !store.exists() {
        print_json(&json!({"status": "not_authenticated"}));
        return Ok(());
    }

    match store.load() {
        Ok(credential) => {
            let expired = credential.is_expired(Utc::now());
            print_json(&json!({
                "status": if expired { "expired" } else { "authenticated" },
                "token_file": store.path().display().to_string(),
                "expires_at": credential.expiry(),
                "has_refresh_token": credential.refresh_token.is_some(),
                "has_client_credentials": credential.client_credentials().is_some(),
            }));
        }
        Err(e) => {
            print_json(&json!({
                "status": "invalid",
                "token_file": store.path().display().to_string(),
                "message": e.to_string(),
            }));
        }
    }
    Ok(())
}
