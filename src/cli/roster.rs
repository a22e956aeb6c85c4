use std::path::Path;

use crate::api::client::YahooApi;
use crate::auth::credentials::{authorized_api, credential_from_refresh_token};
use crate::cli::output::{print_players, print_progress};
use crate::config::{RuntimeConfig, GAME_CODE};
use crate::error::AppError;
use crate::export::write_roster;
use crate::fetch::fetch_roster;
use crate::models::team::FantasyTeam;
use crate::resolve::{resolve_first_team, resolve_league};

pub async fn handle(
    team_key: Option<&str>,
    refresh_token: Option<&str>,
    date: Option<&str>,
    output: &Path,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let mode = config.output_mode;

    let api = match refresh_token.filter(|t| !t.is_empty()) {
        Some(refresh_token) => {
            let api = YahooApi::new()?;
            let credential =
                credential_from_refresh_token(config.auth.client.as_ref(), refresh_token, &api)
                    .await?;
            api.with_access_token(credential.access_token)
        }
        None => authorized_api(&config.auth).await?,
    };

    let team = match team_key.filter(|k| !k.is_empty()) {
        Some(key) => FantasyTeam {
            key: key.to_string(),
            name: key.to_string(),
        },
        None => {
            let (_, league_key) = resolve_league(&api, GAME_CODE).await?;
            resolve_first_team(&api, &league_key).await?
        }
    };

    let roster = fetch_roster(&api, &team, date).await?;
    print_players(mode, Some(roster.team.name.as_str()), &roster.players);

    write_roster(output, &roster.players)?;
    print_progress(mode, &format!("\nSaved: {}", output.display()));

    Ok(())
}
