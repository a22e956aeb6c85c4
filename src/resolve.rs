use tracing::debug;

use crate::api::client::FantasyApi;
use crate::error::AppError;
use crate::models::team::FantasyTeam;

/// Select the league to work on: always the first one the provider lists.
pub fn pick_league<'a>(league_keys: &'a [String], game_code: &str) -> Result<&'a str, AppError> {
    league_keys
        .first()
        .map(String::as_str)
        .ok_or_else(|| AppError::NoLeagueFound(game_code.to_string()))
}

/// List the leagues for `game_code` and return them along with the selected one.
pub async fn resolve_league<A>(api: &A, game_code: &str) -> Result<(Vec<String>, String), AppError>
where
    A: FantasyApi + ?Sized,
{
    let league_keys = api.league_keys(game_code).await?;
    let selected = pick_league(&league_keys, game_code)?.to_string();
    debug!(leagues = ?league_keys, %selected, "resolved league");
    Ok((league_keys, selected))
}

/// First team listed in the league.
pub async fn resolve_first_team<A>(api: &A, league_key: &str) -> Result<FantasyTeam, AppError>
where
    A: FantasyApi + ?Sized,
{
    api.teams(league_key)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Fetch {
            what: format!("teams of league {}", league_key),
            message: "league has no teams".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_first_league() {
        let keys = vec!["466.l.1".to_string(), "466.l.2".to_string()];
        assert_eq!(pick_league(&keys, "nba").unwrap(), "466.l.1");
    }

    #[test]
    fn test_no_league_found() {
        let err = pick_league(&[], "nba").unwrap_err();
        assert!(matches!(err, AppError::NoLeagueFound(ref game) if game == "nba"));
        assert_eq!(err.exit_code(), 4);
    }
}
