use std::path::Path;

use serde_json::json;

use crate::api::client::FantasyApi;
use crate::auth::credentials::authorized_api;
use crate::cli::output::{print_json, print_players, print_progress, print_table, PlayerRow};
use crate::config::{OutputMode, RuntimeConfig, GAME_CODE};
use crate::error::AppError;
use crate::export::write_all_teams;
use crate::fetch::fetch_all_rosters;
use crate::resolve::resolve_league;

pub async fn handle(
    output: &Path,
    date: Option<&str>,
    config: &RuntimeConfig,
) -> Result<(), AppError> {
    let mode = config.output_mode;
    let api = authorized_api(&config.auth).await?;
    let (_, league_key) = resolve_league(&api, GAME_CODE).await?;
    print_progress(mode, &format!("Fetching all teams from league: {}", league_key));

    let teams = api.teams(&league_key).await?;
    let report = fetch_all_rosters(&api, &teams, date).await;

    match mode {
        OutputMode::Text => {
            for roster in &report.rosters {
                print_players(mode, Some(roster.team.name.as_str()), &roster.players);
            }
        }
        OutputMode::Table => {
            let rows: Vec<PlayerRow> = report
                .rosters
                .iter()
                .flat_map(|r| {
                    r.players
                        .iter()
                        .map(move |p| PlayerRow::new(Some(r.team.name.as_str()), p))
                })
                .collect();
            print_table(&rows);
        }
        OutputMode::Json => {}
    }
    for err in &report.skipped {
        print_progress(mode, &format!("  Error fetching roster: {}", err));
    }

    let written = write_all_teams(output, &report.rosters)?;

    if mode == OutputMode::Json {
        print_json(&json!({
            "league": league_key,
            "output": output.display().to_string(),
            "players": written,
            "skipped_teams": report.skipped.len(),
            "rosters": report.rosters,
        }));
    } else {
        println!("\nSaved all teams to: {}", output.display());
        println!("Total players across all teams: {}", report.player_count());
    }

    Ok(())
}
