use std::path::Path;

use serde_json::json;

use crate::auth::credentials::authorized_api;
use crate::cli::output::{print_json, print_players, print_progress};
use crate::config::{OutputMode, RuntimeConfig, GAME_CODE};
use crate::error::AppError;
use crate::export::write_free_agents;
use crate::fetch::fetch_free_agents;
use crate::models::player::PlayerRecord;
use crate::resolve::resolve_league;

pub async fn handle(output: &Path, max: usize, config: &RuntimeConfig) -> Result<(), AppError> {
    if max == 0 {
        return Err(AppError::InvalidInput("--max must be at least 1".into()));
    }

    let mode = config.output_mode;
    let api = authorized_api(&config.auth).await?;
    let (_, league_key) = resolve_league(&api, GAME_CODE).await?;
    print_progress(mode, &format!("Fetching free agents from league: {}", league_key));

    let report = fetch_free_agents(&api, &league_key, max).await;
    if report.players.is_empty() {
        print_progress(mode, "No free agents found or unable to fetch.");
        if mode == OutputMode::Json {
            print_json(&json!({
                "league": league_key,
                "players": [],
                "skipped_positions": report.skipped_positions,
            }));
        }
        return Ok(());
    }

    let players: Vec<PlayerRecord> = report
        .players
        .iter()
        .map(PlayerRecord::normalize)
        .collect();
    print_progress(mode, &format!("\nFound {} free agents:", players.len()));
    if !report.skipped_positions.is_empty() {
        print_progress(
            mode,
            &format!(
                "Skipped {} position queries that failed: {}",
                report.skipped_positions.len(),
                report.skipped_positions.join(", ")
            ),
        );
    }
    print_players(mode, None, &players);

    write_free_agents(output, &players)?;
    print_progress(mode, &format!("\nSaved: {}", output.display()));

    Ok(())
}
