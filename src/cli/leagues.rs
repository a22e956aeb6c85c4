use serde_json::json;
use tabled::Tabled;

use crate::auth::credentials::authorized_api;
use crate::cli::output::{print_json, print_table};
use crate::config::{OutputMode, RuntimeConfig, GAME_CODE};
use crate::error::AppError;
use crate::resolve::resolve_league;

#[derive(Tabled)]
struct LeagueRow {
    #[tabled(rename = "LEAGUE KEY")]
    key: String,
    #[tabled(rename = "SELECTED")]
    selected: String,
}

pub async fn handle(config: &RuntimeConfig) -> Result<(), AppError> {
    let api = authorized_api(&config.auth).await?;
    let (league_keys, selected) = resolve_league(&api, GAME_CODE).await?;

    match config.output_mode {
        OutputMode::Json => print_json(&json!({
            "leagues": league_keys,
            "selected": selected,
        })),
        OutputMode::Table => {
            let rows: Vec<LeagueRow> = league_keys
                .iter()
                .map(|key| LeagueRow {
                    key: key.clone(),
                    selected: if *key == selected { "yes" } else { "" }.to_string(),
                })
                .collect();
            print_table(&rows);
        }
        OutputMode::Text => {
            println!("Your NBA league keys:");
            for key in &league_keys {
                let marker = if *key == selected { " (selected)" } else { "" };
                println!("  {}{}", key, marker);
            }
        }
    }

    Ok(())
}
