use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::OutputMode;
use crate::models::player::PlayerRecord;

pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }
    let table = Table::new(data).with(Style::rounded()).to_string();
    println!("{}", table);
}

#[derive(Tabled)]
pub struct PlayerRow {
    #[tabled(rename = "FANTASY TEAM")]
    pub fantasy_team: String,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "POS")]
    pub position: String,
    #[tabled(rename = "NBA")]
    pub pro_team: String,
    #[tabled(rename = "STATUS")]
    pub status: String,
    #[tabled(rename = "OWN")]
    pub ownership: String,
}

impl PlayerRow {
    pub fn new(fantasy_team: Option<&str>, player: &PlayerRecord) -> Self {
        Self {
            fantasy_team: fantasy_team.unwrap_or_default().to_string(),
            name: player.name.clone(),
            position: player.position.clone(),
            pro_team: player.pro_team.clone(),
            status: player.status.clone(),
            ownership: player.ownership.clone().unwrap_or_default(),
        }
    }
}

/// Print players in the selected mode. Text mode prints one line per player,
/// indented under `heading` when one is given.
pub fn print_players(mode: OutputMode, heading: Option<&str>, players: &[PlayerRecord]) {
    match mode {
        OutputMode::Text => {
            let indent = if let Some(heading) = heading {
                println!("\n{}", heading);
                "  "
            } else {
                ""
            };
            for p in players {
                println!("{}- {}", indent, p.summary());
            }
        }
        OutputMode::Table => {
            let rows: Vec<PlayerRow> =
                players.iter().map(|p| PlayerRow::new(heading, p)).collect();
            print_table(&rows);
        }
        OutputMode::Json => print_json(&serde_json::json!({
            "team": heading,
            "players": players,
        })),
    }
}

/// Progress and summary lines; suppressed in JSON mode so stdout stays parseable.
pub fn print_progress(mode: OutputMode, message: &str) {
    if mode != OutputMode::Json {
        println!("{}", message);
    }
}

pub fn print_error(err: &crate::error::AppError) {
    eprintln!(
        "{}",
        serde_json::to_string_pretty(&err.to_json()).unwrap_or_default()
    );
}
