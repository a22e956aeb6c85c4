use serde::Serialize;

use crate::api::response::FlatRecord;
use crate::models::player::PlayerRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FantasyTeam {
    pub key: String,
    pub name: String,
}

impl FantasyTeam {
    /// Build from a flattened `team` resource; the name falls back to the key.
    pub fn from_raw(raw: &FlatRecord) -> Option<Self> {
        let key = raw.text("team_key")?;
        let name = raw.text("name").unwrap_or_else(|| key.clone());
        Some(Self { key, name })
    }

    /// League portion of a `<game>.l.<league>.t.<team>` key.
    pub fn league_key(&self) -> Option<&str> {
        self.key.rsplit_once(".t.").map(|(league, _)| league)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub team: FantasyTeam,
    pub players: Vec<PlayerRecord>,
}
