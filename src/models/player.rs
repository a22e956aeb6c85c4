use serde::Serialize;

use crate::api::response::FlatRecord;

/// Value shown when a field cannot be resolved.
pub const PLACEHOLDER: &str = "-";

/// Where a field may live in a player resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A scalar under the key.
    Text(&'static str),
    /// A scalar one level down, e.g. `name.full`.
    Nested(&'static str, &'static str),
    /// A list joined with commas; object items carry the value under the second key.
    List(&'static str, &'static str),
}

impl Source {
    fn read(self, raw: &FlatRecord) -> Option<String> {
        match self {
            Source::Text(key) => raw.text(key),
            Source::Nested(key, sub) => raw.nested_text(key, sub),
            Source::List(key, item) => raw.list_text(key, item),
        }
    }
}

// Priority lists, first non-empty value wins.
pub const NAME: &[Source] = &[Source::Nested("name", "full"), Source::Text("name")];

pub const POSITION: &[Source] = &[
    Source::Text("display_position"),
    Source::Text("position"),
    Source::List("eligible_positions", "position"),
];

pub const PRO_TEAM: &[Source] = &[
    Source::Text("editorial_team_abbr"),
    Source::Text("editorial_team_full_name"),
    Source::Text("editorial_team_key"),
];

pub const STATUS: &[Source] = &[Source::Text("status"), Source::Text("injury_note")];

pub const OWNERSHIP: &[Source] = &[
    Source::Nested("percent_owned", "value"),
    Source::Text("percent_owned"),
];

pub fn resolve(raw: &FlatRecord, sources: &[Source]) -> Option<String> {
    sources.iter().find_map(|source| source.read(raw))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub position: String,
    pub pro_team: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<String>,
}

impl PlayerRecord {
    /// Reduce any player shape to the fixed field set. Never fails.
    pub fn normalize(raw: &FlatRecord) -> Self {
        let or_placeholder =
            |sources: &[Source]| resolve(raw, sources).unwrap_or_else(|| PLACEHOLDER.into());
        Self {
            name: or_placeholder(NAME),
            position: or_placeholder(POSITION),
            pro_team: or_placeholder(PRO_TEAM),
            status: resolve(raw, STATUS).unwrap_or_default(),
            ownership: resolve(raw, OWNERSHIP)
                .map(|pct| format!("{}%", pct.trim_end_matches('%'))),
        }
    }

    /// One progress line, e.g. `Jalen Brunson (PG) — NYK [GTD]`.
    pub fn summary(&self) -> String {
        let mut line = format!("{} ({}) — {}", self.name, self.position, self.pro_team);
        if !self.status.is_empty() {
            line.push_str(&format!(" [{}]", self.status));
        }
        if let Some(ref own) = self.ownership {
            line.push_str(&format!(" Own: {}", own));
        }
        line
    }
}
