//! CSV dumps. Header names and column order are part of the output contract.

use std::path::Path;

use serde::Serialize;

use crate::error::AppError;
use crate::models::player::PlayerRecord;
use crate::models::team::Roster;

pub const ALL_TEAMS_HEADER: [&str; 5] =
    ["fantasy_team", "player_name", "position", "nba_team", "status"];
pub const FREE_AGENTS_HEADER: [&str; 5] = ["name", "position", "nba_team", "status", "ownership"];
pub const ROSTER_HEADER: [&str; 3] = ["name", "position", "nba_team"];

pub const ALL_TEAMS_FILE: &str = "all_teams.csv";
pub const FREE_AGENTS_FILE: &str = "free_agents.csv";
pub const ROSTER_FILE: &str = "roster.csv";

#[derive(Serialize)]
struct AllTeamsRow<'a> {
    fantasy_team: &'a str,
    player_name: &'a str,
    position: &'a str,
    nba_team: &'a str,
    status: &'a str,
}

#[derive(Serialize)]
struct FreeAgentRow<'a> {
    name: &'a str,
    position: &'a str,
    nba_team: &'a str,
    status: &'a str,
    ownership: &'a str,
}

#[derive(Serialize)]
struct RosterRow<'a> {
    name: &'a str,
    position: &'a str,
    nba_team: &'a str,
}

/// Write every roster player, tagged with its fantasy team. Returns the row count.
pub fn write_all_teams(path: &Path, rosters: &[Roster]) -> Result<usize, AppError> {
    let rows = rosters.iter().flat_map(|roster| {
        roster.players.iter().map(move |p| AllTeamsRow {
            fantasy_team: &roster.team.name,
            player_name: &p.name,
            position: &p.position,
            nba_team: &p.pro_team,
            status: &p.status,
        })
    });
    write_rows(path, &ALL_TEAMS_HEADER, rows)
}

pub fn write_free_agents(path: &Path, players: &[PlayerRecord]) -> Result<usize, AppError> {
    let rows = players.iter().map(|p| FreeAgentRow {
        name: &p.name,
        position: &p.position,
        nba_team: &p.pro_team,
        status: &p.status,
        ownership: p.ownership.as_deref().unwrap_or_default(),
    });
    write_rows(path, &FREE_AGENTS_HEADER, rows)
}

pub fn write_roster(path: &Path, players: &[PlayerRecord]) -> Result<usize, AppError> {
    let rows = players.iter().map(|p| RosterRow {
        name: &p.name,
        position: &p.position,
        nba_team: &p.pro_team,
    });
    write_rows(path, &ROSTER_HEADER, rows)
}

// The header is written explicitly so an empty dump still carries it.
fn write_rows<T, I>(path: &Path, header: &[&str], rows: I) -> Result<usize, AppError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(header)?;
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::team::FantasyTeam;
    use tempfile::TempDir;

    fn player(name: &str, status: &str, ownership: Option<&str>) -> PlayerRecord {
        PlayerRecord {
            name: name.into(),
            position: "PG,SG".into(),
            pro_team: "BOS".into(),
            status: status.into(),
            ownership: ownership.map(String::from),
        }
    }

    fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let header = reader
            .headers()
            .unwrap()
            .iter()
            .map(String::from)
            .collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (header, rows)
    }

    #[test]
    fn test_free_agents_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("free_agents.csv");
        let players = vec![
            player("Jrue Holiday", "", Some("54%")),
            player("Smith, Jr.", "O", None),
            player("Third", "GTD", Some("3%")),
        ];

        assert_eq!(write_free_agents(&path, &players).unwrap(), 3);

        let (header, rows) = read_back(&path);
        assert_eq!(header, FREE_AGENTS_HEADER);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Jrue Holiday", "PG,SG", "BOS", "", "54%"]);
        assert_eq!(rows[1][0], "Smith, Jr.");
        assert_eq!(rows[1][4], "");
        assert_eq!(rows[2][0], "Third");
    }

    #[test]
    fn test_all_teams_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("all_teams.csv");
        let rosters = vec![
            Roster {
                team: FantasyTeam {
                    key: "466.l.1.t.1".into(),
                    name: "Alpha".into(),
                },
                players: vec![player("A1", "", None), player("A2", "INJ", None)],
            },
            Roster {
                team: FantasyTeam {
                    key: "466.l.1.t.2".into(),
                    name: "Beta".into(),
                },
                players: vec![player("B1", "", None)],
            },
        ];

        assert_eq!(write_all_teams(&path, &rosters).unwrap(), 3);

        let (header, rows) = read_back(&path);
        assert_eq!(header, ALL_TEAMS_HEADER);
        let names: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r[0].as_str(), r[1].as_str()))
            .collect();
        assert_eq!(names, vec![("Alpha", "A1"), ("Alpha", "A2"), ("Beta", "B1")]);
        assert_eq!(rows[1][4], "INJ");
    }

    #[test]
    fn test_roster_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.csv");
        std::fs::write(&path, "stale,data\n1,2\n3,4\n5,6\n").unwrap();

        write_roster(&path, &[player("Only", "", None)]).unwrap();

        let (header, rows) = read_back(&path);
        assert_eq!(header, ROSTER_HEADER);
        assert_eq!(rows, vec![vec!["Only", "PG,SG", "BOS"]]);
    }

    #[test]
    fn test_empty_dump_keeps_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.csv");
        assert_eq!(write_roster(&path, &[]).unwrap(), 0);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "name,position,nba_team\n");
    }
}
