use tracing::{info, warn};

use crate::api::client::FantasyApi;
use crate::api::response::FlatRecord;
use crate::error::AppError;
use crate::models::player::PlayerRecord;
use crate::models::team::{FantasyTeam, Roster};

pub const ALL_POSITIONS: &str = "ALL";
pub const FALLBACK_POSITIONS: [&str; 5] = ["PG", "SG", "SF", "PF", "C"];
pub const DEFAULT_FREE_AGENT_MAX: usize = 100;

/// Which query shape produced a free-agent list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeAgentQuery {
    AllPositions,
    Unfiltered,
    PerPosition,
}

#[derive(Debug)]
pub struct FreeAgentReport {
    pub players: Vec<FlatRecord>,
    pub query: FreeAgentQuery,
    pub skipped_positions: Vec<&'static str>,
}

/// Free agents through a degrade chain: `ALL`, then no filter, then one
/// query per position with failing positions left out. Each step runs once.
pub async fn fetch_free_agents<A>(api: &A, league_key: &str, max: usize) -> FreeAgentReport
where
    A: FantasyApi + ?Sized,
{
    match api.free_agents(league_key, Some(ALL_POSITIONS), max).await {
        Ok(players) => {
            return FreeAgentReport {
                players,
                query: FreeAgentQuery::AllPositions,
                skipped_positions: Vec::new(),
            }
        }
        Err(e) => info!(error = %e, "position=ALL query failed, retrying without a filter"),
    }

    match api.free_agents(league_key, None, max).await {
        Ok(players) => {
            return FreeAgentReport {
                players,
                query: FreeAgentQuery::Unfiltered,
                skipped_positions: Vec::new(),
            }
        }
        Err(e) => warn!(error = %e, "unfiltered query failed, querying each position"),
    }

    let mut players = Vec::new();
    let mut skipped_positions = Vec::new();
    for position in FALLBACK_POSITIONS {
        match api.free_agents(league_key, Some(position), max).await {
            Ok(found) => players.extend(found),
            Err(e) => {
                warn!(position, error = %e, "skipping position");
                skipped_positions.push(position);
            }
        }
    }

    if !skipped_positions.is_empty() {
        warn!(
            skipped = skipped_positions.len(),
            positions = ?skipped_positions,
            "free-agent list is incomplete"
        );
    }

    FreeAgentReport {
        players,
        query: FreeAgentQuery::PerPosition,
        skipped_positions,
    }
}

pub async fn fetch_roster<A>(
    api: &A,
    team: &FantasyTeam,
    date: Option<&str>,
) -> Result<Roster, AppError>
where
    A: FantasyApi + ?Sized,
{
    let players = api
        .roster(&team.key, date)
        .await
        .map_err(|e| AppError::fetch(format!("roster for {}", team.name), e))?;
    Ok(Roster {
        team: team.clone(),
        players: players.iter().map(PlayerRecord::normalize).collect(),
    })
}

#[derive(Debug, Default)]
pub struct RostersReport {
    pub rosters: Vec<Roster>,
    pub skipped: Vec<AppError>,
}

impl RostersReport {
    pub fn player_count(&self) -> usize {
        self.rosters.iter().map(|r| r.players.len()).sum()
    }
}

/// Rosters of every team; a team whose roster fails is logged and skipped.
pub async fn fetch_all_rosters<A>(
    api: &A,
    teams: &[FantasyTeam],
    date: Option<&str>,
) -> RostersReport
where
    A: FantasyApi + ?Sized,
{
    let mut report = RostersReport::default();
    for team in teams {
        match fetch_roster(api, team, date).await {
            Ok(roster) => {
                info!(team = %team.name, players = roster.players.len(), "fetched roster");
                report.rosters.push(roster);
            }
            Err(e) => {
                warn!(team = %team.name, error = %e, "skipping team");
                report.skipped.push(e);
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Serves canned free-agent counts per position filter; `None` entries fail.
    #[derive(Default)]
    struct ScriptedApi {
        free_agents: HashMap<Option<&'static str>, Option<usize>>,
        rosters: HashMap<&'static str, Option<usize>>,
        calls: RefCell<Vec<Option<String>>>,
    }

    fn players(n: usize, prefix: &str) -> Vec<FlatRecord> {
        (0..n)
            .map(|i| {
                FlatRecord::from_value(&json!({
                    "name": {"full": format!("{prefix} {i}")},
                    "display_position": prefix,
                }))
            })
            .collect()
    }

    fn failure() -> AppError {
        AppError::Api {
            message: "400 Bad Request".into(),
            status: Some(400),
        }
    }

    #[async_trait(?Send)]
    impl FantasyApi for ScriptedApi {
        async fn league_keys(&self, _game_code: &str) -> Result<Vec<String>, AppError> {
            Ok(vec!["466.l.1".into()])
        }

        async fn teams(&self, _league_key: &str) -> Result<Vec<FantasyTeam>, AppError> {
            Ok(Vec::new())
        }

        async fn roster(
            &self,
            team_key: &str,
            _date: Option<&str>,
        ) -> Result<Vec<FlatRecord>, AppError> {
            match self.rosters.get(team_key).copied().flatten() {
                Some(n) => Ok(players(n, team_key)),
                None => Err(failure()),
            }
        }

        async fn free_agents(
            &self,
            _league_key: &str,
            position: Option<&str>,
            _max: usize,
        ) -> Result<Vec<FlatRecord>, AppError> {
            self.calls.borrow_mut().push(position.map(String::from));
            let scripted = self
                .free_agents
                .iter()
                .find(|(k, _)| k.as_deref() == position)
                .and_then(|(_, v)| *v);
            match scripted {
                Some(n) => Ok(players(n, position.unwrap_or("ANY"))),
                None => Err(failure()),
            }
        }
    }

    #[tokio::test]
    async fn test_all_positions_query_used_first() {
        let api = ScriptedApi {
            free_agents: HashMap::from([(Some("ALL"), Some(25))]),
            ..Default::default()
        };
        let report = fetch_free_agents(&api, "466.l.1", 100).await;
        assert_eq!(report.query, FreeAgentQuery::AllPositions);
        assert_eq!(report.players.len(), 25);
        assert_eq!(api.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_unfiltered_query_after_all_fails() {
        let api = ScriptedApi {
            free_agents: HashMap::from([(Some("ALL"), None), (None, Some(40))]),
            ..Default::default()
        };
        let report = fetch_free_agents(&api, "466.l.1", 100).await;
        assert_eq!(report.query, FreeAgentQuery::Unfiltered);
        assert_eq!(report.players.len(), 40);
        assert_eq!(*api.calls.borrow(), vec![Some("ALL".to_string()), None]);
    }

    #[tokio::test]
    async fn test_per_position_concatenates_successes() {
        let api = ScriptedApi {
            free_agents: HashMap::from([(Some("PG"), Some(10)), (Some("SG"), Some(8))]),
            ..Default::default()
        };
        let report = fetch_free_agents(&api, "466.l.1", 100).await;

        assert_eq!(report.query, FreeAgentQuery::PerPosition);
        assert_eq!(report.players.len(), 18);
        assert_eq!(report.skipped_positions, vec!["SF", "PF", "C"]);
        assert_eq!(api.calls.borrow().len(), 7);

        let first = PlayerRecord::normalize(&report.players[0]);
        let last = PlayerRecord::normalize(&report.players[17]);
        assert_eq!(first.position, "PG");
        assert_eq!(last.position, "SG");
    }

    #[tokio::test]
    async fn test_failing_team_is_skipped() {
        let api = ScriptedApi {
            rosters: HashMap::from([("466.l.1.t.1", Some(13)), ("466.l.1.t.2", None)]),
            ..Default::default()
        };
        let teams = vec![
            FantasyTeam {
                key: "466.l.1.t.1".into(),
                name: "One".into(),
            },
            FantasyTeam {
                key: "466.l.1.t.2".into(),
                name: "Two".into(),
            },
        ];
        let report = fetch_all_rosters(&api, &teams, None).await;

        assert_eq!(report.rosters.len(), 1);
        assert_eq!(report.rosters[0].team.name, "One");
        assert_eq!(report.player_count(), 13);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].error_type(), "fetch");
    }
}
