use crate::espn::{
    AthleteOverviewResponse, CareerStatsResponse, DepthChartResponse, EspnCompetitor, EspnEvent,
    GamelogResponse, InjuriesResponse, RosterResponse, ScheduleResponse, ScoreboardResponse,
    TeamStatsResponse,
};
use crate::bucket::us_eastern_offset;
use crate::matchup::MatchupIndex;
use crate::teams::{TeamDirectory, canonical_slug, resolve_team};
use crate::{
    GameLog, GameLogLine, MatchStatus, MatchupRecord, Odds, PlayerBio, RecordSource, RosterAthlete,
    ScheduleEntry, ScheduleStatus, Score, SeasonType, TeamRecord,
};
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_SITE: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl";
pub const ESPN_ATHLETES: &str =
    "https://site.web.api.espn.com/apis/common/v3/sports/football/nfl/athletes";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const UNKNOWN_VENUE: &str = "Unknown Venue";

/// NFL data client backed by ESPN's public endpoints.
#[derive(Debug, Clone)]
pub struct NflApi {
    client: Client,
    site_base: String,
    athletes_base: String,
    timeout: Duration,
    index: &'static MatchupIndex,
}

impl Default for NflApi {
    fn default() -> Self {
        Self::with_bases(ESPN_SITE, ESPN_ATHLETES)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Corpus(String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Corpus(msg) => write!(f, "Corpus error: {msg}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// A lookup the caller asked for does not exist, as opposed to a source
    /// that failed to answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl NflApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at other base URLs (mirrors, test servers).
    pub fn with_bases(site_base: impl Into<String>, athletes_base: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("statyards/0.1 (matchup aggregator)")
                .build()
                .unwrap_or_default(),
            site_base: site_base.into().trim_end_matches('/').to_owned(),
            athletes_base: athletes_base.into().trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            index: MatchupIndex::global(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a specific corpus index for slug lookups instead of the global one.
    pub fn with_index(mut self, index: &'static MatchupIndex) -> Self {
        self.index = index;
        self
    }

    pub fn index(&self) -> &'static MatchupIndex {
        self.index
    }

    /// League-wide scoreboard: current week's live, upcoming and recent
    /// finished games, newest first, one record per event.
    pub async fn fetch_scoreboard(&self) -> ApiResult<Vec<MatchupRecord>> {
        let url = format!("{}/scoreboard", self.site_base);
        let raw: ScoreboardResponse = self.get(&url).await?;

        let mut seen = HashSet::new();
        let mut records: Vec<MatchupRecord> = raw
            .events
            .unwrap_or_default()
            .iter()
            .filter(|e| e.id.as_ref().is_none_or(|id| seen.insert(id.clone())))
            .filter_map(|e| map_event_to_record(e, self.index))
            .collect();
        records.sort_by(|a, b| b.kickoff.cmp(&a.kickoff));
        Ok(records)
    }

    /// A team's full schedule from its own point of view. Unknown teams have
    /// no schedule and cost no request.
    pub async fn fetch_team_schedule(&self, team_slug: &str) -> ApiResult<Vec<ScheduleEntry>> {
        let Some(team) = lookup_team(team_slug) else {
            debug!("no ESPN id for {team_slug}, skipping schedule fetch");
            return Ok(Vec::new());
        };
        let url = format!("{}/teams/{}/schedule", self.site_base, team.espn_id);
        let raw: ScheduleResponse = self.get(&url).await?;
        Ok(raw
            .events
            .unwrap_or_default()
            .iter()
            .filter_map(|e| map_schedule_event(e, &team.espn_id, self.index))
            .collect())
    }

    pub async fn fetch_roster(&self, team_slug: &str) -> ApiResult<Vec<RosterAthlete>> {
        let Some(team) = lookup_team(team_slug) else {
            return Ok(Vec::new());
        };
        let url = format!("{}/teams/{}/roster", self.site_base, team.espn_id);
        let raw: RosterResponse = self.get(&url).await?;
        Ok(map_roster(raw))
    }

    pub async fn fetch_depth_chart(&self, team_slug: &str) -> ApiResult<Vec<Value>> {
        let Some(team) = lookup_team(team_slug) else {
            return Ok(Vec::new());
        };
        let url = format!("{}/teams/{}/depthcharts", self.site_base, team.espn_id);
        let raw: DepthChartResponse = self.get(&url).await?;
        Ok(raw.depthchart.unwrap_or_default())
    }

    /// Often empty or flaky in the off-season.
    pub async fn fetch_injuries(&self, team_slug: &str) -> ApiResult<Vec<Value>> {
        let Some(team) = lookup_team(team_slug) else {
            return Ok(Vec::new());
        };
        let url = format!("{}/teams/{}/injuries", self.site_base, team.espn_id);
        let raw: InjuriesResponse = self.get(&url).await?;
        Ok(raw.injuries.unwrap_or_default())
    }

    pub async fn fetch_team_stats(&self, team_slug: &str) -> ApiResult<Vec<Value>> {
        let Some(team) = lookup_team(team_slug) else {
            return Ok(Vec::new());
        };
        let url = format!("{}/teams/{}/statistics", self.site_base, team.espn_id);
        let raw: TeamStatsResponse = self.get(&url).await?;
        Ok(raw
            .results
            .and_then(|r| r.stats)
            .and_then(|s| s.categories)
            .unwrap_or_default())
    }

    pub async fn fetch_athlete(&self, player_id: &str) -> ApiResult<PlayerBio> {
        let url = format!("{}/{player_id}", self.athletes_base);
        let raw: AthleteOverviewResponse = self.get(&url).await?;
        map_athlete(player_id, raw)
            .ok_or_else(|| ApiError::NotFound(format!("athlete {player_id}")))
    }

    pub async fn fetch_gamelog(&self, player_id: &str) -> ApiResult<GameLog> {
        let url = format!("{}/{player_id}/gamelog", self.athletes_base);
        let raw: GamelogResponse = self.get(&url).await?;
        Ok(map_gamelog(raw))
    }

    pub async fn fetch_career_stats(&self, player_id: &str) -> ApiResult<Vec<Value>> {
        let url = format!("{}/{player_id}/stats", self.athletes_base);
        let raw: CareerStatsResponse = self.get(&url).await?;
        Ok(raw.categories.unwrap_or_default())
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

/// Slug first, then any name the resolver understands ("steelers", "PIT").
fn lookup_team(team: &str) -> Option<&'static TeamRecord> {
    TeamDirectory::global().by_slug(team).or_else(|| resolve_team(team))
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

/// ESPN writes both "2024-11-17T21:25Z" and full RFC 3339.
pub fn parse_espn_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// "1:00 PM" on the New York wall clock.
fn eastern_clock(kickoff: DateTime<Utc>) -> String {
    kickoff
        .with_timezone(&us_eastern_offset(kickoff))
        .format("%-I:%M %p")
        .to_string()
}

fn team_label(c: &EspnCompetitor) -> String {
    c.team
        .as_ref()
        .and_then(|t| t.short_display_name.clone().or_else(|| t.name.clone()))
        .unwrap_or_default()
}

fn display_name(c: &EspnCompetitor) -> String {
    c.team
        .as_ref()
        .and_then(|t| t.display_name.clone().or_else(|| t.name.clone()))
        .unwrap_or_default()
}

fn competitor_team_id(c: &EspnCompetitor) -> Option<&str> {
    c.team.as_ref()?.id.as_deref()
}

fn points(c: &EspnCompetitor) -> u16 {
    c.score.as_ref().and_then(|s| s.points()).unwrap_or_default()
}

/// Corpus page for a pairing, or "<home>-vs-<away>-match-player-stats".
fn matchup_slug_for(index: &MatchupIndex, home: &str, away: &str) -> String {
    index.find_slug_for_teams(home, away).unwrap_or_else(|| {
        format!("{}-vs-{}-match-player-stats", canonical_slug(home), canonical_slug(away))
    })
}

pub fn map_event_to_record(event: &EspnEvent, index: &MatchupIndex) -> Option<MatchupRecord> {
    let event_id = event.id.clone()?;
    let competition = event.competition()?;
    let competitors = competition.competitors.as_deref().unwrap_or_default();
    let home = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("home"))
        .or_else(|| competitors.first())?;
    let away = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("away"))
        .or_else(|| competitors.get(1))?;

    let kickoff = competition
        .date
        .as_deref()
        .or(event.date.as_deref())
        .and_then(parse_espn_date)?;

    let status_type = event.status().and_then(|s| s.status_type.as_ref());
    let state = status_type.and_then(|t| t.state.as_deref()).unwrap_or("pre");
    let status = ScheduleStatus::from_state(state).as_match_status();

    let time = match status {
        MatchStatus::Live => status_type
            .and_then(|t| t.short_detail.clone())
            .unwrap_or_else(|| eastern_clock(kickoff)),
        _ => eastern_clock(kickoff),
    };
    let result = match status {
        MatchStatus::Past => Some(
            status_type
                .and_then(|t| t.detail.clone())
                .unwrap_or_else(|| "Final".to_owned()),
        ),
        _ => None,
    };

    let home_name = team_label(home);
    let away_name = team_label(away);
    let slug = matchup_slug_for(index, &display_name(home), &display_name(away));

    Some(MatchupRecord {
        slug,
        season: event
            .season
            .as_ref()
            .and_then(|s| s.year)
            .unwrap_or(kickoff.year() as u16),
        keyword: format!("{home_name} vs {away_name} match player stats"),
        status,
        kickoff,
        time,
        score: Score { home: points(home), away: points(away) },
        odds: competition
            .odds
            .as_ref()
            .and_then(|o| o.first())
            .and_then(|o| o.details.as_deref())
            .and_then(Odds::parse_details),
        stadium: competition
            .venue
            .as_ref()
            .and_then(|v| v.full_name.clone())
            .unwrap_or_else(|| UNKNOWN_VENUE.to_owned()),
        result,
        source: RecordSource::Scoreboard { event_id },
        home: home_name,
        away: away_name,
    })
}

/// One schedule event from the perspective of team `team_id`.
pub fn map_schedule_event(event: &EspnEvent, team_id: &str, index: &MatchupIndex) -> Option<ScheduleEntry> {
    let competition = event.competition()?;
    let competitors = competition.competitors.as_deref().unwrap_or_default();
    let us = competitors.iter().find(|c| competitor_team_id(c) == Some(team_id))?;
    let them = competitors
        .iter()
        .find(|c| competitor_team_id(c).is_some_and(|id| id != team_id))?;

    let date = event
        .date
        .as_deref()
        .or(competition.date.as_deref())
        .and_then(parse_espn_date)?;

    let state = event
        .status()
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.state.as_deref())
        .unwrap_or("pre");
    let status = ScheduleStatus::from_state(state);

    let score = match status {
        ScheduleStatus::Final | ScheduleStatus::Live => Some((points(us), points(them))),
        ScheduleStatus::Upcoming => None,
    };
    let won = match status {
        ScheduleStatus::Final => Some(us.winner.unwrap_or(false)),
        _ => None,
    };

    let us_name = display_name(us);
    let opponent = display_name(them);
    let matchup_slug = matchup_slug_for(index, &us_name, &opponent);

    Some(ScheduleEntry {
        event_id: event.id.clone().unwrap_or_default(),
        date,
        is_home: us.home_away.as_deref() == Some("home"),
        status,
        score,
        won,
        season: event
            .season
            .as_ref()
            .and_then(|s| s.year)
            .unwrap_or(date.year() as u16),
        season_type: SeasonType::from_code(event.season.as_ref().and_then(|s| s.season_type)),
        opponent,
        matchup_slug,
    })
}

fn map_roster(raw: RosterResponse) -> Vec<RosterAthlete> {
    raw.athletes
        .unwrap_or_default()
        .into_iter()
        .flat_map(|group| {
            let label = group.position.unwrap_or_default();
            group.items.unwrap_or_default().into_iter().map(move |a| RosterAthlete {
                id: a.id.unwrap_or_default(),
                name: a.display_name.unwrap_or_default(),
                position: a
                    .position
                    .and_then(|p| p.abbreviation.or(p.display_name))
                    .unwrap_or_default(),
                jersey: a.jersey,
                group: label.clone(),
            })
        })
        .collect()
}

fn map_athlete(player_id: &str, raw: AthleteOverviewResponse) -> Option<PlayerBio> {
    let ath = raw.athlete?;
    let status = ath
        .status
        .and_then(|s| s.name)
        .unwrap_or_else(|| if ath.active.unwrap_or(false) { "Active" } else { "Inactive" }.to_owned());
    let full_name = ath.full_name.unwrap_or_default();
    Some(PlayerBio {
        id: ath.id.unwrap_or_else(|| player_id.to_owned()),
        display_name: ath.display_name.unwrap_or_else(|| full_name.clone()),
        full_name,
        jersey: ath.jersey,
        position: ath.position.and_then(|p| p.display_name.or(p.abbreviation)),
        height: ath.display_height,
        weight: ath.display_weight,
        age: ath.age,
        college: ath.college.and_then(|c| c.name),
        team: ath.team.and_then(|t| t.display_name),
        status,
        headshot: ath.headshot.and_then(|h| h.href),
    })
}

/// Flatten every season type's events and join them with the event table.
fn map_gamelog(raw: GamelogResponse) -> GameLog {
    let events = raw.events.unwrap_or_default();
    let mut games: Vec<GameLogLine> = raw
        .season_types
        .unwrap_or_default()
        .into_iter()
        .flat_map(|st| st.categories.unwrap_or_default())
        .flat_map(|cat| cat.events.unwrap_or_default())
        .filter_map(|line| {
            let event_id = line.event_id?;
            let info = events.get(&event_id)?;
            let date = info.game_date.as_deref().and_then(parse_espn_date)?;
            Some(GameLogLine {
                date,
                opponent: info
                    .opponent
                    .as_ref()
                    .and_then(|o| o.abbreviation.clone())
                    .unwrap_or_else(|| "OPP".to_owned()),
                won: info.game_result.as_deref() == Some("W"),
                score: info.score.clone(),
                stats: line.stats.unwrap_or_default(),
                event_id,
            })
        })
        .collect();
    games.sort_by(|a, b| b.date.cmp(&a.date));

    GameLog {
        labels: raw.labels.unwrap_or_default(),
        display_name: raw
            .display_names
            .and_then(|names| names.into_iter().next())
            .unwrap_or_else(|| "Stats".to_owned()),
        games,
    }
}
