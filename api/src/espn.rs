//! ESPN API raw wire types: serde shapes for deserializing ESPN responses.
//! These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Scoreboard and team schedule  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

/// `/teams/{id}/schedule`: same event shape as the scoreboard.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>, // "2024-11-17T21:25Z"
    pub season: Option<EspnSeason>,
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

impl EspnEvent {
    pub fn competition(&self) -> Option<&EspnCompetition> {
        self.competitions.as_ref()?.first()
    }

    /// Status lives on the competition in schedule responses and on the
    /// event in scoreboard responses.
    pub fn status(&self) -> Option<&EspnStatus> {
        self.competition()
            .and_then(|c| c.status.as_ref())
            .or(self.status.as_ref())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnSeason {
    pub year: Option<u16>,
    #[serde(rename = "type")]
    pub season_type: Option<u8>, // 1 pre, 2 regular, 3 post
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
    pub period: Option<u8>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>,  // "STATUS_FINAL"
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
    pub detail: Option<String>, // "Final", "Sun, November 17th at 1:00 PM EST"
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>, // "Q4 5:00"
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetition {
    pub id: Option<String>,
    pub date: Option<String>,
    pub venue: Option<EspnVenue>,
    pub status: Option<EspnStatus>,
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub odds: Option<Vec<EspnOdds>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<EspnScore>,
    pub winner: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnTeam {
    pub id: Option<String>,
    pub name: Option<String>, // "Steelers"
    #[serde(rename = "displayName")]
    pub display_name: Option<String>, // "Pittsburgh Steelers"
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub abbreviation: Option<String>,
    pub slug: Option<String>,
    pub logo: Option<String>,
}

/// Scoreboards send `"18"`; schedules send `{"value": 18.0, "displayValue": "18"}`.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum EspnScore {
    Text(String),
    Number(f64),
    Detailed {
        value: Option<f64>,
        #[serde(rename = "displayValue")]
        display_value: Option<String>,
    },
}

impl EspnScore {
    pub fn points(&self) -> Option<u16> {
        match self {
            EspnScore::Text(s) => s.trim().parse().ok(),
            EspnScore::Number(n) => to_points(*n),
            EspnScore::Detailed { value: Some(n), .. } => to_points(*n),
            EspnScore::Detailed { value: None, display_value } => {
                display_value.as_deref().and_then(|s| s.trim().parse().ok())
            }
        }
    }
}

fn to_points(n: f64) -> Option<u16> {
    (n.is_finite() && n >= 0.0 && n <= f64::from(u16::MAX)).then_some(n as u16)
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnOdds {
    pub details: Option<String>, // "PIT -3.0"
}

// ---------------------------------------------------------------------------
// Team page sources  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RosterResponse {
    pub athletes: Option<Vec<EspnRosterGroup>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnRosterGroup {
    pub position: Option<String>, // "offense"
    pub items: Option<Vec<EspnRosterAthlete>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnRosterAthlete {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub jersey: Option<String>,
    pub position: Option<EspnPosition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnPosition {
    pub abbreviation: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DepthChartResponse {
    pub depthchart: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct InjuriesResponse {
    pub injuries: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamStatsResponse {
    pub results: Option<TeamStatsResults>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TeamStatsResults {
    pub stats: Option<TeamStatsBlock>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TeamStatsBlock {
    pub categories: Option<Vec<Value>>,
}

// ---------------------------------------------------------------------------
// Athletes  (common v3 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AthleteOverviewResponse {
    pub athlete: Option<EspnAthlete>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnAthlete {
    pub id: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub jersey: Option<String>,
    pub position: Option<EspnPosition>,
    #[serde(rename = "displayHeight")]
    pub display_height: Option<String>,
    #[serde(rename = "displayWeight")]
    pub display_weight: Option<String>,
    pub age: Option<u8>,
    pub college: Option<EspnNamed>,
    pub team: Option<EspnTeam>,
    pub status: Option<EspnNamed>,
    pub active: Option<bool>,
    pub headshot: Option<EspnHref>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnNamed {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnHref {
    pub href: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GamelogResponse {
    pub labels: Option<Vec<String>>,
    #[serde(rename = "displayNames")]
    pub display_names: Option<Vec<String>>,
    /// Event id → game info.
    pub events: Option<HashMap<String, EspnGamelogEvent>>,
    #[serde(rename = "seasonTypes")]
    pub season_types: Option<Vec<EspnGamelogSeasonType>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnGamelogEvent {
    #[serde(rename = "gameDate")]
    pub game_date: Option<String>,
    pub opponent: Option<EspnTeam>,
    #[serde(rename = "gameResult")]
    pub game_result: Option<String>, // "W" | "L" | "T"
    pub score: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnGamelogSeasonType {
    pub categories: Option<Vec<EspnGamelogCategory>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnGamelogCategory {
    pub events: Option<Vec<EspnGamelogStats>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnGamelogStats {
    #[serde(rename = "eventId")]
    pub event_id: Option<String>,
    pub stats: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CareerStatsResponse {
    pub categories: Option<Vec<Value>>,
}
