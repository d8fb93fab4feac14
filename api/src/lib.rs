pub mod bucket;
pub mod client;
pub mod corpus;
pub mod espn;
pub mod matchup;
pub mod pages;
pub mod reconcile;
pub mod teams;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub use bucket::{BucketView, Bucketer, Selection, SelectionEvent, Selector, Timeline, bucket_matches};
pub use matchup::MatchupIndex;
pub use reconcile::reconcile_schedule;
pub use teams::{TeamDirectory, canonical_slug, resolve_team, slugify};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// Canonical identity for a team, reachable through any of its synonyms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    pub name: String,   // "Pittsburgh Steelers"
    pub slug: String,   // "pittsburgh-steelers"
    pub city: String,   // "Pittsburgh"
    pub mascot: String, // "Steelers"
    pub abbrev: String, // "PIT"
    pub espn_id: String,
    /// Lowercase aliases: full name, mascot, abbreviation.
    pub synonyms: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Past,
}

impl MatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Live => "live",
            MatchStatus::Past => "past",
        }
    }

    /// Live and finished games carry a meaningful score.
    pub fn has_score(&self) -> bool {
        matches!(self, MatchStatus::Live | MatchStatus::Past)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u16,
    pub away: u16,
}

/// Point spread, e.g. "Chiefs -3.5".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    pub favorite: String,
    pub spread: f32,
}

impl Odds {
    /// Parse an ESPN odds detail string such as "KC -3.5". "EVEN" and
    /// anything without a trailing number yield None.
    pub fn parse_details(details: &str) -> Option<Odds> {
        let (favorite, spread) = details.trim().rsplit_once(' ')?;
        let spread: f32 = spread.trim_start_matches('-').parse().ok()?;
        let favorite = favorite.trim();
        if favorite.is_empty() {
            return None;
        }
        Some(Odds { favorite: favorite.to_owned(), spread })
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.spread.fract() == 0.0 {
            write!(f, "{} -{}", self.favorite, self.spread as i32)
        } else {
            write!(f, "{} -{:.1}", self.favorite, self.spread)
        }
    }
}

/// Where the mutable fields of a record last came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSource {
    /// Deterministic placeholder derived from the slug.
    #[default]
    Seeded,
    /// League-wide scoreboard event.
    Scoreboard { event_id: String },
    /// A team schedule event overlaid by the reconciler.
    Schedule { event_id: String },
}

/// One real-world matchup per season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub slug: String,
    pub season: u16,
    pub keyword: String, // "Steelers vs Ravens match player stats"
    pub home: String,
    pub away: String,
    pub status: MatchStatus,
    pub kickoff: DateTime<Utc>,
    pub time: String, // "1:00 PM EST", or the live clock
    pub score: Score,
    pub odds: Option<Odds>,
    pub stadium: String,
    pub result: Option<String>,
    pub source: RecordSource,
}

impl MatchupRecord {
    pub fn id(&self) -> &str {
        &self.slug
    }

    /// "Nov 24, 2024"
    pub fn date_label(&self) -> String {
        self.kickoff.format("%b %-d, %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleStatus {
    #[default]
    Upcoming,
    Live,
    Final,
}

impl ScheduleStatus {
    /// ESPN status state: "pre" | "in" | "post".
    pub fn from_state(state: &str) -> Self {
        match state {
            "in" => ScheduleStatus::Live,
            "post" => ScheduleStatus::Final,
            _ => ScheduleStatus::Upcoming,
        }
    }

    pub fn as_match_status(&self) -> MatchStatus {
        match self {
            ScheduleStatus::Upcoming => MatchStatus::Upcoming,
            ScheduleStatus::Live => MatchStatus::Live,
            ScheduleStatus::Final => MatchStatus::Past,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeasonType {
    Preseason,
    #[default]
    Regular,
    Postseason,
}

impl SeasonType {
    /// ESPN season type code: 1 pre, 2 regular, 3 post.
    pub fn from_code(code: Option<u8>) -> Self {
        match code {
            Some(1) => SeasonType::Preseason,
            Some(3) => SeasonType::Postseason,
            _ => SeasonType::Regular,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeasonType::Preseason => "Pre Season",
            SeasonType::Regular => "Regular Season",
            SeasonType::Postseason => "Post Season",
        }
    }
}

impl FromStr for SeasonType {
    type Err = String;

    /// "pre", "regular", "post" and their long forms; "playoffs" means post.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        match key.to_ascii_lowercase().as_str() {
            "pre" | "preseason" => Ok(SeasonType::Preseason),
            "regular" | "regularseason" | "reg" => Ok(SeasonType::Regular),
            "post" | "postseason" | "playoffs" => Ok(SeasonType::Postseason),
            _ => Err(format!("unknown season type {s:?} (expected pre/regular/post)")),
        }
    }
}

/// An authoritative game from a single team's schedule feed, seen from that
/// team's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub event_id: String,
    pub date: DateTime<Utc>,
    pub opponent: String, // display name, "Baltimore Ravens"
    pub is_home: bool,
    pub status: ScheduleStatus,
    pub score: Option<(u16, u16)>, // (us, them)
    pub won: Option<bool>,
    pub season: u16,
    pub season_type: SeasonType,
    /// Corpus page for this pairing, or a canonical "a-vs-b" slug.
    pub matchup_slug: String,
}

impl ScheduleEntry {
    /// Score oriented as (home, away).
    pub fn home_away_score(&self) -> Option<Score> {
        let (us, them) = self.score?;
        Some(if self.is_home {
            Score { home: us, away: them }
        } else {
            Score { home: them, away: us }
        })
    }
}

// ---------------------------------------------------------------------------
// Team page / player payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterAthlete {
    pub id: String,
    pub name: String,
    pub position: String,
    pub jersey: Option<String>,
    pub group: String, // "offense", "defense", "specialTeam"
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerBio {
    pub id: String,
    pub full_name: String,
    pub display_name: String,
    pub jersey: Option<String>,
    pub position: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub age: Option<u8>,
    pub college: Option<String>,
    pub team: Option<String>,
    pub status: String,
    pub headshot: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    pub labels: Vec<String>, // "CMP", "ATT", "YDS", ...
    pub display_name: String,
    /// Every game across pre, regular and post season, newest first.
    pub games: Vec<GameLogLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogLine {
    pub event_id: String,
    pub date: DateTime<Utc>,
    pub opponent: String, // abbreviation, "OPP" when missing
    pub won: bool,
    pub score: Option<String>,
    pub stats: Vec<String>,
}

/// Opaque prose bundle from an external biography source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Biography {
    pub summary: String,
    pub awards: Vec<String>,
    pub personal_life: String,
    pub playing_style: String,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn odds_display_drops_whole_number_decimal() {
        let whole = Odds { favorite: "Chiefs".into(), spread: 3.0 };
        let half = Odds { favorite: "Chiefs".into(), spread: 3.5 };
        assert_eq!(whole.to_string(), "Chiefs -3");
        assert_eq!(half.to_string(), "Chiefs -3.5");
    }

    #[test]
    fn odds_parse_espn_details() {
        let odds = Odds::parse_details("KC -3.5").unwrap();
        assert_eq!(odds.favorite, "KC");
        assert_eq!(odds.spread, 3.5);
        assert!(Odds::parse_details("EVEN").is_none());
        assert!(Odds::parse_details("N/A").is_none());
    }

    #[test]
    fn schedule_score_is_reoriented_for_away_games() {
        let entry = ScheduleEntry {
            event_id: "1".into(),
            date: Utc.with_ymd_and_hms(2024, 11, 17, 18, 0, 0).unwrap(),
            opponent: "Baltimore Ravens".into(),
            is_home: false,
            status: ScheduleStatus::Final,
            score: Some((18, 16)),
            won: Some(true),
            season: 2024,
            season_type: SeasonType::Regular,
            matchup_slug: String::new(),
        };
        assert_eq!(entry.home_away_score(), Some(Score { home: 16, away: 18 }));
    }

    #[test]
    fn season_type_parses_short_and_long_names() {
        assert_eq!("pre".parse::<SeasonType>(), Ok(SeasonType::Preseason));
        assert_eq!("Regular Season".parse::<SeasonType>(), Ok(SeasonType::Regular));
        assert_eq!("post-season".parse::<SeasonType>(), Ok(SeasonType::Postseason));
        assert_eq!("PLAYOFFS".parse::<SeasonType>(), Ok(SeasonType::Postseason));
        assert!("spring".parse::<SeasonType>().is_err());
    }

    #[test]
    fn status_mapping_from_espn_state() {
        assert_eq!(ScheduleStatus::from_state("pre"), ScheduleStatus::Upcoming);
        assert_eq!(ScheduleStatus::from_state("in").as_match_status(), MatchStatus::Live);
        assert_eq!(ScheduleStatus::from_state("post").as_match_status(), MatchStatus::Past);
    }
}
