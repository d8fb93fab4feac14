//! Page-level assembly: each page fans out to its sources and degrades any
//! source that fails into an empty collection.
use crate::bucket::{BucketView, Bucketer, Selection, Timeline};
use crate::client::{ApiError, ApiResult, NflApi};
use crate::reconcile::{Overlay, overlay_schedule};
use crate::teams::canonical_slug;
use crate::{
    Biography, GameLog, MatchStatus, MatchupRecord, PlayerBio, RosterAthlete, ScheduleEntry,
    ScheduleStatus, SeasonType, TeamDirectory, TeamRecord, resolve_team,
};
use chrono::{DateTime, Utc};
use futures_util::join;
use log::warn;
use serde_json::Value;
use std::future::Future;

fn degrade<T: Default>(source: &str, subject: &str, result: ApiResult<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("{source} unavailable for {subject}: {e}");
        T::default()
    })
}

/// League-wide slate split by status, newest first within each group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub live: Vec<MatchupRecord>,
    pub upcoming: Vec<MatchupRecord>,
    pub past: Vec<MatchupRecord>,
}

impl Dashboard {
    pub fn from_records(records: Vec<MatchupRecord>) -> Self {
        let mut dashboard = Dashboard::default();
        for record in records {
            match record.status {
                MatchStatus::Live => dashboard.live.push(record),
                MatchStatus::Upcoming => dashboard.upcoming.push(record),
                MatchStatus::Past => dashboard.past.push(record),
            }
        }
        dashboard
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.upcoming.is_empty() && self.past.is_empty()
    }

    /// Month/day drill-down over the finished games.
    pub fn view(&self, selection: &Selection) -> BucketView<'_, MatchupRecord> {
        Bucketer::eastern().view(&self.past, selection)
    }
}

#[derive(Debug, Clone)]
pub struct TeamPage {
    pub team: &'static TeamRecord,
    pub schedule: Vec<ScheduleEntry>,
    pub roster: Vec<RosterAthlete>,
    pub depth_chart: Vec<Value>,
    pub injuries: Vec<Value>,
    pub stats: Vec<Value>,
    /// Corpus pages featuring this team, earliest first.
    pub matchups: Vec<MatchupRecord>,
}

impl TeamPage {
    /// The schedule as of `now`: live, upcoming and played games.
    pub fn schedule_at(&self, now: DateTime<Utc>) -> TeamSchedule<'_> {
        TeamSchedule::split(&self.schedule, now)
    }
}

/// A game the team has already played. A stale "scheduled" entry whose
/// kickoff has passed still counts as played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedGame<'a>(pub &'a ScheduleEntry);

impl Timeline for PlayedGame<'_> {
    fn kickoff(&self) -> DateTime<Utc> {
        self.0.date
    }

    fn status(&self) -> MatchStatus {
        MatchStatus::Past
    }

    fn season(&self) -> Option<u16> {
        Some(self.0.season)
    }

    fn season_type(&self) -> Option<SeasonType> {
        Some(self.0.season_type)
    }
}

/// Season filter applied before the month/day drill-down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub season: Option<u16>,
    pub season_type: Option<SeasonType>,
}

/// A team schedule split against the wall clock.
#[derive(Debug, Clone, Default)]
pub struct TeamSchedule<'a> {
    pub live: Vec<&'a ScheduleEntry>,
    /// Soonest first.
    pub upcoming: Vec<&'a ScheduleEntry>,
    /// Newest first.
    pub past: Vec<PlayedGame<'a>>,
}

impl<'a> TeamSchedule<'a> {
    pub fn split(entries: &'a [ScheduleEntry], now: DateTime<Utc>) -> Self {
        let mut ordered: Vec<&ScheduleEntry> = entries.iter().collect();
        ordered.sort_by_key(|e| e.date);

        let mut schedule = TeamSchedule::default();
        for entry in ordered {
            match entry.status {
                ScheduleStatus::Live => schedule.live.push(entry),
                ScheduleStatus::Final => schedule.past.push(PlayedGame(entry)),
                ScheduleStatus::Upcoming if entry.date < now => schedule.past.push(PlayedGame(entry)),
                ScheduleStatus::Upcoming => schedule.upcoming.push(entry),
            }
        }
        schedule.past.reverse();
        schedule
    }

    /// Season types present among played games, in season order.
    pub fn season_types(&self) -> Vec<SeasonType> {
        let mut types: Vec<SeasonType> = self.past.iter().map(|g| g.0.season_type).collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Month/day drill-down over the played games. Team pages bucket in UTC.
    pub fn view(&self, selection: &Selection, filter: ScheduleFilter) -> BucketView<'_, PlayedGame<'a>> {
        Bucketer::utc()
            .season(filter.season)
            .season_type(filter.season_type)
            .view(&self.past, selection)
    }
}

#[derive(Debug, Clone)]
pub struct MatchupPage {
    pub record: MatchupRecord,
    pub overlay: Overlay,
    pub related: Vec<MatchupRecord>,
}

/// External prose about a player. Failures are the source's business; it
/// just answers None.
pub trait BiographySource {
    fn biography(&self, name: &str) -> impl Future<Output = Option<Biography>> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoBiography;

impl BiographySource for NoBiography {
    async fn biography(&self, _name: &str) -> Option<Biography> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct PlayerProfile {
    pub bio: PlayerBio,
    pub gamelog: GameLog,
    pub career: Vec<Value>,
    pub biography: Option<Biography>,
}

impl NflApi {
    /// Scoreboard split into live, upcoming and past. An unavailable
    /// scoreboard yields an empty dashboard.
    pub async fn load_dashboard(&self) -> Dashboard {
        let records = degrade("scoreboard", "league", self.fetch_scoreboard().await);
        Dashboard::from_records(records)
    }

    pub async fn load_team_page(&self, team: &str) -> ApiResult<TeamPage> {
        let record = TeamDirectory::global()
            .by_slug(team)
            .or_else(|| resolve_team(team))
            .ok_or_else(|| ApiError::NotFound(format!("team {team}")))?;
        let slug = record.slug.as_str();

        let (schedule, roster, depth_chart, injuries, stats) = join!(
            self.fetch_team_schedule(slug),
            self.fetch_roster(slug),
            self.fetch_depth_chart(slug),
            self.fetch_injuries(slug),
            self.fetch_team_stats(slug),
        );

        Ok(TeamPage {
            team: record,
            schedule: degrade("schedule", slug, schedule),
            roster: degrade("roster", slug, roster),
            depth_chart: degrade("depth chart", slug, depth_chart),
            injuries: degrade("injuries", slug, injuries),
            stats: degrade("team stats", slug, stats),
            matchups: self.index().matchups_by_team(&record.name),
        })
    }

    /// Corpus record for `slug`, corrected by the home team's schedule when
    /// it has the game.
    pub async fn load_matchup_page(&self, slug: &str) -> ApiResult<MatchupPage> {
        let index = self.index();
        let placeholder = index
            .get_matchup_by_slug(slug)
            .ok_or_else(|| ApiError::NotFound(format!("matchup {slug}")))?;

        let home_slug = canonical_slug(&placeholder.home);
        let schedule = degrade("schedule", &home_slug, self.fetch_team_schedule(&home_slug).await);
        let (record, overlay) = overlay_schedule(&home_slug, &schedule, placeholder);
        let related = index.related_matchups(&record);

        Ok(MatchupPage { record, overlay, related })
    }

    /// Overview and game log first, then career stats and the biography once
    /// the player's name is known.
    pub async fn load_player_profile<B: BiographySource>(
        &self,
        player_id: &str,
        biography: &B,
    ) -> ApiResult<PlayerProfile> {
        let (bio, gamelog) = join!(self.fetch_athlete(player_id), self.fetch_gamelog(player_id));
        let bio = bio?;
        let gamelog = degrade("game log", player_id, gamelog);

        let (career, prose) = join!(
            self.fetch_career_stats(player_id),
            biography.biography(&bio.full_name),
        );

        Ok(PlayerProfile {
            career: degrade("career stats", player_id, career),
            biography: prose,
            bio,
            gamelog,
        })
    }
}
