use chrono::{DateTime, Local};
use statyards_api::Selection;
use statyards_api::pages::{Dashboard, MatchupPage, PlayerProfile, ScheduleFilter, TeamPage};

/// What the last request produced. Each load replaces only its own slot.
#[derive(Debug, Default)]
pub struct AppState {
    /// Month/day drill-down over finished games (dashboard or team schedule).
    pub selection: Selection,
    /// Season narrowing for the team schedule.
    pub schedule_filter: ScheduleFilter,
    pub dashboard: Option<Dashboard>,
    pub matchup: Option<MatchupPage>,
    pub team: Option<TeamPage>,
    pub player: Option<PlayerProfile>,
    pub last_error: Option<String>,
    pub not_found: bool,
    pub last_updated: Option<DateTime<Local>>,
    pub refreshes: u32,
}

impl AppState {
    pub fn new(selection: Selection) -> Self {
        Self { selection, ..Self::default() }
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
        self.not_found = false;
    }
}
