use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use chrono::Local;
use statyards_api::pages::{Dashboard, MatchupPage, PlayerProfile, TeamPage};
use statyards_api::{Selection, SelectionEvent, Selector};

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, selection: Selection) -> Self {
        Self { settings, state: AppState::new(selection) }
    }

    // -----------------------------------------------------------------------
    // Network response handlers
    // -----------------------------------------------------------------------

    pub fn on_dashboard_loaded(&mut self, dashboard: Dashboard) {
        self.state.clear_error();
        self.state.dashboard = Some(dashboard);
        self.state.last_updated = Some(Local::now());
    }

    /// A refresh keeps the selection; the bucketer re-derives the effective
    /// month and day from the new games on the next render.
    pub fn on_dashboard_updated(&mut self, dashboard: Dashboard) {
        self.on_dashboard_loaded(dashboard);
        self.state.refreshes = self.state.refreshes.saturating_add(1);
    }

    pub fn on_matchup_loaded(&mut self, page: MatchupPage) {
        self.state.clear_error();
        self.state.matchup = Some(page);
    }

    pub fn on_team_loaded(&mut self, page: TeamPage) {
        self.state.clear_error();
        self.state.team = Some(page);
    }

    pub fn on_player_loaded(&mut self, profile: PlayerProfile) {
        self.state.clear_error();
        self.state.player = Some(profile);
    }

    pub fn on_not_found(&mut self, message: String) {
        self.state.last_error = Some(message);
        self.state.not_found = true;
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
        self.state.not_found = false;
    }

    // -----------------------------------------------------------------------
    // Selection transitions
    // -----------------------------------------------------------------------

    pub fn select_month(&mut self, month: impl Into<Selector>) {
        self.state.selection.apply(SelectionEvent::SelectMonth(month.into()));
    }

    pub fn select_date(&mut self, date: impl Into<Selector>) {
        self.state.selection.apply(SelectionEvent::SelectDate(date.into()));
    }
}
