use statyards_api::pages::{Dashboard, MatchupPage, PlayerProfile, TeamPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkRequest {
    LoadDashboard,
    /// Same as LoadDashboard, sent by the periodic refresher.
    RefreshDashboard,
    LoadMatchup { slug: String },
    LoadTeam { slug: String },
    LoadPlayer { player_id: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    DashboardLoaded { dashboard: Dashboard },
    DashboardUpdated { dashboard: Dashboard },
    MatchupLoaded { page: Box<MatchupPage> },
    TeamLoaded { page: Box<TeamPage> },
    PlayerLoaded { profile: Box<PlayerProfile> },
    NotFound { message: String },
    Error { message: String },
}
