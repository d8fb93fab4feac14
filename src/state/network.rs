use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use statyards_api::client::{ApiError, NflApi};
use statyards_api::pages::NoBiography;
use tokio::sync::mpsc;

/// Owns the API client and answers requests one at a time.
pub struct NetworkWorker {
    client: NflApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        client: NflApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self { client, requests, responses }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let result = match request {
                NetworkRequest::LoadDashboard => Ok(self.handle_load_dashboard(false).await),
                NetworkRequest::RefreshDashboard => Ok(self.handle_load_dashboard(true).await),
                NetworkRequest::LoadMatchup { slug } => self.handle_load_matchup(slug).await,
                NetworkRequest::LoadTeam { slug } => self.handle_load_team(slug).await,
                NetworkRequest::LoadPlayer { player_id } => self.handle_load_player(player_id).await,
            };

            debug!("network request complete");
            let response = result.unwrap_or_else(|err| match err {
                ApiError::NotFound(message) => NetworkResponse::NotFound { message },
                other => NetworkResponse::Error { message: other.to_string() },
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_dashboard(&self, refresh: bool) -> NetworkResponse {
        debug!("loading scoreboard (refresh: {refresh})");
        let dashboard = self.client.load_dashboard().await;
        if refresh {
            NetworkResponse::DashboardUpdated { dashboard }
        } else {
            NetworkResponse::DashboardLoaded { dashboard }
        }
    }

    async fn handle_load_matchup(&self, slug: String) -> Result<NetworkResponse, ApiError> {
        debug!("loading matchup {slug}");
        let page = self.client.load_matchup_page(&slug).await?;
        Ok(NetworkResponse::MatchupLoaded { page: Box::new(page) })
    }

    async fn handle_load_team(&self, slug: String) -> Result<NetworkResponse, ApiError> {
        debug!("loading team page {slug}");
        let page = self.client.load_team_page(&slug).await?;
        Ok(NetworkResponse::TeamLoaded { page: Box::new(page) })
    }

    async fn handle_load_player(&self, player_id: String) -> Result<NetworkResponse, ApiError> {
        debug!("loading player {player_id}");
        let profile = self.client.load_player_profile(&player_id, &NoBiography).await?;
        Ok(NetworkResponse::PlayerLoaded { profile: Box::new(profile) })
    }
}
