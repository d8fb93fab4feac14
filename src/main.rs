mod app;
mod render;
mod state;

use crate::app::App;
use crate::state::app_settings::{AppSettings, LOG_ENV};
use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::network::NetworkWorker;
use crate::state::refresher::PeriodicRefresher;
use clap::{Parser, Subcommand};
use log::{debug, error};
use chrono::Utc;
use statyards_api::pages::ScheduleFilter;
use statyards_api::{MatchupIndex, SeasonType, Selection};
use std::process::ExitCode;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "statyards", version, about = "NFL matchups from the topical corpus, the live scoreboard and team schedules")]
struct Cli {
    /// Debug logging (overridden by STATYARDS_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// League scoreboard: live, upcoming, and finished games by month and day
    Dashboard {
        /// Month bucket, e.g. NOV ("all" for the most recent)
        #[arg(long, default_value = "all")]
        month: String,
        /// Day inside the month, e.g. "Nov 17" ("all" for the first)
        #[arg(long, default_value = "all")]
        date: String,
        /// Keep running and refresh every 30 seconds
        #[arg(long)]
        watch: bool,
    },
    /// One matchup page, reconciled against the home team's schedule
    Matchup { slug: String },
    /// Team page: schedule, roster, depth chart, injuries, stats
    Team {
        slug: String,
        /// Month bucket of played games ("all" for the most recent)
        #[arg(long, default_value = "all")]
        month: String,
        /// Day inside the month ("all" for the latest game)
        #[arg(long, default_value = "all")]
        date: String,
        /// Only games from this season, e.g. 2024
        #[arg(long)]
        season: Option<u16>,
        /// Season type: pre/regular/post
        #[arg(long)]
        season_type: Option<SeasonType>,
    },
    /// Player overview, game log and career stats by ESPN athlete id
    Player { id: String },
    /// Show how a free-text team name resolves
    Resolve { name: String },
    /// Every matchup slug in the corpus
    Slugs,
}

#[tokio::main]
async fn main() -> ExitCode {
    better_panic::install();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // `log` records from the library are bridged by the subscriber's tracing-log feature.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = AppSettings::load();
    debug!("settings: {settings:?}");

    let mut schedule_filter = ScheduleFilter::default();
    let (request, filters, watch) = match cli.command {
        Command::Resolve { name } => {
            println!("{}", render::resolution(&name));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Slugs => {
            match &settings.corpus_path {
                Some(path) => debug!("corpus from {}", path.display()),
                None => debug!("embedded corpus"),
            }
            print!("{}", render::slugs(MatchupIndex::global()));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Dashboard { month, date, watch } => {
            (NetworkRequest::LoadDashboard, Some((month, date)), watch)
        }
        Command::Matchup { slug } => (NetworkRequest::LoadMatchup { slug }, None, false),
        Command::Team { slug, month, date, season, season_type } => {
            schedule_filter = ScheduleFilter { season, season_type };
            (NetworkRequest::LoadTeam { slug }, Some((month, date)), false)
        }
        Command::Player { id } => (NetworkRequest::LoadPlayer { player_id: id }, None, false),
    };

    let mut app = App::new(settings, Selection::default());
    app.state.schedule_filter = schedule_filter;
    if let Some((month, date)) = filters {
        app.select_month(month.as_str());
        app.select_date(date.as_str());
    }

    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, mut network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    let network_worker = NetworkWorker::new(app.settings.api(), network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    let periodic_task = watch.then(|| {
        let refresher = PeriodicRefresher::new(network_req_tx.clone(), app.settings.refresh_every);
        tokio::spawn(refresher.run())
    });

    network_req_tx.send(request).await?;

    let mut code = 0;
    while let Some(response) = network_resp_rx.recv().await {
        code = handle_network_response(response, &mut app);
        if !watch {
            break;
        }
    }

    network_task.abort();
    if let Some(task) = periodic_task {
        task.abort();
    }
    Ok(ExitCode::from(code))
}

fn handle_network_response(response: NetworkResponse, app: &mut App) -> u8 {
    match response {
        NetworkResponse::DashboardLoaded { dashboard } => app.on_dashboard_loaded(dashboard),
        NetworkResponse::DashboardUpdated { dashboard } => app.on_dashboard_updated(dashboard),
        NetworkResponse::MatchupLoaded { page } => app.on_matchup_loaded(*page),
        NetworkResponse::TeamLoaded { page } => app.on_team_loaded(*page),
        NetworkResponse::PlayerLoaded { profile } => app.on_player_loaded(*profile),
        NetworkResponse::NotFound { message } => app.on_not_found(message),
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            app.on_error(message);
        }
    }
    draw(app)
}

/// Print whatever the last response filled in; returns the exit status.
fn draw(app: &mut App) -> u8 {
    let state = &mut app.state;
    if let Some(message) = state.last_error.take() {
        if state.not_found {
            eprintln!("not found: {message}");
            return EXIT_NOT_FOUND;
        }
        eprintln!("error: {message}");
        return EXIT_FAILURE;
    }

    if let Some(dashboard) = &state.dashboard {
        if let Some(at) = state.last_updated {
            println!("-- scoreboard {} (refresh #{}) --", at.format("%H:%M:%S"), state.refreshes);
        }
        print!("{}", render::dashboard(dashboard, &state.selection));
    }
    if let Some(page) = state.matchup.take() {
        print!("{}", render::matchup(&page));
    }
    if let Some(page) = state.team.take() {
        print!("{}", render::team(&page, &state.selection, state.schedule_filter, Utc::now()));
    }
    if let Some(profile) = state.player.take() {
        print!("{}", render::player(&profile));
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_dashboard_filters() {
        let cli = Cli::try_parse_from(["statyards", "dashboard", "--month", "nov", "--watch"]).unwrap();
        match cli.command {
            Command::Dashboard { month, date, watch } => {
                assert_eq!(month, "nov");
                assert_eq!(date, "all");
                assert!(watch);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_team_schedule_filters() {
        let cli = Cli::try_parse_from([
            "statyards", "team", "steelers", "--date", "Nov 17", "--season", "2024", "--season-type", "regular",
        ])
        .unwrap();
        match cli.command {
            Command::Team { slug, month, date, season, season_type } => {
                assert_eq!(slug, "steelers");
                assert_eq!(month, "all");
                assert_eq!(date, "Nov 17");
                assert_eq!(season, Some(2024));
                assert_eq!(season_type, Some(SeasonType::Regular));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["statyards", "team", "steelers", "--season-type", "spring"]).is_err());
    }

    #[test]
    fn not_found_maps_to_exit_code_three() {
        let mut app = App::new(AppSettings::default(), Selection::default());
        let code = handle_network_response(NetworkResponse::NotFound { message: "matchup x".into() }, &mut app);
        assert_eq!(code, EXIT_NOT_FOUND);
    }
}
