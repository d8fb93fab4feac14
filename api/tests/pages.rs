use mockito::Server;
use statyards_api::client::NflApi;
use chrono::{TimeZone, Utc};
use statyards_api::pages::{BiographySource, NoBiography, ScheduleFilter};
use statyards_api::reconcile::Overlay;
use statyards_api::{Biography, MatchStatus, RecordSource, Score, SeasonType, Selection};

const STEELERS_SCHEDULE: &str = r#"{
    "events": [
        {
            "id": "401671700",
            "date": "2024-11-17T18:00Z",
            "season": {"year": 2024, "type": 2},
            "competitions": [{
                "status": {"type": {"state": "post"}},
                "competitors": [
                    {"homeAway": "home", "winner": true, "score": {"value": 18.0},
                     "team": {"id": "23", "displayName": "Pittsburgh Steelers"}},
                    {"homeAway": "away", "winner": false, "score": {"value": 16.0},
                     "team": {"id": "33", "displayName": "Baltimore Ravens"}}
                ]
            }]
        }
    ]
}"#;

const ROSTER: &str = r#"{"athletes": [
    {"position": "defense", "items": [
        {"id": "4040", "displayName": "T.J. Watt", "jersey": "90", "position": {"abbreviation": "LB"}},
        {"id": "4041", "displayName": "Cam Heyward", "jersey": "97", "position": {"abbreviation": "DT"}}
    ]}
]}"#;

fn api(server: &Server) -> NflApi {
    NflApi::with_bases(server.url(), server.url())
}

#[tokio::test]
async fn team_page_degrades_each_source_independently() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/teams/23/schedule").with_status(500).create_async().await;
    server
        .mock("GET", "/teams/23/roster")
        .with_status(200)
        .with_body(ROSTER)
        .create_async()
        .await;
    server.mock("GET", "/teams/23/depthcharts").with_status(404).create_async().await;
    server
        .mock("GET", "/teams/23/statistics")
        .with_status(200)
        .with_body(r#"{"results": {"stats": {"categories": [{"name": "passing"}, {"name": "rushing"}]}}}"#)
        .create_async()
        .await;

    let page = api(&server).load_team_page("pittsburgh-steelers").await.unwrap();
    assert_eq!(page.team.name, "Pittsburgh Steelers");
    assert!(page.schedule.is_empty());
    assert_eq!(page.roster.len(), 2);
    assert_eq!(page.roster[0].name, "T.J. Watt");
    assert!(page.depth_chart.is_empty());
    assert!(page.injuries.is_empty());
    assert_eq!(page.stats.len(), 2);
    assert!(!page.matchups.is_empty());
    assert!(page.matchups.windows(2).all(|w| w[0].kickoff <= w[1].kickoff));
}

#[tokio::test]
async fn team_page_accepts_a_mascot() {
    let mut server = Server::new_async().await;
    let roster = server
        .mock("GET", "/teams/23/roster")
        .with_status(200)
        .with_body(ROSTER)
        .create_async()
        .await;

    let page = api(&server).load_team_page("Steelers").await.unwrap();
    assert_eq!(page.team.slug, "pittsburgh-steelers");
    roster.assert_async().await;
}

fn schedule_event(id: &str, date: &str, season_type: u8, state: &str, opponent: &str) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "date": "{date}",
            "season": {{"year": 2024, "type": {season_type}}},
            "competitions": [{{
                "status": {{"type": {{"state": "{state}"}}}},
                "competitors": [
                    {{"homeAway": "home", "winner": true, "score": {{"value": 20.0}},
                     "team": {{"id": "23", "displayName": "Pittsburgh Steelers"}}}},
                    {{"homeAway": "away", "winner": false, "score": {{"value": 10.0}},
                     "team": {{"id": "1", "displayName": "{opponent}"}}}}
                ]
            }}]
        }}"#
    )
}

#[tokio::test]
async fn team_schedule_drills_into_the_latest_played_game() {
    let mut server = Server::new_async().await;
    let events = [
        schedule_event("1", "2024-08-17T23:00Z", 1, "post", "Buffalo Bills"),
        schedule_event("2", "2024-10-06T17:00Z", 2, "post", "Dallas Cowboys"),
        schedule_event("3", "2024-11-12T17:00Z", 2, "post", "Cleveland Browns"),
        schedule_event("4", "2024-11-26T17:00Z", 2, "pre", "Cincinnati Bengals"),
        schedule_event("5", "2024-12-08T18:00Z", 2, "pre", "Philadelphia Eagles"),
    ];
    server
        .mock("GET", "/teams/23/schedule")
        .with_status(200)
        .with_body(format!(r#"{{"events": [{}]}}"#, events.join(",")))
        .create_async()
        .await;

    let page = api(&server).load_team_page("pittsburgh-steelers").await.unwrap();
    let schedule = page.schedule_at(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
    assert!(schedule.live.is_empty());
    assert_eq!(schedule.upcoming.len(), 1);
    assert_eq!(schedule.past.len(), 4);

    // A kickoff that has passed without a final still counts as played.
    let view = schedule.view(&Selection::default(), ScheduleFilter::default());
    assert_eq!(view.effective_month.as_deref(), Some("NOV"));
    assert_eq!(view.effective_date.as_deref(), Some("Nov 26"));
    assert_eq!(view.visible[0].0.opponent, "Cincinnati Bengals");

    let preseason = ScheduleFilter { season: Some(2024), season_type: Some(SeasonType::Preseason) };
    let view = schedule.view(&Selection::default(), preseason);
    assert_eq!(view.available_seasons, vec![2024]);
    assert_eq!(view.available_months, vec!["AUG".to_owned()]);
    assert_eq!(view.visible[0].0.opponent, "Buffalo Bills");
}

#[tokio::test]
async fn matchup_page_overlays_the_home_schedule() {
    let mut server = Server::new_async().await;
    let schedule = server
        .mock("GET", "/teams/23/schedule")
        .with_status(200)
        .with_body(STEELERS_SCHEDULE)
        .create_async()
        .await;

    let page = api(&server)
        .load_matchup_page("steelers-vs-ravens-match-player-stats")
        .await
        .unwrap();
    schedule.assert_async().await;

    assert_eq!(page.overlay, Overlay::Applied { event_id: "401671700".into() });
    let record = &page.record;
    assert_eq!(record.home, "Steelers");
    assert_eq!(record.away, "Ravens");
    assert_eq!(record.score, Score { home: 18, away: 16 });
    assert_eq!(record.status, MatchStatus::Past);
    assert_eq!(record.result.as_deref(), Some("18 - 16"));
    assert_eq!(record.date_label(), "Nov 17, 2024");
    assert_eq!(record.source, RecordSource::Schedule { event_id: "401671700".into() });

    assert!(page.related.len() <= 4);
    assert!(!page.related.is_empty());
    assert!(page.related.iter().all(|m| m.slug != record.slug && m.keyword.contains("Steelers")));
}

#[tokio::test]
async fn matchup_page_keeps_placeholder_when_schedule_is_down() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/teams/23/schedule").with_status(502).create_async().await;

    let page = api(&server)
        .load_matchup_page("steelers-vs-ravens-match-player-stats")
        .await
        .unwrap();
    assert_eq!(page.overlay, Overlay::NoMatch);
    assert_eq!(page.record.source, RecordSource::Seeded);
    assert_eq!(page.record.score, Score { home: 39, away: 16 });
    assert_eq!(page.record.stadium, "NFL Stadium");
}

#[tokio::test]
async fn missing_matchup_is_not_found() {
    let server = Server::new_async().await;
    let err = api(&server).load_matchup_page("jets-vs-nowhere").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn dashboard_splits_scoreboard_by_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/scoreboard")
        .with_status(200)
        .with_body(
            r#"{"events": [
                {"id": "1", "status": {"type": {"state": "post"}},
                 "competitions": [{"date": "2024-11-10T18:00Z", "competitors": [
                    {"homeAway": "home", "score": "24", "team": {"displayName": "Buffalo Bills", "shortDisplayName": "Bills"}},
                    {"homeAway": "away", "score": "17", "team": {"displayName": "New York Jets", "shortDisplayName": "Jets"}}]}]},
                {"id": "2", "status": {"type": {"state": "pre"}},
                 "competitions": [{"date": "2024-11-24T18:00Z", "odds": [{"details": "BUF -6.5"}], "competitors": [
                    {"homeAway": "home", "team": {"displayName": "Buffalo Bills", "shortDisplayName": "Bills"}},
                    {"homeAway": "away", "team": {"displayName": "Miami Dolphins", "shortDisplayName": "Dolphins"}}]}]}
            ]}"#,
        )
        .create_async()
        .await;

    let dashboard = api(&server).load_dashboard().await;
    assert!(dashboard.live.is_empty());
    assert_eq!(dashboard.upcoming.len(), 1);
    assert_eq!(dashboard.upcoming[0].odds.as_ref().map(|o| o.spread), Some(6.5));
    assert_eq!(dashboard.past.len(), 1);
    assert_eq!(dashboard.past[0].result.as_deref(), Some("Final"));
}

#[tokio::test]
async fn dashboard_is_empty_when_scoreboard_fails() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/scoreboard").with_status(500).create_async().await;
    assert!(api(&server).load_dashboard().await.is_empty());
}

struct CannedBiography;

impl BiographySource for CannedBiography {
    async fn biography(&self, name: &str) -> Option<Biography> {
        Some(Biography {
            summary: format!("{name} plays edge rusher."),
            awards: vec!["Defensive Player of the Year (2021)".into()],
            ..Biography::default()
        })
    }
}

#[tokio::test]
async fn player_profile_joins_every_source() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/4040")
        .with_status(200)
        .with_body(
            r#"{"athlete": {"id": "4040", "fullName": "T.J. Watt", "displayName": "T.J. Watt",
                "jersey": "90", "position": {"displayName": "Linebacker"}, "age": 30,
                "college": {"name": "Wisconsin"}, "team": {"displayName": "Pittsburgh Steelers"},
                "status": {"name": "Active"}}}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/4040/gamelog")
        .with_status(200)
        .with_body(
            r#"{"labels": ["TOT", "SACK"], "displayNames": ["Defensive"],
                "events": {"10": {"gameDate": "2024-09-08T17:00:00Z", "opponent": {"abbreviation": "ATL"}, "gameResult": "W", "score": "18-10"}},
                "seasonTypes": [{"categories": [{"events": [{"eventId": "10", "stats": ["4", "1.0"]}]}]}]}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/4040/stats")
        .with_status(200)
        .with_body(r#"{"categories": [{"name": "defensive"}]}"#)
        .create_async()
        .await;

    let profile = api(&server)
        .load_player_profile("4040", &CannedBiography)
        .await
        .unwrap();
    assert_eq!(profile.bio.full_name, "T.J. Watt");
    assert_eq!(profile.bio.position.as_deref(), Some("Linebacker"));
    assert_eq!(profile.bio.college.as_deref(), Some("Wisconsin"));
    assert_eq!(profile.gamelog.games.len(), 1);
    assert_eq!(profile.gamelog.games[0].opponent, "ATL");
    assert_eq!(profile.career.len(), 1);
    assert_eq!(
        profile.biography.map(|b| b.summary).as_deref(),
        Some("T.J. Watt plays edge rusher.")
    );
}

#[tokio::test]
async fn unknown_player_is_not_found() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/999").with_status(404).create_async().await;

    let err = api(&server).load_player_profile("999", &NoBiography).await.unwrap_err();
    assert!(err.is_not_found());
}
