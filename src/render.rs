//! Plain-text output for each command.
use chrono::{DateTime, Utc};
use statyards_api::pages::{Dashboard, MatchupPage, PlayerProfile, ScheduleFilter, TeamPage};
use statyards_api::reconcile::Overlay;
use statyards_api::{
    MatchupIndex, MatchupRecord, ScheduleEntry, ScheduleStatus, Selection, canonical_slug, resolve_team,
};
use std::fmt::Write;

pub fn match_line(m: &MatchupRecord) -> String {
    let mut line = if m.status.has_score() {
        format!("{} {} - {} {}", m.home, m.score.home, m.score.away, m.away)
    } else {
        format!("{} vs {}", m.home, m.away)
    };
    let _ = write!(line, "  {} {}", m.date_label(), m.time);
    if let Some(result) = &m.result {
        let _ = write!(line, "  ({result})");
    } else if let Some(odds) = &m.odds {
        let _ = write!(line, "  [{odds}]");
    }
    line
}

fn labels(all: &[String], active: Option<&String>) -> String {
    all.iter()
        .map(|l| if Some(l) == active { format!("[{l}]") } else { l.clone() })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn dashboard(dashboard: &Dashboard, selection: &Selection) -> String {
    let mut out = String::new();
    for (title, games) in [("LIVE", &dashboard.live), ("UPCOMING", &dashboard.upcoming)] {
        let _ = writeln!(out, "{title} ({})", games.len());
        for m in games {
            let _ = writeln!(out, "  {}", match_line(m));
        }
    }

    let view = dashboard.view(selection);
    let _ = writeln!(out, "PAST ({})", dashboard.past.len());
    if view.is_empty() {
        let _ = writeln!(out, "  no finished games");
        return out;
    }
    let _ = writeln!(
        out,
        "  months: {}",
        labels(&view.available_months, view.effective_month.as_ref())
    );
    let _ = writeln!(
        out,
        "  dates:  {}",
        labels(&view.available_dates, view.effective_date.as_ref())
    );
    for m in &view.visible {
        let _ = writeln!(out, "  {}", match_line(m));
    }
    out
}

pub fn matchup(page: &MatchupPage) -> String {
    let r = &page.record;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", r.keyword, r.slug);
    let _ = writeln!(out, "  {}", match_line(r));
    let _ = writeln!(out, "  status:  {}", r.status);
    let _ = writeln!(out, "  stadium: {}", r.stadium);
    let source = match &page.overlay {
        Overlay::Applied { event_id } => format!("schedule event {event_id}"),
        Overlay::NoMatch => "placeholder".to_owned(),
    };
    let _ = writeln!(out, "  source:  {source}");
    if !page.related.is_empty() {
        let _ = writeln!(out, "related:");
        for m in &page.related {
            let _ = writeln!(out, "  {}", m.slug);
        }
    }
    out
}

fn schedule_line(e: &ScheduleEntry) -> String {
    let side = if e.is_home { "vs" } else { "@" };
    let outcome = match (e.status, e.score, e.won) {
        (ScheduleStatus::Final, Some((us, them)), Some(won)) => {
            format!("{} {us}-{them}", if won { "W" } else { "L" })
        }
        (ScheduleStatus::Live, Some((us, them)), _) => format!("LIVE {us}-{them}"),
        _ => e.date.format("%b %d %H:%M UTC").to_string(),
    };
    format!("{} {side} {}  {outcome}", e.season_type.label(), e.opponent)
}

pub fn team(page: &TeamPage, selection: &Selection, filter: ScheduleFilter, now: DateTime<Utc>) -> String {
    let t = page.team;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}, {})", t.name, t.abbrev, t.slug);
    let _ = writeln!(
        out,
        "  schedule: {}  roster: {}  depth chart: {}  injuries: {}  stat categories: {}",
        page.schedule.len(),
        page.roster.len(),
        page.depth_chart.len(),
        page.injuries.len(),
        page.stats.len()
    );

    let schedule = page.schedule_at(now);
    for (title, games) in [("LIVE", &schedule.live), ("UPCOMING", &schedule.upcoming)] {
        let _ = writeln!(out, "{title} ({})", games.len());
        for e in games {
            let _ = writeln!(out, "  {}", schedule_line(e));
        }
    }

    let view = schedule.view(selection, filter);
    let _ = writeln!(out, "PAST ({})", schedule.past.len());
    if !view.available_seasons.is_empty() {
        let seasons: Vec<String> = view.available_seasons.iter().map(u16::to_string).collect();
        let active = filter.season.map(|s| s.to_string());
        let _ = writeln!(out, "  seasons: {}", labels(&seasons, active.as_ref()));
        let types: Vec<String> = schedule.season_types().iter().map(|t| t.label().to_owned()).collect();
        let active = filter.season_type.map(|t| t.label().to_owned());
        let _ = writeln!(out, "  types:   {}", labels(&types, active.as_ref()));
    }
    if view.is_empty() {
        let _ = writeln!(out, "  no finished games");
    } else {
        let _ = writeln!(
            out,
            "  months:  {}",
            labels(&view.available_months, view.effective_month.as_ref())
        );
        let _ = writeln!(
            out,
            "  dates:   {}",
            labels(&view.available_dates, view.effective_date.as_ref())
        );
        for game in &view.visible {
            let _ = writeln!(out, "  {}", schedule_line(game.0));
        }
    }

    if !page.matchups.is_empty() {
        let _ = writeln!(out, "matchup pages:");
        for m in &page.matchups {
            let _ = writeln!(out, "  {}", m.slug);
        }
    }
    out
}

pub fn player(profile: &PlayerProfile) -> String {
    let b = &profile.bio;
    let mut out = String::new();
    let _ = writeln!(out, "{} #{}", b.display_name, b.jersey.as_deref().unwrap_or("-"));
    let _ = writeln!(
        out,
        "  {}  {}  {}",
        b.position.as_deref().unwrap_or("-"),
        b.team.as_deref().unwrap_or("Free Agent"),
        b.status
    );
    if let Some(college) = &b.college {
        let _ = writeln!(out, "  college: {college}");
    }
    let log = &profile.gamelog;
    let _ = writeln!(out, "{} ({} games)", log.display_name, log.games.len());
    if !log.labels.is_empty() {
        let _ = writeln!(out, "  {}", log.labels.join(" "));
    }
    for g in &log.games {
        let _ = writeln!(
            out,
            "  {} {} {} {}  {}",
            g.date.format("%b %d"),
            if g.won { "W" } else { "L" },
            g.opponent,
            g.score.as_deref().unwrap_or(""),
            g.stats.join(" ")
        );
    }
    if let Some(bio) = &profile.biography {
        let _ = writeln!(out, "{}", bio.summary);
    }
    out
}

pub fn resolution(name: &str) -> String {
    match resolve_team(name) {
        Some(team) => format!("{} -> {} ({})", name.trim(), team.name, team.slug),
        None => format!("{} -> unresolved (slug {})", name.trim(), canonical_slug(name)),
    }
}

pub fn slugs(index: &MatchupIndex) -> String {
    index
        .all_slugs()
        .into_iter()
        .map(|(season, slug)| format!("{season} {slug}\n"))
        .collect()
}
