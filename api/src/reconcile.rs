//! Overlay a team's authoritative schedule onto a placeholder matchup record.
use crate::teams::{normalize, resolve_team};
use crate::{MatchupRecord, RecordSource, ScheduleEntry, ScheduleStatus, Score};
use log::debug;

/// What the reconciler did with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Applied { event_id: String },
    NoMatch,
}

/// Overlay the first schedule entry whose opponent is the record's away team.
/// Without a match the record comes back untouched.
pub fn reconcile_schedule(
    team_slug: &str,
    schedule: &[ScheduleEntry],
    mock: MatchupRecord,
) -> MatchupRecord {
    overlay_schedule(team_slug, schedule, mock).0
}

pub fn overlay_schedule(
    team_slug: &str,
    schedule: &[ScheduleEntry],
    mut record: MatchupRecord,
) -> (MatchupRecord, Overlay) {
    // Division rivals appear twice; the record's home team hosting wins.
    let candidates: Vec<&ScheduleEntry> = schedule
        .iter()
        .filter(|e| same_opponent(&e.opponent, &record.away))
        .collect();
    let chosen = candidates.iter().find(|e| e.is_home).or(candidates.first()).copied();
    let Some(entry) = chosen else {
        debug!("no schedule entry for {team_slug} vs {} ({})", record.away, record.slug);
        return (record, Overlay::NoMatch);
    };

    debug!("overlaying event {} onto {}", entry.event_id, record.slug);
    record.score = entry.home_away_score().unwrap_or_default();
    record.kickoff = entry.date;
    record.status = entry.status.as_match_status();
    record.result = match entry.status {
        ScheduleStatus::Final => entry
            .home_away_score()
            .map(|Score { home, away }| format!("{home} - {away}")),
        _ => None,
    };
    record.source = RecordSource::Schedule { event_id: entry.event_id.clone() };

    let event_id = entry.event_id.clone();
    (record, Overlay::Applied { event_id })
}

/// Two team names refer to the same opponent. When both sides resolve to
/// canonical teams their slugs must agree; otherwise fall back to a
/// case-insensitive substring test in either direction.
pub fn same_opponent(opponent: &str, away: &str) -> bool {
    let opponent_norm = normalize(opponent);
    let away_norm = normalize(away);
    if opponent_norm.is_empty() || away_norm.is_empty() {
        return false;
    }

    if let (Some(a), Some(b)) = (resolve_team(opponent), resolve_team(away)) {
        return a.slug == b.slug;
    }

    opponent_norm.contains(&away_norm) || away_norm.contains(&opponent_norm)
}
