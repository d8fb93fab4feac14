//! Matchup records derived from the corpus, with deterministic placeholder
//! enrichment for pages that have no live data yet.
use crate::corpus::{Corpus, CorpusRow};
use crate::teams::{normalize, resolve_team};
use crate::{MatchStatus, MatchupRecord, Odds, RecordSource, Score, TeamRecord};
use chrono::{DateTime, Datelike, Duration, Utc};
use log::{debug, error};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

pub const SEASON: u16 = 2024;

// Placeholder dates are drawn from 2024-09-05 .. 2025-01-05 (UTC, millis).
const WINDOW_START_MS: i64 = 1_725_494_400_000;
const WINDOW_END_MS: i64 = 1_736_035_200_000;
// Placeholder status is judged against 2024-11-15T00:00Z, not the wall clock.
const REFERENCE_NOW_MS: i64 = 1_731_628_800_000;
const LIVE_WINDOW_HOURS: i64 = 3;
const MAX_RELATED: usize = 4;

const PLACEHOLDER_TIME: &str = "1:00 PM EST";
const PLACEHOLDER_STADIUM: &str = "NFL Stadium";

/// Rolling `hash * 31 + unit` over the slug's UTF-16 units, wrapped to i32,
/// then made non-negative.
pub fn seed_for(slug: &str) -> u64 {
    let hash = slug
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));
    i64::from(hash).unsigned_abs()
}

fn millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

pub fn reference_now() -> DateTime<Utc> {
    millis(REFERENCE_NOW_MS)
}

/// Window start + (seed mod window), pushed forward to the next Sunday.
pub fn mock_kickoff(seed: u64) -> DateTime<Utc> {
    let window = (WINDOW_END_MS - WINDOW_START_MS) as u64;
    let offset = (seed % window) as i64;
    let kickoff = millis(WINDOW_START_MS + offset);
    let weekday = i64::from(kickoff.weekday().num_days_from_sunday());
    if weekday == 0 {
        kickoff
    } else {
        kickoff + Duration::days(7 - weekday)
    }
}

/// Status of a kickoff relative to `now`; live wins inside the 3h window.
pub fn status_at(kickoff: DateTime<Utc>, now: DateTime<Utc>) -> MatchStatus {
    if (kickoff - now).num_milliseconds().abs() < Duration::hours(LIVE_WINDOW_HOURS).num_milliseconds() {
        MatchStatus::Live
    } else if kickoff < now {
        MatchStatus::Past
    } else {
        MatchStatus::Upcoming
    }
}

pub fn mock_score(seed: u64) -> Score {
    Score {
        home: (seed % 28) as u16 + 14,
        away: ((seed >> 2) % 28) as u16 + 10,
    }
}

pub fn mock_odds(seed: u64, home: &str, away: &str) -> Odds {
    let score = mock_score(seed);
    let favorite = if score.home > score.away { home } else { away };
    Odds {
        favorite: favorite.to_owned(),
        spread: (seed % 14) as f32 / 2.0,
    }
}

/// Build the placeholder record for a corpus row. Pure in the row: the same
/// slug yields the same date, scores and odds in every process.
pub fn enrich(row: &CorpusRow) -> MatchupRecord {
    let slug = row.slug();
    let (home, away) = row.teams();
    let seed = seed_for(&slug);

    let kickoff = mock_kickoff(seed);
    let status = status_at(kickoff, reference_now());
    let score = if status.has_score() { mock_score(seed) } else { Score::default() };
    let odds = mock_odds(seed, &home, &away);

    MatchupRecord {
        season: SEASON,
        keyword: row.keyword.clone(),
        status,
        kickoff,
        time: PLACEHOLDER_TIME.to_owned(),
        score,
        odds: Some(odds),
        stadium: PLACEHOLDER_STADIUM.to_owned(),
        result: (status == MatchStatus::Past).then(|| "Final".to_owned()),
        source: RecordSource::Seeded,
        home,
        away,
        slug,
    }
}

/// Corpus-backed matchup lookups. Records are enriched lazily, once each.
#[derive(Debug, Default)]
pub struct MatchupIndex {
    rows: Vec<CorpusRow>,
    by_slug: HashMap<String, usize>,
    enriched: Vec<OnceLock<MatchupRecord>>,
}

impl MatchupIndex {
    pub fn new(corpus: Corpus) -> Self {
        let mut rows = Vec::new();
        let mut by_slug = HashMap::new();
        for row in corpus.matchup_rows() {
            let slug = row.slug();
            if by_slug.contains_key(&slug) {
                debug!("duplicate corpus slug {slug}, keeping first row");
                continue;
            }
            by_slug.insert(slug, rows.len());
            rows.push(row.clone());
        }
        let enriched = rows.iter().map(|_| OnceLock::new()).collect();
        Self { rows, by_slug, enriched }
    }

    /// Process-wide index, loaded from the corpus on first use. A corpus that
    /// fails to load leaves an empty index behind.
    pub fn global() -> &'static MatchupIndex {
        static INDEX: OnceLock<MatchupIndex> = OnceLock::new();
        INDEX.get_or_init(|| match Corpus::load() {
            Ok(corpus) => MatchupIndex::new(corpus),
            Err(e) => {
                error!("Error reading topical map: {e}");
                MatchupIndex::default()
            }
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (season, slug) for every matchup page.
    pub fn all_slugs(&self) -> Vec<(u16, String)> {
        self.rows.iter().map(|r| (SEASON, r.slug())).collect()
    }

    pub fn get_matchup_by_slug(&self, slug: &str) -> Option<MatchupRecord> {
        let idx = *self.by_slug.get(slug)?;
        Some(self.record_at(idx).clone())
    }

    fn record_at(&self, idx: usize) -> &MatchupRecord {
        self.enriched[idx].get_or_init(|| enrich(&self.rows[idx]))
    }

    /// Every matchup mentioning the team, earliest kickoff first. A name that
    /// resolves also matches rows that spell the team differently.
    pub fn matchups_by_team(&self, name: &str) -> Vec<MatchupRecord> {
        let needle = normalize(name);
        if needle.is_empty() {
            return Vec::new();
        }
        let team = resolve_team(name);

        let mut records: Vec<MatchupRecord> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                if row.keyword.to_lowercase().contains(&needle) {
                    return true;
                }
                let Some(team) = team else { return false };
                let (home, away) = row.teams();
                [home, away]
                    .iter()
                    .any(|side| resolve_team(side).is_some_and(|t| t.slug == team.slug))
            })
            .map(|(idx, _)| self.record_at(idx).clone())
            .collect();
        records.sort_by_key(|r| r.kickoff);
        records
    }

    /// Up to four other matchups featuring the record's home team.
    pub fn related_matchups(&self, record: &MatchupRecord) -> Vec<MatchupRecord> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.slug() != record.slug && row.keyword.contains(&record.home))
            .take(MAX_RELATED)
            .map(|(idx, _)| self.record_at(idx).clone())
            .collect()
    }

    /// Canonical teams named anywhere in the corpus, sorted by name.
    pub fn unique_teams(&self) -> Vec<&'static TeamRecord> {
        let mut teams: BTreeMap<&str, &'static TeamRecord> = BTreeMap::new();
        for row in &self.rows {
            let (home, away) = row.teams();
            for side in [home, away] {
                if let Some(team) = resolve_team(&side) {
                    teams.insert(team.name.as_str(), team);
                }
            }
        }
        teams.into_values().collect()
    }

    /// Slug of the first page whose keyword mentions both teams, in any of
    /// their spellings.
    pub fn find_slug_for_teams(&self, team_a: &str, team_b: &str) -> Option<String> {
        let a = name_variants(team_a);
        let b = name_variants(team_b);
        if a.is_empty() || b.is_empty() {
            return None;
        }
        self.rows
            .iter()
            .find(|row| {
                let kw = row.keyword.to_lowercase();
                a.iter().any(|s| kw.contains(s.as_str())) && b.iter().any(|s| kw.contains(s.as_str()))
            })
            .map(CorpusRow::slug)
    }
}

/// Raw name, canonical name, last word and last two words, lowercased.
fn name_variants(name: &str) -> Vec<String> {
    let raw = normalize(name);
    if raw.is_empty() {
        return Vec::new();
    }
    let mapped = resolve_team(name)
        .map(|t| t.name.to_lowercase())
        .unwrap_or_else(|| raw.clone());
    let words: Vec<&str> = mapped.split(' ').collect();
    let last = words[words.len() - 1].to_owned();
    let last_two = words[words.len().saturating_sub(2)..].join(" ");

    let mut variants = vec![raw, mapped.clone(), last, last_two];
    variants.sort();
    variants.dedup();
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn row(keyword: &str, url: &str) -> CorpusRow {
        CorpusRow { keyword: keyword.into(), url: url.into() }
    }

    fn sample_index() -> MatchupIndex {
        MatchupIndex::new(Corpus::new(vec![
            row("nfl match player stats", "/nfl/match-player-stats"),
            row("Steelers vs Ravens match player stats", "/nfl/2024/steelers-vs-ravens-match-player-stats-{date}"),
            row("Steelers vs Ravens rematch", "/nfl/2024/steelers-vs-ravens-match-player-stats-{date}"),
            row("Pittsburgh Steelers vs Cleveland Browns match player stats", "/nfl/2024/pittsburgh-steelers-vs-cleveland-browns-{date}"),
            row("Kansas City Chiefs vs Raiders match player stats", "/nfl/2024/kansas-city-chiefs-vs-raiders-{date}"),
            row("Steelers vs Bengals match player stats", "/nfl/2024/steelers-vs-bengals-{date}"),
        ]))
    }

    #[test]
    fn seed_matches_rolling_hash() {
        assert_eq!(seed_for(""), 0);
        assert_eq!(seed_for("a"), 97);
        assert_eq!(seed_for("ab"), 97 * 31 + 98);
        assert_eq!(seed_for("steelers-vs-ravens-match-player-stats"), 854_010_329);
    }

    #[test]
    fn seed_wraps_instead_of_overflowing() {
        let long = "z".repeat(500);
        assert_eq!(seed_for(&long), seed_for(&long));
        assert!(seed_for(&long) <= 1 << 31);
    }

    #[test]
    fn mock_kickoff_lands_on_sunday_inside_season() {
        for slug in ["a", "steelers-vs-ravens-match-player-stats", "bills-vs-jets"] {
            let kickoff = mock_kickoff(seed_for(slug));
            assert_eq!(kickoff.weekday(), Weekday::Sun, "{slug}");
            assert!(kickoff >= millis(WINDOW_START_MS));
            assert!(kickoff < millis(WINDOW_END_MS) + Duration::days(7));
        }
    }

    #[test]
    fn known_slug_enriches_to_known_values() {
        let record = enrich(&row(
            "Steelers vs Ravens match player stats",
            "/nfl/2024/steelers-vs-ravens-match-player-stats-{date}",
        ));
        assert_eq!(record.slug, "steelers-vs-ravens-match-player-stats");
        assert_eq!(record.kickoff.date_naive(), chrono::NaiveDate::from_ymd_opt(2024, 9, 15).unwrap());
        assert_eq!(record.status, MatchStatus::Past);
        assert_eq!(record.score, Score { home: 39, away: 16 });
        assert_eq!(record.odds.as_ref().map(|o| o.to_string()).as_deref(), Some("Steelers -5.5"));
        assert_eq!(record.result.as_deref(), Some("Final"));
        assert_eq!(record.source, RecordSource::Seeded);
    }

    #[test]
    fn enrichment_is_deterministic() {
        let r = row("Bills vs Jets match player stats", "/nfl/2024/bills-vs-jets-{date}");
        let first = enrich(&r);
        let second = enrich(&r.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn favorite_is_the_side_with_the_higher_mock_score() {
        // seed 97: home 27, away 34
        let odds = mock_odds(97, "Home", "Away");
        assert_eq!(odds.favorite, "Away");
        assert_eq!(odds.spread, 6.5);
    }

    #[test]
    fn status_window_around_reference_now() {
        let now = Utc.with_ymd_and_hms(2024, 11, 15, 0, 0, 0).unwrap();
        assert_eq!(status_at(now - Duration::hours(5), now), MatchStatus::Past);
        assert_eq!(status_at(now - Duration::hours(2), now), MatchStatus::Live);
        assert_eq!(status_at(now + Duration::hours(2), now), MatchStatus::Live);
        assert_eq!(status_at(now + Duration::days(1), now), MatchStatus::Upcoming);
        assert_eq!(reference_now(), now);
    }

    #[test]
    fn upcoming_placeholders_show_zero_score_but_keep_odds() {
        let seed = 42;
        let kickoff = millis(REFERENCE_NOW_MS) + Duration::days(3);
        assert_eq!(status_at(kickoff, reference_now()), MatchStatus::Upcoming);
        assert!(!MatchStatus::Upcoming.has_score());
        assert_eq!(mock_odds(seed, "A", "B").spread, 0.0);
    }

    #[test]
    fn index_skips_non_matchups_and_duplicate_slugs() {
        let index = sample_index();
        assert_eq!(index.len(), 4);
        let record = index.get_matchup_by_slug("steelers-vs-ravens-match-player-stats").unwrap();
        assert_eq!(record.keyword, "Steelers vs Ravens match player stats");
        assert!(index.all_slugs().iter().all(|(season, _)| *season == SEASON));
    }

    #[test]
    fn unknown_slug_is_none() {
        assert!(sample_index().get_matchup_by_slug("nope").is_none());
    }

    #[test]
    fn lookup_returns_complete_record_without_live_data() {
        let record = sample_index().get_matchup_by_slug("steelers-vs-bengals").unwrap();
        assert!(record.odds.is_some());
        assert_eq!(record.home, "Steelers");
        assert_eq!(record.away, "Bengals");
        assert!(!record.stadium.is_empty());
    }

    #[test]
    fn matchups_by_team_includes_other_spellings_sorted_by_kickoff() {
        let records = sample_index().matchups_by_team("Steelers");
        assert_eq!(records.len(), 3);
        assert!(records.windows(2).all(|w| w[0].kickoff <= w[1].kickoff));

        let by_full_name = sample_index().matchups_by_team("pittsburgh steelers");
        assert_eq!(by_full_name.len(), 3);
    }

    #[test]
    fn related_matchups_exclude_self_and_cap_at_four() {
        let index = sample_index();
        let current = index.get_matchup_by_slug("steelers-vs-ravens-match-player-stats").unwrap();
        let related = index.related_matchups(&current);
        assert!(related.iter().all(|r| r.slug != current.slug));
        assert!(related.len() <= MAX_RELATED);
        assert_eq!(related.len(), 2);
    }

    #[test]
    fn unique_teams_are_canonical_and_sorted() {
        let names: Vec<&str> = sample_index().unique_teams().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Baltimore Ravens",
                "Cincinnati Bengals",
                "Cleveland Browns",
                "Kansas City Chiefs",
                "Las Vegas Raiders",
                "Pittsburgh Steelers",
            ]
        );
    }

    #[test]
    fn find_slug_for_teams_uses_name_variants() {
        let index = sample_index();
        assert_eq!(
            index.find_slug_for_teams("Kansas City Chiefs", "Las Vegas Raiders").as_deref(),
            Some("kansas-city-chiefs-vs-raiders")
        );
        assert_eq!(
            index.find_slug_for_teams("Pittsburgh Steelers", "Baltimore Ravens").as_deref(),
            Some("steelers-vs-ravens-match-player-stats")
        );
        assert!(index.find_slug_for_teams("Miami Dolphins", "New York Jets").is_none());
        assert!(index.find_slug_for_teams("", "Ravens").is_none());
    }

    #[test]
    fn global_index_loads_embedded_corpus() {
        let index = MatchupIndex::global();
        assert!(!index.is_empty());
        let (_, slug) = &index.all_slugs()[0];
        assert!(index.get_matchup_by_slug(slug).is_some());
    }
}
