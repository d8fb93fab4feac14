//! Month → day drill-down over finished games.
//!
//! Only the two selection coordinates are state. Everything a caller shows
//! (which month is active, which day, which games) is recomputed from the
//! current match set on every read, so a selection that went stale because
//! the data or the month changed resolves itself without a write-back.
use crate::{MatchStatus, MatchupRecord, ScheduleEntry, SeasonType};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc, Weekday};

const EST_SECS: i32 = 5 * 3600;
const EDT_SECS: i32 = 4 * 3600;

/// US Eastern wall-clock offset at `ts`. Daylight time runs from the second
/// Sunday of March, 07:00 UTC, to the first Sunday of November, 06:00 UTC.
pub fn us_eastern_offset(ts: DateTime<Utc>) -> FixedOffset {
    let year = ts.year();
    let utc_at = |month: u32, nth: u8, hour: u32| {
        NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Sun, nth)
            .and_then(|day| day.and_hms_opt(hour, 0, 0))
            .map(|naive| naive.and_utc())
    };
    let daylight = matches!(
        (utc_at(3, 2, 7), utc_at(11, 1, 6)),
        (Some(start), Some(end)) if start <= ts && ts < end
    );
    let secs = if daylight { EDT_SECS } else { EST_SECS };
    FixedOffset::west_opt(secs).unwrap_or_else(|| Utc.fix())
}

/// Clock the labels are cut in, independent of the host's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    UsEastern,
    Fixed(FixedOffset),
}

impl Zone {
    fn offset_at(&self, ts: DateTime<Utc>) -> FixedOffset {
        match self {
            Zone::UsEastern => us_eastern_offset(ts),
            Zone::Fixed(offset) => *offset,
        }
    }
}

/// Anything that can be placed on the month/day axis.
pub trait Timeline {
    fn kickoff(&self) -> DateTime<Utc>;
    fn status(&self) -> MatchStatus;

    fn season(&self) -> Option<u16> {
        None
    }

    fn season_type(&self) -> Option<SeasonType> {
        None
    }
}

impl Timeline for MatchupRecord {
    fn kickoff(&self) -> DateTime<Utc> {
        self.kickoff
    }

    fn status(&self) -> MatchStatus {
        self.status
    }

    fn season(&self) -> Option<u16> {
        Some(self.season)
    }
}

impl Timeline for ScheduleEntry {
    fn kickoff(&self) -> DateTime<Utc> {
        self.date
    }

    fn status(&self) -> MatchStatus {
        self.status.as_match_status()
    }

    fn season(&self) -> Option<u16> {
        Some(self.season)
    }

    fn season_type(&self) -> Option<SeasonType> {
        Some(self.season_type)
    }
}

/// A selection coordinate: a concrete label, or "all" meaning "let the
/// data decide".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selector {
    #[default]
    All,
    Exact(String),
}

impl Selector {
    pub fn exact(label: impl Into<String>) -> Self {
        Selector::Exact(label.into())
    }

    pub fn as_exact(&self) -> Option<&str> {
        match self {
            Selector::All => None,
            Selector::Exact(label) => Some(label),
        }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Selector::All
        } else {
            Selector::Exact(value.to_owned())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    SelectMonth(Selector),
    SelectDate(Selector),
}

/// The only stored navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub month: Selector,
    pub date: Selector,
}

impl Selection {
    pub fn new(month: Selector, date: Selector) -> Self {
        Self { month, date }
    }

    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::SelectMonth(month) => self.select_month(month),
            SelectionEvent::SelectDate(date) => self.select_date(date),
        }
    }

    /// Changing month always drops the day back to "first available".
    pub fn select_month(&mut self, month: Selector) {
        self.month = month;
        self.date = Selector::All;
    }

    pub fn select_date(&mut self, date: Selector) {
        self.date = date;
    }
}

/// Everything derived from a match set and a [`Selection`].
#[derive(Debug)]
pub struct BucketView<'a, T> {
    pub effective_month: Option<String>,
    pub effective_date: Option<String>,
    /// Month keys, most recent first.
    pub available_months: Vec<String>,
    /// Day labels inside the effective month, in input order.
    pub available_dates: Vec<String>,
    /// Seasons present among finished games, newest first.
    pub available_seasons: Vec<u16>,
    pub in_month: Vec<&'a T>,
    pub visible: Vec<&'a T>,
}

impl<T> BucketView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.available_months.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Bucketer {
    zone: Zone,
    season: Option<u16>,
    season_type: Option<SeasonType>,
}

impl Default for Bucketer {
    fn default() -> Self {
        Self::eastern()
    }
}

impl Bucketer {
    /// New York wall clock, daylight saving included.
    pub fn eastern() -> Self {
        Self { zone: Zone::UsEastern, season: None, season_type: None }
    }

    pub fn utc() -> Self {
        Self::with_offset(Utc.fix())
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { zone: Zone::Fixed(offset), season: None, season_type: None }
    }

    /// Restrict to one season before bucketing.
    pub fn season(mut self, season: Option<u16>) -> Self {
        self.season = season;
        self
    }

    pub fn season_type(mut self, season_type: Option<SeasonType>) -> Self {
        self.season_type = season_type;
        self
    }

    /// "NOV"
    pub fn month_label(&self, ts: DateTime<Utc>) -> String {
        ts.with_timezone(&self.zone.offset_at(ts)).format("%b").to_string().to_uppercase()
    }

    /// "Nov 26"
    pub fn day_label(&self, ts: DateTime<Utc>) -> String {
        ts.with_timezone(&self.zone.offset_at(ts)).format("%b %d").to_string()
    }

    pub fn view<'a, T: Timeline>(&self, matches: &'a [T], selection: &Selection) -> BucketView<'a, T> {
        let all_past: Vec<&T> = matches.iter().filter(|m| m.status() == MatchStatus::Past).collect();

        let mut available_seasons: Vec<u16> = all_past.iter().filter_map(|m| m.season()).collect();
        available_seasons.sort_unstable_by(|a, b| b.cmp(a));
        available_seasons.dedup();

        let past: Vec<&T> = all_past
            .into_iter()
            .filter(|m| self.season.is_none() || m.season() == self.season)
            .filter(|m| self.season_type.is_none() || m.season_type() == self.season_type)
            .collect();

        // Month key → latest kickoff in that month, first-seen order.
        let mut months: Vec<(String, DateTime<Utc>)> = Vec::new();
        for m in &past {
            let key = self.month_label(m.kickoff());
            match months.iter_mut().find(|(k, _)| *k == key) {
                Some((_, latest)) => *latest = (*latest).max(m.kickoff()),
                None => months.push((key, m.kickoff())),
            }
        }
        months.sort_by(|a, b| b.1.cmp(&a.1));
        let available_months: Vec<String> = months.into_iter().map(|(k, _)| k).collect();

        let effective_month = selection
            .month
            .as_exact()
            .and_then(|wanted| available_months.iter().find(|k| k.eq_ignore_ascii_case(wanted)))
            .or_else(|| available_months.first())
            .cloned();

        let in_month: Vec<&T> = match &effective_month {
            Some(month) => past
                .into_iter()
                .filter(|m| self.month_label(m.kickoff()) == *month)
                .collect(),
            None => Vec::new(),
        };

        let mut available_dates: Vec<String> = Vec::new();
        for m in &in_month {
            let day = self.day_label(m.kickoff());
            if !available_dates.contains(&day) {
                available_dates.push(day);
            }
        }

        let effective_date = selection
            .date
            .as_exact()
            .and_then(|wanted| available_dates.iter().find(|d| d.as_str() == wanted))
            .or_else(|| available_dates.first())
            .cloned();

        let visible: Vec<&T> = match &effective_date {
            Some(day) => in_month
                .iter()
                .copied()
                .filter(|m| self.day_label(m.kickoff()) == *day)
                .collect(),
            None => Vec::new(),
        };

        BucketView {
            effective_month,
            effective_date,
            available_months,
            available_dates,
            available_seasons,
            in_month,
            visible,
        }
    }
}

/// Bucket with the default (Eastern) clock.
pub fn bucket_matches<'a, T: Timeline>(
    matches: &'a [T],
    active_month: &Selector,
    active_date: &Selector,
) -> BucketView<'a, T> {
    let selection = Selection::new(active_month.clone(), active_date.clone());
    Bucketer::default().view(matches, &selection)
}
