//! The topical-map corpus: one row per landing page, keyed by a templated URL.
use crate::client::{ApiError, ApiResult};
use log::debug;
use serde::{Deserialize, Serialize};

const EMBEDDED_CORPUS_JSON: &str = include_str!("../data/topical_map.json");
const CORPUS_ENV: &str = "STATYARDS_CORPUS_JSON";
const DATE_TOKEN: &str = "-{date}";
const VERSUS: &str = " vs ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRow {
    pub keyword: String, // "Steelers vs Ravens match player stats"
    pub url: String,     // "/nfl/2024/steelers-vs-ravens-match-player-stats-{date}"
}

impl CorpusRow {
    /// Only "A vs B ..." keywords describe a matchup page.
    pub fn is_matchup(&self) -> bool {
        self.keyword.contains(VERSUS)
    }

    /// Last URL segment with the date template removed.
    pub fn slug(&self) -> String {
        let tail = self.url.rsplit('/').next().unwrap_or_default();
        tail.replace(DATE_TOKEN, "")
    }

    /// (home, away) as written in the keyword.
    pub fn teams(&self) -> (String, String) {
        let mut parts = self.keyword.splitn(2, VERSUS);
        let home = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Home Team");
        let away = parts
            .next()
            .and_then(|rest| rest.split(" match").next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Away Team");
        (home.to_owned(), away.to_owned())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    rows: Vec<CorpusRow>,
}

impl Corpus {
    pub fn new(rows: Vec<CorpusRow>) -> Self {
        Self { rows }
    }

    /// `STATYARDS_CORPUS_JSON` if set, otherwise the corpus compiled into the crate.
    pub fn load() -> ApiResult<Corpus> {
        if let Ok(path) = std::env::var(CORPUS_ENV)
            && !path.trim().is_empty()
        {
            debug!("loading corpus from {path}");
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ApiError::Corpus(format!("could not read {path}: {e}")))?;
            return Corpus::from_json(&content)
                .map_err(|e| ApiError::Corpus(format!("invalid corpus json at {path}: {e}")));
        }
        Corpus::embedded()
    }

    pub fn embedded() -> ApiResult<Corpus> {
        Corpus::from_json(EMBEDDED_CORPUS_JSON)
            .map_err(|e| ApiError::Corpus(format!("invalid embedded corpus json: {e}")))
    }

    pub fn from_json(content: &str) -> Result<Corpus, serde_json::Error> {
        let rows: Vec<CorpusRow> = serde_json::from_str(content)?;
        Ok(Corpus { rows })
    }

    pub fn rows(&self) -> &[CorpusRow] {
        &self.rows
    }

    pub fn matchup_rows(&self) -> impl Iterator<Item = &CorpusRow> {
        self.rows.iter().filter(|r| r.is_matchup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(keyword: &str, url: &str) -> CorpusRow {
        CorpusRow { keyword: keyword.into(), url: url.into() }
    }

    #[test]
    fn slug_strips_path_and_date_template() {
        let r = row(
            "Steelers vs Ravens match player stats",
            "/nfl/2024/steelers-vs-ravens-match-player-stats-{date}",
        );
        assert_eq!(r.slug(), "steelers-vs-ravens-match-player-stats");
    }

    #[test]
    fn teams_split_on_versus_and_match_suffix() {
        let r = row("Kansas City Chiefs vs Raiders match player stats", "/x");
        assert_eq!(r.teams(), ("Kansas City Chiefs".to_owned(), "Raiders".to_owned()));
    }

    #[test]
    fn missing_sides_get_placeholders() {
        let r = row(" vs  match player stats", "/x");
        assert_eq!(r.teams(), ("Home Team".to_owned(), "Away Team".to_owned()));
        let r = row("Steelers", "/x");
        assert_eq!(r.teams().1, "Away Team");
    }

    #[test]
    fn non_matchup_rows_are_filtered() {
        let corpus = Corpus::new(vec![
            row("nfl match player stats", "/nfl/match-player-stats"),
            row("Bills vs Jets match player stats", "/nfl/2024/bills-vs-jets-{date}"),
        ]);
        assert_eq!(corpus.matchup_rows().count(), 1);
    }

    #[test]
    fn embedded_corpus_parses() {
        let corpus = Corpus::embedded().expect("embedded corpus should parse");
        assert!(corpus.matchup_rows().count() > 50);
        assert!(corpus.rows().iter().any(|r| !r.is_matchup()));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(Corpus::from_json("{\"keyword\": 1}").is_err());
    }
}
