use statyards_api::client::{ESPN_ATHLETES, ESPN_SITE, NflApi};
use std::path::PathBuf;
use std::time::Duration;

const SITE_ENV: &str = "STATYARDS_ESPN_SITE";
const ATHLETES_ENV: &str = "STATYARDS_ESPN_ATHLETES";
const TIMEOUT_ENV: &str = "STATYARDS_TIMEOUT_SECS";
const CORPUS_ENV: &str = "STATYARDS_CORPUS_JSON";
pub const LOG_ENV: &str = "STATYARDS_LOG";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const REFRESH_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub site_base: String,
    pub athletes_base: String,
    pub timeout: Duration,
    /// Only reported; the library reads the variable itself when the corpus loads.
    pub corpus_path: Option<PathBuf>,
    pub refresh_every: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            site_base: ESPN_SITE.to_owned(),
            athletes_base: ESPN_ATHLETES.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            corpus_path: None,
            refresh_every: Duration::from_secs(REFRESH_SECS),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            site_base: var(SITE_ENV).unwrap_or(defaults.site_base),
            athletes_base: var(ATHLETES_ENV).unwrap_or(defaults.athletes_base),
            timeout: var(TIMEOUT_ENV)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            corpus_path: var(CORPUS_ENV).map(PathBuf::from),
            refresh_every: defaults.refresh_every,
        }
    }

    pub fn api(&self) -> NflApi {
        NflApi::with_bases(&self.site_base, &self.athletes_base).with_timeout(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_espn() {
        let s = settings(&[]);
        assert_eq!(s, AppSettings::default());
        assert_eq!(s.timeout, Duration::from_secs(10));
    }

    #[test]
    fn env_overrides_bases_and_timeout() {
        let s = settings(&[
            (SITE_ENV, "http://localhost:1234"),
            (TIMEOUT_ENV, "3"),
            (CORPUS_ENV, "/tmp/map.json"),
        ]);
        assert_eq!(s.site_base, "http://localhost:1234");
        assert_eq!(s.athletes_base, ESPN_ATHLETES);
        assert_eq!(s.timeout, Duration::from_secs(3));
        assert_eq!(s.corpus_path, Some(PathBuf::from("/tmp/map.json")));
    }

    #[test]
    fn bad_timeout_falls_back() {
        assert_eq!(settings(&[(TIMEOUT_ENV, "soon")]).timeout, Duration::from_secs(10));
        assert_eq!(settings(&[(TIMEOUT_ENV, "0")]).timeout, Duration::from_secs(10));
        assert_eq!(settings(&[(SITE_ENV, "  ")]).site_base, ESPN_SITE);
    }
}
