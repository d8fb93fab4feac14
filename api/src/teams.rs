//! Static NFL team directory and the name → team resolver.
//!
//! Feeds and the topical corpus spell teams three ways: full name
//! ("Pittsburgh Steelers"), mascot only ("Steelers") and ESPN abbreviation
//! ("PIT"). Everything funnels through [`resolve_team`] so records from
//! different sources can be compared by slug.
use crate::TeamRecord;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

// (city, mascot, ESPN abbreviation, ESPN team id)
const NFL_TEAMS: [(&str, &str, &str, &str); 32] = [
    ("Arizona", "Cardinals", "ARI", "22"),
    ("Atlanta", "Falcons", "ATL", "1"),
    ("Baltimore", "Ravens", "BAL", "33"),
    ("Buffalo", "Bills", "BUF", "2"),
    ("Carolina", "Panthers", "CAR", "29"),
    ("Chicago", "Bears", "CHI", "3"),
    ("Cincinnati", "Bengals", "CIN", "4"),
    ("Cleveland", "Browns", "CLE", "5"),
    ("Dallas", "Cowboys", "DAL", "6"),
    ("Denver", "Broncos", "DEN", "7"),
    ("Detroit", "Lions", "DET", "8"),
    ("Green Bay", "Packers", "GB", "9"),
    ("Houston", "Texans", "HOU", "34"),
    ("Indianapolis", "Colts", "IND", "11"),
    ("Jacksonville", "Jaguars", "JAX", "30"),
    ("Kansas City", "Chiefs", "KC", "12"),
    ("Las Vegas", "Raiders", "LV", "13"),
    ("Los Angeles", "Chargers", "LAC", "24"),
    ("Los Angeles", "Rams", "LAR", "14"),
    ("Miami", "Dolphins", "MIA", "15"),
    ("Minnesota", "Vikings", "MIN", "16"),
    ("New England", "Patriots", "NE", "17"),
    ("New Orleans", "Saints", "NO", "18"),
    ("New York", "Giants", "NYG", "19"),
    ("New York", "Jets", "NYJ", "20"),
    ("Philadelphia", "Eagles", "PHI", "21"),
    ("Pittsburgh", "Steelers", "PIT", "23"),
    ("San Francisco", "49ers", "SF", "25"),
    ("Seattle", "Seahawks", "SEA", "26"),
    ("Tampa Bay", "Buccaneers", "TB", "27"),
    ("Tennessee", "Titans", "TEN", "10"),
    ("Washington", "Commanders", "WSH", "28"),
];

/// Immutable registry of canonical teams, built once per process.
#[derive(Debug)]
pub struct TeamDirectory {
    teams: Vec<TeamRecord>,
    aliases: HashMap<String, usize>,
    /// Lowercase mascot → team index, used for suffix matching.
    mascots: Vec<(String, usize)>,
}

impl TeamDirectory {
    fn build() -> Self {
        let mut teams: Vec<TeamRecord> = NFL_TEAMS
            .iter()
            .map(|&(city, mascot, abbrev, espn_id)| {
                let name = format!("{city} {mascot}");
                let synonyms: BTreeSet<String> = [
                    name.to_lowercase(),
                    mascot.to_lowercase(),
                    abbrev.to_lowercase(),
                ]
                .into_iter()
                .collect();
                TeamRecord {
                    slug: slugify(&name),
                    name,
                    city: city.to_owned(),
                    mascot: mascot.to_owned(),
                    abbrev: abbrev.to_owned(),
                    espn_id: espn_id.to_owned(),
                    synonyms,
                }
            })
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));

        let mut aliases = HashMap::new();
        let mut mascots = Vec::with_capacity(teams.len());
        for (idx, team) in teams.iter().enumerate() {
            for alias in &team.synonyms {
                aliases.insert(alias.clone(), idx);
            }
            mascots.push((team.mascot.to_lowercase(), idx));
        }

        Self { teams, aliases, mascots }
    }

    /// The process-wide directory.
    pub fn global() -> &'static TeamDirectory {
        static DIRECTORY: OnceLock<TeamDirectory> = OnceLock::new();
        DIRECTORY.get_or_init(TeamDirectory::build)
    }

    /// All teams, sorted by canonical name.
    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    pub fn by_slug(&self, slug: &str) -> Option<&TeamRecord> {
        let slug = slug.trim().to_lowercase();
        self.teams.iter().find(|t| t.slug == slug)
    }

    pub fn by_espn_id(&self, espn_id: &str) -> Option<&TeamRecord> {
        self.teams.iter().find(|t| t.espn_id == espn_id)
    }

    /// Exact alias lookup, then longest mascot suffix.
    pub fn resolve(&self, name: &str) -> Option<&TeamRecord> {
        let normalized = normalize(name);
        if normalized.is_empty() {
            return None;
        }

        if let Some(&idx) = self.aliases.get(&normalized) {
            return self.teams.get(idx);
        }

        self.mascots
            .iter()
            .filter(|(mascot, _)| ends_with_word(&normalized, mascot))
            .max_by_key(|(mascot, _)| mascot.len())
            .and_then(|&(_, idx)| self.teams.get(idx))
    }
}

/// Resolve a free-text team name against the global directory.
pub fn resolve_team(name: &str) -> Option<&'static TeamRecord> {
    TeamDirectory::global().resolve(name)
}

/// Canonical slug for a name, falling back to slugifying the raw input.
pub fn canonical_slug(name: &str) -> String {
    match resolve_team(name) {
        Some(team) => team.slug.clone(),
        None => slugify(name),
    }
}

/// Lowercase, runs of non-alphanumerics collapsed into a single hyphen.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_hyphen = false;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Lowercase and collapse whitespace.
pub(crate) fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn ends_with_word(haystack: &str, word: &str) -> bool {
    match haystack.strip_suffix(word) {
        Some("") => true,
        Some(rest) => rest.ends_with(' '),
        None => false,
    }
}
