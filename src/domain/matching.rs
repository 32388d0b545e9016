use once_cell::sync::Lazy;
use regex::Regex;

pub const MATCH_THRESHOLD: u8 = 50;

static STREET_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([א-ת\s]+)\s*([0-9]+)").expect("valid regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

const ABBREVIATIONS: [(&str, &str); 3] = [
    ("רא\"ה", "ראה"),
    ("פלמ\"ח", "פלמח"),
    ("ת\"א", "תל אביב"),
];

/// Canonical form used for comparing free-text Hebrew addresses.
pub fn normalize_address(addr: &str) -> String {
    let mut s = addr.to_lowercase();
    for (abbr, full) in ABBREVIATIONS {
        s = s.replace(abbr, full);
    }
    s.retain(|c| !matches!(c, '"' | '\'' | '״' | '׳' | ','));
    WHITESPACE_RE.replace_all(&s, " ").trim().to_string()
}

fn street_and_number(norm: &str) -> Option<(String, String)> {
    STREET_NUMBER_RE
        .captures(norm)
        .map(|c| (c[1].trim().to_string(), c[2].to_string()))
}

/// Similarity score: 100 exact street and number, 90 related street with the
/// same number, 70 containment, 50 two shared words, otherwise 0.
pub fn match_score(a: &str, b: &str) -> u8 {
    let (na, nb) = (normalize_address(a), normalize_address(b));
    if na.is_empty() || nb.is_empty() {
        return 0;
    }
    if let (Some((street_a, num_a)), Some((street_b, num_b))) =
        (street_and_number(&na), street_and_number(&nb))
    {
        if num_a == num_b {
            if street_a == street_b {
                return 100;
            }
            if street_a.contains(&street_b) || street_b.contains(&street_a) {
                return 90;
            }
        }
    }
    if na.contains(&nb) || nb.contains(&na) {
        return 70;
    }
    let words_b: Vec<&str> = nb.split(' ').collect();
    let common = na
        .split(' ')
        .filter(|w| w.chars().count() > 2 && words_b.contains(w))
        .count();
    if common >= 2 { 50 } else { 0 }
}

/// Highest-scoring candidate at or above the threshold; earlier candidates win ties.
pub fn best_match<'a, T>(
    address: &str,
    candidates: &'a [T],
    candidate_address: impl Fn(&T) -> &str,
) -> Option<(&'a T, u8)> {
    let mut best: Option<(&T, u8)> = None;
    for c in candidates {
        let score = match_score(address, candidate_address(c));
        if score > best.map(|(_, s)| s).unwrap_or(0) {
            best = Some((c, score));
        }
    }
    best.filter(|(_, s)| *s >= MATCH_THRESHOLD)
}
