use super::patterns::{
    GENERIC_LABELS, MIN_CREDENTIAL_LEN, MIN_DISTINCT_RATIO, MatchKind, PATTERNS,
};
use regex::{Captures, Regex, RegexBuilder};
use std::collections::HashSet;
use std::sync::LazyLock;

const MASK: &str = "XXXX";

struct CompiledPattern {
    category: &'static str,
    kind: MatchKind,
    regex: Regex,
}

/// In-process sensitive-content detector built from the pattern table.
pub struct SensitiveScanner {
    patterns: Vec<CompiledPattern>,
}

static SHARED: LazyLock<SensitiveScanner> = LazyLock::new(SensitiveScanner::new);

/// Process-wide scanner; compiled once on first use.
pub fn shared_scanner() -> &'static SensitiveScanner {
    &SHARED
}

impl SensitiveScanner {
    pub fn new() -> Self {
        let patterns = PATTERNS
            .iter()
            .flat_map(|def| def.sources.iter().map(move |src| (def, *src)))
            .filter_map(|(def, src)| {
                match RegexBuilder::new(src).case_insensitive(true).build() {
                    Ok(regex) => Some(CompiledPattern {
                        category: def.category,
                        kind: def.kind,
                        regex,
                    }),
                    Err(e) => {
                        tracing::error!(category = def.category, error = %e, "detect.pattern_invalid");
                        None
                    }
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Category of the first accepted match, in table order.
    pub fn first_category(&self, text: &str) -> Option<&'static str> {
        self.patterns.iter().find_map(|p| {
            // Only the leftmost match of each pattern is judged.
            p.regex
                .captures(text)
                .is_some_and(|caps| accepts(p.kind, &caps))
                .then_some(p.category)
        })
    }

    pub fn contains_sensitive(&self, text: &str) -> bool {
        self.first_category(text).is_some()
    }

    /// Replace every accepted match with `XXXX`. Text without findings is
    /// returned unchanged.
    pub fn mask(&self, text: &str) -> String {
        if !self.contains_sensitive(text) {
            return text.to_string();
        }
        self.patterns.iter().fold(text.to_string(), |acc, p| {
            p.regex
                .replace_all(&acc, |caps: &Captures<'_>| {
                    if accepts(p.kind, caps) {
                        MASK.to_string()
                    } else {
                        caps[0].to_string()
                    }
                })
                .into_owned()
        })
    }
}

impl Default for SensitiveScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn accepts(kind: MatchKind, caps: &Captures<'_>) -> bool {
    match kind {
        MatchKind::Plain => true,
        MatchKind::Credential => {
            let value = caps.get(2).or_else(|| caps.get(0)).map_or("", |m| m.as_str());
            looks_like_secret(value)
        }
    }
}

/// Reject short values, label words, and low-entropy filler like `aaaaaaaaaa`.
fn looks_like_secret(value: &str) -> bool {
    let clean = value.trim().to_lowercase();
    let len = clean.chars().count();
    if len < MIN_CREDENTIAL_LEN || GENERIC_LABELS.contains(&clean.as_str()) {
        return false;
    }
    let distinct = clean.chars().collect::<HashSet<_>>().len();
    if distinct <= 1 {
        return false;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = distinct as f64 / len as f64;
    ratio >= MIN_DISTINCT_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> &'static SensitiveScanner {
        shared_scanner()
    }

    #[test]
    fn every_pattern_compiles() {
        let expected: usize = PATTERNS.iter().map(|d| d.sources.len()).sum();
        assert_eq!(scanner().pattern_count(), expected);
    }

    #[test]
    fn plain_prompt_is_clean() {
        assert!(!scanner().contains_sensitive("Write a poem about the sea"));
        assert!(!scanner().contains_sensitive("Summarize this article in 3 bullet points"));
    }

    #[test]
    fn detects_email_and_ssn() {
        assert_eq!(
            scanner().first_category("mail me at jane.doe@example.com"),
            Some("email_address")
        );
        assert_eq!(
            scanner().first_category("my ssn is 123-45-6789"),
            Some("ssn_tin")
        );
    }

    #[test]
    fn credential_verdict_uses_the_first_match() {
        let text = "password: x password: Tr0ub4dor&3xk9";
        assert!(!scanner().contains_sensitive(text));
        assert_eq!(scanner().mask(text), text);
        assert!(scanner().contains_sensitive("password: Tr0ub4dor&3xk9 password: x"));
    }

    #[test]
    fn detects_credit_card_with_separators() {
        assert_eq!(
            scanner().first_category("card 4111 1111 1111 1111 exp 09"),
            Some("credit_card_number")
        );
    }

    #[test]
    fn credential_filter_rejects_weak_values() {
        assert!(!scanner().contains_sensitive("password: hunter2"));
        assert!(!scanner().contains_sensitive("password = aaaaaaaaaaaa"));
        assert!(!scanner().contains_sensitive("username: login"));
    }

    #[test]
    fn credential_filter_accepts_real_looking_secret() {
        assert_eq!(
            scanner().first_category("password: Tr0ub4dor&3xk9"),
            Some("password")
        );
    }

    #[test]
    fn mask_replaces_findings_only() {
        let masked = scanner().mask("reach me at jane.doe@example.com today");
        assert_eq!(masked, "reach me at XXXX today");
        let clean = "nothing to hide here";
        assert_eq!(scanner().mask(clean), clean);
    }

    #[test]
    fn looks_like_secret_thresholds() {
        assert!(!looks_like_secret("short"));
        assert!(!looks_like_secret("abababababababababab"));
        assert!(looks_like_secret("q8Zk2LmN0pRt"));
    }
}
