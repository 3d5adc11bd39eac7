/// Which filter applies to a pattern's matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Any match counts.
    Plain,
    /// `label: value` pairs; the captured value must look like a real secret.
    Credential,
}

pub struct PatternDef {
    pub category: &'static str,
    pub kind: MatchKind,
    pub sources: &'static [&'static str],
}

/// Ordered pattern table. All patterns are compiled case-insensitively.
pub const PATTERNS: &[PatternDef] = &[
    PatternDef {
        category: "bank_account_number",
        kind: MatchKind::Plain,
        sources: &[r"\b\d{10,12}\b"],
    },
    PatternDef {
        category: "bank_routing_number",
        kind: MatchKind::Plain,
        sources: &[r"\b\d{9}\b"],
    },
    PatternDef {
        category: "credit_card_number",
        kind: MatchKind::Plain,
        sources: &[
            // Visa
            r"\b(?:4\d{3}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4})\b",
            // Mastercard
            r"\b(?:5[1-5]\d{2}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4})\b",
            // American Express
            r"\b(?:3[47]\d{2}[-\s]?\d{6}[-\s]?\d{5})\b",
            // Discover
            r"\b(?:6(?:011|5\d{2})[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4})\b",
            // Diners Club
            r"\b(?:3(?:0[0-5]|[68]\d)\d{11,14})\b",
            // JCB
            r"\b(?:(?:2131|1800|35\d{3})[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4})\b",
            // Maestro
            r"\b(?:(?:5[0678]\d\d|6304|6390|67\d\d)\d{8,15})\b",
            r"\b(?:\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4})\b",
        ],
    },
    PatternDef {
        category: "money",
        kind: MatchKind::Plain,
        sources: &[
            r"\{\$?\d+(?:\.\d{2})?\$?\}",
            r"(?:\$\s?\d+(?:,\d{3})*(?:\.\d{2})?|\d+(?:,\d{3})*(?:\.\d{2})?\s?\$)",
        ],
    },
    PatternDef {
        category: "ssn_tin",
        kind: MatchKind::Plain,
        sources: &[r"\b\d{3}-\d{2}-\d{4}\b"],
    },
    PatternDef {
        category: "ein",
        kind: MatchKind::Plain,
        sources: &[r"\b\d{2}-\d{7}\b"],
    },
    PatternDef {
        category: "passport_number",
        kind: MatchKind::Plain,
        sources: &[r"\b[A-Z]\d{7}\b"],
    },
    PatternDef {
        category: "email_address",
        kind: MatchKind::Plain,
        sources: &[r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"],
    },
    PatternDef {
        category: "phone_number",
        kind: MatchKind::Plain,
        sources: &[
            r"\+?\b(?:1[-.\s]?)?(?:\(?[2-9]\d{2}\)?[-.\s]?)?[2-9]\d{2}[-.\s]?\d{4}\b",
            r"\b\d{10}\b",
            r"\b\(\d{3}\)\s?\d{3}[-.\s]?\d{4}\b",
            r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
        ],
    },
    PatternDef {
        category: "date_of_birth",
        kind: MatchKind::Plain,
        sources: &[r"\b\d{1,2}[-/]\d{1,2}[-/]\d{2,4}\b"],
    },
    PatternDef {
        category: "home_address",
        kind: MatchKind::Plain,
        sources: &[r"\b\d{1,9},\s[\w\s]+,\s[\w\s]+,\s[A-Z]{2}\s\d{5}(?:-\d{4})?\b"],
    },
    PatternDef {
        category: "race",
        kind: MatchKind::Plain,
        sources: &[
            r"\b(?:White|Black|Asian|Native American|Pacific Islander|Multiracial|Biracial)\b",
        ],
    },
    PatternDef {
        category: "ethnicity",
        kind: MatchKind::Plain,
        sources: &[
            r"\b(?:Hispanic|Latino|Latinx|African American|Caucasian|Arab|Jewish|Slavic|Celtic|Germanic|Scandinavian|Mediterranean|Ashkenazi|Sephardic)\b",
        ],
    },
    PatternDef {
        category: "password",
        kind: MatchKind::Credential,
        sources: &[r#"(password)\s*[:=]\s*['"]?([^\s'";]+)['"]?"#],
    },
    PatternDef {
        category: "access_key",
        kind: MatchKind::Credential,
        sources: &[r#"(access[-_\s]*key)\s*[:=]\s*['"]?([A-Z0-9]{16,})['"]?"#],
    },
    PatternDef {
        category: "secret_key",
        kind: MatchKind::Credential,
        sources: &[r#"(secret[-_\s]*key)\s*[:=]\s*['"]?([\w/+=_-]{8,})['"]?"#],
    },
    PatternDef {
        category: "api_key",
        kind: MatchKind::Credential,
        sources: &[r#"(api[-_\s]*key)\s*[:=]\s*['"]?(sk-[A-Za-z0-9_-]{16,})['"]?"#],
    },
    PatternDef {
        category: "aws_access_key",
        kind: MatchKind::Plain,
        sources: &[r"\bAKIA[0-9A-Z]{16}\b"],
    },
    PatternDef {
        category: "aws_secret_key",
        kind: MatchKind::Plain,
        sources: &[r"\b[0-9a-zA-Z/+=]{40}\b"],
    },
    PatternDef {
        category: "generic_credentials",
        kind: MatchKind::Credential,
        sources: &[r#"(user|login|username)\s*[:=]\s*['"]?([^\s'";]+)['"]?"#],
    },
];

/// Labels that show up as "values" when someone writes about credentials
/// rather than pasting one.
pub const GENERIC_LABELS: [&str; 7] = [
    "api key",
    "access key",
    "secret key",
    "password",
    "username",
    "user",
    "login",
];

pub const MIN_CREDENTIAL_LEN: usize = 10;
pub const MIN_DISTINCT_RATIO: f64 = 0.3;
