use std::borrow::Cow;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Markers after which the backend may echo credentials copied out of a
/// prompt. The token that follows is replaced before the body is logged.
const SECRET_MARKERS: [&str; 9] = [
    "sk-",
    "AKIA",
    "ghp_",
    "Bearer ",
    "api_key=",
    "password=",
    "\"api_key\":\"",
    "\"password\":\"",
    "\"token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_secret_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

fn redact_after(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // Bare marker without a value.
        if end == content_start {
            search_from = content_start;
            continue;
        }

        scrubbed.replace_range(start..end, "[REDACTED]");
        search_from = start + "[REDACTED]".len();
    }
}

/// Redact credential-looking tokens from a backend error body.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    if !SECRET_MARKERS.iter().any(|m| input.contains(m)) {
        return Cow::Borrowed(input);
    }
    let mut scrubbed = input.to_string();
    for marker in SECRET_MARKERS {
        redact_after(&mut scrubbed, marker);
    }
    Cow::Owned(scrubbed)
}

/// Scrub and truncate an error body so it is safe to log.
pub fn sanitize_error_body(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input.trim());
    match scrubbed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        None => scrubbed.into_owned(),
        Some((end, _)) => format!("{}...", &scrubbed[..end]),
    }
}
