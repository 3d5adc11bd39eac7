use crate::backend::ScoreTag;
use console::style;
use std::fmt::Display;

/// White bold: section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: secondary text, empty placeholders
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Cyan: field labels
pub fn label<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Green bold: confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// Red bold: the sensitive-content alert
pub fn alert<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Yellow: blocking input messages
pub fn warning<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Cyan bold: the suggested destination
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Quality badge colored by tier.
pub fn score_badge(score: ScoreTag) -> String {
    let text = format!("[{score}]");
    match score {
        ScoreTag::Low => style(text).red().bold().to_string(),
        ScoreTag::Medium => style(text).yellow().bold().to_string(),
        ScoreTag::High => style(text).green().bold().to_string(),
    }
}

/// On/off switch rendering.
pub fn toggle(enabled: bool) -> String {
    if enabled {
        style("on").green().to_string()
    } else {
        style("off").dim().to_string()
    }
}
