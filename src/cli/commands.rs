use clap::{Parser, Subcommand};
use promptbuddy::state::SuggestionStyle;
use std::path::PathBuf;

/// `PromptBuddy` - real-time prompt quality companion.
#[derive(Parser, Debug)]
#[command(name = "promptbuddy")]
#[command(version)]
#[command(about = "Scores prompts, flags sensitive content and suggests where to send them.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.promptbuddy/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the analysis service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive console host: each input line becomes the field content
    Watch,

    /// Rate a single prompt
    Score {
        prompt: String,
    },

    /// Check text for sensitive personal data
    Detect {
        text: String,

        /// Use the built-in pattern scanner instead of the service
        #[arg(long)]
        local: bool,

        /// With --local, also print the text with findings masked
        #[arg(long, requires = "local")]
        mask: bool,
    },

    /// Suggest a destination model for prompts (most recent first)
    Classify {
        #[arg(required = true)]
        prompts: Vec<String>,
    },

    /// Rewrite a prompt from templates
    Suggest {
        prompt: String,

        /// short | descriptive
        #[arg(long, default_value_t = SuggestionStyle::Short)]
        style: SuggestionStyle,
    },

    /// Print the effective configuration
    Config,
}
