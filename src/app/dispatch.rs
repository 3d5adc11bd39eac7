use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result};
use promptbuddy::Config;
use promptbuddy::backend::{PromptBackend, create_backend};
use promptbuddy::detect::shared_scanner;
use promptbuddy::ui::style;

/// Resolve configuration from the global flags.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_or_init()?,
    };
    if let Some(url) = &cli.base_url {
        config.backend.base_url.clone_from(url);
        config.validate()?;
    }
    Ok(config)
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Watch => super::watch::run(config).await,
        Commands::Config => {
            let rendered =
                toml::to_string_pretty(&config).context("Failed to serialize config")?;
            println!(
                "{} {}",
                style::header("Config"),
                style::dim(config.config_path.display())
            );
            print!("{rendered}");
            Ok(())
        }
        Commands::Detect {
            text,
            local: true,
            mask,
        } => {
            let scanner = shared_scanner();
            match scanner.first_category(&text) {
                Some(category) => println!("{} {category}", style::alert("sensitive:")),
                None => println!("{}", style::success("clean")),
            }
            if mask {
                println!("{}", scanner.mask(&text));
            }
            Ok(())
        }
        command => {
            let backend = create_backend(&config);
            run_one_shot(backend.as_ref(), command).await?;
            Ok(())
        }
    }
}

async fn run_one_shot(backend: &dyn PromptBackend, command: Commands) -> promptbuddy::Result<()> {
    match command {
        Commands::Score { prompt } => match backend.score(&prompt).await? {
            Some(score) => println!("{}", style::score_badge(score)),
            None => println!("{}", style::dim("unknown")),
        },
        Commands::Detect { text, .. } => {
            if backend.detect_sensitive(&text).await? {
                println!("{}", style::alert("sensitive"));
            } else {
                println!("{}", style::success("clean"));
            }
        }
        Commands::Classify { prompts } => match backend.classify(&prompts).await? {
            Some(dest) => println!(
                "{} {}",
                style::accent(&dest.suggested),
                style::dim(format!("({})", dest.reason))
            ),
            None => println!("{}", style::dim("no suggestion")),
        },
        Commands::Suggest { prompt, style: suggestion_style } => {
            let templates = backend.suggest(&prompt, suggestion_style).await?;
            if templates.is_empty() {
                println!("{}", style::dim("no templates"));
            }
            for (i, template) in templates.iter().enumerate() {
                println!("{} {template}", style::label(format!("{}.", i + 1)));
            }
        }
        Commands::Watch | Commands::Config => {}
    }
    Ok(())
}
