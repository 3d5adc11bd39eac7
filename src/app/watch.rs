//! Console host for the pipeline.
//!
//! Simulates a chat page with one prompt field: plain input lines replace
//! the field's content as if the user had typed them, `:`-prefixed lines are
//! the companion controls.

use anyhow::{Result, bail};
use promptbuddy::Config;
use promptbuddy::backend::create_backend;
use promptbuddy::host::{ElementKind, MemoryPage};
use promptbuddy::observability::{Observer, create_observer};
use promptbuddy::pipeline::{Agent, AgentCommand, AgentOptions};
use promptbuddy::state::SuggestionStyle;
use promptbuddy::ui::{ConsoleUi, style};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
plain text       replace the field content
:enter           submit the current content
:suggest         rewrite the field from templates
:score on|off    toggle quality scoring
:pii on|off      toggle sensitive-content detection
:style short|descriptive
:copy score|submitted N
:show            print the field content
:clear           clear both histories
:reset           reset everything to defaults
:quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConsoleInput {
    Text(String),
    Enter,
    Show,
    Help,
    Quit,
    Command(AgentCommand),
}

fn parse_line(line: &str) -> Result<ConsoleInput> {
    let Some(rest) = line.trim().strip_prefix(':') else {
        return Ok(ConsoleInput::Text(line.to_string()));
    };
    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();

    let input = match (name, arg) {
        ("enter", None) => ConsoleInput::Enter,
        ("show", None) => ConsoleInput::Show,
        ("help", None) => ConsoleInput::Help,
        ("quit" | "q", None) => ConsoleInput::Quit,
        ("suggest", None) => ConsoleInput::Command(AgentCommand::SuggestNow),
        ("clear", None) => ConsoleInput::Command(AgentCommand::ClearHistory),
        ("reset", None) => ConsoleInput::Command(AgentCommand::ResetContext),
        ("score", Some(flag)) => ConsoleInput::Command(AgentCommand::SetScoreDetection(
            parse_switch(flag)?,
        )),
        ("pii", Some(flag)) => {
            ConsoleInput::Command(AgentCommand::SetPiiDetection(parse_switch(flag)?))
        }
        ("style", Some(style)) => match style.parse::<SuggestionStyle>() {
            Ok(style) => ConsoleInput::Command(AgentCommand::SetSuggestionStyle(style)),
            Err(_) => bail!("unknown style '{style}' (short | descriptive)"),
        },
        ("copy", Some(history)) => {
            let position = match words.next() {
                None => 1,
                Some(n) => match n.parse::<usize>() {
                    Ok(position) if position > 0 => position,
                    _ => bail!("expected a position from 1, got '{n}'"),
                },
            };
            match history {
                "score" | "scored" => ConsoleInput::Command(AgentCommand::CopyScored(position)),
                "submitted" => ConsoleInput::Command(AgentCommand::CopySubmitted(position)),
                other => bail!("unknown history '{other}' (score | submitted)"),
            }
        }
        _ => bail!("unknown command ':{rest}', try :help"),
    };
    Ok(input)
}

fn parse_switch(flag: &str) -> Result<bool> {
    match flag {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => bail!("expected on|off, got '{other}'"),
    }
}

pub async fn run(config: Config) -> Result<()> {
    let page = Arc::new(MemoryPage::new());
    let selector = config
        .host
        .selectors
        .first()
        .map_or("textarea", String::as_str);
    let field = page.add_with_selector(selector, ElementKind::ValueBearing);

    let backend = create_backend(&config);
    let observer: Arc<dyn Observer> = Arc::from(create_observer(&config.observability));
    let (agent, handle) = Agent::new(
        page.clone(),
        backend,
        observer,
        ConsoleUi::stdout(),
        AgentOptions::from_config(&config),
    );
    let agent_task = tokio::spawn(agent.run());

    println!(
        "{} {}",
        style::header("PromptBuddy"),
        style::dim(format!("talking to {} (:help for commands)", config.backend.base_url))
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(ConsoleInput::Text(text)) => field.type_text(&text),
            Ok(ConsoleInput::Enter) => field.press_enter(),
            Ok(ConsoleInput::Show) => println!("{} {}", style::label("field:"), field.current_text()),
            Ok(ConsoleInput::Help) => println!("{HELP}"),
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Command(command)) => {
                if !handle.send(command) {
                    break;
                }
            }
            Err(e) => println!("{}", style::warning(e)),
        }
    }

    handle.send(AgentCommand::Shutdown);
    agent_task.await?;
    Ok(())
}
